use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "JPG", "jpeg", "JPEG", "png", "PNG"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "MP4", "mov", "MOV"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a directory entry by the text after its last dot.
    /// Matching is case-sensitive: `.Jpg` is not recognized.
    pub fn from_file_name(name: &str) -> Option<MediaKind> {
        extension_of(name).and_then(MediaKind::from_extension)
    }

    pub fn from_extension(ext: &str) -> Option<MediaKind> {
        if IMAGE_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Extension without the leading dot, as written in the file name.
pub fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}
