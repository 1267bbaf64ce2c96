mod config;
mod error;
mod exif_reader;
mod media;
mod naming;
mod renamer;
mod report;
mod timestamp;

#[cfg(test)]
mod test_support;

pub use config::{app_paths, load_config, parse_config, AppConfig, AppPaths};
pub use error::RenameError;
pub use exif_reader::{probe_image, read_date_time_original};
pub use media::{extension_of, MediaKind, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
pub use naming::{candidate_name, resolve_target, suffixed_parts, NameResolution};
pub use renamer::rename_directory;
pub use report::{FileReport, RenameOutcome, SkipReason, Summary};
pub use timestamp::{
    file_modified, format_timestamp, resolve_timestamp, ResolvedTimestamp, TimestampSource,
    NAME_FORMAT,
};
