use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use image::ImageReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Reads EXIF `DateTimeOriginal` (tag 36867) from the primary image.
///
/// `Ok(None)` means the container has EXIF data but the tag is absent or
/// not a valid `YYYY:MM:DD HH:MM:SS` value. A file without any EXIF block
/// is an error.
pub fn read_date_time_original(path: &Path) -> Result<Option<NaiveDateTime>> {
    let file = File::open(path)
        .with_context(|| format!("could not open for EXIF: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("could not parse EXIF: {}", path.display()))?;

    Ok(exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .and_then(|field| ascii_value(&field.value))
        .and_then(|raw| parse_exif_date(&raw)))
}

/// Decodes only the image header. The file handle is dropped before return.
pub fn probe_image(path: &Path) -> Result<()> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("could not open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("could not read image: {}", path.display()))?;
    reader
        .into_dimensions()
        .with_context(|| format!("could not decode image: {}", path.display()))?;
    Ok(())
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts.first().map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string()
        }),
        _ => None,
    }
}

fn parse_exif_date(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, EXIF_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_exif_date, probe_image, read_date_time_original};
    use crate::test_support::{local, write_jpeg, write_jpeg_with_date_taken, write_png};
    use exif::Tag;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn date_time_original_is_tag_36867() {
        assert_eq!(Tag::DateTimeOriginal.number(), 36867);
    }

    #[test]
    fn parse_exif_date_accepts_only_colon_format() {
        assert_eq!(
            parse_exif_date("2018:04:01 17:54:17"),
            Some(local(2018, 4, 1, 17, 54, 17))
        );
        assert_eq!(parse_exif_date("2018-04-01 17:54:17"), None);
        assert_eq!(parse_exif_date("0000:00:00 00:00:00"), None);
        assert_eq!(parse_exif_date(""), None);
    }

    #[test]
    fn reads_capture_date_from_jpeg() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("Photo Apr 01, 5 54 17 PM.jpg");
        write_jpeg_with_date_taken(&path, "2018:04:01 17:54:17");

        let date = read_date_time_original(&path).expect("exif should parse");
        assert_eq!(date, Some(local(2018, 4, 1, 17, 54, 17)));
    }

    #[test]
    fn malformed_capture_date_reads_as_none() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("bad.jpg");
        write_jpeg_with_date_taken(&path, "not a date");

        let date = read_date_time_original(&path).expect("exif block itself is valid");
        assert_eq!(date, None);
    }

    #[test]
    fn jpeg_without_exif_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("plain.jpg");
        write_jpeg(&path);

        assert!(read_date_time_original(&path).is_err());
    }

    #[test]
    fn probe_accepts_jpeg_and_png() {
        let temp = tempdir().expect("tempdir");
        let jpg = temp.path().join("a.jpg");
        let png = temp.path().join("b.PNG");
        write_jpeg_with_date_taken(&jpg, "2018:04:01 17:54:17");
        write_png(&png);

        probe_image(&jpg).expect("jpeg header should decode");
        probe_image(&png).expect("png header should decode");
    }

    #[test]
    fn probe_rejects_non_image_bytes() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("broken.jpg");
        fs::write(&path, b"this is not an image").expect("write");

        let err = probe_image(&path).expect_err("garbage should not decode");
        assert!(err.to_string().contains("could not decode image"));
    }
}
