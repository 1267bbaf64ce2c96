use crate::error::RenameError;
use crate::exif_reader::read_date_time_original;
use crate::media::MediaKind;
use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const NAME_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    ExifDateTimeOriginal,
    FileModified,
}

impl fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampSource::ExifDateTimeOriginal => f.write_str("EXIF DateTimeOriginal"),
            TimestampSource::FileModified => f.write_str("modification time"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub at: NaiveDateTime,
    pub source: TimestampSource,
}

impl ResolvedTimestamp {
    pub fn formatted(&self) -> String {
        format_timestamp(&self.at)
    }
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(NAME_FORMAT).to_string()
}

/// Modification time on the local clock.
pub fn file_modified(path: &Path) -> Result<NaiveDateTime, RenameError> {
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| RenameError::ModifiedTime {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

/// Picks the timestamp a file is named after. Images prefer the capture
/// date and fall back to the modification time; videos always use the
/// modification time. The image must already have passed `probe_image`.
pub fn resolve_timestamp(path: &Path, kind: MediaKind) -> Result<ResolvedTimestamp, RenameError> {
    if kind == MediaKind::Image {
        match read_date_time_original(path) {
            Ok(Some(at)) => {
                return Ok(ResolvedTimestamp {
                    at,
                    source: TimestampSource::ExifDateTimeOriginal,
                })
            }
            Ok(None) => info!(path = %path.display(), "no capture date in EXIF, using modification time"),
            Err(err) => {
                let detail = format!("{err:#}");
                debug!(path = %path.display(), error = %detail, "EXIF unreadable");
                info!(path = %path.display(), "no EXIF metadata, using modification time");
            }
        }
    }

    Ok(ResolvedTimestamp {
        at: file_modified(path)?,
        source: TimestampSource::FileModified,
    })
}
