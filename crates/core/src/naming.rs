use crate::timestamp::{format_timestamp, NAME_FORMAT};
use chrono::NaiveDateTime;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    /// Free name to rename to.
    Available(String),
    /// The file already carries this name.
    AlreadyCorrect(String),
}

pub fn candidate_name(stamp: &str, extension: &str) -> String {
    format!("{}.{}", stamp, extension.to_lowercase())
}

fn suffixed_name(stamp: &str, extension: &str, n: usize) -> String {
    format!("{}-{}.{}", stamp, n, extension.to_lowercase())
}

/// Splits a name of the form `<stamp>-<n>.<ext>` into stamp and extension.
/// Names without a numeric suffix, or whose stamp is not in the naming
/// format, yield `None`.
pub fn suffixed_parts(name: &str) -> Option<(&str, &str)> {
    let (stem, extension) = name.rsplit_once('.')?;
    let (stamp, n) = stem.rsplit_once('-')?;
    n.parse::<usize>().ok().filter(|n| *n > 0)?;
    let at = NaiveDateTime::parse_from_str(stamp, NAME_FORMAT).ok()?;
    if format_timestamp(&at) != stamp {
        return None;
    }
    Some((stamp, extension))
}

/// Finds the name `original` should get. `existing` holds every name
/// currently in the directory, `original` included.
pub fn resolve_target(
    original: &str,
    stamp: &str,
    extension: &str,
    existing: &HashSet<String>,
) -> NameResolution {
    let mut candidate = candidate_name(stamp, extension);
    if candidate == original {
        return NameResolution::AlreadyCorrect(candidate);
    }

    let mut n = 1usize;
    while existing.contains(&candidate) {
        candidate = suffixed_name(stamp, extension, n);
        if candidate == original {
            return NameResolution::AlreadyCorrect(candidate);
        }
        n += 1;
    }

    NameResolution::Available(candidate)
}
