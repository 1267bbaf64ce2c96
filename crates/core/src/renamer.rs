use crate::error::RenameError;
use crate::exif_reader::probe_image;
use crate::media::{extension_of, MediaKind};
use crate::naming::{resolve_target, suffixed_parts, NameResolution};
use crate::report::{FileReport, RenameOutcome, SkipReason, Summary};
use crate::timestamp::resolve_timestamp;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{self, DirEntry};
use std::path::Path;
use tracing::{debug, info, warn};

/// Renames every recognized image and video directly inside `dir` after
/// its capture (or modification) time.
///
/// Only a missing or unreadable directory is an error. Failures of
/// individual files end up in the returned [`Summary`].
pub fn rename_directory(dir: &Path) -> Result<Summary> {
    let entries = snapshot(dir)?;
    Ok(rename_entries(dir, entries))
}

fn snapshot(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("could not list folder: {}", dir.display()))?
    {
        entries.push(entry.with_context(|| format!("could not read entry in: {}", dir.display()))?);
    }
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

fn rename_entries(dir: &Path, entries: Vec<DirEntry>) -> Summary {
    let mut existing: HashSet<String> = entries
        .iter()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    let mut summary = Summary {
        total: entries.len(),
        files: Vec::with_capacity(entries.len()),
        ..Summary::default()
    };

    for entry in entries {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let kind = MediaKind::from_file_name(&file_name);
        let outcome = match kind {
            None => {
                debug!(file = %file_name, "unrecognized extension");
                RenameOutcome::Skipped {
                    reason: SkipReason::UnrecognizedExtension,
                }
            }
            Some(kind) => match process_entry(dir, &entry, &file_name, kind, &mut existing) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(file = %file_name, error = %err, "error while processing");
                    RenameOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            },
        };
        summary.files.push(FileReport {
            file_name,
            kind,
            outcome,
        });
    }

    settle_suffixes(dir, &mut summary.files, &mut existing);
    summary.renamed = summary
        .files
        .iter()
        .filter(|f| matches!(f.outcome, RenameOutcome::Renamed { .. }))
        .count();

    info!(
        renamed = summary.renamed,
        total = summary.total,
        failed = summary.failed(),
        "batch finished"
    );
    summary
}

/// `name` is the lossy UTF-8 form of the entry's name; the entry's own path
/// is used for every filesystem call.
fn process_entry(
    dir: &Path,
    entry: &DirEntry,
    name: &str,
    kind: MediaKind,
    existing: &mut HashSet<String>,
) -> Result<RenameOutcome, RenameError> {
    let path = entry.path();
    let file_type = entry.file_type().map_err(|source| RenameError::Inspect {
        path: path.clone(),
        source,
    })?;
    if !file_type.is_file() {
        debug!(file = %name, "not a regular file");
        return Ok(RenameOutcome::Skipped {
            reason: SkipReason::NotAFile,
        });
    }

    match kind {
        MediaKind::Image => {
            info!(file = %name, "open image");
            if let Err(err) = probe_image(&path) {
                let detail = format!("{err:#}");
                warn!(file = %name, error = %detail, "fail to open image");
                return Ok(RenameOutcome::Skipped {
                    reason: SkipReason::UndecodableImage { detail },
                });
            }
        }
        MediaKind::Video => info!(file = %name, "open video"),
    }

    let stamp = resolve_timestamp(&path, kind)?;
    let extension = extension_of(name).unwrap_or_default();
    let target = match resolve_target(name, &stamp.formatted(), extension, existing) {
        NameResolution::AlreadyCorrect(name) => {
            info!(file = %name, "already OK");
            return Ok(RenameOutcome::AlreadyCorrect {
                name,
                source: stamp.source,
            });
        }
        NameResolution::Available(target) => target,
    };

    rename_guarded(dir, &path, name, &target)?;
    info!(file = %name, new_name = %target, source = %stamp.source, "renamed");

    existing.remove(name);
    existing.insert(target.clone());
    Ok(RenameOutcome::Renamed {
        to: target,
        source: stamp.source,
    })
}

/// Renames `from` to `dir/target` unless something already sits there.
fn rename_guarded(dir: &Path, from: &Path, from_name: &str, target: &str) -> Result<(), RenameError> {
    let target_path = dir.join(target);
    // A case-only change resolves to the same file on case-insensitive filesystems.
    if !target.eq_ignore_ascii_case(from_name) && fs::symlink_metadata(&target_path).is_ok() {
        return Err(RenameError::TargetExists { path: target_path });
    }
    fs::rename(from, &target_path).map_err(|source| RenameError::Rename {
        from: from.to_path_buf(),
        to: target_path,
        source,
    })
}

/// Moves files holding a `-n` name down to a lower name that was freed
/// later in the run, so a repeated run finds every file in place.
fn settle_suffixes(dir: &Path, files: &mut [FileReport], existing: &mut HashSet<String>) {
    loop {
        let mut moved = false;
        for report in files.iter_mut() {
            let (current, source) = match &report.outcome {
                RenameOutcome::Renamed { to, source } => (to.clone(), *source),
                RenameOutcome::AlreadyCorrect { name, source } => (name.clone(), *source),
                _ => continue,
            };
            let Some((stamp, extension)) = suffixed_parts(&current) else {
                continue;
            };
            let NameResolution::Available(lower) =
                resolve_target(&current, stamp, extension, existing)
            else {
                continue;
            };

            match rename_guarded(dir, &dir.join(&current), &current, &lower) {
                Ok(()) => {
                    info!(file = %current, new_name = %lower, "moved to freed name");
                    existing.remove(&current);
                    existing.insert(lower.clone());
                    report.outcome = RenameOutcome::Renamed { to: lower, source };
                    moved = true;
                }
                Err(err) => warn!(file = %current, error = %err, "could not move to freed name"),
            }
        }
        if !moved {
            break;
        }
    }
}
