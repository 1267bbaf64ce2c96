use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single file. The batch records it and moves on.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("could not inspect {}: {source}", path.display())]
    Inspect { path: PathBuf, source: io::Error },
    #[error("could not read modification time of {}: {source}", path.display())]
    ModifiedTime { path: PathBuf, source: io::Error },
    #[error("target already exists: {}", path.display())]
    TargetExists { path: PathBuf },
    #[error("rename failed: {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}
