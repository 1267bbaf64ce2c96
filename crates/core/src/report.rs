use crate::media::MediaKind;
use crate::timestamp::TimestampSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnrecognizedExtension,
    NotAFile,
    UndecodableImage { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed {
        to: String,
        source: TimestampSource,
    },
    AlreadyCorrect {
        name: String,
        source: TimestampSource,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file_name: String,
    pub kind: Option<MediaKind>,
    pub outcome: RenameOutcome,
}

impl FileReport {
    /// Console lines for this file. Ignored entries produce nothing.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let Some(kind) = self.kind else {
            return lines;
        };
        if matches!(
            self.outcome,
            RenameOutcome::Skipped {
                reason: SkipReason::NotAFile
            }
        ) {
            return lines;
        }

        match kind {
            MediaKind::Image => lines.push(format!("Open image : {}", self.file_name)),
            MediaKind::Video => lines.push(format!("Open video : {}", self.file_name)),
        }

        match &self.outcome {
            RenameOutcome::Renamed { to, source } => {
                lines.extend(self.fallback_notice(*source));
                lines.push(format!(
                    "New name   : {} <- {} ({})",
                    to, self.file_name, source
                ));
            }
            RenameOutcome::AlreadyCorrect { name, source } => {
                lines.extend(self.fallback_notice(*source));
                lines.push(format!("Already OK : {}", name));
            }
            RenameOutcome::Skipped {
                reason: SkipReason::UndecodableImage { detail },
            } => lines.push(format!("Fail to open image : {}", detail)),
            RenameOutcome::Skipped { .. } => {}
            RenameOutcome::Failed { reason } => {
                lines.push(format!("Error while processing : {}", reason))
            }
        }
        lines
    }

    fn fallback_notice(&self, source: TimestampSource) -> Option<String> {
        (self.kind == Some(MediaKind::Image) && source == TimestampSource::FileModified)
            .then(|| "No data in EXIF metadata, take modified date".to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub renamed: usize,
    /// Every entry listed in the directory, ignored ones included.
    pub total: usize,
    pub files: Vec<FileReport>,
}

impl Summary {
    pub fn log(&self) -> Vec<String> {
        self.files.iter().flat_map(FileReport::lines).collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} files renamed of {} total files listed",
            self.renamed, self.total
        )
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, RenameOutcome::Failed { .. }))
            .count()
    }

    pub fn outcome_of(&self, file_name: &str) -> Option<&RenameOutcome> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| &f.outcome)
    }
}
