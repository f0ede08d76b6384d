use crate::session::SessionResult;
use crate::study::StudyMode;
use chrono::prelude::*;
use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only CSV log of finished sessions, one row per run. This records
/// session outcomes only; no per-card learning state is kept.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new() -> Option<Self> {
        ProjectDirs::from("", "", "kartochki").map(|pd| Self {
            path: pd.config_dir().join("history.csv"),
        })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn append(
        &self,
        deck_name: &str,
        mode: StudyMode,
        result: &SessionResult,
    ) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let mut log_file = OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        if needs_header {
            writeln!(
                log_file,
                "date,deck,mode,total,correct,accuracy,elapsed_secs"
            )?;
        }

        writeln!(
            log_file,
            "{},{},{},{},{},{:.0},{:.2}",
            Local::now().format("%c"),
            deck_name,
            mode,
            result.total,
            result.correct,
            result.accuracy(),
            result.elapsed.as_secs_f64(),
        )?;

        Ok(())
    }
}
