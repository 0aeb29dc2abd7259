//! Best-score persistence
//!
//! Stored as a single plain-text integer. A missing or unreadable file counts
//! as a best score of zero.

use std::fmt;
use std::path::{Path, PathBuf};

/// Default file name for the best score
pub const DEFAULT_PATH: &str = "highscore.txt";

/// Failure to write the best score
#[derive(Debug)]
pub enum PersistError {
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write high score to {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Parse stored text into a score (zero if malformed)
pub fn parse_score(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}

/// File-backed best score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u64,
}

impl HighScoreStore {
    /// Create a store with a known best score (nothing read from disk)
    pub fn new(path: impl Into<PathBuf>, best: u64) -> Self {
        Self {
            path: path.into(),
            best,
        }
    }

    /// Load the best score from disk
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let best = match std::fs::read_to_string(path) {
            Ok(text) => {
                let best = parse_score(&text);
                if best == 0 && !text.trim().is_empty() && text.trim() != "0" {
                    log::warn!("Malformed high score in {}, starting from 0", path.display());
                }
                best
            }
            Err(e) => {
                log::warn!("No high score at {} ({}), starting from 0", path.display(), e);
                0
            }
        };
        log::info!("High score: {}", best);
        Self::new(path, best)
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a finished round. Returns true if it beats the best score.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            log::info!("New high score: {} (was {})", score, self.best);
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Write the best score to disk
    pub fn save(&self) -> Result<(), PersistError> {
        std::fs::write(&self.path, self.best.to_string()).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
