//! Dataset storage.
//!
//! Locates and loads the three source CSV files:
//! - Tournament overviews (`WorldCups.csv`)
//! - Matches (`WorldCupMatches.csv`)
//! - Player events (`WorldCupPlayers.csv`)

mod cleanup;
mod dataset;

pub use cleanup::{clean_opt, clean_text};
pub use dataset::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Required file not found: {0}")]
    MissingFile(PathBuf),
}

/// Configuration for dataset paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.data_dir.join("WorldCups.csv")
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join("WorldCupMatches.csv")
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("WorldCupPlayers.csv")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
