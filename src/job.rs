//! Job config: the per-collection `challenge1b_input.json`.
//!
//! Only the fields the pipeline reads are modelled; anything else in the
//! file (e.g. `challenge_info`) is ignored.

use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The persona, task and document list of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// A document entry; `filename` is resolved inside the collection's PDF directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl JobConfig {
    /// Parse a job config from a JSON string. `path` is only used for error messages.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, AnalyzerError> {
        serde_json::from_str(json).map_err(|source| AnalyzerError::InvalidJobConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the job config at `path`.
    pub fn load(path: &Path) -> Result<Self, AnalyzerError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AnalyzerError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                AnalyzerError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let job = Self::from_json(&json, path)?;
        debug!(
            "Loaded job config {}: {} documents",
            path.display(),
            job.documents.len()
        );
        Ok(job)
    }

    /// Document filenames in config order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}
