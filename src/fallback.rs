use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::NewSubmission;

/// Fixed name of the store file; the directory around it comes from
/// configuration.
pub const STORAGE_KEY: &str = "procalyx_submissions";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("could not access the fallback store")]
    Io(#[from] std::io::Error),
    #[error("fallback store holds malformed data")]
    Malformed(#[from] serde_json::Error),
}

/// One queued record as it sits on disk.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoredSubmission {
    pub email: String,
}

/// Durable local queue for submissions made while the notify API is
/// unreachable: a single JSON array, appended to in order, never
/// deduplicated. Each append is one synchronous read-modify-write of the
/// whole file.
#[derive(Clone, Debug)]
pub struct FallbackStore {
    dir: PathBuf,
}

impl FallbackStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn path(&self) -> PathBuf { self.dir.join(format!("{STORAGE_KEY}.json")) }

    #[tracing::instrument(
        name = "Appending submission to fallback store",
        skip(self, submission),
        fields(file=%self.path().display())
    )]
    pub fn append(
        &self,
        submission: &NewSubmission,
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let mut entries = self.read_entries()?;
        entries.push(StoredSubmission {
            email: submission.email.as_ref().to_owned(),
        });
        fs::write(self.path(), serde_json::to_string(&entries)?)?;
        Ok(())
    }

    /// Everything queued so far, oldest first.
    pub fn pending(&self) -> Result<Vec<StoredSubmission>, StoreError> { self.read_entries() }

    fn read_entries(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            // nothing queued yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => "[]".to_owned(),
            Err(e) => return Err(e.into()),
        };
        // a file we cannot parse is an error, not an excuse to wipe the queue
        Ok(serde_json::from_str(&raw)?)
    }
}
