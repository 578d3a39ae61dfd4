use crate::foundation::error::{LyrError, LyrResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One entry of a batch list: a document identifier and its optional background override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchEntry {
    /// Document identifier (file stem under the lyrics directory).
    pub song: String,
    /// Background image replacing the document's own `image`.
    pub background: Option<String>,
}

/// Ordered list of documents rendered and merged into one artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchList {
    entries: Vec<BatchEntry>,
}

#[derive(serde::Deserialize)]
struct RawBatchList {
    songs: Vec<String>,
    background: Vec<Option<String>>,
}

impl BatchList {
    /// Parse a batch list from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LyrResult<Self> {
        let raw: RawBatchList = serde_json::from_reader(r)
            .map_err(|e| LyrError::malformed(format!("syntax error in batch list: {e}")))?;

        if raw.songs.len() != raw.background.len() {
            return Err(LyrError::malformed(format!(
                "batch list has {} songs but {} background entries",
                raw.songs.len(),
                raw.background.len()
            )));
        }
        if raw.songs.is_empty() {
            return Err(LyrError::malformed("batch list has no songs"));
        }

        let entries = raw
            .songs
            .into_iter()
            .zip(raw.background)
            .map(|(song, background)| BatchEntry {
                song,
                background: background.filter(|b| !b.is_empty()),
            })
            .collect();
        Ok(Self { entries })
    }

    /// Parse a batch list from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LyrResult<Self> {
        let path = path.as_ref();
        tracing::info!("parsing batch list {}", path.display());
        let f = File::open(path).map_err(|e| {
            LyrError::malformed(format!("open batch list '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Entries in list order.
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lyrics/batch.rs"]
mod tests;
