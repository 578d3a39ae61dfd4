use crate::foundation::error::{LyrError, LyrResult};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Extension of lyrics documents resolved from a document identifier.
pub const LYRICS_EXTENSION: &str = "json";

/// Suffixes (appended to the document identifier) of files the typesetter leaves behind.
pub const SCRATCH_SUFFIXES: [&str; 8] = [
    ".aux", ".log", "_lyr.log", ".snm", ".toc", ".nav", ".out", ".tex",
];

/// Directory layout of a lyrics project.
///
/// Generated markup refers to backgrounds as `../images/<name>`, so the images directory must be
/// a sibling of `out_dir`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    /// Input documents, `<id>.json`.
    pub lyrics_dir: PathBuf,
    /// Template containing the substitution markers.
    pub template: PathBuf,
    /// Generated markup, logs and artifacts.
    pub out_dir: PathBuf,
}

impl Workspace {
    /// Conventional layout below `root`: `lyrics/`, `ref/template.tex`, `out/`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            lyrics_dir: root.join("lyrics"),
            template: root.join("ref").join("template.tex"),
            out_dir: root.join("out"),
        }
    }

    /// Path of the lyrics document for `id`.
    pub fn lyrics_path(&self, id: &str) -> PathBuf {
        self.lyrics_dir.join(format!("{id}.{LYRICS_EXTENSION}"))
    }

    /// Create the output directory if needed.
    pub fn ensure_out_dir(&self) -> LyrResult<()> {
        std::fs::create_dir_all(&self.out_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                self.out_dir.display()
            )
        })?;
        Ok(())
    }

    /// Per-document naming state for `id`.
    pub fn job(&self, id: impl Into<String>, background: Option<String>) -> RenderJob {
        RenderJob {
            id: id.into(),
            background,
            out_dir: self.out_dir.clone(),
        }
    }
}

/// Document identifier derived from a lyrics file path: its file stem.
pub fn document_id(path: &Path) -> LyrResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            LyrError::malformed(format!(
                "cannot derive a document name from '{}'",
                path.display()
            ))
        })
}

/// Naming state for one document going through the render pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderJob {
    /// Document identifier; every working file is named after it.
    pub id: String,
    /// Background replacing the document's own image.
    pub background: Option<String>,
    out_dir: PathBuf,
}

impl RenderJob {
    /// Working directory of every external tool run for this job.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `<id><suffix>`, as passed to tools running inside [`out_dir`](Self::out_dir).
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.id)
    }

    /// Generated markup source.
    pub fn markup_path(&self) -> PathBuf {
        self.out_dir.join(self.file_name(".tex"))
    }

    /// Captured typesetter output.
    pub fn log_path(&self) -> PathBuf {
        self.out_dir.join(self.file_name("_lyr.log"))
    }

    /// Final rendered document.
    pub fn artifact_path(&self) -> PathBuf {
        self.out_dir.join(self.file_name(".pdf"))
    }

    /// Intermediate files removed after typesetting.
    pub fn scratch_paths(&self) -> Vec<PathBuf> {
        SCRATCH_SUFFIXES
            .iter()
            .map(|suffix| self.out_dir.join(self.file_name(suffix)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/job.rs"]
mod tests;
