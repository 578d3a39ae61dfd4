use crate::foundation::error::{LyrError, LyrResult};
use crate::foundation::options::Options;
use crate::render::job::RenderJob;
use crate::render::process::{OutputCapture, ProcessRunner, ToolCommand};
use anyhow::Context as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// External programs driven by the render pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// LaTeX engine producing the PDF.
    pub typesetter: String,
    /// Rasterizer/compressor applied to the finished PDF.
    pub converter: String,
    /// Concatenates per-document PDFs in batch mode.
    pub merger: String,
    /// Typesetter runs per document; the second one resolves beamer navigation references.
    pub typeset_passes: u32,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            typesetter: "pdflatex".to_string(),
            converter: "convert".to_string(),
            merger: "pdfunite".to_string(),
            typeset_passes: 2,
        }
    }
}

/// Typeset, clean, resize and merge via a [`ProcessRunner`].
///
/// Stages run strictly in sequence and stop at the first failing tool.
pub struct RenderPipeline<'a> {
    toolchain: &'a Toolchain,
    options: &'a Options,
    runner: &'a mut dyn ProcessRunner,
}

impl<'a> RenderPipeline<'a> {
    /// Pipeline running `toolchain` through `runner`.
    pub fn new(
        toolchain: &'a Toolchain,
        options: &'a Options,
        runner: &'a mut dyn ProcessRunner,
    ) -> Self {
        Self {
            toolchain,
            options,
            runner,
        }
    }

    /// Full per-document pipeline; returns the artifact path.
    #[tracing::instrument(skip_all, fields(document = %job.id))]
    pub fn render(&mut self, job: &RenderJob) -> LyrResult<PathBuf> {
        self.typeset(job)?;
        clean_scratch(job)?;
        self.resize(job)?;
        Ok(job.artifact_path())
    }

    /// Run the typesetter `typeset_passes` times on the job's markup.
    pub fn typeset(&mut self, job: &RenderJob) -> LyrResult<()> {
        let cmd = ToolCommand::new(&self.toolchain.typesetter)
            .arg("-interaction=nonstopmode")
            .arg(job.file_name(".tex"));
        let capture = if self.options.debug {
            OutputCapture::Inherit
        } else {
            OutputCapture::LogFile(job.log_path())
        };

        for pass in 1..=self.toolchain.typeset_passes {
            tracing::info!(pass, "generating pdf file");
            self.run_checked(&cmd, job.out_dir(), &capture, &job.id)?;
        }
        Ok(())
    }

    /// Rasterize and JPEG-compress the PDF in place.
    pub fn resize(&mut self, job: &RenderJob) -> LyrResult<()> {
        tracing::info!("resizing pdf");
        let pdf = job.file_name(".pdf");
        let cmd = ToolCommand::new(&self.toolchain.converter)
            .args(["-density", "600x600", "-quality", "100", "-compress", "jpeg"])
            .arg(pdf.clone())
            .arg(pdf);
        self.run_checked(&cmd, job.out_dir(), &OutputCapture::Inherit, &job.id)
    }

    /// Concatenate `artifacts` (in order) into `out_dir/<name>.pdf`.
    ///
    /// Artifacts must live in `out_dir`, where the merger runs. A single artifact is copied
    /// instead of invoking the merger.
    pub fn merge(&mut self, artifacts: &[PathBuf], out_dir: &Path, name: &str) -> LyrResult<PathBuf> {
        let merged = out_dir.join(format!("{name}.pdf"));
        tracing::info!(documents = artifacts.len(), merged = %merged.display(), "merging pdf files");

        match artifacts {
            [] => Err(LyrError::malformed("nothing to merge")),
            [single] => {
                std::fs::copy(single, &merged).with_context(|| {
                    format!("copy '{}' to '{}'", single.display(), merged.display())
                })?;
                Ok(merged)
            }
            many => {
                let mut cmd = ToolCommand::new(&self.toolchain.merger);
                for artifact in many {
                    let file = artifact.file_name().ok_or_else(|| {
                        LyrError::malformed(format!("'{}' is not a file", artifact.display()))
                    })?;
                    cmd = cmd.arg(file.to_string_lossy());
                }
                cmd = cmd.arg(format!("{name}.pdf"));
                self.run_checked(&cmd, out_dir, &OutputCapture::Inherit, name)?;
                Ok(merged)
            }
        }
    }

    fn run_checked(
        &mut self,
        cmd: &ToolCommand,
        working_dir: &Path,
        capture: &OutputCapture,
        document: &str,
    ) -> LyrResult<()> {
        let status = self.runner.run(cmd, working_dir, capture)?;
        if !status.success() {
            return Err(LyrError::external(&cmd.program, document, status));
        }
        Ok(())
    }
}

/// Remove the typesetter's intermediate files for `job`.
///
/// Files that are already gone are not an error; any other removal failure is.
pub fn clean_scratch(job: &RenderJob) -> LyrResult<()> {
    tracing::info!("cleaning tmp files");
    for path in job.scratch_paths() {
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "already absent");
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("remove '{}'", path.display()))
                    .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
