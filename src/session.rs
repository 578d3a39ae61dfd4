use crate::foundation::error::{LyrError, LyrResult};
use crate::foundation::options::Options;
use crate::layout::packer::pack_document;
use crate::lyrics::batch::BatchList;
use crate::lyrics::document::LyricsDocument;
use crate::markup::generate::{MarkupDocument, MarkupGenerator, Template};
use crate::markup::syntax::MarkupSyntax;
use crate::render::job::{RenderJob, Workspace, document_id};
use crate::render::pipeline::{RenderPipeline, Toolchain};
use crate::render::process::{ProcessRunner, SystemRunner};
use std::path::{Path, PathBuf};

/// Result of processing one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentOutcome {
    /// Naming state used for the document.
    pub job: RenderJob,
    /// Rendered artifact; `None` when PDF generation is muted.
    pub artifact: Option<PathBuf>,
}

/// Result of a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Per-document outcomes in list order.
    pub documents: Vec<DocumentOutcome>,
    /// Merged artifact; `None` when PDF generation is muted.
    pub merged: Option<PathBuf>,
}

/// Drives documents from lyrics file to rendered artifact.
///
/// Documents are processed one at a time: load, pack, generate, write the markup, then hand it to
/// the render pipeline. Nothing is shared between documents except the read-only configuration.
pub struct DeckSession<R: ProcessRunner = SystemRunner> {
    workspace: Workspace,
    options: Options,
    toolchain: Toolchain,
    syntax: MarkupSyntax,
    runner: R,
}

impl DeckSession<SystemRunner> {
    /// Session running the real external tools.
    pub fn new(workspace: Workspace, options: Options) -> Self {
        Self::with_runner(workspace, options, SystemRunner)
    }
}

impl<R: ProcessRunner> DeckSession<R> {
    /// Session using `runner` for every external tool.
    pub fn with_runner(workspace: Workspace, options: Options, runner: R) -> Self {
        Self {
            workspace,
            options,
            toolchain: Toolchain::default(),
            syntax: MarkupSyntax::beamer(),
            runner,
        }
    }

    /// Replace the default external programs.
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Run options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Directory layout.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The process runner, e.g. to inspect a [`RecordingRunner`](crate::RecordingRunner).
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Pack `lyrics` and substitute it into the workspace template.
    pub fn build_markup(
        &self,
        lyrics: &LyricsDocument,
        background: Option<&str>,
    ) -> LyrResult<MarkupDocument> {
        tracing::info!("giving format");
        let frames = pack_document(lyrics)?;
        let template = Template::from_path(&self.workspace.template)?;
        MarkupGenerator::new(&self.syntax, &self.options).generate(
            &template,
            &frames,
            lyrics,
            background,
        )
    }

    /// Load, pack and generate one document, then write its markup source.
    ///
    /// Nothing is written when loading, packing or generation fails.
    pub fn prepare(&self, lyrics_path: &Path, job: &RenderJob) -> LyrResult<()> {
        let lyrics = LyricsDocument::from_path(lyrics_path)?;
        let markup = self.build_markup(&lyrics, job.background.as_deref())?;
        self.workspace.ensure_out_dir()?;
        markup.write_to(&job.markup_path())?;
        tracing::debug!(path = %job.markup_path().display(), "markup written");
        Ok(())
    }

    /// Full path for one document: markup, then (unless muted) the render pipeline.
    #[tracing::instrument(skip(self, lyrics_path), fields(path = %lyrics_path.display()))]
    pub fn process_document(
        &mut self,
        lyrics_path: &Path,
        background: Option<String>,
    ) -> LyrResult<DocumentOutcome> {
        let id = document_id(lyrics_path)?;
        let job = self.workspace.job(id, background);
        self.process_job(lyrics_path, job)
    }

    fn process_job(&mut self, lyrics_path: &Path, job: RenderJob) -> LyrResult<DocumentOutcome> {
        self.prepare(lyrics_path, &job)
            .map_err(|e| e.in_document(&job.id))?;

        if self.options.mute_pdf {
            return Ok(DocumentOutcome {
                job,
                artifact: None,
            });
        }

        let artifact = RenderPipeline::new(&self.toolchain, &self.options, &mut self.runner)
            .render(&job)
            .map_err(|e| e.in_document(&job.id))?;
        Ok(DocumentOutcome {
            job,
            artifact: Some(artifact),
        })
    }

    /// Process every entry of a batch list, then merge the artifacts into `<output>.pdf`.
    ///
    /// The first failing document aborts the run. `output` defaults to the list's file stem and
    /// must not name one of the songs, unless PDF generation is muted and nothing is merged.
    #[tracing::instrument(skip(self, list_path), fields(list = %list_path.display()))]
    pub fn process_batch(
        &mut self,
        list_path: &Path,
        output: Option<&str>,
    ) -> LyrResult<BatchOutcome> {
        let list = BatchList::from_path(list_path)?;
        let output = match output {
            Some(name) => name.to_string(),
            None => document_id(list_path)?,
        };
        if !self.options.mute_pdf && list.entries().iter().any(|e| e.song == output) {
            return Err(LyrError::malformed(format!(
                "merged output '{output}' would overwrite the document of the same name"
            )));
        }

        let mut documents = Vec::with_capacity(list.entries().len());
        for entry in list.entries() {
            tracing::info!(song = %entry.song, "batch entry");
            let path = self.workspace.lyrics_path(&entry.song);
            let job = self.workspace.job(entry.song.clone(), entry.background.clone());
            documents.push(self.process_job(&path, job)?);
        }

        let artifacts: Vec<PathBuf> = documents
            .iter()
            .filter_map(|d| d.artifact.clone())
            .collect();
        let merged = if self.options.mute_pdf {
            None
        } else {
            let out_dir = self.workspace.out_dir.clone();
            let merged = RenderPipeline::new(&self.toolchain, &self.options, &mut self.runner)
                .merge(&artifacts, &out_dir, &output)?;
            Some(merged)
        };

        Ok(BatchOutcome { documents, merged })
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
