//! lyrdeck turns lyrics documents into beamer slide decks.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON file -> [`LyricsDocument`] (validated, immutable)
//! 2. **Pack**: blocks -> [`Frame`]s holding at most `200 / font_size` rows each
//! 3. **Generate**: template + frames -> [`MarkupDocument`] with per-row `\blurry` effects
//! 4. **Render** (optional): `pdflatex` twice, scratch cleanup, `convert`, and `pdfunite` for
//!    batches, all through a [`ProcessRunner`]
//!
//! Steps 1–3 are pure and deterministic; only step 4 touches external programs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame packing.
pub mod layout;
/// Lyrics documents and batch lists.
pub mod lyrics;
/// Markup generation.
pub mod markup;
/// External render pipeline.
pub mod render;
/// Document and batch orchestration.
pub mod session;

pub use crate::foundation::error::{LyrError, LyrResult};
pub use crate::foundation::options::Options;

pub use crate::layout::packer::{FRAME_ROW_BUDGET, Frame, pack, pack_document, rows_per_frame};
pub use crate::lyrics::batch::{BatchEntry, BatchList};
pub use crate::lyrics::document::{Block, BlockName, LyricsDocument};
pub use crate::markup::annotate::{annotate, annotate_block};
pub use crate::markup::generate::{MarkupDocument, MarkupGenerator, Template};
pub use crate::markup::syntax::MarkupSyntax;
pub use crate::render::job::{RenderJob, Workspace, document_id};
pub use crate::render::pipeline::{RenderPipeline, Toolchain, clean_scratch};
pub use crate::render::process::{
    Invocation, OutputCapture, ProcessRunner, RecordingRunner, RunStatus, SystemRunner,
    ToolCommand,
};
pub use crate::session::{BatchOutcome, DeckSession, DocumentOutcome};
