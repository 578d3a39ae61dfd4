//! Input documents: lyrics and batch lists.

/// Batch list loader.
pub mod batch;
/// Lyrics document model and loader.
pub mod document;
