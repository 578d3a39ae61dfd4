//! Render pipeline: naming, external tool invocation and the typeset/clean/resize/merge stages.

/// Workspace layout and per-document naming.
pub mod job;
/// Typeset, clean, resize and merge stages.
pub mod pipeline;
/// Process runner capability and its implementations.
pub mod process;
