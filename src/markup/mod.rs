//! Markup generation: literal fragment table, row effects and template substitution.

/// Per-row capitalization and effect directive.
pub mod annotate;
/// Template walker producing the markup document.
pub mod generate;
/// Literal markup fragments.
pub mod syntax;
