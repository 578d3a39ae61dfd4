use crate::foundation::error::{LyrError, LyrResult};
use crate::foundation::options::Options;
use crate::layout::packer::Frame;
use crate::lyrics::document::LyricsDocument;
use crate::markup::annotate::annotate_block;
use crate::markup::syntax::MarkupSyntax;
use anyhow::Context as _;
use std::path::Path;

/// Line-oriented template holding the two substitution markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wrap template text as-is.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template from disk.
    pub fn from_path(path: impl AsRef<Path>) -> LyrResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("read template '{}'", path.display()))?;
        Ok(Self::new(source))
    }

    /// Lines including their terminators, so passthrough is byte-exact.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.split_inclusive('\n')
    }

    /// Raw template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Generated markup source, ready for the typesetter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupDocument(String);

impl MarkupDocument {
    /// Borrow the markup text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the markup text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Write the markup to `path`, replacing any previous file.
    pub fn write_to(&self, path: &Path) -> LyrResult<()> {
        std::fs::write(path, &self.0)
            .with_context(|| format!("write markup '{}'", path.display()))?;
        Ok(())
    }
}

/// Streams a template, substituting the font size and lyrics body markers.
#[derive(Clone, Copy, Debug)]
pub struct MarkupGenerator<'a> {
    syntax: &'a MarkupSyntax,
    options: &'a Options,
}

impl<'a> MarkupGenerator<'a> {
    /// Generator emitting `syntax` fragments under the run `options`.
    pub fn new(syntax: &'a MarkupSyntax, options: &'a Options) -> Self {
        Self { syntax, options }
    }

    /// Build the markup document for packed `frames` of `lyrics`.
    ///
    /// `background_override` replaces the document's own image. Lines without a marker are
    /// copied unchanged.
    pub fn generate(
        &self,
        template: &Template,
        frames: &[Frame],
        lyrics: &LyricsDocument,
        background_override: Option<&str>,
    ) -> LyrResult<MarkupDocument> {
        let syntax = self.syntax;
        let mut seen_font_marker = false;
        let mut seen_text_marker = false;
        let mut out = String::with_capacity(template.as_str().len() * 2);

        for line in template.lines() {
            if line.contains(syntax.font_size_marker) {
                seen_font_marker = true;
                out.push_str(syntax.font_size_open);
                out.push_str(&lyrics.font_size().to_string());
                out.push_str(syntax.font_size_close);
            } else if line.contains(syntax.text_marker) {
                seen_text_marker = true;
                self.push_body(&mut out, frames, lyrics, background_override)?;
            } else {
                out.push_str(line);
            }
        }

        if !seen_font_marker {
            tracing::warn!(marker = syntax.font_size_marker, "template has no font size marker");
        }
        if !seen_text_marker {
            tracing::warn!(marker = syntax.text_marker, "template has no lyrics marker");
        }
        Ok(MarkupDocument(out))
    }

    fn push_body(
        &self,
        out: &mut String,
        frames: &[Frame],
        lyrics: &LyricsDocument,
        background_override: Option<&str>,
    ) -> LyrResult<()> {
        let syntax = self.syntax;
        let background = if self.options.draft {
            None
        } else {
            let bg = background_override.or(lyrics.image());
            if bg.is_none() {
                tracing::warn!("no background image given; emitting frames without one");
            }
            bg
        };

        if let Some(bg) = background {
            out.push_str(syntax.background_open);
            out.push_str(bg);
            out.push_str(syntax.background_mid);
        }

        for frame in frames {
            out.push_str(syntax.frame_open);
            out.push_str(syntax.format_font);
            for name in frame.blocks() {
                let rows = lyrics.rows(name).ok_or_else(|| {
                    LyrError::malformed(format!("frame references unknown block '{name}'"))
                })?;
                out.push_str(syntax.block_open);
                out.push_str(syntax.centering);
                out.push_str(syntax.canvas_open);
                annotate_block(out, syntax, rows, self.options);
                out.push_str(syntax.canvas_close);
                out.push_str(syntax.block_close);
            }
            out.push_str(syntax.frame_close);
        }

        if background.is_some() {
            out.push_str(syntax.background_close);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/generate.rs"]
mod tests;
