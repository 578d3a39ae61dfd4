/// Literal markup fragments emitted by the generator.
///
/// Built once at startup and passed by reference; [`MarkupSyntax::beamer`] is the LaTeX beamer
/// table the bundled template expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupSyntax {
    /// Template marker replaced by the font size directive.
    pub font_size_marker: &'static str,
    /// Template marker replaced by the lyrics body.
    pub text_marker: &'static str,

    /// Font size directive, written around the declared size.
    pub font_size_open: &'static str,
    /// Closes the font size directive; no line break follows.
    pub font_size_close: &'static str,

    /// Opens the background group, up to the image file name.
    pub background_open: &'static str,
    /// Follows the image file name.
    pub background_mid: &'static str,
    /// Closes the background group after the last frame.
    pub background_close: &'static str,

    /// Slide start.
    pub frame_open: &'static str,
    /// Slide end.
    pub frame_close: &'static str,
    /// Block start.
    pub block_open: &'static str,
    /// Block end.
    pub block_close: &'static str,
    /// Drawing canvas start.
    pub canvas_open: &'static str,
    /// Drawing canvas end.
    pub canvas_close: &'static str,
    /// Centers the block content.
    pub centering: &'static str,
    /// Applies the deck font, once per frame.
    pub format_font: &'static str,

    /// Row effect: `open ROW index_sep K quality_sep Q close`.
    pub row_open: &'static str,
    /// Between the row text and its index from the block end.
    pub row_index_sep: &'static str,
    /// Between the index and the quality flag.
    pub row_quality_sep: &'static str,
    /// Ends a row, including its line break.
    pub row_close: &'static str,
}

impl MarkupSyntax {
    /// Beamer + TikZ fragments with the `\blurry` row effect.
    pub const fn beamer() -> Self {
        Self {
            font_size_marker: "%lyr_font_size",
            text_marker: "%lyr_text",

            font_size_open: "\\def\\fsize{",
            font_size_close: "}",

            background_open: "{\n\\usebackgroundtemplate{\\includegraphics[height=\\paperwidth]{../images/",
            background_mid: "}}\n",
            background_close: "}\n",

            frame_open: "\\begin{frame}{}\n",
            frame_close: "\\end{frame}\n",
            block_open: "\\begin{block}{}\n",
            block_close: "\\end{block}\n",
            canvas_open: "\\begin{tikzpicture}\n",
            canvas_close: "\\end{tikzpicture}\n",
            centering: "\\centering\n",
            format_font: "\\formatfont\n",

            row_open: "\\blurry{",
            row_index_sep: "}{\\rowh*",
            row_quality_sep: "}{",
            row_close: "}\n",
        }
    }
}

impl Default for MarkupSyntax {
    fn default() -> Self {
        Self::beamer()
    }
}
