use super::*;
use crate::layout::packer::pack_document;

const TEMPLATE: &str = "\\documentclass{beamer}\n%lyr_font_size\n\\begin{document}\n%lyr_text\n\\end{document}\n";

fn lyrics() -> LyricsDocument {
    LyricsDocument::from_json_str(
        r#"{
            "font_size": 40,
            "image": "night.jpg",
            "order": ["A", "B"],
            "A": ["uno", "due", "tre"],
            "B": ["quattro", "cinque", "sei", "sette"]
        }"#,
    )
    .unwrap()
}

fn render(options: &Options, background_override: Option<&str>) -> String {
    let doc = lyrics();
    let frames = pack_document(&doc).unwrap();
    let syntax = MarkupSyntax::beamer();
    MarkupGenerator::new(&syntax, options)
        .generate(&Template::new(TEMPLATE), &frames, &doc, background_override)
        .unwrap()
        .into_string()
}

#[test]
fn full_document_matches_expected_markup() {
    let out = render(&Options::default(), None);
    let expected = concat!(
        "\\documentclass{beamer}\n",
        "\\def\\fsize{40}",
        "\\begin{document}\n",
        "{\n\\usebackgroundtemplate{\\includegraphics[height=\\paperwidth]{../images/night.jpg}}\n",
        "\\begin{frame}{}\n",
        "\\formatfont\n",
        "\\begin{block}{}\n",
        "\\centering\n",
        "\\begin{tikzpicture}\n",
        "\\blurry{UNO}{\\rowh*2}{1}\n",
        "\\blurry{DUE}{\\rowh*1}{1}\n",
        "\\blurry{TRE}{\\rowh*0}{1}\n",
        "\\end{tikzpicture}\n",
        "\\end{block}\n",
        "\\end{frame}\n",
        "\\begin{frame}{}\n",
        "\\formatfont\n",
        "\\begin{block}{}\n",
        "\\centering\n",
        "\\begin{tikzpicture}\n",
        "\\blurry{QUATTRO}{\\rowh*3}{1}\n",
        "\\blurry{CINQUE}{\\rowh*2}{1}\n",
        "\\blurry{SEI}{\\rowh*1}{1}\n",
        "\\blurry{SETTE}{\\rowh*0}{1}\n",
        "\\end{tikzpicture}\n",
        "\\end{block}\n",
        "\\end{frame}\n",
        "}\n",
        "\\end{document}\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn draft_mode_drops_background_and_lowers_quality() {
    let options = Options {
        draft: true,
        ..Options::default()
    };
    let out = render(&options, Some("override.jpg"));
    assert!(!out.contains("usebackgroundtemplate"));
    assert!(out.contains("\\end{frame}\n\\end{document}\n"));
    assert!(out.lines().filter(|l| l.starts_with("\\blurry")).all(|l| l.ends_with("{0}")));
}

#[test]
fn background_override_wins_over_document_image() {
    let out = render(&Options::default(), Some("override.jpg"));
    assert!(out.contains("{../images/override.jpg}}"));
    assert!(!out.contains("night.jpg"));
}

#[test]
fn missing_background_omits_the_wrapper() {
    let doc = LyricsDocument::from_json_str(r#"{"font_size": 40, "order": ["A"], "A": ["x"]}"#)
        .unwrap();
    let frames = pack_document(&doc).unwrap();
    let syntax = MarkupSyntax::beamer();
    let options = Options::default();
    let out = MarkupGenerator::new(&syntax, &options)
        .generate(&Template::new("%lyr_text\n"), &frames, &doc, None)
        .unwrap();
    assert!(out.as_str().starts_with("\\begin{frame}{}\n"));
    assert!(out.as_str().ends_with("\\end{frame}\n"));
}

#[test]
fn unlocked_caps_keep_rows_verbatim() {
    let options = Options {
        unlock_caps: true,
        ..Options::default()
    };
    let out = render(&options, None);
    assert!(out.contains("\\blurry{quattro}{\\rowh*3}{1}\n"));
}

#[test]
fn passthrough_lines_are_byte_identical() {
    let doc = lyrics();
    let syntax = MarkupSyntax::beamer();
    let options = Options::default();
    let template = Template::new("% comment\r\n\\usepackage{tikz}\nno trailing newline");
    let out = MarkupGenerator::new(&syntax, &options)
        .generate(&template, &[], &doc, None)
        .unwrap();
    assert_eq!(out.as_str(), template.as_str());
}

#[test]
fn unknown_block_in_frame_is_rejected() {
    let doc = lyrics();
    let other = LyricsDocument::from_json_str(r#"{"font_size": 40, "order": ["Z"], "Z": ["x"]}"#)
        .unwrap();
    let frames = pack_document(&other).unwrap();
    let syntax = MarkupSyntax::beamer();
    let options = Options::default();
    let err = MarkupGenerator::new(&syntax, &options)
        .generate(&Template::new("%lyr_text\n"), &frames, &doc, None)
        .unwrap_err();
    assert!(err.to_string().contains("'Z'"));
}
