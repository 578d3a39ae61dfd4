use super::*;

const NESSUN_DORMA: &str = r#"
{
  "font_size": 40,
  "image": "turandot.jpg",
  "order": ["intro", "coro"],
  "intro": ["Nessun dorma!", "Tu pure, o Principessa"],
  "coro": ["Dilegua, o notte!", "Tramontate, stelle!", "All'alba vincerò!"],
  "notes": "unused fields are ignored"
}
"#;

#[test]
fn parses_blocks_in_declared_order() {
    let doc = LyricsDocument::from_json_str(NESSUN_DORMA).unwrap();
    assert_eq!(doc.font_size(), 40);
    assert_eq!(doc.image(), Some("turandot.jpg"));
    assert_eq!(doc.order(), ["intro", "coro"]);

    let names: Vec<&str> = doc.blocks().map(|b| b.name).collect();
    assert_eq!(names, ["intro", "coro"]);
    assert_eq!(doc.rows("coro").unwrap().len(), 3);
    assert_eq!(doc.block_lengths()["intro"], 2);
}

#[test]
fn accepts_quoted_font_size_and_missing_image() {
    let doc =
        LyricsDocument::from_json_str(r#"{"font_size": " 25 ", "order": ["a"], "a": ["x"]}"#)
            .unwrap();
    assert_eq!(doc.font_size(), 25);
    assert_eq!(doc.image(), None);
}

#[test]
fn accepts_integral_float_font_size() {
    let doc =
        LyricsDocument::from_json_str(r#"{"font_size": 40.0, "order": ["a"], "a": ["x"]}"#)
            .unwrap();
    assert_eq!(doc.font_size(), 40);

    let doc =
        LyricsDocument::from_json_str(r#"{"font_size": "30.0", "order": ["a"], "a": ["x"]}"#)
            .unwrap();
    assert_eq!(doc.font_size(), 30);
}

#[test]
fn rejects_non_integral_font_size() {
    for size in ["40.5", "\"large\"", "-3", "true", "null"] {
        let json = format!(r#"{{"font_size": {size}, "order": []}}"#);
        let err = LyricsDocument::from_json_str(&json).unwrap_err();
        assert!(
            err.to_string()
                .contains("font_size must be a positive integer"),
            "{size}: {err}"
        );
    }
}

#[test]
fn rejects_zero_font_size() {
    let err = LyricsDocument::from_json_str(r#"{"font_size": 0, "order": []}"#).unwrap_err();
    assert!(matches!(err, LyrError::MalformedInput(_)));
}

#[test]
fn rejects_undefined_block() {
    let err = LyricsDocument::from_json_str(r#"{"font_size": 40, "order": ["verse"]}"#)
        .unwrap_err();
    assert!(matches!(err, LyrError::MalformedInput(_)));
    assert!(err.to_string().contains("'verse'"));
}

#[test]
fn rejects_block_that_is_not_a_row_list() {
    let err = LyricsDocument::from_json_str(
        r#"{"font_size": 40, "order": ["verse"], "verse": "one line"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("block 'verse' must be an array of strings"));
}

#[test]
fn rejects_duplicate_order_entries() {
    let err = LyricsDocument::from_json_str(
        r#"{"font_size": 40, "order": ["a", "a"], "a": ["x"]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn rejects_missing_required_fields() {
    let err = LyricsDocument::from_json_str(r#"{"order": []}"#).unwrap_err();
    assert!(err.to_string().starts_with("malformed input: syntax error"));

    let err = LyricsDocument::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, LyrError::MalformedInput(_)));
}

#[test]
fn from_path_prefixes_errors_with_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"font_size": "big", "order": []}"#).unwrap();

    let err = LyricsDocument::from_path(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken.json"));
    assert!(msg.contains("'big'"));

    let missing = LyricsDocument::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, LyrError::MalformedInput(_)));
}
