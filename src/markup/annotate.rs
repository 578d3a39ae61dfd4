use crate::foundation::options::Options;
use crate::markup::syntax::MarkupSyntax;

/// Wrap one row in the receding-highlight effect directive.
///
/// `index_from_end` is 0 for the last row of a block and grows towards its first row. Unless
/// `unlock_caps` is set the row is uppercased; otherwise it is emitted byte for byte. The quality
/// flag is `0` in draft mode and `1` otherwise.
pub fn annotate(
    syntax: &MarkupSyntax,
    row: &str,
    index_from_end: usize,
    unlock_caps: bool,
    draft: bool,
) -> String {
    let mut out = String::new();
    push_annotated(&mut out, syntax, row, index_from_end, unlock_caps, draft);
    out
}

/// Append every row of a block, annotated, in row order.
pub fn annotate_block(out: &mut String, syntax: &MarkupSyntax, rows: &[String], options: &Options) {
    let n = rows.len();
    for (i, row) in rows.iter().enumerate() {
        push_annotated(out, syntax, row, n - i - 1, options.unlock_caps, options.draft);
    }
}

fn push_annotated(
    out: &mut String,
    syntax: &MarkupSyntax,
    row: &str,
    index_from_end: usize,
    unlock_caps: bool,
    draft: bool,
) {
    out.push_str(syntax.row_open);
    if unlock_caps {
        out.push_str(row);
    } else {
        out.push_str(&row.to_uppercase());
    }
    out.push_str(syntax.row_index_sep);
    out.push_str(&index_from_end.to_string());
    out.push_str(syntax.row_quality_sep);
    out.push(if draft { '0' } else { '1' });
    out.push_str(syntax.row_close);
}

#[cfg(test)]
#[path = "../../tests/unit/markup/annotate.rs"]
mod tests;
