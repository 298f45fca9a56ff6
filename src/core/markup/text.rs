//! JSX text normalization.
//!
//! JSX text is not rendered verbatim: React drops line breaks together with
//! the indentation around them and joins the remaining lines with a single
//! space. Hashing the cleaned text is what makes a translation key survive
//! re-indentation, while whitespace written inside one line still counts.

/// Clean a raw JSX text child the way React renders it.
///
/// Returns `None` when nothing visible remains.
///
/// # Examples
///
/// ```
/// use lexid::core::markup::text::clean_jsx_text;
///
/// assert_eq!(clean_jsx_text("Hello"), Some("Hello".to_string()));
/// assert_eq!(clean_jsx_text("\n    Hello\n    world\n  "), Some("Hello world".to_string()));
/// assert_eq!(clean_jsx_text("\n   \n"), None);
/// ```
pub fn clean_jsx_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();

    let last_non_empty = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);

    let last_index = lines.len() - 1;
    let mut out = String::new();

    for (i, line) in lines.iter().enumerate() {
        let mut trimmed: &str = line;
        let replaced;
        if trimmed.contains('\t') {
            replaced = trimmed.replace('\t', " ");
            trimmed = &replaced;
        }
        if i != 0 {
            trimmed = trimmed.trim_start_matches(' ');
        }
        if i != last_index {
            trimmed = trimmed.trim_end_matches(' ');
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        if i != last_non_empty {
            out.push(' ');
        }
    }

    if out.is_empty() { None } else { Some(out) }
}

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Used for opaque payloads whose textual form matters but whose layout
/// should not.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
