use anyhow::Result;
use regex::Regex;

/// Digits, an optional dash, digits. The dash is often lost or misread
/// by OCR, so "21" is accepted as well as "2-1".
const ROUND_PATTERN: &str = r"\d+[-\u{2013}\u{2014}]?\d+";

/// Stages on which an augment choice is offered, in both the hyphenated
/// and the dash-dropped form.
pub const AUGMENT_ROUNDS: [&str; 6] = ["2-1", "3-2", "4-2", "21", "32", "42"];

/// Cleans an OCR read of an augment name before it is matched.
///
/// Drops every character that is not a word character, whitespace or a
/// parenthesis, then removes parenthesized spans such as "(Legend)",
/// trims, and removes embedded newlines.
pub fn canonicalize(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace() || c == '(' || c == ')')
        .collect();

    remove_parenthesized(&filtered).trim().replace('\n', "")
}

/// Removes each "(...)" span, from an opening paren through the next
/// closing one. An opening paren with no closing paren after it is kept.
fn remove_parenthesized(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                output.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    output.push_str(rest);
    output
}

/// Removes the "(Legend)" marker the stats site appends to some names.
pub fn strip_legend_marker(name: &str) -> String {
    name.replace("(Legend)", "").trim().to_string()
}

/// Finds the first round label ("2-1", "42", ...) in an OCR read of the
/// stage indicator. En and em dashes are normalized to '-'.
pub fn find_round_label(text: &str) -> Result<Option<String>> {
    let round_regex = Regex::new(ROUND_PATTERN)?;
    let cleaned = text.trim().replace('\n', "");

    Ok(round_regex
        .find(&cleaned)
        .map(|m| m.as_str().replace(['\u{2013}', '\u{2014}'], "-")))
}

/// Returns true if `label` is a stage with an augment choice.
pub fn is_augment_round_label(label: &str) -> bool {
    AUGMENT_ROUNDS.contains(&label)
}
