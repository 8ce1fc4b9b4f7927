//! Parsing of line-addressing page fragments.

/// Parse a `#L123`-style fragment into a zero-based line index.
///
/// The leading `#` is optional, and for a range such as `#L10-L20` the
/// first line wins. Anything else, including `#L0`, yields `None`.
pub fn parse_line_fragment(fragment: &str) -> Option<usize> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let rest = fragment.strip_prefix('L')?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(digits_end);
    if !(tail.is_empty() || tail.starts_with('-') || tail.starts_with('C')) {
        return None;
    }
    let line: usize = digits.parse().ok()?;
    line.checked_sub(1)
}
