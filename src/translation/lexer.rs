/// Lexical regions the translator tracks while walking a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Region {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

/// Returns the end (exclusive) of a run of ASCII digits starting at `start`, if any.
pub(super) fn digits_end(bytes: &[u8], start: usize) -> Option<usize> {
    let len = bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (len > 0).then_some(start + len)
}

pub(super) fn starts_with_at(bytes: &[u8], idx: usize, pat: &[u8]) -> bool {
    bytes.get(idx..idx + pat.len()) == Some(pat)
}

/// Recognize a dollar-quote opener (`$$` or `$tag$`) at `start`.
///
/// Returns the tag and the index of the closing `$` of the opener.
pub(super) fn dollar_quote_tag(bytes: &[u8], start: usize) -> Option<(String, usize)> {
    let rest = bytes.get(start + 1..)?;
    let tag_len = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if rest.get(tag_len) != Some(&b'$') {
        return None;
    }
    let tag = &rest[..tag_len];
    // `$1$` is not a tag; a tag may not start with a digit.
    if tag.first().is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let tag = String::from_utf8(tag.to_vec()).ok()?;
    Some((tag, start + 1 + tag_len))
}

/// True when a `$tag$` closer for `tag` starts at `idx`.
pub(super) fn closes_dollar_quote(bytes: &[u8], idx: usize, tag: &str) -> bool {
    bytes.get(idx) == Some(&b'$')
        && starts_with_at(bytes, idx + 1, tag.as_bytes())
        && bytes.get(idx + 1 + tag.len()) == Some(&b'$')
}
