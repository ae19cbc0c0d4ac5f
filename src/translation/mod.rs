//! Placeholder translation between `PostgreSQL` (`$N`) and `SQLite` (`?N`) styles.

use std::borrow::Cow;

mod lexer;

use lexer::{Region, closes_dollar_quote, digits_end, dollar_quote_tag, starts_with_at};

/// Target placeholder style for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    fn marker(self) -> u8 {
        match self {
            PlaceholderStyle::Postgres => b'$',
            PlaceholderStyle::Sqlite => b'?',
        }
    }

    fn source_marker(self) -> u8 {
        match self {
            PlaceholderStyle::Postgres => b'?',
            PlaceholderStyle::Sqlite => b'$',
        }
    }
}

/// Rewrite numbered placeholders into `target` style.
///
/// Quoted strings, quoted identifiers, comments, and dollar-quoted bodies are left untouched.
/// Returns a borrowed `Cow` when nothing needed rewriting.
#[must_use]
pub fn translate_placeholders(sql: &str, target: PlaceholderStyle) -> Cow<'_, str> {
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut copied_to = 0;
    let mut region = Region::Code;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match region {
            Region::Code => {
                if b == b'\'' {
                    region = Region::SingleQuoted;
                } else if b == b'"' {
                    region = Region::DoubleQuoted;
                } else if starts_with_at(bytes, idx, b"--") {
                    region = Region::LineComment;
                    idx += 1;
                } else if starts_with_at(bytes, idx, b"/*") {
                    region = Region::BlockComment(1);
                    idx += 1;
                } else if b == b'$'
                    && let Some((tag, opener_end)) = dollar_quote_tag(bytes, idx)
                {
                    region = Region::DollarQuoted(tag);
                    idx = opener_end;
                } else if b == target.source_marker()
                    && let Some(end) = digits_end(bytes, idx + 1)
                {
                    let buf = out.get_or_insert_with(|| String::with_capacity(sql.len()));
                    buf.push_str(&sql[copied_to..idx]);
                    buf.push(char::from(target.marker()));
                    buf.push_str(&sql[idx + 1..end]);
                    copied_to = end;
                    idx = end;
                    continue;
                }
            }
            Region::SingleQuoted | Region::DoubleQuoted => {
                let quote = if region == Region::SingleQuoted { b'\'' } else { b'"' };
                if b == quote {
                    if bytes.get(idx + 1) == Some(&quote) {
                        idx += 1; // doubled quote is an escape
                    } else {
                        region = Region::Code;
                    }
                }
            }
            Region::LineComment => {
                if b == b'\n' {
                    region = Region::Code;
                }
            }
            Region::BlockComment(depth) => {
                if starts_with_at(bytes, idx, b"/*") {
                    region = Region::BlockComment(depth + 1);
                    idx += 1;
                } else if starts_with_at(bytes, idx, b"*/") {
                    region = if depth == 1 {
                        Region::Code
                    } else {
                        Region::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
            Region::DollarQuoted(ref tag) => {
                if closes_dollar_quote(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    region = Region::Code;
                }
            }
        }
        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied_to..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}
