//! Path grammar.
//!
//! ```text
//! path    := ""  |  segment ( "." key | index )*
//! segment := key | index
//! index   := "[" digit+ "]"
//! key     := ( char | "\" any )+
//! ```
//!
//! Rules enforced on top of the grammar:
//!
//! - a `.` may not start or end the path, must be preceded by an
//!   alphanumeric character or `]`, and must be followed by an alphanumeric
//!   character (an escaped character counts as alphanumeric on both sides);
//! - a `[` may not directly follow a `.`;
//! - after an index only `.`, `[` or the end of input may follow;
//! - a `\` must be followed by a character; `\.`, `\[`, `\]` and `\\` encode
//!   the literal character, and any other escaped character stands for
//!   itself.

use crate::element::PathElement;
use crate::error::{PathError, Result};

/// What the parser consumed immediately before the current position.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    KeyChar { alnum: bool },
    Escaped,
    Dot,
    Index,
}

impl Prev {
    fn may_precede_dot(self) -> bool {
        matches!(
            self,
            Prev::KeyChar { alnum: true } | Prev::Escaped | Prev::Index
        )
    }
}

/// Parse the canonical textual form into path elements.
pub fn parse(input: &str) -> Result<Vec<PathElement>> {
    let chars: Vec<char> = input.chars().collect();
    let malformed = |position: usize, reason: &'static str| PathError::Malformed {
        input: input.to_string(),
        position,
        reason,
    };

    let mut elements = Vec::new();
    let mut key = String::new();
    let mut in_key = false;
    let mut prev = Prev::Start;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = *chars
                    .get(i + 1)
                    .ok_or_else(|| malformed(i, "trailing escape character"))?;
                key.push(escaped);
                in_key = true;
                prev = Prev::Escaped;
                i += 2;
            }
            '.' => {
                if prev == Prev::Start {
                    return Err(malformed(i, "path may not start with '.'"));
                }
                if i + 1 == chars.len() {
                    return Err(malformed(i, "path may not end with '.'"));
                }
                if !prev.may_precede_dot() {
                    return Err(malformed(i, "'.' must follow an alphanumeric character or ']'"));
                }
                let next = chars[i + 1];
                if !(next.is_alphanumeric() || next == '\\') {
                    return Err(malformed(i + 1, "'.' must be followed by an alphanumeric character"));
                }
                if in_key {
                    elements.push(PathElement::Key(std::mem::take(&mut key)));
                    in_key = false;
                }
                prev = Prev::Dot;
                i += 1;
            }
            '[' => {
                if prev == Prev::Dot {
                    return Err(malformed(i, "'[' may not follow '.'"));
                }
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == ']')
                    .map(|offset| i + 1 + offset)
                    .ok_or_else(|| malformed(i, "unterminated '['"))?;
                let digits = &chars[i + 1..close];
                if digits.is_empty() {
                    return Err(malformed(i + 1, "empty index"));
                }
                if !digits.iter().all(char::is_ascii_digit) {
                    return Err(malformed(i + 1, "index must contain only digits"));
                }
                let index = digits
                    .iter()
                    .collect::<String>()
                    .parse::<usize>()
                    .map_err(|_| malformed(i + 1, "index out of range"))?;
                if in_key {
                    elements.push(PathElement::Key(std::mem::take(&mut key)));
                    in_key = false;
                }
                elements.push(PathElement::Index(index));
                prev = Prev::Index;
                i = close + 1;
            }
            ']' => return Err(malformed(i, "unbalanced ']'")),
            ch => {
                if prev == Prev::Index {
                    return Err(malformed(i, "expected '.' or '[' after index"));
                }
                key.push(ch);
                in_key = true;
                prev = Prev::KeyChar {
                    alnum: ch.is_alphanumeric(),
                };
                i += 1;
            }
        }
    }

    if in_key {
        elements.push(PathElement::Key(key));
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;

    fn key(k: &str) -> PathElement {
        PathElement::Key(k.into())
    }

    fn assert_malformed(input: &str) {
        match parse(input) {
            Err(PathError::Malformed { .. }) => {}
            other => panic!("expected Malformed for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn empty_string_is_root() {
        assert_eq!(parse("").unwrap(), Vec::<PathElement>::new());
    }

    #[test]
    fn simple_keys() {
        assert_eq!(parse("a").unwrap(), vec![key("a")]);
        assert_eq!(parse("a.b.c").unwrap(), vec![key("a"), key("b"), key("c")]);
    }

    #[test]
    fn indices() {
        assert_eq!(
            parse("a[1][22].b").unwrap(),
            vec![key("a"), PathElement::Index(1), PathElement::Index(22), key("b")]
        );
        assert_eq!(parse("[0]").unwrap(), vec![PathElement::Index(0)]);
        assert_eq!(parse("[0].x").unwrap(), vec![PathElement::Index(0), key("x")]);
    }

    #[test]
    fn escapes() {
        assert_eq!(parse(r"a\.b").unwrap(), vec![key("a.b")]);
        assert_eq!(parse(r"\[0\]").unwrap(), vec![key("[0]")]);
        assert_eq!(parse(r"a\\b").unwrap(), vec![key(r"a\b")]);
        assert_eq!(parse(r"\q").unwrap(), vec![key("q")]);
        assert_eq!(parse(r"x.\.y").unwrap(), vec![key("x"), key(".y")]);
        assert_eq!(parse(r"a\..b").unwrap(), vec![key("a."), key("b")]);
    }

    #[test]
    fn unicode_keys() {
        assert_eq!(parse("größe.wert").unwrap(), vec![key("größe"), key("wert")]);
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_malformed(".");
        assert_malformed(".a");
        assert_malformed("a.");
        assert_malformed("a..b");
        assert_malformed("a[");
        assert_malformed("a[]");
        assert_malformed("a[1e3]");
        assert_malformed("a[-1]");
        assert_malformed("a.[1]");
        assert_malformed("a\\");
        assert_malformed("a]");
        assert_malformed("a[1]b");
        assert_malformed("a_.b");
        assert_malformed("a._b");
    }

    #[test]
    fn malformed_reports_position() {
        let err = parse("ab..c").unwrap_err();
        let PathError::Malformed { position, .. } = err;
        assert_eq!(position, 3);
    }

    #[test]
    fn canonical_strings_round_trip() {
        for s in ["", "a", "a.b", "a[0]", "[3].x[4]", r"a\.b.c", r"k\[1\]", "items.0", r"a\\b"] {
            let path = Path::parse(s).unwrap();
            assert_eq!(path.to_string(), s, "round trip of {s:?}");
        }
    }
}
