//! Cursor context detection over raw query text.
//!
//! These scans only look at identifier characters, brackets, quotes and
//! comments. They do not tokenize the query.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Identifier directly before an opening parenthesis.
static CALLEE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*$").unwrap());

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// The partial identifier that ends at `offset`.
pub(crate) fn prefix_at(source: &str, offset: usize) -> &str {
    let before = &source[..offset];
    let len = before.bytes().rev().take_while(|b| is_ident_byte(*b)).count();
    &before[before.len() - len..]
}

/// Byte span of the identifier touching `offset`, if any.
pub(crate) fn word_at(source: &str, offset: usize) -> Option<Range<usize>> {
    let bytes = source.as_bytes();
    let start = offset - bytes[..offset].iter().rev().take_while(|b| is_ident_byte(**b)).count();
    let end = offset + bytes[offset..].iter().take_while(|b| is_ident_byte(**b)).count();
    (start < end).then_some(start..end)
}

/// The function call whose argument list contains the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallContext<'a> {
    pub function: &'a str,
    /// Zero-based index of the argument under the cursor.
    pub argument: usize,
}

struct Open {
    bracket: u8,
    at: usize,
    commas: usize,
}

/// Brackets still open at the end of the scanned text.
struct Scan {
    open: Vec<Open>,
    /// The text ends inside a string literal or a `#` comment.
    in_literal: bool,
}

/// Walk `source[..offset]` tracking brackets and argument commas.
///
/// Commas inside label matchers, range brackets, strings and comments are not
/// argument separators.
fn scan(source: &str, offset: usize) -> Scan {
    let bytes = &source.as_bytes()[..offset];
    let mut open: Vec<Open> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' && quote != b'`' {
                        i += 1;
                    }
                    i += 1;
                }
                if i >= bytes.len() {
                    return Scan {
                        open,
                        in_literal: true,
                    };
                }
            }
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Scan {
                        open,
                        in_literal: true,
                    };
                }
            }
            bracket @ (b'(' | b'[' | b'{') => open.push(Open {
                bracket,
                at: i,
                commas: 0,
            }),
            b')' | b']' | b'}' => {
                open.pop();
            }
            b',' => {
                if let Some(top) = open.last_mut() {
                    top.commas += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    Scan {
        open,
        in_literal: false,
    }
}

/// Whether `offset` falls inside a quoted string or a `#` comment.
pub(crate) fn in_string_or_comment(source: &str, offset: usize) -> bool {
    scan(source, offset).in_literal
}

/// Find the innermost unclosed call before `offset`.
pub(crate) fn enclosing_call(source: &str, offset: usize) -> Option<CallContext<'_>> {
    let scan = scan(source, offset);
    let call = scan.open.iter().rev().find(|open| open.bracket == b'(')?;
    let function = CALLEE.captures(&source[..call.at])?.get(1)?.as_str();
    Some(CallContext {
        function,
        argument: call.commas,
    })
}
