/// Positional placeholders found in a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderScan {
    /// Number of parameters the statement expects (`?` and `?N`)
    pub positional: usize,
    /// Whether `:name`, `@name`, or `$name` placeholders appear
    pub named: bool,
}

#[derive(Clone, Copy)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backticked,
    Bracketed,
    LineComment,
    BlockComment,
}

/// Scan SQLite placeholders outside literals, quoted identifiers, and comments.
///
/// A bare `?` takes the next index after the largest seen so far and `?N`
/// takes index `N`, so the expected parameter count is the largest index.
#[must_use]
pub fn scan_placeholders(sql: &str) -> PlaceholderScan {
    let bytes = sql.as_bytes();
    let mut scan = PlaceholderScan::default();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                b'[' => state = State::Bracketed,
                b'-' if bytes.get(idx + 1) == Some(&b'-') => state = State::LineComment,
                b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'?' => {
                    let (end, number) = scan_digits(bytes, idx + 1);
                    scan.positional = match number {
                        Some(n) => scan.positional.max(n),
                        None => scan.positional + 1,
                    };
                    idx = end - 1;
                }
                b':' | b'@' | b'$' if bytes.get(idx + 1).is_some_and(is_ident_start) => {
                    scan.named = true;
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Backticked => {
                if b == b'`' {
                    state = State::Normal;
                }
            }
            State::Bracketed => {
                if b == b']' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    scan
}

fn is_ident_start(b: &u8) -> bool {
    b.is_ascii_alphabetic() || *b == b'_'
}

fn scan_digits(bytes: &[u8], start: usize) -> (usize, Option<usize>) {
    let mut idx = start;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let number = std::str::from_utf8(&bytes[start..idx])
        .ok()
        .and_then(|digits| digits.parse().ok());
    (idx, number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bare_placeholders() {
        let scan = scan_placeholders("INSERT INTO t (a, b, c) VALUES (?, ?, ?)");
        assert_eq!(scan.positional, 3);
        assert!(!scan.named);
    }

    #[test]
    fn numbered_placeholders_use_the_largest_index() {
        assert_eq!(scan_placeholders("SELECT ?2, ?1, ?2").positional, 2);
        assert_eq!(scan_placeholders("SELECT ?3, ?").positional, 4);
    }

    #[test]
    fn skips_literals_identifiers_and_comments() {
        let sql = "SELECT '?', \"a?\", `b?`, [c?] -- ?\n/* ? */ FROM t WHERE x = ?";
        assert_eq!(scan_placeholders(sql).positional, 1);
    }

    #[test]
    fn detects_named_placeholders() {
        assert!(scan_placeholders("SELECT * FROM t WHERE id = :id").named);
        assert!(!scan_placeholders("SELECT '10:30' FROM t").named);
    }
}
