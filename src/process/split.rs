// src/process/split.rs
//
// Low-level line splitting: comment stripping, plain delimiter columns and
// brace-quoted script columns. Field slices borrow from the input line.

const COMMENT: &str = "//";

/// Strip the line terminator and any `//` comment that is not inside braces.
///
/// Returns `None` for lines that carry no record at all (full-line comments,
/// empty or whitespace-only lines).
pub fn strip_line(raw: &str) -> Option<&str> {
    let line = raw.trim_end_matches(['\n', '\r']).trim_start();
    if line.starts_with(COMMENT) {
        return None;
    }

    let mut depth: usize = 0;
    let bytes = line.as_bytes();
    let mut end = line.len();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b'/' if depth == 0 && bytes.get(i + 1) == Some(&b'/') => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let line = &line[..end];
    if line.trim().is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Split every column on `delim`.
pub fn split_plain(line: &str, delim: char) -> Vec<&str> {
    line.split(delim).collect()
}

/// Outcome of splitting a line that ends in script columns.
#[derive(Debug, PartialEq, Eq)]
pub enum ScriptSplit<'a> {
    Fields(Vec<&'a str>),
    /// Fewer than `prefix` delimiters before the scripts; carries what was found.
    Insufficient(Vec<&'a str>),
    /// The script column at this index is missing its `{` or `},`.
    InvalidScript(Vec<&'a str>, usize),
    /// The terminal script column has unbalanced braces.
    Unbalanced(Vec<&'a str>),
}

/// Split `prefix` plain columns followed by `scripts` brace-quoted columns.
///
/// Every script but the last ends at the first `},`; the last one ends at its
/// final `}` once its braces balance. Script fields hold the text between the
/// braces, delimiters included.
pub fn split_scripts(line: &str, delim: char, prefix: usize, scripts: usize) -> ScriptSplit<'_> {
    let mut fields = Vec::with_capacity(prefix + scripts);
    let mut rest = line;

    for _ in 0..prefix {
        match rest.find(delim) {
            Some(i) => {
                fields.push(&rest[..i]);
                rest = &rest[i + delim.len_utf8()..];
            }
            None => {
                fields.push(rest);
                return ScriptSplit::Insufficient(fields);
            }
        }
    }

    for n in 0..scripts {
        let column = prefix + n;
        if !rest.starts_with('{') {
            return ScriptSplit::InvalidScript(fields, column);
        }

        if n + 1 < scripts {
            match rest[1..].find("},") {
                Some(i) => {
                    fields.push(&rest[1..1 + i]);
                    rest = &rest[1 + i + 2..];
                }
                None => return ScriptSplit::InvalidScript(fields, column),
            }
            continue;
        }

        let opened = rest.matches('{').count();
        let closed = rest.matches('}').count();
        if opened != closed {
            return ScriptSplit::Unbalanced(fields);
        }
        // balanced counts with a leading '{' guarantee at least one '}'
        match rest.rfind('}') {
            Some(close) => fields.push(&rest[1..close]),
            None => return ScriptSplit::Unbalanced(fields),
        }
    }

    ScriptSplit::Fields(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_handles_comments() {
        assert_eq!(strip_line("// header\n"), None);
        assert_eq!(strip_line("   // indented header"), None);
        assert_eq!(strip_line("   \r\n"), None);
        assert_eq!(strip_line(""), None);
        assert_eq!(strip_line("1,2,3 // trailing\r\n"), Some("1,2,3 "));
        assert_eq!(strip_line("  1,2\n"), Some("1,2"));
    }

    #[test]
    fn strip_line_keeps_comment_marker_inside_braces() {
        assert_eq!(
            strip_line("501,{ mes \"http://x\"; },{} // note"),
            Some("501,{ mes \"http://x\"; },{} ")
        );
    }

    #[test]
    fn split_scripts_keeps_embedded_delimiters() {
        let line = "1,a,b,{ x,y; },{ z; }";
        assert_eq!(
            split_scripts(line, ',', 3, 2),
            ScriptSplit::Fields(vec!["1", "a", "b", " x,y; ", " z; "])
        );
    }

    #[test]
    fn split_scripts_terminal_with_nested_braces() {
        let line = "1,{},{ if (a) { b; } }  ";
        assert_eq!(
            split_scripts(line, ',', 1, 2),
            ScriptSplit::Fields(vec!["1", "", " if (a) { b; } "])
        );
    }

    #[test]
    fn split_scripts_reports_problems() {
        assert_eq!(
            split_scripts("1,2", ',', 3, 1),
            ScriptSplit::Insufficient(vec!["1", "2"])
        );
        assert_eq!(
            split_scripts("1,2,x", ',', 2, 1),
            ScriptSplit::InvalidScript(vec!["1", "2"], 2)
        );
        assert_eq!(
            split_scripts("1,{ a; ,{}", ',', 1, 2),
            ScriptSplit::InvalidScript(vec!["1"], 1)
        );
        assert_eq!(
            split_scripts("1,{ a; ", ',', 1, 1),
            ScriptSplit::Unbalanced(vec!["1"])
        );
    }
}
