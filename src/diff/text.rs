//! Newline normalization and line splitting shared by the aligner and the
//! plain formatter.

/// Replace every `\r\n` pair with `\n` in a single pass. Lone `\r`
/// characters are kept, so `\r\r\n` becomes `\r\n` rather than `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Split text into lines, dropping the single empty element produced by a
/// trailing line terminator.
///
/// Interior empty lines are preserved, and the empty string yields no lines.
pub fn split_lines_no_trailing_empty(text: &str) -> Vec<String> {
    let normalized = normalize_newlines(text);
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize_newlines("a\r\nb"), "a\nb");
        assert_eq!(normalize_newlines("a\r\n\r\nb\r\n"), "a\n\nb\n");
    }

    #[test]
    fn test_normalize_leaves_lone_cr() {
        assert_eq!(normalize_newlines("a\rb"), "a\rb");
        assert_eq!(normalize_newlines("a\r\r\nb"), "a\r\nb");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["", "plain", "a\r\nb\r\n", "a\rb\r", "\r\n\r\n"] {
            let once = normalize_newlines(input);
            assert_eq!(normalize_newlines(&once), once);
        }
    }

    #[test]
    fn test_normalize_is_single_pass() {
        let once = normalize_newlines("x\r\r\n\ny");
        assert_eq!(once, "x\r\n\ny");
        assert_eq!(normalize_newlines(&once), "x\n\ny");
    }

    #[test]
    fn test_split_keeps_lone_cr_in_line() {
        assert_eq!(split_lines_no_trailing_empty("a\rb\nc\r"), vec!["a\rb", "c\r"]);
    }

    #[test]
    fn test_split_drops_trailing_empty() {
        assert_eq!(split_lines_no_trailing_empty("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines_no_trailing_empty("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_lines_no_trailing_empty("").is_empty());
        assert_eq!(split_lines_no_trailing_empty("\n"), vec![""]);
    }

    #[test]
    fn test_split_keeps_interior_empty_lines() {
        assert_eq!(split_lines_no_trailing_empty("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines_no_trailing_empty("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_split_normalizes_first() {
        assert_eq!(split_lines_no_trailing_empty("a\r\nb\r\n"), vec!["a", "b"]);
    }
}
