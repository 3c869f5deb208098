//! A forward-only cursor over the lines of a buffered reader.

use std::io::{self, BufRead};

/// A single input line with its terminator preserved.
///
/// Lines are raw bytes so body content passes through whatever its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-indexed position of the line in the input.
    pub number: usize,
    /// The raw line, including any trailing `\n` or `\r\n`.
    pub text: Vec<u8>,
}

impl Line {
    /// A title line starts a new case. Detection is purely syntactic.
    pub fn is_title(&self) -> bool {
        self.text.first() == Some(&b'\'')
    }

    /// Returns the line without its trailing `\n` or `\r\n`.
    pub fn content(&self) -> &[u8] {
        let text = self.text.strip_suffix(b"\n").unwrap_or(&self.text);
        text.strip_suffix(b"\r").unwrap_or(text)
    }

    pub fn has_terminator(&self) -> bool {
        self.text.ends_with(b"\n")
    }
}

/// Reads lines one at a time, tracking line numbers for error reporting.
pub struct LineCursor<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    /// Returns the next line, or `None` once the input is exhausted.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        let mut text = Vec::new();
        if self.reader.read_until(b'\n', &mut text)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(Line {
            number: self.line_number,
            text,
        }))
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, LineCursor};
    use rstest::rstest;

    fn collect(input: &[u8]) -> Vec<Line> {
        let mut cursor = LineCursor::new(input);
        let mut lines = Vec::new();
        while let Some(line) = cursor.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    fn line(text: &str) -> Line {
        Line {
            number: 1,
            text: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut cursor = LineCursor::new(&b""[..]);
        assert!(cursor.next_line().unwrap().is_none());
        assert_eq!(cursor.line_number(), 0);
    }

    #[test]
    fn test_lines_keep_terminators_and_numbers() {
        let lines = collect(b"'A'\r\n3\n100");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, b"'A'\r\n");
        assert_eq!(lines[1].text, b"3\n");
        assert_eq!(lines[2].text, b"100");
        assert_eq!(
            lines.iter().map(|l| l.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(lines[1].has_terminator());
        assert!(!lines[2].has_terminator());
    }

    #[test]
    fn test_non_utf8_bytes_are_read_unchanged() {
        let lines = collect(b"caf\xe9 5\n\xff\xfe\n");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, b"caf\xe9 5\n");
        assert_eq!(lines[1].text, b"\xff\xfe\n");
    }

    #[test]
    fn test_cursor_stays_exhausted() {
        let mut cursor = LineCursor::new(&b"only\n"[..]);
        assert!(cursor.next_line().unwrap().is_some());
        assert!(cursor.next_line().unwrap().is_none());
        assert!(cursor.next_line().unwrap().is_none());
        assert_eq!(cursor.line_number(), 1);
    }

    #[rstest]
    #[case("'A'\n", "'A'")]
    #[case("'A'\r\n", "'A'")]
    #[case("'A'", "'A'")]
    #[case("\n", "")]
    fn test_content_strips_line_endings(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(line(text).content(), expected.as_bytes());
    }

    #[rstest]
    #[case("'case_42'\n", true)]
    #[case("'", true)]
    #[case(" 'indented'\n", false)]
    #[case("3\n", false)]
    #[case("\n", false)]
    fn test_title_detection_looks_at_first_character(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(line(text).is_title(), expected);
    }
}
