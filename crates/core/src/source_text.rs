use std::fmt::Display;

/// Line ending style detected when a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Full content of a build file as an ordered sequence of lines.
///
/// Parsing splits on `\n` and strips the `\r` of a `\r\n` break, remembering each break so
/// that `SourceText::parse(s).render() == s` holds for any input, mixed line endings included.
/// A trailing newline shows up as an empty last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
    /// `breaks[i]` separates `lines[i]` from `lines[i + 1]`
    breaks: Vec<LineEnding>,
    /// Prevailing ending, used for inserted lines
    ending: LineEnding,
}

impl Default for SourceText {
    fn default() -> Self {
        Self::parse("")
    }
}

impl SourceText {
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut pieces: Vec<&str> = content.split('\n').collect();
        let last = pieces.len() - 1;
        let mut breaks = Vec::with_capacity(last);
        for piece in &mut pieces[..last] {
            let current: &str = piece;
            if let Some(stripped) = current.strip_suffix('\r') {
                *piece = stripped;
                breaks.push(LineEnding::CrLf);
            } else {
                breaks.push(LineEnding::Lf);
            }
        }
        let crlf = breaks.iter().filter(|b| **b == LineEnding::CrLf).count();
        let ending = if crlf * 2 > breaks.len() {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        Self {
            lines: pieces.into_iter().map(ToString::to_string).collect(),
            breaks,
            ending,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            rendered.push_str(line);
            if let Some(ending) = self.breaks.get(index) {
                rendered.push_str(ending.as_str());
            }
        }
        rendered
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    #[must_use]
    pub const fn ending(&self) -> LineEnding {
        self.ending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// No content besides line breaks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Plain substring check over the whole text, used for idempotence guards.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Insert `payload` so that its first line ends up at `index`. New line breaks use the
    /// prevailing ending of the file.
    ///
    /// `index` may equal `len()`, which appends.
    pub fn insert_lines<I, S>(&mut self, index: usize, payload: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = index.min(self.lines.len());
        let before = self.lines.len();
        self.lines
            .splice(index..index, payload.into_iter().map(Into::into));
        let added = self.lines.len() - before;
        let at = index.min(self.breaks.len());
        self.breaks
            .splice(at..at, std::iter::repeat_n(self.ending, added));
    }

    pub fn replace_line(&mut self, index: usize, line: impl Into<String>) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line.into();
        }
    }

    /// Replace the whole content. Content without any `\r` takes over the prevailing ending of
    /// the replaced text.
    pub fn replace_all(&mut self, content: &str) {
        let ending = self.ending;
        *self = Self::parse(content);
        if ending == LineEnding::CrLf && !content.contains('\r') {
            self.ending = ending;
            self.breaks.fill(ending);
        }
    }
}

impl Display for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Inclusive 0-based line range occupied by a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_single_line(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lines {}-{}", self.start + 1, self.end + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("android {\n}\n")]
    #[case("android {\n}")]
    #[case("a\r\nb\r\n")]
    #[case("\n\n\n")]
    #[case("a\r\nb\nc\r\n")]
    #[case("a\rb\n\r")]
    fn test_parse_render_preserves_content(#[case] content: &str) {
        assert_eq!(SourceText::parse(content).render(), content);
    }

    #[test]
    fn test_crlf_detection_strips_carriage_returns() {
        let text = SourceText::parse("android {\r\n    foo()\r\n}\r\n");
        assert_eq!(text.ending(), LineEnding::CrLf);
        assert_eq!(text.line(1), Some("    foo()"));
        assert_eq!(text.len(), 4);
    }

    #[test]
    fn test_mixed_endings_split_every_line() {
        let text = SourceText::parse("apply plugin: 'a'\r\nandroid {\n    foo()\n}\n");
        assert_eq!(text.len(), 5);
        assert_eq!(text.line(0), Some("apply plugin: 'a'"));
        assert_eq!(text.line(1), Some("android {"));
        assert_eq!(text.ending(), LineEnding::Lf);
    }

    #[test]
    fn test_insert_lines_keeps_existing_breaks() {
        let mut text = SourceText::parse("a\r\nandroid {\n}\n");
        text.insert_lines(2, ["    namespace 'a.b'"]);
        assert_eq!(text.render(), "a\r\nandroid {\n    namespace 'a.b'\n}\n");
    }

    #[test]
    fn test_empty_text() {
        assert!(SourceText::parse("\n\n").is_empty());
        assert!(SourceText::default().is_empty());
        assert!(!SourceText::parse("a").is_empty());
    }

    #[test]
    fn test_insert_lines_uses_file_line_ending() {
        let mut text = SourceText::parse("android {\r\n}\r\n");
        text.insert_lines(1, ["    namespace 'a.b'"]);
        assert_eq!(text.render(), "android {\r\n    namespace 'a.b'\r\n}\r\n");
    }

    #[test]
    fn test_insert_lines_past_end_appends() {
        let mut text = SourceText::parse("a");
        text.insert_lines(10, ["b", "c"]);
        assert_eq!(text.render(), "a\nb\nc");
    }

    #[test]
    fn test_replace_all_keeps_crlf() {
        let mut text = SourceText::parse("a\r\nb\r\n");
        text.replace_all("x\ny\n");
        assert_eq!(text.render(), "x\r\ny\r\n");
    }

    #[test]
    fn test_contains() {
        let text = SourceText::parse("android {\n    kotlinOptions {\n    }\n}\n");
        assert!(text.contains("kotlinOptions"));
        assert!(!text.contains("namespace"));
    }

    #[test]
    fn test_span_display_is_one_based() {
        let span = Span::new(0, 4);
        assert_eq!(span.to_string(), "lines 1-5");
        assert!(!span.is_single_line());
    }
}
