//! Minimal Groovy lexer that tells structural braces apart from braces inside strings and
//! comments.
//!
//! It does not tokenize identifiers or operators: the only output per line is the ordered list
//! of structural braces, the byte ranges that are plain code, and whether the line began in
//! plain code. State that can span lines
//! (block comments, triple-quoted strings) is carried from one `scan_line` call to the next.
//! Slashy strings (`/pattern/`) are not recognized.

use std::ops::Range;

/// Lexical state at a line boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Code,
    BlockComment,
    /// Inside `'''...'''` or `"""..."""`, holding the quote character
    TripleString(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    Open,
    Close,
}

/// Structural braces found on one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineScan {
    /// The line began outside any comment or multi-line string
    pub starts_in_code: bool,
    pub braces: Vec<Brace>,
    /// Byte ranges of the line outside comments and multi-line strings
    pub code: Vec<Range<usize>>,
}

impl LineScan {
    /// Whether the byte at `offset` is code rather than comment or multi-line string.
    #[must_use]
    pub fn is_code(&self, offset: usize) -> bool {
        self.code.iter().any(|range| range.contains(&offset))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexer {
    state: LexState,
}

impl Lexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> LexState {
        self.state
    }

    pub fn scan_line(&mut self, line: &str) -> LineScan {
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let at = |index: usize| chars.get(index).map(|&(_, c)| c);
        let offset = |index: usize| chars.get(index).map_or(line.len(), |&(byte, _)| byte);
        let mut scan = LineScan {
            starts_in_code: self.state == LexState::Code,
            ..LineScan::default()
        };
        let mut code_start = scan.starts_in_code.then_some(0);

        let mut i = 0;
        while i < chars.len() {
            match self.state {
                LexState::Code => match chars[i].1 {
                    '/' if at(i + 1) == Some('/') => break,
                    '/' if at(i + 1) == Some('*') => {
                        if let Some(start) = code_start.take() {
                            scan.code.push(start..offset(i));
                        }
                        self.state = LexState::BlockComment;
                        i += 2;
                    }
                    quote @ ('\'' | '"') => {
                        if at(i + 1) == Some(quote) && at(i + 2) == Some(quote) {
                            if let Some(start) = code_start.take() {
                                scan.code.push(start..offset(i));
                            }
                            self.state = LexState::TripleString(quote);
                            i += 3;
                        } else {
                            i = skip_string(&chars, i + 1, quote);
                        }
                    }
                    '{' => {
                        scan.braces.push(Brace::Open);
                        i += 1;
                    }
                    '}' => {
                        scan.braces.push(Brace::Close);
                        i += 1;
                    }
                    _ => i += 1,
                },
                LexState::BlockComment => {
                    if chars[i].1 == '*' && at(i + 1) == Some('/') {
                        self.state = LexState::Code;
                        i += 2;
                        code_start = Some(offset(i));
                    } else {
                        i += 1;
                    }
                }
                LexState::TripleString(quote) => {
                    if chars[i].1 == '\\' {
                        i += 2;
                    } else if chars[i].1 == quote
                        && at(i + 1) == Some(quote)
                        && at(i + 2) == Some(quote)
                    {
                        self.state = LexState::Code;
                        i += 3;
                        code_start = Some(offset(i));
                    } else {
                        i += 1;
                    }
                }
            }
        }
        if let Some(start) = code_start {
            scan.code.push(start..offset(i));
        }
        scan
    }
}

/// Index just past the closing `quote` of a single-line string whose body starts at `from`.
/// Unterminated strings end at end of line.
fn skip_string(chars: &[(usize, char)], from: usize, quote: char) -> usize {
    let mut i = from;
    while i < chars.len() {
        match chars[i].1 {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}
