//! Character-to-token scanner for the debug-info directive format
//! (spec.md §4.1).
//!
//! One character at a time, tracking a 1-based line number and 0-based
//! column so that every token can be pinned down for diagnostics. The
//! scanner never fails outright: an invalid character is reported through
//! the caller-supplied diagnostic collector and skipped, matching the
//! "error recovery" requirement for the lexical layer.

use crate::diag::{Diagnostic, DiagnosticCollector, Severity};
use lazy_static::lazy_static;

/// Every reserved word in the format (spec.md §6), directive keywords and
/// attribute keywords together, looked up by binary search as the spec
/// prescribes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Keyword {
    Abs,
    Addrsize,
    Count,
    Enum,
    Equ,
    File,
    Global,
    Id,
    Info,
    Lab,
    Lib,
    Library,
    Line,
    Long,
    Major,
    Minor,
    Mod,
    Module,
    Mtime,
    Name,
    Oname,
    Ooffs,
    Parent,
    Ro,
    Rw,
    Scope,
    Seg,
    Segment,
    Size,
    Span,
    Start,
    Struct,
    Sym,
    Type,
    Val,
    Version,
    Zp,
}

impl Keyword {
    pub fn text(self) -> &'static str {
        match self {
            Keyword::Abs => "abs",
            Keyword::Addrsize => "addrsize",
            Keyword::Count => "count",
            Keyword::Enum => "enum",
            Keyword::Equ => "equ",
            Keyword::File => "file",
            Keyword::Global => "global",
            Keyword::Id => "id",
            Keyword::Info => "info",
            Keyword::Lab => "lab",
            Keyword::Lib => "lib",
            Keyword::Library => "library",
            Keyword::Line => "line",
            Keyword::Long => "long",
            Keyword::Major => "major",
            Keyword::Minor => "minor",
            Keyword::Mod => "mod",
            Keyword::Module => "module",
            Keyword::Mtime => "mtime",
            Keyword::Name => "name",
            Keyword::Oname => "oname",
            Keyword::Ooffs => "ooffs",
            Keyword::Parent => "parent",
            Keyword::Ro => "ro",
            Keyword::Rw => "rw",
            Keyword::Scope => "scope",
            Keyword::Seg => "seg",
            Keyword::Segment => "segment",
            Keyword::Size => "size",
            Keyword::Span => "span",
            Keyword::Start => "start",
            Keyword::Struct => "struct",
            Keyword::Sym => "sym",
            Keyword::Type => "type",
            Keyword::Val => "val",
            Keyword::Version => "version",
            Keyword::Zp => "zp",
        }
    }
}

lazy_static! {
    /// Sorted by lexeme so `keyword_lookup` can binary-search it, same as
    /// the scanner's keyword table in spec.md §4.1.
    static ref KEYWORD_TABLE: Vec<(&'static str, Keyword)> = {
        let mut table = vec![
            ("abs", Keyword::Abs),
            ("addrsize", Keyword::Addrsize),
            ("count", Keyword::Count),
            ("enum", Keyword::Enum),
            ("equ", Keyword::Equ),
            ("file", Keyword::File),
            ("global", Keyword::Global),
            ("id", Keyword::Id),
            ("info", Keyword::Info),
            ("lab", Keyword::Lab),
            ("lib", Keyword::Lib),
            ("library", Keyword::Library),
            ("line", Keyword::Line),
            ("long", Keyword::Long),
            ("major", Keyword::Major),
            ("minor", Keyword::Minor),
            ("mod", Keyword::Mod),
            ("module", Keyword::Module),
            ("mtime", Keyword::Mtime),
            ("name", Keyword::Name),
            ("oname", Keyword::Oname),
            ("ooffs", Keyword::Ooffs),
            ("parent", Keyword::Parent),
            ("ro", Keyword::Ro),
            ("rw", Keyword::Rw),
            ("scope", Keyword::Scope),
            ("seg", Keyword::Seg),
            ("segment", Keyword::Segment),
            ("size", Keyword::Size),
            ("span", Keyword::Span),
            ("start", Keyword::Start),
            ("struct", Keyword::Struct),
            ("sym", Keyword::Sym),
            ("type", Keyword::Type),
            ("val", Keyword::Val),
            ("version", Keyword::Version),
            ("zp", Keyword::Zp),
        ];
        table.sort_by_key(|(s, _)| *s);
        table
    };
}

fn keyword_lookup(text: &str) -> Option<Keyword> {
    KEYWORD_TABLE
        .binary_search_by_key(&text, |(s, _)| s)
        .ok()
        .map(|idx| KEYWORD_TABLE[idx].1)
}

/// One base for an integer constant (spec.md §4.1).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Octal,
    Hex,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Eof,
    Eol,
    Comma,
    Equals,
    Plus,
    Minus,
    Int(u64, Radix),
    Str(String),
    Keyword(Keyword),
    /// An identifier that did not match the keyword table.
    Ident(String),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line the token started on.
    pub line: u32,
    /// 0-based column the token started on.
    pub column: u32,
}

/// Scans one input buffer, producing tokens on demand.
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
    file_name: String,
    log_tokens: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(file_name: impl Into<String>, input: &'a [u8], log_tokens: bool) -> Self {
        Scanner {
            input,
            pos: 0,
            line: 1,
            column: 0,
            file_name: file_name.into(),
            log_tokens,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Returns the raw text of the current line, starting at `start_pos`,
    /// up to (not including) the next newline. Used only to attach source
    /// context to diagnostics.
    fn line_text_from(&self, start_pos: usize) -> String {
        let mut end = start_pos;
        while end < self.input.len() && self.input[end] != b'\n' {
            end += 1;
        }
        let mut begin = start_pos;
        while begin > 0 && self.input[begin - 1] != b'\n' {
            begin -= 1;
        }
        String::from_utf8_lossy(&self.input[begin..end]).into_owned()
    }

    fn error(
        &self,
        diags: &mut DiagnosticCollector<'_>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) {
        let text = self.line_text_from(self.pos.saturating_sub(1));
        diags.emit(Diagnostic::new(
            Severity::Error,
            self.file_name.clone(),
            line,
            column,
            message,
            text,
        ));
    }

    /// Produces the next token, skipping whitespace and comments-free
    /// blanks. Always terminates: EOF repeats forever once reached.
    pub fn next_token(&mut self, diags: &mut DiagnosticCollector<'_>) -> Token {
        let tok = self.scan_token(diags);
        if self.log_tokens {
            log::trace!("{}:{}:{}: {:?}", self.file_name, tok.line, tok.column, tok.kind);
        }
        tok
    }

    fn scan_token(&mut self, diags: &mut DiagnosticCollector<'_>) -> Token {
        loop {
            match self.peek() {
                None => {
                    return Token {
                        kind: TokenKind::Eof,
                        line: self.line,
                        column: self.column,
                    }
                }
                Some(b' ') | Some(b'\t') | Some(b'\r') => {
                    self.bump();
                    continue;
                }
                Some(b'\n') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    return Token {
                        kind: TokenKind::Eol,
                        line,
                        column,
                    };
                }
                Some(b',') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    return Token {
                        kind: TokenKind::Comma,
                        line,
                        column,
                    };
                }
                Some(b'=') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    return Token {
                        kind: TokenKind::Equals,
                        line,
                        column,
                    };
                }
                Some(b'+') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    return Token {
                        kind: TokenKind::Plus,
                        line,
                        column,
                    };
                }
                Some(b'-') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    return Token {
                        kind: TokenKind::Minus,
                        line,
                        column,
                    };
                }
                Some(b'"') => return self.scan_string(diags),
                Some(c) if c.is_ascii_digit() => return self.scan_number(),
                Some(c) if c == b'_' || c.is_ascii_alphabetic() => return self.scan_ident(),
                Some(_) => {
                    let (line, column) = (self.line, self.column);
                    self.error(diags, line, column, "invalid character");
                    self.bump();
                    continue;
                }
            }
        }
    }

    fn scan_string(&mut self, diags: &mut DiagnosticCollector<'_>) -> Token {
        let (line, column) = (self.line, self.column);
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    self.error(diags, line, column, "unterminated string constant");
                    break;
                }
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    // No escape processing (spec.md §4.1).
                    value.push(self.bump().unwrap() as char);
                }
            }
        }
        Token {
            kind: TokenKind::Str(value),
            line,
            column,
        }
    }

    fn scan_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let radix = if self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x') | Some(b'X'))
        {
            self.bump();
            self.bump();
            Radix::Hex
        } else if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit())
        {
            self.bump();
            Radix::Octal
        } else {
            Radix::Decimal
        };

        let mut value: u64 = 0;
        let digit_ok: fn(u8) -> bool = match radix {
            Radix::Hex => |c| c.is_ascii_hexdigit(),
            Radix::Octal => |c| (b'0'..=b'7').contains(&c),
            Radix::Decimal => |c| c.is_ascii_digit(),
        };
        let base: u64 = match radix {
            Radix::Hex => 16,
            Radix::Octal => 8,
            Radix::Decimal => 10,
        };
        while let Some(c) = self.peek() {
            if !digit_ok(c) {
                break;
            }
            let digit = (c as char).to_digit(base as u32).unwrap() as u64;
            value = value.wrapping_mul(base).wrapping_add(digit);
            self.bump();
        }

        Token {
            kind: TokenKind::Int(value, radix),
            line,
            column,
        }
    }

    fn scan_ident(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'_' || c.is_ascii_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
        let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        let kind = match keyword_lookup(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(text),
        };
        Token { kind, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut sink = crate::diag::CollectingSink::default();
        let mut diags = DiagnosticCollector::new(&mut sink);
        let mut scanner = Scanner::new("t.dbg", src.as_bytes(), false);
        let mut out = Vec::new();
        loop {
            let tok = scanner.next_token(&mut diags);
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn numeric_bases() {
        let toks = tokens("10 010 0x10");
        assert_eq!(
            toks,
            vec![
                TokenKind::Int(10, Radix::Decimal),
                TokenKind::Int(8, Radix::Octal),
                TokenKind::Int(16, Radix::Hex),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_vs_ident() {
        let toks = tokens("version foobar");
        assert_eq!(
            toks,
            vec![
                TokenKind::Keyword(Keyword::Version),
                TokenKind::Ident("foobar".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_recovers() {
        let mut sink = crate::diag::CollectingSink::default();
        let mut diags = DiagnosticCollector::new(&mut sink);
        let mut scanner = Scanner::new("t.dbg", b"\"abc", false);
        let tok = scanner.next_token(&mut diags);
        assert_eq!(tok.kind, TokenKind::Str("abc".to_string()));
        assert_eq!(diags.error_count(), 1);
    }

    #[test]
    fn string_no_escapes() {
        let toks = tokens("\"a\\b\"");
        assert_eq!(toks[0], TokenKind::Str("a\\b".to_string()));
    }
}
