//! Whitespace-aware scanner.
//!
//! The scanner is pull-based: [`Scanner::next_token`] skips the trivia that
//! precedes the next token, scans the token and hands both back together.
//! It never decides between division and a regular expression; the parser
//! rewinds and calls [`Scanner::next_regex_token`] where a regex may start.
//!
//! One scanner serves both the ordinary grammar and JSX. The current
//! [`LexMode`] picks the token rules, and a brace stack tells the `}` that
//! closes a template substitution apart from the `}` that closes a block.

use crate::ast::Span;
use crate::character::{
    is_decimal_digit, is_identifier_part, is_identifier_start, is_keyword,
    is_line_terminator, is_octal_digit, is_whitespace,
};
use crate::entities;
use crate::error::messages;
use crate::token::{Comment, CommentKind, Token, TokenKind, TokenValue};
use core_types::{ErrorKind, JsError, JsResult, SourceLocation, SourcePosition};

/// Operators and delimiters, longest first.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", ">>>", "<<=", ">>=", "**=", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@",
];

/// Token rules in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// Ordinary ECMAScript tokens
    Normal,
    /// Inside `<...>`: names may contain `-`, strings have no escapes
    JsxTag,
    /// Between tags: everything up to `{` or `<` is one text token
    JsxText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curly {
    Brace,
    Substitution,
}

/// Snapshot used for backtracking.
#[derive(Debug, Clone)]
pub struct ScannerState {
    index: usize,
    line: u32,
    line_start: usize,
    curly_stack: Vec<Curly>,
    comment_count: usize,
}

impl ScannerState {
    /// Byte offset at which scanning resumes after a restore.
    pub fn index(&self) -> usize {
        self.index
    }
}

struct Scanned {
    kind: TokenKind,
    value: TokenValue,
    octal: bool,
    escaped: bool,
}

impl Scanned {
    fn plain(kind: TokenKind, value: TokenValue) -> Self {
        Scanned {
            kind,
            value,
            octal: false,
            escaped: false,
        }
    }
}

/// Converts source text into tokens on demand.
pub struct Scanner<'a> {
    source: &'a str,
    index: usize,
    line: u32,
    line_start: usize,
    curly_stack: Vec<Curly>,
    mode: LexMode,
    is_module: bool,
    track_comments: bool,
    comments: Vec<Comment>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            index: 0,
            line: 1,
            line_start: 0,
            curly_stack: Vec::new(),
            mode: LexMode::Normal,
            is_module: false,
            track_comments: false,
            comments: Vec::new(),
        }
    }

    /// Module code disables HTML-like comments.
    pub fn with_module(mut self, is_module: bool) -> Self {
        self.is_module = is_module;
        self
    }

    /// Records comments for passthrough as they are skipped.
    pub fn with_comments(mut self, track_comments: bool) -> Self {
        self.track_comments = track_comments;
        self
    }

    /// The full source.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current lexer mode.
    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Switches token rules for subsequent scans.
    pub fn set_mode(&mut self, mode: LexMode) {
        if self.mode != mode {
            log::debug!("lexer mode {:?} -> {:?} at {}", self.mode, mode, self.index);
            self.mode = mode;
        }
    }

    /// Captures the position, line bookkeeping and brace stack.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            index: self.index,
            line: self.line,
            line_start: self.line_start,
            curly_stack: self.curly_stack.clone(),
            comment_count: self.comments.len(),
        }
    }

    /// Returns to a previously saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.index = state.index;
        self.line = state.line;
        self.line_start = state.line_start;
        self.curly_stack = state.curly_stack;
        self.comments.truncate(state.comment_count);
    }

    /// True when no input remains.
    pub fn eof(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Current byte offset.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current position as line, column and offset.
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column_at(self.index, self.line_start), self.index)
    }

    /// Comments recorded so far.
    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Scans the next token under the current mode.
    pub fn next_token(&mut self) -> JsResult<Token<'a>> {
        let token = match self.mode {
            LexMode::JsxText => self.lex_jsx_text()?,
            LexMode::Normal | LexMode::JsxTag => {
                let ws_start = self.index;
                let newline = self.skip_trivia()?;
                let ws_before = &self.source[ws_start..self.index];
                if self.mode == LexMode::JsxTag {
                    self.lex_jsx_tag(ws_before, newline)?
                } else {
                    self.lex(ws_before, newline)?
                }
            }
        };
        log::trace!("token {:?} {:?}", token.kind, token.raw);
        Ok(token)
    }

    /// Scans a regular expression literal starting at the next `/`.
    pub fn next_regex_token(&mut self) -> JsResult<Token<'a>> {
        let ws_start = self.index;
        let newline = self.skip_trivia()?;
        let ws_before = &self.source[ws_start..self.index];
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        if self.peek_char() != Some('/') {
            return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
        }
        self.advance();
        let mut in_class = false;
        loop {
            let ch = match self.peek_char() {
                Some(ch) if !is_line_terminator(ch) => ch,
                _ => return Err(self.error(ErrorKind::Scanner, messages::UNTERMINATED_REGEXP)),
            };
            self.advance();
            match ch {
                '\\' => match self.peek_char() {
                    Some(next) if !is_line_terminator(next) => {
                        self.advance();
                    }
                    _ => return Err(self.error(ErrorKind::Scanner, messages::UNTERMINATED_REGEXP)),
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        let pattern = self.source[start + 1..self.index - 1].to_string();
        let flags_start = self.index;
        while let Some(ch) = self.peek_char() {
            if ch == '\\' {
                return Err(self.error(ErrorKind::Scanner, messages::INVALID_REGEXP_FLAGS));
            }
            if !is_identifier_part(ch) {
                break;
            }
            self.advance();
        }
        let flags = &self.source[flags_start..self.index];
        let mut seen = String::new();
        for flag in flags.chars() {
            if !"dgimsuyv".contains(flag) || seen.contains(flag) {
                return Err(self.error(ErrorKind::Scanner, messages::INVALID_REGEXP_FLAGS));
            }
            seen.push(flag);
        }
        let scanned = Scanned::plain(
            TokenKind::RegularExpression,
            TokenValue::RegExp {
                pattern,
                flags: flags.to_string(),
            },
        );
        Ok(self.build(scanned, ws_before, newline, start, line, line_start))
    }

    // ==================== Character access ====================

    fn rest(&self) -> &'a str {
        &self.source[self.index..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.index += ch.len_utf8();
        if is_line_terminator(ch) && !(ch == '\r' && self.peek_char() == Some('\n')) {
            self.line += 1;
            self.line_start = self.index;
        }
        Some(ch)
    }

    fn skip_line_terminator(&mut self) {
        if self.advance() == Some('\r') && self.peek_char() == Some('\n') {
            self.advance();
        }
    }

    fn column_at(&self, offset: usize, line_start: usize) -> u32 {
        self.source[line_start..offset].chars().count() as u32
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> JsError {
        let column = self.column_at(self.index, self.line_start) + 1;
        JsError::new(kind, message, self.index, self.line, column)
    }

    fn build(
        &self,
        scanned: Scanned,
        ws_before: &'a str,
        newline_before: bool,
        start: usize,
        line: u32,
        line_start: usize,
    ) -> Token<'a> {
        Token {
            kind: scanned.kind,
            value: scanned.value,
            raw: &self.source[start..self.index],
            ws_before,
            start,
            end: self.index,
            line,
            column: self.column_at(start, line_start),
            line_start,
            end_line: self.line,
            end_column: self.column_at(self.index, self.line_start),
            newline_before,
            octal: scanned.octal,
            escaped: scanned.escaped,
        }
    }

    // ==================== Trivia ====================

    fn skip_trivia(&mut self) -> JsResult<bool> {
        let at_start = self.index == 0;
        let mut newline = false;
        if at_start && self.rest().starts_with("#!") {
            self.skip_line_comment(2);
        }
        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.advance();
            } else if is_line_terminator(ch) {
                self.skip_line_terminator();
                newline = true;
            } else if ch == '/' {
                match self.peek_nth(1) {
                    Some('/') => self.skip_line_comment(2),
                    Some('*') => {
                        if self.skip_block_comment()? {
                            newline = true;
                        }
                    }
                    _ => break,
                }
            } else if self.html_comments_allowed() && self.rest().starts_with("<!--") {
                self.skip_line_comment(4);
            } else if self.html_comments_allowed()
                && (newline || at_start)
                && self.rest().starts_with("-->")
            {
                self.skip_line_comment(3);
            } else {
                break;
            }
        }
        Ok(newline)
    }

    fn html_comments_allowed(&self) -> bool {
        !self.is_module && self.mode == LexMode::Normal
    }

    fn skip_line_comment(&mut self, prefix: usize) {
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        self.index += prefix;
        while let Some(ch) = self.peek_char() {
            if is_line_terminator(ch) {
                break;
            }
            self.advance();
        }
        self.record_comment(CommentKind::Line, start, start + prefix, self.index, line, line_start);
    }

    fn skip_block_comment(&mut self) -> JsResult<bool> {
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        self.index += 2;
        let mut newline = false;
        loop {
            if self.rest().starts_with("*/") {
                self.index += 2;
                self.record_comment(CommentKind::Block, start, start + 2, self.index - 2, line, line_start);
                return Ok(newline);
            }
            match self.advance() {
                Some(ch) if is_line_terminator(ch) => newline = true,
                Some(_) => {}
                None => return Err(self.error(ErrorKind::Scanner, messages::UNTERMINATED_COMMENT)),
            }
        }
    }

    fn record_comment(
        &mut self,
        kind: CommentKind,
        start: usize,
        value_start: usize,
        value_end: usize,
        line: u32,
        line_start: usize,
    ) {
        if !self.track_comments {
            return;
        }
        let end = if kind == CommentKind::Block { value_end + 2 } else { value_end };
        let loc = SourceLocation::new(
            SourcePosition::new(line, self.column_at(start, line_start), start),
            SourcePosition::new(self.line, self.column_at(end, self.line_start), end),
        );
        self.comments.push(Comment {
            kind,
            value: self.source[value_start..value_end].to_string(),
            span: Span {
                range: Some((start, end)),
                loc: Some(loc),
            },
        });
    }

    // ==================== Ordinary tokens ====================

    fn lex(&mut self, ws_before: &'a str, newline: bool) -> JsResult<Token<'a>> {
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => {
                let scanned = Scanned::plain(TokenKind::Eof, TokenValue::Empty);
                return Ok(self.build(scanned, ws_before, newline, start, line, line_start));
            }
        };
        let scanned = if is_identifier_start(ch) || ch == '\\' {
            self.scan_identifier()?
        } else if ch == '"' || ch == '\'' {
            self.scan_string(ch)?
        } else if ch == '`' {
            self.advance();
            self.scan_template(true)?
        } else if is_decimal_digit(ch) || (ch == '.' && self.peek_nth(1).is_some_and(is_decimal_digit)) {
            self.scan_number()?
        } else if ch == '#' {
            self.advance();
            let mut name = self.scan_identifier()?;
            if name.kind == TokenKind::Eof {
                return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
            }
            name.kind = TokenKind::PrivateIdentifier;
            name
        } else if ch == '}' && self.curly_stack.last() == Some(&Curly::Substitution) {
            self.curly_stack.pop();
            self.advance();
            self.scan_template(false)?
        } else {
            self.scan_punctuator()?
        };
        Ok(self.build(scanned, ws_before, newline, start, line, line_start))
    }

    fn scan_punctuator(&mut self) -> JsResult<Scanned> {
        let rest = self.rest();
        let mut punct = PUNCTUATORS.iter().copied().find(|p| rest.starts_with(*p));
        if punct == Some("?.") && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            punct = Some("?");
        }
        let punct = match punct {
            Some(p) => p,
            None => return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL)),
        };
        self.index += punct.len();
        match punct {
            "{" => self.curly_stack.push(Curly::Brace),
            "}" => {
                self.curly_stack.pop();
            }
            _ => {}
        }
        Ok(Scanned::plain(TokenKind::Punctuator, TokenValue::Empty))
    }

    fn scan_identifier(&mut self) -> JsResult<Scanned> {
        let mut name = String::new();
        let mut escaped = false;
        while let Some(ch) = self.peek_char() {
            let first = name.is_empty();
            if ch == '\\' {
                self.advance();
                if self.peek_char() != Some('u') {
                    return Err(self.error(ErrorKind::Scanner, messages::INVALID_UNICODE_ESCAPE));
                }
                self.advance();
                let decoded = self
                    .scan_unicode_escape()?
                    .and_then(char::from_u32)
                    .filter(|c| if first { is_identifier_start(*c) } else { is_identifier_part(*c) });
                match decoded {
                    Some(c) => name.push(c),
                    None => return Err(self.error(ErrorKind::Scanner, messages::INVALID_UNICODE_ESCAPE)),
                }
                escaped = true;
            } else if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) {
                self.advance();
                name.push(ch);
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Ok(Scanned::plain(TokenKind::Eof, TokenValue::Empty));
        }
        let kind = match name.as_str() {
            "true" | "false" => TokenKind::BooleanLiteral,
            "null" => TokenKind::NullLiteral,
            word if is_keyword(word) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        if escaped && kind != TokenKind::Identifier {
            return Err(self.error(ErrorKind::Scanner, messages::ESCAPED_KEYWORD));
        }
        Ok(Scanned {
            kind,
            value: TokenValue::Text(name),
            octal: false,
            escaped,
        })
    }

    /// Reads the part of a `\u` escape after the `u`. `None` means malformed.
    fn scan_unicode_escape(&mut self) -> JsResult<Option<u32>> {
        if self.peek_char() == Some('{') {
            self.advance();
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(ch) = self.peek_char() {
                if ch == '}' {
                    break;
                }
                let digit = match ch.to_digit(16) {
                    Some(d) => d,
                    None => return Ok(None),
                };
                self.advance();
                value = value.saturating_mul(16).saturating_add(digit);
                digits += 1;
            }
            if self.peek_char() != Some('}') || digits == 0 || value > 0x10FFFF {
                return Ok(None);
            }
            self.advance();
            return Ok(Some(value));
        }
        self.scan_hex_digits(4)
    }

    fn scan_hex_digits(&mut self, count: usize) -> JsResult<Option<u32>> {
        let mut value = 0;
        for _ in 0..count {
            match self.peek_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    self.advance();
                    value = value * 16 + digit;
                }
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }

    /// Reads a `\u` escape in a string, pairing surrogates where possible.
    fn scan_string_unicode_escape(&mut self) -> JsResult<char> {
        let unit = match self.scan_unicode_escape()? {
            Some(unit) => unit,
            None => return Err(self.error(ErrorKind::Scanner, messages::INVALID_UNICODE_ESCAPE)),
        };
        if (0xD800..0xDC00).contains(&unit) && self.rest().starts_with("\\u") {
            let saved = self.save_state();
            self.index += 2;
            if let Some(low) = self.scan_unicode_escape()?.filter(|low| (0xDC00..0xE000).contains(low)) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.restore_state(saved);
        }
        Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn scan_string(&mut self, quote: char) -> JsResult<Scanned> {
        self.advance();
        let mut cooked = String::new();
        let mut octal = false;
        loop {
            let ch = match self.peek_char() {
                Some(ch) => ch,
                None => return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL)),
            };
            if ch == quote {
                self.advance();
                break;
            }
            if ch == '\\' {
                self.advance();
                let escape = match self.peek_char() {
                    Some(escape) => escape,
                    None => return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL)),
                };
                if is_line_terminator(escape) {
                    self.skip_line_terminator();
                    continue;
                }
                self.advance();
                match escape {
                    'n' => cooked.push('\n'),
                    'r' => cooked.push('\r'),
                    't' => cooked.push('\t'),
                    'b' => cooked.push('\u{8}'),
                    'f' => cooked.push('\u{c}'),
                    'v' => cooked.push('\u{b}'),
                    'x' => match self.scan_hex_digits(2)?.and_then(char::from_u32) {
                        Some(c) => cooked.push(c),
                        None => return Err(self.error(ErrorKind::Scanner, messages::INVALID_ESCAPE)),
                    },
                    'u' => cooked.push(self.scan_string_unicode_escape()?),
                    '0' if !self.peek_char().is_some_and(is_decimal_digit) => cooked.push('\0'),
                    '0'..='7' => {
                        octal = true;
                        let mut value = escape.to_digit(8).unwrap_or(0);
                        let max_len = if escape <= '3' { 3 } else { 2 };
                        let mut len = 1;
                        while len < max_len {
                            match self.peek_char().filter(|c| is_octal_digit(*c)) {
                                Some(digit) => {
                                    self.advance();
                                    value = value * 8 + digit.to_digit(8).unwrap_or(0);
                                    len += 1;
                                }
                                None => break,
                            }
                        }
                        cooked.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                    '8' | '9' => {
                        octal = true;
                        cooked.push(escape);
                    }
                    other => cooked.push(other),
                }
            } else if ch == '\n' || ch == '\r' {
                return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
            } else {
                self.advance();
                cooked.push(ch);
            }
        }
        Ok(Scanned {
            kind: TokenKind::StringLiteral,
            value: TokenValue::Text(cooked),
            octal,
            escaped: false,
        })
    }

    /// Scans a template piece; the opening backtick or `}` is already consumed.
    fn scan_template(&mut self, head: bool) -> JsResult<Scanned> {
        let mut cooked = String::new();
        let mut valid = true;
        let mut octal = false;
        let tail = loop {
            let ch = match self.peek_char() {
                Some(ch) => ch,
                None => return Err(self.error(ErrorKind::Scanner, messages::UNTERMINATED_TEMPLATE)),
            };
            if ch == '`' {
                self.advance();
                break true;
            }
            if ch == '$' && self.peek_nth(1) == Some('{') {
                self.index += 2;
                self.curly_stack.push(Curly::Substitution);
                break false;
            }
            if ch == '\\' {
                self.advance();
                let escape = match self.peek_char() {
                    Some(escape) => escape,
                    None => return Err(self.error(ErrorKind::Scanner, messages::UNTERMINATED_TEMPLATE)),
                };
                if is_line_terminator(escape) {
                    self.skip_line_terminator();
                    continue;
                }
                self.advance();
                match escape {
                    'n' => cooked.push('\n'),
                    'r' => cooked.push('\r'),
                    't' => cooked.push('\t'),
                    'b' => cooked.push('\u{8}'),
                    'f' => cooked.push('\u{c}'),
                    'v' => cooked.push('\u{b}'),
                    'x' => match self.scan_hex_digits(2)?.and_then(char::from_u32) {
                        Some(c) => cooked.push(c),
                        None => valid = false,
                    },
                    'u' => match self.scan_unicode_escape()? {
                        Some(unit) => cooked.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)),
                        None => valid = false,
                    },
                    '0' if !self.peek_char().is_some_and(is_decimal_digit) => cooked.push('\0'),
                    '0'..='9' => {
                        valid = false;
                        octal = true;
                    }
                    other => cooked.push(other),
                }
            } else if ch == '\r' {
                self.skip_line_terminator();
                cooked.push('\n');
            } else {
                self.advance();
                cooked.push(ch);
            }
        };
        Ok(Scanned {
            kind: TokenKind::Template,
            value: TokenValue::Template {
                cooked: valid.then_some(cooked),
                head,
                tail,
            },
            octal,
            escaped: false,
        })
    }

    fn scan_number(&mut self) -> JsResult<Scanned> {
        let start = self.index;
        let mut octal = false;
        let radix = match (self.peek_char(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('o' | 'O')) => 8,
            (Some('0'), Some('b' | 'B')) => 2,
            _ => 10,
        };
        if radix != 10 {
            self.index += 2;
            let digits_start = self.index;
            self.scan_digits(radix)?;
            if self.index == digits_start {
                return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
            }
            let digits = self.source[digits_start..self.index].replace('_', "");
            if self.peek_char() == Some('n') {
                self.advance();
                self.check_number_end()?;
                let text = self.source[start..self.index - 1].replace('_', "");
                return Ok(Scanned::plain(TokenKind::BigIntLiteral, TokenValue::Text(text)));
            }
            self.check_number_end()?;
            let value = digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0f64, |acc, d| acc * radix as f64 + d as f64);
            return Ok(Scanned::plain(TokenKind::NumericLiteral, TokenValue::Number(value)));
        }

        let legacy = self.peek_char() == Some('0') && self.peek_nth(1).is_some_and(is_decimal_digit);
        if legacy {
            octal = true;
            self.advance();
            while self.peek_char().is_some_and(is_decimal_digit) {
                self.advance();
            }
            let digits = &self.source[start + 1..self.index];
            if digits.chars().all(is_octal_digit) {
                self.check_number_end()?;
                let value = digits
                    .chars()
                    .filter_map(|c| c.to_digit(8))
                    .fold(0f64, |acc, d| acc * 8.0 + d as f64);
                return Ok(Scanned {
                    kind: TokenKind::NumericLiteral,
                    value: TokenValue::Number(value),
                    octal,
                    escaped: false,
                });
            }
        } else if self.peek_char() != Some('.') {
            self.scan_digits(10)?;
        }

        let mut integer = true;
        if self.peek_char() == Some('.') {
            integer = false;
            self.advance();
            if self.peek_char().is_some_and(is_decimal_digit) {
                self.scan_digits(10)?;
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            integer = false;
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            if !self.peek_char().is_some_and(is_decimal_digit) {
                return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
            }
            self.scan_digits(10)?;
        }
        if integer && !legacy && self.peek_char() == Some('n') {
            self.advance();
            self.check_number_end()?;
            let text = self.source[start..self.index - 1].replace('_', "");
            return Ok(Scanned::plain(TokenKind::BigIntLiteral, TokenValue::Text(text)));
        }
        self.check_number_end()?;
        let text = self.source[start..self.index].replace('_', "");
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL))?;
        Ok(Scanned {
            kind: TokenKind::NumericLiteral,
            value: TokenValue::Number(value),
            octal,
            escaped: false,
        })
    }

    /// Digits of `radix` with `_` separators allowed strictly between digits.
    fn scan_digits(&mut self, radix: u32) -> JsResult<()> {
        let mut previous_digit = false;
        while let Some(ch) = self.peek_char() {
            if ch == '_' {
                let next_digit = self.peek_nth(1).is_some_and(|c| c.is_digit(radix));
                if !previous_digit || !next_digit {
                    return Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL));
                }
                previous_digit = false;
            } else if ch.is_digit(radix) {
                previous_digit = true;
            } else {
                break;
            }
            self.advance();
        }
        Ok(())
    }

    /// A numeric literal must not run straight into an identifier or digit.
    fn check_number_end(&self) -> JsResult<()> {
        match self.peek_char() {
            Some(ch) if is_identifier_start(ch) || is_decimal_digit(ch) || ch == '\\' => {
                Err(self.error(ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL))
            }
            _ => Ok(()),
        }
    }

    // ==================== JSX tokens ====================

    fn lex_jsx_tag(&mut self, ws_before: &'a str, newline: bool) -> JsResult<Token<'a>> {
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        let scanned = match self.peek_char() {
            None => Scanned::plain(TokenKind::Eof, TokenValue::Empty),
            Some(ch @ ('<' | '>' | '/' | ':' | '=' | '.' | '{' | '}')) => {
                self.advance();
                if ch == '{' {
                    self.curly_stack.push(Curly::Brace);
                }
                Scanned::plain(TokenKind::Punctuator, TokenValue::Empty)
            }
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let body_start = self.index;
                loop {
                    match self.advance() {
                        Some(ch) if ch == quote => break,
                        Some(_) => {}
                        None => return Err(self.error(ErrorKind::Jsx, messages::UNTERMINATED_JSX_STRING)),
                    }
                }
                let value = self.decode_jsx(body_start, self.index - 1)?;
                Scanned::plain(TokenKind::StringLiteral, TokenValue::Text(value))
            }
            Some(ch) if is_identifier_start(ch) => {
                while let Some(next) = self.peek_char() {
                    if !(is_identifier_part(next) || next == '-') {
                        break;
                    }
                    self.advance();
                }
                let name = self.source[start..self.index].to_string();
                Scanned::plain(TokenKind::JsxIdentifier, TokenValue::Text(name))
            }
            Some(_) => return Err(self.error(ErrorKind::Jsx, messages::UNEXPECTED_TOKEN_ILLEGAL)),
        };
        Ok(self.build(scanned, ws_before, newline, start, line, line_start))
    }

    fn lex_jsx_text(&mut self) -> JsResult<Token<'a>> {
        let (start, line, line_start) = (self.index, self.line, self.line_start);
        let scanned = match self.peek_char() {
            None => Scanned::plain(TokenKind::Eof, TokenValue::Empty),
            Some(ch @ ('{' | '<')) => {
                self.advance();
                if ch == '{' {
                    self.curly_stack.push(Curly::Brace);
                }
                Scanned::plain(TokenKind::Punctuator, TokenValue::Empty)
            }
            Some(_) => {
                while let Some(ch) = self.peek_char() {
                    if ch == '{' || ch == '<' {
                        break;
                    }
                    self.advance();
                }
                let value = self.decode_jsx(start, self.index)?;
                Scanned::plain(TokenKind::JsxText, TokenValue::Text(value))
            }
        };
        Ok(self.build(scanned, "", false, start, line, line_start))
    }

    fn decode_jsx(&self, start: usize, end: usize) -> JsResult<String> {
        entities::decode(&self.source[start..end])
            .map_err(|invalid| self.error(ErrorKind::Jsx, messages::invalid_entity(&invalid.reference)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<Token<'_>> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token().unwrap();
            let eof = token.is_eof();
            tokens.push(token);
            if eof {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_scanner_identifier() {
        let tokens = scan_all("foo");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].raw, "foo");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_scanner_attaches_trivia_to_next_token() {
        let tokens = scan_all("a /* c */\n  b // end");
        assert_eq!(tokens[1].ws_before, " /* c */\n  ");
        assert!(tokens[1].newline_before);
        assert_eq!(tokens[2].ws_before, " // end");
        let rebuilt: String = tokens.iter().map(|t| format!("{}{}", t.ws_before, t.raw)).collect();
        assert_eq!(rebuilt, "a /* c */\n  b // end");
    }

    #[test]
    fn test_scanner_escaped_identifier_keeps_raw() {
        let tokens = scan_all("\\u0061bc");
        assert_eq!(tokens[0].text(), "abc");
        assert_eq!(tokens[0].raw, "\\u0061bc");
        assert!(tokens[0].escaped);
    }

    #[test]
    fn test_scanner_escaped_keyword_is_error() {
        let mut scanner = Scanner::new("\\u0069f");
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.message, messages::ESCAPED_KEYWORD);
    }

    #[test]
    fn test_scanner_numbers() {
        let tokens = scan_all("0x1F 0b101 0o17 017 019 1_000 .5 1e3 10n");
        let values: Vec<_> = tokens.iter().map(|t| t.value.clone()).collect();
        assert_eq!(values[0], TokenValue::Number(31.0));
        assert_eq!(values[1], TokenValue::Number(5.0));
        assert_eq!(values[2], TokenValue::Number(15.0));
        assert_eq!(values[3], TokenValue::Number(15.0));
        assert!(tokens[3].octal);
        assert_eq!(values[4], TokenValue::Number(19.0));
        assert!(tokens[4].octal);
        assert_eq!(values[5], TokenValue::Number(1000.0));
        assert_eq!(values[6], TokenValue::Number(0.5));
        assert_eq!(values[7], TokenValue::Number(1000.0));
        assert_eq!(tokens[8].kind, TokenKind::BigIntLiteral);
    }

    #[test]
    fn test_scanner_number_followed_by_identifier_is_error() {
        let mut scanner = Scanner::new("3in x");
        assert!(scanner.next_token().is_err());
    }

    #[test]
    fn test_scanner_string_escapes() {
        let tokens = scan_all(r#"'a\n\x41\u{42}C' "\101""#);
        assert_eq!(tokens[0].text(), "a\nABC");
        assert!(!tokens[0].octal);
        assert_eq!(tokens[1].text(), "A");
        assert!(tokens[1].octal);
    }

    #[test]
    fn test_scanner_unterminated_string() {
        let mut scanner = Scanner::new("'abc");
        assert!(scanner.next_token().is_err());
    }

    #[test]
    fn test_scanner_template_substitution_depth() {
        let tokens = scan_all("`a${ {b: 1} }c`");
        assert_eq!(tokens[0].raw, "`a${");
        assert_eq!(tokens[1].raw, "{");
        assert_eq!(tokens[5].raw, "}");
        assert_eq!(tokens[6].raw, "}c`");
        assert_eq!(
            tokens[6].value,
            TokenValue::Template {
                cooked: Some("c".to_string()),
                head: false,
                tail: true
            }
        );
    }

    #[test]
    fn test_scanner_regex_entry_point() {
        let mut scanner = Scanner::new(" /[/]x/gi;");
        let saved = scanner.save_state();
        let slash = scanner.next_token().unwrap();
        assert!(slash.is_punctuator("/"));
        scanner.restore_state(saved);
        let regex = scanner.next_regex_token().unwrap();
        assert_eq!(regex.ws_before, " ");
        assert_eq!(regex.raw, "/[/]x/gi");
        assert_eq!(
            regex.value,
            TokenValue::RegExp {
                pattern: "[/]x".to_string(),
                flags: "gi".to_string()
            }
        );
    }

    #[test]
    fn test_scanner_rejects_duplicate_regex_flags() {
        let mut scanner = Scanner::new("/a/gg");
        assert!(scanner.next_regex_token().is_err());
    }

    #[test]
    fn test_scanner_optional_chaining_vs_conditional() {
        let tokens = scan_all("a?.b c?.5:1");
        assert!(tokens[1].is_punctuator("?."));
        assert!(tokens[4].is_punctuator("?"));
    }

    #[test]
    fn test_scanner_crlf_counts_one_line() {
        let tokens = scan_all("a\r\nb\rc");
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_scanner_unterminated_comment() {
        let mut scanner = Scanner::new("/* open");
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.message, messages::UNTERMINATED_COMMENT);
    }

    #[test]
    fn test_scanner_html_comments_only_in_scripts() {
        let tokens = scan_all("a <!-- hidden\nb");
        assert_eq!(tokens[1].raw, "b");
        let mut module = Scanner::new("a <!-- b").with_module(true);
        module.next_token().unwrap();
        assert!(module.next_token().unwrap().is_punctuator("<"));
    }

    #[test]
    fn test_scanner_hashbang_is_trivia() {
        let tokens = scan_all("#!/usr/bin/env node\nx");
        assert_eq!(tokens[0].ws_before, "#!/usr/bin/env node\n");
        assert_eq!(tokens[0].raw, "x");
    }

    #[test]
    fn test_scanner_jsx_modes() {
        let mut scanner = Scanner::new("data-id='a&amp;b'> hi &lt; there<");
        scanner.set_mode(LexMode::JsxTag);
        let name = scanner.next_token().unwrap();
        assert_eq!(name.kind, TokenKind::JsxIdentifier);
        assert_eq!(name.raw, "data-id");
        assert!(scanner.next_token().unwrap().is_punctuator("="));
        let value = scanner.next_token().unwrap();
        assert_eq!(value.text(), "a&b");
        assert!(scanner.next_token().unwrap().is_punctuator(">"));
        scanner.set_mode(LexMode::JsxText);
        let text = scanner.next_token().unwrap();
        assert_eq!(text.kind, TokenKind::JsxText);
        assert_eq!(text.raw, " hi &lt; there");
        assert_eq!(text.text(), " hi < there");
        assert!(scanner.next_token().unwrap().is_punctuator("<"));
    }

    #[test]
    fn test_scanner_collects_comments() {
        let mut scanner = Scanner::new("// one\n/* two */ x").with_comments(true);
        scanner.next_token().unwrap();
        let comments = scanner.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].value, " one");
        assert_eq!(comments[1].kind, CommentKind::Block);
        assert_eq!(comments[1].value, " two ");
        assert_eq!(comments[1].span.range, Some((7, 16)));
    }
}
