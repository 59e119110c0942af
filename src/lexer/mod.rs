//! Byte stream -> token stream, with mode switching (default / date / comment / eof).
//!
//! The lexer never fails on "bad" twtxt; it only produces `TokenKind::Illegal`
//! for genuinely malformed UTF-8 input reaching the decoder (see [`Lexer::new`]
//! callers, which validate UTF-8 before construction). All higher-level
//! validation is the parser's job.

use std::fmt;

/// U+2028 LINE SEPARATOR, used inside a post body as a soft newline.
pub const LS: char = '\u{2028}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    String,
    Space,
    Tab,
    Nl,
    Ls,
    Scheme,
    Code,
    At,
    Hash,
    Lt,
    Gt,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Bang,
    Colon,
    Dash,
    Plus,
    Dot,
    TLetter,
    ZLetter,
    Equal,
    Backslash,
    Illegal,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    fn new(kind: TokenKind, literal: String, line: usize, col: usize) -> Self {
        Token { kind, literal, line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    Date,
    Comment,
    Eof,
}

/// Runes that terminate a `STRING` run in `Mode::Default` (beyond generic whitespace).
const DEFAULT_TERMINATORS: &[char] =
    &['@', '#', '!', ':', '`', '<', '>', '(', ')', '[', ']', '\\', LS, '\n', '\t'];

/// A hand-written Unicode-aware tokenizer, mode-switching at column 0.
pub struct Lexer {
    runes: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    mode: Mode,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            runes: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
            mode: Mode::Default,
        }
    }

    /// A lexer for a standalone post body (no surrounding date/comment line),
    /// e.g. for `make_post`/`parse_text`. Suppresses the column-0 mode switch
    /// so a body that happens to start with a digit isn't mistaken for a date.
    pub fn new_body(input: &str) -> Self {
        let mut lexer = Self::new(input);
        lexer.col = 1;
        lexer
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.runes.get(self.pos + offset).copied()
    }

    fn current(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.runes.len()
    }

    /// Decides mode transitions that only happen at the start of a line.
    fn maybe_enter_line_mode(&mut self) {
        if self.col != 0 || self.mode == Mode::Eof {
            return;
        }
        match self.current() {
            Some(c) if c.is_ascii_digit() => self.mode = Mode::Date,
            Some('#') => self.mode = Mode::Comment,
            _ => {}
        }
    }

    pub fn next_token(&mut self) -> Token {
        if self.at_eof() {
            self.mode = Mode::Eof;
            return Token::new(TokenKind::Eof, String::new(), self.line, self.col);
        }
        self.maybe_enter_line_mode();
        match self.mode {
            Mode::Default => self.lex_default(),
            Mode::Date => self.lex_date(),
            Mode::Comment => self.lex_comment(),
            Mode::Eof => Token::new(TokenKind::Eof, String::new(), self.line, self.col),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let (line, col) = (self.line, self.col);
        let c = self.bump().expect("single() called at EOF");
        Token::new(kind, c.to_string(), line, col)
    }

    fn lex_default(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let c = self.current().expect("lex_default called at EOF");

        if c == '\n' {
            self.bump();
            self.mode = Mode::Default;
            return Token::new(TokenKind::Nl, "\n".into(), line, col);
        }
        if c == '\t' {
            self.bump();
            self.mode = Mode::Default;
            return Token::new(TokenKind::Tab, "\t".into(), line, col);
        }
        if c == LS {
            self.bump();
            return Token::new(TokenKind::Ls, LS.to_string(), line, col);
        }
        if c.is_whitespace() {
            let mut lit = String::new();
            while let Some(ch) = self.current() {
                if ch.is_whitespace() && ch != '\n' && ch != '\t' && ch != LS {
                    lit.push(ch);
                    self.bump();
                } else {
                    break;
                }
            }
            return Token::new(TokenKind::Space, lit, line, col);
        }
        if c == ':' && self.peek_at(1) == Some('/') && self.peek_at(2) == Some('/') {
            self.bump();
            self.bump();
            self.bump();
            return Token::new(TokenKind::Scheme, "://".into(), line, col);
        }
        if c == '`' {
            return self.lex_code();
        }
        match c {
            '@' => self.single(TokenKind::At),
            '#' => self.single(TokenKind::Hash),
            '!' => self.single(TokenKind::Bang),
            ':' => self.single(TokenKind::Colon),
            '<' => self.single(TokenKind::Lt),
            '>' => self.single(TokenKind::Gt),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '\\' => self.single(TokenKind::Backslash),
            _ => {
                let mut lit = String::new();
                while let Some(ch) = self.current() {
                    if DEFAULT_TERMINATORS.contains(&ch) || ch.is_whitespace() {
                        break;
                    }
                    lit.push(ch);
                    self.bump();
                }
                if lit.is_empty() {
                    // Shouldn't happen: every non-terminator/non-whitespace char is consumed.
                    self.bump();
                    return Token::new(TokenKind::Illegal, c.to_string(), line, col);
                }
                Token::new(TokenKind::String, lit, line, col)
            }
        }
    }

    /// Consumes a backtick-delimited code span starting at the current `` ` ``.
    /// Single backtick -> inline code (terminated by `` ` ``, NL, or EOF).
    /// Triple backtick -> block code (terminated by ```` ``` ```` or EOF).
    fn lex_code(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let is_block = self.peek_at(1) == Some('`') && self.peek_at(2) == Some('`');
        let mut lit = String::new();
        let fence_len = if is_block { 3 } else { 1 };
        for _ in 0..fence_len {
            lit.push(self.bump().unwrap());
        }
        loop {
            match self.current() {
                None => break,
                Some('`') if is_block && self.peek_at(1) == Some('`') && self.peek_at(2) == Some('`') => {
                    for _ in 0..3 {
                        lit.push(self.bump().unwrap());
                    }
                    break;
                }
                Some('`') if !is_block => {
                    lit.push(self.bump().unwrap());
                    break;
                }
                Some('\n') if !is_block => break,
                Some(ch) => {
                    lit.push(ch);
                    self.bump();
                }
            }
        }
        Token::new(TokenKind::Code, lit, line, col)
    }

    fn lex_date(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let c = self.current().expect("lex_date called at EOF");
        if c.is_ascii_digit() {
            let mut lit = String::new();
            while let Some(ch) = self.current() {
                if ch.is_ascii_digit() {
                    lit.push(ch);
                    self.bump();
                } else {
                    break;
                }
            }
            return Token::new(TokenKind::Number, lit, line, col);
        }
        match c {
            '-' => self.single(TokenKind::Dash),
            'T' => self.single(TokenKind::TLetter),
            ':' => self.single(TokenKind::Colon),
            '.' => self.single(TokenKind::Dot),
            '+' => self.single(TokenKind::Plus),
            'Z' => self.single(TokenKind::ZLetter),
            '\t' => {
                self.bump();
                self.mode = Mode::Default;
                Token::new(TokenKind::Tab, "\t".into(), line, col)
            }
            '\n' => {
                self.bump();
                self.mode = Mode::Default;
                Token::new(TokenKind::Nl, "\n".into(), line, col)
            }
            _ => {
                self.bump();
                Token::new(TokenKind::Illegal, c.to_string(), line, col)
            }
        }
    }

    fn lex_comment(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let c = self.current().expect("lex_comment called at EOF");
        match c {
            '#' => self.single(TokenKind::Hash),
            '=' => self.single(TokenKind::Equal),
            '\n' => {
                self.bump();
                self.mode = Mode::Default;
                Token::new(TokenKind::Nl, "\n".into(), line, col)
            }
            _ => {
                let mut lit = String::new();
                while let Some(ch) = self.current() {
                    if ch == '=' || ch == '\n' {
                        break;
                    }
                    lit.push(ch);
                    self.bump();
                }
                Token::new(TokenKind::String, lit, line, col)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                out.push(TokenKind::Eof);
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn comment_line_is_hash_string_nl() {
        let ks = kinds("# nick = gbmor\n");
        assert_eq!(
            ks,
            vec![
                TokenKind::Hash,
                TokenKind::String,
                TokenKind::Equal,
                TokenKind::String,
                TokenKind::Nl,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn date_prefix_switches_mode_on_column_zero() {
        let ks = kinds("2016-02-03T23:05:00Z\thello\n");
        assert_eq!(
            ks,
            vec![
                TokenKind::Number,
                TokenKind::Dash,
                TokenKind::Number,
                TokenKind::Dash,
                TokenKind::Number,
                TokenKind::TLetter,
                TokenKind::Number,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::ZLetter,
                TokenKind::Tab,
                TokenKind::String,
                TokenKind::Nl,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scheme_is_a_single_token() {
        let ks = kinds("http://example.com");
        assert_eq!(ks, vec![TokenKind::String, TokenKind::Scheme, TokenKind::String, TokenKind::Eof]);
    }

    #[test]
    fn inline_code_token_captures_delimiters() {
        let mut lexer = Lexer::new("`hi`");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Code);
        assert_eq!(tok.literal, "`hi`");
    }

    #[test]
    fn block_code_token_captures_delimiters() {
        let mut lexer = Lexer::new("```hi```");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Code);
        assert_eq!(tok.literal, "```hi```");
    }

    #[test]
    fn backslash_is_its_own_token() {
        let ks = kinds("a\\]b");
        assert_eq!(
            ks,
            vec![TokenKind::String, TokenKind::Backslash, TokenKind::RBracket, TokenKind::String, TokenKind::Eof]
        );
    }

    #[test]
    fn line_separator_is_its_own_token() {
        let ks = kinds("a\u{2028}b");
        assert_eq!(
            ks,
            vec![TokenKind::String, TokenKind::Ls, TokenKind::String, TokenKind::Eof]
        );
    }
}
