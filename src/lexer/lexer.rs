use super::{Token, TokenKind, KEYWORDS};

#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
        }
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if c == '\0' {
            return c;
        }
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), ' ' | '\t' | '\r') {
            self.advance();
        }
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut lexeme = String::new();
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            lexeme.push(self.advance());
        }
        match KEYWORDS.get(lexeme.as_str()) {
            Some(&kind) => Token::new(kind, lexeme, line, column),
            None => Token::new(TokenKind::Identifier, lexeme, line, column),
        }
    }

    // One embedded dot is allowed; the lexeme is otherwise taken as-is.
    fn number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut lexeme = String::new();
        let mut has_dot = false;
        while self.peek().is_ascii_digit() || (!has_dot && self.peek() == '.') {
            if self.peek() == '.' {
                has_dot = true;
            }
            lexeme.push(self.advance());
        }
        Token::new(TokenKind::Number, lexeme, line, column)
    }

    fn string_literal(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance();
        let mut lexeme = String::new();
        while self.peek() != '"' && self.peek() != '\0' {
            lexeme.push(self.advance());
        }
        if self.peek() == '"' {
            self.advance();
            Token::new(TokenKind::Str, lexeme, line, column)
        } else {
            Token::new(TokenKind::Invalid, lexeme, line, column)
        }
    }

    fn rel_op(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let c = self.advance();
        let mut lexeme = String::from(c);
        if self.peek() == '=' {
            lexeme.push(self.advance());
            return Token::new(TokenKind::RelOp, lexeme, line, column);
        }
        if c == '<' || c == '>' {
            return Token::new(TokenKind::RelOp, lexeme, line, column);
        }
        Token::new(TokenKind::Invalid, lexeme, line, column)
    }

    fn run(&mut self) {
        loop {
            self.skip_blanks();

            let c = self.peek();
            match c {
                '\0' => {
                    self.tokens
                        .push(Token::new(TokenKind::EndOfFile, "", self.line, self.column));
                    break;
                }
                '\n' => {
                    let line = self.line;
                    self.advance();
                    self.tokens
                        .push(Token::new(TokenKind::EndOfLine, "\\n", line, 1));
                }
                '"' => {
                    let t = self.string_literal();
                    self.tokens.push(t);
                }
                '=' => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    if self.peek() == '=' {
                        self.advance();
                        self.tokens
                            .push(Token::new(TokenKind::RelOp, "==", line, column));
                    } else {
                        self.tokens
                            .push(Token::new(TokenKind::Assign, "=", line, column));
                    }
                }
                '<' | '>' | '!' => {
                    let t = self.rel_op();
                    self.tokens.push(t);
                }
                c if c.is_ascii_digit() => {
                    let t = self.number();
                    self.tokens.push(t);
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let t = self.identifier_or_keyword();
                    self.tokens.push(t);
                }
                c => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    self.tokens
                        .push(Token::new(TokenKind::Invalid, c, line, column));
                }
            }
        }
    }

    /// Tokenizes the whole source. Total: always returns at least an
    /// END_OF_FILE token, and unrecognized characters become INVALID tokens
    /// rather than failures.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        lexer.run();

        lexer.tokens
    }
}
