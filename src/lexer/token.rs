use std::fmt;

use phf::phf_map;

pub static KEYWORDS: phf::Map<&str, TokenKind> = phf_map! {
    "let" => TokenKind::Let,
    "be" => TokenKind::Be,
    "input" => TokenKind::Input,
    "output" => TokenKind::Output,
    "add" => TokenKind::Add,
    "subtract" => TokenKind::Subtract,
    "multiply" => TokenKind::Multiply,
    "divide" => TokenKind::Divide,
    "store" => TokenKind::Store,
    "in" => TokenKind::In,
    "and" => TokenKind::And,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "otherwise" => TokenKind::Otherwise,
    "then" => TokenKind::Then,
    "repeat" => TokenKind::Repeat,
    "from" => TokenKind::From,
    "to" => TokenKind::To,
    "jump" => TokenKind::Jump,
    "until" => TokenKind::Until,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Let,
    Be,
    Input,
    Output,
    Add,
    Subtract,
    Multiply,
    Divide,
    Store,
    In,
    And,
    If,
    Else,
    Otherwise,
    Then,
    Repeat,
    From,
    To,
    Jump,
    Until,

    Assign,
    RelOp,

    Identifier,
    Number,
    Str,

    EndOfLine,
    EndOfFile,

    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TokenKind::Let => "LET",
            TokenKind::Be => "BE",
            TokenKind::Input => "INPUT",
            TokenKind::Output => "OUTPUT",
            TokenKind::Add => "ADD",
            TokenKind::Subtract => "SUBTRACT",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Store => "STORE",
            TokenKind::In => "IN",
            TokenKind::And => "AND",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Otherwise => "OTHERWISE",
            TokenKind::Then => "THEN",
            TokenKind::Repeat => "REPEAT",
            TokenKind::From => "FROM",
            TokenKind::To => "TO",
            TokenKind::Jump => "JUMP",
            TokenKind::Until => "UNTIL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::RelOp => "REL_OP",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::EndOfLine => "END_OF_LINE",
            TokenKind::EndOfFile => "END_OF_FILE",
            TokenKind::Invalid => "INVALID",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Type: {}, Lexeme: {}, Line: {}, Col: {}",
            self.kind, self.lexeme, self.line, self.column
        )
    }
}
