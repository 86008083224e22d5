use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelOpKind {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelOpKind {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "==" => Some(RelOpKind::Eq),
            "!=" => Some(RelOpKind::Ne),
            "<" => Some(RelOpKind::Lt),
            "<=" => Some(RelOpKind::Le),
            ">" => Some(RelOpKind::Gt),
            ">=" => Some(RelOpKind::Ge),
            _ => None,
        }
    }

    /// Ordering operators require numeric operands on both sides; equality
    /// operators also accept a pair of strings.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            RelOpKind::Lt | RelOpKind::Le | RelOpKind::Gt | RelOpKind::Ge
        )
    }
}

impl fmt::Display for RelOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            RelOpKind::Eq => "==",
            RelOpKind::Ne => "!=",
            RelOpKind::Lt => "<",
            RelOpKind::Le => "<=",
            RelOpKind::Gt => ">",
            RelOpKind::Ge => ">=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `let name be value`
    VarDecl {
        name: String,
        value: Expr,
        line: usize,
    },
    /// `input name`
    Input { name: String, line: usize },
    /// `output value`
    Output { value: Expr, line: usize },
    /// `add left and right store in result` and friends
    BinOp {
        op: BinOpKind,
        left: String,
        right: String,
        result: String,
        line: usize,
    },
    /// `if cond then stmt [else if stmt] [otherwise stmt]`; every branch
    /// binds exactly one statement
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_if_branch: Option<Box<Stmt>>,
        otherwise_branch: Option<Box<Stmt>>,
        line: usize,
    },
    /// `repeat from var=start to end jump step stmt`
    Repeat {
        var: String,
        start: Expr,
        end: Expr,
        step: Expr,
        body: Box<Stmt>,
        line: usize,
    },
    /// `repeat until cond stmt`; the loop exits once cond becomes true
    RepeatUntil {
        condition: Expr,
        body: Box<Stmt>,
        line: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Identifier {
        name: String,
        line: usize,
    },
    Number {
        value: String,
        line: usize,
    },
    Str {
        value: String,
        line: usize,
    },
    RelOp {
        op: RelOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
    },
}

