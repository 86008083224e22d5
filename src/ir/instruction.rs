use std::fmt;

use crate::parser::{BinOpKind, RelOpKind};

/// Arithmetic and relational operations share one instruction shape: two
/// source operands and a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl BinOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }

    /// The operator spelling in the emitted target language.
    pub fn c_op(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

impl From<BinOpKind> for BinOp {
    fn from(kind: BinOpKind) -> Self {
        match kind {
            BinOpKind::Add => BinOp::Add,
            BinOpKind::Subtract => BinOp::Sub,
            BinOpKind::Multiply => BinOp::Mul,
            BinOpKind::Divide => BinOp::Div,
        }
    }
}

impl From<RelOpKind> for BinOp {
    fn from(kind: RelOpKind) -> Self {
        match kind {
            RelOpKind::Eq => BinOp::Eq,
            RelOpKind::Ne => BinOp::Ne,
            RelOpKind::Lt => BinOp::Lt,
            RelOpKind::Le => BinOp::Le,
            RelOpKind::Gt => BinOp::Gt,
            RelOpKind::Ge => BinOp::Ge,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BinOp::Add => "ADD",
            BinOp::Sub => "SUB",
            BinOp::Mul => "MUL",
            BinOp::Div => "DIV",
            BinOp::Lt => "LT",
            BinOp::Le => "LE",
            BinOp::Gt => "GT",
            BinOp::Ge => "GE",
            BinOp::Eq => "EQ",
            BinOp::Ne => "NE",
        };
        write!(f, "{}", s)
    }
}

/// Operands are plain strings: variable names, literal text (string literals
/// keep their surrounding quotes), temporaries `_tN`, or labels `LN`.
#[derive(Clone, Debug, PartialEq)]
pub enum InstrKind {
    Assign { src: String, dst: String },
    Bin { op: BinOp, lhs: String, rhs: String, dst: String },
    Input { var: String },
    Output { value: String },
    Label { name: String },
    Jmp { target: String },
    Jz { cond: String, target: String },
    Jnz { cond: String, target: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub kind: InstrKind,
    pub line: usize,
}

impl Instruction {
    pub fn new(kind: InstrKind, line: usize) -> Self {
        Self { kind, line }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line {}: ", self.line)?;
        match &self.kind {
            InstrKind::Assign { src, dst } => write!(f, "ASSIGN {}, {}", src, dst),
            InstrKind::Bin { op, lhs, rhs, dst } => {
                write!(f, "{} {}, {}, {}", op, lhs, rhs, dst)
            }
            InstrKind::Input { var } => write!(f, "INPUT {}", var),
            InstrKind::Output { value } => write!(f, "OUTPUT {}", value),
            InstrKind::Label { name } => write!(f, "LABEL {}", name),
            InstrKind::Jmp { target } => write!(f, "JMP {}", target),
            InstrKind::Jz { cond, target } => write!(f, "JZ {}, {}", cond, target),
            InstrKind::Jnz { cond, target } => write!(f, "JNZ {}, {}", cond, target),
        }
    }
}
