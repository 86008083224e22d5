//! Emits the final C translation unit from optimized IR. A first sweep
//! infers one storage type per variable from the shapes of the operands it
//! is defined from; a second sweep emits one statement per instruction.

use std::collections::HashMap;
use std::fmt::Write;

use crate::ir::{InstrKind, Instruction};

/// Storage types, ordered by promotion rank: a variable that ever holds a
/// string stays a string, and one that ever holds a fractional value stays
/// floating-point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum VarKind {
    Int,
    Double,
    Str,
}

/// Classifies a literal operand by shape; variables classify as None.
fn classify(operand: &str) -> Option<VarKind> {
    if operand.starts_with('"') {
        Some(VarKind::Str)
    } else if operand.parse::<i64>().is_ok() {
        Some(VarKind::Int)
    } else if operand.parse::<f64>().is_ok() {
        Some(VarKind::Double)
    } else {
        None
    }
}

pub struct Codegen {
    kinds: HashMap<String, Option<VarKind>>,
    order: Vec<String>,
}

impl Codegen {
    fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            order: vec![],
        }
    }

    pub fn generate(ir: &[Instruction]) -> String {
        let mut gen = Codegen::new();
        gen.infer_kinds(ir);
        gen.emit(ir)
    }

    fn operand_kind(&self, operand: &str) -> Option<VarKind> {
        classify(operand).or_else(|| self.kinds.get(operand).copied().flatten())
    }

    /// Unifies a variable's kind with new evidence, keeping the higher
    /// promotion rank. `None` evidence still records the definition so the
    /// variable gets declared.
    fn record(&mut self, var: &str, kind: Option<VarKind>) {
        if !self.kinds.contains_key(var) {
            self.order.push(var.to_string());
        }
        let entry = self.kinds.entry(var.to_string()).or_insert(None);
        *entry = match (*entry, kind) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        };
    }

    fn infer_kinds(&mut self, ir: &[Instruction]) {
        for instr in ir {
            match &instr.kind {
                InstrKind::Assign { src, dst } => {
                    let kind = self.operand_kind(src);
                    self.record(dst, kind);
                }
                InstrKind::Bin { op, lhs, rhs, dst } => {
                    if op.is_comparison() {
                        self.record(dst, Some(VarKind::Int));
                    } else {
                        let lhs_kind = self.operand_kind(lhs);
                        let rhs_kind = self.operand_kind(rhs);
                        self.record(dst, lhs_kind);
                        self.record(dst, rhs_kind);
                    }
                }
                InstrKind::Input { var } => {
                    self.record(var, None);
                }
                _ => (),
            }
        }
    }

    /// A variable with no usable evidence defaults to floating-point.
    fn kind_of(&self, var: &str) -> VarKind {
        self.kinds
            .get(var)
            .copied()
            .flatten()
            .unwrap_or(VarKind::Double)
    }

    fn value_kind(&self, operand: &str) -> VarKind {
        self.operand_kind(operand).unwrap_or(VarKind::Double)
    }

    fn format_spec(kind: VarKind) -> &'static str {
        match kind {
            VarKind::Int => "%d",
            VarKind::Double => "%lf",
            VarKind::Str => "%s",
        }
    }

    fn emit(&self, ir: &[Instruction]) -> String {
        let mut out = String::new();
        let has_strings = self
            .order
            .iter()
            .any(|var| self.kind_of(var) == VarKind::Str);

        out.push_str("#include <stdio.h>\n");
        if has_strings {
            out.push_str("#include <string.h>\n");
        }
        out.push_str("\nint main() {\n");

        for var in &self.order {
            let _ = match self.kind_of(var) {
                VarKind::Int => writeln!(out, "    int {} = 0;", var),
                VarKind::Double => writeln!(out, "    double {} = 0;", var),
                VarKind::Str => writeln!(out, "    char {}[256] = \"\";", var),
            };
        }

        for instr in ir {
            self.emit_instr(&mut out, instr);
        }

        out.push_str("    return 0;\n}\n");
        out
    }

    fn emit_instr(&self, out: &mut String, instr: &Instruction) {
        let _ = match &instr.kind {
            InstrKind::Assign { src, dst } => {
                if self.kind_of(dst) == VarKind::Str {
                    writeln!(out, "    strcpy({}, {});", dst, src)
                } else {
                    writeln!(out, "    {} = {};", dst, src)
                }
            }
            InstrKind::Bin { op, lhs, rhs, dst } => {
                if op.is_comparison() {
                    writeln!(out, "    {} = ({} {} {});", dst, lhs, op.c_op(), rhs)
                } else {
                    writeln!(out, "    {} = {} {} {};", dst, lhs, op.c_op(), rhs)
                }
            }
            InstrKind::Input { var } => {
                let _ = writeln!(out, "    printf(\"Enter value for {}: \");", var);
                match self.kind_of(var) {
                    VarKind::Int => writeln!(out, "    scanf(\"%d\", &{});", var),
                    VarKind::Double => writeln!(out, "    scanf(\"%lf\", &{});", var),
                    VarKind::Str => writeln!(out, "    scanf(\"%255s\", {});", var),
                }
            }
            InstrKind::Output { value } => {
                if value.starts_with('"') {
                    writeln!(out, "    printf({});", value)
                } else {
                    let spec = Self::format_spec(self.value_kind(value));
                    writeln!(out, "    printf(\"{}\\n\", {});", spec, value)
                }
            }
            InstrKind::Label { name } => writeln!(out, "{}:", name),
            InstrKind::Jmp { target } => writeln!(out, "    goto {};", target),
            InstrKind::Jz { cond, target } => {
                writeln!(out, "    if (!{}) goto {};", cond, target)
            }
            InstrKind::Jnz { cond, target } => {
                writeln!(out, "    if ({}) goto {};", cond, target)
            }
        };
    }
}
