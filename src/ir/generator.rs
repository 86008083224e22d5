use crate::parser::{Expr, Program, Stmt};

use super::{BinOp, InstrKind, Instruction};

/// Lowers a validated AST into flat three-address code. Temporaries and
/// labels draw from one shared counter, reset for every generation.
#[derive(Debug)]
pub struct IrGenerator {
    ir: Vec<Instruction>,
    counter: usize,
}

impl IrGenerator {
    fn new() -> Self {
        Self {
            ir: vec![],
            counter: 0,
        }
    }

    pub fn generate(program: &Program) -> Vec<Instruction> {
        let mut gen = IrGenerator::new();
        for stmt in &program.statements {
            gen.gen_stmt(stmt);
        }

        gen.ir
    }

    fn new_temp(&mut self) -> String {
        let t = format!("_t{}", self.counter);
        self.counter += 1;
        t
    }

    fn new_label(&mut self) -> String {
        let l = format!("L{}", self.counter);
        self.counter += 1;
        l
    }

    fn push(&mut self, kind: InstrKind, line: usize) {
        self.ir.push(Instruction::new(kind, line));
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, value, line } => {
                let src = self.gen_expr(value);
                self.push(
                    InstrKind::Assign {
                        src,
                        dst: name.clone(),
                    },
                    *line,
                );
            }
            Stmt::Input { name, line } => {
                self.push(InstrKind::Input { var: name.clone() }, *line);
            }
            Stmt::Output { value, line } => {
                let value = self.gen_expr(value);
                self.push(InstrKind::Output { value }, *line);
            }
            Stmt::BinOp {
                op,
                left,
                right,
                result,
                line,
            } => {
                self.push(
                    InstrKind::Bin {
                        op: BinOp::from(*op),
                        lhs: left.clone(),
                        rhs: right.clone(),
                        dst: result.clone(),
                    },
                    *line,
                );
            }
            Stmt::If {
                condition,
                then_branch,
                otherwise_branch,
                line,
                ..
            } => self.gen_if(condition, then_branch, otherwise_branch.as_deref(), *line),
            Stmt::Repeat {
                var,
                start,
                end,
                step,
                body,
                line,
            } => self.gen_repeat(var, start, end, step, body, *line),
            Stmt::RepeatUntil {
                condition,
                body,
                line,
            } => self.gen_repeat_until(condition, body, *line),
        }
    }

    fn gen_if(&mut self, condition: &Expr, then_branch: &Stmt, otherwise: Option<&Stmt>, line: usize) {
        let cond = self.gen_expr(condition);
        let label_else = self.new_label();
        let label_end = self.new_label();

        self.push(
            InstrKind::Jz {
                cond,
                target: label_else.clone(),
            },
            line,
        );
        self.gen_stmt(then_branch);
        self.push(
            InstrKind::Jmp {
                target: label_end.clone(),
            },
            line,
        );

        self.push(InstrKind::Label { name: label_else }, line);
        if let Some(stmt) = otherwise {
            self.gen_stmt(stmt);
        }
        self.push(InstrKind::Label { name: label_end }, line);
    }

    /// Ascending counted loop with an inclusive upper bound.
    fn gen_repeat(
        &mut self,
        var: &str,
        start: &Expr,
        end: &Expr,
        step: &Expr,
        body: &Stmt,
        line: usize,
    ) {
        let start_val = self.gen_expr(start);
        let end_val = self.gen_expr(end);
        let step_val = self.gen_expr(step);

        self.push(
            InstrKind::Assign {
                src: start_val,
                dst: var.to_string(),
            },
            line,
        );

        let label_start = self.new_label();
        let label_end = self.new_label();
        self.push(
            InstrKind::Label {
                name: label_start.clone(),
            },
            line,
        );

        let cond_temp = self.new_temp();
        self.push(
            InstrKind::Bin {
                op: BinOp::Le,
                lhs: var.to_string(),
                rhs: end_val,
                dst: cond_temp.clone(),
            },
            line,
        );
        self.push(
            InstrKind::Jz {
                cond: cond_temp,
                target: label_end.clone(),
            },
            line,
        );

        self.gen_stmt(body);

        let inc_temp = self.new_temp();
        self.push(
            InstrKind::Bin {
                op: BinOp::Add,
                lhs: var.to_string(),
                rhs: step_val,
                dst: inc_temp.clone(),
            },
            line,
        );
        self.push(
            InstrKind::Assign {
                src: inc_temp,
                dst: var.to_string(),
            },
            line,
        );

        self.push(InstrKind::Jmp { target: label_start }, line);
        self.push(InstrKind::Label { name: label_end }, line);
    }

    /// The loop exits once the condition becomes true: JNZ out, not JZ.
    fn gen_repeat_until(&mut self, condition: &Expr, body: &Stmt, line: usize) {
        let label_start = self.new_label();
        let label_end = self.new_label();
        self.push(
            InstrKind::Label {
                name: label_start.clone(),
            },
            line,
        );

        let cond = self.gen_expr(condition);
        self.push(
            InstrKind::Jnz {
                cond,
                target: label_end.clone(),
            },
            line,
        );

        self.gen_stmt(body);

        self.push(InstrKind::Jmp { target: label_start }, line);
        self.push(InstrKind::Label { name: label_end }, line);
    }

    /// Returns the operand naming the expression's value; relational
    /// expressions materialize into a fresh temporary.
    fn gen_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Identifier { name, .. } => name.clone(),
            Expr::Number { value, .. } => value.clone(),
            Expr::Str { value, .. } => format!("\"{}\"", value),
            Expr::RelOp {
                op,
                left,
                right,
                line,
            } => {
                let lhs = self.gen_expr(left);
                let rhs = self.gen_expr(right);
                let temp = self.new_temp();
                self.push(
                    InstrKind::Bin {
                        op: BinOp::from(*op),
                        lhs,
                        rhs,
                        dst: temp.clone(),
                    },
                    *line,
                );
                temp
            }
        }
    }
}
