use crate::parser::{Expr, Program, Stmt};

use super::{SymbolTable, VarType};

/// Walks the whole AST regardless of earlier errors so a single run surfaces
/// the complete diagnostic set.
pub struct SemanticVisitor {
    symbol_table: SymbolTable,
    errors: Vec<String>,
}

impl SemanticVisitor {
    pub fn new() -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            errors: vec![],
        }
    }

    pub fn analyze(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.visit_stmt(stmt);
        }
    }

    fn error(&mut self, line: usize, message: String) {
        self.errors.push(format!("Line {}: {}", line, message));
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, value, line } => {
                let ty = self.visit_expr(value);
                if let Some(info) = self.symbol_table.get(name) {
                    let declared = info.line_declared;
                    self.error(
                        *line,
                        format!(
                            "Variable '{}' redeclared (previously declared at line {}).",
                            name, declared
                        ),
                    );
                } else {
                    self.symbol_table.declare(name, ty, *line);
                }
            }
            Stmt::Input { name, line } => {
                // No input-type annotation exists, so an undeclared target is
                // implicitly declared as a number.
                if !self.symbol_table.is_declared(name) {
                    self.symbol_table.declare(name, VarType::Number, *line);
                }
            }
            Stmt::Output { value, .. } => {
                self.visit_expr(value);
            }
            Stmt::BinOp {
                left,
                right,
                result,
                line,
                ..
            } => self.visit_bin_op(left, right, result, *line),
            Stmt::If {
                condition,
                then_branch,
                else_if_branch,
                otherwise_branch,
                ..
            } => {
                self.visit_expr(condition);
                self.visit_stmt(then_branch);
                if let Some(stmt) = else_if_branch {
                    self.visit_stmt(stmt);
                }
                if let Some(stmt) = otherwise_branch {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Repeat {
                var,
                start,
                end,
                step,
                body,
                line,
            } => {
                if !self.symbol_table.is_declared(var) {
                    self.symbol_table.declare(var, VarType::Number, *line);
                }
                self.visit_expr(start);
                self.visit_expr(end);
                self.visit_expr(step);
                self.visit_stmt(body);
            }
            Stmt::RepeatUntil {
                condition, body, ..
            } => {
                self.visit_expr(condition);
                self.visit_stmt(body);
            }
        }
    }

    fn visit_bin_op(&mut self, left: &str, right: &str, result: &str, line: usize) {
        let mut left_ty = VarType::Unknown;
        let mut right_ty = VarType::Unknown;

        if !self.symbol_table.is_declared(left) {
            self.error(line, format!("Variable '{}' not declared.", left));
        } else {
            left_ty = self.symbol_table.type_of(left);
        }
        if !self.symbol_table.is_declared(right) {
            self.error(line, format!("Variable '{}' not declared.", right));
        } else {
            right_ty = self.symbol_table.type_of(right);
        }

        if left_ty != VarType::Number || right_ty != VarType::Number {
            self.error(
                line,
                format!(
                    "Cannot perform binary operation on types {} and {}.",
                    left_ty, right_ty
                ),
            );
        }

        if !self.symbol_table.is_declared(result) {
            self.symbol_table.declare(result, VarType::Number, line);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> VarType {
        match expr {
            Expr::Identifier { name, line } => {
                if !self.symbol_table.is_declared(name) {
                    self.error(*line, format!("Variable '{}' not declared.", name));
                    VarType::Unknown
                } else {
                    self.symbol_table.type_of(name)
                }
            }
            Expr::Number { .. } => VarType::Number,
            Expr::Str { .. } => VarType::Str,
            Expr::RelOp {
                op,
                left,
                right,
                line,
            } => {
                let left_ty = self.visit_expr(left);
                let right_ty = self.visit_expr(right);

                // Undeclared operands were already reported; skip the pair
                // check instead of piling a second error on the same spot.
                if left_ty != VarType::Unknown && right_ty != VarType::Unknown {
                    let ok = if op.is_ordering() {
                        left_ty == VarType::Number && right_ty == VarType::Number
                    } else {
                        (left_ty == VarType::Number && right_ty == VarType::Number)
                            || (left_ty == VarType::Str && right_ty == VarType::Str)
                    };
                    if !ok {
                        self.error(
                            *line,
                            format!("Cannot compare types {} and {} with '{}'.", left_ty, right_ty, op),
                        );
                    }
                }

                VarType::Boolean
            }
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }
}

impl Default for SemanticVisitor {
    fn default() -> Self {
        Self::new()
    }
}
