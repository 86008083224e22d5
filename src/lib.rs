pub mod analyzer;
pub mod codegen;
pub mod ir;
pub mod lexer;
pub mod optimizer;
pub mod parser;

use analyzer::SemanticVisitor;
use codegen::Codegen;
use ir::{Instruction, IrGenerator};
use lexer::{Lexer, TokenKind};
use parser::Parser;

/// Stands in for generated code whenever any diagnostics were produced.
pub const NO_CODE_PLACEHOLDER: &str = "// No C code generated due to errors.\n";

/// The textual artifacts of one compilation: a token listing, the collected
/// diagnostics (lexical, then syntax, then semantic), the IR and optimized-IR
/// listings, and the generated C source (or a placeholder on error).
#[derive(Clone, Debug)]
pub struct Compilation {
    pub tokens: String,
    pub errors: Vec<String>,
    pub ir: String,
    pub optimized_ir: String,
    pub code: String,
}

/// Runs the whole pipeline over one source text. Every stage rebuilds its
/// state from scratch, so repeated calls are independent. When diagnostics
/// exist, IR generation, optimization, and code generation are skipped.
pub fn compile(source: &str) -> Compilation {
    let tokens = Lexer::tokenize(source);

    let mut token_dump = String::new();
    let mut errors = vec![];
    for token in &tokens {
        token_dump.push_str(&token.to_string());
        token_dump.push('\n');
        if token.kind == TokenKind::Invalid {
            errors.push(format!(
                "Line {}: Invalid token '{}'.",
                token.line, token.lexeme
            ));
        }
    }

    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    errors.extend(parser.into_errors());

    let mut visitor = SemanticVisitor::new();
    visitor.analyze(&program);
    errors.extend(visitor.errors().iter().cloned());

    if !errors.is_empty() {
        return Compilation {
            tokens: token_dump,
            errors,
            ir: String::new(),
            optimized_ir: String::new(),
            code: NO_CODE_PLACEHOLDER.to_string(),
        };
    }

    let ir = IrGenerator::generate(&program);
    let optimized = optimizer::optimize(&ir);
    let code = Codegen::generate(&optimized);

    Compilation {
        tokens: token_dump,
        errors,
        ir: listing(&ir),
        optimized_ir: listing(&optimized),
        code,
    }
}

fn listing(ir: &[Instruction]) -> String {
    let mut out = String::new();
    for instr in ir {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}
