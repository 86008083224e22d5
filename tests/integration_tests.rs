use slcc::analyzer::SemanticVisitor;
use slcc::codegen::Codegen;
use slcc::ir::{BinOp, InstrKind, Instruction, IrGenerator};
use slcc::lexer::{Lexer, TokenKind};
use slcc::optimizer::optimize;
use slcc::parser::{Parser, Program};
use slcc::{compile, NO_CODE_PLACEHOLDER};

fn parse_source(input: &str) -> (Program, Vec<String>) {
    let tokens = Lexer::tokenize(input);
    let mut parser = Parser::new(tokens);
    let program = parser.parse();
    let errors = parser.into_errors();
    (program, errors)
}

fn analyze_source(input: &str) -> Vec<String> {
    let (program, parse_errors) = parse_source(input);
    assert!(parse_errors.is_empty(), "unexpected: {:?}", parse_errors);
    let mut visitor = SemanticVisitor::new();
    visitor.analyze(&program);
    visitor.errors().to_vec()
}

fn lower_source(input: &str) -> Vec<Instruction> {
    let (program, parse_errors) = parse_source(input);
    assert!(parse_errors.is_empty(), "unexpected: {:?}", parse_errors);
    IrGenerator::generate(&program)
}

fn assign(src: &str, dst: &str) -> Instruction {
    Instruction::new(
        InstrKind::Assign {
            src: src.to_string(),
            dst: dst.to_string(),
        },
        1,
    )
}

fn bin(op: BinOp, lhs: &str, rhs: &str, dst: &str) -> Instruction {
    Instruction::new(
        InstrKind::Bin {
            op,
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            dst: dst.to_string(),
        },
        1,
    )
}

#[test]
fn tokenize_is_total() {
    for input in ["", "   ", "@#$%", "\"unterminated", "! ! !", "let a be 5"] {
        let tokens = Lexer::tokenize(input);
        assert!(!tokens.is_empty());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfFile);
    }
}

#[test]
fn tokenize_classifies_operators() {
    let tokens = Lexer::tokenize("a = b == c <= d != e");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::RelOp,
            TokenKind::Identifier,
            TokenKind::RelOp,
            TokenKind::Identifier,
            TokenKind::RelOp,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(tokens[3].lexeme, "==");
    assert_eq!(tokens[5].lexeme, "<=");
    assert_eq!(tokens[7].lexeme, "!=");
}

#[test]
fn tokenize_end_of_line_keeps_previous_line_number() {
    let tokens = Lexer::tokenize("let a be 5\noutput a");
    let eol = tokens
        .iter()
        .find(|t| t.kind == TokenKind::EndOfLine)
        .unwrap();
    assert_eq!(eol.line, 1);
    assert_eq!(eol.column, 1);
    let output = tokens.iter().find(|t| t.kind == TokenKind::Output).unwrap();
    assert_eq!(output.line, 2);
}

#[test]
fn tokenize_marks_bad_input_invalid() {
    let tokens = Lexer::tokenize("\"open");
    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].lexeme, "open");

    let tokens = Lexer::tokenize("!x");
    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].lexeme, "!");
}

#[test]
fn parse_recovers_and_keeps_later_statements() {
    let (program, errors) = parse_source("let a be\nlet b be 2");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Line 1:"), "got: {}", errors[0]);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn parse_reports_missing_keywords_without_dropping_statement() {
    let (program, errors) = parse_source("add a and b store c");
    assert_eq!(errors, vec!["Line 1: Expected 'in'".to_string()]);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn parse_repeat_requires_from_or_until() {
    let (_, errors) = parse_source("repeat output a");
    assert!(errors
        .iter()
        .any(|e| e.contains("Expected 'from' or 'until' after 'repeat'.")));
}

#[test]
fn analyze_accepts_declared_variables() {
    let errors = analyze_source("let a be 5\nlet b be 3\nadd a and b store in c\noutput c");
    assert!(errors.is_empty(), "got: {:?}", errors);
}

#[test]
fn analyze_rejects_redeclaration() {
    let errors = analyze_source("let a be 1\nlet a be 2");
    assert_eq!(
        errors,
        vec!["Line 2: Variable 'a' redeclared (previously declared at line 1).".to_string()]
    );
}

#[test]
fn analyze_implicitly_declares_input_as_number() {
    let errors = analyze_source("input x\nlet y be 1\nadd x and y store in z");
    assert!(errors.is_empty(), "got: {:?}", errors);
}

#[test]
fn analyze_rejects_arithmetic_on_strings() {
    let errors = analyze_source("let s be \"hi\"\nlet n be 1\nadd s and n store in c");
    assert_eq!(
        errors,
        vec!["Line 3: Cannot perform binary operation on types STRING and NUMBER.".to_string()]
    );
}

#[test]
fn analyze_allows_string_equality_but_not_ordering() {
    let errors = analyze_source("let s be \"a\"\nlet t be \"b\"\nif s == t then output s");
    assert!(errors.is_empty(), "got: {:?}", errors);

    let errors = analyze_source("let s be \"a\"\nlet t be \"b\"\nif s < t then output s");
    assert_eq!(
        errors,
        vec!["Line 3: Cannot compare types STRING and STRING with '<'.".to_string()]
    );
}

#[test]
fn lower_counted_loop_shape() {
    let ir = lower_source("repeat from i=0 to 3 jump 1 output i");

    let le_count = ir
        .iter()
        .filter(|i| matches!(&i.kind, InstrKind::Bin { op: BinOp::Le, .. }))
        .count();
    assert_eq!(le_count, 1);

    let jz_targets: Vec<_> = ir
        .iter()
        .filter_map(|i| match &i.kind {
            InstrKind::Jz { target, .. } => Some(target.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(jz_targets, vec!["L1".to_string()]);

    let jmp_targets: Vec<_> = ir
        .iter()
        .filter_map(|i| match &i.kind {
            InstrKind::Jmp { target } => Some(target.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(jmp_targets, vec!["L0".to_string()]);

    let labels: Vec<_> = ir
        .iter()
        .filter_map(|i| match &i.kind {
            InstrKind::Label { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["L0", "L1"]);
}

#[test]
fn lower_until_loop_exits_when_condition_holds() {
    let ir = lower_source("let a be 0\nlet b be 10\nrepeat until a > b output a");
    assert!(ir
        .iter()
        .any(|i| matches!(&i.kind, InstrKind::Jnz { .. })));
    assert!(!ir.iter().any(|i| matches!(&i.kind, InstrKind::Jz { .. })));
}

#[test]
fn lower_string_literals_keep_quotes() {
    let ir = lower_source("output \"hello\"");
    let InstrKind::Output { value } = &ir[0].kind else {
        panic!();
    };
    assert_eq!(value, "\"hello\"");
}

#[test]
fn optimize_folds_arithmetic_constants() {
    let ir = vec![bin(BinOp::Add, "2", "3", "x")];
    assert_eq!(optimize(&ir), vec![assign("5", "x")]);
}

#[test]
fn optimize_folds_division_by_zero_to_zero() {
    let ir = vec![bin(BinOp::Div, "10", "0", "y")];
    assert_eq!(optimize(&ir), vec![assign("0", "y")]);
}

#[test]
fn optimize_folds_comparisons_to_flags() {
    let ir = vec![bin(BinOp::Lt, "2", "3", "c"), bin(BinOp::Eq, "1", "2", "d")];
    assert_eq!(optimize(&ir), vec![assign("1", "c"), assign("0", "d")]);
}

#[test]
fn optimize_keeps_variable_operands() {
    let ir = vec![bin(BinOp::Add, "a", "3", "x")];
    assert_eq!(optimize(&ir), ir);
}

#[test]
fn optimize_removes_self_assignment() {
    let ir = vec![assign("a", "a")];
    assert!(optimize(&ir).is_empty());
}

#[test]
fn optimize_collapses_consecutive_assignments_from_same_source() {
    let ir = vec![assign("v", "x"), assign("v", "x")];
    assert_eq!(optimize(&ir), vec![assign("v", "x")]);

    let ir = vec![assign("v", "x"), assign("v", "y")];
    assert_eq!(optimize(&ir), vec![assign("v", "x")]);
}

#[test]
fn optimize_is_idempotent() {
    let ir = vec![
        bin(BinOp::Add, "2", "3", "x"),
        assign("a", "a"),
        bin(BinOp::Mul, "a", "b", "c"),
        assign("c", "d"),
        assign("c", "e"),
    ];
    let once = optimize(&ir);
    assert_eq!(optimize(&once), once);
}

#[test]
fn optimize_does_not_mutate_its_input() {
    let ir = vec![bin(BinOp::Add, "2", "3", "x"), assign("a", "a")];
    let before = ir.clone();
    let _ = optimize(&ir);
    assert_eq!(ir, before);
}

#[test]
fn codegen_infers_integer_arithmetic() {
    let ir = lower_source("let a be 5\nlet b be 3\nadd a and b store in c\noutput c");
    let code = Codegen::generate(&ir);
    assert!(code.contains("int a = 0;"), "got:\n{}", code);
    assert!(code.contains("int c = 0;"), "got:\n{}", code);
    assert!(code.contains("c = a + b;"), "got:\n{}", code);
    assert!(code.contains("printf(\"%d\\n\", c);"), "got:\n{}", code);
}

#[test]
fn codegen_promotes_to_double() {
    let ir = lower_source("let a be 1\nlet b be 2.5\nadd a and b store in c\noutput c");
    let code = Codegen::generate(&ir);
    assert!(code.contains("int a = 0;"), "got:\n{}", code);
    assert!(code.contains("double b = 0;"), "got:\n{}", code);
    assert!(code.contains("double c = 0;"), "got:\n{}", code);
    assert!(code.contains("printf(\"%lf\\n\", c);"), "got:\n{}", code);
}

#[test]
fn codegen_handles_string_variables() {
    let ir = lower_source("let s be \"hello\"\noutput s");
    let code = Codegen::generate(&ir);
    assert!(code.contains("#include <string.h>"), "got:\n{}", code);
    assert!(code.contains("char s[256] = \"\";"), "got:\n{}", code);
    assert!(code.contains("strcpy(s, \"hello\");"), "got:\n{}", code);
    assert!(code.contains("printf(\"%s\\n\", s);"), "got:\n{}", code);
}

#[test]
fn codegen_defaults_input_to_double() {
    let ir = lower_source("input x\noutput x");
    let code = Codegen::generate(&ir);
    assert!(code.contains("double x = 0;"), "got:\n{}", code);
    assert!(code.contains("printf(\"Enter value for x: \");"), "got:\n{}", code);
    assert!(code.contains("scanf(\"%lf\", &x);"), "got:\n{}", code);
}

#[test]
fn codegen_emits_quoted_output_verbatim() {
    let ir = lower_source("output \"hello world\"");
    let code = Codegen::generate(&ir);
    assert!(code.contains("printf(\"hello world\");"), "got:\n{}", code);
}

#[test]
fn codegen_translates_control_flow_to_gotos() {
    let ir = lower_source("let a be 1\nlet b be 2\nif a < b then output a otherwise output b");
    let code = Codegen::generate(&ir);
    assert!(code.contains("if (!_t0) goto L1;"), "got:\n{}", code);
    assert!(code.contains("goto L2;"), "got:\n{}", code);
    assert!(code.contains("L1:"), "got:\n{}", code);
    assert!(code.contains("L2:"), "got:\n{}", code);
}

#[test]
fn compile_clean_program_end_to_end() {
    let result = compile("let a be 5\nlet b be 3\nadd a and b store in c\noutput c\n");
    assert!(result.errors.is_empty(), "got: {:?}", result.errors);
    assert!(result.ir.contains("Line 3: ADD a, b, c"), "got:\n{}", result.ir);
    assert!(
        result.code.contains("int c = 0;") || result.code.contains("double c = 0;"),
        "got:\n{}",
        result.code
    );
    assert!(result.code.contains("printf("), "got:\n{}", result.code);
    assert!(result.tokens.contains("Type: LET, Lexeme: let, Line: 1, Col: 1"));
}

#[test]
fn compile_undeclared_output_reports_one_error_and_no_code() {
    let result = compile("output z");
    assert_eq!(
        result.errors,
        vec!["Line 1: Variable 'z' not declared.".to_string()]
    );
    assert_eq!(result.code, NO_CODE_PLACEHOLDER);
    assert!(result.ir.is_empty());
    assert!(result.optimized_ir.is_empty());
}

#[test]
fn compile_reports_lexical_errors_first() {
    let result = compile("@\noutput z");
    assert!(result.errors.len() >= 2, "got: {:?}", result.errors);
    assert_eq!(result.errors[0], "Line 1: Invalid token '@'.");
    assert_eq!(result.code, NO_CODE_PLACEHOLDER);
}

#[test]
fn compile_folds_literal_comparison_in_optimized_ir() {
    let result = compile("let x be 9\nif 2 < 3 then output x");
    assert!(result.errors.is_empty(), "got: {:?}", result.errors);
    assert!(result.ir.contains("LT 2, 3, _t0"), "got:\n{}", result.ir);
    assert!(
        result.optimized_ir.contains("ASSIGN 1, _t0"),
        "got:\n{}",
        result.optimized_ir
    );
}

#[test]
fn compile_is_independent_across_calls() {
    let first = compile("let a be 1\nif a == 1 then output a");
    let second = compile("let a be 1\nif a == 1 then output a");
    assert_eq!(first.ir, second.ir);
    assert_eq!(first.optimized_ir, second.optimized_ir);
    assert_eq!(first.code, second.code);
}
