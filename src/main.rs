use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_stdin::FileOrStdin;

use slcc::compile;

/// Compiles a source file and writes the compilation artifacts to a directory
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source file, or `-` to read from stdin
    input: FileOrStdin,

    /// Directory the artifacts are written into
    #[arg(short, long, default_value = "out")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let source = args.input.contents().context("failed to read the source")?;

    let result = compile(&source);

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    fs::write(args.output.join("tokens.txt"), &result.tokens)?;

    if result.errors.is_empty() {
        fs::write(args.output.join("errors.txt"), "No errors.\n")?;
    } else {
        let mut joined = result.errors.join("\n");
        joined.push('\n');
        fs::write(args.output.join("errors.txt"), joined)?;
        for error in &result.errors {
            eprintln!("{}", error);
        }
    }

    fs::write(args.output.join("ir.txt"), &result.ir)?;
    fs::write(args.output.join("optimized_ir.txt"), &result.optimized_ir)?;
    fs::write(args.output.join("c_code.txt"), &result.code)?;

    Ok(())
}
