//! CLI that compiles accumulator scripts to C source.

use std::fs;
use std::process::ExitCode;

use calcc::Options;

fn usage() -> ExitCode {
    eprintln!("Usage: calcc <input> [-o <output>] [--no-opt] [--emit-tokens]");
    eprintln!("       calcc check <input>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o <output>     Write the C program to <output> instead of stdout");
    eprintln!("  --no-opt        Skip dead-code elimination and strength reduction");
    eprintln!("  --emit-tokens   Print the final token stream to stderr");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  calcc sum.calc -o sum.c");
    eprintln!("  calcc check sum.calc");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        return usage();
    }

    let check_only = args[0] == "check";
    let mut input = None;
    let mut output = None;
    let mut options = Options::new();
    let mut emit_tokens = false;

    let mut rest = args.iter().skip(usize::from(check_only));
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-o" => match rest.next() {
                Some(path) => output = Some(path.clone()),
                None => {
                    eprintln!("Error: -o needs a file name");
                    return ExitCode::from(2);
                }
            },
            "--no-opt" => options = options.optimize(false),
            "--emit-tokens" => emit_tokens = true,
            _ if input.is_none() => input = Some(arg.clone()),
            _ => {
                eprintln!("Error: unexpected argument: {arg}");
                return ExitCode::from(2);
            }
        }
    }

    let Some(path) = input else {
        eprintln!("Error: no input file specified");
        return ExitCode::from(2);
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let out = calcc::compile_with(&content, options);
    if !out.ok {
        eprintln!("{path}: empty input file");
        return ExitCode::FAILURE;
    }

    if emit_tokens {
        for token in &out.tokens {
            eprintln!("{token}");
        }
    }
    for diagnostic in &out.diagnostics {
        eprintln!("{path}:{diagnostic}");
    }

    if check_only {
        let errors = out
            .diagnostics
            .iter()
            .filter(|d| d.severity == calcc::Severity::Error)
            .count();
        return if errors == 0 {
            eprintln!("{path}: valid");
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match output {
        Some(target) => {
            if let Err(e) = fs::write(&target, &out.program) {
                eprintln!("{target}: {e}");
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", out.program),
    }

    ExitCode::SUCCESS
}
