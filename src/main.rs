// crex: evaluate C expression/declaration programs from the command line

use std::path::Path;
use std::process::exit;

use anyhow::Context;

use crex::interpreter::engine::{Interpreter, UndefinedPolicy};
use crex::memory::Environment;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("crex");

    let mut file = None;
    let mut policy = UndefinedPolicy::Strict;
    let mut dump_tokens = false;
    let mut dump_ast = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--permissive" => policy = UndefinedPolicy::Permissive,
            "--dump-tokens" => dump_tokens = true,
            "--dump-ast" => dump_ast = true,
            _ if arg.starts_with("--") => {
                eprintln!("Error: unknown option '{}'", arg);
                usage(program_name);
                exit(1);
            }
            path => file = Some(path.to_string()),
        }
    }

    let file = match file {
        Some(file) => file,
        None => {
            eprintln!("Error: No input file provided");
            usage(program_name);
            exit(1);
        }
    };

    if !Path::new(&file).exists() {
        eprintln!("Error: File '{}' not found", file);
        usage(program_name);
        exit(1);
    }

    let source = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read '{}'", file))?;

    let tokens = match crex::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    if dump_tokens {
        for token in &tokens {
            println!("{:?}", token);
        }
    }

    let program = match crex::parse(tokens) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    if dump_ast {
        for statement in &program.statements {
            println!("{:#?}", statement);
        }
    }

    let mut interpreter = Interpreter::with_env(Environment::default()).with_policy(policy);
    let value = match interpreter.run(&program) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    println!("Result: {}", value);

    let env = interpreter.into_env();
    let mut names: Vec<&String> = env.keys().collect();
    names.sort();
    for name in names {
        println!("{} = {}", name, env[name]);
    }

    Ok(())
}

fn usage(program_name: &str) {
    eprintln!();
    eprintln!(
        "Usage: {} <file> [--permissive] [--dump-tokens] [--dump-ast]",
        program_name
    );
    eprintln!();
    eprintln!("  --permissive   reads of unbound names bind them to 0 instead of failing");
    eprintln!("  --dump-tokens  print the token stream before parsing");
    eprintln!("  --dump-ast     print the parsed statements before evaluation");
}
