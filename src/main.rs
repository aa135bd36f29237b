use std::{env, fs::read_to_string, path::Path, process, time::Instant};

use interpreter::{format_error, lexer::lexer::Lexer, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args.first().map_or("interpreter", |arg| arg.as_str()));
        process::exit(2);
    }

    let file_path = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map_or_else(|| file_path.clone(), |name| name.to_string_lossy().into_owned());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            process::exit(2);
        }
    };

    let start = Instant::now();
    let (parser, program) = parse(Lexer::new(source.clone(), Some(file_name)));

    println!("Parsed in {:?}", start.elapsed());

    for stmt in &program {
        println!("{}", stmt);
    }

    if parser.errors().is_empty() {
        return;
    }

    for error in parser.errors() {
        eprint!("{}", format_error(error, &source));
    }

    eprintln!("{} error(s) found", parser.errors().len());
    process::exit(1);
}
