use std::fs;
use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;
use lisp_calc::evaluate;
use log::debug;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluates a prefix arithmetic expression read from a file")]
struct Args {
    /// Path to the expression file
    filename: Option<PathBuf>,
}

fn main() {
    pretty_env_logger::init();

    let args = Args::parse();

    let Some(filename) = args.filename else {
        let _ = Args::command().print_help();
        std::process::exit(0);
    };

    let source = match fs::read_to_string(&filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let parser = lisp_calc::Parser::new(filename.to_str(), &source);
    let statement = match parser.parse() {
        Ok(statement) => statement,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };
    debug!("parsed {statement}");

    let result = match evaluate(&statement) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(3);
        }
    };

    println!("Result: {result:.4}");
}
