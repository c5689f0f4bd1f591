//! Rill CLI
//!
//! Drives individual call sites and element stores from the command line.

use rill_dispatch::{LinkMode, Linker, LinkerConfig};
use rillc::commands::{build_elements, eval_operator};
use rillc::literal::parse_operands;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let trace = take_flag(&mut args, "--trace");
    rillc::init_tracing(trace);

    let Some(command) = args.first().cloned() else {
        print_usage();
        return;
    };

    match command.as_str() {
        "eval" => run_eval(&args[1..]),
        "elements" => {
            // `!key` deletes; everything else is stored.
            match build_elements(&args[1..]) {
                Ok(report) => println!("{report}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("Rill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_eval(args: &[String]) {
    let mut config = LinkerConfig::from_env();
    let mut times = 2;
    let mut positional = Vec::new();

    for arg in args {
        if arg == "--generic" {
            config.mode = LinkMode::GenericOnly;
        } else if let Some(n) = arg.strip_prefix("--times=") {
            match n.parse::<usize>() {
                Ok(n) if n > 0 => times = n,
                _ => {
                    eprintln!("error: --times expects a positive count, got '{n}'");
                    std::process::exit(1);
                }
            }
        } else {
            positional.push(arg.as_str());
        }
    }

    let Some((operator, operands)) = positional.split_first() else {
        eprintln!("Usage: rill eval <operator> <operand>... [--times=N] [--generic]");
        std::process::exit(1);
    };

    let operands = match parse_operands(operands) {
        Ok(values) => values,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    match eval_operator(&Linker::with_config(config), operator, &operands, times) {
        Ok(outcome) => {
            println!("{outcome}");
            if outcome.results.iter().any(Result::is_err) {
                std::process::exit(2);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Remove every occurrence of `flag`, reporting whether it was present.
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn print_usage() {
    println!("Rill adaptive dispatch driver");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <operator> <operand>...   Link a call site and invoke it");
    println!("  elements <key>...              Build an object and report its element store");
    println!("  help                           Show this help message");
    println!("  version                        Show version information");
    println!();
    println!("Eval options:");
    println!("  --times=<n>     Invoke the site n times (default: 2)");
    println!("  --generic       Link straight to generic targets");
    println!();
    println!("Operands:");
    println!("  12  -1.5  0x1f  NaN   numbers");
    println!("  7n  -0x10n            bigints");
    println!("  '\"text\"'              strings (quoted)");
    println!("  true  false  null  undefined");
    println!("  @identity  @this  @count  @Point  @Base   built-in functions");
    println!();
    println!("Elements:");
    println!("  <key>    store the key's position under <key>");
    println!("  !<key>   delete <key>");
    println!();
    println!("Global options:");
    println!("  --trace  Print linking decisions as span trees (or set RILL_LOG)");
    println!();
    println!("Environment:");
    println!("  RILL_LINK_MODE=adaptive|generic   Default link mode");
    println!("  RILL_LINK_DEPTH=<n>               Maximum nested first-use linkages");
    println!();
    println!("Examples:");
    println!("  rill eval add 1 2");
    println!("  rill eval sub 1 2n                # TypeError: cannot mix BigInt");
    println!("  rill eval concat \"'a'\" \"'b'\" \"'c'\"");
    println!("  rill eval construct @Point 1 2");
    println!("  rill elements 0 1 2 100000 name");
}
