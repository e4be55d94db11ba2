use minilang_compiler::config::compile_time::file_processing::DEFAULT_SOURCE_FILE;
use minilang_compiler::{file_processor, grammar, logging, pipeline};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Run,
    Help,
    Grammar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    json: bool,
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = logging::init_global_logging() {
        eprintln!(
            "[ERROR] {} - {}",
            logging::codes::system::INITIALIZATION_FAILURE.as_str(),
            e
        );
        std::process::exit(1);
    }

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("minilang");
    let options = parse_options(args.get(1..).unwrap_or_default());

    match options.command {
        Command::Help => {
            print_help(program_name);
            return Ok(());
        }
        Command::Grammar => {
            print_grammar();
            return Ok(());
        }
        Command::Run => {}
    }

    let Some(input_path) = resolve_input(options.input, program_name) else {
        std::process::exit(1);
    };

    let outcome = pipeline::process_file(&input_path);

    if options.json {
        println!("{}", pipeline::PipelineOutput::new(&outcome).to_json()?);
    } else {
        print!("{}", pipeline::render_text(&outcome));
    }

    if outcome.is_err() {
        std::process::exit(1);
    }

    Ok(())
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        command: Command::Run,
        json: false,
        input: None,
    };

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => options.command = Command::Help,
            "--grammar" => {
                if options.command == Command::Run {
                    options.command = Command::Grammar;
                }
            }
            "--json" => options.json = true,
            flag if flag.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", flag);
            }
            path => {
                if options.input.is_some() {
                    eprintln!("Warning: Extra argument '{}' ignored", path);
                } else {
                    options.input = Some(PathBuf::from(path));
                }
            }
        }
    }

    options
}

/// Explicit argument first, else the default file next to the executable
fn resolve_input(explicit: Option<PathBuf>, program_name: &str) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }

    match file_processor::default_source_path() {
        Some(default_path) if default_path.is_file() => Some(default_path),
        default_path => {
            let shown = default_path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| DEFAULT_SOURCE_FILE.to_string());
            eprintln!(
                "No input file specified and default '{}' not found.",
                shown
            );
            eprintln!(
                "Please create '{}' next to the {} executable with your minilang program",
                DEFAULT_SOURCE_FILE, program_name
            );
            eprintln!("or run: {} <path_to_minilang_file>", program_name);
            None
        }
    }
}

fn print_help(program_name: &str) {
    println!("minilang v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes and parses a minilang program, printing its leftmost derivation");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [FILE]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!(
        "    [FILE]    Source file (default: {} next to the executable)",
        DEFAULT_SOURCE_FILE
    );
    println!();
    println!("OPTIONS:");
    println!("    --help       Show this help message");
    println!("    --grammar    Print the grammar and its FIRST sets");
    println!("    --json       Print the token stream and derivation as JSON");
    println!();
    println!("EXIT STATUS:");
    println!("    0 on success, 1 on a file, lexical or syntax error");
}

fn print_grammar() {
    println!("{}", grammar::grammar_listing());
    println!();
    for nonterminal in [
        grammar::Nonterminal::StatementList,
        grammar::Nonterminal::Statement,
        grammar::Nonterminal::Factor,
    ] {
        println!("{}", grammar::describe_first_set(nonterminal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = parse_options(&[]);
        assert_eq!(options.command, Command::Run);
        assert!(!options.json);
        assert_eq!(options.input, None);
    }

    #[test]
    fn test_parse_options_file_and_json() {
        let options = parse_options(&args(&["--json", "prog.txt", "extra.txt"]));
        assert_eq!(options.command, Command::Run);
        assert!(options.json);
        assert_eq!(options.input, Some(PathBuf::from("prog.txt")));
    }

    #[test]
    fn test_help_wins_over_grammar() {
        let options = parse_options(&args(&["--grammar", "--help"]));
        assert_eq!(options.command, Command::Help);

        let options = parse_options(&args(&["--grammar", "--verbose"]));
        assert_eq!(options.command, Command::Grammar);
    }

    #[test]
    fn test_explicit_input_is_used_as_given() {
        let path = PathBuf::from("does/not/exist.txt");
        assert_eq!(resolve_input(Some(path.clone()), "minilang"), Some(path));
    }
}
