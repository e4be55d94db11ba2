use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_minilang"))
        .args(args)
        .env_remove("MINILANG_LOG_LEVEL")
        .output()
        .unwrap()
}

fn run_source(source: &str, extra: &[&str]) -> Output {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minilang.txt");
    fs::write(&path, source).unwrap();

    let path_str = path.to_str().unwrap();
    let mut args: Vec<&str> = extra.to_vec();
    args.push(path_str);
    run(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn valid_program_prints_tokens_and_derivation() {
    let output = run_source("int x;\nx = 2 * (x + 1);\nprint(x);\n", &[]);
    let text = stdout(&output);

    assert!(output.status.success());
    assert!(text.starts_with("Token stream:\n"));
    assert!(text.contains("(INT , int) (ID , x) (SEMICOLON , ;) (ID , x) (ASSIGN , =)"));
    assert!(text.contains("\nProgram parsed successfully.\n"));
    assert!(text.contains("\nLeftmost derivation:\n1. Program\n2. StatementList\n"));
    assert!(text.trim_end().ends_with("int id ; id = num * ( id + num ) ; print ( id ) ;"));
}

#[test]
fn lexical_error_exits_with_failure() {
    let output = run_source("x = 1 @ 2;", &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains(
        "Lexical error: Unexpected character '@' at line 1, column 7\nx = 1 @ 2;\n      ^\n"
    ));
    assert!(!text.contains("(EOF , )"));
}

#[test]
fn syntax_error_shows_stream_then_error() {
    let output = run_source("1 int;", &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("(NUMBER , 1) (INT , int) (SEMICOLON , ;) (EOF , )"));
    assert!(text.contains("Syntax error: Unexpected token '1'. Expected 'int', ID, or 'print'"));
    assert!(!text.contains("Leftmost derivation:"));
}

#[test]
fn empty_file_parses() {
    let output = run_source("", &[]);
    let text = stdout(&output);

    assert!(output.status.success());
    assert!(text.contains("(EOF , )"));
    assert!(text.ends_with("1. Program\n2. StatementList\n3. \n"));
}

#[test]
fn json_output_is_machine_readable() {
    let output = run_source("print(7);", &["--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(value["success"], true);
    assert_eq!(value["derivation"].as_array().unwrap().len(), 11);
    assert_eq!(value["file"]["line_count"], 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let output = run(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Error: File not found"));
}

#[test]
fn grammar_flag_lists_productions() {
    let output = run(&["--grammar"]);
    let text = stdout(&output);

    assert!(output.status.success());
    assert!(text.contains("Program       -> StatementList"));
    assert!(text.contains("FIRST(Factor) = { id, num, ( }"));
}

#[test]
fn help_flag() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("USAGE:"));
}
