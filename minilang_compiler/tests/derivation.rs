use assert_matches::assert_matches;
use minilang_compiler::config::runtime::SyntaxPreferences;
use minilang_compiler::grammar::{Nonterminal, Terminal};
use minilang_compiler::syntax::MinilangParser;
use minilang_compiler::{parse_program, process_source, tokenize, PipelineError, SyntaxError};

const PROGRAMS: &[&str] = &[
    "",
    "int x;",
    "int x ; x = 1 + 2 * 3 ; print ( x ) ;",
    "a = b - c - d;",
    "print(((n)));",
    "int total;\ntotal = (a + 12) * b / 4 - 1;\nprint(total);",
];

fn is_nonterminal(word: &str) -> bool {
    Nonterminal::ALL.iter().any(|nt| nt.as_str() == word)
}

#[test]
fn each_form_rewrites_the_leftmost_nonterminal() {
    for source in PROGRAMS {
        let log = parse_program(tokenize(source).unwrap()).unwrap();
        let entries = log.entries();

        for pair in entries.windows(2) {
            let before: Vec<&str> = pair[0].split_whitespace().collect();
            let after: Vec<&str> = pair[1].split_whitespace().collect();

            let leftmost = before
                .iter()
                .position(|w| is_nonterminal(w))
                .unwrap_or_else(|| panic!("no nonterminal left in '{}'", pair[0]));

            // Everything before the leftmost nonterminal is unchanged
            assert_eq!(before[..leftmost], after[..leftmost], "in {:?}", source);

            // and so is everything after it
            let tail = before.len() - leftmost - 1;
            assert_eq!(
                before[before.len() - tail..],
                after[after.len() - tail..],
                "in {:?}",
                source
            );
        }
    }
}

#[test]
fn final_form_spells_the_consumed_tokens() {
    for source in PROGRAMS {
        let tokens = tokenize(source).unwrap();
        let spelled: Vec<&str> = tokens
            .tokens()
            .iter()
            .filter_map(|t| Terminal::from_kind(t.kind))
            .map(Terminal::as_str)
            .collect();

        let log = parse_program(tokens).unwrap();
        assert_eq!(log.last(), Some(spelled.join(" ").as_str()), "in {:?}", source);
    }
}

#[test]
fn recorded_steps_replay_to_the_log() {
    let preferences = SyntaxPreferences {
        trace_productions: false,
        verify_leftmost: false,
    };

    for source in PROGRAMS {
        let tokens = tokenize(source).unwrap();
        let recorder = MinilangParser::with_preferences(tokens, preferences.clone())
            .parse_recorded()
            .unwrap();

        assert!(recorder.verify_leftmost().is_ok(), "in {:?}", source);
        assert!(recorder.is_complete());
    }
}

#[test]
fn empty_source_derivation() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);

    let log = parse_program(tokens).unwrap();
    assert_eq!(log.entries(), ["Program", "StatementList", ""]);
}

#[test]
fn first_error_aborts_the_run() {
    for (source, expected) in [
        ("int 5;", "Expected ID. Got token '5'"),
        ("print x;", "Expected LPAREN. Got token 'x'"),
        ("x = 1 +;", "Expected ID, NUMBER, or '('. Got token ';'"),
        ("x = 1", "Expected SEMICOLON. Got token ''"),
        ("int x; )", "Unexpected token ')'. Expected 'int', ID, or 'print'"),
    ] {
        let error = process_source(source).unwrap_err();
        assert_matches!(error, PipelineError::SyntaxAnalysis { .. });
        assert_eq!(error.detail(), expected, "in {:?}", source);
    }
}

#[test]
fn keywords_need_a_word_boundary() {
    let log = process_source("printer = integer;").unwrap().derivation;
    assert_eq!(log.last(), Some("id = id ;"));

    assert_matches!(
        parse_program(tokenize("int1 = 2;").unwrap()),
        Ok(_)
    );
    assert_matches!(
        parse_program(tokenize("print;").unwrap()),
        Err(SyntaxError::UnexpectedToken { .. })
    );
}
