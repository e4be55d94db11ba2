//! The minilang production table and the sets derived from it
//!
//! The grammar is LL(1): every choice is decided by one token of lookahead.
//! FIRST sets and nullability are computed from the table once and cached.

use super::symbols::{Nonterminal, Symbol, Terminal};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use super::symbols::{Nonterminal as N, Terminal as T};

/// `lhs -> rhs`; an empty `rhs` is an ε-production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Nonterminal,
    pub rhs: &'static [Symbol],
}

impl Production {
    pub const fn new(lhs: Nonterminal, rhs: &'static [Symbol]) -> Self {
        Self { lhs, rhs }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, render_rhs(self.rhs))
    }
}

impl Serialize for Production {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn render_rhs(rhs: &[Symbol]) -> String {
    if rhs.is_empty() {
        return "ε".to_string();
    }
    rhs.iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub const PROGRAM: Production =
    Production::new(N::Program, &[Symbol::Nonterminal(N::StatementList)]);

pub const STATEMENT_LIST: Production = Production::new(
    N::StatementList,
    &[
        Symbol::Nonterminal(N::Statement),
        Symbol::Nonterminal(N::StatementList),
    ],
);
pub const STATEMENT_LIST_EMPTY: Production = Production::new(N::StatementList, &[]);

pub const STATEMENT_DECLARATION: Production =
    Production::new(N::Statement, &[Symbol::Nonterminal(N::Declaration)]);
pub const STATEMENT_ASSIGNMENT: Production =
    Production::new(N::Statement, &[Symbol::Nonterminal(N::Assignment)]);
pub const STATEMENT_PRINT: Production =
    Production::new(N::Statement, &[Symbol::Nonterminal(N::PrintStmt)]);

pub const DECLARATION: Production = Production::new(
    N::Declaration,
    &[
        Symbol::Terminal(T::Int),
        Symbol::Terminal(T::Id),
        Symbol::Terminal(T::Semicolon),
    ],
);

pub const ASSIGNMENT: Production = Production::new(
    N::Assignment,
    &[
        Symbol::Terminal(T::Id),
        Symbol::Terminal(T::Assign),
        Symbol::Nonterminal(N::Expr),
        Symbol::Terminal(T::Semicolon),
    ],
);

pub const PRINT_STMT: Production = Production::new(
    N::PrintStmt,
    &[
        Symbol::Terminal(T::Print),
        Symbol::Terminal(T::LParen),
        Symbol::Nonterminal(N::Expr),
        Symbol::Terminal(T::RParen),
        Symbol::Terminal(T::Semicolon),
    ],
);

pub const EXPR: Production =
    Production::new(N::Expr, &[Symbol::Nonterminal(N::Term), Symbol::Nonterminal(N::ExprPrime)]);

pub const EXPR_PRIME_PLUS: Production = Production::new(
    N::ExprPrime,
    &[
        Symbol::Terminal(T::Plus),
        Symbol::Nonterminal(N::Term),
        Symbol::Nonterminal(N::ExprPrime),
    ],
);
pub const EXPR_PRIME_MINUS: Production = Production::new(
    N::ExprPrime,
    &[
        Symbol::Terminal(T::Minus),
        Symbol::Nonterminal(N::Term),
        Symbol::Nonterminal(N::ExprPrime),
    ],
);
pub const EXPR_PRIME_EMPTY: Production = Production::new(N::ExprPrime, &[]);

pub const TERM: Production =
    Production::new(N::Term, &[Symbol::Nonterminal(N::Factor), Symbol::Nonterminal(N::TermPrime)]);

pub const TERM_PRIME_MULT: Production = Production::new(
    N::TermPrime,
    &[
        Symbol::Terminal(T::Mult),
        Symbol::Nonterminal(N::Factor),
        Symbol::Nonterminal(N::TermPrime),
    ],
);
pub const TERM_PRIME_DIV: Production = Production::new(
    N::TermPrime,
    &[
        Symbol::Terminal(T::Div),
        Symbol::Nonterminal(N::Factor),
        Symbol::Nonterminal(N::TermPrime),
    ],
);
pub const TERM_PRIME_EMPTY: Production = Production::new(N::TermPrime, &[]);

pub const FACTOR_ID: Production = Production::new(N::Factor, &[Symbol::Terminal(T::Id)]);
pub const FACTOR_NUM: Production = Production::new(N::Factor, &[Symbol::Terminal(T::Num)]);
pub const FACTOR_PAREN: Production = Production::new(
    N::Factor,
    &[
        Symbol::Terminal(T::LParen),
        Symbol::Nonterminal(N::Expr),
        Symbol::Terminal(T::RParen),
    ],
);

/// Every production, grouped by left-hand side in declaration order
pub const GRAMMAR: &[Production] = &[
    PROGRAM,
    STATEMENT_LIST,
    STATEMENT_LIST_EMPTY,
    STATEMENT_DECLARATION,
    STATEMENT_ASSIGNMENT,
    STATEMENT_PRINT,
    DECLARATION,
    ASSIGNMENT,
    PRINT_STMT,
    EXPR,
    EXPR_PRIME_PLUS,
    EXPR_PRIME_MINUS,
    EXPR_PRIME_EMPTY,
    TERM,
    TERM_PRIME_MULT,
    TERM_PRIME_DIV,
    TERM_PRIME_EMPTY,
    FACTOR_ID,
    FACTOR_NUM,
    FACTOR_PAREN,
];

pub fn alternatives(lhs: Nonterminal) -> impl Iterator<Item = &'static Production> {
    GRAMMAR.iter().filter(move |p| p.lhs == lhs)
}

// ============================================================================
// FIRST SETS
// ============================================================================

#[derive(Debug)]
struct FirstSets {
    first: HashMap<Nonterminal, BTreeSet<Terminal>>,
    nullable: BTreeSet<Nonterminal>,
}

static FIRST_SETS: OnceLock<FirstSets> = OnceLock::new();

fn first_sets() -> &'static FirstSets {
    FIRST_SETS.get_or_init(compute_first_sets)
}

/// Fixed-point iteration over the table
fn compute_first_sets() -> FirstSets {
    let mut first: HashMap<Nonterminal, BTreeSet<Terminal>> = Nonterminal::ALL
        .iter()
        .map(|&nt| (nt, BTreeSet::new()))
        .collect();
    let mut nullable = BTreeSet::new();

    let mut changed = true;
    while changed {
        changed = false;

        for production in GRAMMAR {
            let (terminals, rhs_nullable) = first_of_sequence(production.rhs, &first, &nullable);

            let entry = first.entry(production.lhs).or_default();
            let before = entry.len();
            entry.extend(terminals);
            changed |= entry.len() != before;

            if rhs_nullable {
                changed |= nullable.insert(production.lhs);
            }
        }
    }

    FirstSets { first, nullable }
}

fn first_of_sequence(
    rhs: &[Symbol],
    first: &HashMap<Nonterminal, BTreeSet<Terminal>>,
    nullable: &BTreeSet<Nonterminal>,
) -> (BTreeSet<Terminal>, bool) {
    let mut terminals = BTreeSet::new();

    for symbol in rhs {
        match symbol {
            Symbol::Terminal(terminal) => {
                terminals.insert(*terminal);
                return (terminals, false);
            }
            Symbol::Nonterminal(nt) => {
                if let Some(set) = first.get(nt) {
                    terminals.extend(set.iter().copied());
                }
                if !nullable.contains(nt) {
                    return (terminals, false);
                }
            }
        }
    }

    (terminals, true)
}

/// Terminals that can begin a string derived from `nonterminal`
pub fn first_set(nonterminal: Nonterminal) -> &'static BTreeSet<Terminal> {
    // Every nonterminal is seeded in compute_first_sets
    &first_sets().first[&nonterminal]
}

/// FIRST of a production body; the flag is true when the body can derive ε
pub fn first_of_production(production: &Production) -> (BTreeSet<Terminal>, bool) {
    let sets = first_sets();
    first_of_sequence(production.rhs, &sets.first, &sets.nullable)
}

pub fn is_nullable(nonterminal: Nonterminal) -> bool {
    first_sets().nullable.contains(&nonterminal)
}

/// Human-readable `FIRST(X) = { ... }`
pub fn describe_first_set(nonterminal: Nonterminal) -> String {
    let mut members: Vec<&str> = first_set(nonterminal).iter().map(|t| t.as_str()).collect();
    if is_nullable(nonterminal) {
        members.push("ε");
    }
    format!("FIRST({}) = {{ {} }}", nonterminal, members.join(", "))
}

// ============================================================================
// LISTING
// ============================================================================

/// The grammar in BNF-like form, one line per nonterminal
pub fn grammar_listing() -> String {
    let width = Nonterminal::ALL
        .iter()
        .map(|nt| nt.as_str().len())
        .max()
        .unwrap_or(0);

    Nonterminal::ALL
        .iter()
        .map(|&nt| {
            let bodies: Vec<String> = alternatives(nt).map(|p| render_rhs(p.rhs)).collect();
            format!("{:<width$} -> {}", nt.as_str(), bodies.join(" | "), width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
