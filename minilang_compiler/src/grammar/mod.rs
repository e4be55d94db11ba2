//! Grammar definitions for minilang

pub mod productions;
pub mod symbols;

pub use productions::{
    describe_first_set, first_set, grammar_listing, is_nullable, Production, GRAMMAR,
};
pub use symbols::{render_form, Nonterminal, Symbol, Terminal};
