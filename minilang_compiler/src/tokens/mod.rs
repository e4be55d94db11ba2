//! Token system for minilang lexical analysis
//!
//! - **[`TokenKind`]** - the closed set of token classes
//! - **[`Token`]** - kind, matched text and source span
//! - **[`TokenStream`]** - validated sequence ending in exactly one `EndOfInput`,
//!   with the cursor the parser drives

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{TokenStream, TokenStreamError};
