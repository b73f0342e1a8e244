//! Turns math expressions into binary expression trees.
//!
//! [`interpreter::lexer::tokenize`] splits the text into tokens, inserting the
//! multiplications algebra leaves implicit, and [`interpreter::parser::parse`] arranges
//! them into a [`TermNode`](interpreter::syntax::term_node::TermNode) tree with the
//! shunting-yard algorithm.

pub mod interpreter;
