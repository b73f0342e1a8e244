mod error;
mod shunting_yard;

pub use crate::interpreter::parser::error::ParseError;
use crate::interpreter::parser::shunting_yard::build_tree;
use crate::interpreter::syntax::term_node::TermNode;
use crate::interpreter::token::Token;
use log::debug;

/// Parses the given tokens into an equivalent expression tree, respecting operator
/// precedence and associativity.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The root of the expression tree, or why the tokens do not form one expression.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use term_tree::interpreter::lexer::tokenize;
/// use term_tree::interpreter::parser::parse;
///
/// let tree = parse(tokenize("x^2"))?;
/// assert_eq!(tree.to_string(), "^");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(infix_tokens: Vec<Token>) -> Result<TermNode, ParseError> {
    let tree = build_tree(infix_tokens)?;
    debug!("Parsed expression rooted at {}", tree);
    Ok(tree)
}
