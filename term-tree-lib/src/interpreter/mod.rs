pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::term_node::TermNode;
use crate::interpreter::token::{Token, TokenKind};
use anyhow::{Context, Result};
use string_builder::Builder;

/// Converts the given input string into an equivalent expression tree.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The root of the expression tree.
///
/// # Examples
///
/// ```
/// use term_tree::interpreter::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = convert("2+3*4")?;
/// let (depth, _) = tree.max_depth();
/// assert_eq!(depth, 2);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> Result<TermNode> {
    let tokens = lexer::tokenize(expression);
    let expression_tree = parser::parse(tokens)
        .with_context(|| format!("could not parse expression '{}'", expression))?;
    Ok(expression_tree)
}

/// Pretty-prints the given tokens with added whitespace around binary operators.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use term_tree::interpreter::lexer::tokenize;
/// use term_tree::interpreter::tokens_to_string;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("2x^2");
/// let pretty_printed_tokens = tokens_to_string(&tokens)?;
/// assert_eq!(pretty_printed_tokens, "2 * x^2");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: &[Token]) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        match token.kind() {
            TokenKind::Operator(BinaryOperator::Exponentiate) => builder.append(token.value()),
            TokenKind::Operator(_) => {
                builder.append(" ");
                builder.append(token.value());
                builder.append(" ");
            }
            TokenKind::Comma => {
                builder.append(token.value());
                builder.append(" ");
            }
            _ => builder.append(token.value()),
        }
    }

    builder.string().context("Failed to build token string")
}
