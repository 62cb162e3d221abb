pub mod evaluator;
pub mod function;
pub mod lexer;
mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

pub use operator::{BinaryOperator, MathFunction, UnaryOperator};

use crate::interpreter::parser::parse;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Converts the given input string into an equivalent expression tree,
/// which can then be evaluated at any point.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use function_plotter::interpreter::convert;
///
/// let tree = convert("x^2");
/// let regenerated_tokens = tree.to_infix();
/// ```
pub fn convert(expression: &str) -> Node {
    let tokens = lexer::tokenize(expression);
    parse(tokens)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// Binary operators other than `^` are surrounded by spaces, while signs are
/// written next to their operand. The result has no trailing whitespace.
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
/// use function_plotter::interpreter::tokens_to_string;
/// use function_plotter::interpreter::token::{Token, Variable};
/// use function_plotter::interpreter::BinaryOperator;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Variable(Variable::X),
///     Token::Operator(BinaryOperator::Exponentiate),
///     Token::Number(2.0),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "x^2");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());
    // An operator seen while an operand is expected is a sign.
    let mut expects_operand = true;

    for token in tokens {
        match token {
            Token::Operator(BinaryOperator::Exponentiate) => {
                builder.append(token.to_string());
                expects_operand = true;
            }
            Token::Operator(_) if !expects_operand => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
                expects_operand = true;
            }
            Token::Operator(_) | Token::LeftParentheses | Token::Function(_) => {
                builder.append(token.to_string());
                expects_operand = true;
            }
            Token::Pipe => builder.append(token.to_string()),
            _ => {
                builder.append(token.to_string());
                expects_operand = false;
            }
        }
    }

    let text = builder.string().context("Failed to build token string")?;
    // A dangling operator leaves its trailing space behind.
    Ok(text.trim_end().to_string())
}
