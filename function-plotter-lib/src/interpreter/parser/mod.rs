mod recursive_descent;

pub use recursive_descent::MAX_NESTING_DEPTH;

use crate::interpreter::parser::recursive_descent::TokenStream;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use log::debug;

/// How operators of the same precedence following each other are read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Chaining {
    /// Each precedence level takes at most one operator. In `1 + 2 + 3` only
    /// `1 + 2` is parsed and the rest of the input is left over. Closing
    /// parentheses and pipes are consumed without checking their kind.
    #[default]
    SingleOperator,
    /// Operators of one level are folded from the left (`1 - 2 - 3` is
    /// `(1 - 2) - 3`), except `^` which folds from the right. A closing
    /// parenthesis or pipe is only consumed when it is the expected token, and
    /// signs may appear wherever an operand is expected (`2 * -3`, `2^-1`).
    LeftAssociative,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub chaining: Chaining,
}

/// The result of parsing, together with what the parser could not use.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub tree: Node,
    /// Tokens left after the expression, not counting the end of input.
    pub unconsumed: Vec<Token>,
    /// Groups opened by `(` or `|` that were not closed by the expected token.
    /// Only counted with [`Chaining::LeftAssociative`].
    pub unclosed_groups: usize,
    /// Whether the input nested deeper than [`MAX_NESTING_DEPTH`] levels, in
    /// which case the innermost part was read as [`Node::Empty`].
    pub nesting_too_deep: bool,
    /// Operations that were followed by a sign and therefore dropped, as in the
    /// `2 * 3` of `2 * 3 + 4`. Only happens with [`Chaining::SingleOperator`].
    pub discarded: Vec<Node>,
}

/// Parses the given tokens into an expression tree.
///
/// Parsing never fails. A missing factor becomes [`Node::Empty`], and tokens
/// following a complete expression are ignored.
///
/// # Arguments
///
/// * `tokens`: The tokens to parse, in infix format.
///
/// returns: The root of the expression tree.
///
/// # Examples
///
/// ```
/// use function_plotter::interpreter::lexer::tokenize;
/// use function_plotter::interpreter::parser::parse;
/// use function_plotter::interpreter::evaluator::evaluate;
///
/// let tree = parse(tokenize("2 * x"));
/// assert_eq!(evaluate(&tree, 4.0), 8.0);
/// ```
pub fn parse(tokens: Vec<Token>) -> Node {
    parse_with(tokens, ParseOptions::default()).tree
}

/// Parses the given tokens using the given options, and reports the input that
/// was not used by the expression.
pub fn parse_with(tokens: Vec<Token>, options: ParseOptions) -> Parsed {
    let mut stream = TokenStream::new(tokens, options);
    let tree = stream.expression();
    debug!("parsed expression tree:\n{}", tree);
    let parsed = stream.finish(tree);
    if !parsed.unconsumed.is_empty() {
        debug!("{} token(s) left after the expression", parsed.unconsumed.len());
    }
    parsed
}
