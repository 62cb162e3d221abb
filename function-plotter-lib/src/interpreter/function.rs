use crate::interpreter::evaluator::evaluate;
use crate::interpreter::lexer::tokenize;
use crate::interpreter::parser::{parse_with, ParseOptions, MAX_NESTING_DEPTH};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use crate::interpreter::tokens_to_string;
use log::{debug, warn};
use std::fmt;
use std::fmt::Formatter;

/// Something in the input that was not understood, or only partly understood.
///
/// None of these stop the function from being evaluated, but the result is
/// probably not what was meant.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    InvalidCharacter(char),
    /// Nothing could be parsed, the function is zero everywhere.
    EmptyExpression,
    /// A factor was missing inside the expression and counts as zero.
    MissingOperand,
    /// Text after the parsed expression that was ignored.
    UnconsumedInput(String),
    /// An operation that was dropped because a sign followed it.
    DiscardedOperation(String),
    UnclosedGroup,
    /// The expression nests too deep, and its innermost part counts as zero.
    NestingTooDeep,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidCharacter(character) => {
                write!(f, "unrecognized character '{}'", character)
            }
            Warning::EmptyExpression => write!(f, "could not parse an expression"),
            Warning::MissingOperand => write!(f, "an operand is missing and counts as 0"),
            Warning::UnconsumedInput(text) => write!(f, "ignored trailing input '{}'", text),
            Warning::DiscardedOperation(text) => {
                write!(f, "'{}' is dropped by the sign after it", text)
            }
            Warning::UnclosedGroup => write!(f, "a parenthesis or pipe is not closed"),
            Warning::NestingTooDeep => write!(
                f,
                "the expression nests deeper than {} levels",
                MAX_NESTING_DEPTH
            ),
        }
    }
}

/// A function of one variable compiled from an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    tree: Node,
    warnings: Vec<Warning>,
}

impl Function {
    /// Compiles the given expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use function_plotter::interpreter::function::Function;
    /// use function_plotter::interpreter::parser::ParseOptions;
    ///
    /// let function = Function::new("sqrt(x) + 1", ParseOptions::default());
    /// assert!(function.warnings().is_empty());
    /// assert_eq!(function.evaluate(9.0), 4.0);
    /// ```
    pub fn new(expression: &str, options: ParseOptions) -> Function {
        let tokens = tokenize(expression);
        let mut warnings: Vec<Warning> = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Invalid(character) => Some(Warning::InvalidCharacter(*character)),
                _ => None,
            })
            .collect();

        let parsed = parse_with(tokens, options);
        if parsed.tree.is_empty() {
            warnings.push(Warning::EmptyExpression);
        } else if parsed.tree.contains_empty() {
            warnings.push(Warning::MissingOperand);
        }
        if parsed.nesting_too_deep {
            warnings.push(Warning::NestingTooDeep);
        }
        if !parsed.unconsumed.is_empty() {
            warnings.push(Warning::UnconsumedInput(warning_text(parsed.unconsumed)));
        }
        for operation in &parsed.discarded {
            warnings.push(Warning::DiscardedOperation(warning_text(operation.to_infix())));
        }
        warnings.extend((0..parsed.unclosed_groups).map(|_| Warning::UnclosedGroup));

        debug!(
            "compiled '{}' into {} node(s) with {} warning(s)",
            expression,
            parsed.tree.size(),
            warnings.len()
        );
        Function {
            tree: parsed.tree,
            warnings,
        }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate(&self.tree, x)
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The expression as it was understood, in normalized infix notation.
    pub fn infix(&self) -> anyhow::Result<String> {
        tokens_to_string(self.tree.to_infix())
    }
}

/// Renders tokens for a warning message.
///
/// Pretty-printing only fails on invalid UTF-8, which token text never
/// contains. Should it fail anyway, the tokens are written without spacing.
fn warning_text(tokens: Vec<Token>) -> String {
    match tokens_to_string(tokens.clone()) {
        Ok(text) => text,
        Err(error) => {
            warn!("{:#}", error);
            tokens.iter().map(Token::to_string).collect()
        }
    }
}
