use crate::interpreter::operator::{BinaryOperator, MathFunction};
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Variable(Variable),
    Operator(BinaryOperator),
    Function(MathFunction),
    LeftParentheses,
    RightParentheses,
    Pipe,
    EndOfInput,
    /// A character the lexer does not recognize.
    Invalid(char),
}

/// A single letter name that can appear in an expression.
///
/// `x`, `y` and `z` all stand for the one free variable of the function,
/// while `e` and `p` name constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Variable {
    X,
    Y,
    Z,
    E,
    P,
}

impl Variable {
    pub fn from_symbol(symbol: char) -> Option<Variable> {
        match symbol {
            'x' => Some(Variable::X),
            'y' => Some(Variable::Y),
            'z' => Some(Variable::Z),
            'e' => Some(Variable::E),
            'p' => Some(Variable::P),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Variable::X => 'x',
            Variable::Y => 'y',
            Variable::Z => 'z',
            Variable::E => 'e',
            Variable::P => 'p',
        }
    }
}

impl Token {
    /// Whether the token can begin a factor, the highest precedence unit of an expression.
    pub fn starts_factor(&self) -> bool {
        matches!(
            self,
            Token::Number(_)
                | Token::Variable(_)
                | Token::Function(_)
                | Token::LeftParentheses
                | Token::Pipe
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Variable(variable) => write!(f, "{}", variable.symbol()),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::Function(function) => write!(f, "{}", function),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
            Token::Pipe => write!(f, "|"),
            Token::EndOfInput => Ok(()),
            Token::Invalid(character) => write!(f, "{}", character),
        }
    }
}
