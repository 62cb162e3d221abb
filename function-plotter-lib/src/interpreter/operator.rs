use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
    Modulo,
}

/// A prefix operator applied to a single operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    /// Written as `|operand|`.
    Absolute,
}

/// A named function of one argument, e.g. `sin` or `sqrt`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Sine,
    Cosine,
    Tangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    /// Base 10 logarithm, written `log`.
    CommonLogarithm,
    /// Written `ln`.
    NaturalLogarithm,
    SquareRoot,
    CubeRoot,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl BinaryOperator {
    /// The operator written as the given character, if any.
    pub fn from_symbol(symbol: char) -> Option<BinaryOperator> {
        match symbol {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            '^' => Some(BinaryOperator::Exponentiate),
            '%' => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Exponentiate => '^',
            BinaryOperator::Modulo => '%',
        }
    }

    pub fn token(&self) -> Token {
        Token::Operator(*self)
    }

    pub(crate) fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => Associativity::Left,
            BinaryOperator::Exponentiate => Associativity::Right,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 1,
            BinaryOperator::Exponentiate => 2,
        }
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_lt(&self, other: &Self) -> bool {
        self.precedence().lt(&other.precedence())
    }

    /// Combines two operands. Follows IEEE 754, so dividing by zero gives an
    /// infinity or NaN instead of failing.
    pub fn evaluate(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
            BinaryOperator::Exponentiate => a.powf(b),
            // Truncated remainder, the result has the sign of `a`.
            BinaryOperator::Modulo => a % b,
        }
    }
}

impl UnaryOperator {
    /// The sign operator written with the same character as the given binary operator.
    pub fn from_sign(operator: BinaryOperator) -> Option<UnaryOperator> {
        match operator {
            BinaryOperator::Add => Some(UnaryOperator::Plus),
            BinaryOperator::Subtract => Some(UnaryOperator::Minus),
            _ => None,
        }
    }

    pub fn token(&self) -> Token {
        match self {
            UnaryOperator::Plus => Token::Operator(BinaryOperator::Add),
            UnaryOperator::Minus => Token::Operator(BinaryOperator::Subtract),
            UnaryOperator::Absolute => Token::Pipe,
        }
    }

    pub fn evaluate(&self, value: f64) -> f64 {
        match self {
            UnaryOperator::Plus => value,
            UnaryOperator::Minus => -value,
            UnaryOperator::Absolute => value.abs(),
        }
    }
}

impl MathFunction {
    /// Every function, in the order the lexer tries to match their names.
    pub const ALL: [MathFunction; 10] = [
        MathFunction::Sine,
        MathFunction::Cosine,
        MathFunction::Tangent,
        MathFunction::ArcSine,
        MathFunction::ArcCosine,
        MathFunction::ArcTangent,
        MathFunction::CommonLogarithm,
        MathFunction::NaturalLogarithm,
        MathFunction::SquareRoot,
        MathFunction::CubeRoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sine => "sin",
            MathFunction::Cosine => "cos",
            MathFunction::Tangent => "tan",
            MathFunction::ArcSine => "asin",
            MathFunction::ArcCosine => "acos",
            MathFunction::ArcTangent => "atan",
            MathFunction::CommonLogarithm => "log",
            MathFunction::NaturalLogarithm => "ln",
            MathFunction::SquareRoot => "sqrt",
            MathFunction::CubeRoot => "cbrt",
        }
    }

    pub fn token(&self) -> Token {
        Token::Function(*self)
    }

    /// Applies the function. Arguments outside the domain give NaN.
    pub fn evaluate(&self, argument: f64) -> f64 {
        match self {
            MathFunction::Sine => argument.sin(),
            MathFunction::Cosine => argument.cos(),
            MathFunction::Tangent => argument.tan(),
            MathFunction::ArcSine => argument.asin(),
            MathFunction::ArcCosine => argument.acos(),
            MathFunction::ArcTangent => argument.atan(),
            MathFunction::CommonLogarithm => argument.log10(),
            MathFunction::NaturalLogarithm => argument.ln(),
            MathFunction::SquareRoot => argument.sqrt(),
            MathFunction::CubeRoot => argument.cbrt(),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Absolute => write!(f, "abs"),
            _ => write!(f, "{}", self.token()),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
