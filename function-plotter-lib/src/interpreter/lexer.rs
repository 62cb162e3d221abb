use crate::interpreter::operator::{BinaryOperator, MathFunction};
use crate::interpreter::token::{Token, Variable};
use log::trace;

/// Splits the given expression into tokens.
///
/// Lexing never fails. Characters that are not part of the expression language
/// become [`Token::Invalid`] and lexing continues after them. The returned tokens
/// always end with exactly one [`Token::EndOfInput`].
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens of the expression, in the order they appear.
///
/// # Examples
///
/// ```
/// use function_plotter::interpreter::lexer::tokenize;
/// use function_plotter::interpreter::token::{Token, Variable};
///
/// let tokens = tokenize("2x");
/// assert_eq!(
///     tokens,
///     vec![Token::Number(2.0), Token::Variable(Variable::X), Token::EndOfInput]
/// );
/// ```
pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(expression);
    let mut tokens = Vec::new();

    loop {
        let token = cursor.next_token();
        trace!("lexed {:?}", token);
        tokens.push(token);
        if token == Token::EndOfInput {
            return tokens;
        }
    }
}

struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Cursor<'a> {
        Cursor {
            source,
            position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start_matches(' ').len();
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if let Some(number) = self.read_number() {
            return number;
        }
        if let Some(function) = self.read_function() {
            return function;
        }
        self.read_character()
    }

    fn read_number(&mut self) -> Option<Token> {
        let rest = self.rest();
        let length = rest
            .find(|character: char| !is_number_character(character))
            .unwrap_or(rest.len());
        if length == 0 {
            return None;
        }

        self.position += length;
        Some(Token::Number(parse_decimal(&rest[..length])))
    }

    fn read_function(&mut self) -> Option<Token> {
        let rest = self.rest();
        let function = MathFunction::ALL
            .into_iter()
            .find(|function| rest.starts_with(function.name()))?;

        self.position += function.name().len();
        Some(Token::Function(function))
    }

    fn read_character(&mut self) -> Token {
        let character = match self.rest().chars().next() {
            Some(character) => character,
            None => return Token::EndOfInput,
        };
        self.position += character.len_utf8();

        if let Some(variable) = Variable::from_symbol(character) {
            return Token::Variable(variable);
        }
        if let Some(operator) = BinaryOperator::from_symbol(character) {
            return Token::Operator(operator);
        }
        match character {
            '(' => Token::LeftParentheses,
            ')' => Token::RightParentheses,
            '|' => Token::Pipe,
            _ => Token::Invalid(character),
        }
    }
}

fn is_number_character(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

/// Parses a run of digits and decimal points the way C's `atof` does: the longest
/// valid prefix wins, and a run without one (such as a lone `.`) is zero.
fn parse_decimal(text: &str) -> f64 {
    if let Ok(value) = text.parse::<f64>() {
        return value;
    }
    (1..text.len())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}
