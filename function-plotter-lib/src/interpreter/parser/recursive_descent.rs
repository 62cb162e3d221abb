use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::parser::{Chaining, ParseOptions, Parsed};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use log::trace;
use std::collections::VecDeque;

const ADDITIVE: [BinaryOperator; 2] = [BinaryOperator::Add, BinaryOperator::Subtract];
const MULTIPLICATIVE: [BinaryOperator; 3] = [
    BinaryOperator::Multiply,
    BinaryOperator::Divide,
    BinaryOperator::Modulo,
];
const EXPONENTIAL: [BinaryOperator; 1] = [BinaryOperator::Exponentiate];

/// How deep groups, function calls, signs and chained operations may nest
/// before the parser stops descending.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The tokens left to parse. Productions take tokens from the front.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expression := term (('+' | '-') term)
/// term       := power (('*' | '/' | '%') power)
/// power      := factor ('^' factor)
/// factor     := Number | Variable | '(' expression ')' | Function factor
///             | '|' expression '|' | <empty>
/// ```
///
/// The repetition of each infix operator depends on [`Chaining`]. With
/// [`Chaining::LeftAssociative`] a factor may also be `('+' | '-') power`.
///
/// Nesting is limited to [`MAX_NESTING_DEPTH`] levels, past which a factor is
/// [`Node::Empty`]. The trees built are therefore shallow enough to evaluate
/// and drop recursively.
pub(super) struct TokenStream {
    tokens: VecDeque<Token>,
    options: ParseOptions,
    depth: usize,
    nesting_too_deep: bool,
    unclosed_groups: usize,
    discarded: Vec<Node>,
}

impl TokenStream {
    pub(super) fn new(tokens: Vec<Token>, options: ParseOptions) -> TokenStream {
        TokenStream {
            tokens: VecDeque::from(tokens),
            options,
            depth: 0,
            nesting_too_deep: false,
            unclosed_groups: 0,
            discarded: Vec::new(),
        }
    }

    /// Pairs the parsed tree with what the parser could not use.
    pub(super) fn finish(self, tree: Node) -> Parsed {
        let unconsumed = self
            .tokens
            .into_iter()
            .filter(|token| *token != Token::EndOfInput)
            .collect();
        Parsed {
            tree,
            unconsumed,
            unclosed_groups: self.unclosed_groups,
            nesting_too_deep: self.nesting_too_deep,
            discarded: self.discarded,
        }
    }

    pub(super) fn expression(&mut self) -> Node {
        match self.options.chaining {
            Chaining::SingleOperator => self.single_operator_expression(),
            Chaining::LeftAssociative => self.left_associative_expression(),
        }
    }

    /// A sign after something that cannot be a left operand (nothing, or an
    /// operation) turns into a unary operator over the following term, and
    /// whatever was collected before it is discarded.
    fn single_operator_expression(&mut self) -> Node {
        let node = self.term();
        let operator = match self.next_operator(&ADDITIVE) {
            Some(operator) => operator,
            None => return node,
        };

        if node.is_empty() || node.is_operator() {
            trace!("reading {:?} as a sign", operator);
            if !node.is_empty() {
                self.discarded.push(node);
            }
            let operand = self.term();
            return match UnaryOperator::from_sign(operator) {
                Some(sign) => Node::new_unary_operation(sign, operand),
                None => operand,
            };
        }
        Node::new_binary_operation(operator, node, self.term())
    }

    fn left_associative_expression(&mut self) -> Node {
        let leading_sign = self
            .next_operator(&ADDITIVE)
            .and_then(UnaryOperator::from_sign);
        let first_term = self.term();
        let mut node = match leading_sign {
            Some(sign) => Node::new_unary_operation(sign, first_term),
            None => first_term,
        };

        let depth = self.depth;
        while let Some(operator) = self.next_fold(&ADDITIVE) {
            node = Node::new_binary_operation(operator, node, self.term());
        }
        self.depth = depth;
        node
    }

    fn term(&mut self) -> Node {
        self.infix_level(&MULTIPLICATIVE, Self::power)
    }

    fn power(&mut self) -> Node {
        self.infix_level(&EXPONENTIAL, Self::factor)
    }

    fn infix_level(
        &mut self,
        operators: &[BinaryOperator],
        operand: fn(&mut Self) -> Node,
    ) -> Node {
        let mut node = operand(self);

        match self.options.chaining {
            Chaining::SingleOperator => {
                if let Some(operator) = self.next_operator(operators) {
                    node = Node::new_binary_operation(operator, node, operand(self));
                }
            }
            Chaining::LeftAssociative => {
                let depth = self.depth;
                while let Some(operator) = self.next_fold(operators) {
                    let associativity = operator.associativity();
                    let right_operand = match associativity {
                        Associativity::Left => operand(self),
                        Associativity::Right => self.infix_level(operators, operand),
                    };
                    node = Node::new_binary_operation(operator, node, right_operand);
                    // The right operand has taken the rest of the chain.
                    if associativity == Associativity::Right {
                        break;
                    }
                }
                self.depth = depth;
            }
        }
        node
    }

    fn factor(&mut self) -> Node {
        if self.options.chaining == Chaining::LeftAssociative {
            if let Some(sign) = self
                .next_operator(&ADDITIVE)
                .and_then(UnaryOperator::from_sign)
            {
                return Node::new_unary_operation(sign, self.nested(Self::power));
            }
        }

        let token = match self.tokens.front() {
            Some(token) if token.starts_factor() => *token,
            _ => return Node::Empty,
        };
        self.tokens.pop_front();
        trace!("factor starts with {:?}", token);

        match token {
            Token::Number(value) => Node::new_number(value),
            Token::Variable(variable) => Node::new_variable(variable),
            Token::LeftParentheses => {
                let inner = self.nested(Self::expression);
                self.close_group(Token::RightParentheses);
                inner
            }
            Token::Function(function) => {
                Node::new_function_call(function, self.nested(Self::factor))
            }
            Token::Pipe => {
                let inner = self.nested(Self::expression);
                self.close_group(Token::Pipe);
                Node::new_absolute(inner)
            }
            _ => Node::Empty,
        }
    }

    fn close_group(&mut self, expected: Token) {
        match self.options.chaining {
            Chaining::SingleOperator => {
                self.tokens.pop_front();
            }
            Chaining::LeftAssociative => {
                if self.tokens.front() == Some(&expected) {
                    self.tokens.pop_front();
                } else {
                    self.unclosed_groups += 1;
                }
            }
        }
    }

    /// Runs a production one level deeper, or gives up with an empty node when
    /// the nesting limit is reached.
    fn nested(&mut self, production: fn(&mut Self) -> Node) -> Node {
        if self.depth >= MAX_NESTING_DEPTH {
            if !self.nesting_too_deep {
                trace!("nesting deeper than {} levels", MAX_NESTING_DEPTH);
            }
            self.nesting_too_deep = true;
            return Node::Empty;
        }
        self.depth += 1;
        let node = production(self);
        self.depth -= 1;
        node
    }

    /// Consumes the next operator of a chain, each of which nests the tree
    /// built so far one level deeper. The caller restores the depth.
    fn next_fold(&mut self, operators: &[BinaryOperator]) -> Option<BinaryOperator> {
        if self.depth >= MAX_NESTING_DEPTH {
            let chain_continues = matches!(
                self.tokens.front(),
                Some(Token::Operator(operator)) if operators.contains(operator)
            );
            if chain_continues {
                self.nesting_too_deep = true;
            }
            return None;
        }
        let operator = self.next_operator(operators)?;
        self.depth += 1;
        Some(operator)
    }

    /// Consumes the next token if it is one of the given operators.
    fn next_operator(&mut self, operators: &[BinaryOperator]) -> Option<BinaryOperator> {
        let operator = match self.tokens.front() {
            Some(Token::Operator(operator)) if operators.contains(operator) => *operator,
            _ => return None,
        };
        self.tokens.pop_front();
        Some(operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::evaluate;
    use crate::interpreter::lexer::tokenize;
    use crate::interpreter::operator::MathFunction;
    use crate::interpreter::token::Variable;
    use pretty_assertions::assert_eq;

    fn parse_single(expression: &str) -> (Node, Vec<Token>) {
        let parsed = parse_text(expression, ParseOptions::default());
        (parsed.tree, parsed.unconsumed)
    }

    fn parse_chained(expression: &str) -> (Node, Vec<Token>, usize) {
        let options = ParseOptions {
            chaining: Chaining::LeftAssociative,
        };
        let parsed = parse_text(expression, options);
        (parsed.tree, parsed.unconsumed, parsed.unclosed_groups)
    }

    fn parse_text(expression: &str, options: ParseOptions) -> Parsed {
        let mut stream = TokenStream::new(tokenize(expression), options);
        let tree = stream.expression();
        stream.finish(tree)
    }

    fn x() -> Node {
        Node::new_variable(Variable::X)
    }

    fn number(value: f64) -> Node {
        Node::new_number(value)
    }

    fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
        Node::new_binary_operation(operator, left, right)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (tree, unconsumed) = parse_single("1 + 2 * x");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Add,
                number(1.0),
                binary(BinaryOperator::Multiply, number(2.0), x())
            )
        );
        assert!(unconsumed.is_empty());
    }

    #[test]
    fn exponentiation_binds_tighter_than_multiplication() {
        let (tree, _) = parse_single("2 * x ^ 3");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Multiply,
                number(2.0),
                binary(BinaryOperator::Exponentiate, x(), number(3.0))
            )
        );
    }

    #[test]
    fn chained_operators_beyond_the_first_are_left_over() {
        let (tree, unconsumed) = parse_single("1 + 2 + 3");

        assert_eq!(tree, binary(BinaryOperator::Add, number(1.0), number(2.0)));
        assert_eq!(
            unconsumed,
            vec![Token::Operator(BinaryOperator::Add), Token::Number(3.0)]
        );
    }

    #[test]
    fn leading_minus_becomes_sign_over_term() {
        let (tree, _) = parse_single("-x^2");

        assert_eq!(
            tree,
            Node::new_unary_operation(
                UnaryOperator::Minus,
                binary(BinaryOperator::Exponentiate, x(), number(2.0))
            )
        );
    }

    #[test]
    fn sign_after_operation_discards_the_operation() {
        let parsed = parse_text("2 * 3 + 4", ParseOptions::default());

        assert_eq!(
            parsed.tree,
            Node::new_unary_operation(UnaryOperator::Plus, number(4.0))
        );
        assert_eq!(
            parsed.discarded,
            vec![binary(BinaryOperator::Multiply, number(2.0), number(3.0))]
        );
    }

    #[test]
    fn sign_after_function_call_is_binary() {
        let (tree, _) = parse_single("sqrt x - 1");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Subtract,
                Node::new_function_call(MathFunction::SquareRoot, x()),
                number(1.0)
            )
        );
    }

    #[test]
    fn function_applies_to_following_factor_only() {
        let (tree, _) = parse_single("sin x^2");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Exponentiate,
                Node::new_function_call(MathFunction::Sine, x()),
                number(2.0)
            )
        );
    }

    #[test]
    fn parenthesized_argument_is_whole_expression() {
        let (tree, _) = parse_single("sqrt(x + 1)");

        assert_eq!(
            tree,
            Node::new_function_call(
                MathFunction::SquareRoot,
                binary(BinaryOperator::Add, x(), number(1.0))
            )
        );
    }

    #[test]
    fn pipes_make_absolute_value() {
        let (tree, unconsumed) = parse_single("|-5|");

        assert_eq!(
            tree,
            Node::new_absolute(Node::new_unary_operation(UnaryOperator::Minus, number(5.0)))
        );
        assert!(unconsumed.is_empty());
    }

    #[test]
    fn token_after_group_is_discarded_whatever_its_kind() {
        let (tree, unconsumed) = parse_single("(x + 1 # 2");

        assert_eq!(tree, binary(BinaryOperator::Add, x(), number(1.0)));
        assert_eq!(unconsumed, vec![Token::Number(2.0)]);
    }

    #[test]
    fn missing_factor_becomes_empty() {
        assert_eq!(parse_single("").0, Node::Empty);
        assert_eq!(parse_single(")").0, Node::Empty);
        assert_eq!(
            parse_single("2 *").0,
            binary(BinaryOperator::Multiply, number(2.0), Node::Empty)
        );
    }

    #[test]
    fn invalid_token_is_not_a_factor() {
        let (tree, unconsumed) = parse_single("#x");

        assert_eq!(tree, Node::Empty);
        assert_eq!(
            unconsumed,
            vec![Token::Invalid('#'), Token::Variable(Variable::X)]
        );
    }

    #[test]
    fn parsing_without_end_of_input_is_empty() {
        let mut stream = TokenStream::new(vec![], ParseOptions::default());

        assert_eq!(stream.expression(), Node::Empty);
    }

    #[test]
    fn left_associative_chaining_folds_from_the_left() {
        let (tree, unconsumed, _) = parse_chained("1 - 2 - 3");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Subtract,
                binary(BinaryOperator::Subtract, number(1.0), number(2.0)),
                number(3.0)
            )
        );
        assert!(unconsumed.is_empty());
    }

    #[test]
    fn left_associative_chaining_folds_powers_from_the_right() {
        let (tree, _, _) = parse_chained("2^3^2");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Exponentiate,
                number(2.0),
                binary(BinaryOperator::Exponentiate, number(3.0), number(2.0))
            )
        );
    }

    #[test]
    fn left_associative_chaining_keeps_terms_before_signs() {
        let (tree, _, _) = parse_chained("-2 * 3 + 4");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Add,
                Node::new_unary_operation(
                    UnaryOperator::Minus,
                    binary(BinaryOperator::Multiply, number(2.0), number(3.0))
                ),
                number(4.0)
            )
        );
    }

    #[test]
    fn left_associative_chaining_only_closes_with_matching_token() {
        let (tree, unconsumed, unclosed_groups) = parse_chained("(x + 1");

        assert_eq!(tree, binary(BinaryOperator::Add, x(), number(1.0)));
        assert!(unconsumed.is_empty());
        assert_eq!(unclosed_groups, 1);
    }

    #[test]
    fn left_associative_chaining_accepts_signs_after_operators() {
        let (product, _, _) = parse_chained("2 * -3");
        let (power, _, _) = parse_chained("2^-1");
        let (difference, _, _) = parse_chained("2 - +3");

        let minus = |operand| Node::new_unary_operation(UnaryOperator::Minus, operand);
        assert_eq!(
            product,
            binary(BinaryOperator::Multiply, number(2.0), minus(number(3.0)))
        );
        assert_eq!(
            power,
            binary(BinaryOperator::Exponentiate, number(2.0), minus(number(1.0)))
        );
        assert_eq!(
            difference,
            binary(
                BinaryOperator::Subtract,
                number(2.0),
                Node::new_unary_operation(UnaryOperator::Plus, number(3.0))
            )
        );
    }

    #[test]
    fn sign_binds_looser_than_power_inside_term() {
        let (tree, _, _) = parse_chained("2 * -x^2");

        assert_eq!(
            tree,
            binary(
                BinaryOperator::Multiply,
                number(2.0),
                Node::new_unary_operation(
                    UnaryOperator::Minus,
                    binary(BinaryOperator::Exponentiate, x(), number(2.0))
                )
            )
        );
    }

    #[test]
    fn nesting_within_limit_parses_normally() {
        let depth = MAX_NESTING_DEPTH - 1;
        let expression = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

        let parsed = parse_text(&expression, ParseOptions::default());

        assert_eq!(parsed.tree, x());
        assert!(!parsed.nesting_too_deep);
        assert!(parsed.unconsumed.is_empty());
    }

    #[test]
    fn deeply_nested_parentheses_stop_at_limit() {
        let expression = "(".repeat(100_000);

        let parsed = parse_text(&expression, ParseOptions::default());

        assert_eq!(parsed.tree, Node::Empty);
        assert!(parsed.nesting_too_deep);
        assert!(!parsed.unconsumed.is_empty());
    }

    #[test]
    fn long_function_chain_stops_at_limit() {
        let expression = format!("{}x", "sin ".repeat(100_000));

        let parsed = parse_text(&expression, ParseOptions::default());

        assert!(parsed.nesting_too_deep);
        // One call per level, the last of which has an empty argument.
        assert_eq!(parsed.tree.size(), MAX_NESTING_DEPTH + 2);
        assert_eq!(evaluate(&parsed.tree, 1.0), 0.0);
    }

    #[test]
    fn long_chains_stop_at_limit_with_left_associative_chaining() {
        let options = ParseOptions {
            chaining: Chaining::LeftAssociative,
        };
        let sum = format!("{}1", "1+".repeat(100_000));
        let powers = format!("{}1", "2^".repeat(100_000));
        let signs = format!("{}1", "-".repeat(100_000));

        let parsed_sum = parse_text(&sum, options);
        let parsed_powers = parse_text(&powers, options);
        let parsed_signs = parse_text(&signs, options);

        assert!(parsed_sum.nesting_too_deep);
        assert_eq!(
            evaluate(&parsed_sum.tree, 0.0),
            (MAX_NESTING_DEPTH + 1) as f64
        );
        assert!(parsed_powers.nesting_too_deep);
        assert!(!parsed_powers.unconsumed.is_empty());
        assert!(parsed_signs.nesting_too_deep);
    }
}
