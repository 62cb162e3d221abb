use crate::interpreter::operator::{BinaryOperator, MathFunction, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_function_call, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::{Token, Variable};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Stands in for a factor that was missing from the input. Evaluates to zero.
    Empty,
    // Terminal symbols (leaves)
    Number(f64),
    Variable(Variable),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    FunctionCall {
        function: MathFunction,
        argument: Box<Node>,
    },
}

impl Node {
    pub fn new_number(value: f64) -> Node {
        Node::Number(value)
    }

    pub fn new_variable(variable: Variable) -> Node {
        Node::Variable(variable)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_unary_operation(operator: UnaryOperator, operand: Node) -> Node {
        Node::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn new_absolute(operand: Node) -> Node {
        Self::new_unary_operation(UnaryOperator::Absolute, operand)
    }

    pub fn new_function_call(function: MathFunction, argument: Node) -> Node {
        Node::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Whether the node is an operator applied to operands, as opposed to a value
    /// or a function call.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Node::BinaryOperation { .. } | Node::UnaryOperation { .. }
        )
    }

    /// Whether an `Empty` node appears anywhere in the tree.
    pub fn contains_empty(&self) -> bool {
        let mut finder = EmptyFinder { found: false };
        self.accept(&mut finder);
        finder.found
    }

    /// The number of nodes in the tree, this node included.
    pub fn size(&self) -> usize {
        let mut counter = NodeCounter { count: 0 };
        self.accept(&mut counter);
        counter.count
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Empty => visitor.visit_empty(),
            Node::Number(value) => visitor.visit_number(*value),
            Node::Variable(variable) => visitor.visit_variable(*variable),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Node::FunctionCall { function, argument } => {
                visitor.visit_function_call(function, argument)
            }
        }
    }

    /// Converts the tree back into infix tokens, adding only the parentheses
    /// needed to read the expression back the same way.
    ///
    /// The returned tokens do not end with [`Token::EndOfInput`].
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        tokens
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::Empty => {}
            Node::Number(value) => tokens.push(Token::Number(*value)),
            Node::Variable(variable) => tokens.push(Token::Variable(*variable)),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                parenthesize_if(tokens, left_operand.needs_parentheses_under(operator), |tokens| {
                    left_operand.build_expression(tokens)
                });
                tokens.push(operator.token());
                parenthesize_if(tokens, right_operand.needs_parentheses_under(operator), |tokens| {
                    right_operand.build_expression(tokens)
                });
            }
            Node::UnaryOperation {
                operator: UnaryOperator::Absolute,
                operand,
            } => {
                tokens.push(Token::Pipe);
                operand.build_expression(tokens);
                tokens.push(Token::Pipe);
            }
            Node::UnaryOperation { operator, operand } => {
                tokens.push(operator.token());
                let predicate = matches!(
                    **operand,
                    Node::BinaryOperation {
                        operator: BinaryOperator::Add | BinaryOperator::Subtract,
                        ..
                    }
                ) || operand.is_sign();
                parenthesize_if(tokens, predicate, |tokens| operand.build_expression(tokens));
            }
            Node::FunctionCall { function, argument } => {
                tokens.push(function.token());
                parenthesize_if(tokens, true, |tokens| argument.build_expression(tokens));
            }
        }
    }

    fn is_sign(&self) -> bool {
        matches!(
            self,
            Node::UnaryOperation {
                operator: UnaryOperator::Plus | UnaryOperator::Minus,
                ..
            }
        )
    }

    /// A child of a binary operator is wrapped when it binds equally or more loosely
    /// than its parent, so every operator level holds a single operation when read back.
    fn needs_parentheses_under(&self, parent_operator: &BinaryOperator) -> bool {
        match self {
            Node::BinaryOperation { operator, .. } => {
                operator.precedence_lt(parent_operator) || operator.precedence_eq(parent_operator)
            }
            _ => self.is_sign(),
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: bool,
    build_interior: impl FnOnce(&mut Vec<Token>),
) {
    if predicate {
        tokens.push(Token::LeftParentheses);
    }

    build_interior(tokens);

    if predicate {
        tokens.push(Token::RightParentheses);
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_empty(&mut self) {
        self.builder.add_empty_child("(empty)".into());
    }
    fn visit_number(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_variable(&mut self, variable: Variable) {
        self.builder.add_empty_child(variable.symbol().to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
    fn visit_function_call(&mut self, function: &MathFunction, argument: &Node) {
        self.builder.begin_child(format!("{}", function));
        walk_function_call(self, argument);
        self.builder.end_child();
    }
}

struct NodeCounter {
    count: usize,
}

impl SyntaxVisitor for NodeCounter {
    fn visit_empty(&mut self) {
        self.count += 1;
    }
    fn visit_number(&mut self, _value: f64) {
        self.count += 1;
    }
    fn visit_variable(&mut self, _variable: Variable) {
        self.count += 1;
    }
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.count += 1;
        walk_binary_operation(self, left_operand, right_operand);
    }
    fn visit_unary_operation(&mut self, _operator: &UnaryOperator, operand: &Node) {
        self.count += 1;
        walk_unary_operation(self, operand);
    }
    fn visit_function_call(&mut self, _function: &MathFunction, argument: &Node) {
        self.count += 1;
        walk_function_call(self, argument);
    }
}

struct EmptyFinder {
    found: bool,
}

impl SyntaxVisitor for EmptyFinder {
    fn visit_empty(&mut self) {
        self.found = true;
    }
}
