use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Variable;

/// The value of `e` in expressions. Deliberately a short approximation.
pub const E_APPROXIMATION: f64 = 2.71828;
/// The value of `p` in expressions. Deliberately a short approximation of pi.
pub const PI_APPROXIMATION: f64 = 3.14;

/// Calculates the value of the expression tree at the given point.
///
/// `x`, `y` and `z` all refer to the given value. Evaluation never fails:
/// [`Node::Empty`] is zero, and operations outside their domain give NaN or
/// an infinity following IEEE 754.
///
/// # Arguments
///
/// * `node`: The root of the expression tree.
/// * `x`: The value of the free variable.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use function_plotter::interpreter::convert;
/// use function_plotter::interpreter::evaluator::evaluate;
///
/// let tree = convert("x^2");
/// assert_eq!(evaluate(&tree, 3.0), 9.0);
/// ```
pub fn evaluate(node: &Node, x: f64) -> f64 {
    match node {
        Node::Empty => 0.0,
        Node::Number(value) => *value,
        Node::Variable(variable) => variable_value(*variable, x),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => operator.evaluate(evaluate(left_operand, x), evaluate(right_operand, x)),
        Node::UnaryOperation { operator, operand } => operator.evaluate(evaluate(operand, x)),
        Node::FunctionCall { function, argument } => function.evaluate(evaluate(argument, x)),
    }
}

fn variable_value(variable: Variable, x: f64) -> f64 {
    match variable {
        Variable::X | Variable::Y | Variable::Z => x,
        Variable::E => E_APPROXIMATION,
        Variable::P => PI_APPROXIMATION,
    }
}
