use crate::interpreter::operator::{BinaryOperator, MathFunction, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Variable;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_empty(&mut self) {}
    fn visit_number(&mut self, _value: f64) {}
    fn visit_variable(&mut self, _variable: Variable) {}
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operator: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
    fn visit_function_call(&mut self, _function: &MathFunction, argument: &Node) {
        walk_function_call(self, argument)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

pub(crate) fn walk_function_call(visitor: &mut impl SyntaxVisitor, argument: &Node) {
    argument.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_complex_tree() -> Node {
        // |sqrt(x) - 2| * y
        let x = Node::new_variable(Variable::X);
        let y = Node::new_variable(Variable::Y);
        let root = Node::new_function_call(MathFunction::SquareRoot, x);
        let two = Node::new_number(2.0);
        let minus = Node::new_binary_operation(BinaryOperator::Subtract, root, two);
        let absolute = Node::new_absolute(minus);
        Node::new_binary_operation(BinaryOperator::Multiply, absolute, y)
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_empty(&mut self) {
            self.prints.push("empty".to_string())
        }
        fn visit_number(&mut self, value: f64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_variable(&mut self, variable: Variable) {
            self.prints.push(variable.symbol().to_string())
        }
        fn visit_binary_operation(
            &mut self,
            operator: &BinaryOperator,
            left_operand: &Node,
            right_operand: &Node,
        ) {
            self.prints.push(format!("{:?}", operator));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operator));
        }
        fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
            self.prints.push(format!("{:?}", operator));
            walk_unary_operation(self, operand);
            self.prints.push(format!("exit {:?}", operator));
        }
        fn visit_function_call(&mut self, function: &MathFunction, argument: &Node) {
            self.prints.push(format!("{:?}", function));
            walk_function_call(self, argument);
            self.prints.push(format!("exit {:?}", function));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        println!("{}", root);
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Multiply",
                "Absolute",
                "Subtract",
                "SquareRoot",
                "x",
                "exit SquareRoot",
                "2",
                "exit Subtract",
                "exit Absolute",
                "y",
                "exit Multiply",
            ]
        )
    }
}
