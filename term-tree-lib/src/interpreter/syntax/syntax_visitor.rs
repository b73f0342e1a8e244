use crate::interpreter::syntax::term_node::TermNode;
use crate::interpreter::token::Token;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree, left operand before right.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_leaf(&mut self, _token: &Token) {}
    fn visit_function(&mut self, _function: &Token, argument: &TermNode) {
        walk_function(self, argument)
    }
    fn visit_operation(
        &mut self,
        _operator: &Token,
        left_operand: &TermNode,
        right_operand: &TermNode,
    ) {
        walk_operation(self, left_operand, right_operand)
    }
}

pub(crate) fn walk_function(visitor: &mut impl SyntaxVisitor, argument: &TermNode) {
    argument.accept(visitor);
}

pub(crate) fn walk_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &TermNode,
    right_operand: &TermNode,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::convert;
    use pretty_assertions::assert_eq;

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_leaf(&mut self, token: &Token) {
            self.prints.push(token.to_string())
        }
        fn visit_function(&mut self, function: &Token, argument: &TermNode) {
            self.prints.push(function.to_string());
            walk_function(self, argument);
            self.prints.push(format!("exit {}", function));
        }
        fn visit_operation(
            &mut self,
            operator: &Token,
            left_operand: &TermNode,
            right_operand: &TermNode,
        ) {
            self.prints.push(operator.to_string());
            walk_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {}", operator));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = convert("a+sin(b*c)").unwrap();
        let mut visitor = PrePostPrintVisitor { prints: vec![] };

        root.accept(&mut visitor);

        assert_eq!(
            visitor.prints,
            [
                "+", "a", "sin", "*", "b", "c", "exit *", "exit sin", "exit +",
            ]
        )
    }

    #[test]
    fn default_visitor_reaches_every_leaf() {
        struct LeafCounter(usize);
        impl SyntaxVisitor for LeafCounter {
            fn visit_leaf(&mut self, _token: &Token) {
                self.0 += 1;
            }
        }
        let root = convert("(2+a)(3-b)").unwrap();
        let mut counter = LeafCounter(0);

        root.accept(&mut counter);

        assert_eq!(counter.0, 4);
    }
}
