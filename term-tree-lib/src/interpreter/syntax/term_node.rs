use crate::interpreter::operator::{Associativity, BinaryOperator};
use crate::interpreter::syntax::syntax_visitor::{walk_function, walk_operation, SyntaxVisitor};
use crate::interpreter::token::{Token, TokenId};
use anyhow::{Context, Result};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A node of an expression tree, wrapping exactly one token.
///
/// Literals and variables are leaves, functions have a single left child and operators
/// have both children. Nodes are never changed after they are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermNode {
    token: Token,
    left_child: Option<Box<TermNode>>,
    right_child: Option<Box<TermNode>>,
}

impl TermNode {
    pub fn new_leaf(token: Token) -> TermNode {
        TermNode {
            token,
            left_child: None,
            right_child: None,
        }
    }

    pub fn new_function(token: Token, argument: TermNode) -> TermNode {
        TermNode {
            token,
            left_child: Some(Box::new(argument)),
            right_child: None,
        }
    }

    pub fn new_operation(
        token: Token,
        left_operand: TermNode,
        right_operand: TermNode,
    ) -> TermNode {
        TermNode {
            token,
            left_child: Some(Box::new(left_operand)),
            right_child: Some(Box::new(right_operand)),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn id(&self) -> TokenId {
        self.token.id()
    }

    pub fn value(&self) -> &str {
        self.token.value()
    }

    pub fn left_child(&self) -> Option<&TermNode> {
        self.left_child.as_deref()
    }

    pub fn right_child(&self) -> Option<&TermNode> {
        self.right_child.as_deref()
    }

    /// The existing children, left before right.
    pub fn children(&self) -> impl Iterator<Item = &TermNode> {
        self.left_child().into_iter().chain(self.right_child())
    }

    pub fn is_leaf(&self) -> bool {
        self.left_child.is_none() && self.right_child.is_none()
    }

    /// Calls the correct visitor method for the shape of the node on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match (self.left_child(), self.right_child()) {
            (Some(left_operand), Some(right_operand)) => {
                visitor.visit_operation(&self.token, left_operand, right_operand)
            }
            (Some(argument), None) => visitor.visit_function(&self.token, argument),
            _ => visitor.visit_leaf(&self.token),
        }
    }

    /// Regenerates the expression in infix notation, with parentheses only where the
    /// structure of the tree needs them.
    ///
    /// Recurses once per level of the tree. A left-associative chain of n operators is n
    /// levels deep, so inputs with tens of thousands of chained terms can exhaust the
    /// thread's stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tree::interpreter::convert;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = convert("a+((b)*((c-d)))")?;
    /// assert_eq!(tree.to_infix(), "a + b * (c - d)");
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn to_infix(&self) -> String {
        let mut text = String::new();
        self.build_infix(None, &mut text);
        text
    }

    fn build_infix(&self, parent: Option<(BinaryOperator, Side)>, text: &mut String) {
        match (self.left_child(), self.right_child(), self.token.operator()) {
            (Some(left_operand), Some(right_operand), Some(operator)) => {
                let wrap = parent
                    .map(|(parent_operator, side)| {
                        needs_parentheses(parent_operator, side, operator)
                    })
                    .unwrap_or(false);

                parenthesize_if(text, wrap, |text| {
                    left_operand.build_infix(Some((operator, Side::Left)), text);
                    if operator == BinaryOperator::Exponentiate {
                        text.push(operator.symbol());
                    } else {
                        text.push(' ');
                        text.push(operator.symbol());
                        text.push(' ');
                    }
                    right_operand.build_infix(Some((operator, Side::Right)), text);
                });
            }
            (Some(argument), _, _) => {
                text.push_str(self.value());
                parenthesize_if(text, true, |text| argument.build_infix(None, text));
            }
            _ => text.push_str(self.value()),
        }
    }

    /// Draws the tree for humans, one node per line.
    pub fn render_tree(&self) -> Result<String> {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        write_tree(&visitor.builder.build(), &mut buffer).context("Failed to draw tree")?;
        String::from_utf8(buffer).context("Drawn tree is not valid text")
    }
}

impl Display for TermNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn needs_parentheses(parent: BinaryOperator, side: Side, child: BinaryOperator) -> bool {
    if parent.precedence_gt(&child) {
        return true;
    }
    if !parent.precedence_eq(&child) {
        return false;
    }
    // Equal precedence: only the operand on the associative side may go without.
    matches!(
        (parent.associativity(), side),
        (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left)
    )
}

fn parenthesize_if(text: &mut String, predicate: bool, build_interior: impl FnOnce(&mut String)) {
    if predicate {
        text.push('(');
    }

    build_interior(text);

    if predicate {
        text.push(')');
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_leaf(&mut self, token: &Token) {
        self.builder.add_empty_child(token.to_string());
    }
    fn visit_function(&mut self, function: &Token, argument: &TermNode) {
        self.builder.begin_child(function.to_string());
        walk_function(self, argument);
        self.builder.end_child();
    }
    fn visit_operation(
        &mut self,
        operator: &Token,
        left_operand: &TermNode,
        right_operand: &TermNode,
    ) {
        self.builder.begin_child(operator.to_string());
        walk_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
}
