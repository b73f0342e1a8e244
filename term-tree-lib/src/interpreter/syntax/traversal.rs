use crate::interpreter::syntax::term_node::TermNode;
use crate::interpreter::token::TokenId;
use itertools::Itertools;
use std::collections::{HashMap, VecDeque};

/// An edge from a parent node to one of its children, identified by token ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: TokenId,
    pub to: TokenId,
}

impl TermNode {
    /// Visits the tree level by level, passing each node along with its depth (the root is 0).
    ///
    /// Children are queued right before left, so within a level the right operand of a
    /// node is visited ahead of its left operand.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tree::interpreter::convert;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = convert("a-b")?;
    /// let mut visited = Vec::new();
    /// tree.breadth_first(|node, depth| visited.push((node.to_string(), depth)));
    /// assert_eq!(
    ///     visited,
    ///     vec![("-".to_string(), 0), ("b".to_string(), 1), ("a".to_string(), 1)]
    /// );
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn breadth_first<'a>(&'a self, mut visit: impl FnMut(&'a TermNode, usize)) {
        let mut queue: VecDeque<(&TermNode, usize)> = VecDeque::from([(self, 0)]);

        while let Some((node, depth)) = queue.pop_front() {
            visit(node, depth);

            if let Some(right_child) = node.right_child() {
                queue.push_back((right_child, depth + 1));
            }
            if let Some(left_child) = node.left_child() {
                queue.push_back((left_child, depth + 1));
            }
        }
    }

    /// Computes the height of every node, where leaves are 0 and every other node is one
    /// more than its highest child.
    ///
    /// Recurses once per level, so a tree deep enough to exhaust the stack (tens of
    /// thousands of chained terms) is not supported.
    ///
    /// returns: The height of the whole tree, and the height of each node keyed by token id.
    pub fn max_depth(&self) -> (usize, HashMap<TokenId, usize>) {
        let mut depths = HashMap::new();
        let depth = record_depths(self, &mut depths);
        (depth, depths)
    }

    /// Lists every parent to child edge, in breadth-first order, left child first.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        self.breadth_first(|node, _| {
            connections.extend(node.children().map(|child| Connection {
                from: node.id(),
                to: child.id(),
            }));
        });
        connections
    }

    /// Groups the functions and operators by their breadth-first depth, deepest level
    /// first and left to right within a level. Reading the levels in order gives an order
    /// in which the operations can be evaluated.
    pub fn operation_levels(&self) -> Vec<Vec<&TermNode>> {
        let mut operations = Vec::new();
        self.breadth_first(|node, depth| {
            if !node.is_leaf() {
                operations.push((depth, node));
            }
        });

        let by_depth = operations.into_iter().rev().group_by(|(depth, _)| *depth);
        let levels: Vec<Vec<&TermNode>> = by_depth
            .into_iter()
            .map(|(_, level)| level.map(|(_, node)| node).collect())
            .collect();
        levels
    }
}

fn record_depths(node: &TermNode, depths: &mut HashMap<TokenId, usize>) -> usize {
    let depth = node
        .children()
        .map(|child| record_depths(child, depths) + 1)
        .max()
        .unwrap_or(0);
    depths.insert(node.id(), depth);
    depth
}
