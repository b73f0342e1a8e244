pub(crate) mod syntax_visitor;
pub mod term_node;
pub mod traversal;
