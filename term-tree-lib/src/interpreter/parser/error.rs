use thiserror::Error;

/// Ways a token sequence can fail to form a single expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("mismatched parenthesis")]
    UnmatchedParenthesis,

    #[error("'{token}' is missing an operand")]
    MissingOperand { token: String },

    #[error("expression has {count} separate parts instead of one")]
    MultipleRoots { count: usize },

    #[error("function '{function}' takes a single argument")]
    MultipleArguments { function: String },

    #[error("comma outside of a function call")]
    MisplacedComma,
}
