use crate::interpreter::operator::{Associativity, BinaryOperator};
use std::fmt;
use std::fmt::Formatter;

/// Opaque identity of a token, used by consumers to key per-token data such as depths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u64);

impl TokenId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Hands out monotonically increasing token ids, starting at 1.
///
/// A fresh allocator gives reproducible ids. Share one allocator between several
/// tokenizer calls when the ids have to stay unique across all of them. Ids are 64 bits
/// wide, so a shared allocator does not run out in any realistic session.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator::starting_at(1)
    }

    /// Creates an allocator whose first id is `first`, e.g. to continue a numbering that
    /// was persisted elsewhere.
    pub fn starting_at(first: u64) -> IdAllocator {
        IdAllocator { next: first }
    }

    pub fn allocate(&mut self) -> TokenId {
        let id = TokenId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// What a token represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Literal,
    Variable,
    Operator(BinaryOperator),
    Function,
    LeftParenthesis,
    RightParenthesis,
    Comma,
}

/// A discrete part of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    id: TokenId,
    kind: TokenKind,
    value: String,
}

impl Token {
    pub fn new(id: TokenId, kind: TokenKind, value: impl Into<String>) -> Token {
        Token {
            id,
            kind,
            value: value.into(),
        }
    }

    pub fn new_operator(id: TokenId, operator: BinaryOperator) -> Token {
        Token::new(id, TokenKind::Operator(operator), operator.symbol())
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn operator(&self) -> Option<BinaryOperator> {
        match self.kind {
            TokenKind::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    /// Only operator tokens have a precedence.
    pub fn precedence(&self) -> Option<u8> {
        self.operator().map(|operator| operator.precedence())
    }

    pub fn associativity(&self) -> Option<Associativity> {
        self.operator().map(|operator| operator.associativity())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn allocator_starts_at_one_and_counts_up() {
        let mut allocator = IdAllocator::new();

        let ids: Vec<u64> = (0..3).map(|_| allocator.allocate().value()).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn allocator_keeps_counting_past_the_32_bit_range() {
        let mut allocator = IdAllocator::starting_at(u64::from(u32::MAX));

        let ids: Vec<u64> = (0..3).map(|_| allocator.allocate().value()).collect();

        let first = u64::from(u32::MAX);
        assert_eq!(ids, vec![first, first + 1, first + 2]);
    }

    #[test]
    fn operator_token_carries_table_metadata() {
        let mut allocator = IdAllocator::new();
        let token = Token::new_operator(allocator.allocate(), BinaryOperator::Exponentiate);

        assert_eq!(token.value(), "^");
        assert_eq!(token.precedence(), Some(4));
        assert_eq!(token.associativity(), Some(Associativity::Right));
    }

    #[test]
    fn non_operator_token_has_no_precedence() {
        let mut allocator = IdAllocator::new();
        let token = Token::new(allocator.allocate(), TokenKind::Function, "sin");

        assert_eq!(token.precedence(), None);
        assert_eq!(token.associativity(), None);
    }

    #[test]
    fn token_displays_as_its_value() {
        let mut allocator = IdAllocator::new();
        let token = Token::new(allocator.allocate(), TokenKind::Literal, "4.5");

        assert_eq!(token.to_string(), "4.5");
    }
}
