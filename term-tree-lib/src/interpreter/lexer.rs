use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::token::{IdAllocator, Token, TokenKind};
use log::{debug, trace};

/// Splits the given expression into tokens, numbering them from 1.
///
/// Never fails: characters that are not part of the notation are skipped, and malformed
/// input simply produces a token sequence the parser will reject.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens of the expression, in infix order.
///
/// # Examples
///
/// ```
/// use term_tree::interpreter::lexer::tokenize;
///
/// let tokens = tokenize("3b");
/// let values: Vec<&str> = tokens.iter().map(|token| token.value()).collect();
/// assert_eq!(values, vec!["3", "*", "b"]);
/// ```
pub fn tokenize(expression: &str) -> Vec<Token> {
    tokenize_with(expression, &mut IdAllocator::new())
}

/// Like [`tokenize`], but draws token ids from the given allocator.
pub fn tokenize_with(expression: &str, ids: &mut IdAllocator) -> Vec<Token> {
    let mut lexer = Lexer {
        ids,
        tokens: Vec::new(),
        letters: String::new(),
        digits: String::new(),
    };

    let mut previous: Option<char> = None;
    for character in normalize(expression).chars() {
        lexer.read(character, previous);
        previous = Some(character);
    }
    lexer.flush();

    debug!("Tokenized {:?} into {} tokens", expression, lexer.tokens.len());
    lexer.tokens
}

/// Rewrites the alternative multiplication and division glyphs and removes all whitespace.
fn normalize(expression: &str) -> String {
    expression
        .chars()
        .filter(|character| !character.is_whitespace())
        .map(|character| match character {
            '·' => '*',
            ':' => '/',
            other => other,
        })
        .collect()
}

fn is_digit(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

struct Lexer<'a> {
    ids: &'a mut IdAllocator,
    tokens: Vec<Token>,
    /// Consecutive letters, either separate variables or the name of a function.
    letters: String,
    /// Digits and decimal points of a single literal.
    digits: String,
}

impl<'a> Lexer<'a> {
    fn read(&mut self, character: char, previous: Option<char>) {
        if is_digit(character) {
            if !self.letters.is_empty() {
                // "x2" means x * 2, so every buffered letter gets a multiplication after it.
                let letters = std::mem::take(&mut self.letters);
                for letter in letters.chars() {
                    self.push(TokenKind::Variable, letter.to_string());
                    self.push_implicit_multiplication();
                }
            }
            self.digits.push(character);
        } else if character.is_ascii_alphabetic() {
            if !self.digits.is_empty() {
                self.push_literal();
                self.push_implicit_multiplication();
            }
            self.letters.push(character);
        } else if let Some(operator) = BinaryOperator::from_symbol(character) {
            self.flush();
            self.push_operator(operator);
        } else if character == '(' {
            if !self.letters.is_empty() {
                let name = std::mem::take(&mut self.letters);
                self.push(TokenKind::Function, name);
            } else if !self.digits.is_empty() {
                self.push_literal();
                self.push_implicit_multiplication();
            } else if previous == Some(')') {
                self.push_implicit_multiplication();
            }
            self.push(TokenKind::LeftParenthesis, "(");
        } else if character == ')' {
            self.flush();
            self.push(TokenKind::RightParenthesis, ")");
        } else if character == ',' {
            self.flush();
            self.push(TokenKind::Comma, ",");
        } else {
            trace!("Skipping unrecognized character {:?}", character);
        }
    }

    /// Empties whichever buffer is in use at the end of a run.
    fn flush(&mut self) {
        if !self.letters.is_empty() {
            self.push_variables();
        } else if !self.digits.is_empty() {
            self.push_literal();
        }
    }

    /// One variable per letter, multiplied together.
    fn push_variables(&mut self) {
        let letters = std::mem::take(&mut self.letters);
        for (index, letter) in letters.chars().enumerate() {
            if index > 0 {
                self.push_implicit_multiplication();
            }
            self.push(TokenKind::Variable, letter.to_string());
        }
    }

    fn push_literal(&mut self) {
        let digits = std::mem::take(&mut self.digits);
        self.push(TokenKind::Literal, digits);
    }

    fn push_implicit_multiplication(&mut self) {
        self.push_operator(BinaryOperator::Multiply);
    }

    fn push_operator(&mut self, operator: BinaryOperator) {
        let token = Token::new_operator(self.ids.allocate(), operator);
        trace!("Emitting {:?}", token);
        self.tokens.push(token);
    }

    fn push(&mut self, kind: TokenKind, value: impl Into<String>) {
        let token = Token::new(self.ids.allocate(), kind, value);
        trace!("Emitting {:?}", token);
        self.tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    const TIMES: TokenKind = TokenKind::Operator(BinaryOperator::Multiply);
    const PLUS: TokenKind = TokenKind::Operator(BinaryOperator::Add);
    const MINUS: TokenKind = TokenKind::Operator(BinaryOperator::Subtract);
    const DIVIDE: TokenKind = TokenKind::Operator(BinaryOperator::Divide);

    fn kinds_and_values(expression: &str) -> Vec<(TokenKind, String)> {
        tokenize(expression)
            .into_iter()
            .map(|token| (token.kind(), token.value().to_string()))
            .collect()
    }

    fn expected(tokens: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        tokens
            .iter()
            .map(|(kind, value)| (*kind, value.to_string()))
            .collect()
    }

    #[test]
    fn implicit_multiplication_between_parentheses() {
        let tokens = tokenize("(2+a)(3-b)");

        assert_eq!(tokens[5].kind(), TIMES);
        assert_eq!(tokens[5].value(), "*");
    }

    #[test]
    fn number_followed_by_letter_is_multiplied() {
        assert_eq!(
            kinds_and_values("3b"),
            expected(&[
                (TokenKind::Literal, "3"),
                (TIMES, "*"),
                (TokenKind::Variable, "b"),
            ])
        );
    }

    #[test]
    fn consecutive_letters_are_separate_variables() {
        assert_eq!(
            kinds_and_values("xy"),
            expected(&[
                (TokenKind::Variable, "x"),
                (TIMES, "*"),
                (TokenKind::Variable, "y"),
            ])
        );
    }

    #[test]
    fn letters_followed_by_digit_are_multiplied_with_it() {
        assert_eq!(
            kinds_and_values("xy2"),
            expected(&[
                (TokenKind::Variable, "x"),
                (TIMES, "*"),
                (TokenKind::Variable, "y"),
                (TIMES, "*"),
                (TokenKind::Literal, "2"),
            ])
        );
    }

    #[test]
    fn letters_before_parenthesis_form_a_function_name() {
        assert_eq!(
            kinds_and_values("sin(x)"),
            expected(&[
                (TokenKind::Function, "sin"),
                (TokenKind::LeftParenthesis, "("),
                (TokenKind::Variable, "x"),
                (TokenKind::RightParenthesis, ")"),
            ])
        );
    }

    #[test]
    fn number_before_parenthesis_is_multiplied() {
        assert_eq!(
            kinds_and_values("2(a)"),
            expected(&[
                (TokenKind::Literal, "2"),
                (TIMES, "*"),
                (TokenKind::LeftParenthesis, "("),
                (TokenKind::Variable, "a"),
                (TokenKind::RightParenthesis, ")"),
            ])
        );
    }

    #[test]
    fn decimal_numbers_stay_together() {
        assert_eq!(
            kinds_and_values("456.7x"),
            expected(&[
                (TokenKind::Literal, "456.7"),
                (TIMES, "*"),
                (TokenKind::Variable, "x"),
            ])
        );
    }

    #[test]
    fn whitespace_and_alternative_glyphs_are_normalized() {
        assert_eq!(
            kinds_and_values(" 6 · a : 2 "),
            expected(&[
                (TokenKind::Literal, "6"),
                (TIMES, "*"),
                (TokenKind::Variable, "a"),
                (DIVIDE, "/"),
                (TokenKind::Literal, "2"),
            ])
        );
    }

    #[test]
    fn comma_separates_function_arguments() {
        assert_eq!(
            kinds_and_values("min(a,7)-b"),
            expected(&[
                (TokenKind::Function, "min"),
                (TokenKind::LeftParenthesis, "("),
                (TokenKind::Variable, "a"),
                (TokenKind::Comma, ","),
                (TokenKind::Literal, "7"),
                (TokenKind::RightParenthesis, ")"),
                (MINUS, "-"),
                (TokenKind::Variable, "b"),
            ])
        );
    }

    #[test]
    fn unrecognized_characters_are_skipped() {
        assert_eq!(
            kinds_and_values("a+#b"),
            expected(&[
                (TokenKind::Variable, "a"),
                (PLUS, "+"),
                (TokenKind::Variable, "b"),
            ])
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn ids_are_sequential_within_a_call() {
        let ids: Vec<u64> = tokenize("a+b*c")
            .iter()
            .map(|token| token.id().value())
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn separate_calls_restart_ids() {
        let first = tokenize("a+b");
        let second = tokenize("a+b");

        assert_eq!(first, second);
    }

    #[test]
    fn shared_allocator_keeps_ids_unique_across_calls() {
        let mut ids = IdAllocator::new();
        let first = tokenize_with("a+b", &mut ids);
        let second = tokenize_with("c", &mut ids);

        assert_eq!(second[0].id().value(), first.len() as u64 + 1);
    }

    #[parameterized(
    expression = {
    "(2+a)(3-b)",
    "89sin(sqrt(45))/3^4+2.2xy/7",
    "sin(7a+3b)^2",
    },
    expected_count = {
    11,
    21,
    12,
    }
    )]
    fn realistic_expressions_produce_expected_token_counts(
        expression: &str,
        expected_count: usize,
    ) {
        assert_eq!(tokenize(expression).len(), expected_count);
    }
}
