use crate::interpreter::operator::{Associativity, BinaryOperator};
use crate::interpreter::parser::error::ParseError;
use crate::interpreter::syntax::term_node::TermNode;
use crate::interpreter::token::{Token, TokenKind};
use log::trace;

/// Builds an expression tree directly from infix tokens, reducing operators into nodes
/// instead of writing them out in postfix order.
pub(super) fn build_tree(tokens: Vec<Token>) -> Result<TermNode, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut yard = ShuntingYard {
        operators: Vec::new(),
        output: Vec::new(),
        group_starts: Vec::new(),
    };

    for token in tokens {
        match token.kind() {
            TokenKind::Literal | TokenKind::Variable => {
                yard.output.push(TermNode::new_leaf(token))
            }
            TokenKind::Function => yard.operators.push(token),
            TokenKind::LeftParenthesis => {
                yard.group_starts.push(yard.output.len());
                yard.operators.push(token)
            }
            TokenKind::Operator(operator) => yard.parse_operator_token(token, operator)?,
            TokenKind::RightParenthesis => yard.parse_closing_parenthesis_token()?,
            TokenKind::Comma => return Err(yard.comma_error()),
        }
    }

    yard.reduce_leftover_operators()?;
    yard.into_root()
}

struct ShuntingYard {
    /// Operators, functions and open parentheses awaiting reduction.
    operators: Vec<Token>,
    output: Vec<TermNode>,
    /// Length of `output` when each still open parenthesis was read. Nothing below the
    /// innermost mark can be taken as an operand inside that group.
    group_starts: Vec<usize>,
}

impl ShuntingYard {
    fn parse_operator_token(
        &mut self,
        token: Token,
        operator: BinaryOperator,
    ) -> Result<(), ParseError> {
        // Right-associative operators never reduce what is below them.
        while let Some(top_operator) = self.operators.last().and_then(Token::operator) {
            if operator.associativity() != Associativity::Left
                || !operator.precedence_le(&top_operator)
            {
                break;
            }
            self.pop_and_reduce_operator()?;
        }

        self.operators.push(token);
        Ok(())
    }

    fn parse_closing_parenthesis_token(&mut self) -> Result<(), ParseError> {
        loop {
            match self.operators.last().map(Token::kind) {
                None => return Err(ParseError::UnmatchedParenthesis),
                Some(TokenKind::LeftParenthesis) => break,
                Some(TokenKind::Operator(_)) => self.pop_and_reduce_operator()?,
                // A function that was never opened with a parenthesis.
                Some(_) => return Err(ParseError::UnmatchedParenthesis),
            }
        }
        // Discard the open parenthesis.
        self.operators.pop();
        let group_start = self.group_starts.pop().unwrap_or(0);

        if let Some(TokenKind::Function) = self.operators.last().map(Token::kind) {
            if let Some(function) = self.operators.pop() {
                match self.output.len().saturating_sub(group_start) {
                    0 => {
                        return Err(ParseError::MissingOperand {
                            token: function.value().to_string(),
                        })
                    }
                    1 => self.reduce_function(function)?,
                    _ => {
                        return Err(ParseError::MultipleArguments {
                            function: function.value().to_string(),
                        })
                    }
                }
            }
        }
        Ok(())
    }

    fn reduce_leftover_operators(&mut self) -> Result<(), ParseError> {
        while let Some(top) = self.operators.last() {
            match top.kind() {
                TokenKind::Operator(_) => self.pop_and_reduce_operator()?,
                _ => return Err(ParseError::UnmatchedParenthesis),
            }
        }
        Ok(())
    }

    fn pop_and_reduce_operator(&mut self) -> Result<(), ParseError> {
        match self.operators.pop() {
            Some(operator) => self.reduce_operator(operator),
            None => Err(ParseError::UnmatchedParenthesis),
        }
    }

    /// The first operand popped is the right one, keeping the operands in reading order.
    fn reduce_operator(&mut self, operator: Token) -> Result<(), ParseError> {
        let right_operand = self.pop_operand(&operator)?;
        let left_operand = self.pop_operand(&operator)?;
        trace!("Reducing {} {} {}", left_operand, operator, right_operand);
        self.output
            .push(TermNode::new_operation(operator, left_operand, right_operand));
        Ok(())
    }

    fn reduce_function(&mut self, function: Token) -> Result<(), ParseError> {
        let argument = self.pop_operand(&function)?;
        trace!("Reducing {}({})", function, argument);
        self.output.push(TermNode::new_function(function, argument));
        Ok(())
    }

    /// Only takes operands produced inside the innermost open group.
    fn pop_operand(&mut self, token: &Token) -> Result<TermNode, ParseError> {
        let group_start = self.group_starts.last().copied().unwrap_or(0);
        if self.output.len() <= group_start {
            return Err(ParseError::MissingOperand {
                token: token.value().to_string(),
            });
        }
        self.output.pop().ok_or_else(|| ParseError::MissingOperand {
            token: token.value().to_string(),
        })
    }

    /// Arguments are not separated, so a comma inside a function call means it was given
    /// more than one.
    fn comma_error(&self) -> ParseError {
        let enclosing = self
            .operators
            .iter()
            .rev()
            .skip_while(|token| token.kind() != TokenKind::LeftParenthesis)
            .nth(1);
        match enclosing {
            Some(function) if function.kind() == TokenKind::Function => {
                ParseError::MultipleArguments {
                    function: function.value().to_string(),
                }
            }
            _ => ParseError::MisplacedComma,
        }
    }

    fn into_root(mut self) -> Result<TermNode, ParseError> {
        match self.output.len() {
            0 => Err(ParseError::EmptyExpression),
            1 => self.output.pop().ok_or(ParseError::EmptyExpression),
            count => Err(ParseError::MultipleRoots { count }),
        }
    }
}
