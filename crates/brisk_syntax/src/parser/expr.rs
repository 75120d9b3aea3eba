/// Expression parsing (precedence climbing).
///
/// This chunk implements the expression grammar:
/// - Infix operators climb on the `brisk_core` operator table (precedence + associativity)
/// - Prefix operators (`- + ! ~`) take their operand at their own band, so `-2 ** 2` is `-(2 ** 2)`
/// - Postfix member access, method calls and indexing
/// - Primary expressions: literals, paths, calls, parenthesized groups, array literals
///
/// Every operator node is constant-folded as soon as it is built.
///
/// ## Notes
/// - Parsing stops at the first token that cannot continue the expression, typically `;` or a depth-zero `,`, and
///   leaves the cursor on it.
/// - Relational and equality operators associate to the left: `a < b < c` is `(a < b) < c`.
impl Parser {
    /// Parse exactly one expression from `cursor`.
    ///
    /// ## Errors
    /// Returns a syntax error if no expression starts here, or any folding error.
    pub fn parse_expression(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        self.binary_expression(cursor, 0)
    }

    /// Parse operators whose precedence is at least `min_precedence`.
    fn binary_expression(&mut self, cursor: &mut Cursor<'_, '_>, min_precedence: u8) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let mut lhs = self.unary_expression(cursor)?;

        while let Some(token) = cursor.current() {
            let Some(op) = token.operator_id() else {
                break;
            };
            let info = operators::info_for(op);
            if !info.is_infix() || info.precedence < min_precedence {
                break;
            }
            cursor.advance();

            let next_min = match info.associativity {
                Associativity::Right => info.precedence,
                Associativity::Left => info.precedence + 1,
            };
            if cursor.is_exhausted() {
                return Err(cursor.error_here(&format!("Expected expression after '{}'", info.spelling)));
            }
            let rhs = self.binary_expression(cursor, next_min)?;

            let node = self.node(
                cursor.span_from(mark),
                NodeKind::BinaryOperator {
                    op,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
            );
            lhs = fold::fold(node)?;
        }

        Ok(lhs)
    }

    /// A prefix operator applied to everything above its band, or a postfix expression.
    fn unary_expression(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let prefix = cursor
            .current()
            .and_then(|t| t.operator_id())
            .filter(|op| operators::info_for(*op).is_prefix());
        let Some(op) = prefix else {
            return self.postfix_expression(cursor);
        };

        let mark = cursor.mark();
        cursor.advance();
        if op == OperatorId::Minus {
            if let Some(literal) = self.negative_int_literal(cursor, mark)? {
                return Ok(literal);
            }
        }
        let operand = self.binary_expression(cursor, operators::info_for(op).precedence + 1)?;
        let node = self.node(
            cursor.span_from(mark),
            NodeKind::UnaryOperator {
                op,
                operand: Box::new(operand),
            },
        );
        fold::fold(node)
    }

    /// Read `-<int>` as one literal so the full negative range, `i64::MIN` included, can be written.
    ///
    /// Declines (consuming nothing) when the digits are followed by something that binds tighter than the sign,
    /// as in `-2 ** 2`.
    fn negative_int_literal(&mut self, cursor: &mut Cursor<'_, '_>, mark: usize) -> Result<Option<Node>, CompileError> {
        let Some(token) = cursor.current().filter(|t| t.kind == TokenKind::Int) else {
            return Ok(None);
        };
        let sign = operators::info_for(OperatorId::Minus).precedence;
        let binds_tighter = cursor.peek_token(1).is_some_and(|next| {
            next.kind.is_punctuation(PunctuationId::Dot)
                || next.kind.is_punctuation(PunctuationId::LBracket)
                || next
                    .operator_id()
                    .is_some_and(|op| operators::info_for(op).is_infix() && operators::info_for(op).precedence > sign)
        });
        if binds_tighter {
            return Ok(None);
        }

        let value = parse_signed_int(token, true)?;
        cursor.advance();
        Ok(Some(self.node(cursor.span_from(mark), NodeKind::Literal(Literal::Int(value)))))
    }

    /// `primary ( .name | .name(args) | [index] )*`
    fn postfix_expression(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let mut expr = self.primary_expression(cursor)?;

        loop {
            if Self::eat_punct(cursor, PunctuationId::Dot) {
                let (member, _) = Self::identifier(cursor, "Expected member name after '.'")?;
                let kind = if cursor.peek(TokenKind::LPAREN, 0) {
                    let arguments = self.call_arguments(cursor)?;
                    NodeKind::MethodCall {
                        receiver: Box::new(expr),
                        method: member,
                        arguments,
                    }
                } else {
                    NodeKind::MemberAccess {
                        object: Box::new(expr),
                        member,
                    }
                };
                expr = self.node(cursor.span_from(mark), kind);
            } else if cursor.peek(TokenKind::LBRACKET, 0) {
                let mut inner = cursor.capture_block(TokenKind::LBRACKET, TokenKind::RBRACKET)?;
                let index = self.whole_expression(&mut inner, "index expression")?;
                expr = self.node(
                    cursor.span_from(mark),
                    NodeKind::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    },
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary_expression(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let Some(token) = cursor.current() else {
            return Err(cursor.error_here("Expected expression"));
        };
        let mark = cursor.mark();

        let literal = match token.kind {
            TokenKind::Int => Some(Literal::Int(parse_int(token)?)),
            TokenKind::Float => Some(Literal::Float(parse_float(token)?)),
            TokenKind::String => Some(Literal::String(unescape_string(token)?)),
            TokenKind::Char => Some(Literal::Char(unescape_char(token)?)),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Some(Literal::Null),
            _ => None,
        };
        if let Some(literal) = literal {
            cursor.advance();
            return Ok(self.node(token.span(), NodeKind::Literal(literal)));
        }

        match token.kind {
            TokenKind::Ident => {
                let path = Self::path(cursor, "Expected identifier")?;
                let kind = if cursor.peek(TokenKind::LPAREN, 0) {
                    NodeKind::FunctionCall {
                        callee: path,
                        arguments: self.call_arguments(cursor)?,
                    }
                } else {
                    NodeKind::Identifier(path)
                };
                Ok(self.node(cursor.span_from(mark), kind))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                let mut inner = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;
                let mut expr = self.whole_expression(&mut inner, "expression inside parentheses")?;
                expr.span = cursor.span_from(mark);
                Ok(expr)
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                let inner = cursor.capture_block(TokenKind::LBRACKET, TokenKind::RBRACKET)?;
                let items = self.expression_list(inner, "array element")?;
                Ok(self.node(cursor.span_from(mark), NodeKind::ArrayLiteral(items)))
            }
            _ => Err(cursor.error_here("Expected expression")),
        }
    }

    /// `( expr, expr, … )`
    fn call_arguments(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Vec<Node>, CompileError> {
        let inner = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;
        self.expression_list(inner, "argument")
    }
}
