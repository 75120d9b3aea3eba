/// Statement parsing: the block dispatcher and control flow.
///
/// ## Notes
/// - `parse_block` inspects the current token kind and dispatches to one production; declarations live in
///   `decl.rs`.
/// - A statement-level expression must start with an identifier and end with `;`.
impl Parser {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse statements until `cursor` is exhausted.
    ///
    /// ## Errors
    /// - A stray closing delimiter is an `ImbalancedClosure` error.
    /// - Any other token that cannot start a statement is a syntax error.
    pub fn parse_block(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Vec<Node>, CompileError> {
        let mut statements = Vec::new();
        while cursor.has_next() {
            self.statement(cursor, &mut statements)?;
        }
        Ok(statements)
    }

    /// Parse one statement, appending the node(s) it produces to `out`.
    fn statement(&mut self, cursor: &mut Cursor<'_, '_>, out: &mut Vec<Node>) -> Result<(), CompileError> {
        let Some(kind) = cursor.current_kind() else {
            return Ok(());
        };
        let mark = cursor.mark();

        let node = match kind {
            TokenKind::Keyword(KeywordId::Let | KeywordId::Var | KeywordId::Const) => {
                out.extend(self.variable_statement(cursor)?);
                return Ok(());
            }
            TokenKind::Keyword(KeywordId::Public | KeywordId::External | KeywordId::Async) => {
                self.modified_declaration(cursor)?
            }
            TokenKind::Keyword(KeywordId::Fn) => {
                self.function_declaration(cursor, FunctionModifiers::default(), mark)?
            }
            TokenKind::Keyword(KeywordId::Class) => self.class_declaration(cursor, false, mark)?,
            TokenKind::Keyword(KeywordId::Struct) => self.struct_declaration(cursor, false, mark)?,
            TokenKind::Keyword(KeywordId::Enum) => self.enum_declaration(cursor, false, mark)?,
            TokenKind::Keyword(KeywordId::Module) => self.module_declaration(cursor)?,
            TokenKind::Keyword(KeywordId::Import) => self.import_statement(cursor)?,
            TokenKind::Keyword(KeywordId::If) => self.if_statement(cursor)?,
            TokenKind::Keyword(KeywordId::While) => self.while_loop(cursor)?,
            TokenKind::Keyword(KeywordId::Do) => self.do_while_loop(cursor)?,
            TokenKind::Keyword(KeywordId::For) => self.for_loop(cursor)?,
            TokenKind::Keyword(KeywordId::Switch) => self.switch_statement(cursor)?,
            TokenKind::Keyword(KeywordId::Try) => self.try_catch(cursor)?,
            TokenKind::Keyword(KeywordId::Return) => self.return_like(cursor, true)?,
            TokenKind::Keyword(KeywordId::Throw) => self.return_like(cursor, false)?,
            TokenKind::Keyword(KeywordId::Break) => self.loop_jump(cursor, NodeKind::Break, "'break'")?,
            TokenKind::Keyword(KeywordId::Continue) => self.loop_jump(cursor, NodeKind::Continue, "'continue'")?,
            TokenKind::Ident => self.expression_statement(cursor)?,
            TokenKind::Punctuation(PunctuationId::Semicolon) => {
                cursor.advance();
                return Ok(());
            }
            // A token is present, so this always reports it.
            _ => return cursor.expect_exhausted("where a statement was expected"),
        };

        tracing::trace!(kind = node.kind.name(), id = %node.id, "parsed statement");
        out.push(node);
        Ok(())
    }

    /// `ident …;`: assignments and calls.
    fn expression_statement(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let expr = self.parse_expression(cursor)?;
        Self::expect_semicolon(cursor, "expression")?;
        Ok(expr)
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `if (cond) { … } [else if (cond) { … }]* [else { … }]`
    fn if_statement(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'if'
        let condition = self.paren_expression(cursor, "condition")?;
        let then_block = self.block_body(cursor)?;

        let else_branch = if Self::eat_keyword(cursor, KeywordId::Else) {
            if Self::at_keyword(cursor, KeywordId::If) {
                Some(Box::new(self.if_statement(cursor)?))
            } else {
                Some(Box::new(self.block_body(cursor)?))
            }
        } else {
            None
        };

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::ConditionalStatement {
                condition: Box::new(condition),
                then_block: Box::new(then_block),
                else_branch,
            },
        ))
    }

    /// `while (cond) { … }`
    fn while_loop(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'while'
        let condition = self.paren_expression(cursor, "loop condition")?;
        let body = self.block_body(cursor)?;
        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::WhileLoop {
                condition: Box::new(condition),
                body: Box::new(body),
            },
        ))
    }

    /// `do { … } while (cond);` (the trailing `;` is optional)
    fn do_while_loop(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'do'
        let body = self.block_body(cursor)?;
        cursor.require(TokenKind::Keyword(KeywordId::While), "Expected 'while' after do block")?;
        let condition = self.paren_expression(cursor, "loop condition")?;
        cursor.consume(TokenKind::SEMICOLON);
        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::DoWhileLoop {
                body: Box::new(body),
                condition: Box::new(condition),
            },
        ))
    }

    /// `for (init; cond; step) { … }`, every clause optional.
    ///
    /// The header is split on depth-zero semicolons, so `for (i = f(a; b); …)` style nesting cannot confuse it.
    fn for_loop(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'for'
        let mut header = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;

        let Some(init_len) = header.distance_to(TokenKind::SEMICOLON) else {
            return Err(header.error_here("Expected ';' after for-loop initializer"));
        };
        let mut init = header.take(init_len);
        header.advance(); // ';'

        let Some(cond_len) = header.distance_to(TokenKind::SEMICOLON) else {
            return Err(header.error_here("Expected ';' after for-loop condition"));
        };
        let mut cond = header.take(cond_len);
        header.advance(); // ';'

        let initializer = if init.is_exhausted() {
            None
        } else {
            Some(Box::new(self.for_initializer(&mut init)?))
        };
        let condition = if cond.is_exhausted() {
            None
        } else {
            Some(Box::new(self.whole_expression(&mut cond, "loop condition")?))
        };
        let increment = if header.is_exhausted() {
            None
        } else {
            Some(Box::new(self.whole_expression(&mut header, "loop increment")?))
        };
        let body = self.block_body(cursor)?;

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::ForLoop {
                initializer,
                condition,
                increment,
                body: Box::new(body),
            },
        ))
    }

    /// A declaration (several names become a `Block`) or a plain expression.
    fn for_initializer(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let declares = [KeywordId::Let, KeywordId::Var, KeywordId::Const]
            .into_iter()
            .any(|kw| Self::at_keyword(cursor, kw));
        if !declares {
            return self.whole_expression(cursor, "loop initializer");
        }

        let mark = cursor.mark();
        let is_const = Self::eat_keyword(cursor, KeywordId::Const);
        if !is_const {
            cursor.advance(); // 'let' / 'var'
        }
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.variable_declarator(cursor, is_const)?);
            if !cursor.consume(TokenKind::COMMA) {
                break;
            }
        }
        cursor.expect_exhausted("in for-loop initializer")?;

        if declarations.len() == 1 {
            Ok(declarations.remove(0))
        } else {
            Ok(self.node(cursor.span_from(mark), NodeKind::Block(declarations)))
        }
    }

    /// `switch (expr) { case <literal> -> { … } … default -> { … } }`
    fn switch_statement(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'switch'
        let scrutinee = self.paren_expression(cursor, "switch value")?;
        let mut body = cursor.capture_block(TokenKind::LBRACE, TokenKind::RBRACE)?;

        let mut cases = Vec::new();
        let mut default: Option<Box<Node>> = None;
        while body.has_next() {
            let case_mark = body.mark();
            if Self::eat_keyword(&mut body, KeywordId::Case) {
                let Some(label_len) = body.distance_to(TokenKind::Punctuation(PunctuationId::Arrow)) else {
                    return Err(body.error_here("Expected '->' after case value"));
                };
                let mut label = body.take(label_len);
                body.advance(); // '->'
                let value = self.whole_expression(&mut label, "case value")?;
                let Some(literal) = value.as_literal().cloned() else {
                    return Err(CompileError::semantic(
                        "Case label must be a constant literal",
                        value.span,
                    ));
                };
                let case_body = self.block_body(&mut body)?;
                cases.push(SwitchCase {
                    value: literal,
                    span: body.span_from(case_mark),
                    body: Box::new(case_body),
                });
            } else if Self::at_keyword(&body, KeywordId::Default) {
                let keyword_span = body.current_span();
                body.advance(); // 'default'
                if default.is_some() {
                    return Err(CompileError::semantic("Duplicate 'default' case in switch", keyword_span));
                }
                body.require(TokenKind::Punctuation(PunctuationId::Arrow), "Expected '->' after 'default'")?;
                default = Some(Box::new(self.block_body(&mut body)?));
            } else {
                return Err(body.error_here("Expected 'case' or 'default' in switch body"));
            }
        }

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::SwitchStatement {
                scrutinee: Box::new(scrutinee),
                cases,
                default,
            },
        ))
    }

    /// `try { … } catch (name: type) { … }`
    fn try_catch(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'try'
        let try_block = self.block_body(cursor)?;
        cursor.require(TokenKind::Keyword(KeywordId::Catch), "Expected 'catch' after try block")?;

        let mut params = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;
        if params.is_exhausted() {
            return Err(params.error_here("Expected exception binding 'name: type'"));
        }
        let binding = self.variable_declarator(&mut params, false)?;
        if params.peek(TokenKind::COMMA, 0) {
            return Err(CompileError::semantic(
                "A catch clause takes exactly one binding",
                params.current_span(),
            ));
        }
        params.expect_exhausted("in catch binding")?;

        let catch_block = self.block_body(cursor)?;
        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::TryCatchStatement {
                try_block: Box::new(try_block),
                binding: Box::new(binding),
                catch_block: Box::new(catch_block),
            },
        ))
    }

    /// `return [expr];` or `throw [expr];`
    fn return_like(&mut self, cursor: &mut Cursor<'_, '_>, is_return: bool) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'return' / 'throw'
        let value = if cursor.peek(TokenKind::SEMICOLON, 0) {
            None
        } else {
            Some(Box::new(self.parse_expression(cursor)?))
        };
        Self::expect_semicolon(cursor, if is_return { "return statement" } else { "throw statement" })?;

        let kind = if is_return {
            NodeKind::ReturnStatement(value)
        } else {
            NodeKind::ThrowStatement(value)
        };
        Ok(self.node(cursor.span_from(mark), kind))
    }

    /// `break;` / `continue;`
    fn loop_jump(&mut self, cursor: &mut Cursor<'_, '_>, kind: NodeKind, what: &str) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance();
        Self::expect_semicolon(cursor, what)?;
        Ok(self.node(cursor.span_from(mark), kind))
    }
}
