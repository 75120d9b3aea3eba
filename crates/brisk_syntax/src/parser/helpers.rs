/// Shared building blocks for the grammar productions.
///
/// This chunk contains the small primitives most productions are assembled from:
/// - Keyword checks on a cursor (`at_keyword`, `eat_keyword`)
/// - Braced bodies and parenthesized conditions via block capture
/// - Comma-separated lists split with depth-zero `distance_to`
impl Parser {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is the given keyword.
    fn at_keyword(cursor: &Cursor<'_, '_>, id: KeywordId) -> bool {
        cursor.current_kind().is_some_and(|k| k.is_keyword(id))
    }

    /// If the current token is the given keyword, consume it and return `true`.
    fn eat_keyword(cursor: &mut Cursor<'_, '_>, id: KeywordId) -> bool {
        cursor.consume(TokenKind::Keyword(id))
    }

    fn eat_punct(cursor: &mut Cursor<'_, '_>, id: PunctuationId) -> bool {
        cursor.consume(TokenKind::Punctuation(id))
    }

    fn eat_op(cursor: &mut Cursor<'_, '_>, id: OperatorId) -> bool {
        cursor.consume(TokenKind::Operator(id))
    }

    /// Require a terminating `;`.
    fn expect_semicolon(cursor: &mut Cursor<'_, '_>, after: &str) -> Result<(), CompileError> {
        cursor
            .require(TokenKind::SEMICOLON, &format!("Expected ';' after {after}"))
            .map(|_| ())
    }

    /// Parse a `{ … }` body as a nested statement block.
    fn block_body(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let mut inner = cursor.capture_block(TokenKind::LBRACE, TokenKind::RBRACE)?;
        let statements = self.parse_block(&mut inner)?;
        Ok(self.node(cursor.span_from(mark), NodeKind::Block(statements)))
    }

    /// Parse a parenthesized expression such as an `if` or `while` condition.
    fn paren_expression(&mut self, cursor: &mut Cursor<'_, '_>, what: &str) -> Result<Node, CompileError> {
        let mut inner = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;
        self.whole_expression(&mut inner, what)
    }

    /// Parse the entire view as exactly one expression.
    fn whole_expression(&mut self, cursor: &mut Cursor<'_, '_>, what: &str) -> Result<Node, CompileError> {
        if cursor.is_exhausted() {
            return Err(cursor.error_here(&format!("Expected {what}")));
        }
        let expr = self.parse_expression(cursor)?;
        cursor.expect_exhausted(&format!("after {what}"))?;
        Ok(expr)
    }

    /// Split `cursor` on depth-zero commas and parse each piece as an expression.
    ///
    /// A single trailing comma is accepted; empty items are not.
    fn expression_list(&mut self, mut cursor: Cursor<'_, '_>, what: &str) -> Result<Vec<Node>, CompileError> {
        let mut items = Vec::new();
        while cursor.has_next() {
            let mut item = cursor.take_until(TokenKind::COMMA);
            items.push(self.whole_expression(&mut item, what)?);
        }
        Ok(items)
    }
}
