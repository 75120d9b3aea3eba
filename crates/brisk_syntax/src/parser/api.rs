/// Parse a token list into an [`Ast`].
///
/// This is the main public entrypoint for parsing. Comment tokens are dropped before parsing starts.
///
/// ## Parameters
/// - `tokens`: Token list produced by `brisk_syntax::lexer`.
///
/// ## Errors
/// Returns the first [`CompileError`]; no partial tree is produced.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token<'_>]) -> Result<Ast, CompileError> {
    let significant: Vec<Token<'_>> = tokens.iter().copied().filter(|t| !t.kind.is_trivia()).collect();
    let mut cursor = Cursor::new(&significant);
    let ast = Parser::new().parse_program(&mut cursor)?;
    tracing::debug!(statements = ast.statements().len(), "parsed program");
    Ok(ast)
}

/// Parse a token list holding exactly one expression.
///
/// ## Errors
/// Returns a syntax error if tokens remain after the expression.
pub fn parse_expression(tokens: &[Token<'_>]) -> Result<Node, CompileError> {
    let significant: Vec<Token<'_>> = tokens.iter().copied().filter(|t| !t.kind.is_trivia()).collect();
    let mut cursor = Cursor::new(&significant);
    Parser::new().whole_expression(&mut cursor, "expression")
}
