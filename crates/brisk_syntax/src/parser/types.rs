/// Type references and generic parameter lists.
///
/// ## Notes
/// - Type argument lists are read token by token rather than captured: the lexer's longest match turns the `>>`
///   that closes `Map<str, List<i32>>` into one shift operator, and that token has to close two lists.
/// - Generic parameter lists on declarations hold plain names, so they are captured with `capture_block(<, >)`.
impl Parser {
    /// `path [<T, U>] [[]]`
    fn type_ref(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<TypeRef, CompileError> {
        let mark = cursor.mark();
        let mut split_closer = false;
        let ty = self.nested_type_ref(cursor, &mut split_closer)?;
        if split_closer {
            return Err(CompileError::imbalanced(
                "Imbalanced closure: '>' has no matching '<'",
                cursor.span_from(mark),
            ));
        }
        Ok(ty)
    }

    /// Parse one type. `split_closer` is set when a `>>` closed this type's argument list and the second `>` is
    /// still owed to the enclosing list.
    fn nested_type_ref(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        split_closer: &mut bool,
    ) -> Result<TypeRef, CompileError> {
        let path = Self::path(cursor, "Expected type name")?;

        let mut arguments = Vec::new();
        if let Some(opener) = cursor.current().filter(|t| t.kind == TokenKind::LT) {
            cursor.advance();
            loop {
                arguments.push(self.nested_type_ref(cursor, split_closer)?);
                if *split_closer {
                    *split_closer = false;
                    break;
                }
                if cursor.consume(TokenKind::COMMA) {
                    continue;
                }
                if cursor.consume(TokenKind::GT) {
                    break;
                }
                if cursor.consume(TokenKind::Operator(OperatorId::Shr)) {
                    *split_closer = true;
                    break;
                }
                if cursor.is_exhausted() {
                    return Err(CompileError::imbalanced(
                        "Imbalanced closure: '<' is never closed by '>'",
                        opener.span(),
                    ));
                }
                return Err(cursor.error_here("Expected ',' or '>' in type arguments"));
            }
        }

        // `List<List<i32>>[]`: the suffix belongs to the list the split `>>` still has to close.
        let is_array = !*split_closer && Self::at_array_suffix(cursor);
        if is_array {
            cursor.take(2);
        }

        Ok(TypeRef {
            path,
            arguments,
            is_array,
        })
    }

    /// Return `true` if the next two tokens are `[` `]`.
    fn at_array_suffix(cursor: &Cursor<'_, '_>) -> bool {
        cursor.peek(TokenKind::LBRACKET, 0) && cursor.peek(TokenKind::RBRACKET, 1)
    }

    /// Optional `<A, B>` list of generic parameter names.
    fn generic_params(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Vec<Ident>, CompileError> {
        if !cursor.peek(TokenKind::LT, 0) {
            return Ok(Vec::new());
        }
        let mut inner = cursor.capture_block(TokenKind::LT, TokenKind::GT)?;
        let mut names = Vec::new();
        loop {
            let (name, span) = Self::identifier(&mut inner, "Expected generic parameter name")?;
            if names.contains(&name) {
                return Err(CompileError::semantic(
                    format!("Duplicate generic parameter '{name}'"),
                    span,
                ));
            }
            names.push(name);
            if !inner.consume(TokenKind::COMMA) {
                break;
            }
        }
        inner.expect_exhausted("in generic parameters")?;
        Ok(names)
    }
}
