/// Declaration parsing.
///
/// This chunk parses variables, functions, classes, structs, enums, modules and imports.
///
/// ## Notes
/// - Modifiers come first and each may appear once: `public` applies to `fn`, `class`, `struct` and `enum`;
///   `external` and `async` apply to `fn` only.
/// - Variables always carry a `: type`; the initializer is optional.
impl Parser {
    // ========================================================================
    // Variables
    // ========================================================================

    /// `let|var|const name: type [= expr] (, name: type [= expr])* ;`
    fn variable_statement(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Vec<Node>, CompileError> {
        let is_const = Self::at_keyword(cursor, KeywordId::Const);
        cursor.advance(); // 'let' / 'var' / 'const'

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.variable_declarator(cursor, is_const)?);
            if !cursor.consume(TokenKind::COMMA) {
                break;
            }
        }
        Self::expect_semicolon(cursor, "variable declaration")?;
        Ok(declarations)
    }

    /// `name: type [= expr]`
    ///
    /// The node is filled in step by step (name, then type, then initializer) and only built once complete.
    fn variable_declarator(&mut self, cursor: &mut Cursor<'_, '_>, is_const: bool) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let (name, _) = Self::identifier(cursor, "Expected variable name")?;
        cursor.require(TokenKind::COLON, "Expected ':' after variable name")?;
        let ty = self.type_ref(cursor)?;
        let initializer = if Self::eat_op(cursor, OperatorId::Eq) {
            Some(Box::new(self.parse_expression(cursor)?))
        } else {
            None
        };

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::VariableDeclaration(VariableDecl {
                name,
                ty,
                is_const,
                is_variadic: false,
                initializer,
            }),
        ))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Modifier keywords followed by the declaration they modify.
    fn modified_declaration(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let mut modifiers = FunctionModifiers::default();
        let mut function_only: Option<(Span, &str)> = None;

        while let Some(token) = cursor.current() {
            let (flag, name) = match token.keyword_id() {
                Some(KeywordId::Public) => (&mut modifiers.is_public, "public"),
                Some(KeywordId::External) => (&mut modifiers.is_external, "external"),
                Some(KeywordId::Async) => (&mut modifiers.is_async, "async"),
                _ => break,
            };
            if *flag {
                return Err(CompileError::semantic(
                    format!("Duplicate modifier '{name}'"),
                    token.span(),
                ));
            }
            *flag = true;
            if name != "public" && function_only.is_none() {
                function_only = Some((token.span(), name));
            }
            cursor.advance();
        }

        match cursor.current_kind() {
            Some(TokenKind::Keyword(KeywordId::Fn)) => self.function_declaration(cursor, modifiers, mark),
            Some(TokenKind::Keyword(kw @ (KeywordId::Class | KeywordId::Struct | KeywordId::Enum))) => {
                if let Some((span, name)) = function_only {
                    return Err(CompileError::semantic(
                        format!("Modifier '{name}' only applies to function declarations"),
                        span,
                    ));
                }
                match kw {
                    KeywordId::Class => self.class_declaration(cursor, true, mark),
                    KeywordId::Struct => self.struct_declaration(cursor, true, mark),
                    _ => self.enum_declaration(cursor, true, mark),
                }
            }
            _ => Err(cursor.error_here("Expected a declaration after modifiers")),
        }
    }

    /// `fn name(params) [-> type] { … }`, or `…;` without a body when `external`.
    fn function_declaration(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        modifiers: FunctionModifiers,
        mark: usize,
    ) -> Result<Node, CompileError> {
        cursor.require(TokenKind::Keyword(KeywordId::Fn), "Expected 'fn'")?;
        let (name, _) = Self::identifier(cursor, "Expected function name")?;
        let params = cursor.capture_block(TokenKind::LPAREN, TokenKind::RPAREN)?;
        let parameters = self.parameters(params)?;

        let return_type = if Self::eat_punct(cursor, PunctuationId::Arrow) {
            Some(self.type_ref(cursor)?)
        } else {
            None
        };

        let body = if modifiers.is_external {
            Self::expect_semicolon(cursor, "external function declaration")?;
            None
        } else {
            Some(Box::new(self.block_body(cursor)?))
        };

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::FunctionDeclaration(FunctionDecl {
                name,
                modifiers,
                parameters,
                return_type,
                body,
            }),
        ))
    }

    /// Comma-separated parameters; at most one `...` variadic, and only in last position.
    fn parameters(&mut self, mut cursor: Cursor<'_, '_>) -> Result<Vec<Node>, CompileError> {
        let mut parameters: Vec<Node> = Vec::new();
        while cursor.has_next() {
            let mut item = cursor.take_until(TokenKind::COMMA);
            if let Some(variadic) = parameters.last().filter(|p| p.as_variable().is_some_and(|v| v.is_variadic)) {
                return Err(CompileError::semantic(
                    "Variadic parameter must be the last parameter",
                    variadic.span,
                ));
            }
            let parameter = self.parameter(&mut item)?;
            item.expect_exhausted("in parameter list")?;
            parameters.push(parameter);
        }
        Ok(parameters)
    }

    /// `name: type`, `name: type[]` or `name: type...`
    fn parameter(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        let (name, _) = Self::identifier(cursor, "Expected parameter name")?;
        cursor.require(TokenKind::COLON, "Expected ':' after parameter name")?;
        let ty = self.type_ref(cursor)?;

        let mut is_variadic = false;
        if Self::eat_punct(cursor, PunctuationId::Ellipsis) {
            if ty.is_array || Self::at_array_suffix(cursor) {
                return Err(CompileError::semantic(
                    format!("Parameter '{name}' cannot be both an array '[]' and variadic '...'"),
                    cursor.span_from(mark),
                ));
            }
            is_variadic = true;
        }

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::VariableDeclaration(VariableDecl {
                name,
                ty,
                is_const: false,
                is_variadic,
                initializer: None,
            }),
        ))
    }

    // ========================================================================
    // Types: classes, structs, enums
    // ========================================================================

    /// `class Name [<A, B>] [has P and Q] { statements }`
    fn class_declaration(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        is_public: bool,
        mark: usize,
    ) -> Result<Node, CompileError> {
        cursor.advance(); // 'class'
        let (name, _) = Self::identifier(cursor, "Expected class name")?;
        let generics = self.generic_params(cursor)?;
        let parents = self.parent_clause(cursor)?;
        let body = self.block_body(cursor)?;

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::ClassDeclaration(ClassDecl {
                name,
                is_public,
                generics,
                parents,
                body: Box::new(body),
            }),
        ))
    }

    /// `struct Name [<A, B>] [has P and Q] { [var|let|const] field: type [= expr] (;|,) … }`
    fn struct_declaration(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        is_public: bool,
        mark: usize,
    ) -> Result<Node, CompileError> {
        cursor.advance(); // 'struct'
        let (name, _) = Self::identifier(cursor, "Expected struct name")?;
        let generics = self.generic_params(cursor)?;
        let parents = self.parent_clause(cursor)?;

        let mut body = cursor.capture_block(TokenKind::LBRACE, TokenKind::RBRACE)?;
        let mut fields = Vec::new();
        loop {
            while Self::eat_member_separator(&mut body) {}
            if body.is_exhausted() {
                break;
            }
            let is_const = Self::eat_keyword(&mut body, KeywordId::Const);
            if !is_const && !Self::eat_keyword(&mut body, KeywordId::Var) {
                Self::eat_keyword(&mut body, KeywordId::Let);
            }
            fields.push(self.variable_declarator(&mut body, is_const)?);
            if body.has_next() && !Self::eat_member_separator(&mut body) {
                return Err(body.error_here("Expected ';' or ',' between struct fields"));
            }
        }

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::StructureDeclaration(StructDecl {
                name,
                is_public,
                generics,
                parents,
                fields,
            }),
        ))
    }

    /// `enum Name { MEMBER [= [-]int] (,|;) … }`
    ///
    /// Members without an explicit value take the previous value plus one, starting at zero.
    fn enum_declaration(
        &mut self,
        cursor: &mut Cursor<'_, '_>,
        is_public: bool,
        mark: usize,
    ) -> Result<Node, CompileError> {
        cursor.advance(); // 'enum'
        let (name, _) = Self::identifier(cursor, "Expected enum name")?;
        let mut body = cursor.capture_block(TokenKind::LBRACE, TokenKind::RBRACE)?;

        let mut members: Vec<EnumMember> = Vec::new();
        let mut next_value: Option<i64> = Some(0);
        loop {
            while Self::eat_member_separator(&mut body) {}
            if body.is_exhausted() {
                break;
            }
            let member_mark = body.mark();
            let (member, member_span) = Self::identifier(&mut body, "Expected enum member name")?;
            if !is_macro_case(&member) {
                return Err(CompileError::semantic(
                    format!("Enum member '{member}' must be MACRO_CASE"),
                    member_span,
                ));
            }
            if members.iter().any(|m| m.name == member) {
                return Err(CompileError::semantic(
                    format!("Duplicate enum member '{member}'"),
                    member_span,
                ));
            }

            let value = if Self::eat_op(&mut body, OperatorId::Eq) {
                let negative = Self::eat_op(&mut body, OperatorId::Minus);
                let token = body.require(TokenKind::Int, "Expected integer value for enum member")?;
                parse_signed_int(token, negative)?
            } else {
                next_value.ok_or_else(|| {
                    CompileError::invalid_operation(
                        format!("Enum member '{member}' overflows the integer range"),
                        member_span,
                    )
                })?
            };
            next_value = value.checked_add(1);

            members.push(EnumMember {
                name: member,
                value,
                span: body.span_from(member_mark),
            });
            if body.has_next() && !Self::eat_member_separator(&mut body) {
                return Err(body.error_here("Expected ',' or ';' between enum members"));
            }
        }

        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::EnumerableDeclaration(EnumDecl {
                name,
                is_public,
                members,
            }),
        ))
    }

    /// `has A and B::C …`
    fn parent_clause(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Vec<Path>, CompileError> {
        let mut parents = Vec::new();
        if Self::eat_keyword(cursor, KeywordId::Has) {
            loop {
                parents.push(Self::path(cursor, "Expected parent name after 'has'")?);
                if !Self::eat_keyword(cursor, KeywordId::And) {
                    break;
                }
            }
        }
        Ok(parents)
    }

    fn eat_member_separator(cursor: &mut Cursor<'_, '_>) -> bool {
        cursor.consume(TokenKind::SEMICOLON) || cursor.consume(TokenKind::COMMA)
    }

    // ========================================================================
    // Modules and imports
    // ========================================================================

    /// `module name { statements }`
    fn module_declaration(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'module'
        let (name, _) = Self::identifier(cursor, "Expected module name")?;
        let body = self.block_body(cursor)?;
        Ok(self.node(
            cursor.span_from(mark),
            NodeKind::ModuleDeclaration {
                name,
                body: Box::new(body),
            },
        ))
    }

    /// `import "path";`
    fn import_statement(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Node, CompileError> {
        let mark = cursor.mark();
        cursor.advance(); // 'import'
        let token = cursor.require(TokenKind::String, "Expected module path string after 'import'")?;
        let path = unescape_string(token)?;
        Self::expect_semicolon(cursor, "import")?;
        Ok(self.node(cursor.span_from(mark), NodeKind::ImportStatement(path)))
    }
}

/// `MACRO_CASE`: an uppercase ASCII letter followed by uppercase letters, digits and underscores.
fn is_macro_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
