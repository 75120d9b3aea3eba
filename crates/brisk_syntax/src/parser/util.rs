/// Names, paths and literal decoding.
impl Parser {
    /// Consume an identifier and return its text and span.
    fn identifier(cursor: &mut Cursor<'_, '_>, message: &str) -> Result<(Ident, Span), CompileError> {
        let token = cursor.require(TokenKind::Ident, message)?;
        Ok((token.text.to_string(), token.span()))
    }

    /// `a` or `a::b::c`
    fn path(cursor: &mut Cursor<'_, '_>, message: &str) -> Result<Path, CompileError> {
        let (first, _) = Self::identifier(cursor, message)?;
        let mut segments = vec![first];
        while Self::eat_punct(cursor, PunctuationId::ColonColon) {
            let (segment, _) = Self::identifier(cursor, "Expected name after '::'")?;
            segments.push(segment);
        }
        Ok(Path::new(segments))
    }
}

/// Decode a decimal or `0x` hexadecimal integer literal.
fn parse_int(token: &Token<'_>) -> Result<i64, CompileError> {
    parse_signed_int(token, false)
}

/// Decode an integer literal, negated when `negative` is set.
///
/// The magnitude is read unsigned so that `-9223372036854775808` is in range.
fn parse_signed_int(token: &Token<'_>, negative: bool) -> Result<i64, CompileError> {
    let text = token.text;
    let magnitude = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse::<u64>().ok(),
    };
    let value = magnitude.and_then(|m| {
        if negative {
            0i64.checked_sub_unsigned(m)
        } else {
            i64::try_from(m).ok()
        }
    });
    let sign = if negative { "-" } else { "" };
    value.ok_or_else(|| {
        CompileError::invalid_operation(format!("Integer literal {sign}{text} is out of range"), token.span())
    })
}

fn parse_float(token: &Token<'_>) -> Result<f64, CompileError> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| CompileError::syntax(format!("Malformed float literal {}", token.text), token.span()))
}

/// Strip the quotes off a string literal and decode its escapes.
fn unescape_string(token: &Token<'_>) -> Result<String, CompileError> {
    unescape(token, '"')
}

/// Decode a char literal; it must hold exactly one character.
fn unescape_char(token: &Token<'_>) -> Result<char, CompileError> {
    let decoded = unescape(token, '\'')?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CompileError::syntax("Char literal must hold exactly one character", token.span())),
    }
}

fn unescape(token: &Token<'_>, quote: char) -> Result<String, CompileError> {
    let body = token
        .text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(token.text);

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, 'r')) => '\r',
            Some((_, '0')) => '\0',
            Some((_, '\\')) => '\\',
            Some((_, '"')) => '"',
            Some((_, '\'')) => '\'',
            Some((index, other)) => {
                // +1 for the opening quote, -1 for the backslash.
                let start = token.offset + index;
                return Err(CompileError::syntax(
                    format!("Unknown escape sequence '\\{other}'"),
                    Span::new(start, start + 1 + other.len_utf8()),
                ));
            }
            None => return Err(CompileError::syntax("Dangling '\\' in literal", token.span())),
        };
        out.push(decoded);
    }
    Ok(out)
}
