// Parser core types and entrypoint.
//
// This chunk defines the `Parser` type and its top-level `parse_program()` entrypoint.
// It is `include!`'d into `crate::parser` to keep all parser methods in a single module.

/// Parser state.
///
/// ## Notes
/// - The token list is not owned by the parser: every production receives the [`Cursor`] it should read from, which
///   is either the top-level cursor or a sub-cursor carved by block capture.
/// - The only state is the node id counter, so ids are unique within one parse and increase in creation order
///   (children before their parents).
#[derive(Debug, Default)]
pub struct Parser {
    next_id: u32,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every statement of `cursor` into the root `Block` of an [`Ast`].
    ///
    /// ## Errors
    /// Returns the first [`CompileError`] encountered.
    pub fn parse_program(&mut self, cursor: &mut Cursor<'_, '_>) -> Result<Ast, CompileError> {
        let mark = cursor.mark();
        let statements = self.parse_block(cursor)?;
        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => cursor.span_from(mark),
        };
        let root = self.node(span, NodeKind::Block(statements));
        Ok(Ast::new(root))
    }

    /// Allocate a node with the next id.
    fn node(&mut self, span: Span, kind: NodeKind) -> Node {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Node::new(id, span, kind)
    }
}
