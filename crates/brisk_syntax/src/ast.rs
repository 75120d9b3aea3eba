//! Abstract Syntax Tree definitions for Brisk
//!
//! One closed node enumeration, [`NodeKind`], with per-variant payloads. Every node exclusively owns its children
//! (plain `Box`/`Vec` ownership, no sharing). Upward lookups go through the parent index kept by [`Ast`], which is
//! built once after parsing and never participates in ownership.

use std::collections::HashMap;
use std::fmt;

use brisk_core::lang::operators::OperatorId;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifier text
pub type Ident = String;

/// Stable identity of a node within one parse, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node with identity and source location
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub span: Span,
    pub kind: NodeKind,
}

// ============================================================================
// Literals, paths and types
// ============================================================================

/// Literal value carried by a `Literal` node.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Char(char),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Int(_) | Literal::Float(_))
    }

    /// Short name of the literal's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Char(_) => "char",
            Literal::Bool(_) => "boolean",
            Literal::Null => "null",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{:?}", n),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Char(c) => write!(f, "{:?}", c),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
        }
    }
}

/// A namespace-qualified name: `a::b::c` carries `["a", "b", "c"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub segments: Vec<Ident>,
}

impl Path {
    pub fn new(segments: Vec<Ident>) -> Self {
        Self { segments }
    }

    pub fn single(name: impl Into<Ident>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("::"))
    }
}

/// Type reference: `i32`, `std::String`, `List<T>`, `u8[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub path: Path,
    pub arguments: Vec<TypeRef>,
    pub is_array: bool,
}

impl TypeRef {
    pub fn named(name: impl Into<Ident>) -> Self {
        Self {
            path: Path::single(name),
            arguments: Vec::new(),
            is_array: false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        if self.is_array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// `name : type [= initializer]`, also used for parameters, struct fields and catch bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: Ident,
    pub ty: TypeRef,
    pub is_const: bool,
    /// Set on a trailing `...` parameter.
    pub is_variadic: bool,
    pub initializer: Option<Box<Node>>,
}

impl VariableDecl {
    /// A variadic parameter is an array of its element type.
    pub fn is_array(&self) -> bool {
        self.ty.is_array || self.is_variadic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionModifiers {
    pub is_public: bool,
    pub is_external: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub modifiers: FunctionModifiers,
    /// `VariableDeclaration` nodes, in order.
    pub parameters: Vec<Node>,
    pub return_type: Option<TypeRef>,
    /// `None` for `external` functions.
    pub body: Option<Box<Node>>,
}

impl FunctionDecl {
    pub fn is_variadic(&self) -> bool {
        self.parameters
            .last()
            .and_then(Node::as_variable)
            .is_some_and(|p| p.is_variadic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    pub is_public: bool,
    pub generics: Vec<Ident>,
    /// Names from the `has A and B` clause.
    pub parents: Vec<Path>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Ident,
    pub is_public: bool,
    pub generics: Vec<Ident>,
    pub parents: Vec<Path>,
    /// `VariableDeclaration` nodes, in order.
    pub fields: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Ident,
    pub is_public: bool,
    pub members: Vec<EnumMember>,
}

impl EnumDecl {
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members.iter().find(|m| m.name == name).map(|m| m.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: Ident,
    pub value: i64,
    pub span: Span,
}

/// `case <literal> -> { … }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: Literal,
    pub span: Span,
    pub body: Box<Node>,
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ---- expressions ----
    Literal(Literal),
    Identifier(Path),
    BinaryOperator {
        op: OperatorId,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOperator {
        op: OperatorId,
        operand: Box<Node>,
    },
    FunctionCall {
        callee: Path,
        arguments: Vec<Node>,
    },
    MethodCall {
        receiver: Box<Node>,
        method: Ident,
        arguments: Vec<Node>,
    },
    MemberAccess {
        object: Box<Node>,
        member: Ident,
    },
    Index {
        object: Box<Node>,
        index: Box<Node>,
    },
    ArrayLiteral(Vec<Node>),

    // ---- blocks and declarations ----
    Block(Vec<Node>),
    VariableDeclaration(VariableDecl),
    FunctionDeclaration(FunctionDecl),
    ClassDeclaration(ClassDecl),
    StructureDeclaration(StructDecl),
    EnumerableDeclaration(EnumDecl),
    ModuleDeclaration {
        name: Ident,
        body: Box<Node>,
    },
    ImportStatement(String),

    // ---- control flow ----
    ConditionalStatement {
        condition: Box<Node>,
        then_block: Box<Node>,
        /// A `Block`, or a nested `ConditionalStatement` for `else if`.
        else_branch: Option<Box<Node>>,
    },
    SwitchStatement {
        scrutinee: Box<Node>,
        cases: Vec<SwitchCase>,
        default: Option<Box<Node>>,
    },
    WhileLoop {
        condition: Box<Node>,
        body: Box<Node>,
    },
    DoWhileLoop {
        body: Box<Node>,
        condition: Box<Node>,
    },
    ForLoop {
        initializer: Option<Box<Node>>,
        condition: Option<Box<Node>>,
        increment: Option<Box<Node>>,
        body: Box<Node>,
    },
    TryCatchStatement {
        try_block: Box<Node>,
        /// A `VariableDeclaration` node.
        binding: Box<Node>,
        catch_block: Box<Node>,
    },
    ReturnStatement(Option<Box<Node>>),
    ThrowStatement(Option<Box<Node>>),
    Break,
    Continue,
}

impl NodeKind {
    /// Variant name, for diagnostics and debug dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Literal(_) => "Literal",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::BinaryOperator { .. } => "BinaryOperator",
            NodeKind::UnaryOperator { .. } => "UnaryOperator",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::MethodCall { .. } => "MethodCall",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::Index { .. } => "Index",
            NodeKind::ArrayLiteral(_) => "ArrayLiteral",
            NodeKind::Block(_) => "Block",
            NodeKind::VariableDeclaration(_) => "VariableDeclaration",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::StructureDeclaration(_) => "StructureDeclaration",
            NodeKind::EnumerableDeclaration(_) => "EnumerableDeclaration",
            NodeKind::ModuleDeclaration { .. } => "ModuleDeclaration",
            NodeKind::ImportStatement(_) => "ImportStatement",
            NodeKind::ConditionalStatement { .. } => "ConditionalStatement",
            NodeKind::SwitchStatement { .. } => "SwitchStatement",
            NodeKind::WhileLoop { .. } => "WhileLoop",
            NodeKind::DoWhileLoop { .. } => "DoWhileLoop",
            NodeKind::ForLoop { .. } => "ForLoop",
            NodeKind::TryCatchStatement { .. } => "TryCatchStatement",
            NodeKind::ReturnStatement(_) => "ReturnStatement",
            NodeKind::ThrowStatement(_) => "ThrowStatement",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
        }
    }
}

impl Node {
    pub fn new(id: NodeId, span: Span, kind: NodeKind) -> Self {
        Self { id, span, kind }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            NodeKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Block(stmts) => Some(stmts),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match &self.kind {
            NodeKind::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Owned children in source order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            NodeKind::Literal(_)
            | NodeKind::Identifier(_)
            | NodeKind::ImportStatement(_)
            | NodeKind::EnumerableDeclaration(_)
            | NodeKind::Break
            | NodeKind::Continue => {}
            NodeKind::BinaryOperator { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            NodeKind::UnaryOperator { operand, .. } => out.push(operand),
            NodeKind::FunctionCall { arguments, .. } => out.extend(arguments),
            NodeKind::MethodCall {
                receiver, arguments, ..
            } => {
                out.push(receiver);
                out.extend(arguments);
            }
            NodeKind::MemberAccess { object, .. } => out.push(object),
            NodeKind::Index { object, index } => {
                out.push(object);
                out.push(index);
            }
            NodeKind::ArrayLiteral(items) | NodeKind::Block(items) => out.extend(items),
            NodeKind::VariableDeclaration(decl) => out.extend(decl.initializer.as_deref()),
            NodeKind::FunctionDeclaration(decl) => {
                out.extend(&decl.parameters);
                out.extend(decl.body.as_deref());
            }
            NodeKind::ClassDeclaration(decl) => out.push(&decl.body),
            NodeKind::StructureDeclaration(decl) => out.extend(&decl.fields),
            NodeKind::ModuleDeclaration { body, .. } => out.push(body),
            NodeKind::ConditionalStatement {
                condition,
                then_block,
                else_branch,
            } => {
                out.push(condition);
                out.push(then_block);
                out.extend(else_branch.as_deref());
            }
            NodeKind::SwitchStatement {
                scrutinee,
                cases,
                default,
            } => {
                out.push(scrutinee);
                out.extend(cases.iter().map(|c| &*c.body));
                out.extend(default.as_deref());
            }
            NodeKind::WhileLoop { condition, body } => {
                out.push(condition);
                out.push(body);
            }
            NodeKind::DoWhileLoop { body, condition } => {
                out.push(body);
                out.push(condition);
            }
            NodeKind::ForLoop {
                initializer,
                condition,
                increment,
                body,
            } => {
                out.extend(initializer.as_deref());
                out.extend(condition.as_deref());
                out.extend(increment.as_deref());
                out.push(body);
            }
            NodeKind::TryCatchStatement {
                try_block,
                binding,
                catch_block,
            } => {
                out.push(try_block);
                out.push(binding);
                out.push(catch_block);
            }
            NodeKind::ReturnStatement(value) | NodeKind::ThrowStatement(value) => out.extend(value.as_deref()),
        }
        out
    }

    /// Pre-order traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

// ============================================================================
// Tree with parent index
// ============================================================================

/// A parsed compilation unit: the root `Block` plus a child → parent index.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    root: Node,
    parents: HashMap<NodeId, NodeId>,
}

impl Ast {
    pub fn new(root: Node) -> Self {
        let mut parents = HashMap::new();
        for node in root.walk() {
            for child in node.children() {
                parents.insert(child.id, node.id);
            }
        }
        Self { root, parents }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Top-level statements of the root block.
    pub fn statements(&self) -> &[Node] {
        self.root.as_block().unwrap_or_default()
    }

    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.walk().find(|n| n.id == id)
    }

    /// Non-owning upward lookup. `None` for the root.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Enclosing nodes from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_of(id), move |current| self.parent_of(*current))
    }
}
