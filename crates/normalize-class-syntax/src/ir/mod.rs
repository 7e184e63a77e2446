//! Syntax tree consumed by the writers.
//!
//! The tree is built by an external parser; this crate never sees source
//! text. Every node is plain data and derives serde so a parser written in
//! another process can hand a tree over as JSON (see [`SourceFile::from_json`]).
//!
//! Expressions are not modelled. Return statements, expression statements,
//! and initializers carry their source text verbatim.

use crate::traits::TranslateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming each kind of node the writers visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Namespace,
    Class,
    Field,
    Property,
    Method,
    Block,
    Try,
    Catch,
    Return,
    ExpressionStatement,
    VariableDeclaration,
    Parameter,
    Accessor,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Namespace => "namespace",
            NodeKind::Class => "class",
            NodeKind::Field => "field",
            NodeKind::Property => "property",
            NodeKind::Method => "method",
            NodeKind::Block => "block",
            NodeKind::Try => "try statement",
            NodeKind::Catch => "catch clause",
            NodeKind::Return => "return statement",
            NodeKind::ExpressionStatement => "expression statement",
            NodeKind::VariableDeclaration => "variable declaration",
            NodeKind::Parameter => "parameter",
            NodeKind::Accessor => "accessor",
        };
        f.write_str(s)
    }
}

/// Keyword tokens attached to a declaration.
///
/// Only [`Modifier::Public`] has any effect on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Readonly,
    Const,
    Async,
    Extern,
    New,
    Partial,
    Unsafe,
    Volatile,
}

impl Modifier {
    /// Source keyword for this modifier.
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Virtual => "virtual",
            Modifier::Override => "override",
            Modifier::Sealed => "sealed",
            Modifier::Readonly => "readonly",
            Modifier::Const => "const",
            Modifier::Async => "async",
            Modifier::Extern => "extern",
            Modifier::New => "new",
            Modifier::Partial => "partial",
            Modifier::Unsafe => "unsafe",
            Modifier::Volatile => "volatile",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Textual type expression at a declaration site (`int`, `string`, `IOException`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(pub String);

impl TypeRef {
    /// Placeholder a local declaration uses when its type is inferred.
    pub const INFERRED: &'static str = "var";

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn inferred() -> Self {
        Self(Self::INFERRED.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inferred(&self) -> bool {
        self.0 == Self::INFERRED
    }
}

impl From<&str> for TypeRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of a translation: the declarations of one source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    /// Deserialize a tree produced by an external parser.
    pub fn from_json(json: &str) -> Result<Self, TranslateError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Top-level or namespace-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Namespace(Namespace),
    Class(Class),
}

impl Declaration {
    pub fn kind(&self) -> NodeKind {
        match self {
            Declaration::Namespace(_) => NodeKind::Namespace,
            Declaration::Class(_) => NodeKind::Class,
        }
    }
}

impl From<Namespace> for Declaration {
    fn from(ns: Namespace) -> Self {
        Declaration::Namespace(ns)
    }
}

impl From<Class> for Declaration {
    fn from(class: Class) -> Self {
        Declaration::Class(class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            declarations,
        }
    }
}

/// Class declaration. Base types are not represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Class {
    pub fn new(modifiers: Vec<Modifier>, name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            modifiers,
            name: name.into(),
            members,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Field(Field),
    Property(Property),
    Method(Method),
    Class(Class),
}

impl Member {
    pub fn kind(&self) -> NodeKind {
        match self {
            Member::Field(_) => NodeKind::Field,
            Member::Property(_) => NodeKind::Property,
            Member::Method(_) => NodeKind::Method,
            Member::Class(_) => NodeKind::Class,
        }
    }
}

impl From<Field> for Member {
    fn from(field: Field) -> Self {
        Member::Field(field)
    }
}

impl From<Property> for Member {
    fn from(property: Property) -> Self {
        Member::Property(property)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}

impl From<Class> for Member {
    fn from(class: Class) -> Self {
        Member::Class(class)
    }
}

/// One identifier bound by a field or variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    /// Initializer expression text, without the `=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl Declarator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, text: impl Into<String>) -> Self {
        self.initializer = Some(text.into());
        self
    }
}

/// Field statement; several identifiers may share one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub declarators: Vec<Declarator>,
}

impl Field {
    pub fn new(modifiers: Vec<Modifier>, ty: impl Into<TypeRef>, names: &[&str]) -> Self {
        Self {
            modifiers,
            ty: ty.into(),
            declarators: names.iter().map(|n| Declarator::new(*n)).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

impl AccessorKind {
    pub fn is_getter(self) -> bool {
        matches!(self, AccessorKind::Get)
    }
}

/// `get`/`set` accessor of a property. Its own modifiers are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    pub kind: AccessorKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub body: Option<Block>,
}

impl Accessor {
    /// Accessor without a body, as in `{ get; set; }`.
    pub fn auto(kind: AccessorKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(kind: AccessorKind, body: Block) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: String,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
}

impl Property {
    pub fn new(
        modifiers: Vec<Modifier>,
        ty: impl Into<TypeRef>,
        name: impl Into<String>,
        accessors: Vec<Accessor>,
    ) -> Self {
        Self {
            modifiers,
            ty: ty.into(),
            name: name.into(),
            accessors,
        }
    }

    /// True when no accessor has a body (abstract or auto-implemented).
    pub fn is_auto(&self) -> bool {
        self.accessors.iter().all(|a| a.body.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<TypeRef>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub return_type: TypeRef,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub body: Block,
}

impl Method {
    pub fn new(
        modifiers: Vec<Modifier>,
        return_type: impl Into<TypeRef>,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        body: Block,
    ) -> Self {
        Self {
            modifiers,
            return_type: return_type.into(),
            name: name.into(),
            parameters,
            body,
        }
    }
}

/// Ordered statement list. Brackets belong to the construct owning the block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Block(Block),
    Try(TryStmt),
    /// Full statement text, e.g. `return a + b;`.
    Return { text: String },
    /// Full statement text, e.g. `Console.WriteLine(x);`.
    Expression { text: String },
    Var(VarDecl),
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::Block(_) => NodeKind::Block,
            Stmt::Try(_) => NodeKind::Try,
            Stmt::Return { .. } => NodeKind::Return,
            Stmt::Expression { .. } => NodeKind::ExpressionStatement,
            Stmt::Var(_) => NodeKind::VariableDeclaration,
        }
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Stmt::Block(Block::new(statements))
    }

    pub fn return_stmt(text: impl Into<String>) -> Self {
        Stmt::Return { text: text.into() }
    }

    pub fn expr(text: impl Into<String>) -> Self {
        Stmt::Expression { text: text.into() }
    }

    pub fn var(ty: impl Into<TypeRef>, declarators: Vec<Declarator>) -> Self {
        Stmt::Var(VarDecl {
            ty: ty.into(),
            declarators,
        })
    }

    pub fn try_catch(body: Block, catches: Vec<CatchClause>) -> Self {
        Stmt::Try(TryStmt {
            body,
            catches,
            finally: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    pub body: Block,
    #[serde(default)]
    pub catches: Vec<CatchClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finally: Option<Block>,
}

/// Catch clause. The caught exception type is not represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub body: Block,
}

impl CatchClause {
    pub fn new(identifier: Option<&str>, body: Block) -> Self {
        Self {
            identifier: identifier.map(str::to_string),
            body,
        }
    }
}

/// Local variable declaration statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub declarators: Vec<Declarator>,
}
