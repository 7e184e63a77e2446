//! TypeScript writer for class-based syntax trees.
//!
//! Namespaces become `module` blocks, classes keep their shape, and members
//! are rewritten with output-side type annotations:
//!
//! ```text
//! namespace App {                 module App
//!   public class Foo {            {
//!     int x;             ──>          public class Foo
//!   }                                 {
//! }                                       private x: number;
//!                                     }
//!                                 }
//! ```
//!
//! # Limitations
//!
//! - Expressions are not re-walked. Return statements, expression statements
//!   and initializers are copied verbatim, so any source-specific syntax
//!   inside them (calls, operators, literals) passes through unchanged.
//! - Only the `public` modifier is honoured; `static`, `abstract`,
//!   `readonly` and the rest are dropped.
//! - Base classes, interfaces and catch-clause exception types are not
//!   represented in the tree and never emitted.

use super::emitter::{DEFAULT_INDENT_WIDTH, Emitter};
use crate::ir::*;
use crate::mapping::{DEFAULT_NUMBER_TYPE, DEFAULT_STRING_TYPE, TypeMapper, map_visibility};
use crate::traits::{TranslateError, Writer};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Static instance of the TypeScript writer.
pub static TYPESCRIPT_WRITER: TypeScriptWriterImpl = TypeScriptWriterImpl;

/// TypeScript writer implementing the Writer trait.
pub struct TypeScriptWriterImpl;

impl Writer for TypeScriptWriterImpl {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn write(&self, file: &SourceFile) -> Result<String, TranslateError> {
        TypeScriptWriter::emit(file)
    }
}

/// Options for TypeScript output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Output name for the numeric bucket.
    pub number_type: String,
    /// Output name for the string bucket (the fallback).
    pub string_type: String,
    pub line_terminator: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            number_type: DEFAULT_NUMBER_TYPE.to_string(),
            string_type: DEFAULT_STRING_TYPE.to_string(),
            line_terminator: "\n".to_string(),
        }
    }
}

/// Walks a syntax tree and emits TypeScript.
///
/// The writer owns no output state: every `visit_*` method appends to the
/// [`Emitter`] it is given, so one writer can serve any number of runs.
pub struct TypeScriptWriter {
    mapper: TypeMapper,
    options: WriterOptions,
}

impl TypeScriptWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            mapper: TypeMapper::new(&options.number_type, &options.string_type),
            options,
        }
    }

    /// Replace the type mapper, e.g. one extended with extra rules.
    pub fn with_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Emit a source file to TypeScript with default options.
    pub fn emit(file: &SourceFile) -> Result<String, TranslateError> {
        Self::new().translate(file)
    }

    /// A fresh emitter laid out per the writer options.
    pub fn emitter(&self) -> Emitter {
        Emitter::with_layout(self.options.indent_width, self.options.line_terminator.clone())
    }

    /// Translate a whole file. Returns no output at all if any node is malformed.
    pub fn translate(&self, file: &SourceFile) -> Result<String, TranslateError> {
        let mut out = self.emitter();
        if let Err(err) = self.visit_file(file, &mut out) {
            debug!(error = %err, "translation failed");
            return Err(err);
        }
        debug!(
            declarations = file.declarations.len(),
            lines = out.lines().len(),
            "translated source file"
        );
        Ok(out.finalize())
    }

    pub fn visit_file(&self, file: &SourceFile, out: &mut Emitter) -> Result<(), TranslateError> {
        for decl in &file.declarations {
            self.visit_declaration(decl, out)?;
        }
        Ok(())
    }

    pub fn visit_declaration(
        &self,
        decl: &Declaration,
        out: &mut Emitter,
    ) -> Result<(), TranslateError> {
        match decl {
            Declaration::Namespace(ns) => self.visit_namespace(ns, out),
            Declaration::Class(class) => self.visit_class(class, out),
        }
    }

    pub fn visit_namespace(&self, ns: &Namespace, out: &mut Emitter) -> Result<(), TranslateError> {
        let name = require_name(&ns.name, NodeKind::Namespace)?;
        trace!(namespace = name, "visit namespace");
        out.emit_fmt(format_args!("module {name}"));
        let mut scope = out.open_scope();
        for decl in &ns.declarations {
            self.visit_declaration(decl, &mut scope)?;
        }
        Ok(())
    }

    pub fn visit_class(&self, class: &Class, out: &mut Emitter) -> Result<(), TranslateError> {
        let name = require_name(&class.name, NodeKind::Class)?;
        trace!(class = name, members = class.members.len(), "visit class");
        let visibility = map_visibility(&class.modifiers);
        out.emit_fmt(format_args!("{visibility} class {name}"));
        let mut scope = out.open_scope();
        for member in &class.members {
            self.visit_member(member, &mut scope)?;
        }
        Ok(())
    }

    pub fn visit_member(&self, member: &Member, out: &mut Emitter) -> Result<(), TranslateError> {
        match member {
            Member::Field(field) => self.visit_field(field, out),
            Member::Property(property) => self.visit_property(property, out),
            Member::Method(method) => self.visit_method(method, out),
            Member::Class(class) => self.visit_class(class, out),
        }
    }

    /// One line per declared identifier. Field initializers are not emitted.
    pub fn visit_field(&self, field: &Field, out: &mut Emitter) -> Result<(), TranslateError> {
        if field.declarators.is_empty() {
            return Err(TranslateError::EmptyDeclaration {
                kind: NodeKind::Field,
            });
        }
        let visibility = map_visibility(&field.modifiers);
        let ty = self.mapper.map(&field.ty);
        for declarator in &field.declarators {
            let name = require_name(&declarator.name, NodeKind::Field)?;
            out.emit_fmt(format_args!("{visibility} {name}: {ty};"));
        }
        Ok(())
    }

    /// Auto properties collapse to one line; otherwise each accessor with a
    /// body becomes its own `get`/`set` block. Accessors take the property's
    /// visibility.
    pub fn visit_property(
        &self,
        property: &Property,
        out: &mut Emitter,
    ) -> Result<(), TranslateError> {
        let name = require_name(&property.name, NodeKind::Property)?;
        let visibility = map_visibility(&property.modifiers);
        let ty = self.mapper.map(&property.ty);

        if property.is_auto() {
            out.emit_fmt(format_args!("{visibility} {name}: {ty}"));
            return Ok(());
        }

        for accessor in &property.accessors {
            let Some(body) = &accessor.body else {
                continue;
            };
            if accessor.kind.is_getter() {
                out.emit_fmt(format_args!("{visibility} get {name}: {ty}"));
            } else {
                out.emit_fmt(format_args!("{visibility} set {name}(value: {ty})"));
            }
            let mut scope = out.open_scope();
            self.visit_block(body, &mut scope)?;
        }
        Ok(())
    }

    pub fn visit_method(&self, method: &Method, out: &mut Emitter) -> Result<(), TranslateError> {
        let name = require_name(&method.name, NodeKind::Method)?;
        trace!(method = name, "visit method");
        let visibility = map_visibility(&method.modifiers);
        let params = method
            .parameters
            .iter()
            .map(|param| -> Result<String, TranslateError> {
                let param_name = require_name(&param.name, NodeKind::Parameter)?;
                Ok(format!("{}: {}", param_name, self.mapper.map(&param.ty)))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");
        let ret = self.mapper.map(&method.return_type);

        out.emit_fmt(format_args!("{visibility} {name}({params}): {ret}"));
        let mut scope = out.open_scope();
        self.visit_block(&method.body, &mut scope)?;
        Ok(())
    }

    /// Visit statements in order. A block never opens a scope of its own;
    /// the owning construct does.
    pub fn visit_block(&self, block: &Block, out: &mut Emitter) -> Result<(), TranslateError> {
        for stmt in &block.statements {
            self.visit_stmt(stmt, out)?;
        }
        Ok(())
    }

    pub fn visit_stmt(&self, stmt: &Stmt, out: &mut Emitter) -> Result<(), TranslateError> {
        match stmt {
            Stmt::Block(block) => self.visit_block(block, out),
            Stmt::Try(try_stmt) => self.visit_try(try_stmt, out),
            Stmt::Return { text } | Stmt::Expression { text } => {
                out.emit_line(text);
                Ok(())
            }
            Stmt::Var(decl) => self.visit_var_decl(decl, out),
        }
    }

    pub fn visit_try(&self, try_stmt: &TryStmt, out: &mut Emitter) -> Result<(), TranslateError> {
        out.emit_line("try");
        {
            let mut scope = out.open_scope();
            self.visit_block(&try_stmt.body, &mut scope)?;
        }

        for catch in &try_stmt.catches {
            match catch.identifier.as_deref() {
                Some(ident) if !ident.is_empty() => out.emit_fmt(format_args!("catch ({ident})")),
                _ => out.emit_line("catch"),
            }
            let mut scope = out.open_scope();
            self.visit_block(&catch.body, &mut scope)?;
        }

        if let Some(finally) = &try_stmt.finally {
            out.emit_line("finally");
            let mut scope = out.open_scope();
            self.visit_block(finally, &mut scope)?;
        }
        Ok(())
    }

    /// `var x: T = init;`. Several declarators share one statement, each on its
    /// own line aligned under the first; only the last keeps its initializer.
    pub fn visit_var_decl(&self, decl: &VarDecl, out: &mut Emitter) -> Result<(), TranslateError> {
        if decl.declarators.is_empty() {
            return Err(TranslateError::EmptyDeclaration {
                kind: NodeKind::VariableDeclaration,
            });
        }
        let type_clause = if decl.ty.is_inferred() {
            String::new()
        } else {
            format!(": {}", self.mapper.map(&decl.ty))
        };

        let last = decl.declarators.len() - 1;
        let items = decl
            .declarators
            .iter()
            .enumerate()
            .map(|(i, declarator)| -> Result<String, TranslateError> {
                let name = require_name(&declarator.name, NodeKind::VariableDeclaration)?;
                let mut item = format!("{name}{type_clause}");
                if i == last
                    && let Some(init) = &declarator.initializer
                {
                    item.push_str(" = ");
                    item.push_str(init);
                }
                Ok(item)
            })
            .collect::<Result<Vec<_>, _>>()?;

        out.emit_aligned("var ", &items, ";");
        Ok(())
    }
}

impl Default for TypeScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn require_name(name: &str, kind: NodeKind) -> Result<&str, TranslateError> {
    if name.trim().is_empty() {
        Err(TranslateError::MissingName { kind })
    } else {
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{TypePattern, TypeRule, TypeTarget};

    fn lines_of<F>(visit: F) -> Vec<String>
    where
        F: FnOnce(&TypeScriptWriter, &mut Emitter) -> Result<(), TranslateError>,
    {
        let writer = TypeScriptWriter::new();
        let mut out = writer.emitter();
        visit(&writer, &mut out).expect("visit failed");
        out.lines().to_vec()
    }

    #[test]
    fn test_class_with_field() {
        let class = Class::new(
            vec![Modifier::Public],
            "Foo",
            vec![Field::new(vec![Modifier::Private], "int", &["x"]).into()],
        );
        let lines = lines_of(|w, out| w.visit_class(&class, out));
        assert_eq!(lines, ["public class Foo", "{", "    private x: number;", "}"]);
    }

    #[test]
    fn test_field_with_several_identifiers() {
        let field = Field::new(vec![Modifier::Public], "string", &["first", "last"]);
        let lines = lines_of(|w, out| w.visit_field(&field, out));
        assert_eq!(lines, ["public first: string;", "public last: string;"]);
    }

    #[test]
    fn test_method() {
        let method = Method::new(
            vec![Modifier::Public],
            "int",
            "Add",
            vec![Parameter::new("int", "a"), Parameter::new("int", "b")],
            Block::new(vec![Stmt::return_stmt("return a + b;")]),
        );
        let lines = lines_of(|w, out| w.visit_method(&method, out));
        assert_eq!(
            lines,
            [
                "public Add(a: number, b: number): number",
                "{",
                "    return a + b;",
                "}"
            ]
        );
    }

    #[test]
    fn test_method_without_parameters() {
        let method = Method::new(vec![], "void", "Run", vec![], Block::default());
        let lines = lines_of(|w, out| w.visit_method(&method, out));
        assert_eq!(lines, ["private Run(): void", "{", "}"]);
    }

    #[test]
    fn test_nested_block_is_flattened() {
        let method = Method::new(
            vec![],
            "void",
            "Run",
            vec![],
            Block::new(vec![
                Stmt::expr("a();"),
                Stmt::block(vec![Stmt::expr("b();"), Stmt::block(vec![Stmt::expr("c();")])]),
            ]),
        );
        let lines = lines_of(|w, out| w.visit_method(&method, out));
        assert_eq!(
            lines,
            ["private Run(): void", "{", "    a();", "    b();", "    c();", "}"]
        );
    }

    #[test]
    fn test_auto_property() {
        let property = Property::new(
            vec![Modifier::Public],
            "string",
            "Name",
            vec![
                Accessor::auto(AccessorKind::Get),
                Accessor::auto(AccessorKind::Set),
            ],
        );
        let lines = lines_of(|w, out| w.visit_property(&property, out));
        assert_eq!(lines, ["public Name: string"]);
    }

    #[test]
    fn test_property_without_accessors() {
        let property = Property::new(vec![], "int", "Count", vec![]);
        let lines = lines_of(|w, out| w.visit_property(&property, out));
        assert_eq!(lines, ["private Count: number"]);
    }

    #[test]
    fn test_property_accessors_use_property_visibility() {
        let mut setter = Accessor::with_body(
            AccessorKind::Set,
            Block::new(vec![Stmt::expr("_count = value;")]),
        );
        setter.modifiers = vec![Modifier::Private];
        let property = Property::new(
            vec![Modifier::Public],
            "int",
            "Count",
            vec![
                Accessor::with_body(
                    AccessorKind::Get,
                    Block::new(vec![Stmt::return_stmt("return _count;")]),
                ),
                setter,
            ],
        );
        let lines = lines_of(|w, out| w.visit_property(&property, out));
        assert_eq!(
            lines,
            [
                "public get Count: number",
                "{",
                "    return _count;",
                "}",
                "public set Count(value: number)",
                "{",
                "    _count = value;",
                "}"
            ]
        );
    }

    #[test]
    fn test_property_skips_bodiless_accessor() {
        let property = Property::new(
            vec![Modifier::Public],
            "string",
            "Name",
            vec![
                Accessor::with_body(
                    AccessorKind::Get,
                    Block::new(vec![Stmt::return_stmt("return _name;")]),
                ),
                Accessor::auto(AccessorKind::Set),
            ],
        );
        let lines = lines_of(|w, out| w.visit_property(&property, out));
        assert_eq!(
            lines,
            ["public get Name: string", "{", "    return _name;", "}"]
        );
    }

    #[test]
    fn test_init_accessor_is_setter() {
        let property = Property::new(
            vec![],
            "string",
            "Id",
            vec![Accessor::with_body(AccessorKind::Init, Block::default())],
        );
        let lines = lines_of(|w, out| w.visit_property(&property, out));
        assert_eq!(lines, ["private set Id(value: string)", "{", "}"]);
    }

    #[test]
    fn test_try_catch_finally() {
        let mut stmt = TryStmt {
            body: Block::new(vec![Stmt::expr("Work();")]),
            catches: vec![
                CatchClause::new(Some("ex"), Block::new(vec![Stmt::expr("Log(ex);")])),
                CatchClause::new(None, Block::default()),
            ],
            finally: None,
        };
        stmt.finally = Some(Block::new(vec![Stmt::expr("Close();")]));
        let lines = lines_of(|w, out| w.visit_try(&stmt, out));
        assert_eq!(
            lines,
            [
                "try",
                "{",
                "    Work();",
                "}",
                "catch (ex)",
                "{",
                "    Log(ex);",
                "}",
                "catch",
                "{",
                "}",
                "finally",
                "{",
                "    Close();",
                "}"
            ]
        );
    }

    #[test]
    fn test_var_single() {
        let decl = VarDecl {
            ty: "int".into(),
            declarators: vec![Declarator::new("x").with_initializer("5")],
        };
        let lines = lines_of(|w, out| w.visit_var_decl(&decl, out));
        assert_eq!(lines, ["var x: number = 5;"]);
    }

    #[test]
    fn test_var_inferred_without_initializer() {
        let decl = VarDecl {
            ty: TypeRef::inferred(),
            declarators: vec![Declarator::new("x")],
        };
        let lines = lines_of(|w, out| w.visit_var_decl(&decl, out));
        assert_eq!(lines, ["var x;"]);
    }

    #[test]
    fn test_var_inferred_with_initializer() {
        let decl = VarDecl {
            ty: TypeRef::inferred(),
            declarators: vec![Declarator::new("items").with_initializer("new List<int>()")],
        };
        let lines = lines_of(|w, out| w.visit_var_decl(&decl, out));
        assert_eq!(lines, ["var items = new List<int>();"]);
    }

    #[test]
    fn test_var_multiple_keeps_last_initializer_only() {
        let decl = VarDecl {
            ty: "int".into(),
            declarators: vec![
                Declarator::new("a").with_initializer("1"),
                Declarator::new("b"),
                Declarator::new("c").with_initializer("5"),
            ],
        };
        let lines = lines_of(|w, out| w.visit_var_decl(&decl, out));
        assert_eq!(
            lines,
            ["var a: number,", "    b: number,", "    c: number = 5;"]
        );
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let writer = TypeScriptWriter::new();
        let mut out = writer.emitter();
        let field = Field::new(vec![], "int", &[]);
        let err = writer.visit_field(&field, &mut out).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::EmptyDeclaration {
                kind: NodeKind::Field
            }
        ));
        assert!(out.lines().is_empty());
    }

    #[test]
    fn test_error_inside_method_closes_scopes() {
        let writer = TypeScriptWriter::new();
        let mut out = writer.emitter();
        let class = Class::new(
            vec![],
            "Broken",
            vec![
                Method::new(
                    vec![],
                    "void",
                    "Run",
                    vec![],
                    Block::new(vec![
                        Stmt::expr("a();"),
                        Stmt::var("int", vec![]),
                        Stmt::expr("b();"),
                    ]),
                )
                .into(),
            ],
        );
        let err = writer.visit_class(&class, &mut out).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::EmptyDeclaration {
                kind: NodeKind::VariableDeclaration
            }
        ));
        assert_eq!(out.depth(), 0);
        assert_eq!(
            out.lines(),
            [
                "private class Broken",
                "{",
                "    private Run(): void",
                "    {",
                "        a();",
                "    }",
                "}"
            ]
        );
    }

    #[test]
    fn test_missing_parameter_name() {
        let method = Method::new(
            vec![],
            "void",
            "Run",
            vec![Parameter::new("int", " ")],
            Block::default(),
        );
        let writer = TypeScriptWriter::new();
        let mut out = writer.emitter();
        let err = writer.visit_method(&method, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "parameter has an empty name");
        assert!(out.lines().is_empty());
    }

    #[test]
    fn test_options() {
        let options: WriterOptions =
            serde_json::from_str(r#"{ "indent_width": 2, "number_type": "i32" }"#).unwrap();
        assert_eq!(options.string_type, "string");
        let writer = TypeScriptWriter::with_options(options);
        let file = SourceFile::new(vec![
            Class::new(vec![], "C", vec![Field::new(vec![], "int", &["n"]).into()]).into(),
        ]);
        assert_eq!(
            writer.translate(&file).unwrap(),
            "private class C\n{\n  private n: i32;\n}"
        );
    }

    #[test]
    fn test_custom_mapper() {
        let mapper = TypeMapper::default().with_rule(TypeRule::new(
            TypePattern::Exact("bool".into()),
            TypeTarget::Named("boolean".into()),
        ));
        let writer = TypeScriptWriter::new().with_mapper(mapper);
        let mut out = writer.emitter();
        writer
            .visit_field(&Field::new(vec![], "bool", &["done"]), &mut out)
            .unwrap();
        assert_eq!(out.lines(), ["private done: boolean;"]);
    }

    #[test]
    fn test_writer_trait() {
        let writer: &dyn Writer = &TYPESCRIPT_WRITER;
        assert_eq!(writer.language(), "typescript");
        assert_eq!(writer.extension(), "ts");
        let file = SourceFile::new(vec![Namespace::new("Empty", vec![]).into()]);
        assert_eq!(writer.write(&file).unwrap(), "module Empty\n{\n}");
    }
}
