//! Tree-sitter parsing of Go files and lowering of type declarations.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use arborium_tree_sitter as tree_sitter;
use tree_sitter::{Language, Node, Parser, Tree};

use circuitgen_core::types::{
    BasicKind, ChanDir, Field, InterfaceLit, MethodDecl, NamedRef, Signature, StructLit,
    TypeShape, Var,
};
use circuitgen_core::universe::{TypeDecl, predeclared};

use crate::diagnostics::{DiagnosticKind, Diagnostics, FileId, SourceFile};
use crate::{Error, Result};

/// Longest source excerpt quoted in a syntax error message.
const MAX_EXCERPT: usize = 24;

pub(crate) fn go_language() -> Language {
    arborium_go::language().into()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImportName {
    /// `import "path"`: qualified by the imported package's own name.
    Implicit,
    Named(String),
    Dot,
    Blank,
}

#[derive(Debug, Clone)]
pub(crate) struct ImportSpec {
    pub path: String,
    pub name: ImportName,
    pub range: Range<usize>,
}

/// A parsed file with its header already extracted.
pub(crate) struct ParsedFile {
    pub file: FileId,
    pub tree: Tree,
    pub package: Option<(String, Range<usize>)>,
    pub imports: Vec<ImportSpec>,
}

pub(crate) fn parse_file(
    file: FileId,
    source: &SourceFile,
    diagnostics: &mut Diagnostics,
) -> Result<ParsedFile> {
    let load_error = |message: String| Error::PackageLoad {
        path: source.path.display().to_string(),
        message,
    };

    let mut parser = Parser::new();
    parser
        .set_language(&go_language())
        .map_err(|e| load_error(e.to_string()))?;
    let tree = parser
        .parse(&source.text, None)
        .ok_or_else(|| load_error("parser produced no tree".to_owned()))?;

    let root = tree.root_node();
    report_syntax_errors(root, file, &source.text, diagnostics);

    let mut package = None;
    let mut imports = Vec::new();
    for child in named_children(root) {
        match child.kind() {
            "package_clause" => {
                package = named_children(child)
                    .into_iter()
                    .find(|n| n.kind() == "package_identifier")
                    .map(|n| (text(n, &source.text).to_owned(), n.byte_range()));
            }
            "import_declaration" => collect_imports(child, &source.text, &mut imports),
            _ => {}
        }
    }

    Ok(ParsedFile {
        file,
        tree,
        package,
        imports,
    })
}

fn collect_imports(decl: Node, src: &str, out: &mut Vec<ImportSpec>) {
    for child in named_children(decl) {
        match child.kind() {
            "import_spec" => {
                let Some(path) = child.child_by_field_name("path") else {
                    continue;
                };
                let name = match child.child_by_field_name("name") {
                    None => ImportName::Implicit,
                    Some(n) if n.kind() == "dot" => ImportName::Dot,
                    Some(n) if n.kind() == "blank_identifier" => ImportName::Blank,
                    Some(n) => ImportName::Named(text(n, src).to_owned()),
                };
                out.push(ImportSpec {
                    path: unquote(text(path, src)),
                    name,
                    range: child.byte_range(),
                });
            }
            "import_spec_list" => collect_imports(child, src, out),
            _ => {}
        }
    }
}

fn report_syntax_errors(root: Node, file: FileId, src: &str, diagnostics: &mut Diagnostics) {
    if !root.has_error() {
        return;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            diagnostics
                .report(DiagnosticKind::MissingToken, file, node.byte_range())
                .message(format!("`{}`", node.kind()))
                .emit();
            continue;
        }
        if node.is_error() {
            diagnostics
                .report(DiagnosticKind::SyntaxError, file, node.byte_range())
                .message(format!("`{}`", excerpt(text(node, src))))
                .emit();
            continue;
        }
        if node.has_error() {
            let mut kids = children(node);
            kids.reverse();
            stack.extend(kids);
        }
    }
}

fn excerpt(s: &str) -> &str {
    let line = s.lines().next().unwrap_or_default().trim();
    match line.char_indices().nth(MAX_EXCERPT) {
        Some((i, _)) => &line[..i],
        None => line,
    }
}

/// Names and name spans of every type declared at package level.
pub(crate) fn declared_type_names(parsed: &ParsedFile, src: &str) -> Vec<(String, Range<usize>)> {
    let mut names = Vec::new();
    for decl in named_children(parsed.tree.root_node()) {
        if decl.kind() != "type_declaration" {
            continue;
        }
        for spec in named_children(decl) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            if let Some(name) = spec.child_by_field_name("name") {
                names.push((text(name, src).to_owned(), name.byte_range()));
            }
        }
    }
    names
}

/// Names visible while lowering one file.
pub(crate) struct FileScope<'a> {
    pub package_path: &'a str,
    pub local_types: &'a HashSet<String>,
    /// Qualifier to import path.
    pub qualifiers: HashMap<String, String>,
    pub dot_imports: Vec<String>,
}

pub(crate) struct DeclaredType {
    pub decl: TypeDecl,
    pub range: Range<usize>,
}

pub(crate) struct DeclaredMethod {
    pub receiver: String,
    pub method: MethodDecl,
    pub range: Range<usize>,
}

#[derive(Default)]
pub(crate) struct FileDecls {
    pub types: Vec<DeclaredType>,
    pub methods: Vec<DeclaredMethod>,
}

/// Lower the type and method declarations of a file into type shapes.
pub(crate) fn lower_file(
    parsed: &ParsedFile,
    src: &str,
    scope: &FileScope<'_>,
    diagnostics: &mut Diagnostics,
) -> FileDecls {
    let mut lowerer = Lowerer {
        src,
        file: parsed.file,
        scope,
        type_params: Vec::new(),
        diagnostics,
    };

    let mut decls = FileDecls::default();
    for node in named_children(parsed.tree.root_node()) {
        match node.kind() {
            "type_declaration" => {
                for spec in named_children(node) {
                    if let Some(declared) = lowerer.type_spec(spec) {
                        decls.types.push(declared);
                    }
                }
            }
            "method_declaration" => {
                if let Some(method) = lowerer.method_declaration(node) {
                    decls.methods.push(method);
                }
            }
            _ => {}
        }
    }
    decls
}

struct Lowerer<'a, 's> {
    src: &'a str,
    file: FileId,
    scope: &'a FileScope<'s>,
    /// Type parameters of the declaration being lowered.
    type_params: Vec<String>,
    diagnostics: &'a mut Diagnostics,
}

impl Lowerer<'_, '_> {
    fn text(&self, node: Node) -> &str {
        text(node, self.src)
    }

    fn type_spec(&mut self, spec: Node) -> Option<DeclaredType> {
        let alias = match spec.kind() {
            "type_spec" => false,
            "type_alias" => true,
            _ => return None,
        };
        let name = spec.child_by_field_name("name")?;

        self.type_params = spec
            .child_by_field_name("type_parameters")
            .map(|params| self.type_parameter_names(params))
            .unwrap_or_default();
        let ty = self.lower_field(spec, "type");
        let decl = TypeDecl {
            name: self.text(name).to_owned(),
            ty,
            alias,
            type_params: std::mem::take(&mut self.type_params),
            methods: Vec::new(),
        };

        Some(DeclaredType {
            decl,
            range: name.byte_range(),
        })
    }

    fn type_parameter_names(&self, list: Node) -> Vec<String> {
        named_children(list)
            .into_iter()
            .flat_map(|decl| field_children(decl, "name"))
            .map(|name| self.text(name).to_owned())
            .collect()
    }

    fn method_declaration(&mut self, node: Node) -> Option<DeclaredMethod> {
        let name = node.child_by_field_name("name")?;
        let receiver = node.child_by_field_name("receiver")?;
        let receiver_decl = named_children(receiver)
            .into_iter()
            .find(|n| n.kind() == "parameter_declaration")?;

        let mut recv_type = receiver_decl.child_by_field_name("type")?;
        while matches!(recv_type.kind(), "pointer_type" | "parenthesized_type") {
            recv_type = first_named_child(recv_type)?;
        }

        self.type_params.clear();
        if recv_type.kind() == "generic_type" {
            if let Some(args) = recv_type.child_by_field_name("type_arguments") {
                self.type_params = named_children(args)
                    .into_iter()
                    .filter_map(|arg| match arg.kind() {
                        "type_elem" => first_named_child(arg),
                        _ => Some(arg),
                    })
                    .map(|arg| self.text(arg).to_owned())
                    .collect();
            }
            recv_type = recv_type.child_by_field_name("type")?;
        }
        if recv_type.kind() != "type_identifier" {
            return None;
        }

        let sig = self.signature(
            node.child_by_field_name("parameters"),
            node.child_by_field_name("result"),
        );
        self.type_params.clear();

        Some(DeclaredMethod {
            receiver: self.text(recv_type).to_owned(),
            method: MethodDecl::new(self.text(name), sig),
            range: recv_type.byte_range(),
        })
    }

    fn signature(&mut self, params: Option<Node>, result: Option<Node>) -> Signature {
        let mut sig = Signature::default();
        if let Some(params) = params {
            sig.params = self.parameter_list(params, &mut sig.variadic);
        }

        match result {
            None => {}
            Some(list) if list.kind() == "parameter_list" => {
                let mut ignored = false;
                sig.results = self.parameter_list(list, &mut ignored);
            }
            Some(ty) => sig.results.push(Var::unnamed(self.lower(ty))),
        }
        sig
    }

    fn parameter_list(&mut self, list: Node, variadic: &mut bool) -> Vec<Var> {
        let mut vars = Vec::new();
        for decl in named_children(list) {
            let mut ty = self.lower_field(decl, "type");
            match decl.kind() {
                "parameter_declaration" => {}
                "variadic_parameter_declaration" => {
                    ty = TypeShape::slice(ty);
                    *variadic = true;
                }
                _ => continue,
            }

            let names = field_children(decl, "name");
            if names.is_empty() {
                vars.push(Var::unnamed(ty));
                continue;
            }
            for name in names {
                vars.push(Var::new(Some(self.text(name)), ty.clone()));
            }
        }
        vars
    }

    fn lower_field(&mut self, node: Node, field: &str) -> TypeShape {
        match node.child_by_field_name(field) {
            Some(child) => self.lower(child),
            None => invalid_type(),
        }
    }

    fn lower(&mut self, node: Node) -> TypeShape {
        match node.kind() {
            "type_identifier" => {
                let name = self.text(node).to_owned();
                self.resolve_local(name, node.byte_range())
            }
            "qualified_type" => {
                let (Some(package), Some(name)) = (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) else {
                    return invalid_type();
                };
                let qualifier = self.text(package).to_owned();
                let name = self.text(name).to_owned();
                self.resolve_qualified(qualifier, name, node.byte_range())
            }
            "generic_type" => {
                let base = self.lower_field(node, "type");
                let args = match node.child_by_field_name("type_arguments") {
                    Some(args) => named_children(args)
                        .into_iter()
                        .map(|arg| self.lower(arg))
                        .collect(),
                    None => Vec::new(),
                };
                match base {
                    TypeShape::Named(named) => TypeShape::Named(NamedRef {
                        type_args: args,
                        ..named
                    }),
                    other => other,
                }
            }
            "pointer_type" => match first_named_child(node) {
                Some(elem) => TypeShape::pointer(self.lower(elem)),
                None => invalid_type(),
            },
            "parenthesized_type" | "type_elem" | "constraint_elem" | "negated_type" => {
                match first_named_child(node) {
                    Some(inner) => self.lower(inner),
                    None => invalid_type(),
                }
            }
            "slice_type" => TypeShape::slice(self.lower_field(node, "element")),
            "array_type" => {
                let len = node
                    .child_by_field_name("length")
                    .map(|n| self.text(n).to_owned())
                    .unwrap_or_default();
                TypeShape::Array {
                    len,
                    elem: Box::new(self.lower_field(node, "element")),
                }
            }
            "implicit_length_array_type" => TypeShape::Array {
                len: "...".to_owned(),
                elem: Box::new(self.lower_field(node, "element")),
            },
            "map_type" => {
                let key = self.lower_field(node, "key");
                let value = self.lower_field(node, "value");
                TypeShape::map(key, value)
            }
            "channel_type" => TypeShape::Chan {
                dir: channel_direction(node),
                elem: Box::new(self.lower_field(node, "value")),
            },
            "function_type" => TypeShape::Signature(self.signature(
                node.child_by_field_name("parameters"),
                node.child_by_field_name("result"),
            )),
            "interface_type" => TypeShape::Interface(self.interface(node)),
            "struct_type" => TypeShape::Struct(self.structure(node)),
            _ => invalid_type(),
        }
    }

    fn resolve_local(&mut self, name: String, range: Range<usize>) -> TypeShape {
        if self.type_params.contains(&name) {
            return TypeShape::TypeParam(name);
        }
        if self.scope.local_types.contains(&name) {
            return TypeShape::named(self.scope.package_path, name);
        }
        if let Some(kind) = BasicKind::from_name(&name) {
            return TypeShape::Basic(kind);
        }
        if predeclared(&name).is_some() {
            return TypeShape::Named(NamedRef::predeclared(name));
        }
        if let Some(path) = self.scope.dot_imports.first() {
            return TypeShape::named(path.as_str(), name);
        }

        self.diagnostics
            .report(DiagnosticKind::UndeclaredName, self.file, range)
            .message(&name)
            .emit();
        TypeShape::named(self.scope.package_path, name)
    }

    fn resolve_qualified(
        &mut self,
        qualifier: String,
        name: String,
        range: Range<usize>,
    ) -> TypeShape {
        if let Some(path) = self.scope.qualifiers.get(&qualifier) {
            return TypeShape::named(path.as_str(), name);
        }

        self.diagnostics
            .report(DiagnosticKind::UnknownQualifier, self.file, range)
            .message(&qualifier)
            .emit();
        TypeShape::named(qualifier, name)
    }

    fn interface(&mut self, node: Node) -> InterfaceLit {
        let mut iface = InterfaceLit::default();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    let sig = self.signature(
                        elem.child_by_field_name("parameters"),
                        elem.child_by_field_name("result"),
                    );
                    iface
                        .methods
                        .push(MethodDecl::new(self.text(name).to_owned(), sig));
                }
                "type_elem" | "constraint_elem" | "interface_type_name" => {
                    // unions and `~T` approximations only constrain type sets
                    let parts = named_children(elem);
                    let [single] = parts.as_slice() else {
                        continue;
                    };
                    let single = *single;
                    let embedded = match single.kind() {
                        "type_identifier" | "qualified_type" | "generic_type" => self.lower(single),
                        _ => continue,
                    };
                    if matches!(embedded, TypeShape::Named(_)) {
                        iface.embeds.push(embedded);
                    }
                }
                "type_identifier" | "qualified_type" => {
                    let embedded = self.lower(elem);
                    iface.embeds.push(embedded);
                }
                _ => {}
            }
        }
        iface
    }

    fn structure(&mut self, node: Node) -> StructLit {
        let mut st = StructLit::default();
        let Some(list) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return st;
        };

        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let tag = decl
                .child_by_field_name("tag")
                .map(|t| unquote(self.text(t)));
            let mut ty = self.lower_field(decl, "type");

            let names = field_children(decl, "name");
            if names.is_empty() {
                let name = match &ty {
                    TypeShape::Named(named) => named.name.clone(),
                    _ => String::new(),
                };
                if children(decl).iter().any(|c| c.kind() == "*") {
                    ty = TypeShape::pointer(ty);
                }
                st.fields.push(Field {
                    name,
                    ty,
                    embedded: true,
                    tag,
                });
                continue;
            }

            for name in names {
                st.fields.push(Field {
                    name: self.text(name).to_owned(),
                    ty: ty.clone(),
                    embedded: false,
                    tag: tag.clone(),
                });
            }
        }
        st
    }
}

/// Placeholder for type expressions that failed to parse. The enclosing
/// file always carries a syntax diagnostic when this is produced.
fn invalid_type() -> TypeShape {
    TypeShape::Struct(StructLit::default())
}

fn channel_direction(node: Node) -> ChanDir {
    let tokens: Vec<&str> = children(node)
        .into_iter()
        .filter(|c| !c.is_named())
        .map(|c| c.kind())
        .collect();
    match tokens.as_slice() {
        ["<-", ..] => ChanDir::Recv,
        [_, "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn text<'s>(node: Node, src: &'s str) -> &'s str {
    node.utf8_text(src.as_bytes()).unwrap_or_default()
}

/// Strip the quotes of a Go string literal.
fn unquote(lit: &str) -> String {
    if let Some(raw) = lit.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return raw.to_owned();
    }
    let inner = lit
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lit);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let mut result = Vec::new();
    if cursor.goto_first_child() {
        loop {
            result.push(cursor.node());
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    result
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    children(node)
        .into_iter()
        .filter(|c| c.is_named() && c.kind() != "comment")
        .collect()
}

fn first_named_child<'t>(node: Node<'t>) -> Option<Node<'t>> {
    named_children(node).into_iter().next()
}

/// Children attached under `field`, which may repeat (`a, b int`).
fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let mut result = Vec::new();
    if cursor.goto_first_child() {
        loop {
            if cursor.field_name() == Some(field) {
                result.push(cursor.node());
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    result
}
