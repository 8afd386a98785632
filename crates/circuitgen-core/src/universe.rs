//! The loaded type universe: packages, their type declarations and methods.

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::stdlib;
use crate::types::{BasicKind, InterfaceLit, MethodDecl, NamedRef, Signature, TypeShape, Var};
use crate::utils::package_name_from_path;

/// Bound on alias/defined-type chains followed while computing underlying types.
const MAX_UNDERLYING_DEPTH: usize = 64;

/// A type declaration: `type Name[P any] Type` or `type Name = Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Declared right-hand side.
    pub ty: TypeShape,
    pub alias: bool,
    pub type_params: Vec<String>,
    /// Methods declared with this type as receiver, in source order.
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, ty: TypeShape) -> Self {
        Self {
            name: name.into(),
            ty,
            alias: false,
            type_params: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_methods(mut self, methods: Vec<MethodDecl>) -> Self {
        self.methods = methods;
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub path: String,
    pub name: String,
    pub types: IndexMap<String, TypeDecl>,
    /// Known only by path: referenced but never loaded from source.
    pub opaque: bool,
}

impl Package {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            types: IndexMap::new(),
            opaque: false,
        }
    }

    pub fn opaque(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = package_name_from_path(&path);
        Self {
            path,
            name,
            types: IndexMap::new(),
            opaque: true,
        }
    }

    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.insert(decl.name.clone(), decl);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }
}

static ERROR_DECL: LazyLock<TypeDecl> = LazyLock::new(|| {
    let error_method = MethodDecl::new(
        "Error",
        Signature {
            params: Vec::new(),
            results: vec![Var::unnamed(TypeShape::Basic(BasicKind::String))],
            variadic: false,
        },
    );
    TypeDecl::new(
        "error",
        TypeShape::Interface(InterfaceLit {
            methods: vec![error_method],
            embeds: Vec::new(),
        }),
    )
});

static ANY_DECL: LazyLock<TypeDecl> = LazyLock::new(|| TypeDecl {
    alias: true,
    ..TypeDecl::new("any", TypeShape::Interface(InterfaceLit::default()))
});

static COMPARABLE_DECL: LazyLock<TypeDecl> =
    LazyLock::new(|| TypeDecl::new("comparable", TypeShape::Interface(InterfaceLit::default())));

/// Declaration of a predeclared (universe scope) type name.
pub fn predeclared(name: &str) -> Option<&'static TypeDecl> {
    match name {
        "error" => Some(&ERROR_DECL),
        "any" => Some(&ANY_DECL),
        "comparable" => Some(&COMPARABLE_DECL),
        _ => None,
    }
}

/// All packages known to one generation run, keyed by import path.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    packages: IndexMap<String, Package>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, replacing an opaque placeholder with the same path.
    pub fn insert(&mut self, package: Package) {
        self.packages.insert(package.path.clone(), package);
    }

    /// Register a package known only by path. Loaded packages are kept.
    pub fn insert_opaque(&mut self, path: &str) {
        if !self.packages.contains_key(path) {
            self.packages.insert(path.to_owned(), Package::opaque(path));
        }
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    /// Name used to qualify types of the package at `path`.
    pub fn package_name(&self, path: &str) -> String {
        match self.packages.get(path) {
            Some(pkg) => pkg.name.clone(),
            None => package_name_from_path(path),
        }
    }

    /// Declaration behind a named reference, if it is known.
    ///
    /// Types of packages not loaded from source fall back to the built-in
    /// standard library declarations.
    pub fn lookup(&self, named: &NamedRef) -> Option<&TypeDecl> {
        match &named.package {
            None => predeclared(&named.name),
            Some(path) => match self.packages.get(path) {
                Some(pkg) if !pkg.opaque => pkg.get(&named.name),
                _ => stdlib::lookup(path, &named.name),
            },
        }
    }

    /// Follow aliases until a non-alias shape is reached.
    pub fn unalias<'a>(&'a self, ty: &'a TypeShape) -> &'a TypeShape {
        let mut current = ty;
        for _ in 0..MAX_UNDERLYING_DEPTH {
            let TypeShape::Named(named) = current else {
                return current;
            };
            match self.lookup(named) {
                Some(decl) if decl.alias => current = &decl.ty,
                _ => return current,
            }
        }
        current
    }

    /// Underlying type of `ty`, following defined types and aliases.
    ///
    /// `None` when the chain reaches a declaration that is not loaded, or
    /// when the chain is cyclic.
    pub fn underlying<'a>(&'a self, ty: &'a TypeShape) -> Option<&'a TypeShape> {
        let mut current = ty;
        for _ in 0..MAX_UNDERLYING_DEPTH {
            let TypeShape::Named(named) = current else {
                return Some(current);
            };
            current = &self.lookup(named)?.ty;
        }
        None
    }

    pub fn is_interface(&self, ty: &TypeShape) -> bool {
        matches!(self.underlying(ty), Some(TypeShape::Interface(_)))
    }

    /// Methods declared with the named type as receiver (aliases resolved).
    pub fn declared_methods(&self, named: &NamedRef) -> &[MethodDecl] {
        let shape = TypeShape::Named(named.origin());
        let resolved = match self.unalias(&shape) {
            TypeShape::Named(resolved) => resolved.origin(),
            _ => return &[],
        };
        match self.lookup(&resolved) {
            Some(decl) if !decl.alias => &decl.methods,
            _ => &[],
        }
    }
}
