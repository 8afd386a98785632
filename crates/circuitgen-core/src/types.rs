//! Type shapes of the Go type system, as far as wrapper generation needs them.
//!
//! Shapes are structural: two shapes are identical when they compare equal,
//! except that parameter names never take part in signature identity
//! (see [`Signature::identical`]).

use std::fmt;

/// Predeclared basic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Byte,
    Rune,
}

impl BasicKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "string" => Self::String,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "uintptr" => Self::Uintptr,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "byte" => Self::Byte,
            "rune" => Self::Rune,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Byte => "byte",
            Self::Rune => "rune",
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Reference to a declared type: its owning package (by path) and name.
///
/// `package` is `None` for predeclared types such as `error` and `any`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedRef {
    pub package: Option<String>,
    pub name: String,
    /// Type arguments of an instantiated generic type.
    pub type_args: Vec<TypeShape>,
}

impl NamedRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn predeclared(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn is_predeclared(&self) -> bool {
        self.package.is_none()
    }

    pub fn is_instantiated(&self) -> bool {
        !self.type_args.is_empty()
    }

    /// The same declaration without type arguments.
    pub fn origin(&self) -> NamedRef {
        Self {
            package: self.package.clone(),
            name: self.name.clone(),
            type_args: Vec::new(),
        }
    }
}

/// A parameter or result slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: Option<String>,
    pub ty: TypeShape,
}

impl Var {
    pub fn new(name: Option<&str>, ty: TypeShape) -> Self {
        Self {
            name: name.map(str::to_owned),
            ty,
        }
    }

    pub fn unnamed(ty: TypeShape) -> Self {
        Self { name: None, ty }
    }
}

/// Function or method signature without receiver.
///
/// When `variadic` is set, the last parameter's type is a slice of the
/// declared element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    pub variadic: bool,
}

impl Signature {
    /// Signature identity: parameter names do not matter.
    pub fn identical(&self, other: &Signature) -> bool {
        self.variadic == other.variadic
            && self.params.len() == other.params.len()
            && self.results.len() == other.results.len()
            && self.params.iter().zip(&other.params).all(|(a, b)| a.ty.identical(&b.ty))
            && self.results.iter().zip(&other.results).all(|(a, b)| a.ty.identical(&b.ty))
    }
}

/// A method as declared, either on a named type (with a receiver) or as an
/// element of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    pub name: String,
    /// Declared type. Well-formed sources always produce a signature.
    pub ty: TypeShape,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, sig: Signature) -> Self {
        Self {
            name: name.into(),
            ty: TypeShape::Signature(sig),
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        match &self.ty {
            TypeShape::Signature(sig) => Some(sig),
            _ => None,
        }
    }
}

/// `interface { ... }` literal: explicit methods plus embedded types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InterfaceLit {
    pub methods: Vec<MethodDecl>,
    pub embeds: Vec<TypeShape>,
}

impl InterfaceLit {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.embeds.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeShape,
    pub embedded: bool,
    pub tag: Option<String>,
}

/// `struct { ... }` literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StructLit {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Basic(BasicKind),
    Named(NamedRef),
    Pointer(Box<TypeShape>),
    Slice(Box<TypeShape>),
    Array { len: String, elem: Box<TypeShape> },
    Map { key: Box<TypeShape>, value: Box<TypeShape> },
    Chan { dir: ChanDir, elem: Box<TypeShape> },
    Signature(Signature),
    Interface(InterfaceLit),
    Struct(StructLit),
    /// Reference to a type parameter of the enclosing generic declaration.
    TypeParam(String),
}

impl TypeShape {
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(NamedRef::new(package, name))
    }

    pub fn error() -> Self {
        Self::Named(NamedRef::predeclared("error"))
    }

    pub fn pointer(elem: TypeShape) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeShape) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn as_named(&self) -> Option<&NamedRef> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Strip one level of pointer indirection.
    pub fn deref(&self) -> &TypeShape {
        match self {
            Self::Pointer(elem) => elem,
            other => other,
        }
    }

    /// Structural identity, ignoring parameter names inside signatures.
    pub fn identical(&self, other: &TypeShape) -> bool {
        match (self, other) {
            (Self::Signature(a), Self::Signature(b)) => a.identical(b),
            (Self::Pointer(a), Self::Pointer(b)) | (Self::Slice(a), Self::Slice(b)) => {
                a.identical(b)
            }
            (Self::Array { len: la, elem: a }, Self::Array { len: lb, elem: b }) => {
                la == lb && a.identical(b)
            }
            (Self::Map { key: ka, value: va }, Self::Map { key: kb, value: vb }) => {
                ka.identical(kb) && va.identical(vb)
            }
            (Self::Chan { dir: da, elem: a }, Self::Chan { dir: db, elem: b }) => {
                da == db && a.identical(b)
            }
            (a, b) => a == b,
        }
    }
}
