//! Rendering of type shapes as Go source type expressions.
//!
//! Mirrors Go's `types.TypeString`: named types are prefixed with whatever
//! the qualifier returns for their package path, or left bare when it
//! returns an empty string.

use std::fmt::Write;

use crate::types::{ChanDir, InterfaceLit, NamedRef, Signature, StructLit, TypeShape, Var};

/// Maps a package path to the qualifier printed before its type names.
pub type Qualifier<'q> = &'q dyn Fn(&str) -> String;

/// Render `ty` as Go source.
pub fn type_string(ty: &TypeShape, qualifier: Qualifier<'_>) -> String {
    let mut out = String::new();
    TypeWriter { out: &mut out, qualifier }.write_type(ty);
    out
}

/// Render `ty` without any package qualifiers.
pub fn unqualified_type_string(ty: &TypeShape) -> String {
    type_string(ty, &|_| String::new())
}

/// Render a signature in function-literal form without the `func` keyword:
/// `(ctx context.Context, v int) error`.
pub fn signature_string(sig: &Signature, qualifier: Qualifier<'_>) -> String {
    let mut out = String::new();
    TypeWriter { out: &mut out, qualifier }.write_signature(sig);
    out
}

struct TypeWriter<'a, 'q> {
    out: &'a mut String,
    qualifier: Qualifier<'q>,
}

impl TypeWriter<'_, '_> {
    fn write_type(&mut self, ty: &TypeShape) {
        match ty {
            TypeShape::Basic(kind) => self.out.push_str(kind.as_str()),
            TypeShape::Named(named) => self.write_named(named),
            TypeShape::TypeParam(name) => self.out.push_str(name),
            TypeShape::Pointer(elem) => {
                self.out.push('*');
                self.write_type(elem);
            }
            TypeShape::Slice(elem) => {
                self.out.push_str("[]");
                self.write_type(elem);
            }
            TypeShape::Array { len, elem } => {
                write!(self.out, "[{len}]").expect("String write never fails");
                self.write_type(elem);
            }
            TypeShape::Map { key, value } => {
                self.out.push_str("map[");
                self.write_type(key);
                self.out.push(']');
                self.write_type(value);
            }
            TypeShape::Chan { dir, elem } => self.write_chan(*dir, elem),
            TypeShape::Signature(sig) => {
                self.out.push_str("func");
                self.write_signature(sig);
            }
            TypeShape::Interface(iface) => self.write_interface(iface),
            TypeShape::Struct(st) => self.write_struct(st),
        }
    }

    fn write_named(&mut self, named: &NamedRef) {
        if let Some(path) = &named.package {
            let prefix = (self.qualifier)(path);
            if !prefix.is_empty() {
                self.out.push_str(&prefix);
                self.out.push('.');
            }
        }
        self.out.push_str(&named.name);

        if named.is_instantiated() {
            self.out.push('[');
            for (i, arg) in named.type_args.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.write_type(arg);
            }
            self.out.push(']');
        }
    }

    fn write_chan(&mut self, dir: ChanDir, elem: &TypeShape) {
        let prefix = match dir {
            ChanDir::Both => "chan ",
            ChanDir::Send => "chan<- ",
            ChanDir::Recv => "<-chan ",
        };
        self.out.push_str(prefix);

        // `chan <-chan T` would parse as `chan<- chan T`
        let needs_parens = dir == ChanDir::Both
            && matches!(elem, TypeShape::Chan { dir: ChanDir::Recv, .. });
        if needs_parens {
            self.out.push('(');
        }
        self.write_type(elem);
        if needs_parens {
            self.out.push(')');
        }
    }

    fn write_signature(&mut self, sig: &Signature) {
        self.write_tuple(&sig.params, sig.variadic);

        match sig.results.as_slice() {
            [] => {}
            [only] if only.name.is_none() => {
                self.out.push(' ');
                self.write_type(&only.ty);
            }
            results => {
                self.out.push(' ');
                self.write_tuple(results, false);
            }
        }
    }

    fn write_tuple(&mut self, vars: &[Var], variadic: bool) {
        self.out.push('(');
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if let Some(name) = &var.name {
                self.out.push_str(name);
                self.out.push(' ');
            }

            let is_last = i + 1 == vars.len();
            match &var.ty {
                TypeShape::Slice(elem) if variadic && is_last => {
                    self.out.push_str("...");
                    self.write_type(elem);
                }
                ty => self.write_type(ty),
            }
        }
        self.out.push(')');
    }

    fn write_interface(&mut self, iface: &InterfaceLit) {
        self.out.push_str("interface{");
        let mut first = true;
        for method in &iface.methods {
            if !first {
                self.out.push_str("; ");
            }
            first = false;
            self.out.push_str(&method.name);
            match &method.ty {
                TypeShape::Signature(sig) => self.write_signature(sig),
                other => self.write_type(other),
            }
        }
        for embed in &iface.embeds {
            if !first {
                self.out.push_str("; ");
            }
            first = false;
            self.write_type(embed);
        }
        self.out.push('}');
    }

    fn write_struct(&mut self, st: &StructLit) {
        self.out.push_str("struct{");
        for (i, field) in st.fields.iter().enumerate() {
            if i > 0 {
                self.out.push_str("; ");
            }
            if !field.embedded {
                self.out.push_str(&field.name);
                self.out.push(' ');
            }
            self.write_type(&field.ty);
            if let Some(tag) = &field.tag {
                self.out.push(' ');
                write_quoted(self.out, tag);
            }
        }
        self.out.push('}');
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
