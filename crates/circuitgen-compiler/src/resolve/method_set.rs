//! Method sets by intuitive selection.
//!
//! Collects every method callable on a value of the type or on a pointer to
//! it, promoted through embedded fields. Selection walks embedding depth
//! breadth-first: a name found at a shallower depth shadows deeper ones, and
//! a name found more than once at the same depth is ambiguous and dropped
//! along with everything deeper. Field names take part in shadowing.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use circuitgen_core::types::{InterfaceLit, MethodDecl, NamedRef, TypeShape};
use circuitgen_core::universe::Universe;

/// A method reachable on the type and how deep it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSelection {
    pub name: String,
    /// Declared method type, normally a signature.
    pub ty: TypeShape,
    /// Number of embedded fields crossed to reach the method.
    pub depth: usize,
}

enum Member {
    Method(MethodDecl),
    Field,
}

/// What a name resolved to at the depth it was first seen.
enum Selected {
    Method(MethodDecl, usize),
    /// A field or an ambiguous name: shadows deeper methods.
    Blocked,
}

struct Embedded<'a> {
    ty: &'a TypeShape,
    /// The same type is embedded several times at this depth.
    multiple: bool,
}

/// All methods of `ty` (exported or not), in discovery order.
pub fn method_set(universe: &Universe, ty: &TypeShape) -> Vec<MethodSelection> {
    let mut selected: IndexMap<String, Selected> = IndexMap::new();
    let mut seen: HashSet<NamedRef> = HashSet::new();
    let mut current = vec![Embedded { ty, multiple: false }];
    let mut depth = 0;

    while !current.is_empty() {
        // name -> (occurrences at this depth, member)
        let mut level: IndexMap<String, (usize, Member)> = IndexMap::new();
        let mut next: Vec<&TypeShape> = Vec::new();

        for embedded in &current {
            let ty = universe.unalias(embedded.ty.deref());
            let weight = if embedded.multiple { 2 } else { 1 };

            if let TypeShape::Named(named) = ty {
                if !seen.insert(named.origin()) {
                    continue;
                }
                for method in universe.declared_methods(named) {
                    record(&mut level, &method.name, weight, Member::Method(method.clone()));
                }
            }

            match universe.underlying(ty) {
                Some(TypeShape::Struct(st)) => {
                    for field in &st.fields {
                        record(&mut level, &field.name, weight, Member::Field);
                        if field.embedded {
                            next.push(&field.ty);
                        }
                    }
                }
                Some(TypeShape::Interface(iface)) => {
                    for method in interface_methods(universe, iface) {
                        let name = method.name.clone();
                        record(&mut level, &name, weight, Member::Method(method));
                    }
                }
                _ => {}
            }
        }

        for (name, (count, member)) in level {
            let Entry::Vacant(entry) = selected.entry(name) else {
                continue;
            };
            let selection = match member {
                Member::Method(method) if count == 1 => Selected::Method(method, depth),
                _ => Selected::Blocked,
            };
            entry.insert(selection);
        }

        current = consolidate(universe, next);
        depth += 1;
    }

    let methods: Vec<MethodSelection> = selected
        .into_iter()
        .filter_map(|(name, selection)| match selection {
            Selected::Method(method, depth) => Some(MethodSelection {
                name,
                ty: method.ty,
                depth,
            }),
            Selected::Blocked => None,
        })
        .collect();
    trace!(methods = methods.len(), depth, "computed method set");
    methods
}

fn record(level: &mut IndexMap<String, (usize, Member)>, name: &str, weight: usize, member: Member) {
    match level.entry(name.to_owned()) {
        Entry::Occupied(mut entry) => entry.get_mut().0 += weight,
        Entry::Vacant(entry) => {
            entry.insert((weight, member));
        }
    }
}

/// Merge repeated embeddings of one named type at the same depth.
fn consolidate<'a>(universe: &Universe, types: Vec<&'a TypeShape>) -> Vec<Embedded<'a>> {
    let mut by_origin: IndexMap<Option<NamedRef>, Embedded<'a>> = IndexMap::new();
    let mut unnamed = Vec::new();

    for ty in types {
        let origin = universe.unalias(ty.deref()).as_named().map(NamedRef::origin);
        match origin {
            Some(origin) => match by_origin.entry(Some(origin)) {
                Entry::Occupied(mut entry) => entry.get_mut().multiple = true,
                Entry::Vacant(entry) => {
                    entry.insert(Embedded { ty, multiple: false });
                }
            },
            None => unnamed.push(Embedded { ty, multiple: false }),
        }
    }

    by_origin.into_values().chain(unnamed).collect()
}

/// Methods of an interface with embedded interfaces flattened in.
///
/// A method reached through several embeddings with identical signatures is
/// kept once; parameter names do not count. Same-named methods whose
/// signatures differ conflict and are dropped. Explicit methods come first,
/// then embedded ones in order.
pub fn interface_methods(universe: &Universe, iface: &InterfaceLit) -> Vec<MethodDecl> {
    let mut methods = IndexMap::new();
    let mut visiting = HashSet::new();
    collect_interface(universe, iface, &mut methods, &mut visiting);
    methods.into_values().flatten().collect()
}

/// `None` marks a name with conflicting declarations.
type InterfaceMethods = IndexMap<String, Option<MethodDecl>>;

fn collect_interface(
    universe: &Universe,
    iface: &InterfaceLit,
    methods: &mut InterfaceMethods,
    visiting: &mut HashSet<NamedRef>,
) {
    for method in &iface.methods {
        add_interface_method(methods, method);
    }

    for embed in &iface.embeds {
        let target = universe.unalias(embed);
        if let TypeShape::Named(named) = target
            && !visiting.insert(named.origin())
        {
            continue;
        }
        if let Some(TypeShape::Interface(inner)) = universe.underlying(target) {
            collect_interface(universe, inner, methods, visiting);
        }
    }
}

fn add_interface_method(methods: &mut InterfaceMethods, method: &MethodDecl) {
    match methods.entry(method.name.clone()) {
        Entry::Vacant(entry) => {
            entry.insert(Some(method.clone()));
        }
        Entry::Occupied(mut entry) => {
            let conflicts = entry
                .get()
                .as_ref()
                .is_some_and(|kept| !kept.ty.identical(&method.ty));
            if conflicts {
                debug!(method = %method.name, "conflicting interface methods dropped");
                entry.insert(None);
            }
        }
    }
}
