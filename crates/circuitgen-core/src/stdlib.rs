//! Standard library types referenced by user code but never loaded from
//! source.
//!
//! Packages outside the module are opaque to the loader. The declarations
//! here give the commonly embedded ones their real method sets, so that an
//! embedded `io.Closer` or `sync.Mutex` promotes its methods.

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::types::{
    BasicKind, ChanDir, InterfaceLit, MethodDecl, NamedRef, Signature, StructLit, TypeShape, Var,
};
use crate::universe::{Package, TypeDecl};

static PACKAGES: LazyLock<IndexMap<String, Package>> = LazyLock::new(|| {
    [
        context(),
        database_sql_driver(),
        encoding(),
        fmt(),
        io(),
        net(),
        net_http(),
        sort(),
        sync(),
    ]
    .into_iter()
    .map(|pkg| (pkg.path.clone(), pkg))
    .collect()
});

/// Declaration of `name` in the standard library package at `path`.
pub fn lookup(path: &str, name: &str) -> Option<&'static TypeDecl> {
    PACKAGES.get(path)?.get(name)
}

fn context() -> Package {
    Package::new("context", "context").with_type(interface(
        "Context",
        vec![
            method(
                "Deadline",
                vec![],
                vec![
                    named_var("deadline", TypeShape::named("time", "Time")),
                    named_var("ok", basic(BasicKind::Bool)),
                ],
            ),
            method(
                "Done",
                vec![],
                vec![Var::unnamed(TypeShape::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(TypeShape::Struct(StructLit::default())),
                })],
            ),
            method("Err", vec![], vec![Var::unnamed(TypeShape::error())]),
            method(
                "Value",
                vec![named_var("key", any())],
                vec![Var::unnamed(any())],
            ),
        ],
    ))
}

fn database_sql_driver() -> Package {
    const PATH: &str = "database/sql/driver";
    Package::new(PATH, "driver")
        .with_type(interface(
            "Driver",
            vec![method(
                "Open",
                vec![named_var("name", basic(BasicKind::String))],
                vec![
                    Var::unnamed(TypeShape::named(PATH, "Conn")),
                    Var::unnamed(TypeShape::error()),
                ],
            )],
        ))
        .with_type(interface(
            "Conn",
            vec![
                method(
                    "Prepare",
                    vec![named_var("query", basic(BasicKind::String))],
                    vec![
                        Var::unnamed(TypeShape::named(PATH, "Stmt")),
                        Var::unnamed(TypeShape::error()),
                    ],
                ),
                close(),
                method(
                    "Begin",
                    vec![],
                    vec![
                        Var::unnamed(TypeShape::named(PATH, "Tx")),
                        Var::unnamed(TypeShape::error()),
                    ],
                ),
            ],
        ))
}

fn encoding() -> Package {
    Package::new("encoding", "encoding")
        .with_type(interface(
            "BinaryMarshaler",
            vec![bytes_producer("MarshalBinary", "data")],
        ))
        .with_type(interface(
            "TextMarshaler",
            vec![bytes_producer("MarshalText", "text")],
        ))
}

fn fmt() -> Package {
    Package::new("fmt", "fmt").with_type(interface(
        "Stringer",
        vec![method("String", vec![], vec![Var::unnamed(basic(BasicKind::String))])],
    ))
}

fn io() -> Package {
    const PATH: &str = "io";
    Package::new(PATH, "io")
        .with_type(interface("Reader", vec![read_write("Read", "p")]))
        .with_type(interface("Writer", vec![read_write("Write", "p")]))
        .with_type(interface("Closer", vec![close()]))
        .with_type(composite(PATH, "ReadWriter", &["Reader", "Writer"]))
        .with_type(composite(PATH, "ReadCloser", &["Reader", "Closer"]))
        .with_type(composite(PATH, "WriteCloser", &["Writer", "Closer"]))
        .with_type(composite(PATH, "ReadWriteCloser", &["Reader", "Writer", "Closer"]))
}

fn net() -> Package {
    const PATH: &str = "net";
    let addr = || vec![Var::unnamed(TypeShape::named(PATH, "Addr"))];
    let deadline = |name: &str| {
        method(
            name,
            vec![named_var("t", TypeShape::named("time", "Time"))],
            vec![Var::unnamed(TypeShape::error())],
        )
    };
    Package::new(PATH, "net")
        .with_type(interface(
            "Addr",
            vec![
                method("Network", vec![], vec![Var::unnamed(basic(BasicKind::String))]),
                method("String", vec![], vec![Var::unnamed(basic(BasicKind::String))]),
            ],
        ))
        .with_type(interface(
            "Conn",
            vec![
                read_write("Read", "b"),
                read_write("Write", "b"),
                close(),
                method("LocalAddr", vec![], addr()),
                method("RemoteAddr", vec![], addr()),
                deadline("SetDeadline"),
                deadline("SetReadDeadline"),
                deadline("SetWriteDeadline"),
            ],
        ))
        .with_type(interface(
            "Listener",
            vec![
                method(
                    "Accept",
                    vec![],
                    vec![
                        Var::unnamed(TypeShape::named(PATH, "Conn")),
                        Var::unnamed(TypeShape::error()),
                    ],
                ),
                close(),
                method("Addr", vec![], addr()),
            ],
        ))
}

fn net_http() -> Package {
    const PATH: &str = "net/http";
    let request = || TypeShape::pointer(TypeShape::named(PATH, "Request"));
    Package::new(PATH, "http")
        .with_type(interface(
            "Handler",
            vec![method(
                "ServeHTTP",
                vec![
                    Var::unnamed(TypeShape::named(PATH, "ResponseWriter")),
                    Var::unnamed(request()),
                ],
                vec![],
            )],
        ))
        .with_type(interface(
            "RoundTripper",
            vec![method(
                "RoundTrip",
                vec![Var::unnamed(request())],
                vec![
                    Var::unnamed(TypeShape::pointer(TypeShape::named(PATH, "Response"))),
                    Var::unnamed(TypeShape::error()),
                ],
            )],
        ))
}

fn sort() -> Package {
    let index = |name: &str| named_var(name, basic(BasicKind::Int));
    Package::new("sort", "sort").with_type(interface(
        "Interface",
        vec![
            method("Len", vec![], vec![Var::unnamed(basic(BasicKind::Int))]),
            method(
                "Less",
                vec![index("i"), index("j")],
                vec![Var::unnamed(basic(BasicKind::Bool))],
            ),
            method("Swap", vec![index("i"), index("j")], vec![]),
        ],
    ))
}

fn sync() -> Package {
    const PATH: &str = "sync";
    let unit = |name: &str| method(name, vec![], vec![]);
    let attempt = |name: &str| method(name, vec![], vec![Var::unnamed(basic(BasicKind::Bool))]);
    let mutex = |name: &str| TypeDecl::new(name, TypeShape::Struct(StructLit::default()));

    Package::new(PATH, "sync")
        .with_type(interface("Locker", vec![unit("Lock"), unit("Unlock")]))
        .with_type(mutex("Mutex").with_methods(vec![
            unit("Lock"),
            attempt("TryLock"),
            unit("Unlock"),
        ]))
        .with_type(mutex("RWMutex").with_methods(vec![
            unit("Lock"),
            unit("RLock"),
            method("RLocker", vec![], vec![Var::unnamed(TypeShape::named(PATH, "Locker"))]),
            unit("RUnlock"),
            attempt("TryLock"),
            attempt("TryRLock"),
            unit("Unlock"),
        ]))
}

fn interface(name: &str, methods: Vec<MethodDecl>) -> TypeDecl {
    TypeDecl::new(
        name,
        TypeShape::Interface(InterfaceLit {
            methods,
            embeds: Vec::new(),
        }),
    )
}

/// Interface made only of interfaces of the same package.
fn composite(path: &str, name: &str, embeds: &[&str]) -> TypeDecl {
    TypeDecl::new(
        name,
        TypeShape::Interface(InterfaceLit {
            methods: Vec::new(),
            embeds: embeds.iter().map(|e| TypeShape::named(path, *e)).collect(),
        }),
    )
}

fn method(name: &str, params: Vec<Var>, results: Vec<Var>) -> MethodDecl {
    MethodDecl::new(
        name,
        Signature {
            params,
            results,
            variadic: false,
        },
    )
}

/// `Read(p []byte) (n int, err error)` and friends.
fn read_write(name: &str, buf: &str) -> MethodDecl {
    method(
        name,
        vec![named_var(buf, bytes())],
        vec![
            named_var("n", basic(BasicKind::Int)),
            named_var("err", TypeShape::error()),
        ],
    )
}

fn bytes_producer(name: &str, result: &str) -> MethodDecl {
    method(
        name,
        vec![],
        vec![named_var(result, bytes()), named_var("err", TypeShape::error())],
    )
}

fn close() -> MethodDecl {
    method("Close", vec![], vec![Var::unnamed(TypeShape::error())])
}

fn named_var(name: &str, ty: TypeShape) -> Var {
    Var::new(Some(name), ty)
}

fn basic(kind: BasicKind) -> TypeShape {
    TypeShape::Basic(kind)
}

fn bytes() -> TypeShape {
    TypeShape::slice(basic(BasicKind::Byte))
}

fn any() -> TypeShape {
    TypeShape::Named(NamedRef::predeclared("any"))
}
