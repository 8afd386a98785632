//! Go import path and identifier helpers.

/// Resolve a vendored import path to the path it vendors.
///
/// # Examples
/// ```
/// use circuitgen_core::utils::strip_vendor;
/// assert_eq!(strip_vendor("example.com/app/vendor/github.com/x/y"), "github.com/x/y");
/// assert_eq!(strip_vendor("github.com/x/y"), "github.com/x/y");
/// ```
pub fn strip_vendor(path: &str) -> &str {
    const VENDOR: &str = "/vendor/";
    match path.find(VENDOR) {
        Some(i) => &path[i + VENDOR.len()..],
        None => path,
    }
}

/// Guess the package name of an import path that was never loaded.
///
/// Uses the last path element, skipping a `/vN` major version element and
/// dropping a `.vN` suffix (`gopkg.in/yaml.v2` is `yaml`). A `go-` prefix is
/// dropped and characters that cannot appear in an identifier are removed.
///
/// # Examples
/// ```
/// use circuitgen_core::utils::package_name_from_path;
/// assert_eq!(package_name_from_path("github.com/cep21/circuit/v3"), "circuit");
/// assert_eq!(package_name_from_path("gopkg.in/yaml.v2"), "yaml");
/// assert_eq!(package_name_from_path("net/http"), "http");
/// ```
pub fn package_name_from_path(path: &str) -> String {
    let mut elems = path.trim_end_matches('/').rsplit('/');
    let mut last = elems.next().unwrap_or_default();
    if is_major_version(last)
        && let Some(prev) = elems.next()
    {
        last = prev;
    }

    if let Some((base, suffix)) = last.rsplit_once('.')
        && is_major_version(suffix)
    {
        last = base;
    }

    let last = last.strip_prefix("go-").unwrap_or(last);
    last.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn is_major_version(elem: &str) -> bool {
    elem.strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
