//! Property key normalization

/// Normalize a raw key into its canonical form.
///
/// Keys are lower-cased and `_` is treated as a path separator, so
/// `FOO_BAR`, `foo.bar` and `Foo.Bar` all address the same slot.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('_', ".")
}

/// Join a parent path and a child segment with `.`.
///
/// An empty parent yields the child alone.
pub fn join_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// Strip `root.` from `key`, returning the remainder for descendants of `root`.
pub fn strip_root<'a>(root: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('.'))
}
