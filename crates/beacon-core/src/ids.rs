//! ID prefixes for every stored entity.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `alr-3f9a01bc`.

pub const PREFIX_CITATION: &str = "cit";
pub const PREFIX_ALERT: &str = "alr";
pub const PREFIX_COMPETITOR: &str = "cmp";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_CITATION, PREFIX_ALERT, PREFIX_COMPETITOR];

/// Check whether `id` carries `prefix` in the `{prefix}-{hex}` shape.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
