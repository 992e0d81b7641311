/// Elements that never take a closing tag, however they are written.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Case-insensitive membership test against [`VOID_ELEMENTS`].
#[must_use]
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|element| element.eq_ignore_ascii_case(name))
}
