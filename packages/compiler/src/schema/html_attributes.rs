//! HTML attribute tables used by the data-bag builder.
//!
//! Attribute names are matched case-insensitively, the way the HTML parser normalizes them.

use crate::ir::Namespace;
use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const SVG_NAMESPACE_URI: &str = "http://www.w3.org/2000/svg";

/// Attributes whose mere presence means "on".
static BOOLEAN_ATTRIBUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "allowfullscreen",
        "async",
        "autofocus",
        "autoplay",
        "checked",
        "compact",
        "controls",
        "default",
        "defer",
        "disabled",
        "formnovalidate",
        "hidden",
        "indeterminate",
        "inert",
        "ismap",
        "itemscope",
        "loop",
        "multiple",
        "muted",
        "nomodule",
        "novalidate",
        "open",
        "readonly",
        "required",
        "reversed",
        "selected",
    ]
    .into_iter()
    .collect()
});

/// Attributes holding an element id (or a space separated list of ids) of the same document.
static ID_REFERENCING_ATTRIBUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "id",
        "for",
        "aria-activedescendant",
        "aria-controls",
        "aria-describedby",
        "aria-details",
        "aria-errormessage",
        "aria-flowto",
        "aria-labelledby",
        "aria-owns",
    ]
    .into_iter()
    .collect()
});

pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_id_referencing_attribute(name: &str) -> bool {
    ID_REFERENCING_ATTRIBUTES.contains(name.to_ascii_lowercase().as_str())
}

/// `href` values pointing at an element of the same document, e.g. `#section-2`.
pub fn is_fragment_only_url(value: &str) -> bool {
    value.len() > 1 && value.starts_with('#')
}

/// Elements whose `href` may reference a fragment of the current document.
pub fn is_fragment_link(tag: &str, attr: &str) -> bool {
    matches!(tag, "a" | "area") && attr.eq_ignore_ascii_case("href")
}

pub fn is_svg_use_href(tag: &str, namespace: Namespace, attr: &str) -> bool {
    namespace == Namespace::Svg && tag == "use" && matches!(attr, "href" | "xlink:href")
}
