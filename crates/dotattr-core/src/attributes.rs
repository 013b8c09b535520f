//! Catalogue of typed Graphviz attributes.
//!
//! Maps an attribute name, as written in a DOT file, to the value type its
//! text must follow on a given element kind. Attributes whose values are
//! free text (`label`, `URL`, `colorscheme`, ...) are not listed.

use crate::codec::ElementKind;
use crate::registry::AttributeType;

use ElementKind::{Cluster as C, Edge as E, Graph as G, Node as N};

/// Name of the attribute that selects the color scheme of an element.
pub const COLOR_SCHEME_ATTRIBUTE: &str = "colorscheme";

struct Entry {
    name: &'static str,
    ty: AttributeType,
    used_by: &'static [ElementKind],
}

const fn entry(name: &'static str, ty: AttributeType, used_by: &'static [ElementKind]) -> Entry {
    Entry { name, ty, used_by }
}

const CATALOGUE: &[Entry] = &[
    // Arrows
    entry("arrowhead", AttributeType::ArrowType, &[E]),
    entry("arrowtail", AttributeType::ArrowType, &[E]),
    entry("arrowsize", AttributeType::Double, &[E]),
    entry("dir", AttributeType::DirType, &[E]),
    // Colors
    entry("bgcolor", AttributeType::Color, &[G, C]),
    entry("color", AttributeType::Color, &[E, N, C]),
    entry("fillcolor", AttributeType::Color, &[N, E, C]),
    entry("fontcolor", AttributeType::Color, &[E, N, G, C]),
    entry("labelfontcolor", AttributeType::Color, &[E]),
    entry("pencolor", AttributeType::Color, &[C]),
    // Layout
    entry("layout", AttributeType::Layout, &[G]),
    entry("clusterrank", AttributeType::ClusterMode, &[G]),
    entry("outputorder", AttributeType::OutputMode, &[G]),
    entry("pagedir", AttributeType::PageDir, &[G]),
    entry("rankdir", AttributeType::RankDir, &[G]),
    entry("splines", AttributeType::Splines, &[G]),
    entry("nodesep", AttributeType::Double, &[G]),
    entry("mclimit", AttributeType::Double, &[G]),
    entry("nslimit", AttributeType::Double, &[G]),
    entry("dpi", AttributeType::Double, &[G]),
    entry("rotate", AttributeType::Int, &[G]),
    entry("searchsize", AttributeType::Int, &[G]),
    entry("minlen", AttributeType::Int, &[E]),
    // Positions
    entry("pos", AttributeType::Point, &[N]),
    entry("pos", AttributeType::SplineType, &[E]),
    entry("lp", AttributeType::Point, &[E, G, C]),
    entry("head_lp", AttributeType::Point, &[E]),
    entry("tail_lp", AttributeType::Point, &[E]),
    entry("xlp", AttributeType::Point, &[N, E]),
    // Node geometry
    entry("shape", AttributeType::Shape, &[N]),
    entry("sides", AttributeType::Int, &[N]),
    entry("peripheries", AttributeType::Int, &[N, C]),
    entry("distortion", AttributeType::Double, &[N]),
    entry("skew", AttributeType::Double, &[N]),
    entry("orientation", AttributeType::Double, &[N]),
    entry("width", AttributeType::Double, &[N]),
    entry("height", AttributeType::Double, &[N]),
    entry("regular", AttributeType::Bool, &[N]),
    entry("fixedsize", AttributeType::Bool, &[N]),
    // Drawing
    entry("style", AttributeType::Style, &[E, N, C, G]),
    entry("penwidth", AttributeType::Double, &[C, N, E]),
    entry("fontsize", AttributeType::Double, &[E, N, G, C]),
    entry("labelfontsize", AttributeType::Double, &[E]),
    entry("labelangle", AttributeType::Double, &[E]),
    entry("labeldistance", AttributeType::Double, &[E]),
    // Flags
    entry("center", AttributeType::Bool, &[G]),
    entry("compound", AttributeType::Bool, &[G]),
    entry("constraint", AttributeType::Bool, &[E]),
    entry("decorate", AttributeType::Bool, &[E]),
    entry("forcelabels", AttributeType::Bool, &[G]),
    entry("headclip", AttributeType::Bool, &[E]),
    entry("tailclip", AttributeType::Bool, &[E]),
    entry("newrank", AttributeType::Bool, &[G]),
];

/// The value type of `name` on `element`, if it is a catalogued typed
/// attribute there.
pub fn attribute_type(name: &str, element: ElementKind) -> Option<AttributeType> {
    CATALOGUE
        .iter()
        .find(|e| e.name == name && e.used_by.contains(&element))
        .map(|e| e.ty)
}

/// Whether `name` is catalogued for any element kind.
pub fn is_typed_attribute(name: &str) -> bool {
    CATALOGUE.iter().any(|e| e.name == name)
}

/// Every typed attribute usable on `element`, in catalogue order.
pub fn attributes_for(element: ElementKind) -> impl Iterator<Item = (&'static str, AttributeType)> {
    CATALOGUE
        .iter()
        .filter(move |e| e.used_by.contains(&element))
        .map(|e| (e.name, e.ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pos_depends_on_element() {
        assert_eq!(attribute_type("pos", N), Some(AttributeType::Point));
        assert_eq!(attribute_type("pos", E), Some(AttributeType::SplineType));
        assert_eq!(attribute_type("pos", G), None);
    }

    #[test]
    fn element_restrictions() {
        assert_eq!(attribute_type("rankdir", G), Some(AttributeType::RankDir));
        assert_eq!(attribute_type("rankdir", N), None);
        assert_eq!(attribute_type("arrowhead", E), Some(AttributeType::ArrowType));
        assert_eq!(attribute_type("style", C), Some(AttributeType::Style));
        assert_eq!(attribute_type("label", N), None);
        assert!(is_typed_attribute("shape"));
        assert!(!is_typed_attribute(COLOR_SCHEME_ATTRIBUTE));
    }

    #[test]
    fn no_duplicate_entries_per_element() {
        for element in [G, C, N, E] {
            let mut seen = HashSet::new();
            for (name, _) in attributes_for(element) {
                assert!(seen.insert(name), "{name} listed twice for {element:?}");
            }
        }
    }
}
