//! Color scheme tables used to validate named colors.
//!
//! Three families are known: `x11` (the default), `svg`, and the Brewer
//! schemes (`blues9`, `set312`, ...), whose colors are named `1`..`n`.
//! Lookups are case-insensitive, as in Graphviz.

use std::collections::HashSet;
use std::sync::LazyLock;

/// The scheme used when neither the color nor the context names one.
pub const DEFAULT_SCHEME: &str = "x11";

/// A resolved color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    X11,
    Svg,
    /// A Brewer family at a given size, e.g. `blues` with 9 colors.
    Brewer { family: &'static str, size: u8 },
}

impl ColorScheme {
    /// Resolve a scheme name such as `x11`, `SVG` or `accent8`.
    pub fn lookup(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "x11" => return Some(Self::X11),
            "svg" => return Some(Self::Svg),
            _ => {}
        }
        // Family names may end in a digit themselves (`set3`, `dark2`).
        BREWER_FAMILIES.iter().find_map(|&(family, min, max)| {
            let size: u8 = lower.strip_prefix(family)?.parse().ok()?;
            (min..=max)
                .contains(&size)
                .then_some(Self::Brewer { family, size })
        })
    }

    /// Whether `color` names a color of this scheme.
    pub fn contains(&self, color: &str) -> bool {
        let lower = color.to_ascii_lowercase();
        match self {
            Self::X11 => X11_COLORS.contains(lower.as_str()),
            Self::Svg => SVG_COLORS.contains(&lower.as_str()),
            Self::Brewer { size, .. } => lower
                .parse::<u8>()
                .is_ok_and(|n| (1..=*size).contains(&n) && !lower.starts_with('0')),
        }
    }

    /// Canonical scheme name, e.g. `x11` or `blues9`.
    pub fn name(&self) -> String {
        match self {
            Self::X11 => "x11".to_string(),
            Self::Svg => "svg".to_string(),
            Self::Brewer { family, size } => format!("{family}{size}"),
        }
    }
}

// ─── Brewer ──────────────────────────────────────────────────────────────

/// Brewer families with their smallest and largest size.
const BREWER_FAMILIES: &[(&str, u8, u8)] = &[
    ("accent", 3, 8),
    ("blues", 3, 9),
    ("brbg", 3, 11),
    ("bugn", 3, 9),
    ("bupu", 3, 9),
    ("dark2", 3, 8),
    ("gnbu", 3, 9),
    ("greens", 3, 9),
    ("greys", 3, 9),
    ("oranges", 3, 9),
    ("orrd", 3, 9),
    ("paired", 3, 12),
    ("pastel1", 3, 9),
    ("pastel2", 3, 8),
    ("piyg", 3, 11),
    ("prgn", 3, 11),
    ("pubu", 3, 9),
    ("pubugn", 3, 9),
    ("puor", 3, 11),
    ("purd", 3, 9),
    ("purples", 3, 9),
    ("rdbu", 3, 11),
    ("rdgy", 3, 11),
    ("rdpu", 3, 9),
    ("rdylbu", 3, 11),
    ("rdylgn", 3, 11),
    ("reds", 3, 9),
    ("set1", 3, 9),
    ("set2", 3, 8),
    ("set3", 3, 12),
    ("spectral", 3, 11),
    ("ylgn", 3, 9),
    ("ylgnbu", 3, 9),
    ("ylorbr", 3, 9),
    ("ylorrd", 3, 9),
];

// ─── SVG ─────────────────────────────────────────────────────────────────

const SVG_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "grey", "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon",
    "sandybrown", "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue",
    "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan", "teal", "thistle",
    "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

// ─── X11 ─────────────────────────────────────────────────────────────────

/// X11 names without numbered variants.
const X11_PLAIN: &[&str] = &[
    "aliceblue", "beige", "black", "blanchedalmond", "blueviolet", "cornflowerblue", "crimson",
    "darkgreen", "darkkhaki", "darksalmon", "darkslateblue", "darkslategrey", "darkturquoise",
    "darkviolet", "dimgray", "dimgrey", "floralwhite", "forestgreen", "gainsboro", "ghostwhite",
    "gray", "grey", "greenyellow", "indigo", "invis", "lavender", "lawngreen", "lightcoral",
    "lightgoldenrodyellow", "lightgray", "lightgrey", "lightseagreen", "lightslateblue",
    "lightslategray", "lightslategrey", "limegreen", "linen", "mediumaquamarine", "mediumblue",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "moccasin", "navy", "navyblue", "none",
    "oldlace", "palegoldenrod", "papayawhip", "peru", "powderblue", "saddlebrown",
    "sandybrown", "transparent", "violet", "white", "whitesmoke", "yellowgreen",
];

/// X11 names that also exist with the suffixes `1` to `4`.
const X11_NUMBERED: &[&str] = &[
    "antiquewhite", "aquamarine", "azure", "bisque", "blue", "brown", "burlywood", "cadetblue",
    "chartreuse", "chocolate", "coral", "cornsilk", "cyan", "darkgoldenrod", "darkolivegreen",
    "darkorange", "darkorchid", "darkseagreen", "darkslategray", "deeppink", "deepskyblue",
    "dodgerblue", "firebrick", "gold", "goldenrod", "green", "honeydew", "hotpink", "indianred",
    "ivory", "khaki", "lavenderblush", "lemonchiffon", "lightblue", "lightcyan",
    "lightgoldenrod", "lightpink", "lightsalmon", "lightskyblue", "lightsteelblue",
    "lightyellow", "magenta", "maroon", "mediumorchid", "mediumpurple", "mistyrose",
    "navajowhite", "olivedrab", "orange", "orangered", "orchid", "palegreen", "paleturquoise",
    "palevioletred", "peachpuff", "pink", "plum", "purple", "red", "rosybrown", "royalblue",
    "salmon", "seagreen", "seashell", "sienna", "skyblue", "slateblue", "slategray", "snow",
    "springgreen", "steelblue", "tan", "thistle", "tomato", "turquoise", "violetred", "wheat",
    "yellow",
];

static X11_COLORS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut names: HashSet<String> = X11_PLAIN.iter().map(|s| s.to_string()).collect();
    for base in X11_NUMBERED {
        names.insert(base.to_string());
        for n in 1..=4 {
            names.insert(format!("{base}{n}"));
        }
    }
    for n in 0..=100 {
        names.insert(format!("gray{n}"));
        names.insert(format!("grey{n}"));
    }
    names
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtin_schemes() {
        assert_eq!(ColorScheme::lookup("X11"), Some(ColorScheme::X11));
        assert_eq!(ColorScheme::lookup("svg"), Some(ColorScheme::Svg));
        assert_eq!(ColorScheme::lookup("nope"), None);
    }

    #[test]
    fn resolves_brewer_sizes() {
        assert_eq!(
            ColorScheme::lookup("blues9"),
            Some(ColorScheme::Brewer { family: "blues", size: 9 })
        );
        assert_eq!(ColorScheme::lookup("blues10"), None);
        assert_eq!(ColorScheme::lookup("paired12").map(|s| s.name()).as_deref(), Some("paired12"));
        assert_eq!(ColorScheme::lookup("accent"), None);
        assert_eq!(
            ColorScheme::lookup("set312"),
            Some(ColorScheme::Brewer { family: "set3", size: 12 })
        );
        assert_eq!(
            ColorScheme::lookup("pubugn4"),
            Some(ColorScheme::Brewer { family: "pubugn", size: 4 })
        );
    }

    #[test]
    fn x11_membership() {
        let x11 = ColorScheme::X11;
        assert!(x11.contains("red"));
        assert!(x11.contains("Red3"));
        assert!(x11.contains("gray100"));
        assert!(x11.contains("navyblue"));
        assert!(!x11.contains("red5"));
        assert!(!x11.contains("fuchsia"));
    }

    #[test]
    fn svg_membership() {
        assert!(ColorScheme::Svg.contains("fuchsia"));
        assert!(!ColorScheme::Svg.contains("red1"));
        assert_eq!(SVG_COLORS.len(), 147);
    }

    #[test]
    fn brewer_membership() {
        let scheme = ColorScheme::lookup("accent3").unwrap();
        assert!(scheme.contains("1"));
        assert!(scheme.contains("3"));
        assert!(!scheme.contains("4"));
        assert!(!scheme.contains("0"));
        assert!(!scheme.contains("01"));
        assert!(!scheme.contains("red"));
    }
}
