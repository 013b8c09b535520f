//! Closed literal domains.
//!
//! Every enumerated DOT value (rank directions, arrow primitives, style
//! keywords, ...) is a Rust enum whose variants map one-to-one onto fixed
//! spellings. The spellings are used both for matching and for messages.

/// A closed set of literal spellings, in declaration order.
pub trait Literal: Copy + Eq + Send + Sync + 'static {
    /// All values, in declaration order.
    const VALUES: &'static [Self];

    /// The exact spelling of this value.
    fn literal(self) -> &'static str;

    /// Exact, case-sensitive lookup; first match in declaration order wins.
    fn from_literal(raw: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.literal() == raw)
    }

    /// All spellings, in declaration order.
    fn literals() -> impl Iterator<Item = &'static str> {
        Self::VALUES.iter().map(|v| v.literal())
    }
}

/// Declare an enum together with its [`Literal`] table and `Display`.
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::literal::Literal for $name {
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn literal(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::literal::Literal::literal(*self))
            }
        }
    };
}

pub(crate) use literal_enum;

#[cfg(test)]
mod tests {
    use super::*;

    literal_enum! {
        enum Fruit {
            Apple => "apple",
            Pear => "pear",
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Fruit::from_literal("pear"), Some(Fruit::Pear));
        assert_eq!(Fruit::from_literal("Pear"), None);
        assert_eq!(Fruit::literals().collect::<Vec<_>>(), ["apple", "pear"]);
        assert_eq!(Fruit::Apple.to_string(), "apple");
    }
}
