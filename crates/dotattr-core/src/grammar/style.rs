//! The `style` grammar: a comma-separated list of style items.
//!
//! ```text
//! style := item (',' item)*
//! item  := name ('(' arg (',' arg)* ')')?
//! ```
//!
//! Which keywords are legal depends on the element the style is attached
//! to, so most checks happen in `validate`.

use super::lex::{parse_identifier, skip_space, symbol};
use super::{Expected, syntax_error, trailing_input};
use crate::codec::{Codec, ElementKind, ParsedValue, ValidationContext};
use crate::diagnostic::{Diagnostic, format_literal_list};
use crate::literal::{Literal, literal_enum};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_till;

literal_enum! {
    pub enum StyleKeyword {
        Bold => "bold",
        Dashed => "dashed",
        Diagonals => "diagonals",
        Dotted => "dotted",
        Filled => "filled",
        Invis => "invis",
        Radial => "radial",
        Rounded => "rounded",
        Solid => "solid",
        Striped => "striped",
        Wedged => "wedged",
        Tapered => "tapered",
        /// Deprecated in favour of the `penwidth` attribute.
        SetLineWidth => "setlinewidth",
    }
}

impl StyleKeyword {
    /// Keywords legal on an element kind, in declaration order.
    pub fn legal_for(element: ElementKind) -> &'static [StyleKeyword] {
        use StyleKeyword::*;
        match element {
            ElementKind::Node => &[
                Bold, Dashed, Diagonals, Dotted, Filled, Invis, Radial, Rounded, Solid, Striped,
                Wedged,
            ],
            ElementKind::Edge => &[Bold, Dashed, Dotted, Invis, Solid, Tapered],
            ElementKind::Cluster | ElementKind::Graph => &[
                Bold, Dashed, Dotted, Filled, Invis, Radial, Rounded, Solid, Striped,
            ],
        }
    }
}

/// One style item, e.g. `dashed` or `setlinewidth(2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleItem {
    pub name: String,
    pub args: SmallVec<[String; 2]>,
}

impl StyleItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// The keyword this item names, if it is a known one.
    pub fn keyword(&self) -> Option<StyleKeyword> {
        StyleKeyword::from_literal(&self.name)
    }
}

/// A parsed `style` value. Item order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub items: Vec<StyleItem>,
}

impl Style {
    pub fn contains(&self, keyword: StyleKeyword) -> bool {
        self.items.iter().any(|item| item.keyword() == Some(keyword))
    }
}

// ─── Grammar ─────────────────────────────────────────────────────────────

/// Codec for `style` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleGrammar;

impl Codec for StyleGrammar {
    type Value = Style;

    fn parse(&self, raw: &str) -> ParsedValue<Style> {
        let mut input = raw;
        let mut style = Style::default();
        loop {
            skip_space(&mut input);
            match parse_item(&mut input) {
                Ok(item) => style.items.push(item),
                Err(expected) => {
                    let diag = syntax_error(raw, input, expected);
                    let value = (!style.items.is_empty()).then_some(style);
                    return ParsedValue::partial(value, vec![diag]);
                }
            }
            skip_space(&mut input);
            if input.starts_with(',') {
                input = &input[1..];
            } else {
                break;
            }
        }
        ParsedValue::partial(Some(style), trailing_input(raw, input).into_iter().collect())
    }

    fn serialize(&self, value: &Style) -> String {
        value
            .items
            .iter()
            .map(|item| {
                if item.args.is_empty() {
                    item.name.clone()
                } else {
                    format!("{}({})", item.name, item.args.join(","))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn validate(&self, value: &Style, context: &ValidationContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let mut seen = HashSet::new();
        for item in &value.items {
            if !seen.insert(item.name.as_str()) {
                diags.push(Diagnostic::semantic_warning(
                    item.name.as_str(),
                    format!("The style '{}' is given more than once.", item.name),
                ));
            }

            let Some(keyword) = item.keyword() else {
                diags.push(Diagnostic::semantic(
                    item.name.as_str(),
                    format!(
                        "The style '{}' is not a known style. Valid styles are {}",
                        item.name,
                        format_literal_list(StyleKeyword::literals())
                    ),
                ));
                continue;
            };

            if keyword == StyleKeyword::SetLineWidth {
                validate_setlinewidth(item, &mut diags);
                continue;
            }

            if let Some(element) = context.element {
                let legal = StyleKeyword::legal_for(element);
                if !legal.contains(&keyword) {
                    diags.push(Diagnostic::semantic(
                        item.name.as_str(),
                        format!(
                            "The style '{}' is not valid for {}. Valid styles are {}",
                            item.name,
                            element_plural(element),
                            format_literal_list(legal.iter().map(|k| k.literal()))
                        ),
                    ));
                }
            }

            if !item.args.is_empty() {
                diags.push(Diagnostic::semantic_warning(
                    item.name.as_str(),
                    format!("The style '{}' takes no arguments; they are ignored.", item.name),
                ));
            }
        }
        diags
    }
}

fn element_plural(element: ElementKind) -> &'static str {
    match element {
        ElementKind::Graph => "graphs",
        ElementKind::Cluster => "clusters",
        ElementKind::Node => "nodes",
        ElementKind::Edge => "edges",
    }
}

fn validate_setlinewidth(item: &StyleItem, diags: &mut Vec<Diagnostic>) {
    diags.push(Diagnostic::semantic_warning(
        item.name.as_str(),
        "The style 'setlinewidth' is deprecated; use the 'penwidth' attribute instead.",
    ));
    match item.args.as_slice() {
        [width] if width.parse::<f64>().is_ok() => {}
        _ => diags.push(Diagnostic::semantic(
            item.name.as_str(),
            "The style 'setlinewidth' needs exactly one numeric argument.",
        )),
    }
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn parse_item(input: &mut &str) -> Result<StyleItem, Expected> {
    let name = parse_identifier(input).map_err(|_| "a style name")?;
    let mut item = StyleItem::new(name);
    skip_space(input);
    if input.starts_with('(') {
        symbol(input, '(').map_err(|_| "'('")?;
        loop {
            skip_space(input);
            let arg = take_till::<_, _, ContextError>(1.., |c: char| c == ',' || c == ')')
                .parse_next(input)
                .map_err(|_| "an argument")?;
            item.args.push(arg.trim_end().to_string());
            if input.starts_with(',') {
                *input = &input[1..];
            } else {
                break;
            }
        }
        symbol(input, ')').map_err(|_| "')'")?;
    }
    Ok(item)
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use pretty_assertions::assert_eq;

    fn parse_ok(raw: &str) -> Style {
        let parsed = StyleGrammar.parse(raw);
        assert!(parsed.is_ok(), "{raw:?}: {:?}", parsed.diagnostics());
        parsed.into_value().unwrap()
    }

    fn node() -> ValidationContext {
        ValidationContext::for_element(ElementKind::Node)
    }

    fn edge() -> ValidationContext {
        ValidationContext::for_element(ElementKind::Edge)
    }

    #[test]
    fn order_is_preserved() {
        let style = parse_ok("dashed,bold");
        assert_eq!(style.items.len(), 2);
        assert_eq!(StyleGrammar.serialize(&style), "dashed,bold");
        assert_eq!(StyleGrammar.serialize(&parse_ok(" bold , dashed ")), "bold,dashed");
    }

    #[test]
    fn arguments_are_kept() {
        let style = parse_ok("setlinewidth( 2 ),filled");
        assert_eq!(style.items[0].args.as_slice(), ["2".to_string()]);
        assert_eq!(StyleGrammar.serialize(&style), "setlinewidth(2),filled");
    }

    #[test]
    fn legality_depends_on_element() {
        let style = parse_ok("tapered");
        assert!(StyleGrammar.validate(&style, &edge()).is_empty());
        let diags = StyleGrammar.validate(&style, &node());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_error());
        assert!(diags[0].message().contains("'bold', 'dashed', 'diagonals'"));

        let diags = StyleGrammar.validate(&parse_ok("diagonals"), &edge());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn no_element_skips_legality() {
        let style = parse_ok("tapered,diagonals");
        assert!(StyleGrammar.validate(&style, &ValidationContext::new()).is_empty());
    }

    #[test]
    fn unknown_keyword_is_an_error() {
        let diags = StyleGrammar.validate(&parse_ok("wobbly"), &ValidationContext::new());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_error());
    }

    #[test]
    fn setlinewidth_is_deprecated_and_needs_one_number() {
        let diags = StyleGrammar.validate(&parse_ok("setlinewidth(3)"), &edge());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity(), Severity::Warning);

        let diags = StyleGrammar.validate(&parse_ok("setlinewidth"), &node());
        assert_eq!(diags.len(), 2);
        assert!(diags[1].is_error());

        let diags = StyleGrammar.validate(&parse_ok("setlinewidth(x)"), &node());
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn duplicates_and_stray_args_warn() {
        let diags = StyleGrammar.validate(&parse_ok("bold,bold(1)"), &node());
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.severity() == Severity::Warning));
    }

    #[test]
    fn syntax_errors_keep_leading_items() {
        let parsed = StyleGrammar.parse("bold,");
        assert!(parsed.has_errors());
        assert_eq!(parsed.value().map(|s| s.items.len()), Some(1));

        let parsed = StyleGrammar.parse("bold(1");
        assert_eq!(parsed.value(), None);
        assert_eq!(parsed.diagnostics()[0].offset(), Some(6));

        let parsed = StyleGrammar.parse("bold dashed");
        assert_eq!(parsed.diagnostics()[0].offset(), Some(5));
    }
}
