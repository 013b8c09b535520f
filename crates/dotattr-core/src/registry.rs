//! Dispatch from an [`AttributeType`] to its codec.
//!
//! Every attribute value type maps to exactly one stateless codec. The table
//! is an exhaustive `match`, so adding a type without a codec does not
//! compile. Values cross the dispatch boundary as [`AttributeValue`].
//!
//! Asking for an unknown type name, or handing a codec a value of another
//! type, is a caller bug rather than bad user data. The `try_` functions
//! report it as a [`DispatchFault`]; the others panic.

use crate::codec::{Codec, ParsedValue, ValidationContext};
use crate::diagnostic::Diagnostic;
use crate::grammar::{
    ArrowType, ArrowTypeGrammar, Color, ColorGrammar, Point, PointGrammar, Shape, ShapeGrammar,
    SplineType, SplineTypeGrammar, Style, StyleGrammar,
};
use crate::literal::{Literal, literal_enum};
use crate::primitive::{
    BoolCodec, ClusterMode, DirType, DoubleCodec, EnumCodec, IntCodec, Layout, OutputMode,
    PageDir, RankDir, Splines,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

// ─── Types ────────────────────────────────────────────────────────────────

literal_enum! {
    /// Every attribute value type, with its stable identifier.
    pub enum AttributeType {
        Bool => "bool",
        Int => "int",
        Double => "double",
        DirType => "dirType",
        Layout => "layout",
        ClusterMode => "clusterMode",
        OutputMode => "outputMode",
        PageDir => "pagedir",
        RankDir => "rankdir",
        Splines => "splines",
        ArrowType => "arrowType",
        Color => "color",
        Point => "point",
        Shape => "shape",
        SplineType => "splineType",
        Style => "style",
    }
}

impl AttributeType {
    /// The stable identifier, e.g. `"rankdir"`.
    pub fn name(self) -> &'static str {
        self.literal()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// Whether values of this type come from a closed literal domain.
    pub fn is_enumeration(self) -> bool {
        matches!(
            self,
            Self::DirType
                | Self::Layout
                | Self::ClusterMode
                | Self::OutputMode
                | Self::PageDir
                | Self::RankDir
                | Self::Splines
        )
    }
}

static BY_NAME: LazyLock<HashMap<&'static str, AttributeType>> = LazyLock::new(|| {
    AttributeType::VALUES
        .iter()
        .map(|&ty| (ty.literal(), ty))
        .collect()
});

/// A typed attribute value of any [`AttributeType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AttributeValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    DirType(DirType),
    Layout(Layout),
    ClusterMode(ClusterMode),
    OutputMode(OutputMode),
    PageDir(PageDir),
    RankDir(RankDir),
    Splines(Splines),
    ArrowType(ArrowType),
    Color(Color),
    Point(Point),
    Shape(Shape),
    SplineType(SplineType),
    Style(Style),
}

/// Conversion between a codec's own value type and [`AttributeValue`].
pub trait TypedValue: Sized {
    const TYPE: AttributeType;

    fn into_attribute(self) -> AttributeValue;

    fn from_attribute(value: &AttributeValue) -> Option<&Self>;
}

macro_rules! typed_values {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl TypedValue for $ty {
                const TYPE: AttributeType = AttributeType::$variant;

                fn into_attribute(self) -> AttributeValue {
                    AttributeValue::$variant(self)
                }

                fn from_attribute(value: &AttributeValue) -> Option<&Self> {
                    match value {
                        AttributeValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::$variant(value)
                }
            }
        )+

        impl AttributeValue {
            /// The type this value belongs to.
            pub fn attribute_type(&self) -> AttributeType {
                match self {
                    $(AttributeValue::$variant(_) => AttributeType::$variant),+
                }
            }
        }
    };
}

typed_values! {
    bool => Bool,
    i32 => Int,
    f64 => Double,
    DirType => DirType,
    Layout => Layout,
    ClusterMode => ClusterMode,
    OutputMode => OutputMode,
    PageDir => PageDir,
    RankDir => RankDir,
    Splines => Splines,
    ArrowType => ArrowType,
    Color => Color,
    Point => Point,
    Shape => Shape,
    SplineType => SplineType,
    Style => Style,
}

// ─── Faults ──────────────────────────────────────────────────────────────

/// A contract violation by the caller, never caused by attribute text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchFault {
    #[error("unknown attribute type '{0}'")]
    UnknownAttributeType(String),

    #[error("the {expected} codec was given a {found} value")]
    ValueMismatch {
        expected: AttributeType,
        found: AttributeType,
    },
}

// ─── Object-safe codec ───────────────────────────────────────────────────

/// A [`Codec`] seen through [`AttributeValue`], so that all codecs share one
/// table.
pub trait AttributeCodec: Send + Sync {
    fn attribute_type(&self) -> AttributeType;

    fn parse_value(&self, raw: &str) -> ParsedValue<AttributeValue>;

    fn serialize_value(&self, value: &AttributeValue) -> Result<String, DispatchFault>;

    fn validate_value(
        &self,
        value: &AttributeValue,
        context: &ValidationContext,
    ) -> Result<Vec<Diagnostic>, DispatchFault>;
}

impl<C> AttributeCodec for C
where
    C: Codec,
    C::Value: TypedValue,
{
    fn attribute_type(&self) -> AttributeType {
        C::Value::TYPE
    }

    fn parse_value(&self, raw: &str) -> ParsedValue<AttributeValue> {
        self.parse(raw).map(TypedValue::into_attribute)
    }

    fn serialize_value(&self, value: &AttributeValue) -> Result<String, DispatchFault> {
        downcast::<C::Value>(value).map(|typed| self.serialize(typed))
    }

    fn validate_value(
        &self,
        value: &AttributeValue,
        context: &ValidationContext,
    ) -> Result<Vec<Diagnostic>, DispatchFault> {
        downcast::<C::Value>(value).map(|typed| self.validate(typed, context))
    }
}

fn downcast<T: TypedValue>(value: &AttributeValue) -> Result<&T, DispatchFault> {
    T::from_attribute(value).ok_or(DispatchFault::ValueMismatch {
        expected: T::TYPE,
        found: value.attribute_type(),
    })
}

// ─── Table ───────────────────────────────────────────────────────────────

static DIR_TYPE: EnumCodec<DirType> = EnumCodec::new();
static LAYOUT: EnumCodec<Layout> = EnumCodec::new();
static CLUSTER_MODE: EnumCodec<ClusterMode> = EnumCodec::new();
static OUTPUT_MODE: EnumCodec<OutputMode> = EnumCodec::new();
static PAGE_DIR: EnumCodec<PageDir> = EnumCodec::new();
static RANK_DIR: EnumCodec<RankDir> = EnumCodec::new();
static SPLINES: EnumCodec<Splines> = EnumCodec::new();

/// The codec for a type.
pub fn codec(ty: AttributeType) -> &'static dyn AttributeCodec {
    match ty {
        AttributeType::Bool => &BoolCodec,
        AttributeType::Int => &IntCodec,
        AttributeType::Double => &DoubleCodec,
        AttributeType::DirType => &DIR_TYPE,
        AttributeType::Layout => &LAYOUT,
        AttributeType::ClusterMode => &CLUSTER_MODE,
        AttributeType::OutputMode => &OUTPUT_MODE,
        AttributeType::PageDir => &PAGE_DIR,
        AttributeType::RankDir => &RANK_DIR,
        AttributeType::Splines => &SPLINES,
        AttributeType::ArrowType => &ArrowTypeGrammar,
        AttributeType::Color => &ColorGrammar,
        AttributeType::Point => &PointGrammar,
        AttributeType::Shape => &ShapeGrammar,
        AttributeType::SplineType => &SplineTypeGrammar,
        AttributeType::Style => &StyleGrammar,
    }
}

/// The codec for a type identifier such as `"color"`.
///
/// # Errors
/// Returns [`DispatchFault::UnknownAttributeType`] for an unknown identifier.
pub fn try_codec_named(name: &str) -> Result<&'static dyn AttributeCodec, DispatchFault> {
    AttributeType::from_name(name)
        .map(codec)
        .ok_or_else(|| DispatchFault::UnknownAttributeType(name.to_string()))
}

/// The codec for a type identifier.
///
/// # Panics
/// Panics if `name` is not a known identifier.
pub fn codec_named(name: &str) -> &'static dyn AttributeCodec {
    try_codec_named(name).unwrap_or_else(|fault| panic!("{fault}"))
}

// ─── Dispatch ────────────────────────────────────────────────────────────

/// Parse a raw value as `ty`. `None` (attribute absent) yields `None`.
pub fn parse(ty: AttributeType, raw: Option<&str>) -> Option<ParsedValue<AttributeValue>> {
    let raw = raw?;
    log::trace!("parse {ty}: {raw:?}");
    let parsed = codec(ty).parse_value(raw);
    if parsed.has_diagnostics() {
        log::debug!("{ty} {raw:?}: {} diagnostic(s)", parsed.diagnostics().len());
    }
    Some(parsed)
}

/// Parse by type identifier.
///
/// # Panics
/// Panics if `name` is not a known identifier.
pub fn parse_named(name: &str, raw: Option<&str>) -> Option<ParsedValue<AttributeValue>> {
    let raw = raw?;
    Some(codec_named(name).parse_value(raw))
}

/// Canonical text for a value of `ty`. `None` yields `None`.
///
/// # Errors
/// Returns [`DispatchFault::ValueMismatch`] if `value` is not a `ty` value.
pub fn try_serialize(
    ty: AttributeType,
    value: Option<&AttributeValue>,
) -> Result<Option<String>, DispatchFault> {
    value.map(|value| codec(ty).serialize_value(value)).transpose()
}

/// Canonical text for a value of `ty`. `None` yields `None`.
///
/// # Panics
/// Panics if `value` is not a `ty` value.
pub fn serialize(ty: AttributeType, value: Option<&AttributeValue>) -> Option<String> {
    try_serialize(ty, value).unwrap_or_else(|fault| panic!("{fault}"))
}

/// Semantic checks for a value of `ty`.
///
/// # Errors
/// Returns [`DispatchFault::ValueMismatch`] if `value` is not a `ty` value.
pub fn try_validate(
    ty: AttributeType,
    value: &AttributeValue,
    context: &ValidationContext,
) -> Result<Vec<Diagnostic>, DispatchFault> {
    let diags = codec(ty).validate_value(value, context)?;
    log::trace!("validate {ty}: {} diagnostic(s)", diags.len());
    Ok(diags)
}

/// Semantic checks for a value of `ty`.
///
/// # Panics
/// Panics if `value` is not a `ty` value.
pub fn validate(
    ty: AttributeType,
    value: &AttributeValue,
    context: &ValidationContext,
) -> Vec<Diagnostic> {
    try_validate(ty, value, context).unwrap_or_else(|fault| panic!("{fault}"))
}

// ─── Tests ────────────────────────────────────────────────────────────────
