//! Structured document model and design-intent contract.
//!
//! These are the wire shapes the generation subsystem produces and the
//! quality gate consumes. Field names follow the producer's camelCase
//! JSON; all structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for API responses.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of element kinds a component may declare.
///
/// Every per-shape check matches exhaustively over this enum, so adding a
/// kind is a compile-time-checked decision rather than a silent
/// fallthrough in stringly-typed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Root container.
    Svg,
    /// Grouping container.
    G,
    /// Path with explicit path data.
    Path,
    /// Circle.
    Circle,
    /// Rectangle.
    Rect,
    /// Line segment.
    Line,
    /// Open point sequence.
    Polyline,
    /// Closed point sequence.
    Polygon,
    /// Ellipse.
    Ellipse,
}

impl ElementKind {
    /// Returns the kind as its markup tag name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::G => "g",
            Self::Path => "path",
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Ellipse => "ellipse",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component attribute value: numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric attribute (coordinates, radii, widths).
    Number(f64),
    /// Textual attribute (colors, point lists, path data).
    Text(String),
}

impl AttrValue {
    /// Returns the numeric value, if this is a number.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }
}

/// Generation metadata attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Metadata {
    /// Motif this component belongs to, if any.
    pub motif: Option<String>,
    /// Whether the component was freshly generated.
    pub generated: bool,
    /// Whether the component was reused from a prior document.
    pub reused: bool,
}

/// One element of a structured document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Component {
    /// Stable identifier assigned by the generator.
    pub id: String,
    /// Semantic category (e.g., "circle", "accent", "backdrop").
    #[serde(rename = "type")]
    pub category: String,
    /// Markup element kind.
    #[serde(rename = "element")]
    pub kind: ElementKind,
    /// Element-kind-specific attributes.
    #[serde(default)]
    pub attributes: HashMap<String, AttrValue>,
    /// Generation metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Component {
    /// Numeric attribute lookup.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(AttrValue::as_number)
    }

    /// Textual attribute lookup.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_text)
    }
}

/// Declared canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
}

/// A structured document as produced by the generator.
///
/// The quality gate borrows this immutably and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Components in draw order.
    pub components: Vec<Component>,
    /// Declared canvas bounds.
    pub bounds: Bounds,
    /// Authorized color palette (hex strings).
    #[serde(default)]
    pub palette: Vec<String>,
}

/// Stroke rules declared by the design intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StrokeRules {
    /// When `true`, components must not carry a fill other than `"none"`.
    pub stroke_only: bool,
}

/// Style section of the design intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IntentStyle {
    /// Stroke rules.
    pub stroke_rules: StrokeRules,
    /// Intended palette (informational; the document's own palette is
    /// what the style check enforces against).
    pub palette: Vec<String>,
}

/// Hard constraints declared by the design intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IntentConstraints {
    /// Maximum number of components allowed.
    pub max_elements: usize,
    /// Motifs that must be present in the document.
    pub required_motifs: Vec<String>,
}

impl Default for IntentConstraints {
    fn default() -> Self {
        Self {
            max_elements: 20,
            required_motifs: Vec::new(),
        }
    }
}

/// The declarative contract a generated document is expected to satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignIntent {
    /// Style rules.
    pub style: IntentStyle,
    /// Hard constraints.
    pub constraints: IntentConstraints,
    /// Additional allowed motifs beyond the required ones.
    pub motifs: Vec<String>,
}
