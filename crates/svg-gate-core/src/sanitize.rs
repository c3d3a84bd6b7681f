//! Markup sanitization against an injection-resistant allow-list.
//!
//! The sanitizer is default-deny: only explicitly permitted elements
//! survive, so new forbidden-tag variants (case tricks, obscure polyglot
//! tags) are dropped without needing a denylist entry. It never panics
//! and never returns `Err` — every failure mode for malformed or hostile
//! input becomes an entry in [`SanitizationResult::errors`].

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tree::{Element, parse_markup};

/// Canonical SVG namespace; the root `xmlns` must equal this exactly.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Elements permitted to survive sanitization (root container plus
/// path/shape primitives).
pub const ALLOWED_TAGS: &[&str] = &[
    "svg", "g", "path", "circle", "rect", "line", "polyline", "polygon", "ellipse",
];

/// Elements removed with their entire subtree. Redundant with the
/// allow-list; kept as an explicit denylist so the hostile cases read as
/// hostile.
pub const FORBIDDEN_TAGS: &[&str] = &["script", "foreignobject", "image"];

/// Attributes that can carry an external reference.
const REFERENCE_ATTRS: &[&str] = &["href", "xlink:href"];

/// Event-handler-style attribute names (`onclick`, `onload`, ...).
static EVENT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^on[a-z]+$").expect("valid regex"));

/// Decimal literals with three or more fractional digits.
static LONG_DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+\.\d{3,}").expect("valid regex"));

/// Outcome of one sanitization call.
///
/// Immutable value, constructed once per call. A renderer may only
/// consume `sanitized_markup` when `is_valid` is `true`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationResult {
    /// Markup with all disallowed constructs removed.
    pub sanitized_markup: String,
    /// Degradations that do not block rendering.
    pub warnings: Vec<String>,
    /// Faults that make the markup untrusted.
    pub errors: Vec<String>,
    /// `true` exactly when `errors` is empty.
    pub is_valid: bool,
}

impl SanitizationResult {
    fn compose(sanitized_markup: String, warnings: Vec<String>, errors: Vec<String>) -> Self {
        let is_valid = errors.is_empty();
        Self {
            sanitized_markup,
            warnings,
            errors,
            is_valid,
        }
    }
}

/// Sanitize raw markup against the allow-list.
///
/// Never panics for malformed input; malformed or empty input yields
/// `is_valid = false` with a descriptive error and an empty
/// `sanitized_markup`. Sanitizing already-sanitized output is a no-op.
#[tracing::instrument(skip_all, fields(raw_len = raw.len()))]
pub fn sanitize(raw: &str) -> SanitizationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let tree = match parse_markup(raw) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::debug!(error = %e, "markup rejected at parse");
            return SanitizationResult::compose(String::new(), warnings, vec![e.to_string()]);
        }
    };

    if tree.tag != "svg" {
        errors.push(format!("root element must be <svg>, found <{}>", tree.tag));
        return SanitizationResult::compose(String::new(), warnings, errors);
    }

    // Element + attribute passes as a pure rebuild of the tree.
    let Some(rebuilt) = rebuild_element(&tree, &mut warnings) else {
        errors.push("root element was removed by sanitization".to_string());
        return SanitizationResult::compose(String::new(), warnings, errors);
    };

    // Independent enforcement sweep over the rebuilt tree. The rebuild
    // alone leaves nothing behind; a survivor here means the first pass
    // is broken, and it is removed again rather than trusted.
    let mut rebuilt = if is_clean(&rebuilt) {
        rebuilt
    } else {
        tracing::warn!("disallowed construct survived first pass, re-enforcing");
        rebuild_element(&rebuilt, &mut warnings).unwrap_or_else(|| Element::new("svg"))
    };

    validate_root(&rebuilt, &mut warnings, &mut errors);
    normalize_precision(&mut rebuilt, &mut warnings);
    stroke_width_policy(&rebuilt, &mut warnings);

    SanitizationResult::compose(rebuilt.to_markup(), warnings, errors)
}

/// Rebuild one element, returning `None` if it must be dropped.
///
/// Forbidden and unrecognized tags are removed subtree-and-all
/// (default-deny); surviving elements keep only safe attributes.
fn rebuild_element(element: &Element, warnings: &mut Vec<String>) -> Option<Element> {
    if FORBIDDEN_TAGS.contains(&element.tag.as_str()) {
        warnings.push(format!("removed forbidden element <{}>", element.tag));
        return None;
    }
    if !ALLOWED_TAGS.contains(&element.tag.as_str()) {
        warnings.push(format!("removed unrecognized element <{}>", element.tag));
        return None;
    }

    let attributes = element
        .attributes
        .iter()
        .filter(|(name, value)| {
            if EVENT_ATTR_RE.is_match(name) {
                warnings.push(format!(
                    "removed event handler attribute {name} on <{}>",
                    element.tag
                ));
                return false;
            }
            if is_external_reference(name, value) {
                warnings.push(format!(
                    "removed external reference {name} on <{}>",
                    element.tag
                ));
                return false;
            }
            true
        })
        .cloned()
        .collect();

    let children = element
        .children
        .iter()
        .filter_map(|child| rebuild_element(child, warnings))
        .collect();

    Some(Element {
        tag: element.tag.clone(),
        attributes,
        children,
    })
}

/// A reference attribute pointing at an absolute external URL.
///
/// Fragment (`#id`) and relative references are permitted.
fn is_external_reference(name: &str, value: &str) -> bool {
    REFERENCE_ATTRS.contains(&name.to_lowercase().as_str()) && value.starts_with("http")
}

/// Verify no disallowed construct survived the rebuild.
fn is_clean(element: &Element) -> bool {
    ALLOWED_TAGS.contains(&element.tag.as_str())
        && element
            .attributes
            .iter()
            .all(|(name, value)| !EVENT_ATTR_RE.is_match(name) && !is_external_reference(name, value))
        && element.children.iter().all(is_clean)
}

/// Validate required root attributes.
///
/// The namespace is load-bearing for renderers, so its absence is an
/// error; a missing `viewBox` merely degrades scaling.
fn validate_root(root: &Element, warnings: &mut Vec<String>, errors: &mut Vec<String>) {
    match root.attr("xmlns") {
        None => errors.push(format!(
            "missing required xmlns attribute ({SVG_NAMESPACE})"
        )),
        Some(ns) if ns != SVG_NAMESPACE => {
            errors.push(format!("invalid xmlns attribute: {ns}"));
        }
        Some(_) => {}
    }

    match root.attr("viewBox") {
        None => warnings.push("missing viewBox attribute".to_string()),
        Some(view_box) => {
            let fields: Vec<f64> = view_box
                .split_whitespace()
                .filter_map(|f| f.parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .collect();
            if fields.len() != 4 || view_box.split_whitespace().count() != 4 {
                errors.push(format!("malformed viewBox attribute: {view_box}"));
            }
        }
    }
}

/// Round every decimal literal with three or more fractional digits to
/// two, warning when the rounding moves the value by more than 0.001.
fn normalize_precision(element: &mut Element, warnings: &mut Vec<String>) {
    for (name, value) in &mut element.attributes {
        if !LONG_DECIMAL_RE.is_match(value) {
            continue;
        }
        let rounded = LONG_DECIMAL_RE
            .replace_all(value, |caps: &regex::Captures<'_>| {
                let original = &caps[0];
                original.parse::<f64>().map_or_else(
                    |_| original.to_string(),
                    |n| {
                        let nearest = (n * 100.0).round() / 100.0;
                        let formatted = format!("{nearest:.2}");
                        if (n - nearest).abs() > 0.001 {
                            warnings.push(format!(
                                "rounded {original} to {formatted} in {name}"
                            ));
                        }
                        formatted
                    },
                )
            })
            .into_owned();
        *value = rounded;
    }
    for child in &mut element.children {
        normalize_precision(child, warnings);
    }
}

/// Warn for every element with a stroke but no usable stroke width.
fn stroke_width_policy(element: &Element, warnings: &mut Vec<String>) {
    if let Some(stroke) = element.attr("stroke")
        && stroke != "none"
    {
        let usable = element
            .attr("stroke-width")
            .and_then(|w| w.parse::<f64>().ok())
            .is_some_and(|w| w >= 1.0);
        if !usable {
            warnings.push(format!(
                "element <{}> has a stroke but no stroke-width of at least 1",
                element.tag
            ));
        }
    }
    for child in &element.children {
        stroke_width_policy(child, warnings);
    }
}
