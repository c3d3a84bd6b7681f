//! Technical quality check: numeric sanity, per-shape attribute
//! validity, degenerate geometry, and complexity.

use crate::config::GateConfig;
use crate::document::{Component, Document, ElementKind};

use super::reports::CheckReport;

/// Total score a document can lose to excess-precision warnings.
const PRECISION_CAP: i32 = 20;

/// Per-warning deduction for excess precision.
const PRECISION_PENALTY: i32 = 5;

/// Check the technical quality of every component.
#[tracing::instrument(skip_all)]
pub fn check_technical(document: &Document, config: &GateConfig) -> CheckReport {
    let mut report = CheckReport::new();
    let mut precision_deducted = 0;

    for component in &document.components {
        // Sorted keys keep diagnostics deterministic across runs.
        let mut names: Vec<&String> = component.attributes.keys().collect();
        names.sort();

        for name in names {
            let Some(value) = component.number(name) else {
                continue;
            };
            if !value.is_finite() {
                report.issue(
                    format!(
                        "component '{}' attribute '{name}' is not a finite number",
                        component.id
                    ),
                    25,
                );
                continue;
            }
            if exceeds_precision(value, config.max_precision) {
                let penalty = PRECISION_PENALTY.min(PRECISION_CAP - precision_deducted);
                precision_deducted += penalty;
                report.warn(
                    format!(
                        "component '{}' attribute '{name}' has more than {} fractional digits",
                        component.id, config.max_precision
                    ),
                    penalty,
                );
            }
        }

        if !is_valid_shape(component) {
            report.issue(
                format!(
                    "component '{}' has missing or invalid <{}> attributes",
                    component.id, component.kind
                ),
                10,
            );
        }

        if is_degenerate(component) {
            report.warn(
                format!("component '{}' is degenerate (zero or negative size)", component.id),
                5,
            );
        }
    }

    if document.components.len() > config.complexity_warning {
        report.warn(
            format!(
                "document has {} components, above the complexity threshold of {}",
                document.components.len(),
                config.complexity_warning
            ),
            5,
        );
    }

    report.clamped()
}

/// True when the value carries more fractional digits than allowed.
fn exceeds_precision(value: f64, max_digits: usize) -> bool {
    let scaled = value * 10f64.powi(max_digits as i32);
    (scaled - scaled.round()).abs() > 1e-6
}

/// Per-shape required-attribute validity.
///
/// All referenced numeric fields must be finite; sizes must be positive.
fn is_valid_shape(component: &Component) -> bool {
    let finite = |name: &str| component.number(name).filter(|n| n.is_finite());
    match component.kind {
        ElementKind::Circle => finite("cx").is_some()
            && finite("cy").is_some()
            && finite("r").is_some_and(|r| r > 0.0),
        ElementKind::Rect => finite("x").is_some()
            && finite("y").is_some()
            && finite("width").is_some_and(|w| w > 0.0)
            && finite("height").is_some_and(|h| h > 0.0),
        ElementKind::Ellipse => finite("cx").is_some()
            && finite("cy").is_some()
            && finite("rx").is_some_and(|rx| rx > 0.0)
            && finite("ry").is_some_and(|ry| ry > 0.0),
        ElementKind::Line => {
            finite("x1").is_some()
                && finite("y1").is_some()
                && finite("x2").is_some()
                && finite("y2").is_some()
        }
        ElementKind::Polyline | ElementKind::Polygon => component
            .text("points")
            .is_some_and(|points| !points.trim().is_empty()),
        ElementKind::Path => component
            .text("d")
            .is_some_and(|data| !data.trim().is_empty()),
        ElementKind::Svg | ElementKind::G => true,
    }
}

/// Geometrically valid but zero-area/zero-length shapes.
fn is_degenerate(component: &Component) -> bool {
    let number = |name: &str| component.number(name);
    match component.kind {
        ElementKind::Circle => number("r").is_some_and(|r| r <= 0.0),
        ElementKind::Rect => {
            number("width").is_some_and(|w| w <= 0.0)
                || number("height").is_some_and(|h| h <= 0.0)
        }
        ElementKind::Ellipse => {
            number("rx").is_some_and(|rx| rx <= 0.0) || number("ry").is_some_and(|ry| ry <= 0.0)
        }
        ElementKind::Line => {
            match (number("x1"), number("y1"), number("x2"), number("y2")) {
                (Some(x1), Some(y1), Some(x2), Some(y2)) => x1 == x2 && y1 == y2,
                _ => false,
            }
        }
        ElementKind::Svg
        | ElementKind::G
        | ElementKind::Path
        | ElementKind::Polyline
        | ElementKind::Polygon => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AttrValue, Bounds, Metadata};
    use std::collections::HashMap;

    fn component(id: &str, kind: ElementKind, attrs: &[(&str, AttrValue)]) -> Component {
        Component {
            id: id.to_string(),
            category: kind.as_str().to_string(),
            kind,
            attributes: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
            metadata: Metadata::default(),
        }
    }

    fn circle(id: &str, cx: f64, cy: f64, r: f64) -> Component {
        component(
            id,
            ElementKind::Circle,
            &[
                ("cx", AttrValue::Number(cx)),
                ("cy", AttrValue::Number(cy)),
                ("r", AttrValue::Number(r)),
            ],
        )
    }

    fn doc(components: Vec<Component>) -> Document {
        Document {
            components,
            bounds: Bounds {
                width: 100.0,
                height: 100.0,
            },
            palette: Vec::new(),
        }
    }

    #[test]
    fn well_formed_circle_scores_full() {
        let report = check_technical(&doc(vec![circle("c1", 50.0, 50.0, 40.0)]), &GateConfig::default());
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn non_finite_attribute_is_an_issue() {
        let report = check_technical(
            &doc(vec![circle("c1", f64::NAN, 50.0, 40.0)]),
            &GateConfig::default(),
        );
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.contains("c1") && i.contains("cx"))
        );
    }

    #[test]
    fn excess_precision_warns_and_is_capped() {
        let components: Vec<Component> = (0..6)
            .map(|i| circle(&format!("c{i}"), 50.123_456, 50.654_321, 4.111_111))
            .collect();
        let report = check_technical(&doc(components), &GateConfig::default());
        let precision_warnings = report
            .warnings
            .iter()
            .filter(|w| w.contains("fractional digits"))
            .count();
        assert!(precision_warnings >= 4);
        // 18 occurrences, but the deduction caps at 20 points
        assert_eq!(report.score, 80);
    }

    #[test]
    fn two_fractional_digits_are_fine() {
        let report = check_technical(&doc(vec![circle("c1", 50.12, 50.5, 40.0)]), &GateConfig::default());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn invalid_rect_is_an_issue() {
        let rect = component(
            "r1",
            ElementKind::Rect,
            &[
                ("x", AttrValue::Number(1.0)),
                ("y", AttrValue::Number(1.0)),
                // width missing, height non-positive
                ("height", AttrValue::Number(0.0)),
            ],
        );
        let report = check_technical(&doc(vec![rect]), &GateConfig::default());
        assert!(report.issues.iter().any(|i| i.contains("r1")));
    }

    #[test]
    fn empty_path_data_is_an_issue() {
        let path = component("p1", ElementKind::Path, &[("d", AttrValue::Text("  ".to_string()))]);
        let report = check_technical(&doc(vec![path]), &GateConfig::default());
        assert!(report.issues.iter().any(|i| i.contains("p1")));
    }

    #[test]
    fn empty_points_is_an_issue() {
        let polygon = component("g1", ElementKind::Polygon, &[]);
        let report = check_technical(&doc(vec![polygon]), &GateConfig::default());
        assert!(report.issues.iter().any(|i| i.contains("g1")));
    }

    #[test]
    fn zero_radius_circle_is_degenerate() {
        let report = check_technical(&doc(vec![circle("c1", 50.0, 50.0, 0.0)]), &GateConfig::default());
        // r = 0 fails validity (r > 0) and is degenerate
        assert!(report.issues.iter().any(|i| i.contains("c1")));
        assert!(report.warnings.iter().any(|w| w.contains("degenerate")));
    }

    #[test]
    fn zero_length_line_is_degenerate_but_valid() {
        let line = component(
            "l1",
            ElementKind::Line,
            &[
                ("x1", AttrValue::Number(5.0)),
                ("y1", AttrValue::Number(5.0)),
                ("x2", AttrValue::Number(5.0)),
                ("y2", AttrValue::Number(5.0)),
            ],
        );
        let report = check_technical(&doc(vec![line]), &GateConfig::default());
        assert!(report.issues.is_empty());
        assert!(report.warnings.iter().any(|w| w.contains("degenerate")));
        assert_eq!(report.score, 95);
    }

    #[test]
    fn group_components_are_always_valid() {
        let group = component("g1", ElementKind::G, &[]);
        let report = check_technical(&doc(vec![group]), &GateConfig::default());
        assert!(report.issues.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn many_components_trigger_complexity_warning() {
        let components: Vec<Component> = (0..25)
            .map(|i| circle(&format!("c{i}"), 50.0, 50.0, 10.0))
            .collect();
        let report = check_technical(&doc(components), &GateConfig::default());
        assert!(report.warnings.iter().any(|w| w.contains("complexity")));
    }
}
