//! Structural integrity check: component budget, canvas bounds, and
//! per-shape containment.

use crate::config::GateConfig;
use crate::document::{Bounds, Component, DesignIntent, Document, ElementKind};

use super::reports::CheckReport;

/// Check structural integrity of a document against the intent's budget.
#[tracing::instrument(skip_all)]
pub fn check_structural(
    document: &Document,
    intent: &DesignIntent,
    config: &GateConfig,
) -> CheckReport {
    let mut report = CheckReport::new();

    if document.components.len() > intent.constraints.max_elements {
        report.issue(
            format!(
                "component count {} exceeds the maximum of {}",
                document.components.len(),
                intent.constraints.max_elements
            ),
            30,
        );
    }

    if document.components.is_empty() {
        // Terminal for this check: there is nothing left to assess.
        report.issue("document has no components", 0);
        report.score = 0;
        return report;
    }

    let Bounds { width, height } = document.bounds;
    if width <= 0.0 || height <= 0.0 {
        report.issue(
            format!("canvas bounds must be positive, got {width}x{height}"),
            20,
        );
    }
    if width < config.min_canvas || height < config.min_canvas {
        report.warn(
            format!("canvas {width}x{height} is too small to render meaningfully"),
            5,
        );
    }
    if width > config.max_canvas || height > config.max_canvas {
        report.warn(format!("canvas {width}x{height} is excessive"), 5);
    }

    let out_of_bounds = document
        .components
        .iter()
        .filter(|c| is_out_of_bounds(c, document.bounds))
        .count();
    if out_of_bounds > 0 {
        let fraction = out_of_bounds as f64 / document.components.len() as f64;
        if fraction > config.out_of_bounds_issue_fraction {
            report.issue(
                format!("{out_of_bounds} of {} components extend outside the canvas", document.components.len()),
                25,
            );
        } else {
            report.warn(
                format!("{out_of_bounds} of {} components extend outside the canvas", document.components.len()),
                10,
            );
        }
    }

    report.clamped()
}

/// Whether a component's geometry escapes the canvas.
///
/// A missing or non-finite coordinate counts as out of bounds; kinds with
/// no cheap containment test pass unchecked.
fn is_out_of_bounds(component: &Component, bounds: Bounds) -> bool {
    let w = bounds.width;
    let h = bounds.height;
    match component.kind {
        ElementKind::Circle => match (finite(component, "cx"), finite(component, "cy"), finite(component, "r")) {
            (Some(cx), Some(cy), Some(r)) => {
                cx - r < 0.0 || cx + r > w || cy - r < 0.0 || cy + r > h
            }
            _ => true,
        },
        ElementKind::Rect => match (
            finite(component, "x"),
            finite(component, "y"),
            finite(component, "width"),
            finite(component, "height"),
        ) {
            (Some(x), Some(y), Some(cw), Some(ch)) => {
                x < 0.0 || y < 0.0 || x + cw > w || y + ch > h
            }
            _ => true,
        },
        ElementKind::Ellipse => match (
            finite(component, "cx"),
            finite(component, "cy"),
            finite(component, "rx"),
            finite(component, "ry"),
        ) {
            (Some(cx), Some(cy), Some(rx), Some(ry)) => {
                cx - rx < 0.0 || cx + rx > w || cy - ry < 0.0 || cy + ry > h
            }
            _ => true,
        },
        // No cheap containment test for these kinds.
        ElementKind::Svg
        | ElementKind::G
        | ElementKind::Path
        | ElementKind::Line
        | ElementKind::Polyline
        | ElementKind::Polygon => false,
    }
}

fn finite(component: &Component, name: &str) -> Option<f64> {
    component.number(name).filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AttrValue, DesignIntent, Metadata};
    use std::collections::HashMap;

    fn circle(id: &str, cx: f64, cy: f64, r: f64) -> Component {
        let mut attributes = HashMap::new();
        attributes.insert("cx".to_string(), AttrValue::Number(cx));
        attributes.insert("cy".to_string(), AttrValue::Number(cy));
        attributes.insert("r".to_string(), AttrValue::Number(r));
        Component {
            id: id.to_string(),
            category: "circle".to_string(),
            kind: ElementKind::Circle,
            attributes,
            metadata: Metadata::default(),
        }
    }

    fn doc(components: Vec<Component>, width: f64, height: f64) -> Document {
        Document {
            components,
            bounds: Bounds { width, height },
            palette: Vec::new(),
        }
    }

    #[test]
    fn in_bounds_document_scores_full() {
        let report = check_structural(
            &doc(vec![circle("c1", 50.0, 50.0, 40.0)], 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn empty_document_scores_zero() {
        let report = check_structural(
            &doc(Vec::new(), 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert_eq!(report.score, 0);
        assert!(!report.issues.is_empty());
    }

    #[test]
    fn too_many_components_is_an_issue() {
        let components: Vec<Component> = (0..25)
            .map(|i| circle(&format!("c{i}"), 50.0, 50.0, 1.0))
            .collect();
        let mut intent = DesignIntent::default();
        intent.constraints.max_elements = 10;
        let report = check_structural(&doc(components, 100.0, 100.0), &intent, &GateConfig::default());
        assert!(report.issues.iter().any(|i| i.contains("exceeds")));
        assert_eq!(report.score, 70);
    }

    #[test]
    fn non_positive_bounds_is_an_issue() {
        let report = check_structural(
            &doc(vec![circle("c1", 1.0, 1.0, 0.5)], 0.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.iter().any(|i| i.contains("positive")));
    }

    #[test]
    fn tiny_canvas_warns() {
        let report = check_structural(
            &doc(vec![circle("c1", 5.0, 5.0, 2.0)], 10.0, 10.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.warnings.iter().any(|w| w.contains("too small")));
    }

    #[test]
    fn oversized_canvas_warns() {
        let report = check_structural(
            &doc(vec![circle("c1", 50.0, 50.0, 10.0)], 4096.0, 4096.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.warnings.iter().any(|w| w.contains("excessive")));
    }

    #[test]
    fn overflowing_circle_is_out_of_bounds() {
        // One of one components out: fraction 1.0 > 0.5 escalates to issue
        let report = check_structural(
            &doc(vec![circle("c1", 50.0, 50.0, 400.0)], 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.iter().any(|i| i.contains("outside")));
        assert_eq!(report.score, 75);
    }

    #[test]
    fn minority_out_of_bounds_only_warns() {
        let components = vec![
            circle("c1", 50.0, 50.0, 40.0),
            circle("c2", 50.0, 50.0, 40.0),
            circle("c3", 50.0, 50.0, 40.0),
            circle("c4", 50.0, 50.0, 400.0),
        ];
        let report = check_structural(
            &doc(components, 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.is_empty());
        assert!(report.warnings.iter().any(|w| w.contains("outside")));
        assert_eq!(report.score, 90);
    }

    #[test]
    fn missing_coordinate_counts_as_out_of_bounds() {
        let mut component = circle("c1", 50.0, 50.0, 10.0);
        component.attributes.remove("cx");
        let report = check_structural(
            &doc(vec![component], 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.iter().any(|i| i.contains("outside")));
    }

    #[test]
    fn non_finite_coordinate_counts_as_out_of_bounds() {
        let report = check_structural(
            &doc(vec![circle("c1", f64::NAN, 50.0, 10.0)], 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.iter().any(|i| i.contains("outside")));
    }

    #[test]
    fn paths_are_not_bounds_checked() {
        let mut attributes = HashMap::new();
        attributes.insert(
            "d".to_string(),
            AttrValue::Text("M -500 -500 L 900 900".to_string()),
        );
        let component = Component {
            id: "p1".to_string(),
            category: "path".to_string(),
            kind: ElementKind::Path,
            attributes,
            metadata: Metadata::default(),
        };
        let report = check_structural(
            &doc(vec![component], 100.0, 100.0),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.issues.is_empty());
        assert_eq!(report.score, 100);
    }
}
