//! Style consistency check: stroke-only discipline, stroke widths, and
//! palette adherence.

use std::collections::{BTreeSet, HashSet};

use crate::document::{DesignIntent, Document};

use super::reports::CheckReport;

/// Check style consistency against the intent's stroke rules and the
/// document's declared palette.
#[tracing::instrument(skip_all)]
pub fn check_style(document: &Document, intent: &DesignIntent) -> CheckReport {
    let mut report = CheckReport::new();

    if intent.style.stroke_rules.stroke_only {
        for component in &document.components {
            if let Some(fill) = component.text("fill")
                && fill != "none"
            {
                report.issue(
                    format!(
                        "component '{}' has fill '{fill}' under stroke-only rules",
                        component.id
                    ),
                    15,
                );
            }
        }
    }

    let widths: Vec<f64> = document
        .components
        .iter()
        .filter_map(|c| c.number("stroke-width"))
        .filter(|w| w.is_finite())
        .collect();
    if let (Some(min), Some(max)) = (
        widths.iter().copied().reduce(f64::min),
        widths.iter().copied().reduce(f64::max),
    ) {
        if min < 1.0 {
            report.issue(format!("stroke-width {min} is below the minimum of 1"), 20);
        }
        if min > 0.0 && max / min > 4.0 {
            report.warn(
                format!("stroke-width spread {max}/{min} exceeds a 4:1 ratio"),
                5,
            );
        }
    }

    let palette: HashSet<&str> = document.palette.iter().map(String::as_str).collect();
    let mut unauthorized: BTreeSet<&str> = BTreeSet::new();
    for component in &document.components {
        for attribute in ["fill", "stroke"] {
            if let Some(color) = component.text(attribute)
                && color != "none"
                && !palette.contains(color)
            {
                unauthorized.insert(color);
            }
        }
    }
    for color in unauthorized {
        report.warn(format!("color '{color}' is not in the document palette"), 5);
    }

    report.clamped()
}
