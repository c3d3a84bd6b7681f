//! Pipeline driver composing sanitization and the quality gate.
//!
//! Ordering here is a security invariant: untrusted markup never reaches
//! the scoring logic unsanitized, and a sanitization failure is never
//! masked by a high quality score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::GateConfig;
use crate::document::{DesignIntent, Document};
use crate::quality::{self, QualityReport, VisualReview};
use crate::sanitize::{self, SanitizationResult};

/// Combined outcome of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// Sanitization stage outcome.
    pub sanitization: SanitizationResult,
    /// Quality gate outcome; absent when sanitization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

/// Run the full pipeline: sanitize, then quality-gate.
///
/// Fail-fast: when sanitization reports any error the quality gate is
/// skipped and `quality` is `None`. A quality issue does not prevent the
/// sanitized markup from being returned; it only keeps `passed` false.
#[tracing::instrument(skip_all, fields(raw_len = raw_markup.len(), components = document.components.len()))]
pub fn run_pipeline(
    raw_markup: &str,
    document: &Document,
    intent: &DesignIntent,
    config: &GateConfig,
) -> PipelineReport {
    let sanitization = sanitize::sanitize(raw_markup);
    if !sanitization.is_valid {
        tracing::debug!(errors = sanitization.errors.len(), "sanitization failed, skipping quality gate");
        return PipelineReport {
            sanitization,
            quality: None,
        };
    }

    let quality = quality::run_quality_gate(document, intent, config);
    PipelineReport {
        sanitization,
        quality: Some(quality),
    }
}

/// [`run_pipeline`] with an optional visual reviewer threaded through.
pub fn run_pipeline_with_review(
    raw_markup: &str,
    document: &Document,
    intent: &DesignIntent,
    config: &GateConfig,
    review: &dyn VisualReview,
) -> PipelineReport {
    let sanitization = sanitize::sanitize(raw_markup);
    if !sanitization.is_valid {
        return PipelineReport {
            sanitization,
            quality: None,
        };
    }

    let quality = quality::run_quality_gate_with_review(document, intent, config, review);
    PipelineReport {
        sanitization,
        quality: Some(quality),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AttrValue, Bounds, Component, ElementKind, Metadata};
    use std::collections::HashMap;

    const CLEAN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><circle cx="50" cy="50" r="40"/></svg>"#;

    fn simple_doc() -> Document {
        let mut attributes = HashMap::new();
        attributes.insert("cx".to_string(), AttrValue::Number(50.0));
        attributes.insert("cy".to_string(), AttrValue::Number(50.0));
        attributes.insert("r".to_string(), AttrValue::Number(40.0));
        Document {
            components: vec![Component {
                id: "c1".to_string(),
                category: "circle".to_string(),
                kind: ElementKind::Circle,
                attributes,
                metadata: Metadata::default(),
            }],
            bounds: Bounds {
                width: 100.0,
                height: 100.0,
            },
            palette: Vec::new(),
        }
    }

    #[test]
    fn valid_input_runs_both_stages() {
        let report = run_pipeline(
            CLEAN,
            &simple_doc(),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.sanitization.is_valid);
        let quality = report.quality.expect("quality gate should run");
        assert!(quality.passed);
        assert_eq!(quality.score, 100);
    }

    #[test]
    fn sanitization_failure_short_circuits() {
        let report = run_pipeline(
            "",
            &simple_doc(),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(!report.sanitization.is_valid);
        assert!(report.quality.is_none());
    }

    #[test]
    fn quality_issue_still_returns_sanitized_markup() {
        let mut document = simple_doc();
        document.components[0]
            .attributes
            .insert("r".to_string(), AttrValue::Number(400.0));
        let report = run_pipeline(
            CLEAN,
            &document,
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        assert!(report.sanitization.is_valid);
        assert!(!report.sanitization.sanitized_markup.is_empty());
        assert!(!report.quality.expect("gate ran").passed);
    }

    #[test]
    fn report_omits_quality_in_json_when_absent() {
        let report = run_pipeline(
            "<svg",
            &simple_doc(),
            &DesignIntent::default(),
            &GateConfig::default(),
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("\"quality\""));
        assert!(json.contains("\"sanitization\""));
    }
}
