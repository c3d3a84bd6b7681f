//! Quality gate over structured documents.
//!
//! Four independent checks — structural integrity, motif compliance,
//! style consistency, technical quality — each score a document from 100
//! down, and [`run_quality_gate`] combines them into a single weighted
//! verdict. Each check is a pure function in its own module; callers can
//! also invoke checks individually.
//!
//! The gate never mutates the document and never fails for malformed
//! input: numeric invalidity, missing attributes, and degenerate shapes
//! all become issues or warnings in the report.

pub mod motif;
pub mod reports;
pub mod structural;
pub mod style;
pub mod technical;
pub mod visual;

pub use reports::{CheckReport, QualityReport};
pub use visual::{NoopReview, VisualReview, VisualReviewError};

use crate::config::GateConfig;
use crate::document::{DesignIntent, Document};

/// Weight of the structural integrity check in the overall score.
const STRUCTURAL_WEIGHT: f64 = 0.30;
/// Weight of the motif compliance check.
const MOTIF_WEIGHT: f64 = 0.25;
/// Weight of the style consistency check.
const STYLE_WEIGHT: f64 = 0.25;
/// Weight of the technical quality check.
const TECHNICAL_WEIGHT: f64 = 0.20;

/// Run all four checks and combine them into one verdict.
///
/// A document passes only when the weighted score clears
/// `config.pass_threshold` *and* no check raised an issue — a single
/// issue fails the gate regardless of score.
#[tracing::instrument(skip_all, fields(components = document.components.len()))]
pub fn run_quality_gate(
    document: &Document,
    intent: &DesignIntent,
    config: &GateConfig,
) -> QualityReport {
    let structural = structural::check_structural(document, intent, config);
    let motifs = motif::check_motifs(document, intent);
    let style = style::check_style(document, intent);
    let technical = technical::check_technical(document, config);

    let score = (STRUCTURAL_WEIGHT * f64::from(structural.score)
        + MOTIF_WEIGHT * f64::from(motifs.score)
        + STYLE_WEIGHT * f64::from(style.score)
        + TECHNICAL_WEIGHT * f64::from(technical.score))
    .round() as i32;
    let score = score.clamp(0, 100);

    let issues: Vec<String> = [&structural, &motifs, &style, &technical]
        .iter()
        .flat_map(|check| check.issues.iter().cloned())
        .collect();
    let warnings: Vec<String> = [&structural, &motifs, &style, &technical]
        .iter()
        .flat_map(|check| check.warnings.iter().cloned())
        .collect();

    let passed = score >= config.pass_threshold && issues.is_empty();
    tracing::debug!(score, passed, issues = issues.len(), "quality gate evaluated");

    QualityReport {
        passed,
        score,
        issues,
        warnings,
        structural,
        motifs,
        style,
        technical,
    }
}

/// Run the gate, then append warnings from an optional visual reviewer.
///
/// A reviewer failure (including timeout) degrades to no additional
/// warnings; the deterministic verdict is always returned.
#[tracing::instrument(skip_all)]
pub fn run_quality_gate_with_review(
    document: &Document,
    intent: &DesignIntent,
    config: &GateConfig,
    review: &dyn VisualReview,
) -> QualityReport {
    let mut report = run_quality_gate(document, intent, config);
    match review.review(document, intent) {
        Ok(extra) => report.warnings.extend(extra),
        Err(e) => {
            tracing::warn!(error = %e, "visual review failed, continuing without it");
        }
    }
    report
}
