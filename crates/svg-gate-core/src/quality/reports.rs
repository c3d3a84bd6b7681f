//! Report structs for the quality gate.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! embedding API layer can serialize them straight into response bodies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Diagnostics produced by one check: issues fail the gate, warnings
/// degrade it, and the score starts at 100 with per-finding deductions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    /// Findings that fail the gate regardless of score.
    pub issues: Vec<String>,
    /// Findings that lower the score without blocking.
    pub warnings: Vec<String>,
    /// Check score in `[0, 100]` after clamping.
    pub score: i32,
}

impl CheckReport {
    /// A fresh report with a perfect score and no findings.
    pub const fn new() -> Self {
        Self {
            issues: Vec::new(),
            warnings: Vec::new(),
            score: 100,
        }
    }

    /// Record an issue and deduct `penalty` points.
    pub fn issue(&mut self, message: impl Into<String>, penalty: i32) {
        self.issues.push(message.into());
        self.score -= penalty;
    }

    /// Record a warning and deduct `penalty` points.
    pub fn warn(&mut self, message: impl Into<String>, penalty: i32) {
        self.warnings.push(message.into());
        self.score -= penalty;
    }

    /// Clamp the score into `[0, 100]` and return the report.
    pub fn clamped(mut self) -> Self {
        self.score = self.score.clamp(0, 100);
        self
    }
}

/// Combined verdict of the quality gate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    /// `true` when the weighted score clears the pass threshold and no
    /// check raised an issue.
    pub passed: bool,
    /// Weighted overall score in `[0, 100]`.
    pub score: i32,
    /// Issues from every check, in check order.
    pub issues: Vec<String>,
    /// Warnings from every check, in check order.
    pub warnings: Vec<String>,
    /// Structural integrity check.
    pub structural: CheckReport,
    /// Motif compliance check.
    pub motifs: CheckReport,
    /// Style consistency check.
    pub style: CheckReport,
    /// Technical quality check.
    pub technical: CheckReport,
}
