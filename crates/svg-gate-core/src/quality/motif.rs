//! Motif compliance check: required motifs, distribution balance, and
//! vocabulary drift.

use std::collections::{BTreeMap, HashSet};

use crate::document::{DesignIntent, Document};

use super::reports::CheckReport;

/// Check motif compliance against the intent's motif vocabulary.
///
/// An unexpected motif only warns: the gate's job is to catch generator
/// drift, not to constrain the generator's vocabulary.
#[tracing::instrument(skip_all)]
pub fn check_motifs(document: &Document, intent: &DesignIntent) -> CheckReport {
    let mut report = CheckReport::new();

    // BTreeMap keeps the diagnostics deterministically ordered.
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for component in &document.components {
        if let Some(motif) = component.metadata.motif.as_deref() {
            *counts.entry(motif).or_insert(0) += 1;
        }
    }

    for required in &intent.constraints.required_motifs {
        if !counts.contains_key(required.as_str()) {
            report.issue(format!("required motif '{required}' is missing"), 20);
        }
    }

    if counts.len() > 1 {
        let max = counts.values().copied().max().unwrap_or(0);
        let min = counts.values().copied().min().unwrap_or(0);
        if min > 0 && max as f64 / min as f64 > 3.0 {
            report.warn(
                format!("motif distribution is imbalanced ({max} vs {min} components)"),
                10,
            );
        }
    }

    let allowed: HashSet<&str> = intent
        .constraints
        .required_motifs
        .iter()
        .chain(intent.motifs.iter())
        .map(String::as_str)
        .collect();
    for motif in counts.keys() {
        if !allowed.contains(motif) {
            report.warn(format!("unexpected motif '{motif}'"), 5);
        }
    }

    report.clamped()
}
