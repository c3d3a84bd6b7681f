//! Core library for svg-gate.
//!
//! This crate is the generation safety and quality pipeline that sits
//! between an untrusted SVG producer (rule-based or model-based
//! generator) and any consumer (renderer, API response, export). Stage 1
//! sanitizes raw markup against an injection-resistant allow-list; stage
//! 2 scores a structured document against geometric, stylistic, and
//! technical invariants and yields an accept/reject verdict with
//! itemized diagnostics.
//!
//! # Modules
//!
//! - [`tree`] - Attributed element tree for the markup subset
//! - [`sanitize`] - Allow-list markup sanitization
//! - [`document`] - Structured document and design-intent models
//! - [`quality`] - Four-check quality gate
//! - [`pipeline`] - Driver composing both stages
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use svg_gate_core::{GateConfig, sanitize};
//!
//! let result = sanitize::sanitize(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g/></svg>"#,
//! );
//! assert!(result.is_valid);
//!
//! let config = GateConfig::default();
//! assert_eq!(config.pass_threshold, 70);
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod document;

pub mod error;

pub mod pipeline;

pub mod quality;

pub mod sanitize;

pub mod tree;

pub use config::{ConfigLoader, GateConfig, LogLevel};

pub use document::{Component, DesignIntent, Document, ElementKind};

pub use error::{ConfigError, ConfigResult, MarkupError, MarkupResult};

pub use pipeline::{PipelineReport, run_pipeline, run_pipeline_with_review};

pub use quality::{QualityReport, run_quality_gate, run_quality_gate_with_review};

pub use sanitize::{SanitizationResult, sanitize};
