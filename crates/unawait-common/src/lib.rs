//! Common types and utilities for the unawait analyzer.
//!
//! This crate provides foundational types used across all unawait crates:
//! - Source ranges (`TextRange`)
//! - Diagnostics and the rule descriptor table
//! - Position/Range types for line/column source locations (`LineMap`)
//! - Analyzer limits and thresholds

// TextRange - byte offsets into a source file
pub mod span;
pub use span::TextRange;

// Diagnostic types and message data
pub mod diagnostics;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location, Position, Range};

// Centralized limits and thresholds
pub mod limits;
