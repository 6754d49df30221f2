//! Common types and utilities for the kdecl declaration translator.
//!
//! This crate provides foundational types used across all kdecl crates:
//! - Dotted qualified names (`QualifiedName`)
//! - Centralized limits and thresholds
//! - Cycle detection for recursive walks (`RecursionGuard`)
//! - The lowering error taxonomy (`LoweringError`)

// Fully qualified declaration names
pub mod name;
pub use name::QualifiedName;

// Centralized limits and thresholds
pub mod limits;

// Cycle detection and depth limiting
pub mod recursion;
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};

// Error taxonomy shared by both lowering passes
pub mod diagnostics;
pub use diagnostics::LoweringError;
