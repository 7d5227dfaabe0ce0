// ============================================================================
// XliffMerge - Models Module
// ============================================================================
//
// File: src/models/mod.rs
// Responsibility: catalog data model, profile and parameters
// Boundaries:
//   - ✅ Model submodule exports
//   - ❌ Should not contain file format parsing
//   - ❌ Should not contain merge logic
//
// ============================================================================

pub mod catalog;
pub mod config;
pub mod content;
pub mod entry;
pub mod error;
pub mod icu;
pub mod parameters;
