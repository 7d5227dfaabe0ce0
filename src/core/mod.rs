// ============================================================================
// XliffMerge - Core Module
// ============================================================================
//
// File: src/core/mod.rs
// Responsibility: merge logic module entry and exports
// Boundaries:
//   - ✅ Core submodule exports
//   - ❌ Should not contain CLI logic
//   - ❌ Should not contain UI logic
//
// ============================================================================

pub mod comparator;
pub mod extractor;
pub mod merger;
pub mod orchestrator;
pub mod resolver;
pub mod scheduler;
