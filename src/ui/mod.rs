// ============================================================================
// XliffMerge - UI Module
// ============================================================================

pub mod summary;
