// ============================================================================
// XliffMerge - Utilities Module
// ============================================================================

pub mod constants;
pub mod logger;
