// ============================================================================
// XliffMerge - Constants
// ============================================================================
//
// File: src/utils/constants.rs
// Responsibility: application constants
// Boundaries:
//   - ✅ Application version
//   - ✅ Summary icons
//   - ❌ Should not contain dynamic configuration
//   - ❌ Should not contain business logic
//
// ============================================================================

/// Version shown in the banner, taken from package.json at build time
pub const VERSION: &str = env!("PACKAGE_VERSION");

/// Summary icons
pub mod icons {
    /// Catalog created
    pub const CREATED: &str = "●";
    /// Catalog updated
    pub const UPDATED: &str = "▲";
    /// Nothing to do
    pub const UP_TO_DATE: &str = "✓";
    /// Language failed
    pub const ERROR: &str = "✗";
    /// Summary header
    pub const SUMMARY: &str = "◈";
    pub const ARROW: &str = "→";
}
