// ============================================================================
// XliffMerge - Profile Data Model
// ============================================================================
//
// File: src/models/config.rs
// Responsibility: profile file data structures and their loading
// Boundaries:
//   - ✅ Profile data structures
//   - ✅ Profile serialization / deserialization (TOML, JSON, YAML)
//   - ✅ Default values
//   - ✅ Profile lookup and template generation
//   - ✅ Runtime argument overrides
//   - ❌ Should not contain parameter validation
//   - ❌ Should not contain merge logic
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::extractor::NgxTranslateExtractor;
use crate::models::error::{MergeError, MergeResult};

/// Profile names looked up in the working directory, in this order
pub const PROFILE_CANDIDATES: &[&str] = &[
    "xliffmerge.toml",
    "xliffmerge.json",
    "xliffmerge.yaml",
    "xliffmerge.yml",
    "package.json",
];

/// Profile file layout; every setting lives under `xliffmergeOptions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "xliffmergeOptions", default)]
    pub options: MergeOptions,
}

/// Settings of a merge run as written in a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeOptions {
    pub quiet: bool,
    pub verbose: bool,
    /// Language of the master catalog
    pub default_language: String,
    /// Languages to generate, the default language when empty
    pub languages: Vec<String>,
    /// Directory of the master catalog
    pub src_dir: String,
    /// Directory of the generated catalogs, `src_dir` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen_dir: Option<String>,
    pub i18n_base_file: String,
    /// Master catalog path, derived from `src_dir` and `i18n_base_file` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n_file: Option<String>,
    pub i18n_format: String,
    pub encoding: String,
    pub remove_unused_ids: bool,
    pub support_ngx_translate: bool,
    pub ngx_translate_extraction_pattern: String,
    pub use_source_as_target: bool,
    pub target_praefix: String,
    pub target_suffix: String,
    pub beautify_output: bool,
    pub preserve_order: bool,
    pub allow_id_change: bool,
    /// Languages merged at the same time, CPU count when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

/// CLI runtime arguments (override the profile)
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub profile: Option<PathBuf>,
    pub languages: Vec<String>,
    pub verbose: Option<bool>,
    pub quiet: Option<bool>,
    pub max_concurrency: Option<usize>,
}

/// Default values of the profile settings
pub trait ConfigDefaults {
    fn default_language() -> String {
        "en".to_string()
    }

    fn default_src_dir() -> String {
        ".".to_string()
    }

    fn default_i18n_base_file() -> String {
        "messages".to_string()
    }

    fn default_i18n_format() -> String {
        "xlf".to_string()
    }

    fn default_encoding() -> String {
        "UTF-8".to_string()
    }

    fn default_remove_unused_ids() -> bool {
        true
    }

    fn default_support_ngx_translate() -> bool {
        false
    }

    fn default_ngx_translate_extraction_pattern() -> String {
        NgxTranslateExtractor::DEFAULT_PATTERN.to_string()
    }

    fn default_use_source_as_target() -> bool {
        true
    }

    fn default_beautify_output() -> bool {
        false
    }

    fn default_preserve_order() -> bool {
        true
    }

    fn default_allow_id_change() -> bool {
        false
    }

    fn default_max_concurrency() -> usize {
        num_cpus::get()
    }
}

impl ConfigDefaults for MergeOptions {}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            quiet: false,
            verbose: false,
            default_language: Self::default_language(),
            languages: Vec::new(),
            src_dir: Self::default_src_dir(),
            gen_dir: None,
            i18n_base_file: Self::default_i18n_base_file(),
            i18n_file: None,
            i18n_format: Self::default_i18n_format(),
            encoding: Self::default_encoding(),
            remove_unused_ids: Self::default_remove_unused_ids(),
            support_ngx_translate: Self::default_support_ngx_translate(),
            ngx_translate_extraction_pattern: Self::default_ngx_translate_extraction_pattern(),
            use_source_as_target: Self::default_use_source_as_target(),
            target_praefix: String::new(),
            target_suffix: String::new(),
            beautify_output: Self::default_beautify_output(),
            preserve_order: Self::default_preserve_order(),
            allow_id_change: Self::default_allow_id_change(),
            max_concurrency: None,
        }
    }
}

impl MergeOptions {
    /// Apply CLI arguments on top of the profile values
    pub fn merge_runtime_args(&mut self, args: &RuntimeArgs) {
        if !args.languages.is_empty() {
            self.languages = args.languages.clone();
        }
        if let Some(verbose) = args.verbose {
            self.verbose = verbose;
        }
        if let Some(quiet) = args.quiet {
            self.quiet = quiet;
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.max_concurrency = Some(max_concurrency);
        }
    }

    /// Make relative directories and files relative to `base`
    fn resolve_paths(&mut self, base: &Path) {
        self.src_dir = resolve(base, &self.src_dir);
        self.gen_dir = self.gen_dir.as_deref().map(|dir| resolve(base, dir));
        self.i18n_file = self.i18n_file.as_deref().map(|file| resolve(base, file));
    }
}

fn resolve(base: &Path, value: &str) -> String {
    let path = Path::new(value);
    if path.is_absolute() || base.as_os_str().is_empty() {
        return value.to_string();
    }
    if value == "." {
        return base.display().to_string();
    }
    base.join(path).display().to_string()
}

/// Profile file syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileSyntax {
    Toml,
    Json,
    Yaml,
}

impl ProfileSyntax {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ProfileSyntax::Json,
            Some("yaml") | Some("yml") => ProfileSyntax::Yaml,
            _ => ProfileSyntax::Toml,
        }
    }
}

impl Profile {
    /// The profile to use: the explicit one, else the first candidate found in `dir`.
    ///
    /// `package.json` only counts when it has an `xliffmergeOptions` section.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> MergeResult<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(MergeError::config(format!(
                    "profile \"{}\" does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        for candidate in PROFILE_CANDIDATES {
            let path = dir.join(candidate);
            if !path.is_file() {
                continue;
            }
            if *candidate == "package.json" && !has_options_section(&path) {
                continue;
            }
            return Ok(Some(path));
        }
        Ok(None)
    }

    /// Read a profile; relative paths in it are resolved against its directory.
    pub fn load(path: &Path) -> MergeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MergeError::config(format!("profile \"{}\" cannot be read: {}", path.display(), e))
        })?;
        let invalid = |msg: String| {
            MergeError::config(format!("profile \"{}\" is invalid: {}", path.display(), msg))
        };
        let mut profile: Profile = match ProfileSyntax::of(path) {
            ProfileSyntax::Toml => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
            ProfileSyntax::Json => {
                serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
            ProfileSyntax::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
        };

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        profile.options.resolve_paths(base);
        Ok(profile)
    }

    /// Write the profile in the syntax matching the file extension
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = match ProfileSyntax::of(path) {
            ProfileSyntax::Toml => toml::to_string_pretty(self)?,
            ProfileSyntax::Json => serde_json::to_string_pretty(self)?,
            ProfileSyntax::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Profile written by `xliffmerge init`
    pub fn generate_default_template() -> Self {
        let mut profile = Self::default();
        profile.options.languages = vec!["en".to_string(), "de".to_string()];
        profile.options.src_dir = "src/i18n".to_string();
        profile.options.gen_dir = Some("src/i18n".to_string());
        profile
    }

    pub fn create_default_profile_file(path: &Path) -> anyhow::Result<()> {
        Self::generate_default_template().save_to_file(path)
    }
}

fn has_options_section(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
        .is_some_and(|value| value.get("xliffmergeOptions").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MergeOptions::default();
        assert_eq!(options.default_language, "en");
        assert_eq!(options.i18n_format, "xlf");
        assert!(options.remove_unused_ids);
        assert!(options.use_source_as_target);
        assert!(options.preserve_order);
        assert!(!options.allow_id_change);
        assert_eq!(options.ngx_translate_extraction_pattern, "@@|ngx-translate");
    }

    #[test]
    fn test_load_json_profile_with_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xliffmerge.json");
        std::fs::write(
            &path,
            r#"{ "xliffmergeOptions": { "srcDir": "src/i18n", "languages": ["de", "fr"], "targetPraefix": "!", "i18nFormat": "xmb" } }"#,
        )
        .unwrap();

        let profile = Profile::load(&path).unwrap();
        let options = profile.options;
        assert_eq!(options.languages, vec!["de", "fr"]);
        assert_eq!(options.target_praefix, "!");
        assert_eq!(options.i18n_format, "xmb");
        assert_eq!(PathBuf::from(&options.src_dir), dir.path().join("src/i18n"));
        assert_eq!(options.gen_dir, None);
        assert!(options.remove_unused_ids);
    }

    #[test]
    fn test_load_toml_and_yaml_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("xliffmerge.toml");
        std::fs::write(
            &toml_path,
            "[xliffmergeOptions]\ndefaultLanguage = \"de\"\nallowIdChange = true\n",
        )
        .unwrap();
        let options = Profile::load(&toml_path).unwrap().options;
        assert_eq!(options.default_language, "de");
        assert!(options.allow_id_change);

        let yaml_path = dir.path().join("xliffmerge.yaml");
        std::fs::write(&yaml_path, "xliffmergeOptions:\n  preserveOrder: false\n  maxConcurrency: 2\n")
            .unwrap();
        let options = Profile::load(&yaml_path).unwrap().options;
        assert!(!options.preserve_order);
        assert_eq!(options.max_concurrency, Some(2));
    }

    #[test]
    fn test_invalid_profile_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xliffmerge.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Profile::load(&path), Err(MergeError::Config(_))));
    }

    #[test]
    fn test_locate() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Profile::locate(None, dir.path()).unwrap(), None);

        std::fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert_eq!(Profile::locate(None, dir.path()).unwrap(), None);

        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "app", "xliffmergeOptions": {} }"#,
        )
        .unwrap();
        assert_eq!(
            Profile::locate(None, dir.path()).unwrap(),
            Some(dir.path().join("package.json"))
        );

        std::fs::write(dir.path().join("xliffmerge.yaml"), "xliffmergeOptions: {}\n").unwrap();
        assert_eq!(
            Profile::locate(None, dir.path()).unwrap(),
            Some(dir.path().join("xliffmerge.yaml"))
        );

        let missing = dir.path().join("missing.toml");
        assert!(Profile::locate(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_runtime_args_override() {
        let mut options = MergeOptions::default();
        options.languages = vec!["de".to_string()];
        options.merge_runtime_args(&RuntimeArgs {
            languages: vec!["fr".to_string()],
            verbose: Some(true),
            max_concurrency: Some(3),
            ..RuntimeArgs::default()
        });
        assert_eq!(options.languages, vec!["fr"]);
        assert!(options.verbose);
        assert!(!options.quiet);
        assert_eq!(options.max_concurrency, Some(3));
    }

    #[test]
    fn test_template_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xliffmerge.toml");
        Profile::create_default_profile_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[xliffmergeOptions]"));
        assert!(content.contains("defaultLanguage = \"en\""));
        let options = Profile::load(&path).unwrap().options;
        assert_eq!(options.languages, vec!["en", "de"]);
    }
}
