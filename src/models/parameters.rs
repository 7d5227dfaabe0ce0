// ============================================================================
// XliffMerge - Merge Parameters
// ============================================================================
//
// File: src/models/parameters.rs
// Responsibility: validated, fully resolved settings of one merge run
// Boundaries:
//   - ✅ Profile lookup and runtime argument application
//   - ✅ Derived paths (master file, generated files)
//   - ✅ Validation with collected errors and warnings
//   - ✅ Per language merge policy
//   - ❌ Should not contain merge logic
//   - ❌ Should not contain file format handling
//
// ============================================================================

use encoding_rs::Encoding;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::core::extractor::NgxTranslateExtractor;
use crate::core::merger::MergePolicy;
use crate::models::catalog::CatalogFormat;
use crate::models::config::{ConfigDefaults, MergeOptions, Profile, RuntimeArgs};
use crate::models::error::MergeError;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// BCP 47 like language code, `_` accepted as separator
const LANGUAGE_SYNTAX: &str = r"^[a-zA-Z]{1,8}([-_][a-zA-Z0-9]{1,8})*$";

/// Everything a merge run needs, resolved from profile and command line
#[derive(Debug, Clone)]
pub struct MergeParameters {
    pub profile_path: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub default_language: String,
    pub languages: Vec<String>,
    pub src_dir: PathBuf,
    pub gen_dir: PathBuf,
    pub i18n_base_file: String,
    pub i18n_file: PathBuf,
    pub i18n_format: CatalogFormat,
    pub encoding: &'static Encoding,
    pub remove_unused_ids: bool,
    pub support_ngx_translate: bool,
    pub ngx_translate_extraction_pattern: String,
    pub use_source_as_target: bool,
    pub target_praefix: String,
    pub target_suffix: String,
    pub beautify_output: bool,
    pub preserve_order: bool,
    pub allow_id_change: bool,
    pub max_concurrency: usize,
    /// Problems that prevent the run
    pub errors_found: Vec<MergeError>,
    /// Problems worth reporting that do not prevent the run
    pub warnings_found: Vec<String>,
}

impl MergeParameters {
    /// Parameters for a run started in the current working directory
    pub fn from_runtime_args(args: &RuntimeArgs) -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_runtime_args_in(args, &dir)
    }

    /// Parameters for a run started in `dir`
    pub fn from_runtime_args_in(args: &RuntimeArgs, dir: &Path) -> Self {
        let profile = Profile::locate(args.profile.as_deref(), dir).and_then(|path| match path {
            Some(path) => Profile::load(&path).map(|profile| (Some(path), profile)),
            None => Ok((None, Profile::default())),
        });

        match profile {
            Ok((profile_path, profile)) => {
                let mut options = profile.options;
                options.merge_runtime_args(args);
                Self::from_options(options, profile_path)
            }
            Err(err) => {
                let mut options = MergeOptions::default();
                options.merge_runtime_args(args);
                let mut parameters = Self::from_options(options, None);
                parameters.errors_found.insert(0, err);
                parameters
            }
        }
    }

    /// Resolve and validate profile options
    pub fn from_options(options: MergeOptions, profile_path: Option<PathBuf>) -> Self {
        let mut errors_found = Vec::new();
        let mut warnings_found = Vec::new();

        let i18n_format = CatalogFormat::from_str(&options.i18n_format).unwrap_or_else(|e| {
            errors_found.push(MergeError::config(e));
            CatalogFormat::default()
        });

        let encoding = Encoding::for_label(options.encoding.trim().as_bytes()).unwrap_or_else(|| {
            errors_found.push(MergeError::config(format!(
                "encoding \"{}\" is not supported",
                options.encoding
            )));
            encoding_rs::UTF_8
        });

        let src_dir = PathBuf::from(&options.src_dir);
        let gen_dir = options
            .gen_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| src_dir.clone());
        let i18n_file = options.i18n_file.as_ref().map(PathBuf::from).unwrap_or_else(|| {
            src_dir.join(format!(
                "{}.{}",
                options.i18n_base_file,
                i18n_format.file_extension()
            ))
        });

        let mut languages = options.languages.clone();
        if languages.is_empty() {
            warnings_found.push(format!(
                "no languages configured, using defaultLanguage \"{}\"",
                options.default_language
            ));
            languages.push(options.default_language.clone());
        }

        match Regex::new(LANGUAGE_SYNTAX) {
            Ok(syntax) => {
                if !syntax.is_match(&options.default_language) {
                    errors_found.push(MergeError::config(format!(
                        "defaultLanguage \"{}\" is not a valid language code",
                        options.default_language
                    )));
                }
                for language in languages.iter().filter(|l| !syntax.is_match(l)) {
                    errors_found.push(MergeError::config(format!(
                        "language \"{}\" is not a valid language code",
                        language
                    )));
                }
            }
            Err(e) => errors_found.push(MergeError::unexpected(e.to_string())),
        }

        if !i18n_file.is_file() {
            errors_found.push(MergeError::config(format!(
                "i18nFile \"{}\" is not readable",
                i18n_file.display()
            )));
        }
        if !gen_dir.is_dir() {
            errors_found.push(MergeError::config(format!(
                "genDir \"{}\" is not a directory",
                gen_dir.display()
            )));
        }

        if options.support_ngx_translate {
            if let Err(e) = NgxTranslateExtractor::check_pattern(&options.ngx_translate_extraction_pattern) {
                errors_found.push(MergeError::config(e));
            }
        }

        let max_concurrency = match options.max_concurrency {
            Some(0) => {
                warnings_found.push("maxConcurrency 0 is not possible, using 1".to_string());
                1
            }
            Some(n) => n,
            None => MergeOptions::default_max_concurrency(),
        };

        Self {
            profile_path,
            quiet: options.quiet,
            verbose: options.verbose,
            default_language: options.default_language,
            languages,
            src_dir,
            gen_dir,
            i18n_base_file: options.i18n_base_file,
            i18n_file,
            i18n_format,
            encoding,
            remove_unused_ids: options.remove_unused_ids,
            support_ngx_translate: options.support_ngx_translate,
            ngx_translate_extraction_pattern: options.ngx_translate_extraction_pattern,
            use_source_as_target: options.use_source_as_target,
            target_praefix: options.target_praefix,
            target_suffix: options.target_suffix,
            beautify_output: options.beautify_output,
            preserve_order: options.preserve_order,
            allow_id_change: options.allow_id_change,
            max_concurrency,
            errors_found,
            warnings_found,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors_found.is_empty()
    }

    pub fn is_default_language(&self, language: &str) -> bool {
        language == self.default_language
    }

    /// Format of the generated language files
    pub fn translation_format(&self) -> CatalogFormat {
        self.i18n_format.translation_format()
    }

    /// `<genDir>/<base>.<lang>.<xlf|xtb>`
    pub fn generated_i18n_file(&self, language: &str) -> PathBuf {
        self.gen_dir.join(format!(
            "{}.{}.{}",
            self.i18n_base_file,
            language,
            self.translation_format().file_extension()
        ))
    }

    /// `<genDir>/<base>.<lang>.json`
    pub fn generated_ngx_translate_file(&self, language: &str) -> PathBuf {
        self.gen_dir
            .join(format!("{}.{}.json", self.i18n_base_file, language))
    }

    pub fn merge_policy(&self, language: &str) -> MergePolicy {
        MergePolicy {
            is_default_language: self.is_default_language(language),
            use_source_as_target: self.use_source_as_target,
            allow_id_change: self.allow_id_change,
            remove_unused_ids: self.remove_unused_ids,
            preserve_order: self.preserve_order,
            target_prefix: self.target_praefix.clone(),
            target_suffix: self.target_suffix.clone(),
        }
    }

    /// Log every effective value (verbose mode)
    pub fn show_all_parameters(&self) {
        Logger::debug(t!("parameters.header"));
        let profile = self
            .profile_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| t!("parameters.no_profile"));
        let values: Vec<(&str, String)> = vec![
            ("profile", profile),
            ("defaultLanguage", self.default_language.clone()),
            ("languages", self.languages.join(", ")),
            ("srcDir", self.src_dir.display().to_string()),
            ("genDir", self.gen_dir.display().to_string()),
            ("i18nBaseFile", self.i18n_base_file.clone()),
            ("i18nFile", self.i18n_file.display().to_string()),
            ("i18nFormat", self.i18n_format.to_string()),
            ("encoding", self.encoding.name().to_string()),
            ("removeUnusedIds", self.remove_unused_ids.to_string()),
            ("supportNgxTranslate", self.support_ngx_translate.to_string()),
            ("ngxTranslateExtractionPattern", self.ngx_translate_extraction_pattern.clone()),
            ("useSourceAsTarget", self.use_source_as_target.to_string()),
            ("targetPraefix", self.target_praefix.clone()),
            ("targetSuffix", self.target_suffix.clone()),
            ("beautifyOutput", self.beautify_output.to_string()),
            ("preserveOrder", self.preserve_order.to_string()),
            ("allowIdChange", self.allow_id_change.to_string()),
            ("maxConcurrency", self.max_concurrency.to_string()),
        ];
        for (name, value) in values {
            Logger::debug(tf!("parameters.value", name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), "<xliff version=\"1.2\"/>").unwrap();
        dir
    }

    fn options_in(dir: &Path) -> MergeOptions {
        MergeOptions {
            src_dir: dir.display().to_string(),
            languages: vec!["en".into(), "de".into()],
            ..MergeOptions::default()
        }
    }

    #[test]
    fn test_derived_paths() {
        let dir = workspace();
        let parameters = MergeParameters::from_options(options_in(dir.path()), None);
        assert!(!parameters.has_errors(), "{:?}", parameters.errors_found);
        assert_eq!(parameters.i18n_file, dir.path().join("messages.xlf"));
        assert_eq!(parameters.gen_dir, dir.path().to_path_buf());
        assert_eq!(parameters.generated_i18n_file("de"), dir.path().join("messages.de.xlf"));
        assert_eq!(
            parameters.generated_ngx_translate_file("de"),
            dir.path().join("messages.de.json")
        );
    }

    #[test]
    fn test_xmb_generates_xtb() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xmb"), "<messagebundle/>").unwrap();
        let options = MergeOptions {
            i18n_format: "xmb".into(),
            ..options_in(dir.path())
        };
        let parameters = MergeParameters::from_options(options, None);
        assert!(!parameters.has_errors(), "{:?}", parameters.errors_found);
        assert_eq!(parameters.generated_i18n_file("de"), dir.path().join("messages.de.xtb"));
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let dir = workspace();
        let options = MergeOptions {
            i18n_format: "po".into(),
            encoding: "klingon".into(),
            languages: vec!["de".into(), "not a language".into()],
            gen_dir: Some(dir.path().join("missing").display().to_string()),
            support_ngx_translate: true,
            ngx_translate_extraction_pattern: "@@|".into(),
            ..options_in(dir.path())
        };
        let parameters = MergeParameters::from_options(options, None);
        let messages: Vec<String> = parameters.errors_found.iter().map(|e| e.to_string()).collect();
        assert!(messages.iter().any(|m| m.contains("i18nFormat")));
        assert!(messages.iter().any(|m| m.contains("klingon")));
        assert!(messages.iter().any(|m| m.contains("not a language")));
        assert!(messages.iter().any(|m| m.contains("genDir")));
        assert!(messages.iter().any(|m| m.contains("extraction pattern")));
        assert!(parameters.errors_found.iter().all(MergeError::is_classified));
    }

    #[test]
    fn test_missing_master_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let parameters = MergeParameters::from_options(options_in(dir.path()), None);
        assert!(parameters
            .errors_found
            .iter()
            .any(|e| e.to_string().contains("i18nFile")));
    }

    #[test]
    fn test_empty_languages_use_default_language() {
        let dir = workspace();
        let options = MergeOptions {
            languages: Vec::new(),
            ..options_in(dir.path())
        };
        let parameters = MergeParameters::from_options(options, None);
        assert_eq!(parameters.languages, vec!["en"]);
        assert_eq!(parameters.warnings_found.len(), 1);
    }

    #[test]
    fn test_zero_concurrency_becomes_one() {
        let dir = workspace();
        let options = MergeOptions {
            max_concurrency: Some(0),
            ..options_in(dir.path())
        };
        let parameters = MergeParameters::from_options(options, None);
        assert_eq!(parameters.max_concurrency, 1);
        assert!(!parameters.warnings_found.is_empty());
    }

    #[test]
    fn test_merge_policy_per_language() {
        let dir = workspace();
        let options = MergeOptions {
            target_praefix: "[".into(),
            allow_id_change: true,
            ..options_in(dir.path())
        };
        let parameters = MergeParameters::from_options(options, None);
        assert!(parameters.merge_policy("en").is_default_language);
        let de = parameters.merge_policy("de");
        assert!(!de.is_default_language);
        assert!(de.allow_id_change);
        assert_eq!(de.target_prefix, "[");
    }

    #[test]
    fn test_profile_in_working_directory() {
        let dir = workspace();
        std::fs::write(
            dir.path().join("xliffmerge.json"),
            r#"{ "xliffmergeOptions": { "languages": ["de"], "verbose": true } }"#,
        )
        .unwrap();
        let args = RuntimeArgs {
            languages: vec!["fr".into()],
            ..RuntimeArgs::default()
        };
        let parameters = MergeParameters::from_runtime_args_in(&args, dir.path());
        assert!(!parameters.has_errors(), "{:?}", parameters.errors_found);
        assert_eq!(parameters.profile_path, Some(dir.path().join("xliffmerge.json")));
        assert_eq!(parameters.languages, vec!["fr"]);
        assert!(parameters.verbose);
        assert_eq!(parameters.i18n_file, dir.path().join("messages.xlf"));
    }

    #[test]
    fn test_broken_profile_is_reported() {
        let dir = workspace();
        let args = RuntimeArgs {
            profile: Some(dir.path().join("nope.json")),
            ..RuntimeArgs::default()
        };
        let parameters = MergeParameters::from_runtime_args_in(&args, dir.path());
        assert!(parameters.errors_found[0].to_string().contains("nope.json"));
    }
}
