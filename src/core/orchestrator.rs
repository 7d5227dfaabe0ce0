// ============================================================================
// XliffMerge - Run Orchestrator
// ============================================================================
//
// File: src/core/orchestrator.rs
// Responsibility: one complete merge run over all configured languages
// Boundaries:
//   - ✅ Parameter error and warning reporting
//   - ✅ Master catalog loading and source language correction
//   - ✅ Concurrent per-language processing
//   - ✅ Status aggregation and error classification
//   - ❌ Should not contain merge rules
//   - ❌ Should not contain file format details
//   - ❌ Should not contain summary rendering
//
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::extractor::NgxTranslateExtractor;
use crate::core::merger::{create_catalog_for_language, MergeEngine, MergeReport};
use crate::core::scheduler::{AsyncTaskScheduler, SchedulerConfig, TaskResult};
use crate::formats;
use crate::models::catalog::Catalog;
use crate::models::error::{MergeError, MergeResult};
use crate::models::parameters::MergeParameters;
use crate::utils::constants::VERSION;
use crate::utils::logger::Logger;
use crate::tf;

/// What happened to a language file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageAction {
    Created,
    Updated,
    UpToDate,
    Failed,
}

/// Result of processing one language
#[derive(Debug, Clone)]
pub struct LanguageOutcome {
    pub language: String,
    pub file: PathBuf,
    pub action: LanguageAction,
    pub report: MergeReport,
    /// 0 on success, -1 on a reported failure
    pub status: i32,
}

impl LanguageOutcome {
    fn failed(language: &str, file: PathBuf) -> Self {
        Self {
            language: language.to_string(),
            file,
            action: LanguageAction::Failed,
            report: MergeReport::default(),
            status: -1,
        }
    }
}

/// Result of a complete run
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// First nonzero language status, 0 when everything worked
    pub status: i32,
    /// Languages in configured order
    pub languages: Vec<LanguageOutcome>,
}

impl RunOutcome {
    fn aborted() -> Self {
        Self {
            status: -1,
            languages: Vec::new(),
        }
    }
}

/// Merges the master catalog into every configured language file
pub struct XliffMerge {
    parameters: Arc<MergeParameters>,
}

impl XliffMerge {
    pub fn new(parameters: MergeParameters) -> Self {
        Self {
            parameters: Arc::new(parameters),
        }
    }

    /// Run the merge.
    ///
    /// Reported failures end up in the status; `Err` is returned only for
    /// errors nobody knows how to handle, after every language finished.
    pub async fn run(&self) -> MergeResult<RunOutcome> {
        let parameters = &self.parameters;
        Logger::info(tf!("merge.version", VERSION));
        if parameters.verbose {
            parameters.show_all_parameters();
        }

        if parameters.has_errors() {
            for err in &parameters.errors_found {
                Logger::error(err.to_string());
            }
            return Ok(RunOutcome::aborted());
        }
        for warning in &parameters.warnings_found {
            Logger::warn(warning);
        }

        let master = match Self::read_master(parameters) {
            Ok(master) => Arc::new(master),
            Err(err) => {
                if err.is_classified() {
                    Logger::error(err.to_string());
                } else {
                    Logger::error(tf!("merge.oops", parameters.i18n_file.display(), err));
                }
                return Ok(RunOutcome::aborted());
            }
        };

        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: parameters.max_concurrency,
            verbose: parameters.verbose,
        });
        let tasks: Vec<_> = parameters
            .languages
            .iter()
            .map(|language| {
                let parameters = Arc::clone(&self.parameters);
                let master = Arc::clone(&master);
                let language = language.clone();
                let file = parameters.generated_i18n_file(&language);
                (language.clone(), async move {
                    // Catalog I/O is blocking, keep it off the async workers
                    tokio::task::spawn_blocking(move || {
                        Self::process_language(&parameters, &master, &language)
                    })
                    .await
                    .unwrap_or_else(|e| Err(MergeError::unexpected(e.to_string()).in_file(&file)))
                })
            })
            .collect();
        let results = scheduler.execute_batch(tasks).await;

        let mut outcome = RunOutcome::default();
        let mut unexpected: Option<MergeError> = None;
        for (language, result) in results {
            let language_outcome = match result {
                TaskResult::Success(language_outcome) => language_outcome,
                TaskResult::Failed(err) => {
                    unexpected.get_or_insert(err);
                    LanguageOutcome::failed(&language, parameters.generated_i18n_file(&language))
                }
                TaskResult::Panicked(msg) => {
                    let file = parameters.generated_i18n_file(&language);
                    unexpected.get_or_insert(MergeError::unexpected(msg).in_file(&file));
                    LanguageOutcome::failed(&language, file)
                }
            };
            if outcome.status == 0 {
                outcome.status = language_outcome.status;
            }
            outcome.languages.push(language_outcome);
        }

        match unexpected {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }

    /// Load the master and fix its declared source language.
    fn read_master(parameters: &MergeParameters) -> MergeResult<Catalog> {
        let mut master = formats::load(
            parameters.i18n_format,
            &parameters.i18n_file,
            parameters.encoding,
            None,
        )?;

        for warning in master.warnings() {
            Logger::warn(warning);
        }
        Logger::info(tf!("merge.master_count", master.len()));
        if master.missing_id_count() > 0 {
            Logger::warn(tf!(
                "merge.missing_ids",
                master.len(),
                master.missing_id_count()
            ));
        }

        let declared = master.source_language().map(str::to_string);
        if let Some(declared) = declared {
            if declared != parameters.default_language {
                Logger::warn(tf!(
                    "merge.source_language_mismatch",
                    &declared,
                    &parameters.default_language
                ));
                master.set_source_language(Some(parameters.default_language.as_str()));
                formats::save(&master, parameters.beautify_output)?;
                Logger::warn(tf!(
                    "merge.source_language_changed",
                    &declared,
                    &parameters.default_language
                ));
            }
        }

        Ok(master)
    }

    /// Process one language, turning reported failures into status -1.
    fn process_language(
        parameters: &MergeParameters,
        master: &Catalog,
        language: &str,
    ) -> MergeResult<LanguageOutcome> {
        Logger::debug(tf!("merge.processing_language", language));
        let file = parameters.generated_i18n_file(language);

        match Self::merge_language(parameters, master, language, &file) {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.is_classified() => {
                Logger::error(err.to_string());
                Ok(LanguageOutcome::failed(language, file))
            }
            Err(err) => {
                Logger::error(tf!("merge.oops", file.display(), &err));
                Err(err.in_file(&file))
            }
        }
    }

    fn merge_language(
        parameters: &MergeParameters,
        master: &Catalog,
        language: &str,
        file: &Path,
    ) -> MergeResult<LanguageOutcome> {
        let policy = parameters.merge_policy(language);

        let (action, report) = if !file.exists() {
            let catalog = create_catalog_for_language(master, language, file, &policy)?;
            formats::save(&catalog, parameters.beautify_output)?;
            Logger::info(tf!("merge.created_file", file.display(), language));
            if !policy.is_default_language {
                Logger::warn(tf!("merge.please_translate", file.display(), language));
            }
            let report = MergeReport {
                new: catalog.len(),
                ..MergeReport::default()
            };
            (LanguageAction::Created, report)
        } else {
            let mut catalog = formats::load(
                parameters.translation_format(),
                file,
                parameters.encoding,
                Some(parameters.i18n_file.as_path()),
            )?;
            for warning in catalog.warnings() {
                Logger::warn(warning);
            }

            let report = MergeEngine::new(master, &policy).reconcile(&mut catalog)?;
            Self::log_report(&report, language, parameters.remove_unused_ids);

            if report.is_noop() {
                Logger::info(tf!("merge.up_to_date", language));
                (LanguageAction::UpToDate, report)
            } else {
                formats::save(&catalog, parameters.beautify_output)?;
                Logger::info(tf!("merge.updated_file", file.display(), language));
                if report.new > 0 && !policy.is_default_language {
                    Logger::warn(tf!("merge.please_translate", file.display(), language));
                }
                (LanguageAction::Updated, report)
            }
        };

        if parameters.support_ngx_translate {
            // Export from the file as written, not from the in-memory catalog
            let written = formats::load(
                parameters.translation_format(),
                file,
                parameters.encoding,
                Some(parameters.i18n_file.as_path()),
            )?;
            let output = parameters.generated_ngx_translate_file(language);
            let warnings = NgxTranslateExtractor::extract(
                &written,
                &parameters.ngx_translate_extraction_pattern,
                &output,
            )?;
            for warning in warnings {
                Logger::warn(warning);
            }
            Logger::debug(tf!("merge.ngx_exported", output.display(), language));
        }

        Ok(LanguageOutcome {
            language: language.to_string(),
            file: file.to_path_buf(),
            action,
            report,
            status: 0,
        })
    }

    fn log_report(report: &MergeReport, language: &str, remove_unused_ids: bool) {
        if report.new > 0 {
            Logger::warn(tf!("merge.new_entries", report.new, language));
        }
        if report.source_content_changed > 0 {
            Logger::warn(tf!("merge.source_content_changed", report.source_content_changed, language));
        }
        if report.source_ref_changed > 0 {
            Logger::warn(tf!("merge.source_refs_changed", report.source_ref_changed, language));
        }
        if report.id_changed > 0 {
            Logger::warn(tf!("merge.id_changed", report.id_changed, language));
        }
        if report.description_or_meaning_changed > 0 {
            Logger::warn(tf!(
                "merge.descriptions_changed",
                report.description_or_meaning_changed,
                language
            ));
        }
        if report.removed > 0 {
            if remove_unused_ids {
                Logger::warn(tf!("merge.removed_unused", report.removed, language));
            } else {
                Logger::warn(tf!("merge.kept_unused", report.removed, language));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::CatalogFormat;
    use crate::models::config::MergeOptions;
    use crate::models::entry::TargetState;

    const MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file source-language="en" datatype="plaintext" original="ng2.template">
    <body>
      <trans-unit id="app.title" datatype="html">
        <source>My App</source>
        <context-group purpose="location">
          <context context-type="sourcefile">src/app/app.component.html</context>
          <context context-type="linenumber">1</context>
        </context-group>
      </trans-unit>
      <trans-unit id="app.greeting" datatype="html">
        <source>Hello <x id="INTERPOLATION" equiv-text="{{ name }}"/></source>
        <context-group purpose="location">
          <context context-type="sourcefile">src/app/app.component.html</context>
          <context context-type="linenumber">2</context>
        </context-group>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

    fn parameters(dir: &Path, languages: &[&str], options: MergeOptions) -> MergeParameters {
        MergeParameters::from_options(
            MergeOptions {
                src_dir: dir.display().to_string(),
                languages: languages.iter().map(|l| l.to_string()).collect(),
                ..options
            },
            None,
        )
    }

    fn load(path: &Path) -> Catalog {
        formats::load(CatalogFormat::Xlf, path, encoding_rs::UTF_8, None).unwrap()
    }

    #[tokio::test]
    async fn test_creates_then_keeps_language_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), MASTER).unwrap();

        let merge = XliffMerge::new(parameters(dir.path(), &["en", "de"], MergeOptions::default()));
        let outcome = merge.run().await.unwrap();
        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.languages[0].action, LanguageAction::Created);
        assert_eq!(outcome.languages[1].action, LanguageAction::Created);

        let en = load(&dir.path().join("messages.en.xlf"));
        assert_eq!(en.target_language(), Some("en"));
        assert!(en.entries().iter().all(|e| e.state() == TargetState::Final));
        let de = load(&dir.path().join("messages.de.xlf"));
        assert!(de.entries().iter().all(|e| e.state() == TargetState::Translated));

        let written = std::fs::read(dir.path().join("messages.de.xlf")).unwrap();
        let second = merge.run().await.unwrap();
        assert_eq!(second.status, 0);
        assert!(second
            .languages
            .iter()
            .all(|l| l.action == LanguageAction::UpToDate));
        assert_eq!(std::fs::read(dir.path().join("messages.de.xlf")).unwrap(), written);
    }

    #[tokio::test]
    async fn test_master_changes_reach_language_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), MASTER).unwrap();
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], MergeOptions::default()));
        merge.run().await.unwrap();

        let changed = MASTER
            .replace("My App", "My Application")
            .replace("app.greeting", "app.welcome");
        std::fs::write(dir.path().join("messages.xlf"), changed).unwrap();
        let outcome = merge.run().await.unwrap();

        let de = &outcome.languages[0];
        assert_eq!(de.action, LanguageAction::Updated);
        assert_eq!(de.report.source_content_changed, 1);
        assert_eq!(de.report.new, 1);
        assert_eq!(de.report.removed, 1);

        let catalog = load(&dir.path().join("messages.de.xlf"));
        let ids: Vec<_> = catalog.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["app.title", "app.welcome"]);
    }

    #[tokio::test]
    async fn test_source_language_of_master_is_corrected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("messages.xlf"),
            MASTER.replace("source-language=\"en\"", "source-language=\"en-US\""),
        )
        .unwrap();
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], MergeOptions::default()));
        merge.run().await.unwrap();
        assert_eq!(load(&dir.path().join("messages.xlf")).source_language(), Some("en"));
    }

    #[tokio::test]
    async fn test_parameter_errors_stop_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], MergeOptions::default()));
        let outcome = merge.run().await.unwrap();
        assert_eq!(outcome.status, -1);
        assert!(outcome.languages.is_empty());
        assert!(!dir.path().join("messages.de.xlf").exists());
    }

    #[tokio::test]
    async fn test_broken_language_file_fails_only_that_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), MASTER).unwrap();
        std::fs::write(dir.path().join("messages.fr.xlf"), "<xliff><file>").unwrap();

        let merge = XliffMerge::new(parameters(dir.path(), &["de", "fr", "it"], MergeOptions::default()));
        let outcome = merge.run().await.unwrap();
        assert_eq!(outcome.status, -1);
        assert_eq!(outcome.languages[0].action, LanguageAction::Created);
        assert_eq!(outcome.languages[1].action, LanguageAction::Failed);
        assert_eq!(outcome.languages[2].action, LanguageAction::Created);
        assert!(dir.path().join("messages.it.xlf").exists());
    }

    #[tokio::test]
    async fn test_unexpected_failure_surfaces_after_siblings_finish() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), MASTER).unwrap();
        // A directory where the language file belongs cannot be read
        std::fs::create_dir(dir.path().join("messages.fr.xlf")).unwrap();

        let merge = XliffMerge::new(parameters(dir.path(), &["fr", "de", "it"], MergeOptions::default()));
        let err = merge.run().await.unwrap_err();
        assert!(!err.is_classified());
        assert!(err.to_string().contains("messages.fr.xlf"));
        assert!(dir.path().join("messages.de.xlf").is_file());
        assert!(dir.path().join("messages.it.xlf").is_file());
    }

    #[tokio::test]
    async fn test_utf16_catalogs_are_stable_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut master = vec![0xFF, 0xFE];
        for unit in MASTER.replace("encoding=\"UTF-8\"", "encoding=\"UTF-16\"").encode_utf16() {
            master.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(dir.path().join("messages.xlf"), master).unwrap();
        let options = MergeOptions {
            encoding: "UTF-16".into(),
            ..MergeOptions::default()
        };
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], options));

        let first = merge.run().await.unwrap();
        assert_eq!(first.status, 0);
        let written = std::fs::read(dir.path().join("messages.de.xlf")).unwrap();
        assert_eq!(&written[..2], &[0xFF, 0xFE]);

        let second = merge.run().await.unwrap();
        assert_eq!(second.status, 0);
        assert_eq!(second.languages[0].action, LanguageAction::UpToDate);
    }

    #[tokio::test]
    async fn test_ngx_translate_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("messages.xlf"), MASTER).unwrap();
        let options = MergeOptions {
            support_ngx_translate: true,
            ..MergeOptions::default()
        };
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], options));
        assert_eq!(merge.run().await.unwrap().status, 0);

        let json = std::fs::read_to_string(dir.path().join("messages.de.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "app": { "title": "My App", "greeting": "Hello {{0}}" } })
        );
    }

    #[tokio::test]
    async fn test_xmb_master_with_xtb_languages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("messages.xmb"),
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<messagebundle>
  <msg id="4711" desc="title"><source>src/app/app.component.html:1</source>My App</msg>
</messagebundle>
"#,
        )
        .unwrap();
        let options = MergeOptions {
            i18n_format: "xmb".into(),
            ..MergeOptions::default()
        };
        let merge = XliffMerge::new(parameters(dir.path(), &["de"], options));
        let first = merge.run().await.unwrap();
        assert_eq!(first.status, 0);
        let xtb = std::fs::read_to_string(dir.path().join("messages.de.xtb")).unwrap();
        assert!(xtb.contains("<translation id=\"4711\">My App</translation>"));

        let second = merge.run().await.unwrap();
        assert_eq!(second.languages[0].action, LanguageAction::UpToDate);
    }
}
