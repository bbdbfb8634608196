use super::models::{ImportPolicy, ImportResult, ValidatedBatch};
use super::validator::validate_csv;
use crate::traits::ProductSink;
use crate::{ImporterError, Result};
use tracing::{debug, info, warn};

/// Imports products from CSV text into a [`ProductSink`].
///
/// Each call is independent: the importer keeps no state between imports.
pub struct CsvProductImporter<S> {
    sink: S,
    policy: ImportPolicy,
}

impl<S: ProductSink> CsvProductImporter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            policy: ImportPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ImportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ImportPolicy {
        self.policy
    }

    /// Parse and validate without persisting anything.
    pub fn validate(&self, content: &str) -> ValidatedBatch {
        validate_csv(content)
    }

    /// Validate the whole file, apply the batch policy, then persist the
    /// accepted drafts one at a time in file order.
    ///
    /// Every accepted draft goes through [`ProductSink::check`] before the first
    /// write, so a draft the sink would refuse aborts the batch with nothing stored.
    /// A failed persistence call stops the import and is returned as
    /// [`ImporterError::PersistenceError`] with the number of rows already stored.
    pub async fn import(&self, content: &str) -> Result<ImportResult> {
        let batch = validate_csv(content);

        if let Some(rejection) = batch.rejection {
            return Ok(ImportResult {
                imported: 0,
                errors: Vec::new(),
                rejection: Some(rejection),
            });
        }

        info!(
            "Validated {} row(s): {} valid, {} invalid",
            batch.row_count(),
            batch.accepted.len(),
            batch.errors.len()
        );

        if !batch.errors.is_empty() && self.policy == ImportPolicy::AbortOnAnyError {
            warn!(
                "Import aborted: {} row(s) failed validation, nothing was persisted",
                batch.errors.len()
            );
            return Ok(ImportResult {
                imported: 0,
                errors: batch.errors,
                rejection: None,
            });
        }

        for row in &batch.accepted {
            self.sink
                .check(&row.draft)
                .map_err(|e| ImporterError::PersistenceError {
                    line: row.line,
                    imported: 0,
                    source: Box::new(e),
                })?;
        }

        let mut imported = 0;
        for row in &batch.accepted {
            let persisted = self
                .sink
                .create_or_update(&row.draft)
                .await
                .map_err(|e| ImporterError::PersistenceError {
                    line: row.line,
                    imported,
                    source: Box::new(e),
                })?;

            imported += 1;
            debug!(
                "Line {}: stored '{}' via {} ({})",
                row.line,
                persisted.slug,
                self.sink.name(),
                persisted.id
            );
        }

        info!("Imported {} product(s) via {}", imported, self.sink.name());

        Ok(ImportResult {
            imported,
            errors: batch.errors,
            rejection: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_import::{ProductDraft, RowError, RowIssue};
    use crate::traits::PersistedProduct;
    use std::sync::Mutex;

    const HEADER: &str = "name,slug,price,category,description,stock";

    #[derive(Default)]
    struct RecordingSink {
        stored: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
        refuse_on_check: Option<&'static str>,
    }

    impl RecordingSink {
        fn failing_on(slug: &'static str) -> Self {
            Self {
                fail_on: Some(slug),
                ..Default::default()
            }
        }

        fn slugs(&self) -> Vec<String> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ProductSink for RecordingSink {
        fn check(&self, draft: &ProductDraft) -> Result<()> {
            if self.refuse_on_check == Some(draft.slug.as_str()) {
                return Err(ImporterError::ValidationError("stock: Stock cannot be negative".into()));
            }
            Ok(())
        }

        async fn create_or_update(&self, draft: &ProductDraft) -> Result<PersistedProduct> {
            if self.fail_on == Some(draft.slug.as_str()) {
                return Err(ImporterError::ApiError {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            self.stored.lock().unwrap().push(draft.slug.clone());
            Ok(PersistedProduct {
                id: draft.id,
                slug: draft.slug.clone(),
            })
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn csv(rows: &[&str]) -> String {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content
    }

    #[tokio::test]
    async fn test_single_valid_row_is_imported() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink);

        let result = importer
            .import(&csv(&["Areca Palm,areca-palm,699,indoor,A lovely palm,32"]))
            .await
            .unwrap();

        assert_eq!(result, ImportResult {
            imported: 1,
            errors: vec![],
            rejection: None,
        });
        assert_eq!(sink.slugs(), vec!["areca-palm"]);
    }

    #[tokio::test]
    async fn test_missing_name_reports_line_two() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink);

        let result = importer
            .import(&csv(&[",areca-palm,699,indoor,A lovely palm,32"]))
            .await
            .unwrap();

        assert_eq!(result.imported, 0);
        assert_eq!(result.errors, vec![RowError {
            line: 2,
            errors: vec![RowIssue::NameRequired],
        }]);
        assert!(sink.slugs().is_empty());
    }

    #[tokio::test]
    async fn test_header_without_stock_is_rejected() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink);

        let result = importer
            .import("name,slug,price,category,description\nAreca Palm,areca-palm,699,indoor,A lovely palm")
            .await
            .unwrap();

        assert_eq!(result.imported, 0);
        assert!(result.errors.is_empty());
        assert!(result.rejection.unwrap().contains("Invalid CSV header"));
        assert!(sink.slugs().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_price() {
        let importer = CsvProductImporter::new(RecordingSink::default());

        let result = importer
            .import(&csv(&["Areca Palm,areca-palm,abc,indoor,A lovely palm,32"]))
            .await
            .unwrap();

        assert!(result.errors[0].errors.contains(&RowIssue::PriceInvalid));
    }

    #[tokio::test]
    async fn test_any_invalid_row_aborts_whole_batch_by_default() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink);

        let result = importer
            .import(&csv(&[
                "Areca Palm,areca-palm,699,indoor,A lovely palm,32",
                "Snake Plant,snake-plant,349,indoor,,10",
                "Money Plant,money-plant,199,indoor,Easy care,50",
            ]))
            .await
            .unwrap();

        assert_eq!(result.imported, 0);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].line, 3);
        assert_eq!(result.errors[0].errors, vec![RowIssue::DescriptionRequired]);
        assert!(sink.slugs().is_empty());
    }

    #[tokio::test]
    async fn test_persist_valid_rows_policy() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink).with_policy(ImportPolicy::PersistValidRows);

        let result = importer
            .import(&csv(&[
                "Areca Palm,areca-palm,699,indoor,A lovely palm,32",
                "Snake Plant,snake-plant,349,indoor,,10",
                "Money Plant,money-plant,199,indoor,Easy care,50",
            ]))
            .await
            .unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(sink.slugs(), vec!["areca-palm", "money-plant"]);
    }

    #[tokio::test]
    async fn test_rows_are_persisted_in_file_order() {
        let sink = RecordingSink::default();
        let importer = CsvProductImporter::new(&sink);
        let rows = [
            "Zamioculcas,zz-plant,499,indoor,Glossy,5",
            "Aloe Vera,aloe-vera,149,succulent,Soothing,40",
            "Monstera,monstera,899,indoor,Split leaves,8",
        ];

        let result = importer.import(&csv(&rows)).await.unwrap();

        assert_eq!(result.imported, 3);
        assert_eq!(sink.slugs(), vec!["zz-plant", "aloe-vera", "monstera"]);
    }

    #[tokio::test]
    async fn test_persistence_failure_reports_confirmed_count() {
        let sink = RecordingSink::failing_on("aloe-vera");
        let importer = CsvProductImporter::new(&sink);

        let err = importer
            .import(&csv(&[
                "Zamioculcas,zz-plant,499,indoor,Glossy,5",
                "Aloe Vera,aloe-vera,149,succulent,Soothing,40",
                "Monstera,monstera,899,indoor,Split leaves,8",
            ]))
            .await
            .unwrap_err();

        match err {
            ImporterError::PersistenceError { line, imported, .. } => {
                assert_eq!(line, 3);
                assert_eq!(imported, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(sink.slugs(), vec!["zz-plant"]);
    }

    #[tokio::test]
    async fn test_repeated_imports_give_the_same_result() {
        let importer = CsvProductImporter::new(RecordingSink::default());
        let content = csv(&[
            "Areca Palm,areca-palm,699,indoor,A lovely palm,32",
            ",broken,abc,indoor,desc,1",
        ]);

        let first = importer.import(&content).await.unwrap();
        let second = importer.import(&content).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_all_valid_rows_imported() {
        let rows: Vec<String> = (0..25)
            .map(|i| format!("Plant {i},plant-{i},{}.50,indoor,Plant number {i},{i}", 100 + i))
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let importer = CsvProductImporter::new(RecordingSink::default());

        let result = importer.import(&csv(&rows)).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.imported, 25);
    }

    #[tokio::test]
    async fn test_draft_refused_by_sink_check_stores_nothing() {
        let sink = RecordingSink {
            refuse_on_check: Some("monstera"),
            ..Default::default()
        };
        let importer = CsvProductImporter::new(&sink);

        let err = importer
            .import(&csv(&[
                "Zamioculcas,zz-plant,499,indoor,Glossy,5",
                "Aloe Vera,aloe-vera,149,succulent,Soothing,40",
                "Monstera,monstera,899,indoor,Split leaves,-8",
            ]))
            .await
            .unwrap_err();

        match err {
            ImporterError::PersistenceError { line, imported, source } => {
                assert_eq!(line, 4);
                assert_eq!(imported, 0);
                assert!(matches!(*source, ImporterError::ValidationError(_)));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(sink.slugs().is_empty());
    }
}
