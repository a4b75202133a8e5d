use std::{collections::HashMap, sync::Arc};

use time::{Date, OffsetDateTime};

use crate::{
    CartStore, Pluralize, ShoppingError, aggregate,
    render::{CsvRenderer, FontSource, PdfRenderer, Render, ShoppingListDocument, TextRenderer},
};

#[derive(
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Txt,
    Csv,
    Pdf,
}

impl ExportFormat {
    /// Missing or unknown formats resolve to txt.
    pub fn resolve(requested: Option<&str>) -> Self {
        let Some(requested) = requested else {
            return ExportFormat::default();
        };

        requested.parse().unwrap_or_else(|_| {
            tracing::warn!(format = requested, "unsupported export format, falling back to txt");
            ExportFormat::default()
        })
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn filename(&self) -> String {
        format!("shopping_list.{self}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

impl ExportFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Reads the user's cart, aggregates it and hands the document to the
/// renderer registered for the requested format.
#[derive(Clone)]
pub struct ExportService {
    store: Arc<dyn CartStore>,
    pluralizer: Arc<dyn Pluralize>,
    renderers: HashMap<ExportFormat, Arc<dyn Render>>,
}

impl ExportService {
    /// Registers the text, csv and pdf renderers.
    pub fn new(
        store: impl CartStore + 'static,
        pluralizer: impl Pluralize + 'static,
        font: impl FontSource + 'static,
    ) -> Self {
        Self::empty(store, pluralizer)
            .renderer(TextRenderer)
            .renderer(CsvRenderer)
            .renderer(PdfRenderer::new(font))
    }

    /// No renderers registered; add them with [`ExportService::renderer`].
    pub fn empty(store: impl CartStore + 'static, pluralizer: impl Pluralize + 'static) -> Self {
        Self {
            store: Arc::new(store),
            pluralizer: Arc::new(pluralizer),
            renderers: HashMap::new(),
        }
    }

    /// Adds a renderer, replacing any previous one for the same format.
    pub fn renderer(mut self, renderer: impl Render + 'static) -> Self {
        self.renderers.insert(renderer.format(), Arc::new(renderer));
        self
    }

    pub async fn export(&self, user_id: &str, format: ExportFormat) -> crate::Result<ExportFile> {
        self.export_on(user_id, format, OffsetDateTime::now_utc().date())
            .await
    }

    #[tracing::instrument(skip_all, fields(user = user_id, format = %format))]
    pub async fn export_on(
        &self,
        user_id: &str,
        format: ExportFormat,
        date: Date,
    ) -> crate::Result<ExportFile> {
        let Some(renderer) = self.renderers.get(&format) else {
            return Err(ShoppingError::MissingRenderer(format));
        };

        let snapshot = self.store.snapshot(user_id).await?;
        let lines = aggregate(&snapshot.components);
        let document =
            ShoppingListDocument::new(date, &lines, snapshot.recipes, self.pluralizer.as_ref());

        let bytes = renderer.render(&document)?;

        tracing::info!(
            lines = lines.len(),
            recipes = document.recipes.len(),
            "shopping list exported"
        );

        Ok(ExportFile {
            bytes,
            content_type: format.content_type(),
            filename: format.filename(),
        })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use time::macros::date;

    use super::*;
    use crate::{
        CartComponent, CartRecipe, CartSnapshot, UnitPluralizer,
        render::{FontFile, ShoppingListDocument},
    };

    struct FixedStore(CartSnapshot);

    #[async_trait::async_trait]
    impl CartStore for FixedStore {
        async fn snapshot(&self, _user_id: &str) -> crate::Result<CartSnapshot> {
            Ok(self.0.clone())
        }
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl CartStore for FailingStore {
        async fn snapshot(&self, _user_id: &str) -> crate::Result<CartSnapshot> {
            Err(ShoppingError::Store(foodgram_shared::Error::Unknown(
                anyhow::anyhow!("disk I/O error"),
            )))
        }
    }

    struct LineCount;

    impl Render for LineCount {
        fn format(&self) -> ExportFormat {
            ExportFormat::Txt
        }

        fn render(&self, document: &ShoppingListDocument) -> crate::Result<Vec<u8>> {
            Ok(format!("lines={}", document.lines.len()).into_bytes())
        }
    }

    fn snapshot() -> CartSnapshot {
        CartSnapshot {
            components: vec![CartComponent {
                recipe_id: "01".to_owned(),
                recipe_name: "Компот".to_owned(),
                recipe_author: "john".to_owned(),
                ingredient_name: "сахар".to_owned(),
                measurement_unit: "г".to_owned(),
                amount: 100,
            }],
            recipes: vec![CartRecipe {
                id: "01".to_owned(),
                name: "Компот".to_owned(),
                author: "john".to_owned(),
            }],
        }
    }

    fn missing_font() -> FontFile {
        FontFile::new("/nonexistent/font.ttf")
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = ExportService::new(FailingStore, UnitPluralizer::russian(), missing_font());

        for format in ExportFormat::iter() {
            let err = service
                .export_on("john", format, date!(2024 - 01 - 02))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                ShoppingError::Store(foodgram_shared::Error::Unknown(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_missing_font_fails_pdf_export_only() {
        let service =
            ExportService::new(FixedStore(snapshot()), UnitPluralizer::russian(), missing_font());

        let err = service
            .export_on("john", ExportFormat::Pdf, date!(2024 - 01 - 02))
            .await
            .unwrap_err();
        assert!(matches!(err, ShoppingError::MissingFont(_)));

        let file = service
            .export_on("john", ExportFormat::Txt, date!(2024 - 01 - 02))
            .await
            .unwrap();
        assert!(String::from_utf8(file.bytes).unwrap().contains("1. Сахар: 100 г"));
    }

    #[tokio::test]
    async fn test_registered_renderer_replaces_default() {
        let service =
            ExportService::new(FixedStore(snapshot()), UnitPluralizer::russian(), missing_font())
                .renderer(LineCount);

        let file = service
            .export_on("john", ExportFormat::Txt, date!(2024 - 01 - 02))
            .await
            .unwrap();

        assert_eq!(file.bytes, b"lines=1");
        assert_eq!(file.content_type, "text/plain");
    }

    #[tokio::test]
    async fn test_missing_renderer() {
        let service =
            ExportService::empty(FixedStore(snapshot()), UnitPluralizer::russian()).renderer(LineCount);

        let err = service
            .export_on("john", ExportFormat::Csv, date!(2024 - 01 - 02))
            .await
            .unwrap_err();
        assert!(matches!(err, ShoppingError::MissingRenderer(ExportFormat::Csv)));

        assert!(
            service
                .export_on("john", ExportFormat::Txt, date!(2024 - 01 - 02))
                .await
                .is_ok()
        );
    }

    #[test]
    fn test_resolve() {
        assert_eq!(ExportFormat::resolve(None), ExportFormat::Txt);
        assert_eq!(ExportFormat::resolve(Some("csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::resolve(Some("PDF")), ExportFormat::Pdf);
        assert_eq!(ExportFormat::resolve(Some("xml")), ExportFormat::Txt);
        assert_eq!(ExportFormat::resolve(Some("")), ExportFormat::Txt);
    }

    #[test]
    fn test_file_metadata() {
        let expected = [
            ("shopping_list.txt", "text/plain"),
            ("shopping_list.csv", "text/csv; charset=utf-8"),
            ("shopping_list.pdf", "application/pdf"),
        ];

        for (format, (filename, content_type)) in ExportFormat::iter().zip(expected) {
            assert_eq!(format.filename(), filename);
            assert_eq!(format.content_type(), content_type);
        }

        let file = ExportFile {
            bytes: vec![],
            content_type: ExportFormat::Csv.content_type(),
            filename: ExportFormat::Csv.filename(),
        };
        assert_eq!(
            file.content_disposition(),
            "attachment; filename=\"shopping_list.csv\""
        );
    }
}
