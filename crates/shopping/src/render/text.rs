use crate::ExportFormat;

use super::{Render, ShoppingListDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Render for TextRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Txt
    }

    fn render(&self, document: &ShoppingListDocument) -> crate::Result<Vec<u8>> {
        Ok(document.text_lines().join("\n").into_bytes())
    }
}
