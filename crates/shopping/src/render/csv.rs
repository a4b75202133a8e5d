use crate::ExportFormat;

use super::{Render, ShoppingListDocument};

pub const CSV_HEADER: [&str; 3] = ["Ингредиент", "Количество", "Единицы измерения"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl Render for CsvRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, document: &ShoppingListDocument) -> crate::Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for line in document.lines.iter() {
            let amount = line.amount.to_string();
            writer.write_record([line.name.as_str(), amount.as_str(), line.unit.as_str()])?;
        }

        writer
            .into_inner()
            .map_err(|err| crate::ShoppingError::Csv(err.into_error().into()))
    }
}
