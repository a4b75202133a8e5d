mod csv;
mod pdf;
mod text;

use time::Date;

use crate::{AggregatedLine, CartRecipe, ExportFormat, Pluralize};

pub use self::csv::CsvRenderer;
pub use pdf::{FontFile, FontSource, PdfRenderer};
pub use text::TextRenderer;

pub const DATE_LABEL: &str = "Дата составления списка";
pub const PRODUCTS_LABEL: &str = "Список продуктов:";
pub const RECIPES_LABEL: &str = "Рецепты:";

/// An aggregated line ready for display: capitalized name, pluralized unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    pub name: String,
    pub amount: u64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListDocument {
    pub date: Date,
    pub lines: Vec<DocumentLine>,
    pub recipes: Vec<CartRecipe>,
}

impl ShoppingListDocument {
    pub fn new(
        date: Date,
        lines: &[AggregatedLine],
        recipes: Vec<CartRecipe>,
        pluralizer: &dyn Pluralize,
    ) -> Self {
        let lines = lines
            .iter()
            .map(|line| DocumentLine {
                name: capitalize(&line.name),
                amount: line.amount,
                unit: pluralizer.pluralize(&line.unit, line.amount),
            })
            .collect();

        Self {
            date,
            lines,
            recipes,
        }
    }

    /// `DD-MM-YYYY`
    pub fn formatted_date(&self) -> String {
        format!(
            "{:02}-{:02}-{:04}",
            self.date.day(),
            u8::from(self.date.month()),
            self.date.year()
        )
    }

    /// The plain-text layout shared by the text and pdf renderers.
    pub fn text_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + self.recipes.len() + 3);
        out.push(format!("{DATE_LABEL}: {}", self.formatted_date()));
        out.push(PRODUCTS_LABEL.to_owned());

        for (index, line) in self.lines.iter().enumerate() {
            out.push(format!(
                "{}. {}: {} {}",
                index + 1,
                line.name,
                line.amount,
                line.unit
            ));
        }

        out.push(RECIPES_LABEL.to_owned());

        for recipe in self.recipes.iter() {
            out.push(format!("- {} ({})", recipe.name, recipe.author));
        }

        out
    }
}

pub trait Render: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn render(&self, document: &ShoppingListDocument) -> crate::Result<Vec<u8>>;
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::{NoAgreement, UnitPluralizer};

    pub(super) fn sample_document() -> ShoppingListDocument {
        ShoppingListDocument::new(
            date!(2024 - 03 - 07),
            &[
                AggregatedLine {
                    name: "сахар".to_owned(),
                    amount: 500,
                    unit: "г".to_owned(),
                },
                AggregatedLine {
                    name: "томаты".to_owned(),
                    amount: 4,
                    unit: "банка".to_owned(),
                },
            ],
            vec![
                CartRecipe {
                    id: "01".to_owned(),
                    name: "Борщ".to_owned(),
                    author: "john".to_owned(),
                },
                CartRecipe {
                    id: "02".to_owned(),
                    name: "Шарлотка".to_owned(),
                    author: "albert".to_owned(),
                },
            ],
            &UnitPluralizer::russian(),
        )
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("сахар"), "Сахар");
        assert_eq!(capitalize("КАРТОФЕЛЬ молодой"), "Картофель молодой");
        assert_eq!(capitalize("ёжевика"), "Ёжевика");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_document_lines() {
        let document = sample_document();

        assert_eq!(document.formatted_date(), "07-03-2024");
        assert_eq!(
            document.text_lines(),
            vec![
                "Дата составления списка: 07-03-2024",
                "Список продуктов:",
                "1. Сахар: 500 г",
                "2. Томаты: 4 банки",
                "Рецепты:",
                "- Борщ (john)",
                "- Шарлотка (albert)",
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        let document = ShoppingListDocument::new(date!(2024 - 12 - 31), &[], vec![], &NoAgreement);

        assert_eq!(
            document.text_lines(),
            vec![
                "Дата составления списка: 31-12-2024",
                "Список продуктов:",
                "Рецепты:",
            ]
        );
    }
}
