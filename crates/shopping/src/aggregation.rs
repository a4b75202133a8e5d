use std::{cmp::Ordering, collections::HashMap};

/// One ingredient edge of a recipe sitting in a user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartComponent {
    pub recipe_id: String,
    pub recipe_name: String,
    pub recipe_author: String,
    pub ingredient_name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

/// A recipe referenced by the cart, as listed at the bottom of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecipe {
    pub id: String,
    pub name: String,
    pub author: String,
}

/// Total amount of one ingredient across every recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedLine {
    pub name: String,
    pub amount: u64,
    pub unit: String,
}

/// Groups cart components by `(ingredient name, measurement unit)` and sums
/// their amounts.
///
/// The unit is part of the key, so `sugar/g` and `sugar/tbsp` stay on
/// separate lines. Lines come back ordered by name, compared without case
/// and with `ё` folded into `е`, then by exact name and unit, so the same
/// snapshot always yields the same sequence whatever order the store
/// returned the rows in.
pub fn aggregate(components: &[CartComponent]) -> Vec<AggregatedLine> {
    let mut groups: HashMap<(&str, &str), u64> = HashMap::new();

    for component in components {
        let key = (
            component.ingredient_name.as_str(),
            component.measurement_unit.as_str(),
        );
        *groups.entry(key).or_default() += u64::from(component.amount);
    }

    let mut lines = groups
        .into_iter()
        .map(|((name, unit), amount)| AggregatedLine {
            name: name.to_owned(),
            amount,
            unit: unit.to_owned(),
        })
        .collect::<Vec<_>>();

    lines.sort_by(compare_lines);

    lines
}

fn compare_lines(a: &AggregatedLine, b: &AggregatedLine) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.unit.cmp(&b.unit))
}

fn collation_key(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}
