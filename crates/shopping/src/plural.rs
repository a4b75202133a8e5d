use std::collections::HashMap;

/// Picks the displayed form of a measurement unit for a given amount.
pub trait Pluralize: Send + Sync {
    fn pluralize(&self, unit: &str, count: u64) -> String;
}

impl<P: Pluralize + ?Sized> Pluralize for Box<P> {
    fn pluralize(&self, unit: &str, count: u64) -> String {
        (**self).pluralize(unit, count)
    }
}

/// Morphological agreement for words missing from the exception table.
pub trait Inflect: Send + Sync {
    /// Returns `None` when the word cannot be classified.
    fn inflect(&self, word: &str, count: u64) -> Option<String>;
}

/// Numeral agreement class: 1 / 2..4 / 5+ with the usual 11..14 carve-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Few,
    Many,
}

impl PluralCategory {
    pub fn of(count: u64) -> Self {
        let (rem10, rem100) = (count % 10, count % 100);

        if rem10 == 1 && rem100 != 11 {
            PluralCategory::One
        } else if (2..=4).contains(&rem10) && !(12..=14).contains(&rem100) {
            PluralCategory::Few
        } else {
            PluralCategory::Many
        }
    }
}

pub const DEFAULT_PLURAL_THRESHOLD: u64 = 5;

/// Exception table first, then the optional inflector, then the word as is.
///
/// An exception maps a unit to its `(few, many)` forms; `few` is used for
/// every count below the threshold, including 1.
pub struct UnitPluralizer {
    exceptions: HashMap<String, (String, String)>,
    threshold: u64,
    inflector: Option<Box<dyn Inflect>>,
}

impl UnitPluralizer {
    pub fn new(threshold: u64) -> Self {
        Self {
            exceptions: HashMap::new(),
            threshold,
            inflector: None,
        }
    }

    pub fn russian() -> Self {
        Self::new(DEFAULT_PLURAL_THRESHOLD)
            .exception("банка", "банки", "банок")
            .inflector(RussianInflector)
    }

    pub fn exception(
        mut self,
        word: impl Into<String>,
        few: impl Into<String>,
        many: impl Into<String>,
    ) -> Self {
        self.exceptions
            .insert(word.into(), (few.into(), many.into()));
        self
    }

    pub fn inflector(mut self, inflector: impl Inflect + 'static) -> Self {
        self.inflector = Some(Box::new(inflector));
        self
    }
}

impl Default for UnitPluralizer {
    fn default() -> Self {
        Self::russian()
    }
}

impl Pluralize for UnitPluralizer {
    fn pluralize(&self, unit: &str, count: u64) -> String {
        if let Some((few, many)) = self.exceptions.get(unit) {
            return if count < self.threshold {
                few.to_owned()
            } else {
                many.to_owned()
            };
        }

        self.inflector
            .as_ref()
            .and_then(|inflector| inflector.inflect(unit, count))
            .unwrap_or_else(|| unit.to_owned())
    }
}

/// For locales that do not render grammatical number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAgreement;

impl Pluralize for NoAgreement {
    fn pluralize(&self, unit: &str, _count: u64) -> String {
        unit.to_owned()
    }
}

const VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];
const HUSHING: &[char] = &['ж', 'ш', 'ч', 'щ'];
const VELAR: &[char] = &['г', 'к', 'х'];

/// Rule-based agreement for single lowercase Cyrillic nouns given in the
/// nominative singular.
///
/// Abbreviations (`г`, `мл`, `ч. л.`), multi-word units and endings the
/// rules do not cover are left to the caller's fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussianInflector;

impl Inflect for RussianInflector {
    fn inflect(&self, word: &str, count: u64) -> Option<String> {
        let chars = word.chars().collect::<Vec<_>>();

        if !is_inflectable(&chars) {
            return None;
        }

        // A word is classified only when both forms can be built.
        let few = genitive_singular(&chars)?;
        let many = genitive_plural(&chars)?;

        Some(match PluralCategory::of(count) {
            PluralCategory::One => word.to_owned(),
            PluralCategory::Few => few,
            PluralCategory::Many => many,
        })
    }
}

fn is_inflectable(chars: &[char]) -> bool {
    chars.len() > 1
        && chars.iter().all(|c| ('а'..='я').contains(c) || *c == 'ё')
        && chars.iter().any(|c| VOWELS.contains(c))
}

fn is_consonant(c: char) -> bool {
    !VOWELS.contains(&c) && c != 'ь' && c != 'ъ' && c != 'й'
}

fn genitive_singular(chars: &[char]) -> Option<String> {
    let (last, stem) = chars.split_last()?;
    let stem = String::from_iter(stem);

    match last {
        'а' => {
            let hard = stem
                .chars()
                .last()
                .is_some_and(|c| VELAR.contains(&c) || HUSHING.contains(&c));

            Some(format!("{stem}{}", if hard { "и" } else { "ы" }))
        }
        'я' => Some(format!("{stem}и")),
        'о' => Some(format!("{stem}а")),
        'й' => Some(format!("{stem}я")),
        c if is_consonant(*c) => Some(format!("{}а", drop_fleeting_vowel(chars))),
        _ => None,
    }
}

fn genitive_plural(chars: &[char]) -> Option<String> {
    let (last, stem) = chars.split_last()?;

    match last {
        'а' => Some(feminine_plural_stem(stem)),
        'я' if stem.last() == Some(&'и') => Some(format!("{}й", String::from_iter(stem))),
        'о' => Some(String::from_iter(stem)),
        'й' => Some(format!("{}ев", String::from_iter(stem))),
        c if is_consonant(*c) => {
            let base = drop_fleeting_vowel(chars);
            let suffix = if HUSHING.contains(c) { "ей" } else { "ов" };

            Some(format!("{base}{suffix}"))
        }
        _ => None,
    }
}

// банк -> банок, ложк -> ложек, дольк -> долек, штук -> штук
fn feminine_plural_stem(stem: &[char]) -> String {
    match stem {
        [head @ .., before, 'к'] if !VOWELS.contains(before) => {
            let head = String::from_iter(head);

            match before {
                'й' | 'ь' => format!("{head}ек"),
                c if HUSHING.contains(c) => format!("{head}{c}ек"),
                c => format!("{head}{c}ок"),
            }
        }
        _ => String::from_iter(stem),
    }
}

// пучок -> пучк, кусочек -> кусочк, огонёк -> огоньк
fn drop_fleeting_vowel(chars: &[char]) -> String {
    match chars {
        [head @ .., before, 'ё', 'к'] if is_consonant(*before) => {
            format!("{}{before}ьк", String::from_iter(head))
        }
        [head @ .., before, 'о' | 'е', 'к'] if chars.len() > 4 && is_consonant(*before) => {
            format!("{}{before}к", String::from_iter(head))
        }
        _ => String::from_iter(chars),
    }
}
