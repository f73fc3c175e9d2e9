//! Search, category filtering and sorting over animal records.
//!
//! Every function here preserves the input order except `sort_animals`,
//! which is a stable sort: records with equal keys keep their relative order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::animal::Animal;

/// Coarse species grouping derived from the breed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    #[default]
    All,
    Cattle,
    Buffalo,
}

impl Category {
    const CATTLE_KEYWORDS: &'static [&'static str] = &["holstein", "jersey"];
    const BUFFALO_KEYWORDS: &'static [&'static str] = &["buffalo", "murrah"];

    /// Parse a category name. Names are matched exactly; anything else,
    /// including a differently cased name, degrades to `All`.
    pub fn parse(s: &str) -> Self {
        match s {
            "cattle" => Category::Cattle,
            "buffalo" => Category::Buffalo,
            "all" => Category::All,
            other => {
                tracing::debug!("Unknown category {:?}, showing all animals", other);
                Category::All
            }
        }
    }

    /// Whether `animal` belongs to this category.
    pub fn matches(&self, animal: &Animal) -> bool {
        let keywords = match self {
            Category::All => return true,
            Category::Cattle => Self::CATTLE_KEYWORDS,
            Category::Buffalo => Self::BUFFALO_KEYWORDS,
        };
        let breed = animal.breed.to_lowercase();
        keywords.iter().any(|k| breed.contains(k))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SortKey {
    Breed,
    MilkYield,
    Age,
    #[default]
    LastUpdated,
}

impl SortKey {
    /// Parse a sort key. Unknown names fall back to `LastUpdated`.
    pub fn parse(s: &str) -> Self {
        match s {
            "breed" => SortKey::Breed,
            "milkYield" => SortKey::MilkYield,
            "age" => SortKey::Age,
            _ => SortKey::LastUpdated,
        }
    }

    fn compare(&self, a: &Animal, b: &Animal) -> Ordering {
        match self {
            SortKey::Breed => a.breed.to_lowercase().cmp(&b.breed.to_lowercase()),
            SortKey::MilkYield => a.yield_or_zero().total_cmp(&b.yield_or_zero()),
            SortKey::Age => leading_integer(&a.age).cmp(&leading_integer(&b.age)),
            SortKey::LastUpdated => a.last_updated.cmp(&b.last_updated),
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::parse(&s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a direction. Anything but an ascending spelling is descending.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl From<String> for SortDirection {
    fn from(s: String) -> Self {
        SortDirection::parse(&s)
    }
}

/// Parameters of the records view: search, then category, then sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordQuery {
    #[serde(rename = "q")]
    pub search: String,
    pub category: Category,
    #[serde(rename = "sort")]
    pub sort_key: SortKey,
    #[serde(rename = "order")]
    pub direction: SortDirection,
}

impl RecordQuery {
    /// Run the pipeline over `animals`.
    pub fn apply(&self, animals: &[Animal]) -> Vec<Animal> {
        let mut result: Vec<Animal> = search(animals, &self.search)
            .into_iter()
            .filter(|a| self.category.matches(a))
            .collect();
        sort_animals(&mut result, self.sort_key, self.direction);
        result
    }
}

/// Parse the leading integer of `text` the way a lenient numeric parse would:
/// optional leading whitespace and sign, then digits. "3 years" -> 3,
/// "abc" -> 0.
pub fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}

/// Case-insensitive substring match on breed, animal ID, color and owner.
/// An empty query returns everything.
pub fn search(animals: &[Animal], query: &str) -> Vec<Animal> {
    if query.is_empty() {
        return animals.to_vec();
    }
    let needle = query.to_lowercase();
    animals
        .iter()
        .filter(|a| {
            [&a.breed, &a.animal_id, &a.color, &a.owner]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Case-insensitive match on breed or animal ID only, as used by the care
/// (health and breeding) views.
pub fn matches_breed_or_id(animal: &Animal, query: &str) -> bool {
    let needle = query.to_lowercase();
    animal.breed.to_lowercase().contains(&needle)
        || animal.animal_id.to_lowercase().contains(&needle)
}

pub fn filter_by_category(animals: &[Animal], category: Category) -> Vec<Animal> {
    animals
        .iter()
        .filter(|a| category.matches(a))
        .cloned()
        .collect()
}

/// Stable sort by `key` in `direction`.
pub fn sort_animals(animals: &mut [Animal], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Asc => animals.sort_by(|a, b| key.compare(a, b)),
        SortDirection::Desc => animals.sort_by(|a, b| key.compare(b, a)),
    }
}
