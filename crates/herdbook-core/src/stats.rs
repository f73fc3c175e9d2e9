use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::query::{sort_animals, SortDirection, SortKey};

/// Default number of animals in the top-producers list.
pub const TOP_PRODUCERS: usize = 5;

/// Default number of animals in the recent list.
pub const RECENT_ANIMALS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldStats {
    pub total_animals: usize,
    pub total_yield: f64,
    /// Rounded to one decimal place; zero for an empty herd.
    pub average_yield: f64,
}

impl YieldStats {
    pub fn compute(animals: &[Animal]) -> Self {
        let total_animals = animals.len();
        let total_yield: f64 = animals.iter().map(Animal::yield_or_zero).sum();
        let average_yield = if total_animals > 0 {
            round_one_decimal(total_yield / total_animals as f64)
        } else {
            0.0
        };

        Self {
            total_animals,
            total_yield,
            average_yield,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The `limit` highest-yielding animals, best first.
pub fn top_producers(animals: &[Animal], limit: usize) -> Vec<Animal> {
    let mut sorted = animals.to_vec();
    sort_animals(&mut sorted, SortKey::MilkYield, SortDirection::Desc);
    sorted.truncate(limit);
    sorted
}

/// The first `limit` animals in collection order.
pub fn recent(animals: &[Animal], limit: usize) -> Vec<Animal> {
    animals.iter().take(limit).cloned().collect()
}
