//! Breeding and health status derived from the nested care blocks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::query::matches_breed_or_id;

/// Window, in days, within which a due date counts as "due soon".
pub const DUE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedingStatus {
    Pregnant,
    Overdue,
    Due,
    Ready,
}

fn is_pregnant(animal: &Animal) -> bool {
    animal
        .breeding
        .pregnancy_status
        .trim_start()
        .to_lowercase()
        .starts_with("pregnant")
}

/// Only an explicit "Not Pregnant" status marks an animal as open for mating;
/// an empty or unrecognised status does not.
fn is_open(animal: &Animal) -> bool {
    animal
        .breeding
        .pregnancy_status
        .trim()
        .eq_ignore_ascii_case("not pregnant")
}

/// Days from `today` until the next mating is due, if a due date is set.
fn days_until_mating(animal: &Animal, today: NaiveDate) -> Option<i64> {
    animal
        .breeding
        .next_mating_due
        .map(|due| (due - today).num_days())
}

pub fn breeding_status(animal: &Animal, today: NaiveDate) -> BreedingStatus {
    if is_pregnant(animal) {
        return BreedingStatus::Pregnant;
    }
    match days_until_mating(animal, today) {
        Some(days) if days <= 0 => BreedingStatus::Overdue,
        Some(days) if days <= DUE_WINDOW_DAYS => BreedingStatus::Due,
        _ => BreedingStatus::Ready,
    }
}

/// Care advice for the animal's current breeding state.
pub fn breeding_recommendations(animal: &Animal, today: NaiveDate) -> Vec<&'static str> {
    if is_pregnant(animal) {
        return vec![
            "Provide extra nutrition for pregnancy",
            "Schedule regular veterinary checkups",
            "Prepare clean and comfortable calving area",
        ];
    }
    match days_until_mating(animal, today) {
        Some(days) if days <= DUE_WINDOW_DAYS => vec![
            "Schedule mating with recommended partner",
            "Ensure animal is in good health condition",
            "Prepare breeding environment",
        ],
        _ => vec![
            "Monitor heat cycles regularly",
            "Maintain optimal body condition",
            "Keep breeding records updated",
        ],
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BreedingFilter {
    #[default]
    All,
    Pregnant,
    Ready,
    Due,
}

impl From<String> for BreedingFilter {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pregnant" => BreedingFilter::Pregnant,
            "ready" => BreedingFilter::Ready,
            "due" => BreedingFilter::Due,
            _ => BreedingFilter::All,
        }
    }
}

impl BreedingFilter {
    pub fn matches(&self, animal: &Animal, today: NaiveDate) -> bool {
        match self {
            BreedingFilter::All => true,
            BreedingFilter::Pregnant => is_pregnant(animal),
            BreedingFilter::Ready => is_open(animal),
            BreedingFilter::Due => {
                matches!(days_until_mating(animal, today), Some(d) if d <= DUE_WINDOW_DAYS)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "count")]
pub enum VaccinationStatus {
    Overdue(usize),
    DueSoon(usize),
    UpToDate,
}

pub fn vaccination_status(animal: &Animal, today: NaiveDate) -> VaccinationStatus {
    let schedule = &animal.health.vaccination_schedule;

    let overdue = schedule.iter().filter(|v| v.next_due < today).count();
    if overdue > 0 {
        return VaccinationStatus::Overdue(overdue);
    }

    let due_soon = schedule
        .iter()
        .filter(|v| {
            let days = (v.next_due - today).num_days();
            days > 0 && days <= DUE_WINDOW_DAYS
        })
        .count();
    if due_soon > 0 {
        return VaccinationStatus::DueSoon(due_soon);
    }

    VaccinationStatus::UpToDate
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum HealthFilter {
    #[default]
    All,
    Normal,
    Diseased,
    Alerts,
}

impl From<String> for HealthFilter {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "normal" => HealthFilter::Normal,
            "diseased" => HealthFilter::Diseased,
            "alerts" => HealthFilter::Alerts,
            _ => HealthFilter::All,
        }
    }
}

impl HealthFilter {
    pub fn matches(&self, animal: &Animal) -> bool {
        match self {
            HealthFilter::All => true,
            HealthFilter::Normal => animal.health.status == "Normal",
            HealthFilter::Diseased => animal.health.status == "Diseased",
            HealthFilter::Alerts => !animal.health.health_alerts.is_empty(),
        }
    }
}

/// Animals matching `query` (breed or animal ID) and the health filter.
pub fn health_view(animals: &[Animal], query: &str, filter: HealthFilter) -> Vec<Animal> {
    animals
        .iter()
        .filter(|a| matches_breed_or_id(a, query) && filter.matches(a))
        .cloned()
        .collect()
}

/// Animals matching `query` (breed or animal ID) and the breeding filter.
pub fn breeding_view(
    animals: &[Animal],
    query: &str,
    filter: BreedingFilter,
    today: NaiveDate,
) -> Vec<Animal> {
    animals
        .iter()
        .filter(|a| matches_breed_or_id(a, query) && filter.matches(a, today))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub normal: usize,
    pub diseased: usize,
    /// Vaccinations across the herd whose next due date is within the window
    /// (overdue ones included).
    pub vaccinations_due: usize,
    pub alerts: usize,
}

impl HealthSummary {
    pub fn compute(animals: &[Animal], today: NaiveDate) -> Self {
        let mut summary = HealthSummary::default();
        for animal in animals {
            if HealthFilter::Normal.matches(animal) {
                summary.normal += 1;
            }
            if HealthFilter::Diseased.matches(animal) {
                summary.diseased += 1;
            }
            summary.vaccinations_due += animal
                .health
                .vaccination_schedule
                .iter()
                .filter(|v| (v.next_due - today).num_days() <= DUE_WINDOW_DAYS)
                .count();
            summary.alerts += animal.health.health_alerts.len();
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingSummary {
    pub pregnant: usize,
    pub ready: usize,
    pub due: usize,
    pub total: usize,
}

impl BreedingSummary {
    pub fn compute(animals: &[Animal], today: NaiveDate) -> Self {
        let count = |f: BreedingFilter| animals.iter().filter(|a| f.matches(a, today)).count();
        Self {
            pregnant: count(BreedingFilter::Pregnant),
            ready: count(BreedingFilter::Ready),
            due: count(BreedingFilter::Due),
            total: animals.len(),
        }
    }
}
