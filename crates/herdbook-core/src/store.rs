use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::animal::{Animal, AnimalPatch, NewAnimal};
use crate::care::{self, BreedingFilter, BreedingSummary, HealthFilter, HealthSummary};
use crate::error::StorageError;
use crate::notify::{Notification, Notifier};
use crate::query::{self, Category, RecordQuery};
use crate::seed::seed_animals;
use crate::stats::{self, YieldStats};
use crate::storage::{read_json, write_json, KeyValueStore, ANIMALS_KEY};

/// Prefix for generated animal IDs.
pub const DEFAULT_ID_PREFIX: &str = "CT";

/// Authoritative in-memory collection of animal records.
///
/// Every successful mutation writes the whole collection back to the
/// key-value store before returning. The store is meant to be built once at
/// startup and handed to every consumer.
pub struct AnimalStore<S: KeyValueStore> {
    kv: Arc<S>,
    notifier: Arc<dyn Notifier>,
    animals: Vec<Animal>,
    loading: bool,
    id_prefix: String,
}

impl<S: KeyValueStore> AnimalStore<S> {
    /// Create an empty store that has not been loaded yet.
    pub fn new(kv: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kv,
            notifier,
            animals: Vec::new(),
            loading: true,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }

    /// Create a store and load it.
    pub fn open(kv: Arc<S>, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let mut store = Self::new(kv, notifier);
        store.load()?;
        Ok(store)
    }

    /// Use a different prefix for generated animal IDs.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Hydrate from storage, or seed and persist if nothing is stored.
    /// A malformed stored value is returned as an error; the seed set is
    /// not used as a fallback.
    pub fn load(&mut self) -> Result<(), StorageError> {
        self.loading = true;
        match read_json::<Vec<Animal>, _>(&*self.kv, ANIMALS_KEY)? {
            Some(animals) => {
                tracing::info!("Loaded {} animals from storage", animals.len());
                self.animals = animals;
            }
            None => {
                let animals = seed_animals(Utc::now())?;
                write_json(&*self.kv, ANIMALS_KEY, &animals)?;
                tracing::info!("Seeded store with {} sample animals", animals.len());
                self.animals = animals;
            }
        }
        self.loading = false;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// All animals in collection order.
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    fn persist(&self, animals: &[Animal]) -> Result<(), StorageError> {
        write_json(&*self.kv, ANIMALS_KEY, animals)
    }

    /// Next short code: one past the larger of the collection size and the
    /// highest numeric suffix currently in use under this prefix.
    fn next_animal_id(&self) -> String {
        let highest_suffix = self
            .animals
            .iter()
            .filter_map(|a| a.animal_id.strip_prefix(self.id_prefix.as_str()))
            .filter_map(|suffix| suffix.parse::<usize>().ok())
            .max()
            .unwrap_or(0);
        let next = self.animals.len().max(highest_suffix) + 1;
        format!("{}{:03}", self.id_prefix, next)
    }

    /// Add a record built from `data`. Returns the stored record.
    pub fn add(&mut self, data: NewAnimal) -> Result<Animal, StorageError> {
        let animal = data.into_animal(Uuid::new_v4().to_string(), self.next_animal_id(), Utc::now());

        let mut updated = self.animals.clone();
        updated.push(animal.clone());
        self.persist(&updated)?;
        self.animals = updated;

        tracing::info!("Added animal {} ({})", animal.animal_id, animal.id);
        self.notifier
            .notify(Notification::success("Animal added successfully!"));
        Ok(animal)
    }

    /// Shallow-merge `patch` into the record with `id`.
    /// Returns Ok(None) and leaves everything untouched if no such record exists.
    pub fn update(&mut self, id: &str, patch: AnimalPatch) -> Result<Option<Animal>, StorageError> {
        let Some(index) = self.animals.iter().position(|a| a.id == id) else {
            tracing::warn!("Update for unknown animal {}", id);
            return Ok(None);
        };

        let mut updated = self.animals.clone();
        let animal = &mut updated[index];
        patch.apply_to(animal);
        animal.last_updated = refreshed_timestamp(animal.last_updated, Utc::now());
        let animal = animal.clone();

        self.persist(&updated)?;
        self.animals = updated;

        self.notifier
            .notify(Notification::success("Animal updated successfully!"));
        Ok(Some(animal))
    }

    /// Remove the record with `id`. Returns Ok(false) if no such record exists.
    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        if !self.animals.iter().any(|a| a.id == id) {
            tracing::warn!("Delete for unknown animal {}", id);
            return Ok(false);
        }

        let updated: Vec<Animal> = self.animals.iter().filter(|a| a.id != id).cloned().collect();
        self.persist(&updated)?;
        self.animals = updated;

        self.notifier
            .notify(Notification::success("Animal deleted successfully!"));
        Ok(true)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<Animal> {
        query::search(&self.animals, query)
    }

    pub fn filter_by_category(&self, category: Category) -> Vec<Animal> {
        query::filter_by_category(&self.animals, category)
    }

    /// Search, category filter and sort, as the records view shows them.
    pub fn records(&self, query: &RecordQuery) -> Vec<Animal> {
        tracing::debug!("Records query {:?}", query);
        query.apply(&self.animals)
    }

    pub fn compute_yield_statistics(&self) -> YieldStats {
        YieldStats::compute(&self.animals)
    }

    pub fn top_producers(&self, limit: usize) -> Vec<Animal> {
        stats::top_producers(&self.animals, limit)
    }

    pub fn recent(&self, limit: usize) -> Vec<Animal> {
        stats::recent(&self.animals, limit)
    }

    pub fn health_summary(&self, today: NaiveDate) -> HealthSummary {
        HealthSummary::compute(&self.animals, today)
    }

    pub fn breeding_summary(&self, today: NaiveDate) -> BreedingSummary {
        BreedingSummary::compute(&self.animals, today)
    }

    pub fn health_view(&self, query: &str, filter: HealthFilter) -> Vec<Animal> {
        care::health_view(&self.animals, query, filter)
    }

    pub fn breeding_view(&self, query: &str, filter: BreedingFilter, today: NaiveDate) -> Vec<Animal> {
        care::breeding_view(&self.animals, query, filter, today)
    }
}

/// A timestamp strictly after `previous`: `now` if the clock moved forward,
/// otherwise one millisecond past `previous`.
fn refreshed_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
