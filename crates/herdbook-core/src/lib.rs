//! Herdbook Core - Animal records, queries, statistics and persistence traits.
//!
//! This crate contains the domain logic for the herd dashboard. It has no
//! dependencies on other Herdbook crates.

pub mod animal;
pub mod care;
pub mod error;
pub mod export;
pub mod notify;
pub mod query;
pub mod seed;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use animal::{
    AlertLevel, Animal, AnimalPatch, Breeding, Health, HealthAlert, MatingEvent, MedicationEvent,
    NewAnimal, Traits, VaccinationEntry,
};
pub use care::{
    BreedingFilter, BreedingStatus, BreedingSummary, HealthFilter, HealthSummary,
    VaccinationStatus,
};
pub use error::{CoreError, StorageError, ValidationError};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use query::{Category, RecordQuery, SortDirection, SortKey};
pub use session::{Role, SessionStore, User};
pub use stats::YieldStats;
pub use storage::{KeyValueStore, ANIMALS_KEY, USER_KEY};
pub use store::AnimalStore;
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use notify::recording::RecordingNotifier;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryKeyValueStore;
