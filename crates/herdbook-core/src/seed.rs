use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::animal::{Animal, NewAnimal};
use crate::error::StorageError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    id: String,
    animal_id: String,
    #[serde(flatten)]
    fields: NewAnimal,
}

/// The built-in sample herd used to populate an empty store: five records
/// covering five breeds, all stamped with `now`.
pub fn seed_animals(now: DateTime<Utc>) -> Result<Vec<Animal>, StorageError> {
    let records: Vec<SeedRecord> = serde_json::from_str(include_str!("../data/seed.json"))
        .map_err(|e| StorageError::Serialization(format!("seed set: {}", e)))?;

    Ok(records
        .into_iter()
        .map(|r| r.fields.into_animal(r.id, r.animal_id, now))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_set_shape() {
        let now = Utc::now();
        let animals = seed_animals(now).unwrap();

        assert_eq!(animals.len(), 5);

        let breeds: HashSet<&str> = animals.iter().map(|a| a.breed.as_str()).collect();
        assert_eq!(breeds.len(), 5);

        let ids: HashSet<&str> = animals.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 5);

        assert!(animals.iter().all(|a| a.last_updated == now));
        assert_eq!(animals[1].animal_id, "BF002");
        assert_eq!(animals[1].health.medication_history.len(), 1);
        assert_eq!(animals[4].health.health_alerts.len(), 1);
    }

    #[test]
    fn test_seed_yields() {
        let animals = seed_animals(Utc::now()).unwrap();
        let yields: Vec<f64> = animals.iter().map(Animal::yield_or_zero).collect();
        assert_eq!(yields, vec![25.0, 18.0, 20.0, 15.0, 22.0]);
    }
}
