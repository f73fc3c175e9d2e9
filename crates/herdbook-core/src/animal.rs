use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One head of cattle or buffalo.
///
/// `id` is the primary key used by update/delete/lookup. `animal_id` is the
/// short human-facing code (e.g. `CT001`) and is not a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    pub animal_id: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub horns: String,
    #[serde(default)]
    pub milk_type: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub owner: String,
    /// Liters per day. Absent yields count as zero in every aggregate.
    #[serde(default)]
    pub milk_yield: Option<f64>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub traits: Traits,
    #[serde(default)]
    pub breeding: Breeding,
    #[serde(default)]
    pub health: Health,
}

impl Animal {
    /// Milk yield with absent values treated as zero.
    pub fn yield_or_zero(&self) -> f64 {
        self.milk_yield.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Traits {
    pub weight: String,
    pub height: String,
    pub vaccination: String,
    pub insurance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Breeding {
    pub optimal_mating_time: String,
    pub recommended_partner: String,
    pub breeding_shelf_life: String,
    pub last_mating_date: Option<NaiveDate>,
    pub next_mating_due: Option<NaiveDate>,
    pub pregnancy_status: String,
    pub gestation_period: String,
    pub breeding_age: String,
    pub fertility_status: String,
    pub breeding_history: Vec<MatingEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatingEvent {
    pub date: NaiveDate,
    pub partner: String,
    /// Outcome of the mating, e.g. "Successful".
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Health {
    pub status: String,
    pub disease_type: Option<String>,
    pub symptoms: Vec<String>,
    pub diagnosis: String,
    pub treatment: String,
    pub preventive_measures: Vec<String>,
    pub vaccination_schedule: Vec<VaccinationEntry>,
    pub medication_history: Vec<MedicationEvent>,
    pub health_alerts: Vec<HealthAlert>,
    pub veterinary_contact: String,
    pub quarantine_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationEntry {
    pub vaccine: String,
    /// Date the vaccine was last given.
    pub date: NaiveDate,
    pub next_due: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationEvent {
    pub date: NaiveDate,
    pub medication: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAlert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
    pub date: NaiveDate,
}

/// Caller-supplied fields for a new record. Anything omitted takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewAnimal {
    pub breed: String,
    pub color: String,
    pub horns: String,
    pub milk_type: String,
    pub age: String,
    pub owner: String,
    pub milk_yield: Option<f64>,
    pub image: Option<String>,
    pub traits: Traits,
    pub breeding: Breeding,
    pub health: Health,
}

impl NewAnimal {
    /// Build the stored record around the generated identity fields.
    pub fn into_animal(self, id: String, animal_id: String, now: DateTime<Utc>) -> Animal {
        Animal {
            id,
            animal_id,
            breed: self.breed,
            color: self.color,
            horns: self.horns,
            milk_type: self.milk_type,
            age: self.age,
            owner: self.owner,
            milk_yield: self.milk_yield,
            last_updated: now,
            image: self.image,
            traits: self.traits,
            breeding: self.breeding,
            health: self.health,
        }
    }
}

/// Partial update. Each provided field replaces the stored one wholesale;
/// nested blocks are not merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimalPatch {
    pub breed: Option<String>,
    pub color: Option<String>,
    pub horns: Option<String>,
    pub milk_type: Option<String>,
    pub age: Option<String>,
    pub owner: Option<String>,
    pub milk_yield: Option<f64>,
    pub image: Option<String>,
    pub traits: Option<Traits>,
    pub breeding: Option<Breeding>,
    pub health: Option<Health>,
}

impl AnimalPatch {
    pub fn is_empty(&self) -> bool {
        *self == AnimalPatch::default()
    }

    /// Shallow-merge this patch into `animal`. Does not touch `last_updated`.
    pub fn apply_to(self, animal: &mut Animal) {
        if let Some(v) = self.breed {
            animal.breed = v;
        }
        if let Some(v) = self.color {
            animal.color = v;
        }
        if let Some(v) = self.horns {
            animal.horns = v;
        }
        if let Some(v) = self.milk_type {
            animal.milk_type = v;
        }
        if let Some(v) = self.age {
            animal.age = v;
        }
        if let Some(v) = self.owner {
            animal.owner = v;
        }
        if let Some(v) = self.milk_yield {
            animal.milk_yield = Some(v);
        }
        if let Some(v) = self.image {
            animal.image = Some(v);
        }
        if let Some(v) = self.traits {
            animal.traits = v;
        }
        if let Some(v) = self.breeding {
            animal.breeding = v;
        }
        if let Some(v) = self.health {
            animal.health = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Animal {
        NewAnimal {
            breed: "Jersey".to_string(),
            color: "Light Brown".to_string(),
            milk_yield: Some(20.0),
            ..Default::default()
        }
        .into_animal("a1".to_string(), "CT001".to_string(), Utc::now())
    }

    #[test]
    fn test_patch_replaces_only_provided_fields() {
        let mut animal = sample();
        let patch = AnimalPatch {
            color: Some("Fawn".to_string()),
            milk_yield: Some(22.5),
            ..Default::default()
        };

        patch.apply_to(&mut animal);

        assert_eq!(animal.breed, "Jersey");
        assert_eq!(animal.color, "Fawn");
        assert_eq!(animal.milk_yield, Some(22.5));
        assert_eq!(animal.animal_id, "CT001");
    }

    #[test]
    fn test_patch_replaces_nested_block_wholesale() {
        let mut animal = sample();
        animal.traits.weight = "350 kg".to_string();
        animal.traits.height = "120 cm".to_string();

        let patch = AnimalPatch {
            traits: Some(Traits {
                weight: "360 kg".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        patch.apply_to(&mut animal);

        assert_eq!(animal.traits.weight, "360 kg");
        assert_eq!(animal.traits.height, "");
    }

    #[test]
    fn test_empty_patch() {
        assert!(AnimalPatch::default().is_empty());
        let patch = AnimalPatch {
            age: Some("4 years".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_blocks() {
        let json = r#"{
            "id": "7",
            "animalId": "CT007",
            "breed": "Gir",
            "lastUpdated": "2024-01-01T00:00:00Z"
        }"#;
        let animal: Animal = serde_json::from_str(json).unwrap();

        assert_eq!(animal.animal_id, "CT007");
        assert_eq!(animal.milk_yield, None);
        assert_eq!(animal.yield_or_zero(), 0.0);
        assert!(animal.health.vaccination_schedule.is_empty());
    }

    #[test]
    fn test_health_alert_type_field() {
        let json = r#"{"type": "warning", "message": "Vaccination due", "date": "2024-03-01"}"#;
        let alert: HealthAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.level, AlertLevel::Warning);

        let back = serde_json::to_value(&alert).unwrap();
        assert_eq!(back["type"], "warning");
    }
}
