//! Reference data for the breeds the identification service recognises.

use rand::Rng;
use serde::{Deserialize, Serialize};

use herdbook_core::{Breeding, Health, NewAnimal, Traits};

pub const VACCINATION_UP_TO_DATE: &str = "Up to date";
pub const INSURANCE_ACTIVE: &str = "Active";

/// Owner recorded on animals registered from a scan.
pub const SCAN_OWNER: &str = "Current User";

/// Range (litres per day) of the yield assigned to a freshly scanned animal.
const SCAN_YIELD_RANGE: std::ops::Range<u32> = 15..35;

/// Whole-litre daily yield drawn from `rng`, used when a scanned animal is
/// saved without one.
pub fn default_milk_yield<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(SCAN_YIELD_RANGE))
}

/// [`default_milk_yield`] with the thread-local generator.
pub fn random_milk_yield() -> f64 {
    default_milk_yield(&mut rand::thread_rng())
}

pub struct BreedProfile {
    pub breed: &'static str,
    /// Two-letter prefix of identifiers issued for this breed.
    pub code: &'static str,
    pub confidence: f64,
    pub color: &'static str,
    pub horns: &'static str,
    pub milk_type: &'static str,
    pub weight: &'static str,
    pub height: &'static str,
    pub age: &'static str,
    pub optimal_mating_time: &'static str,
    pub recommended_partner: &'static str,
    pub breeding_shelf_life: &'static str,
    pub fertility_status: &'static str,
    pub breeding_age: &'static str,
    pub preventive_measures: &'static [&'static str],
    pub common_diseases: &'static [&'static str],
}

pub static PROFILES: [BreedProfile; 5] = [
    BreedProfile {
        breed: "Holstein Friesian",
        code: "CT",
        confidence: 94.5,
        color: "Black and White",
        horns: "No",
        milk_type: "High Yield",
        weight: "450 kg",
        height: "140 cm",
        age: "3-4 years",
        optimal_mating_time: "12-18 months",
        recommended_partner: "Holstein Friesian Bull",
        breeding_shelf_life: "8-10 years",
        fertility_status: "High",
        breeding_age: "18 months",
        preventive_measures: &[
            "Regular vaccination",
            "Clean water supply",
            "Balanced nutrition",
            "Regular health checkups",
        ],
        common_diseases: &["Foot and Mouth Disease", "Mastitis", "Brucellosis"],
    },
    BreedProfile {
        breed: "Murrah Buffalo",
        code: "BF",
        confidence: 92.3,
        color: "Black",
        horns: "Yes",
        milk_type: "High Fat",
        weight: "550 kg",
        height: "135 cm",
        age: "4-5 years",
        optimal_mating_time: "15-20 months",
        recommended_partner: "Murrah Buffalo Bull",
        breeding_shelf_life: "10-12 years",
        fertility_status: "High",
        breeding_age: "20 months",
        preventive_measures: &[
            "Regular vaccination",
            "Clean water supply",
            "Balanced nutrition with extra minerals",
            "Regular health checkups",
            "Proper shelter from heat",
        ],
        common_diseases: &[
            "Foot and Mouth Disease",
            "Mastitis",
            "Anthrax",
            "Brucellosis",
        ],
    },
    BreedProfile {
        breed: "Jersey",
        code: "JR",
        confidence: 89.7,
        color: "Light Brown",
        horns: "No",
        milk_type: "High Butterfat",
        weight: "350 kg",
        height: "120 cm",
        age: "3-4 years",
        optimal_mating_time: "12-15 months",
        recommended_partner: "Jersey Bull",
        breeding_shelf_life: "8-10 years",
        fertility_status: "High",
        breeding_age: "15 months",
        preventive_measures: &[
            "Regular vaccination",
            "Clean water supply",
            "High-quality feed",
            "Regular health checkups",
            "Protection from cold weather",
        ],
        common_diseases: &[
            "Foot and Mouth Disease",
            "Mastitis",
            "Brucellosis",
            "Hypocalcemia",
        ],
    },
    BreedProfile {
        breed: "Sahiwal",
        code: "SW",
        confidence: 91.2,
        color: "Reddish Brown",
        horns: "Small",
        milk_type: "Medium Yield",
        weight: "400 kg",
        height: "130 cm",
        age: "3-4 years",
        optimal_mating_time: "15-18 months",
        recommended_partner: "Sahiwal Bull",
        breeding_shelf_life: "10-12 years",
        fertility_status: "High",
        breeding_age: "18 months",
        preventive_measures: &[
            "Regular vaccination",
            "Clean water supply",
            "Heat-resistant shelter",
            "Regular health checkups",
            "Drought-resistant feeding",
        ],
        common_diseases: &[
            "Foot and Mouth Disease",
            "Mastitis",
            "Tick-borne diseases",
            "Heat stress",
        ],
    },
    BreedProfile {
        breed: "Gir",
        code: "GR",
        confidence: 88.9,
        color: "White with Red Spots",
        horns: "Curved",
        milk_type: "High Yield",
        weight: "425 kg",
        height: "135 cm",
        age: "3-4 years",
        optimal_mating_time: "15-20 months",
        recommended_partner: "Gir Bull",
        breeding_shelf_life: "10-12 years",
        fertility_status: "High",
        breeding_age: "18 months",
        preventive_measures: &[
            "Regular vaccination",
            "Clean water supply",
            "Balanced nutrition",
            "Regular health checkups",
            "Proper grooming",
        ],
        common_diseases: &[
            "Foot and Mouth Disease",
            "Mastitis",
            "Brucellosis",
            "Parasitic infections",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTraits {
    pub color: String,
    pub horns: String,
    pub milk_type: String,
    pub weight: String,
    pub height: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanBreeding {
    pub optimal_mating_time: String,
    pub recommended_partner: String,
    pub breeding_shelf_life: String,
    pub fertility_status: String,
    pub breeding_age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHealth {
    pub status: String,
    pub preventive_measures: Vec<String>,
    pub common_diseases: Vec<String>,
}

/// Outcome of an identification: the matched breed, how sure the
/// service is (percent), and a short suggested identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub breed: String,
    pub confidence: f64,
    pub animal_id: String,
    pub traits: ScanTraits,
    pub vaccination_status: String,
    pub insurance_status: String,
    pub breeding: ScanBreeding,
    pub health: ScanHealth,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl BreedProfile {
    pub fn find(breed: &str) -> Option<&'static BreedProfile> {
        PROFILES.iter().find(|p| p.breed.eq_ignore_ascii_case(breed))
    }

    /// Short identifier: breed code plus the last three digits of `epoch_millis`.
    pub fn short_id(&self, epoch_millis: i64) -> String {
        format!("{}{:03}", self.code, epoch_millis.rem_euclid(1000))
    }

    pub fn to_result(&self, epoch_millis: i64) -> ScanResult {
        ScanResult {
            breed: self.breed.to_string(),
            confidence: self.confidence,
            animal_id: self.short_id(epoch_millis),
            traits: ScanTraits {
                color: self.color.to_string(),
                horns: self.horns.to_string(),
                milk_type: self.milk_type.to_string(),
                weight: self.weight.to_string(),
                height: self.height.to_string(),
                age: self.age.to_string(),
            },
            vaccination_status: VACCINATION_UP_TO_DATE.to_string(),
            insurance_status: INSURANCE_ACTIVE.to_string(),
            breeding: ScanBreeding {
                optimal_mating_time: self.optimal_mating_time.to_string(),
                recommended_partner: self.recommended_partner.to_string(),
                breeding_shelf_life: self.breeding_shelf_life.to_string(),
                fertility_status: self.fertility_status.to_string(),
                breeding_age: self.breeding_age.to_string(),
            },
            health: ScanHealth {
                status: "Normal".to_string(),
                preventive_measures: owned(self.preventive_measures),
                common_diseases: owned(self.common_diseases),
            },
        }
    }
}

impl ScanResult {
    /// Registration data for the scanned animal. The store assigns its own
    /// identifiers; the short id suggested by the scan is not kept.
    pub fn into_new_animal(
        self,
        owner: &str,
        milk_yield: f64,
        image: Option<String>,
    ) -> NewAnimal {
        NewAnimal {
            breed: self.breed,
            color: self.traits.color,
            horns: self.traits.horns,
            milk_type: self.traits.milk_type,
            age: self.traits.age,
            owner: owner.to_string(),
            milk_yield: Some(milk_yield),
            image,
            traits: Traits {
                weight: self.traits.weight,
                height: self.traits.height,
                vaccination: self.vaccination_status,
                insurance: self.insurance_status,
            },
            breeding: Breeding {
                optimal_mating_time: self.breeding.optimal_mating_time,
                recommended_partner: self.breeding.recommended_partner,
                breeding_shelf_life: self.breeding.breeding_shelf_life,
                fertility_status: self.breeding.fertility_status,
                breeding_age: self.breeding.breeding_age,
                ..Default::default()
            },
            health: Health {
                status: self.health.status,
                preventive_measures: self.health.preventive_measures,
                ..Default::default()
            },
        }
    }
}
