//! CSV exports of the records and milk views.

use chrono::NaiveDate;

use crate::animal::Animal;
use crate::error::StorageError;

const RECORDS_HEADER: [&str; 7] = [
    "Animal ID",
    "Breed",
    "Color",
    "Age",
    "Owner",
    "Milk Yield (L)",
    "Last Updated",
];

const MILK_HEADER: [&str; 4] = ["Animal ID", "Breed", "Daily Milk (L)", "Status"];

/// Download name for the records export, e.g. `animal-records-2024-03-01.csv`.
pub fn records_file_name(today: NaiveDate) -> String {
    format!("animal-records-{}.csv", today.format("%Y-%m-%d"))
}

/// Download name for the milk export, e.g. `milk-data-2024-03-01.csv`.
pub fn milk_file_name(today: NaiveDate) -> String {
    format!("milk-data-{}.csv", today.format("%Y-%m-%d"))
}

fn write_rows<I>(header: &[&str], rows: I) -> Result<String, StorageError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(header)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Flattened records table, header first, one animal per line.
/// Missing yields are written as an empty cell.
pub fn records_csv(animals: &[Animal]) -> Result<String, StorageError> {
    write_rows(
        &RECORDS_HEADER,
        animals.iter().map(|a| {
            vec![
                a.animal_id.clone(),
                a.breed.clone(),
                a.color.clone(),
                a.age.clone(),
                a.owner.clone(),
                a.milk_yield.map(|y| y.to_string()).unwrap_or_default(),
                a.last_updated.date_naive().format("%Y-%m-%d").to_string(),
            ]
        }),
    )
}

/// Milk table: yield (missing as 0) and health status (missing as "Normal").
pub fn milk_csv(animals: &[Animal]) -> Result<String, StorageError> {
    write_rows(
        &MILK_HEADER,
        animals.iter().map(|a| {
            let status = if a.health.status.is_empty() {
                "Normal".to_string()
            } else {
                a.health.status.clone()
            };
            vec![
                a.animal_id.clone(),
                a.breed.clone(),
                a.yield_or_zero().to_string(),
                status,
            ]
        }),
    )
}
