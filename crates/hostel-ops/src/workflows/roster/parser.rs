use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::allocation::domain::{Gender, StudentId, StudentProfile};

use super::RosterImportError;

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Gender")]
    gender: Gender,
    #[serde(rename = "Branch", default)]
    branch: String,
    #[serde(rename = "Year")]
    year: u8,
    #[serde(
        rename = "Preferred Hostel",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    preferred_hostel: Option<String>,
    #[serde(
        rename = "Registered At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    registered_at: Option<String>,
    #[serde(rename = "Discipline Score", default)]
    discipline_score: Option<i32>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<StudentProfile>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut profiles = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let line = index + 2; // header is line 1
        let row = record?;

        let raw_registered = row
            .registered_at
            .as_deref()
            .ok_or_else(|| RosterImportError::Invalid {
                line,
                field: "Registered At",
                value: String::new(),
            })?;
        let registered_at =
            parse_instant(raw_registered).ok_or_else(|| RosterImportError::Invalid {
                line,
                field: "Registered At",
                value: raw_registered.to_string(),
            })?;

        profiles.push(StudentProfile {
            id: StudentId(format!("stu-{:04}", index + 1)),
            name: row.name,
            email: row.email,
            gender: row.gender,
            branch: row.branch,
            year: row.year,
            preferred_hostel: row.preferred_hostel,
            registered_at,
            discipline_score: row.discipline_score.unwrap_or(0),
        });
    }

    Ok(profiles)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive: NaiveDateTime| naive.and_utc());
    }

    None
}
