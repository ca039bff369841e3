use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A free-form note attached to a date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Note {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
}

/// The fields of a `Note` that can be changed. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdates {
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub content: Option<String>,
}
