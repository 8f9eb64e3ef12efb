use std::fmt;

use serde::{Deserialize, Serialize};

/// Which listing table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Highest-grossing")]
    HighestGrossing,
    #[serde(rename = "Notable release")]
    NotableRelease,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::HighestGrossing => "Highest-grossing",
            Section::NotableRelease => "Notable release",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub title: String,
    pub year: u16,
    pub budget_raw: Option<String>,
    pub box_office_raw: Option<String>,
    pub release_date: Option<String>,
    pub section: Section,
    pub image: Option<String>,
}

pub const COLUMNS: [&str; 7] = [
    "title",
    "year",
    "budget_raw",
    "box_office_raw",
    "release_date",
    "section",
    "image",
];
