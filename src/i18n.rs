//! Languages

use std::str::FromStr;

use jiff::civil::Weekday;
use serde::{Deserialize, Serialize};

/// Customer-facing language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hebrew
    #[default]
    He,

    /// French
    Fr,
}

impl Language {
    /// Weekday name in this language.
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        match (self, weekday) {
            (Self::He, Weekday::Sunday) => "ראשון",
            (Self::He, Weekday::Monday) => "שני",
            (Self::He, Weekday::Tuesday) => "שלישי",
            (Self::He, Weekday::Wednesday) => "רביעי",
            (Self::He, Weekday::Thursday) => "חמישי",
            (Self::He, Weekday::Friday) => "שישי",
            (Self::He, Weekday::Saturday) => "שבת",
            (Self::Fr, Weekday::Sunday) => "Dimanche",
            (Self::Fr, Weekday::Monday) => "Lundi",
            (Self::Fr, Weekday::Tuesday) => "Mardi",
            (Self::Fr, Weekday::Wednesday) => "Mercredi",
            (Self::Fr, Weekday::Thursday) => "Jeudi",
            (Self::Fr, Weekday::Friday) => "Vendredi",
            (Self::Fr, Weekday::Saturday) => "Samedi",
        }
    }

    /// Pick between a Hebrew and a French string, falling back to the other when blank.
    pub fn pick<'s>(self, he: &'s str, fr: &'s str) -> &'s str {
        let (preferred, fallback) = match self {
            Self::He => (he, fr),
            Self::Fr => (fr, he),
        };

        if preferred.trim().is_empty() {
            fallback
        } else {
            preferred
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "he" => Ok(Self::He),
            "fr" => Ok(Self::Fr),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}
