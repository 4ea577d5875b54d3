use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::conversation::Intent;

/// Slots pulled out of a single utterance, as free text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Entities {
    pub fn city(&self) -> Option<&str> {
        present(&self.city)
    }

    pub fn date(&self) -> Option<&str> {
        present(&self.date)
    }

    pub fn time(&self) -> Option<&str> {
        present(&self.time)
    }

    pub fn is_empty(&self) -> bool {
        self.city().is_none() && self.date().is_none() && self.time().is_none()
    }
}

fn present(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub trait EntityExtractor: Send + Sync {
    /// `hint` selects which slots are looked for.
    fn extract(&self, text: &str, hint: Intent) -> Entities;
}

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static CITY_AFTER_PREPOSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?i:in|for|at|to|is|of)\s+([A-Z][\p{L}'.-]*(?:\s+[A-Z][\p{L}'.-]*){0,2})")
        .expect("valid city regex")
});

static BARE_CITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][\p{L}'.-]*(?:\s+[A-Z][\p{L}'.-]*){0,2})$").expect("valid bare city regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b(day after tomorrow|today|tomorrow|(?:this |next )?(?:{w})|next week|(?:{m})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{m})|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}/\d{{1,2}}(?:/\d{{2,4}})?)\b",
        w = WEEKDAYS,
        m = MONTHS
    );
    Regex::new(&pattern).expect("valid date regex")
});

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}(?::\d{2})?\s?(?:am\b|pm\b|a\.m\.|p\.m\.)|\d{1,2}:\d{2}|noon|midnight|tonight|(?:in the )?(?:morning|afternoon|evening))",
    )
    .expect("valid time regex")
});

/// Words that look like proper nouns at the start of a reply but are never cities.
const NOT_A_CITY: &[&str] = &[
    "I", "Yes", "No", "Ok", "Okay", "The", "What", "How", "Please", "Thanks", "Today", "Tomorrow",
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Pattern based extraction, good enough for the command line and web front ends.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    pub fn new() -> Self {
        Self
    }

    fn city(text: &str) -> Option<String> {
        let trimmed = text.trim().trim_end_matches(|c: char| c.is_ascii_punctuation());
        let candidate = CITY_AFTER_PREPOSITION
            .captures_iter(trimmed)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .find(|c| !is_excluded(c))
            .or_else(|| {
                BARE_CITY
                    .captures(trimmed)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str())
                    .filter(|c| !is_excluded(c))
            })?;
        Some(candidate.trim_end_matches(['.', '\'', '-']).to_string())
    }

    fn date(text: &str) -> Option<String> {
        DATE.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn time(text: &str) -> Option<String> {
        TIME.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

fn is_excluded(candidate: &str) -> bool {
    let first = candidate.split_whitespace().next().unwrap_or_default();
    NOT_A_CITY.iter().any(|w| w.eq_ignore_ascii_case(first))
}

impl EntityExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str, hint: Intent) -> Entities {
        match hint {
            Intent::GetWeather | Intent::SetPreferredCity => Entities {
                city: Self::city(text),
                ..Default::default()
            },
            Intent::ScheduleMeeting => Entities {
                date: Self::date(text),
                time: Self::time(text),
                ..Default::default()
            },
            _ => Entities::default(),
        }
    }
}
