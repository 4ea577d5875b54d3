use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// The set of user goals the dialogue manager knows how to route.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    GetWeather,
    ScheduleMeeting,
    Greet,
    ThankYou,
    Exit,
    AboutAgent,
    AgentCapabilities,
    GetCurrentYear,
    Help,
    SetPreferredCity,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::GetWeather => "get_weather",
            Intent::ScheduleMeeting => "schedule_meeting",
            Intent::Greet => "greet",
            Intent::ThankYou => "thank_you",
            Intent::Exit => "exit",
            Intent::AboutAgent => "about_agent",
            Intent::AgentCapabilities => "agent_capabilities",
            Intent::GetCurrentYear => "get_current_year",
            Intent::Help => "help",
            Intent::SetPreferredCity => "set_preferred_city",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = std::convert::Infallible;

    /// Names outside the known set map to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "get_weather" => Intent::GetWeather,
            "schedule_meeting" => Intent::ScheduleMeeting,
            "greet" => Intent::Greet,
            "thank_you" => Intent::ThankYou,
            "exit" => Intent::Exit,
            "about_agent" => Intent::AboutAgent,
            "agent_capabilities" => Intent::AgentCapabilities,
            "get_current_year" => Intent::GetCurrentYear,
            "help" => Intent::Help,
            "set_preferred_city" => Intent::SetPreferredCity,
            _ => Intent::Unknown,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedIntent {
    pub intent: Intent,
    pub confidence: f32,
}

pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> ClassifiedIntent;
}

const MATCHED_CONFIDENCE: f32 = 1.0;
const UNMATCHED_CONFIDENCE: f32 = 0.5;

/// Ordered keyword table; the first intent with a matching keyword wins.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::GetWeather,
        &["weather", "forecast", "raining", "sunny", "temperature"],
    ),
    (
        Intent::ScheduleMeeting,
        &["schedule", "meeting", "appointment", "calendar", "book"],
    ),
    (Intent::Greet, &["hello", "hi", "hey", "greetings"]),
    (Intent::ThankYou, &["thank you", "thanks", "appreciate"]),
    (Intent::Exit, &["bye", "exit", "quit", "goodbye"]),
    (
        Intent::AboutAgent,
        &["who are you", "what are you", "your name"],
    ),
    (Intent::AgentCapabilities, &["what can you do", "help me"]),
    (
        Intent::GetCurrentYear,
        &["what year is it", "current year", "year now"],
    ),
    (Intent::Help, &["help", "what can i ask", "guide me"]),
    (
        Intent::SetPreferredCity,
        &["set my city", "my city is", "remember my city"],
    ),
];

#[derive(Debug, Clone)]
pub struct KeywordIntentRecognizer {
    table: Vec<(Intent, Vec<String>)>,
}

impl Default for KeywordIntentRecognizer {
    fn default() -> Self {
        let table = INTENT_KEYWORDS
            .iter()
            .map(|(intent, keywords)| (*intent, keywords.iter().map(|k| normalize(k)).collect()))
            .collect();
        Self { table }
    }
}

impl IntentClassifier for KeywordIntentRecognizer {
    fn classify(&self, text: &str) -> ClassifiedIntent {
        let padded = normalize(text);
        for (intent, keywords) in &self.table {
            // Keywords are matched as whole words, padded on both sides.
            if keywords.iter().any(|k| padded.contains(k.as_str())) {
                return ClassifiedIntent {
                    intent: *intent,
                    confidence: MATCHED_CONFIDENCE,
                };
            }
        }
        ClassifiedIntent {
            intent: Intent::Unknown,
            confidence: UNMATCHED_CONFIDENCE,
        }
    }
}

/// Lowercases, turns punctuation into spaces and pads with a space on each side.
fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    format!(" {} ", words.join(" "))
}
