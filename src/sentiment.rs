use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Sentiment;
}

#[derive(Deserialize)]
struct EmotionData {
    emotions: HashMap<String, Vec<String>>,
}

const BUILTIN_EMOTIONS: &[(&str, &[&str])] = &[
    (
        "joy",
        &[
            "good", "great", "awesome", "amazing", "excellent", "fantastic", "wonderful", "love",
            "happy", "glad", "nice", "perfect", "cool", "brilliant", "super", "pleased", "lovely",
            "thanks", "appreciate", "helpful", "best",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "unhappy", "disappointed", "sorry", "miss", "lonely", "tired", "upset",
            "depressed", "unfortunately",
        ],
    ),
    (
        "anger",
        &[
            "angry", "annoyed", "annoying", "frustrated", "frustrating", "hate", "terrible",
            "awful", "useless", "stupid", "bad", "worst", "broken", "ridiculous", "confused",
        ],
    ),
];

/// Word lexicon: joy words count positive, sadness and anger words negative.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    emotions_map: HashMap<String, String>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        let mut emotions_map = HashMap::new();
        for (emotion, words) in BUILTIN_EMOTIONS {
            for word in *words {
                emotions_map.insert(word.to_string(), emotion.to_string());
            }
        }
        Self { emotions_map }
    }
}

impl LexiconSentiment {
    /// Loads `{"emotions": {"joy": [...], "sadness": [...], "anger": [...]}}`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_to_string(path)?;
        let data: EmotionData = serde_json::from_str(&content)?;
        let mut emotions_map = HashMap::new();
        for (emotion, words) in data.emotions {
            for word in words {
                emotions_map.insert(word.to_lowercase(), emotion.clone());
            }
        }
        Ok(Self { emotions_map })
    }
}

impl SentimentClassifier for LexiconSentiment {
    fn classify(&self, text: &str) -> Sentiment {
        let (mut positive, mut negative) = (0usize, 0usize);
        for word in text.split_whitespace() {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            match self.emotions_map.get(&word).map(String::as_str) {
                Some("joy") => positive += 1,
                Some("sadness") | Some("anger") => negative += 1,
                _ => {}
            }
        }
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}
