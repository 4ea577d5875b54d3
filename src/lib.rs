//! Rule-driven conversational agent: weather lookups, meeting scheduling with
//! confirmation, and a remembered preferred city.

pub mod agent;
pub mod context;
pub mod conversation;
pub mod dialogue;
pub mod entities;
pub mod error;
pub mod knowledge;
pub mod preferences;
pub mod sentiment;
pub mod session;
pub mod settings;
pub mod weather;
pub mod web;

pub use agent::{Agent, TurnOutcome};
pub use context::{Context, PendingAction};
pub use conversation::{ClassifiedIntent, Intent, IntentClassifier, KeywordIntentRecognizer};
pub use dialogue::{DialogueManager, DialoguePolicy};
pub use entities::{Entities, EntityExtractor, RuleBasedExtractor};
pub use error::AgentError;
pub use preferences::{PreferenceStore, Preferences};
pub use sentiment::{LexiconSentiment, Sentiment, SentimentClassifier};
pub use settings::Settings;
pub use weather::{OpenWeatherClient, WeatherProvider, WeatherResult, WeatherStatus};
