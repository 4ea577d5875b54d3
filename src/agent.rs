use anyhow::Result;
use std::sync::Arc;

use crate::context::Context;
use crate::conversation::{Intent, IntentClassifier, KeywordIntentRecognizer};
use crate::dialogue::DialogueManager;
use crate::entities::{EntityExtractor, RuleBasedExtractor};
use crate::knowledge;
use crate::preferences::Preferences;
use crate::sentiment::{LexiconSentiment, SentimentClassifier};
use crate::settings::Settings;
use crate::weather::{OpenWeatherClient, WeatherProvider};

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub intent: Intent,
    pub confidence: f32,
    pub response: String,
}

/// Classify, extract, respond: one user turn end to end.
pub struct Agent {
    classifier: Arc<dyn IntentClassifier>,
    extractor: Arc<dyn EntityExtractor>,
    dialogue: DialogueManager,
}

impl Agent {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        extractor: Arc<dyn EntityExtractor>,
        sentiment: Arc<dyn SentimentClassifier>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        let dialogue = DialogueManager::new(weather, extractor.clone(), sentiment);
        Self {
            classifier,
            extractor,
            dialogue,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let weather = OpenWeatherClient::new(&settings.weather)?;
        if settings.weather.api_key.is_empty() {
            log::warn!("No weather API key configured; weather lookups will fail.");
        }
        let sentiment = match &settings.data.emotions_file {
            Some(path) => {
                log::info!("Loading sentiment lexicon from {:?}", path);
                LexiconSentiment::from_file(path)?
            }
            None => LexiconSentiment::default(),
        };

        let policy = settings.logic.policy();
        let seed = settings.logic.greeting_seed;
        let agent = Self::new(
            Arc::new(KeywordIntentRecognizer::default()),
            Arc::new(RuleBasedExtractor::new()),
            Arc::new(sentiment),
            Arc::new(weather),
        )
        .with_dialogue(|dialogue| {
            let dialogue = dialogue.with_policy(policy);
            match seed {
                Some(seed) => dialogue.with_seed(seed),
                None => dialogue,
            }
        });
        Ok(agent)
    }

    pub fn with_dialogue(mut self, configure: impl FnOnce(DialogueManager) -> DialogueManager) -> Self {
        self.dialogue = configure(self.dialogue);
        self
    }

    pub async fn handle_turn(
        &self,
        ctx: &mut Context,
        prefs: &mut Preferences,
        user_text: &str,
    ) -> TurnOutcome {
        let classified = self.classifier.classify(user_text);
        let entities = self.extractor.extract(user_text, classified.intent);
        log::debug!(
            "Turn classified as {} ({:.2}) with {:?}",
            classified.intent,
            classified.confidence,
            entities
        );

        let response = self
            .dialogue
            .respond(
                ctx,
                prefs,
                user_text,
                classified.intent,
                &entities,
                classified.confidence,
            )
            .await;

        TurnOutcome {
            intent: classified.intent,
            confidence: classified.confidence,
            response,
        }
    }

    /// First-time users get the full welcome (and are marked welcomed); others a greeting.
    pub fn opening_message(&self, prefs: &mut Preferences) -> String {
        if !prefs.has_been_welcomed {
            prefs.has_been_welcomed = true;
            knowledge::WELCOME_LINES.join("\n")
        } else {
            format!(
                "{} {}",
                self.dialogue.random_greeting(),
                knowledge::RETURNING_USER_PROMPT
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherResult;

    struct SunnyEverywhere;

    #[async_trait::async_trait]
    impl WeatherProvider for SunnyEverywhere {
        async fn fetch(&self, city: &str) -> WeatherResult {
            WeatherResult {
                city: city.to_string(),
                temperature: "21.0°C".to_string(),
                conditions: "clear sky".to_string(),
            }
        }
    }

    fn agent() -> Agent {
        Agent::new(
            Arc::new(KeywordIntentRecognizer::default()),
            Arc::new(RuleBasedExtractor::new()),
            Arc::new(LexiconSentiment::default()),
            Arc::new(SunnyEverywhere),
        )
        .with_dialogue(|d| d.with_seed(1))
    }

    #[tokio::test]
    async fn weather_conversation_end_to_end() {
        let agent = agent();
        let mut ctx = Context::new();
        let mut prefs = Preferences::default();

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "What's the weather?").await;
        assert_eq!(outcome.intent, Intent::GetWeather);
        assert_eq!(outcome.response, knowledge::WEATHER_PROMPT);

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "Madrid").await;
        assert_eq!(outcome.intent, Intent::Unknown);
        assert_eq!(outcome.response, "Got it, the weather in Madrid is 21.0°C and clear sky.");
    }

    #[tokio::test]
    async fn scheduling_conversation_end_to_end() {
        let agent = agent();
        let mut ctx = Context::new();
        let mut prefs = Preferences::default();

        let outcome = agent
            .handle_turn(&mut ctx, &mut prefs, "Schedule a meeting for tomorrow")
            .await;
        assert_eq!(outcome.response, "Got it for tomorrow. What time should the meeting be?");

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "at 3pm").await;
        assert_eq!(
            outcome.response,
            "I will schedule a meeting for tomorrow at 3pm. Does that sound correct? (Yes/No)"
        );

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "yes").await;
        assert_eq!(outcome.response, "Great! The meeting has been confirmed for tomorrow at 3pm.");
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn preferred_city_is_used_for_weather() {
        let agent = agent();
        let mut ctx = Context::new();
        let mut prefs = Preferences::default();

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "My city is Lisbon").await;
        assert_eq!(outcome.intent, Intent::SetPreferredCity);
        assert_eq!(prefs.preferred_weather_city.as_deref(), Some("Lisbon"));

        let outcome = agent.handle_turn(&mut ctx, &mut prefs, "how's the weather").await;
        assert_eq!(outcome.response, "The current weather in Lisbon is 21.0°C and clear sky.");
    }

    #[test]
    fn first_opening_welcomes_and_marks_user() {
        let agent = agent();
        let mut prefs = Preferences::default();

        let first = agent.opening_message(&mut prefs);
        assert!(first.starts_with("Hello! I'm your AI Assistant Prototype."));
        assert!(prefs.has_been_welcomed);

        let second = agent.opening_message(&mut prefs);
        assert!(second.ends_with(knowledge::RETURNING_USER_PROMPT));
        assert!(knowledge::GREETINGS.iter().any(|g| second.starts_with(g)));
    }
}
