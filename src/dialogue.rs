//! Dialogue state machine.
//!
//! [`DialogueManager::respond`] decides what to say for one turn and updates the
//! conversation [`Context`] and the user's [`Preferences`]. Turn order:
//!
//! 1. a pending meeting confirmation consumes the turn (yes / no / re-ask);
//! 2. unknown intents update the misunderstanding counter and pick a default reply;
//! 3. known intents are dispatched;
//! 4. unknown intents may still resolve an open slot prompt (city, meeting details).

use chrono::Datelike;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

use crate::context::{Context, PendingAction};
use crate::conversation::Intent;
use crate::entities::{Entities, EntityExtractor};
use crate::knowledge;
use crate::preferences::Preferences;
use crate::sentiment::{Sentiment, SentimentClassifier};
use crate::weather::{WeatherProvider, WeatherResult, WeatherStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialoguePolicy {
    /// Below this, an unknown intent is treated as a misunderstanding.
    pub low_confidence_threshold: f32,
    /// Misunderstandings in a row before the full help text is shown.
    pub max_unknown_turns: u32,
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.8,
            max_unknown_turns: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmationReply {
    Affirm,
    Deny,
    Unclear,
}

/// Substring match; affirmative tokens are checked first.
fn parse_confirmation(text: &str) -> ConfirmationReply {
    let lower = text.to_lowercase();
    if knowledge::AFFIRMATIVE_TOKENS.iter().any(|t| lower.contains(t)) {
        ConfirmationReply::Affirm
    } else if knowledge::NEGATIVE_TOKENS.iter().any(|t| lower.contains(t)) {
        ConfirmationReply::Deny
    } else {
        ConfirmationReply::Unclear
    }
}

// Which phrasing to use when a weather lookup succeeds.
#[derive(Clone, Copy)]
enum WeatherPhrasing {
    Direct,
    FollowUp,
}

pub struct DialogueManager {
    weather: Arc<dyn WeatherProvider>,
    extractor: Arc<dyn EntityExtractor>,
    sentiment: Arc<dyn SentimentClassifier>,
    policy: DialoguePolicy,
    rng: Mutex<StdRng>,
    current_year: i32,
}

impl DialogueManager {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        extractor: Arc<dyn EntityExtractor>,
        sentiment: Arc<dyn SentimentClassifier>,
    ) -> Self {
        Self {
            weather,
            extractor,
            sentiment,
            policy: DialoguePolicy::default(),
            rng: Mutex::new(StdRng::from_entropy()),
            current_year: chrono::Local::now().year(),
        }
    }

    pub fn with_policy(mut self, policy: DialoguePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn policy(&self) -> &DialoguePolicy {
        &self.policy
    }

    pub fn random_greeting(&self) -> &'static str {
        let mut rng = self.rng.lock();
        knowledge::GREETINGS
            .choose(&mut *rng)
            .copied()
            .unwrap_or(knowledge::GREETINGS[0])
    }

    pub async fn respond(
        &self,
        ctx: &mut Context,
        prefs: &mut Preferences,
        user_text: &str,
        intent: Intent,
        entities: &Entities,
        confidence: f32,
    ) -> String {
        if ctx.awaiting_confirmation == Some(PendingAction::ScheduleMeeting) {
            return Self::resolve_confirmation(ctx, user_text);
        }

        if intent != Intent::Unknown {
            ctx.unknown_count = 0;
        }
        let sentiment = self.sentiment.classify(user_text);
        log::debug!("Dispatching {} (sentiment {:?})", intent, sentiment);

        match intent {
            Intent::Unknown => {
                let default_reply = self.note_unresolved_turn(ctx, confidence);
                self.resume_open_prompt(ctx, prefs, user_text)
                    .await
                    .unwrap_or(default_reply)
            }
            Intent::GetWeather => {
                let city = entities
                    .city()
                    .map(str::to_string)
                    .or_else(|| ctx.last_weather_city.clone())
                    .or_else(|| prefs.preferred_city().map(str::to_string));
                match city {
                    Some(city) => {
                        self.report_weather(ctx, &city, WeatherPhrasing::Direct)
                            .await
                    }
                    None => {
                        ctx.awaiting_city_for_weather = true;
                        knowledge::WEATHER_PROMPT.to_string()
                    }
                }
            }
            Intent::ScheduleMeeting => {
                if let Some(date) = entities.date() {
                    ctx.meeting_date = Some(date.to_string());
                }
                if let Some(time) = entities.time() {
                    ctx.meeting_time = Some(time.to_string());
                }
                match (ctx.meeting_date.clone(), ctx.meeting_time.clone()) {
                    (Some(date), Some(time)) => {
                        ctx.propose_meeting(&date, &time);
                        knowledge::meeting_proposal(&date, &time)
                    }
                    (Some(date), None) => {
                        ctx.awaiting_meeting_details = true;
                        knowledge::meeting_needs_time(&date)
                    }
                    (None, Some(time)) => {
                        ctx.awaiting_meeting_details = true;
                        knowledge::meeting_needs_date(&time)
                    }
                    (None, None) => {
                        ctx.awaiting_meeting_details = true;
                        knowledge::SCHEDULING_PROMPT.to_string()
                    }
                }
            }
            Intent::Greet => {
                let mut reply = self.random_greeting().to_string();
                if sentiment == Sentiment::Positive {
                    reply.push(' ');
                    reply.push_str(knowledge::GREETING_POSITIVE_ADDENDUM);
                }
                ctx.reset();
                reply
            }
            Intent::ThankYou => {
                let addendum = match sentiment {
                    Sentiment::Positive => Some(knowledge::THANKS_POSITIVE_ADDENDUM),
                    Sentiment::Negative => Some(knowledge::THANKS_NEGATIVE_ADDENDUM),
                    Sentiment::Neutral => None,
                };
                match addendum {
                    Some(extra) => format!("{} {}", knowledge::THANK_YOU_RESPONSE, extra),
                    None => knowledge::THANK_YOU_RESPONSE.to_string(),
                }
            }
            Intent::Exit => {
                ctx.reset();
                knowledge::GOODBYE_RESPONSE.to_string()
            }
            Intent::AboutAgent => knowledge::about_agent(),
            Intent::AgentCapabilities => knowledge::capabilities(),
            Intent::GetCurrentYear => knowledge::current_year(self.current_year),
            Intent::Help => {
                ctx.reset();
                if sentiment == Sentiment::Negative {
                    format!("{} {}", knowledge::REASSURANCE_RESPONSE, knowledge::HELP_RESPONSE)
                } else {
                    knowledge::HELP_RESPONSE.to_string()
                }
            }
            Intent::SetPreferredCity => match entities.city() {
                Some(city) => {
                    prefs.preferred_weather_city = Some(city.to_string());
                    ctx.awaiting_preferred_city = false;
                    knowledge::preferred_city_set(city)
                }
                None => {
                    ctx.awaiting_preferred_city = true;
                    knowledge::SET_PREFERRED_CITY_PROMPT.to_string()
                }
            },
        }
    }

    fn resolve_confirmation(ctx: &mut Context, user_text: &str) -> String {
        match parse_confirmation(user_text) {
            ConfirmationReply::Affirm => {
                let date = ctx.pending_schedule_date.take().unwrap_or_default();
                let time = ctx.pending_schedule_time.take().unwrap_or_default();
                ctx.reset();
                log::info!("Meeting confirmed for {} at {}", date, time);
                knowledge::meeting_confirmed(&date, &time)
            }
            ConfirmationReply::Deny => {
                ctx.reset();
                knowledge::MEETING_CANCELLED.to_string()
            }
            ConfirmationReply::Unclear => knowledge::CONFIRMATION_REPROMPT.to_string(),
        }
    }

    /// Bumps the misunderstanding counter and returns the default reply.
    fn note_unresolved_turn(&self, ctx: &mut Context, confidence: f32) -> String {
        ctx.unknown_count += 1;
        if confidence >= self.policy.low_confidence_threshold {
            return knowledge::UNKNOWN_RESPONSE.to_string();
        }
        if ctx.unknown_count < self.policy.max_unknown_turns {
            knowledge::LOW_CONFIDENCE_RESPONSE.to_string()
        } else {
            log::info!(
                "{} misunderstood turns in a row, showing help",
                ctx.unknown_count
            );
            ctx.reset();
            knowledge::escalation_response()
        }
    }

    /// Reads an unclassified reply as the answer to the prompt still open in `ctx`.
    async fn resume_open_prompt(
        &self,
        ctx: &mut Context,
        prefs: &mut Preferences,
        user_text: &str,
    ) -> Option<String> {
        if ctx.awaiting_city_for_weather {
            let found = self.extractor.extract(user_text, Intent::GetWeather);
            let Some(city) = found.city() else {
                return Some(knowledge::WEATHER_CITY_REPROMPT.to_string());
            };
            ctx.awaiting_city_for_weather = false;
            ctx.unknown_count = 0;
            return Some(
                self.report_weather(ctx, city, WeatherPhrasing::FollowUp)
                    .await,
            );
        }

        if ctx.awaiting_preferred_city {
            let found = self.extractor.extract(user_text, Intent::SetPreferredCity);
            let Some(city) = found.city() else {
                return Some(knowledge::PREFERRED_CITY_REPROMPT.to_string());
            };
            prefs.preferred_weather_city = Some(city.to_string());
            ctx.awaiting_preferred_city = false;
            ctx.unknown_count = 0;
            return Some(knowledge::preferred_city_set(city));
        }

        if ctx.awaiting_meeting_details {
            let found = self.extractor.extract(user_text, Intent::ScheduleMeeting);
            let date = found.date().map(str::to_string).or_else(|| ctx.meeting_date.clone());
            let time = found.time().map(str::to_string).or_else(|| ctx.meeting_time.clone());
            ctx.unknown_count = 0;
            if let (Some(date), Some(time)) = (&date, &time) {
                ctx.propose_meeting(date, time);
                return Some(knowledge::meeting_proposal(date, time));
            }
            let mut missing = Vec::new();
            if date.is_none() {
                missing.push("date");
            }
            if time.is_none() {
                missing.push("time");
            }
            ctx.meeting_date = date;
            ctx.meeting_time = time;
            return Some(knowledge::meeting_still_missing(&missing));
        }

        None
    }

    async fn report_weather(&self, ctx: &mut Context, city: &str, phrasing: WeatherPhrasing) -> String {
        let result: WeatherResult = self.weather.fetch(city).await;
        match result.status() {
            WeatherStatus::Available => {
                ctx.last_weather_city = Some(result.city.clone());
                ctx.awaiting_city_for_weather = false;
                match phrasing {
                    WeatherPhrasing::Direct => knowledge::weather_report(
                        &result.city,
                        &result.temperature,
                        &result.conditions,
                    ),
                    WeatherPhrasing::FollowUp => knowledge::weather_report_followup(
                        &result.city,
                        &result.temperature,
                        &result.conditions,
                    ),
                }
            }
            WeatherStatus::ServiceError => knowledge::API_ERROR_MESSAGE.to_string(),
            WeatherStatus::UnknownCity => knowledge::weather_unknown_city(&result.city),
        }
    }
}
