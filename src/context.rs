use serde::{Deserialize, Serialize};

/// Action waiting for a yes/no from the user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    ScheduleMeeting,
}

/// Per-conversation state. A fresh value is the start-of-conversation state.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub unknown_count: u32,
    pub awaiting_confirmation: Option<PendingAction>,
    pub pending_schedule_date: Option<String>,
    pub pending_schedule_time: Option<String>,
    pub meeting_date: Option<String>,
    pub meeting_time: Option<String>,
    pub awaiting_meeting_details: bool,
    pub awaiting_city_for_weather: bool,
    pub awaiting_preferred_city: bool,
    pub last_weather_city: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Records a meeting proposal that now waits for confirmation.
    pub fn propose_meeting(&mut self, date: &str, time: &str) {
        self.awaiting_confirmation = Some(PendingAction::ScheduleMeeting);
        self.pending_schedule_date = Some(date.to_string());
        self.pending_schedule_time = Some(time.to_string());
    }
}
