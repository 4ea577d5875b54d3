// Fixed texts the agent speaks.

pub const AGENT_NAME: &str = "AI Assistant Prototype";
pub const AGENT_PURPOSE: &str =
    "I am designed to help with basic tasks like weather information and scheduling.";
pub const DEVELOPER_INFO: &str = "I was created as an internship project following the Accelerate Career Accelerator Program guide.";

pub const GREETINGS: [&str; 4] = [
    "Hello there! How can I assist you today?",
    "Hi! What can I do for you?",
    "Greetings! How may I help you today?",
    "Hey! Nice to hear from you. What's up?",
];

pub const UNKNOWN_RESPONSE: &str = "I'm not sure how to help with that yet. You can ask me about the weather, scheduling, or general info about myself. Try saying 'help' for a list of things I can do.";
pub const LOW_CONFIDENCE_RESPONSE: &str = "I'm having a bit of trouble understanding that request. Could you try rephrasing it, or type 'help' for things I can do?";
pub const ESCALATION_PREFIX: &str = "It seems I'm having a lot of trouble understanding you. Perhaps you could try asking one of my main capabilities?";
pub const API_ERROR_MESSAGE: &str =
    "I'm having trouble connecting to the external service right now. Please try again later.";
pub const THANK_YOU_RESPONSE: &str = "You're welcome! Is there anything else I can do?";
pub const GOODBYE_RESPONSE: &str = "Goodbye! Have a great day.";
pub const WEATHER_PROMPT: &str = "Sure, what city would you like the weather for?";
pub const WEATHER_CITY_REPROMPT: &str = "Could you please specify the city for the weather?";
pub const SCHEDULING_PROMPT: &str =
    "I can help with that. What is the proposed date and time for the meeting?";
pub const HELP_RESPONSE: &str = "I can help you with weather updates, scheduling meetings, and answering general questions about myself. Try asking 'What's the weather in London?' or 'Schedule a meeting for tomorrow.' You can also ask 'who are you?'";
pub const SET_PREFERRED_CITY_PROMPT: &str =
    "What city would you like to set as your preferred weather city?";
pub const PREFERRED_CITY_REPROMPT: &str =
    "I didn't catch a city. What city would you like to set as your preferred weather city?";
pub const REASSURANCE_RESPONSE: &str = "I understand you might be feeling frustrated, but I'm here to help. What can I do for you?";
pub const CAPABILITIES_SUFFIX: &str =
    "I can also recognize greetings and thank yous, and tell you the current year!";

pub const GREETING_POSITIVE_ADDENDUM: &str = "It's great to hear from you!";
pub const THANKS_POSITIVE_ADDENDUM: &str = "Glad I could help!";
pub const THANKS_NEGATIVE_ADDENDUM: &str = "I hope everything else is okay.";

pub const CONFIRMATION_REPROMPT: &str =
    "I'm still waiting for your confirmation (Yes/No) for the meeting. Or do you want to cancel?";
pub const MEETING_CANCELLED: &str =
    "Okay, I've cancelled that scheduling request. Is there something else I can help with?";

pub const WELCOME_LINES: [&str; 4] = [
    "Hello! I'm your AI Assistant Prototype. I'm here to help you with some tasks.",
    "I can get you weather updates, help schedule meetings, and answer some general questions about myself.",
    "Type 'help' if you want to see a list of things I can do.",
    "Let's get started!",
];
pub const RETURNING_USER_PROMPT: &str = "What can I do for you today? (Type 'help' for options)";

pub const AFFIRMATIVE_TOKENS: [&str; 3] = ["yes", "yup", "confirm"];
pub const NEGATIVE_TOKENS: [&str; 3] = ["no", "nope", "cancel"];

pub fn escalation_response() -> String {
    format!("{} {}", ESCALATION_PREFIX, HELP_RESPONSE)
}

pub fn about_agent() -> String {
    format!("{}. {} {}", AGENT_NAME, AGENT_PURPOSE, DEVELOPER_INFO)
}

pub fn capabilities() -> String {
    format!("{} {}", AGENT_PURPOSE, CAPABILITIES_SUFFIX)
}

pub fn current_year(year: i32) -> String {
    format!("The current year is {}.", year)
}

pub fn preferred_city_set(city: &str) -> String {
    format!("Okay, I've set your preferred weather city to {}.", city)
}

pub fn weather_report(city: &str, temperature: &str, conditions: &str) -> String {
    format!(
        "The current weather in {} is {} and {}.",
        city, temperature, conditions
    )
}

pub fn weather_report_followup(city: &str, temperature: &str, conditions: &str) -> String {
    format!("Got it, the weather in {} is {} and {}.", city, temperature, conditions)
}

pub fn weather_unknown_city(city: &str) -> String {
    format!(
        "Sorry, I couldn't get the weather for {}. Is there another city you'd like to check?",
        city
    )
}

pub fn meeting_proposal(date: &str, time: &str) -> String {
    format!(
        "I will schedule a meeting for {} at {}. Does that sound correct? (Yes/No)",
        date, time
    )
}

pub fn meeting_confirmed(date: &str, time: &str) -> String {
    format!("Great! The meeting has been confirmed for {} at {}.", date, time)
}

pub fn meeting_needs_time(date: &str) -> String {
    format!("Got it for {}. What time should the meeting be?", date)
}

pub fn meeting_needs_date(time: &str) -> String {
    format!("Got it for {}. What date would the meeting be on?", time)
}

pub fn meeting_still_missing(missing: &[&str]) -> String {
    format!("I still need the {} for the meeting. What is it?", missing.join(" and "))
}
