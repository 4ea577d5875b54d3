use serde::Deserialize;
use std::path::PathBuf;

use crate::dialogue::DialoguePolicy;
use crate::error::AgentError;

pub const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub weather: WeatherSettings,
    pub data: DataSettings,
    pub logic: LogicSettings,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub session_idle_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_idle_secs: 1800,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DataSettings {
    pub preferences_file: PathBuf,
    pub emotions_file: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            preferences_file: PathBuf::from("user_data.json"),
            emotions_file: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogicSettings {
    pub low_confidence_threshold: f32,
    pub max_unknown_turns: u32,
    pub greeting_seed: Option<u64>,
}

impl Default for LogicSettings {
    fn default() -> Self {
        let policy = DialoguePolicy::default();
        Self {
            low_confidence_threshold: policy.low_confidence_threshold,
            max_unknown_turns: policy.max_unknown_turns,
            greeting_seed: None,
        }
    }
}

impl LogicSettings {
    pub fn policy(&self) -> DialoguePolicy {
        DialoguePolicy {
            low_confidence_threshold: self.low_confidence_threshold,
            max_unknown_turns: self.max_unknown_turns,
        }
    }
}

impl Settings {
    /// Reads `<name>.toml` (if present) and overlays `AGENT__SECTION__KEY` environment variables.
    pub fn load(name: &str) -> Result<Self, AgentError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("AGENT").separator("__"))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load("definitely-not-a-config-file").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.weather.base_url, DEFAULT_WEATHER_URL);
        assert_eq!(settings.data.preferences_file, PathBuf::from("user_data.json"));
        assert_eq!(settings.logic.max_unknown_turns, 3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Agent.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[logic]\nmax_unknown_turns = 5").unwrap();

        let name = dir.path().join("Agent");
        let settings = Settings::load(name.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.logic.policy().max_unknown_turns, 5);
        assert!((settings.logic.low_confidence_threshold - 0.8).abs() < f32::EPSILON);
    }
}
