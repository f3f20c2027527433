//! Serde helpers for human-readable durations in configuration files.
//!
//! A duration is either whole seconds (`timeout = 10`) or a humantime
//! string (`timeout = "1m 30s"`).

use serde::{Deserialize, Deserializer, Serializer, de};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

impl RawDuration {
    fn into_duration<E: de::Error>(self) -> Result<Duration, E> {
        match self {
            Self::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
            Self::Text(text) => humantime::parse_duration(&text)
                .map_err(|e| E::custom(format!("Invalid duration '{text}': {e}"))),
        }
    }
}

/// `Option<Duration>` fields; absent or `null` means unset
pub mod option_duration {
    use super::*;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawDuration>::deserialize(deserializer)?
            .map(RawDuration::into_duration)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Section {
        #[serde(default, with = "option_duration")]
        timeout: Option<Duration>,
    }

    fn parse(toml_text: &str) -> Result<Section, toml::de::Error> {
        toml::from_str(toml_text)
    }

    #[test]
    fn test_seconds_and_humantime() {
        assert_eq!(parse("timeout = 10").unwrap().timeout, Some(Duration::from_secs(10)));
        assert_eq!(parse("timeout = \"1m 30s\"").unwrap().timeout, Some(Duration::from_secs(90)));
        assert_eq!(parse("").unwrap().timeout, None);
    }

    #[test]
    fn test_invalid_durations_rejected() {
        assert!(parse("timeout = \"soon\"").is_err());
        assert!(parse("timeout = -5").is_err());
    }
}
