use serde::{Deserialize, Deserializer, de};

/// Accepts `true/false/1/0/yes/no/on/off` in any case; empty means false.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid boolean '{raw}', expected true/false/1/0/yes/no/on/off"
        ))
    })
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub download: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub as_ndjson: bool,
}
