use crate::calendar::WeekStart;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/habits.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub week_start: WeekStart,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let week_start = match lookup("WEEK_START") {
            None => WeekStart::default(),
            Some(value) => WeekStart::parse(&value).unwrap_or_else(|| {
                warn!("unknown WEEK_START {value:?}, using sunday");
                WeekStart::default()
            }),
        };

        Self {
            data_path,
            port,
            week_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("data/habits.json"));
        assert_eq!(cfg.week_start, WeekStart::Sunday);
    }

    #[test]
    fn overrides_and_fallbacks() {
        let cfg = config(&[
            ("APP_DATA_PATH", "/tmp/h.json"),
            ("PORT", "9000"),
            ("WEEK_START", "monday"),
        ]);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/h.json"));
        assert_eq!(cfg.week_start, WeekStart::Monday);

        let cfg = config(&[("PORT", "not-a-port"), ("WEEK_START", "someday")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.week_start, WeekStart::Sunday);
    }
}
