use crate::FitTrackError;
use crate::timer::{DEFAULT_REST_SECS, RestTimer};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub seed_sample_data: bool,
    pub rest_secs: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, FitTrackError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FitTrackError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let data_dir = get("FITTRACK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./fittrack-data"));
        let seed_sample_data = match get("FITTRACK_SEED_SAMPLE_DATA") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                FitTrackError::Config(format!("FITTRACK_SEED_SAMPLE_DATA: not a boolean: {raw}"))
            })?,
            None => true,
        };
        let rest_secs = match get("FITTRACK_REST_SECONDS") {
            Some(raw) => {
                let secs: u32 = raw.trim().parse().map_err(|_| {
                    FitTrackError::Config(format!("FITTRACK_REST_SECONDS: not a number: {raw}"))
                })?;
                RestTimer::check_custom(secs)
                    .map_err(|e| FitTrackError::Config(format!("FITTRACK_REST_SECONDS: {e}")))?
            }
            None => DEFAULT_REST_SECS,
        };
        Ok(Self {
            data_dir,
            seed_sample_data,
            rest_secs,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.data_dir, PathBuf::from("./fittrack-data"));
        assert!(cfg.seed_sample_data);
        assert_eq!(cfg.rest_secs, 90);
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "FITTRACK_DATA_DIR" => Some("/tmp/ft".into()),
            "FITTRACK_SEED_SAMPLE_DATA" => Some("No".into()),
            "FITTRACK_REST_SECONDS" => Some("120".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/ft"));
        assert!(!cfg.seed_sample_data);
        assert_eq!(cfg.rest_secs, 120);
    }

    #[test]
    fn from_env_rejects_out_of_range_rest() {
        let get = |k: &str| (k == "FITTRACK_REST_SECONDS").then(|| "5".to_string());
        let res = Config::from_env_with(get);
        assert!(matches!(res, Err(FitTrackError::Config(_))));
    }

    #[test]
    fn from_env_rejects_bad_flag() {
        let get = |k: &str| (k == "FITTRACK_SEED_SAMPLE_DATA").then(|| "maybe".to_string());
        assert!(Config::from_env_with(get).is_err());
    }
}
