use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    /// JSON reference data; the built-in seed set is used when unset
    pub leave_data_path: Option<PathBuf>,

    // EmailJS
    pub emailjs_endpoint: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
    pub emailjs_private_key: Option<String>,

    /// chrono format used for dates in outgoing emails
    pub display_date_format: String,
    /// where the client goes after a successful submit
    pub list_view_path: String,

    // Rate limiting
    pub rate_submit_per_min: u32,
    pub rate_read_per_min: u32,

    pub log_dir: String,
}

impl Config {
    /// Reads the process env; `main` loads `.env` first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| anyhow!("{key} must be set"));
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let display_date_format = or_default("DISPLAY_DATE_FORMAT", "%-m/%-d/%Y");
        // time/offset specifiers parse fine but fail when applied to a date
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::default().format(&display_date_format)).is_err() {
            bail!("DISPLAY_DATE_FORMAT `{display_date_format}` is not a valid date format");
        }

        Ok(Self {
            server_addr: or_default("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: or_default("API_PREFIX", "/api"),
            leave_data_path: var("LEAVE_DATA_PATH").map(PathBuf::from),

            emailjs_endpoint: or_default(
                "EMAILJS_ENDPOINT",
                "https://api.emailjs.com/api/v1.0/email/send",
            ),
            emailjs_service_id: required("EMAILJS_SERVICE_ID")?,
            emailjs_template_id: required("EMAILJS_TEMPLATE_ID")?,
            emailjs_public_key: required("EMAILJS_PUBLIC_KEY")?,
            emailjs_private_key: var("EMAILJS_PRIVATE_KEY"),

            display_date_format,
            list_view_path: or_default("LIST_VIEW_PATH", "/leaveHome"),

            rate_submit_per_min: parse_or(&var, "RATE_SUBMIT_PER_MIN", 30)?,
            rate_read_per_min: parse_or(&var, "RATE_READ_PER_MIN", 600)?,

            log_dir: or_default("LOG_DIR", "logs"),
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value `{raw}`")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut map: HashMap<String, String> = [
            ("EMAILJS_SERVICE_ID", "service_x"),
            ("EMAILJS_TEMPLATE_ID", "template_x"),
            ("EMAILJS_PUBLIC_KEY", "public_x"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.display_date_format, "%-m/%-d/%Y");
        assert_eq!(config.rate_submit_per_min, 30);
        assert_eq!(config.rate_read_per_min, 600);
        assert!(config.leave_data_path.is_none());
        assert!(config.emailjs_private_key.is_none());
    }

    #[test]
    fn missing_emailjs_keys_fail() {
        let err = Config::from_lookup(lookup(&[("EMAILJS_PUBLIC_KEY", "")])).unwrap_err();
        assert!(err.to_string().contains("EMAILJS_PUBLIC_KEY"));
    }

    #[test]
    fn bad_numbers_fail() {
        let err = Config::from_lookup(lookup(&[("RATE_SUBMIT_PER_MIN", "lots")])).unwrap_err();
        assert!(err.to_string().contains("RATE_SUBMIT_PER_MIN"));
    }

    #[test]
    fn bad_date_format_fails() {
        assert!(Config::from_lookup(lookup(&[("DISPLAY_DATE_FORMAT", "%Q")])).is_err());
    }

    #[test]
    fn time_specifiers_in_date_format_fail() {
        for format in ["%H:%M", "%d %H:%M", "%Y-%m-%d %Z"] {
            let err = Config::from_lookup(lookup(&[("DISPLAY_DATE_FORMAT", format)])).unwrap_err();
            assert!(err.to_string().contains("DISPLAY_DATE_FORMAT"), "{format} accepted");
        }
    }

    #[test]
    fn date_only_formats_are_accepted() {
        for format in ["%Y-%m-%d", "%d/%m/%Y", "%b %-d, %Y"] {
            assert!(Config::from_lookup(lookup(&[("DISPLAY_DATE_FORMAT", format)])).is_ok());
        }
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("LEAVE_DATA_PATH", "/tmp/leave.json"),
            ("RATE_READ_PER_MIN", "5"),
            ("EMAILJS_PRIVATE_KEY", "priv"),
        ]))
        .unwrap();
        assert_eq!(config.leave_data_path, Some(PathBuf::from("/tmp/leave.json")));
        assert_eq!(config.rate_read_per_min, 5);
        assert_eq!(config.emailjs_private_key.as_deref(), Some("priv"));
    }
}
