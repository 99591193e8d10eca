use crate::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Root of the backend, without the `/api/health` suffix.
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let backend_url =
            get("SHOPSMART_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.into());
        let backend_url = backend_url.trim().trim_end_matches('/').to_string();
        if backend_url.is_empty() {
            return Err(ConfigError::Invalid(
                "SHOPSMART_BACKEND_URL must not be empty".into(),
            ));
        }
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "SHOPSMART_BACKEND_URL must be an http(s) URL, got {backend_url}"
            )));
        }
        Ok(Self { backend_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults_backend_url() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn from_env_reads_values_and_trims_slash() {
        let get = |k: &str| match k {
            "SHOPSMART_BACKEND_URL" => Some("http://backend:8080/".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.backend_url, "http://backend:8080");
    }

    #[test]
    fn from_env_rejects_empty_url() {
        let get = |k: &str| match k {
            "SHOPSMART_BACKEND_URL" => Some("  ".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }

    #[test]
    fn from_env_rejects_non_http_scheme() {
        let get = |k: &str| match k {
            "SHOPSMART_BACKEND_URL" => Some("ftp://backend".into()),
            _ => None,
        };
        let err = Config::from_env_with(get).unwrap_err();
        assert!(err.to_string().contains("ftp://backend"));
    }
}
