use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different analysis-backend deployments the console can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development backend.
    #[default]
    Local,
    /// Hosted production backend.
    Production,
    /// User-supplied backend origin (e.g. a self-hosted deployment).
    Custom { api_base_url: String },
}

impl Environment {
    /// Returns the analysis service origin associated with the environment.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Production => "https://api.trustlock.io".to_string(),
            Environment::Custom { api_base_url } => api_base_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_environments() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "Production".parse::<Environment>(),
            Ok(Environment::Production)
        );
        assert!("beta".parse::<Environment>().is_err());
    }

    #[test]
    fn test_custom_environment_url_passthrough() {
        let env = Environment::Custom {
            api_base_url: "http://10.0.0.7:8000".to_string(),
        };
        assert_eq!(env.api_base_url(), "http://10.0.0.7:8000");
    }
}
