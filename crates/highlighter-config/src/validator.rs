//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_gemini(config, &mut result);
        Self::validate_urls(config, &mut result);
        Self::validate_identity(config, &mut result);
        Self::validate_storage(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }
        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_gemini(config: &Config, result: &mut ValidationResult) {
        if config.gemini.api_key.as_deref().is_none_or(str::is_empty) {
            result.add_warning(ValidationWarning::new(
                "gemini.api_key",
                "API key is not set; summarize, directions and email will be unavailable",
            ));
        }
        if config.gemini.model.is_empty() {
            result.add_error(ValidationError::new("gemini.model", "Model cannot be empty"));
        }
        if config.gemini.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "gemini.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_urls(config: &Config, result: &mut ValidationResult) {
        let urls = [
            ("gemini.base_url", &config.gemini.base_url),
            ("maps.base_url", &config.maps.base_url),
            ("maps.directions_url", &config.maps.directions_url),
            ("tasks.base_url", &config.tasks.base_url),
            ("calendar.base_url", &config.calendar.base_url),
            ("identity.token_url", &config.identity.token_url),
            ("identity.userinfo_url", &config.identity.userinfo_url),
        ];
        for (path, value) in urls {
            match Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(_) => result.add_error(ValidationError::new(
                    path,
                    "URL must start with http:// or https://",
                )),
                Err(e) => {
                    result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e)))
                }
            }
        }
    }

    fn validate_identity(config: &Config, result: &mut ValidationResult) {
        if config.identity.refresh_token.is_none() {
            result.add_warning(ValidationWarning::new(
                "identity.refresh_token",
                "No refresh token; sign-in will be denied and directions, tasks and events will require auth",
            ));
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.history_limit == 0 {
            result.add_error(ValidationError::new(
                "storage.history_limit",
                "history_limit must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
