use crate::ValidationError;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Account and endpoint settings shared by every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    username: String,
    endpoint: String,
    version: String,
    timeout_ms: u64,
}

impl Configuration {
    pub fn new(
        username: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username: String = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::MissingConfiguration { name: "username" });
        }
        let endpoint: String = endpoint.into();
        let endpoint = endpoint.trim().trim_end_matches(['/', '?']);
        if endpoint.is_empty() {
            return Err(ValidationError::MissingConfiguration { name: "endpoint" });
        }

        Ok(Self {
            username,
            endpoint: endpoint.to_owned(),
            version: String::from(DEFAULT_VERSION),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Reads `SELLERCENTER_USERNAME` and `SELLERCENTER_ENDPOINT`, plus the
    /// optional `SELLERCENTER_VERSION` and `SELLERCENTER_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup("SELLERCENTER_USERNAME")
            .ok_or(ValidationError::MissingConfiguration { name: "username" })?;
        let endpoint = lookup("SELLERCENTER_ENDPOINT")
            .ok_or(ValidationError::MissingConfiguration { name: "endpoint" })?;

        let mut configuration = Self::new(username, endpoint)?;

        if let Some(version) = lookup("SELLERCENTER_VERSION").filter(|v| !v.trim().is_empty()) {
            configuration = configuration.with_version(version.trim());
        }

        if let Some(raw) = lookup("SELLERCENTER_TIMEOUT_MS") {
            let timeout_ms = raw.trim().parse::<u64>().map_err(|_| {
                ValidationError::InvalidConfiguration {
                    name: "timeout_ms",
                    value: raw.clone(),
                }
            })?;
            configuration = configuration.with_timeout_ms(timeout_ms);
        }

        Ok(configuration)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
