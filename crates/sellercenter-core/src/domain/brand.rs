use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Product brand; two brands are equal when their names are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Brand(String);

impl Brand {
    pub fn from_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name: String = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyBrandName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Brand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Brand {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(value)
    }
}

impl From<Brand> for String {
    fn from(value: Brand) -> Self {
        value.0
    }
}
