use serde::Deserialize;

use crate::error::AppError;

/// Raw registration form, validated before any store access.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
}

impl RegistrationForm {
    pub fn parse(self) -> Result<String, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidForm("display name must not be empty".into()));
        }
        Ok(name.to_string())
    }
}
