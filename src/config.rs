use serde::Deserialize;

/// Settings for the authenticating front proxy that supplies identities.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub subject_header: String,
    pub login_url: String,
    pub logout_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let auth = AuthConfig {
            subject_header: std::env::var("AUTH_SUBJECT_HEADER")
                .unwrap_or_else(|_| "x-auth-request-user".into()),
            login_url: std::env::var("AUTH_LOGIN_URL")
                .unwrap_or_else(|_| "/oauth2/sign_in".into()),
            logout_url: std::env::var("AUTH_LOGOUT_URL")
                .unwrap_or_else(|_| "/oauth2/sign_out".into()),
        };
        Ok(Self { database_url, auth })
    }
}
