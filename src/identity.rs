use anyhow::Context;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderName, request::Parts, HeaderMap},
    response::Redirect,
};

use crate::config::AuthConfig;
use crate::state::AppState;

/// The external identity provider's view of the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque stable subject string, used as the Writer primary key.
    pub subject: String,
}

/// Adapter over whatever sits in front of the app and authenticates users.
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current identity from the request, if any.
    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity>;
    /// URL that starts a login and lands the user on `destination`.
    fn login_url(&self, destination: &str) -> String;
    /// URL that ends the session and lands the user on `destination`.
    fn logout_url(&self, destination: &str) -> String;
}

/// Identity supplied by an authenticating reverse proxy (oauth2-proxy style):
/// the proxy injects the verified subject into a request header and exposes
/// sign-in/sign-out endpoints taking an `rd` destination parameter.
pub struct ProxyIdentity {
    subject_header: HeaderName,
    login_url: String,
    logout_url: String,
}

impl ProxyIdentity {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let subject_header = HeaderName::from_bytes(config.subject_header.as_bytes())
            .context("invalid AUTH_SUBJECT_HEADER")?;
        Ok(Self {
            subject_header,
            login_url: config.login_url.clone(),
            logout_url: config.logout_url.clone(),
        })
    }
}

impl IdentityProvider for ProxyIdentity {
    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity> {
        headers
            .get(&self.subject_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Identity {
                subject: s.to_string(),
            })
    }

    fn login_url(&self, destination: &str) -> String {
        format!("{}?rd={}", self.login_url, destination)
    }

    fn logout_url(&self, destination: &str) -> String {
        format!("{}?rd={}", self.logout_url, destination)
    }
}

/// Extracts the current identity; unauthenticated requests are sent to the
/// login page. Every protected route goes through this.
#[derive(Debug)]
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity
            .current_identity(&parts.headers)
            .map(CurrentIdentity)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Extracts the current identity without forcing one, for routes that branch
/// on whether the user is signed in.
#[derive(Debug)]
pub struct MaybeIdentity(pub Option<Identity>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(state.identity.current_identity(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request, StatusCode};
    use axum::response::IntoResponse;

    fn provider() -> ProxyIdentity {
        ProxyIdentity::new(&AuthConfig {
            subject_header: "x-auth-request-user".into(),
            login_url: "/oauth2/sign_in".into(),
            logout_url: "/oauth2/sign_out".into(),
        })
        .expect("valid test config")
    }

    #[test]
    fn resolves_subject_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-auth-request-user",
            HeaderValue::from_static("writer-123"),
        );
        let identity = provider().current_identity(&headers).expect("identity");
        assert_eq!(identity.subject, "writer-123");
    }

    #[test]
    fn missing_or_blank_header_means_no_identity() {
        let provider = provider();
        assert_eq!(provider.current_identity(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert("x-auth-request-user", HeaderValue::from_static("   "));
        assert_eq!(provider.current_identity(&headers), None);
    }

    #[test]
    fn login_and_logout_urls_carry_destination() {
        let provider = provider();
        assert_eq!(
            provider.login_url("/registration"),
            "/oauth2/sign_in?rd=/registration"
        );
        assert_eq!(provider.logout_url("/"), "/oauth2/sign_out?rd=/");
    }

    #[tokio::test]
    async fn current_identity_extractor_accepts_signed_in_request() {
        let state = AppState::fake();
        let (mut parts, _) = Request::builder()
            .uri("/dashboard")
            .header("x-auth-request-user", "writer-123")
            .body(())
            .expect("request")
            .into_parts();

        let CurrentIdentity(identity) =
            CurrentIdentity::from_request_parts(&mut parts, &state)
                .await
                .expect("extract identity");
        assert_eq!(identity.subject, "writer-123");
    }

    #[tokio::test]
    async fn current_identity_extractor_redirects_anonymous_to_login() {
        let state = AppState::fake();
        let (mut parts, _) = Request::builder()
            .uri("/dashboard")
            .body(())
            .expect("request")
            .into_parts();

        let rejection = CurrentIdentity::from_request_parts(&mut parts, &state)
            .await
            .expect_err("anonymous must be rejected");
        let res = rejection.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/login");
    }
}
