//! Google OAuth 2.0 authorization-code client with PKCE (S256).

use serde::Deserialize;

use crate::config::OAuthConfig;

/// Scopes requested from Google.
const SCOPES: &str = "openid email profile";

/// Error type for Google OAuth operations.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Invalid OAuth configuration: {0}")]
    Config(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to fetch user info: {0}")]
    UserInfo(String),

    #[error("Google account email is not verified")]
    EmailNotVerified,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Profile returned by Google's userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUser {
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

pub struct GoogleOAuthClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
    allowed_emails: Vec<String>,
}

impl GoogleOAuthClient {
    /// Builds a client, or `None` when Google sign-in is not configured.
    pub fn from_config(config: &OAuthConfig) -> Option<Self> {
        if !config.google_enabled() {
            return None;
        }
        Some(Self {
            http_client: reqwest::Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            auth_url: config.google_auth_url.clone(),
            token_url: config.google_token_url.clone(),
            userinfo_url: config.google_userinfo_url.clone(),
            allowed_emails: config
                .allowed_emails
                .iter()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        })
    }

    /// URL of Google's consent screen for this `state` and PKCE challenge.
    pub fn authorization_url(&self, state: &str, code_challenge: &str) -> Result<String, OAuthError> {
        let url = reqwest::Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| OAuthError::Config(format!("invalid authorization URL: {}", e)))?;
        Ok(url.into())
    }

    /// Exchanges an authorization code and fetches the signed-in user.
    pub async fn authenticate(&self, code: &str, code_verifier: &str) -> Result<GoogleUser, OAuthError> {
        let access_token = self.exchange_code(code, code_verifier).await?;
        let user = self.fetch_user_info(&access_token).await?;
        if !user.email_verified {
            return Err(OAuthError::EmailNotVerified);
        }
        Ok(user)
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<String, OAuthError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("code_verifier", code_verifier),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuthError::TokenExchange(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
        Ok(tokens.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUser, OAuthError> {
        let response = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::UserInfo(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuthError::UserInfo(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| OAuthError::UserInfo(e.to_string()))
    }

    /// Whether `email` is on the configured allow-list. An empty list
    /// allows nobody.
    pub fn is_email_allowed(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.allowed_emails.iter().any(|allowed| *allowed == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig {
            google_client_id: "client-123".to_string(),
            google_client_secret: "secret".to_string(),
            google_redirect_uri: "https://shop.example.com/api/auth/google/callback".to_string(),
            allowed_emails: vec![" Owner@Example.com ".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_without_credentials() {
        assert!(GoogleOAuthClient::from_config(&OAuthConfig::default()).is_none());
    }

    #[test]
    fn test_authorization_url_carries_pkce_and_state() {
        let client = GoogleOAuthClient::from_config(&config()).unwrap();
        let url = client.authorization_url("state-abc", "challenge-xyz").unwrap();
        let parsed = reqwest::Url::parse(&url).unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        let params: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["state"], "state-abc");
        assert_eq!(params["code_challenge"], "challenge-xyz");
        assert_eq!(params["code_challenge_method"], "S256");
        assert_eq!(params["response_type"], "code");
        assert_eq!(
            params["redirect_uri"],
            "https://shop.example.com/api/auth/google/callback"
        );
    }

    #[test]
    fn test_allow_list_is_case_insensitive() {
        let client = GoogleOAuthClient::from_config(&config()).unwrap();
        assert!(client.is_email_allowed("owner@example.com"));
        assert!(client.is_email_allowed("OWNER@EXAMPLE.COM"));
        assert!(!client.is_email_allowed("intruder@example.com"));
    }

    #[test]
    fn test_empty_allow_list_allows_nobody() {
        let mut config = config();
        config.allowed_emails.clear();
        let client = GoogleOAuthClient::from_config(&config).unwrap();
        assert!(!client.is_email_allowed("owner@example.com"));
    }

    #[test]
    fn test_user_info_defaults_unverified() {
        let user: GoogleUser =
            serde_json::from_str(r#"{"email":"owner@example.com"}"#).unwrap();
        assert!(!user.email_verified);
        assert!(user.name.is_none());
    }
}
