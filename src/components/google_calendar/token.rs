use crate::error::{auth_error, SyncResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use url::Url;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Persisted OAuth credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
}

impl Credential {
    /// Whether the access token is still usable
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now().timestamp()
    }

    /// Build a credential from a token endpoint response
    fn from_response(
        response: &serde_json::Value,
        fallback_refresh: Option<&str>,
    ) -> SyncResult<Self> {
        let access_token = response
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| auth_error("Token response missing 'access_token' field"))?
            .to_string();

        // Google typically omits the refresh token when refreshing
        let refresh_token = response
            .get("refresh_token")
            .and_then(|t| t.as_str())
            .map(|s| s.to_string())
            .or_else(|| fallback_refresh.map(|s| s.to_string()));

        let expires_in = response
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);

        Ok(Credential {
            access_token,
            refresh_token,
            expires_at: Utc::now().timestamp() + expires_in,
        })
    }
}

/// OAuth client identity for an installed application
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: ClientSecrets,
}

impl ClientSecrets {
    /// Load the client identity from a Google client secrets file
    pub fn load(path: &str) -> SyncResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            auth_error(&format!("Failed to read client secrets from {}: {}", path, e))
        })?;

        let file: ClientSecretsFile = serde_json::from_str(&content)?;
        Ok(file.installed)
    }
}

/// Authorization flows that can mint a fresh credential
#[async_trait]
pub trait AuthFlow {
    async fn authorize(&self, secrets: &ClientSecrets) -> SyncResult<Credential>;
}

/// Interactive installed-app flow: browser consent plus a local callback listener
pub struct InstalledAppFlow {
    listen_port: u16,
}

impl InstalledAppFlow {
    pub fn new(listen_port: u16) -> Self {
        Self { listen_port }
    }

    fn redirect_uri(&self) -> String {
        format!("http://localhost:{}", self.listen_port)
    }
}

#[async_trait]
impl AuthFlow for InstalledAppFlow {
    async fn authorize(&self, secrets: &ClientSecrets) -> SyncResult<Credential> {
        // Random state ties the callback to this request
        let state = uuid::Uuid::new_v4().to_string();
        let redirect_uri = self.redirect_uri();

        let mut auth_url = Url::parse(AUTH_URL)
            .map_err(|e| auth_error(&format!("Failed to parse URL: {}", e)))?;
        auth_url
            .query_pairs_mut()
            .append_pair("client_id", &secrets.client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("scope", CALENDAR_SCOPE)
            .append_pair("state", &state);

        // Open browser for authorization
        info!("Opening browser for Google Calendar authorization...");
        webbrowser::open(auth_url.as_str())?;

        // Start local server to receive the callback
        let server = tiny_http::Server::http(("0.0.0.0", self.listen_port))
            .map_err(|e| auth_error(&format!("Failed to start callback listener: {}", e)))?;
        info!(
            "Waiting for authorization callback on port {}...",
            self.listen_port
        );

        let request = server.recv()?;
        let callback_url = request.url().to_string();

        let code = query_param(&callback_url, "code")
            .ok_or_else(|| auth_error("No authorization code found in callback"))?;

        let returned_state = query_param(&callback_url, "state");
        if returned_state.as_deref() != Some(state.as_str()) {
            return Err(auth_error("State mismatch in authorization callback"));
        }

        // Exchange code for tokens
        let client = Client::new();
        let response = client
            .post(TOKEN_URL)
            .form(&[
                ("client_id", secrets.client_id.as_str()),
                ("client_secret", secrets.client_secret.as_str()),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to exchange authorization code: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!("Failed to get token: {}", error_text)));
        }

        let token_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        let credential = Credential::from_response(&token_data, None)?;

        // Send success response to browser
        let response = tiny_http::Response::from_string(
            "Authorization successful! You can close this window.",
        );
        request.respond(response)?;

        Ok(credential)
    }
}

/// Extract a query parameter from a raw callback URL
fn query_param(url: &str, name: &str) -> Option<String> {
    let needle = format!("{}=", name);
    url.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix(needle.as_str()))
        .map(|s| s.to_string())
}

/// Loads, refreshes, persists and mints calendar credentials
pub struct TokenManager {
    token_file: PathBuf,
    secrets: ClientSecrets,
    client: Client,
}

impl TokenManager {
    pub fn new(token_file: impl Into<PathBuf>, secrets: ClientSecrets) -> Self {
        Self {
            token_file: token_file.into(),
            secrets,
            client: Client::new(),
        }
    }

    /// Get a usable credential: stored, refreshed or newly authorized
    pub async fn get_credentials(&self, flow: &dyn AuthFlow) -> SyncResult<Credential> {
        let credential = match self.load()? {
            Some(credential) if credential.is_valid() => return Ok(credential),
            Some(credential) if credential.refresh_token.is_some() => {
                info!("Stored token expired, refreshing");
                self.refresh(&credential).await?
            }
            _ => {
                info!("No usable stored token, starting authorization flow");
                flow.authorize(&self.secrets).await?
            }
        };

        // Save the credential for the next run
        self.save(&credential)?;

        Ok(credential)
    }

    /// Load the persisted credential, if any
    pub fn load(&self) -> SyncResult<Option<Credential>> {
        if !self.token_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.token_file)?;
        let credential = serde_json::from_str(&content)?;

        Ok(Some(credential))
    }

    /// Persist the credential for the next run
    pub fn save(&self, credential: &Credential) -> SyncResult<()> {
        let content = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.token_file, content)?;

        Ok(())
    }

    /// Refresh an expired credential, keeping its refresh token
    pub async fn refresh(&self, credential: &Credential) -> SyncResult<Credential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .ok_or_else(|| auth_error("No refresh token in stored credential"))?;

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: serde_json::Value = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        Credential::from_response(&new_token, Some(refresh_token))
    }
}
