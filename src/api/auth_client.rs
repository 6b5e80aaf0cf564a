//! Auth API client: register, login, logout, session verification.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::models::User;

use super::types::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated session as the server grants it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub session_id: String,
    pub user: User,
}

/// Client for the `/auth` endpoints.
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a new account and return the granted session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Session> {
        let url = format!("{}/auth/register", self.base_url);
        debug!(url = %url, email = %email, "Registering account");

        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send register request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Registration failed: {} - {}", status, body);
        }

        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse register response")?;

        Ok(Session {
            token: auth.token,
            session_id: auth.session_id,
            user: auth.user.into(),
        })
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Logging in");

        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Login failed: {} - {}", status, body);
        }

        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        Ok(Session {
            token: auth.token,
            session_id: auth.session_id,
            user: auth.user.into(),
        })
    }

    /// Invalidate a session server-side. Local state is the caller's to clear.
    pub async fn logout(&self, token: &str, session_id: &str) -> Result<()> {
        let url = format!("{}/auth/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let body = LogoutRequest {
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .context("Failed to send logout request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Logout failed: {} - {}", status, body);
        }

        Ok(())
    }

    /// Check whether a stored token is still valid; returns the user when it is.
    pub async fn verify(&self, token: &str) -> Result<Option<User>> {
        let url = format!("{}/auth/verify", self.base_url);
        debug!(url = %url, "Verifying session");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send verify request")?;

        // An expired token comes back as 401, not an error
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Verify failed: {} - {}", status, body);
        }

        let verify: VerifyResponse = response
            .json()
            .await
            .context("Failed to parse verify response")?;

        if verify.valid {
            Ok(verify.user.map(Into::into))
        } else {
            Ok(None)
        }
    }
}
