//! # Auth Client
//!
//! Register, login, current-user and logout against the backend, with the
//! session token kept in a [`KeyValueStore`] under `authToken`.
//!
//! Server rejections are outcomes, not errors: the caller shows their
//! message. `Err` means the request never produced a usable response
//! (transport failure, unreadable body), for which each flow has its own
//! "check your connection" text.

use chrono::Utc;
use recipebook_common::KeyValueStore;
use recipebook_widgets::{messages, MessageKind};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    ApiConfig, ApiResult, AuthFlow, AuthResponse, CurrentUser, Endpoints, LoginRequest,
    RegisterRequest, LOGIN_PAGE, LOGOUT_FAILED, TOKEN_KEY,
};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Result of a register or login submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Token stored, success message queued; navigate to `redirect`
    Success { redirect: String },
    /// Show `message` as an error toast
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut { redirect: String },
    Failed { message: String },
}

pub struct AuthClient<S: KeyValueStore> {
    http: Client,
    endpoints: Endpoints,
    store: S,
}

impl<S: KeyValueStore> AuthClient<S> {
    pub fn new(config: &ApiConfig, store: S) -> Self {
        Self {
            http: Client::new(),
            endpoints: Endpoints::new(config),
            store,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn token(&self) -> ApiResult<Option<String>> {
        Ok(self.store.get_item(TOKEN_KEY)?)
    }

    pub async fn register(&self, request: &RegisterRequest, csrf_token: &str) -> ApiResult<AuthOutcome> {
        let url = self.endpoints.register();
        self.submit(AuthFlow::Register, &url, request, csrf_token).await
    }

    pub async fn login(&self, request: &LoginRequest, csrf_token: &str) -> ApiResult<AuthOutcome> {
        let url = self.endpoints.login();
        self.submit(AuthFlow::Login, &url, request, csrf_token).await
    }

    async fn submit<B: Serialize>(
        &self,
        flow: AuthFlow,
        url: &str,
        body: &B,
        csrf_token: &str,
    ) -> ApiResult<AuthOutcome> {
        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, csrf_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let data: Value = read_json(response).await?;

        if !status.is_success() {
            let message = flow.rejection_message(&data);
            debug!(status = status.as_u16(), message = %message, "Auth request rejected");
            return Ok(AuthOutcome::Rejected { message });
        }

        let parsed: AuthResponse = serde_json::from_value(data).unwrap_or_default();
        if let Some(token) = parsed.token {
            self.store.set_item(TOKEN_KEY, &token)?;
        }
        messages::store_message(&self.store, flow.success_message(), MessageKind::Success, Utc::now())?;

        info!(flow = ?flow, "Auth request succeeded");
        Ok(AuthOutcome::Success {
            redirect: self.endpoints.base_url().to_string(),
        })
    }

    /// The signed-in user, or `None` without a token or on any rejection
    pub async fn me(&self) -> ApiResult<Option<CurrentUser>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.endpoints.me())
            .header(AUTHORIZATION, bearer(&token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "Current user unavailable");
            return Ok(None);
        }
        Ok(Some(read_json(response).await?))
    }

    pub async fn logout(&self) -> ApiResult<LogoutOutcome> {
        let token = self.token()?.unwrap_or_default();

        let response = self
            .http
            .post(self.endpoints.logout())
            .header(AUTHORIZATION, bearer(&token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if response.status().is_success() {
            self.store.remove_item(TOKEN_KEY)?;
            info!("Logged out");
            Ok(LogoutOutcome::LoggedOut {
                redirect: LOGIN_PAGE.to_string(),
            })
        } else {
            warn!(status = response.status().as_u16(), "Logout rejected");
            Ok(LogoutOutcome::Failed {
                message: LOGOUT_FAILED.to_string(),
            })
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
