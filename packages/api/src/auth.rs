//! Auth request/response shapes and the user-facing text of each flow

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOKEN_KEY: &str = "authToken";
pub const LOGIN_PAGE: &str = "/auth/";
/// Delay before following a success redirect, so the queued message lands
pub const REDIRECT_DELAY_MS: u32 = 100;

pub const LOGOUT_FAILED: &str = "Failed to log out.";
pub const LOGOUT_NETWORK_ERROR: &str = "Network error during logout.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

/// Body of a successful register/login
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

/// The two form submissions on the auth page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Register,
    Login,
}

impl AuthFlow {
    /// Submit button text while the request is in flight
    pub fn pending_label(&self) -> &'static str {
        match self {
            AuthFlow::Register => "Creating Account...",
            AuthFlow::Login => "Signing in...",
        }
    }

    /// Submit button text restored afterwards
    pub fn idle_label(&self) -> &'static str {
        match self {
            AuthFlow::Register => "Create Account",
            AuthFlow::Login => "Sign In",
        }
    }

    /// Queued for the page the user lands on
    pub fn success_message(&self) -> &'static str {
        match self {
            AuthFlow::Register => "Account created successfully!",
            AuthFlow::Login => "Welcome back! You've been successfully logged in.",
        }
    }

    pub fn fallback_error(&self) -> &'static str {
        match self {
            AuthFlow::Register => "Registration failed. Please try again.",
            AuthFlow::Login => "Login failed. Please check your credentials.",
        }
    }

    pub fn network_error(&self) -> &'static str {
        match self {
            AuthFlow::Register => {
                "Unable to create account. Please check your connection and try again."
            }
            AuthFlow::Login => "Unable to sign in. Please check your connection and try again.",
        }
    }

    /// Rejection body fields consulted for the error text, highest
    /// priority first
    fn error_fields(&self) -> &'static [ErrorField] {
        match self {
            AuthFlow::Register => &REGISTER_ERROR_FIELDS,
            AuthFlow::Login => &LOGIN_ERROR_FIELDS,
        }
    }

    /// Text to show for a rejected submission
    pub fn rejection_message(&self, body: &Value) -> String {
        self.error_fields()
            .iter()
            .find_map(|field| field.extract(body))
            .unwrap_or_else(|| self.fallback_error().to_string())
    }
}

const REGISTER_ERROR_FIELDS: [ErrorField; 5] = [
    ErrorField::List("email"),
    ErrorField::List("username"),
    ErrorField::List("password"),
    ErrorField::Detail,
    ErrorField::List("non_field_errors"),
];

const LOGIN_ERROR_FIELDS: [ErrorField; 4] = [
    ErrorField::List("non_field_errors"),
    ErrorField::Detail,
    ErrorField::List("email_or_username"),
    ErrorField::List("password"),
];

#[derive(Debug, Clone, Copy)]
enum ErrorField {
    /// Field validation errors: an array whose first entry is shown
    List(&'static str),
    /// DRF's `detail` string
    Detail,
}

impl ErrorField {
    fn extract(&self, body: &Value) -> Option<String> {
        match self {
            ErrorField::List(name) => body
                .get(name)?
                .as_array()?
                .first()?
                .as_str()
                .map(str::to_string),
            ErrorField::Detail => body
                .get("detail")?
                .as_str()
                .filter(|detail| !detail.is_empty())
                .map(str::to_string),
        }
    }
}
