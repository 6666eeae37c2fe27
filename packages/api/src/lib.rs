//! # Recipebook API
//!
//! Client side of the recipebook backend: the endpoint table and the auth
//! flows used by the auth page and the page header.
//!
//! ```rust
//! use recipebook_api::{ApiConfig, Endpoints};
//!
//! let endpoints = Endpoints::new(&ApiConfig::default());
//! assert_eq!(endpoints.login(), "http://0.0.0.0:8000/api/auth/login/");
//! ```

mod auth;
mod client;
mod config;
mod endpoints;
mod errors;

pub use auth::{
    AuthFlow, AuthResponse, CurrentUser, LoginRequest, RegisterRequest, LOGIN_PAGE, LOGOUT_FAILED,
    LOGOUT_NETWORK_ERROR, REDIRECT_DELAY_MS, TOKEN_KEY,
};
pub use client::{AuthClient, AuthOutcome, LogoutOutcome};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use endpoints::{Endpoints, RecipeAction};
pub use errors::{ApiError, ApiResult};
