//! Session, profile, and auth wire types.

use serde::{Deserialize, Serialize};

/// Role assigned to a dashboard account.
///
/// Serialized in the backend's all-caps form (`SUPERADMIN`, `EXHIBITOR`,
/// `TEAMMANAGER`, `ENDUSER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Platform operator: manages exhibitors, licenses, and events.
    SuperAdmin,
    /// Event exhibitor / organizer account.
    Exhibitor,
    /// Manages a team of scanning users under one exhibitor.
    TeamManager,
    /// Individual scanning user.
    EndUser,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "SUPERADMIN"),
            Self::Exhibitor => write!(f, "EXHIBITOR"),
            Self::TeamManager => write!(f, "TEAMMANAGER"),
            Self::EndUser => write!(f, "ENDUSER"),
        }
    }
}

/// Profile snapshot fetched at login.
///
/// Immutable for the lifetime of a session; only the role is consulted by
/// this crate (for routing decisions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// An authenticated session: both tokens plus the profile snapshot.
///
/// Created on login or OTP success. The access token is replaced in place
/// on every successful refresh; the whole session is destroyed on logout
/// or unrecoverable refresh failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

impl Session {
    /// Create a session from freshly issued credentials.
    pub fn new(access_token: String, refresh_token: String, user: UserProfile) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }

    /// Whether this session can authenticate a request at all.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`.
///
/// Either a complete credential set, or a two-factor challenge carrying
/// `requires2FA` with the `userId` to pass to OTP verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default, rename = "requires2FA")]
    pub requires_2fa: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /auth/verify-otp`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    pub user_id: String,
    pub otp: String,
}

/// Response of `POST /auth/verify-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

/// Body of `POST /auth/refresh-token`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh-token`.
///
/// `refreshToken` is only present when the backend rotates refresh tokens;
/// when absent the stored one stays valid.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body shape used across the backend: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials accepted; the session is already persisted.
    LoggedIn(Session),
    /// The account has two-factor enabled; call `verify_otp` next.
    TwoFactorRequired {
        user_id: String,
        email: Option<String>,
    },
}
