//! Bare-transport calls to the auth endpoints.
//!
//! Everything here goes through a plain `reqwest::Client`: no bearer
//! header, no 401-retry policy. Routing the refresh call around the
//! retrying transport is what keeps the refresh protocol from recursing.

use tracing::{debug, info};

use crate::config::{ClientConfig, LOGIN_PATH, REFRESH_TOKEN_PATH, VERIFY_OTP_PATH};
use crate::error::{Error, Result};
use crate::models::auth::{
    LoginRequest, LoginResponse, OtpVerifyRequest, OtpVerifyResponse, RefreshRequest,
    RefreshResponse,
};
use crate::transport::http::{read_api_error, send_error};

/// Exchange credentials for tokens.
///
/// POST `/auth/login`, body `{"email": ..., "password": ...}`.
pub async fn login(
    client: &reqwest::Client,
    config: &ClientConfig,
    email: &str,
    password: &str,
) -> Result<LoginResponse> {
    debug!(email, "Logging in");

    let payload = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = client
        .post(config.api_url(LOGIN_PATH))
        .json(&payload)
        .send()
        .await
        .map_err(send_error)?;

    if !response.status().is_success() {
        return Err(read_api_error(response).await);
    }

    Ok(response.json().await?)
}

/// Complete a two-factor login.
///
/// POST `/auth/verify-otp`, body `{"userId": ..., "otp": ...}`.
pub async fn verify_otp(
    client: &reqwest::Client,
    config: &ClientConfig,
    user_id: &str,
    otp: &str,
) -> Result<OtpVerifyResponse> {
    debug!(user_id, "Verifying OTP");

    let payload = OtpVerifyRequest {
        user_id: user_id.to_string(),
        otp: otp.to_string(),
    };

    let response = client
        .post(config.api_url(VERIFY_OTP_PATH))
        .json(&payload)
        .send()
        .await
        .map_err(send_error)?;

    if !response.status().is_success() {
        return Err(read_api_error(response).await);
    }

    Ok(response.json().await?)
}

/// Exchange a refresh token for a new access token.
///
/// POST `/auth/refresh-token`, body `{"refreshToken": ...}`.
pub async fn refresh_access_token(
    client: &reqwest::Client,
    config: &ClientConfig,
    refresh_token: &str,
) -> Result<RefreshResponse> {
    if refresh_token.is_empty() {
        return Err(Error::AuthExhausted("no refresh token available".into()));
    }

    info!("Exchanging refresh token for a new access token");

    let payload = RefreshRequest {
        refresh_token: refresh_token.to_string(),
    };

    let response = client
        .post(config.api_url(REFRESH_TOKEN_PATH))
        .json(&payload)
        .send()
        .await
        .map_err(send_error)?;

    if !response.status().is_success() {
        return Err(read_api_error(response).await);
    }

    let data: RefreshResponse = response.json().await?;

    if data.token.is_empty() {
        return Err(Error::MalformedAuthResponse(
            "refresh response did not contain a token".into(),
        ));
    }

    debug!("Refresh token exchange succeeded");
    Ok(data)
}
