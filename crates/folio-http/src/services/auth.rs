//! Login, registration, OTP verification and logout.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use folio_core::error::InvalidInputError;
use folio_core::{AccessToken, ApiError, ApiRequest, Credentials, Envelope, RefreshToken};

use crate::client::AuthenticatedClient;
use crate::endpoints;

/// Length of the one-time codes the backend emails out.
pub const OTP_LENGTH: usize = 6;

/// Flow a one-time code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    Register,
    Login,
    ResetPassword,
    UpdatePassword,
    UpdateEmail,
}

impl OtpPurpose {
    /// Value of the `type` field the backend expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Register => "register",
            OtpPurpose::Login => "login",
            OtpPurpose::ResetPassword => "reset-password",
            OtpPurpose::UpdatePassword => "update-password",
            OtpPurpose::UpdateEmail => "email-update",
        }
    }

    pub fn verify_path(&self) -> &'static str {
        match self {
            OtpPurpose::Register => endpoints::SIGNUP_VERIFY_OTP,
            OtpPurpose::Login => endpoints::SIGNIN_VERIFY_OTP,
            OtpPurpose::ResetPassword => endpoints::PASSWORD_RESET_VERIFY_OTP,
            OtpPurpose::UpdatePassword => endpoints::PASSWORD_UPDATE_VERIFY_OTP,
            OtpPurpose::UpdateEmail => endpoints::EMAIL_UPDATE_VERIFY_OTP,
        }
    }

    /// True for flows that run inside an existing session.
    pub fn requires_session(&self) -> bool {
        matches!(self, OtpPurpose::UpdatePassword | OtpPurpose::UpdateEmail)
    }

    /// Attach the refresh opt-out for flows that run before sign-in.
    fn prepare(&self, request: ApiRequest) -> ApiRequest {
        if self.requires_session() {
            request
        } else {
            request.without_refresh()
        }
    }

    pub fn resend_path(&self) -> &'static str {
        match self {
            OtpPurpose::Register | OtpPurpose::Login => endpoints::AUTH_OTP_RESEND,
            _ => endpoints::OTP_RESEND,
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "register" => Ok(OtpPurpose::Register),
            "login" => Ok(OtpPurpose::Login),
            "reset-password" => Ok(OtpPurpose::ResetPassword),
            "update-password" => Ok(OtpPurpose::UpdatePassword),
            "email-update" => Ok(OtpPurpose::UpdateEmail),
            other => Err(InvalidInputError::Field {
                field: "type",
                reason: format!("unknown OTP purpose '{}'", other),
            }
            .into()),
        }
    }
}

/// Result of a successful OTP verification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtpVerification {
    pub message: Option<String>,
    /// True when the verification opened a session and tokens were stored.
    pub signed_in: bool,
    pub user: Option<serde_json::Value>,
    /// Token for the password reset form, on the reset flow.
    pub reset_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyData {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<serde_json::Value>,
    #[serde(default)]
    reset_token: Option<String>,
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: AuthenticatedClient,
}

impl AuthService {
    pub(crate) fn new(client: AuthenticatedClient) -> Self {
        Self { client }
    }

    /// Submit credentials. On success the backend emails a login OTP;
    /// returns the server message.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<String>, ApiError> {
        require("email", credentials.email())?;
        require("password", credentials.password())?;

        let request = ApiRequest::post(endpoints::LOGIN)
            .without_refresh()
            .json(credentials)?;
        self.client.send_message(request).await
    }

    /// Create an account. Returns the email address the verification code
    /// was sent to.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        name: &str,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        require("name", name)?;
        require("user_name", user_name)?;
        require("email", email)?;
        require("password", password)?;

        let request = ApiRequest::post(endpoints::REGISTER).without_refresh().json(&json!({
            "name": name,
            "user_name": user_name,
            "email": email,
            "password": password,
        }))?;
        let envelope: Envelope<serde_json::Value> = self.client.send_json(request).await?;

        let registered = envelope
            .data
            .as_ref()
            .and_then(|data| data.get("email"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or(email)
            .to_string();
        envelope.into_message()?;

        Ok(registered)
    }

    /// Verify a one-time code.
    ///
    /// On the login flow the issued tokens and user record are persisted and
    /// become the client's default token.
    #[instrument(skip(self, email, otp))]
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        purpose: OtpPurpose,
    ) -> Result<OtpVerification, ApiError> {
        require("email", email)?;
        if otp.chars().count() != OTP_LENGTH {
            return Err(InvalidInputError::Field {
                field: "otp",
                reason: format!("must be {} characters", OTP_LENGTH),
            }
            .into());
        }

        let request = purpose
            .prepare(ApiRequest::post(purpose.verify_path()))
            .json(&json!({
                "email": email,
                "otp": otp,
                "type": purpose.as_str(),
            }))?;
        let envelope: Envelope<VerifyData> = self.client.send_json(request).await?;
        let message = envelope.message.clone();
        let data = match envelope.into_data() {
            Ok(data) => data,
            Err(ApiError::Decode { .. }) => VerifyData::default(),
            Err(e) => return Err(e),
        };

        let mut outcome = OtpVerification {
            message,
            signed_in: false,
            user: data.user,
            reset_token: data.reset_token,
        };

        if purpose == OtpPurpose::Login {
            if let Some(access) = data.access_token.filter(|t| !t.is_empty()) {
                let access = AccessToken::new(access);
                let refresh = data
                    .refresh_token
                    .filter(|t| !t.is_empty())
                    .map(RefreshToken::new);
                self.client
                    .session()
                    .store_login(&access, refresh.as_ref(), outcome.user.as_ref())?;
                self.client.set_default_token(Some(access));
                outcome.signed_in = true;
                info!("Signed in");
            }
        }

        Ok(outcome)
    }

    /// Ask for a new code for `purpose`.
    #[instrument(skip(self, email))]
    pub async fn resend_otp(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<String>, ApiError> {
        require("email", email)?;
        let request = purpose
            .prepare(ApiRequest::post(purpose.resend_path()))
            .json(&json!({
                "email": email,
                "type": purpose.as_str(),
            }))?;
        self.client.send_message(request).await
    }

    /// Start the password reset flow for `email`.
    #[instrument(skip_all)]
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, ApiError> {
        require("email", email)?;
        let request = ApiRequest::post(endpoints::PASSWORD_RESET_REQUEST)
            .without_refresh()
            .json(&json!({ "email": email }))?;
        self.client.send_message(request).await
    }

    /// End the session on the server, then locally.
    ///
    /// Local credentials are cleared even when the server call fails; that
    /// failure is still returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<Option<String>, ApiError> {
        let result = self
            .client
            .send_message(ApiRequest::post(endpoints::LOGOUT))
            .await;

        if let Err(e) = &result {
            warn!(error = %e, "Logout call failed, clearing local session anyway");
        }
        self.client.clear_session()?;
        info!("Signed out");

        result
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::Field {
            field,
            reason: "is required".to_string(),
        }
        .into());
    }
    Ok(())
}
