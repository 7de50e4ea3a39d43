use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::AuthRepository;
use shared::{AuthSession, OtpIssued, Parent, RequestOtpRequest, VerifyOtpRequest};

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"));

/// Service for phone-based sign-in.
///
/// Codes are single use and expire after a configured TTL. Verifying a code
/// for an unknown phone creates the parent account on the spot.
#[derive(Clone)]
pub struct AuthService {
    auth: AuthRepository,
    otp_ttl: Duration,
}

impl AuthService {
    pub fn new(auth: AuthRepository, otp_ttl_minutes: i64) -> Self {
        Self {
            auth,
            otp_ttl: Duration::minutes(otp_ttl_minutes),
        }
    }

    /// Issue a fresh OTP code for a phone number, replacing any pending one.
    ///
    /// Delivery happens out of band; the code never appears in responses.
    pub async fn request_otp(&self, request: RequestOtpRequest) -> Result<OtpIssued, AppError> {
        let phone = request.phone.trim();
        if !PHONE_PATTERN.is_match(phone) {
            return Err(AppError::invalid_input("invalid phone number"));
        }

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let expires_at = Utc::now() + self.otp_ttl;
        self.auth.store_otp(phone, &code, expires_at).await?;

        info!("Issued OTP for {}", phone);

        Ok(OtpIssued {
            phone: phone.to_string(),
            expires_at,
        })
    }

    /// Verify an OTP code and open a session.
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<AuthSession, AppError> {
        let phone = request.phone.trim();

        let Some((code, expires_at)) = self.auth.get_otp(phone).await? else {
            return Err(AppError::not_found("no code requested for this phone"));
        };

        if Utc::now() > expires_at {
            self.auth.delete_otp(phone).await?;
            return Err(AppError::invalid_input("code has expired"));
        }

        if code != request.code.trim() {
            warn!("OTP mismatch for {}", phone);
            return Err(AppError::invalid_input("invalid code"));
        }

        // Single use; a racing verification may have consumed it already
        if !self.auth.consume_otp(phone, &code).await? {
            return Err(AppError::not_found("no code requested for this phone"));
        }

        let parent = match self.auth.get_parent_by_phone(phone).await? {
            Some(parent) => parent,
            None => {
                let name = request
                    .name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Parent".to_string());
                let parent = Parent {
                    id: Uuid::new_v4().to_string(),
                    phone: phone.to_string(),
                    name,
                    created_at: Utc::now(),
                };
                self.auth.store_parent(&parent).await?;
                info!("Created parent account {} for {}", parent.id, phone);
                parent
            }
        };

        let token = Uuid::new_v4().to_string();
        self.auth
            .store_session(&token, &parent.id, Utc::now())
            .await?;

        info!("Opened session for parent {}", parent.id);

        Ok(AuthSession { token, parent })
    }

    /// Resolve a bearer token to its parent
    pub async fn authenticate(&self, token: &str) -> Result<Parent, AppError> {
        match self.auth.get_session_parent(token).await? {
            Some(parent) => Ok(parent),
            None => Err(AppError::forbidden("invalid session")),
        }
    }
}
