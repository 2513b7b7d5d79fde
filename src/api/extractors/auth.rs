use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::{auth::Claims, profile::Identity};
use crate::error::AppError;
use std::sync::Arc;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use tracing::{debug, Span};

/// The caller, resolved from an EdDSA bearer token issued by the identity
/// provider.
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let access_token = parts.headers.get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let decoding_key = DecodingKey::from_ed_pem(app_state.config.identity_public_key.as_bytes())
            .map_err(|e| AppError::Config(format!("Invalid identity public key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[app_state.config.identity_audience.as_str()]);
        if let Some(issuer) = &app_state.config.identity_issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        let token_data = decode::<Claims>(access_token.trim(), &decoding_key, &validation)
            .map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized
            })?;

        let identity = Identity::from(token_data.claims);
        Span::current().record("user_id", identity.user_id.as_str());

        Ok(AuthUser(identity))
    }
}
