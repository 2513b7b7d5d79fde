use std::env;
use std::str::FromStr;
use jsonwebtoken::DecodingKey;
use crate::error::AppError;

pub const DEFAULT_AUDIENCE: &str = "conference-frontend";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub identity_public_key: String, // Ed25519 public key (PEM)
    pub identity_issuer: Option<String>,
    pub identity_audience: String,
    pub job_poll_interval_secs: u64,
    pub announcement_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let identity_public_key = required("IDENTITY_PUBLIC_KEY")?;
        DecodingKey::from_ed_pem(identity_public_key.as_bytes())
            .map_err(|e| AppError::Config(format!("IDENTITY_PUBLIC_KEY is not a valid Ed25519 PEM key: {}", e)))?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed("PORT", 3000)?,
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_default(),
            identity_public_key,
            identity_issuer: env::var("IDENTITY_ISSUER").ok().filter(|s| !s.is_empty()),
            identity_audience: env::var("IDENTITY_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string()),
            job_poll_interval_secs: parsed("JOB_POLL_INTERVAL_SECS", 5)?,
            announcement_refresh_secs: parsed("ANNOUNCEMENT_REFRESH_SECS", 3600)?,
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{} must be set", name)))
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
