use conference_backend::{
    api::router::create_router,
    background::process_pending_jobs,
    config::Config,
    domain::ports::EmailService,
    error::AppError,
    infra::{cache::memory_cache::MemoryCache, factory::{load_templates, run_sqlite_migrations}},
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header, Algorithm};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_ISSUER: &str = "test-issuer";
pub const TEST_AUDIENCE: &str = "conference-frontend";

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await.expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            identity_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            identity_issuer: Some(TEST_ISSUER.to_string()),
            identity_audience: TEST_AUDIENCE.to_string(),
            job_poll_interval_secs: 1,
            announcement_refresh_secs: 3600,
        };

        let mailer = Arc::new(MockEmailService::default());
        let state = Arc::new(AppState::new(
            config,
            pool.clone(),
            Arc::new(MemoryCache::new()),
            mailer.clone(),
            Arc::new(load_templates().expect("Failed to load templates")),
        ));

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state, mailer }
    }

    /// Mints a bearer token for a user, signed with the test identity key.
    pub fn token_for(&self, user_id: &str, email: &str, name: Option<&str>) -> String {
        let claims = json!({
            "sub": user_id,
            "email": email,
            "name": name,
            "aud": TEST_AUDIENCE,
            "iss": TEST_ISSUER,
            "exp": (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        });
        let key = EncodingKey::from_ed_pem(include_bytes!("../tests/keys/test_private.pem")).unwrap();
        encode(&Header::new(Algorithm::EdDSA), &claims, &key).unwrap()
    }

    pub fn token(&self, user: &str) -> String {
        self.token_for(user, &format!("{}@example.com", user), Some(user))
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    /// Runs queued jobs until the queue is drained.
    pub async fn run_jobs(&self) {
        while process_pending_jobs(&self.state).await > 0 {}
    }

    pub async fn create_conference(&self, token: &str, body: Value) -> Value {
        let res = self.request("POST", "/api/v1/conferences", Some(token), Some(body)).await;
        assert!(res.status().is_success(), "create conference failed: {}", res.status());
        parse_body(res).await
    }

    pub async fn create_speaker(&self, token: &str, name: &str) -> String {
        let res = self.request("POST", "/api/v1/speakers", Some(token), Some(json!({ "name": name }))).await;
        assert!(res.status().is_success(), "create speaker failed: {}", res.status());
        parse_body(res).await["id"].as_str().unwrap().to_string()
    }

    pub async fn create_session(&self, token: &str, conference_id: &str, body: Value) -> Value {
        let res = self.request(
            "POST", &format!("/api/v1/conferences/{}/sessions", conference_id), Some(token), Some(body),
        ).await;
        assert!(res.status().is_success(), "create session failed: {}", res.status());
        parse_body(res).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
