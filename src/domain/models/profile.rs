use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeeShirtSize {
    #[default]
    NotSpecified,
    XsM,
    XsW,
    #[sqlx(rename = "S_M")]
    SM,
    #[sqlx(rename = "S_W")]
    SW,
    #[sqlx(rename = "M_M")]
    MM,
    #[sqlx(rename = "M_W")]
    MW,
    #[sqlx(rename = "L_M")]
    LM,
    #[sqlx(rename = "L_W")]
    LW,
    XlM,
    XlW,
    XxlM,
    XxlW,
    XxxlM,
    XxxlW,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub main_email: String,
    pub tee_shirt_size: TeeShirtSize,
    #[sqlx(skip)]
    pub conference_keys_to_attend: Vec<String>,
    #[sqlx(skip)]
    pub session_wishlist_keys: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(id: String, display_name: String, main_email: String) -> Self {
        Self {
            id,
            display_name,
            main_email,
            tee_shirt_size: TeeShirtSize::NotSpecified,
            conference_keys_to_attend: Vec::new(),
            session_wishlist_keys: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_attending(&self, conference_id: &str) -> bool {
        self.conference_keys_to_attend.iter().any(|k| k == conference_id)
    }

    pub fn has_wishlisted(&self, session_id: &str) -> bool {
        self.session_wishlist_keys.iter().any(|k| k == session_id)
    }
}

/// The authenticated caller, as resolved by the identity provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.email.split('@').next().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tee_shirt_size_wire_names() {
        assert_eq!(serde_json::to_string(&TeeShirtSize::XxxlW).unwrap(), "\"XXXL_W\"");
        assert_eq!(serde_json::to_string(&TeeShirtSize::NotSpecified).unwrap(), "\"NOT_SPECIFIED\"");
        let parsed: TeeShirtSize = serde_json::from_str("\"S_M\"").unwrap();
        assert_eq!(parsed, TeeShirtSize::SM);
    }

    #[test]
    fn test_identity_display_name_falls_back_to_email() {
        let identity = Identity { user_id: "u1".into(), email: "ada@example.com".into(), name: None };
        assert_eq!(identity.display_name(), "ada");
    }
}
