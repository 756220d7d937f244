use std::sync::Arc;

use db::engine::AggregationEngine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use sea_orm::DatabaseConnection;
use util::config::AppConfig;

/// Shared handles every handler and guard can reach: the database, the
/// aggregation engine and the credentials loaded from configuration.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    engine: Arc<AggregationEngine>,
    jwt_encoding_key: EncodingKey,
    jwt_decoding_key: DecodingKey,
    jwt_duration_minutes: i64,
    admin_username: String,
    admin_password: String,
}

impl AppState {
    /// Builds the state from the global [`AppConfig`].
    pub fn new(db: DatabaseConnection, engine: Arc<AggregationEngine>) -> Self {
        let config = AppConfig::global();

        Self {
            db,
            engine,
            jwt_encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            jwt_decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            jwt_duration_minutes: config.jwt_duration_minutes as i64,
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_decoding_key
    }

    pub fn jwt_duration_minutes(&self) -> i64 {
        self.jwt_duration_minutes
    }

    /// Checks the configured administrator login.
    pub fn is_admin_login(&self, username: &str, password: &str) -> bool {
        !self.admin_password.is_empty()
            && username.trim() == self.admin_username
            && password == self.admin_password
    }
}
