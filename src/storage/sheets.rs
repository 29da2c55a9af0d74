use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::StorageError;
use crate::storage::{CredentialSource, ServiceAccountKey, SetupRow, SetupStorage};

const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before Google says the token expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    TOKEN_LIFETIME_SECS as u64
}

#[derive(Debug, Serialize)]
struct AppendBody {
    values: Vec<Vec<serde_json::Value>>,
}

pub struct GoogleSheetsClient {
    client: Client,
    spreadsheet_id: String,
    range: String,
    credentials: CredentialSource,
    token: Mutex<Option<(String, Instant)>>,
}

impl GoogleSheetsClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            spreadsheet_id: cfg.spreadsheet_id.clone(),
            range: cfg.sheet_range.clone(),
            credentials: CredentialSource {
                file: cfg.service_account_file.clone(),
                inline_json: cfg.google_credentials.clone(),
            },
            token: Mutex::new(None),
        }
    }

    fn sign_assertion(key: &ServiceAccountKey) -> Result<String, StorageError> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            iss: key.client_email.clone(),
            scope: SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        // private_key is a PKCS#8 PEM block
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
    }

    async fn access_token(&self) -> Result<String, StorageError> {
        let mut cached = self.token.lock().await;
        if let Some((token, expires_at)) = cached.as_ref() {
            if Instant::now() + TOKEN_REFRESH_MARGIN < *expires_at {
                return Ok(token.clone());
            }
        }

        let key = self.credentials.load()?;
        let assertion = Self::sign_assertion(&key)?;

        let resp = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: TokenResponse = resp.json().await?;
        debug!("Fetched sheets access token, valid for {}s", data.expires_in);
        let expires_at = Instant::now() + Duration::from_secs(data.expires_in);
        *cached = Some((data.access_token.clone(), expires_at));
        Ok(data.access_token)
    }

    fn append_url(&self) -> String {
        format!(
            "{}/{}/values/{}:append",
            SHEETS_URL, self.spreadsheet_id, self.range
        )
    }
}

#[async_trait]
impl SetupStorage for GoogleSheetsClient {
    async fn append_row(&self, row: &SetupRow) -> Result<(), StorageError> {
        let token = self.access_token().await?;
        let body = AppendBody {
            values: vec![row.to_values()],
        };

        let resp = self
            .client
            .post(self.append_url())
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            "Saved {} {} setup to spreadsheet {}",
            row.instrument, row.direction, self.spreadsheet_id
        );
        Ok(())
    }

    fn location_url(&self) -> Option<String> {
        Some(format!(
            "https://docs.google.com/spreadsheets/d/{}/edit",
            self.spreadsheet_id
        ))
    }
}
