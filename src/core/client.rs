//! HTTP client for the secret store API.
//!
//! Two fetch paths exist, one per credential mode. Bearer tokens hit the
//! plaintext endpoint and get decrypted values back; service tokens hit the
//! encrypted endpoint and decrypt locally with the workspace key unwrapped
//! during [`ServiceTokenSource::open`]. Both paths produce the same
//! [`Secret`] batches with personal-over-shared precedence applied, so
//! resolution never cares which mode is active.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::core::crypto::{Envelope, SymmetricKey, CREDENTIAL_KEY_INFO, WORKSPACE_KEY_INFO};
use crate::core::domain::{apply_personal_precedence, Credential, Secret, SecretType, ServiceToken};
use crate::core::resolve::SecretSource;
use crate::error::{ApiError, Result};

/// Timeout for store requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over the blocking HTTP client: base URL, bearer header,
/// JSON responses.
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_token: Zeroizing<String>,
}

impl ApiClient {
    /// Build a client for `base_url`, authenticating every request with
    /// `auth_token` as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be built.
    pub fn new(base_url: &str, auth_token: Zeroizing<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    /// GET `path` with `query` and deserialize the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response, with the
    /// response body as the message, and `ApiError::Http` for transport
    /// and decoding failures.
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "store request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.auth_token.as_str()))
            .send()
            .map_err(ApiError::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Status { status, message }.into());
        }

        response.json().map_err(|e| ApiError::Http(e).into())
    }
}

/// One plaintext secret as the store returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlainSecretDto {
    secret_key: String,
    secret_value: String,
    #[serde(default)]
    secret_comment: String,
    #[serde(rename = "type", default)]
    secret_type: SecretType,
}

#[derive(Debug, Deserialize)]
struct PlainSecretsResponse {
    secrets: Vec<PlainSecretDto>,
}

/// One encrypted secret: three envelopes of (ciphertext, IV, tag) fields.
///
/// The store spells the IV fields with a capital `IV`, which camelCase
/// renaming would miss, so every field is renamed explicitly.
#[derive(Debug, Deserialize)]
struct EncryptedSecretDto {
    #[serde(rename = "secretKeyCiphertext")]
    secret_key_ciphertext: String,
    #[serde(rename = "secretKeyIV")]
    secret_key_iv: String,
    #[serde(rename = "secretKeyTag")]
    secret_key_tag: String,
    #[serde(rename = "secretValueCiphertext")]
    secret_value_ciphertext: String,
    #[serde(rename = "secretValueIV")]
    secret_value_iv: String,
    #[serde(rename = "secretValueTag")]
    secret_value_tag: String,
    #[serde(rename = "secretCommentCiphertext", default)]
    secret_comment_ciphertext: Option<String>,
    #[serde(rename = "secretCommentIV", default)]
    secret_comment_iv: Option<String>,
    #[serde(rename = "secretCommentTag", default)]
    secret_comment_tag: Option<String>,
    #[serde(rename = "type", default)]
    secret_type: SecretType,
}

#[derive(Debug, Deserialize)]
struct EncryptedSecretsResponse {
    secrets: Vec<EncryptedSecretDto>,
}

/// Service token details: the workspace key wrapped for this token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceTokenDetailsResponse {
    encrypted_key: String,
    iv: String,
    tag: String,
}

/// Source backed by a bearer token and the plaintext endpoint.
pub struct BearerSource {
    client: ApiClient,
    project_id: Option<String>,
}

impl BearerSource {
    /// Connect with a bearer token. No requests are made until the first
    /// fetch.
    pub fn open(config: &Config, token: Zeroizing<String>) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(&config.store.base_url, token)?,
            project_id: config.store.project_id.clone(),
        })
    }
}

impl SecretSource for BearerSource {
    fn fetch(&self, environment: &str, path: &str) -> Result<Vec<Secret>> {
        let mut query: Vec<(&str, &str)> =
            vec![("environment", environment), ("secretPath", path)];
        if let Some(project_id) = &self.project_id {
            query.push(("workspaceId", project_id));
        }

        let response: PlainSecretsResponse =
            self.client.get_json("/api/v3/secrets/raw", &query)?;
        debug!(
            environment = %environment,
            path = %path,
            count = response.secrets.len(),
            "fetched plaintext batch"
        );

        let secrets = response
            .secrets
            .into_iter()
            .map(|dto| Secret {
                key: dto.secret_key,
                value: dto.secret_value,
                comment: dto.secret_comment,
                secret_type: dto.secret_type,
                path: path.to_string(),
                environment: environment.to_string(),
            })
            .collect();

        Ok(apply_personal_precedence(secrets))
    }
}

/// Source backed by a service token and the encrypted endpoint.
///
/// Holds the unwrapped workspace key for the lifetime of the source;
/// every fetched record is decrypted locally before it leaves this module.
pub struct ServiceTokenSource {
    client: ApiClient,
    workspace_key: SymmetricKey,
}

impl ServiceTokenSource {
    /// Connect with a service token and unwrap the workspace key.
    ///
    /// Fetches the token's details, derives the credential key from the
    /// token's client-side key material, and opens the wrapped workspace
    /// key with it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` variants for request failures and `CryptoError`
    /// variants when the wrapped key does not decode or authenticate,
    /// which usually means a mangled or truncated token.
    pub fn open(config: &Config, token: &ServiceToken) -> Result<Self> {
        let client = ApiClient::new(&config.store.base_url, token.auth_token())?;

        let details: ServiceTokenDetailsResponse =
            client.get_json("/api/v2/service-token", &[])?;

        let credential_key =
            SymmetricKey::derive(token.key_material().as_bytes(), CREDENTIAL_KEY_INFO)?;
        let envelope = Envelope::decode(
            &details.encrypted_key,
            &details.iv,
            &details.tag,
            "workspace key",
        )?;
        let material = credential_key.open(&envelope, "workspace key")?;
        let workspace_key = SymmetricKey::derive(&material, WORKSPACE_KEY_INFO)?;
        debug!("workspace key unwrapped");

        Ok(Self {
            client,
            workspace_key,
        })
    }

    /// Decrypt one record with the workspace key. The comment envelope is
    /// optional; records without one get an empty comment.
    fn decrypt_record(
        &self,
        dto: EncryptedSecretDto,
        environment: &str,
        path: &str,
    ) -> Result<Secret> {
        let key_envelope = Envelope::decode(
            &dto.secret_key_ciphertext,
            &dto.secret_key_iv,
            &dto.secret_key_tag,
            "secret key",
        )?;
        let key = self.workspace_key.open_string(&key_envelope, "secret key")?;

        let value_envelope = Envelope::decode(
            &dto.secret_value_ciphertext,
            &dto.secret_value_iv,
            &dto.secret_value_tag,
            "secret value",
        )?;
        let value = self
            .workspace_key
            .open_string(&value_envelope, "secret value")?;

        let comment = match (
            &dto.secret_comment_ciphertext,
            &dto.secret_comment_iv,
            &dto.secret_comment_tag,
        ) {
            (Some(ciphertext), Some(iv), Some(tag)) => {
                let envelope = Envelope::decode(ciphertext, iv, tag, "secret comment")?;
                self.workspace_key.open_string(&envelope, "secret comment")?
            }
            _ => String::new(),
        };

        Ok(Secret {
            key,
            value,
            comment,
            secret_type: dto.secret_type,
            path: path.to_string(),
            environment: environment.to_string(),
        })
    }
}

impl SecretSource for ServiceTokenSource {
    fn fetch(&self, environment: &str, path: &str) -> Result<Vec<Secret>> {
        let query = [("environment", environment), ("secretPath", path)];

        let response: EncryptedSecretsResponse = self.client.get_json("/api/v2/secrets", &query)?;
        debug!(
            environment = %environment,
            path = %path,
            count = response.secrets.len(),
            "fetched encrypted batch"
        );

        let mut secrets = Vec::with_capacity(response.secrets.len());
        for dto in response.secrets {
            secrets.push(self.decrypt_record(dto, environment, path)?);
        }

        Ok(apply_personal_precedence(secrets))
    }
}

/// Build the source matching the credential mode.
///
/// # Errors
///
/// Service tokens authenticate and unwrap the workspace key here, so any
/// connection or decryption failure surfaces immediately. Bearer sources
/// defer all requests to the first fetch.
pub fn source_for(config: &Config, credential: &Credential) -> Result<Box<dyn SecretSource>> {
    match credential {
        Credential::Bearer(token) => Ok(Box::new(BearerSource::open(config, token.clone())?)),
        Credential::ServiceToken(token) => Ok(Box::new(ServiceTokenSource::open(config, token)?)),
    }
}
