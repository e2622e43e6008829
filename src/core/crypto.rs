//! Symmetric envelope operations.
//!
//! Encrypted values travel as three base64 fields: ciphertext, nonce (IV),
//! and authentication tag. This module decodes that envelope and runs
//! AES-256-GCM with a detached tag, plus HKDF-SHA256 key derivation for
//! turning credential material into fixed-size keys.

use aes_gcm::{
    aead::{AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};

/// Size of encryption keys in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// HKDF info string for the key derived from service token key material.
pub const CREDENTIAL_KEY_INFO: &str = "warren/v1/credential-key";

/// HKDF info string for the workspace key.
pub const WORKSPACE_KEY_INFO: &str = "warren/v1/workspace-key";

/// One encrypted value, decoded from its three wire fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
}

impl Envelope {
    /// Decode the three base64 fields of an encrypted value.
    ///
    /// `field` names the logical field (e.g. "secret value") in errors.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encoding` on invalid base64 and
    /// `CryptoError::Malformed` when the nonce or tag has the wrong length.
    pub fn decode(
        ciphertext_b64: &str,
        nonce_b64: &str,
        tag_b64: &str,
        field: &'static str,
    ) -> Result<Self> {
        let ciphertext = decode_b64(ciphertext_b64, field)?;

        let nonce_bytes = decode_b64(nonce_b64, field)?;
        let nonce: [u8; NONCE_SIZE] = nonce_bytes.try_into().map_err(|bytes: Vec<u8>| {
            CryptoError::Malformed {
                field,
                reason: format!("nonce must be {} bytes, got {}", NONCE_SIZE, bytes.len()),
            }
        })?;

        let tag_bytes = decode_b64(tag_b64, field)?;
        let tag: [u8; TAG_SIZE] =
            tag_bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| CryptoError::Malformed {
                    field,
                    reason: format!("tag must be {} bytes, got {}", TAG_SIZE, bytes.len()),
                })?;

        Ok(Self {
            ciphertext,
            nonce,
            tag,
        })
    }

    /// Encode back into the three base64 wire fields:
    /// (ciphertext, nonce, tag).
    pub fn encode(&self) -> (String, String, String) {
        (
            BASE64.encode(&self.ciphertext),
            BASE64.encode(self.nonce),
            BASE64.encode(self.tag),
        )
    }
}

fn decode_b64(encoded: &str, field: &'static str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded)
        .map_err(|source| CryptoError::Encoding { field, source }.into())
}

/// A 256-bit symmetric key, wiped from memory on drop.
pub struct SymmetricKey(Zeroizing<[u8; KEY_SIZE]>);

impl SymmetricKey {
    /// Generate a random key.
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        OsRng.fill_bytes(key.as_mut());
        Self(key)
    }

    /// Derive a key from arbitrary-length material with HKDF-SHA256.
    ///
    /// `info` separates derivation domains; the same material with a
    /// different info string yields an unrelated key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` if expansion fails.
    pub fn derive(material: &[u8], info: &str) -> Result<Self> {
        let hk = Hkdf::<Sha256>::new(None, material);
        let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
        hk.expand(info.as_bytes(), okm.as_mut())
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
        Ok(Self(okm))
    }

    /// Encrypt plaintext under a fresh random nonce.
    ///
    /// Every call draws a new 96-bit nonce from the OS; a nonce is never
    /// reused under the same key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encrypt` if the cipher rejects the input.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Envelope> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.0.as_ref()));

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let mut buffer = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
            .map_err(|e| CryptoError::Encrypt(e.to_string()))?;

        Ok(Envelope {
            ciphertext: buffer,
            nonce,
            tag: tag.into(),
        })
    }

    /// Decrypt an envelope.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Authentication` when the tag does not verify;
    /// no plaintext is produced in that case, partial or otherwise.
    pub fn open(&self, envelope: &Envelope, field: &'static str) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.0.as_ref()));

        let mut buffer = envelope.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&envelope.nonce),
                b"",
                &mut buffer,
                Tag::from_slice(&envelope.tag),
            )
            .map_err(|_| CryptoError::Authentication { field })?;

        Ok(Zeroizing::new(buffer))
    }

    /// Decrypt an envelope and interpret the plaintext as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Authentication` on tag failure and
    /// `CryptoError::InvalidUtf8` when the plaintext is not valid UTF-8.
    pub fn open_string(&self, envelope: &Envelope, field: &'static str) -> Result<String> {
        let plaintext = self.open(envelope, field)?;
        let value = std::str::from_utf8(&plaintext)
            .map_err(|_| CryptoError::InvalidUtf8 { field })?
            .to_string();
        Ok(value)
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey(<redacted>)")
    }
}
