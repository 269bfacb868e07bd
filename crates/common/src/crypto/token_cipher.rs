//! AES-256-GCM cipher for refresh tokens at rest.
//!
//! Refresh credentials obtained from the calendar provider are never stored
//! in the clear. [`TokenCipher`] seals them into a base64 envelope that
//! carries the nonce alongside the ciphertext, so the same key decrypts the
//! value at calendar-read time.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

const ALGORITHM: &str = "AES-256-GCM";

/// Serializable envelope for an encrypted token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedToken {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub algorithm: String,
}

/// AES-256-GCM cipher bound to a single 32-byte key.
pub struct TokenCipher {
    key: Vec<u8>,
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCipher").field("key", &"[REDACTED]").finish()
    }
}

impl TokenCipher {
    /// Create a cipher from a raw 32-byte key.
    pub fn new(key: Vec<u8>) -> CommonResult<Self> {
        if key.len() != 32 {
            return Err(CommonError::Crypto("encryption key must be exactly 32 bytes".to_string()));
        }

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CommonError::Crypto(format!("failed to create cipher: {e}")))?;

        Ok(Self { key, cipher })
    }

    /// Create a cipher from a base64-encoded 32-byte key.
    pub fn from_base64_key(encoded: &str) -> CommonResult<Self> {
        let key = BASE64
            .decode(encoded.trim())
            .map_err(|e| CommonError::Crypto(format!("invalid base64 key: {e}")))?;
        Self::new(key)
    }

    /// Generate a random 32-byte symmetric key.
    pub fn generate_key() -> Vec<u8> {
        let mut key = vec![0u8; 32];
        OsRng.fill_bytes(&mut key);
        key
    }

    /// Encrypt a plaintext token into a base64 envelope string.
    pub fn seal(&self, plaintext: &str) -> CommonResult<String> {
        let nonce_bytes = generate_nonce();
        let ciphertext = self
            .cipher
            .encrypt(&Nonce::from(nonce_bytes), plaintext.as_bytes())
            .map_err(|e| CommonError::Crypto(format!("encryption failed: {e}")))?;

        let sealed = SealedToken {
            nonce: nonce_bytes.to_vec(),
            ciphertext,
            algorithm: ALGORITHM.to_string(),
        };
        let serialized = serde_json::to_vec(&sealed)?;
        Ok(BASE64.encode(serialized))
    }

    /// Decrypt a base64 envelope string produced by [`TokenCipher::seal`].
    pub fn open(&self, envelope: &str) -> CommonResult<String> {
        let decoded = BASE64
            .decode(envelope)
            .map_err(|e| CommonError::Crypto(format!("base64 decode failed: {e}")))?;
        let sealed: SealedToken = serde_json::from_slice(&decoded)?;

        if sealed.algorithm != ALGORITHM {
            return Err(CommonError::Crypto(format!(
                "unsupported algorithm: {}",
                sealed.algorithm
            )));
        }

        let nonce: [u8; 12] = sealed.nonce.as_slice().try_into().map_err(|_| {
            CommonError::Crypto("nonce must be exactly 12 bytes for AES-256-GCM".to_string())
        })?;

        let plaintext = self
            .cipher
            .decrypt(&Nonce::from(nonce), sealed.ciphertext.as_ref())
            .map_err(|e| CommonError::Crypto(format!("decryption failed: {e}")))?;

        String::from_utf8(plaintext)
            .map_err(|e| CommonError::Crypto(format!("decrypted token is not UTF-8: {e}")))
    }

    /// Short fingerprint of the current key, safe to log.
    pub fn key_fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&self.key);
        let result = hasher.finalize();
        BASE64.encode(&result[..8])
    }
}

fn generate_nonce() -> [u8; 12] {
    let mut nonce = [0u8; 12];
    OsRng.fill_bytes(&mut nonce);
    nonce
}
