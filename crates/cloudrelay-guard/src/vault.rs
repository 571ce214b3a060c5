//! In-memory credential masking.
//!
//! The bearer credential is stored as `cipher = plaintext ^ mask`, with the mask drawn
//! once from a cryptographically secure RNG. The plaintext only exists transiently,
//! inside the [`SecretString`] returned by [`CredentialVault::reveal`], which is zeroized
//! when dropped.
//!
//! This keeps the credential out of casual memory dumps and accidental `Debug` output.
//! It does not protect against an attacker who can read process memory, since the mask
//! lives next to the ciphertext.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors raised by the [`CredentialVault`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VaultError {
    /// The credential was empty or whitespace.
    #[error("credential must not be empty")]
    EmptyCredential,

    /// The unmasked bytes were not valid UTF-8.
    #[error("stored credential is corrupted")]
    Corrupted,
}

/// Holds a single credential XOR-masked in memory.
#[derive(ZeroizeOnDrop)]
pub struct CredentialVault {
    cipher: Vec<u8>,
    mask: Vec<u8>,
}

impl CredentialVault {
    /// Masks `credential` with a fresh mask from the operating system RNG.
    ///
    /// The plaintext is zeroized when `credential` is dropped at the end of this call.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::EmptyCredential`] if the credential is blank.
    pub fn new(credential: SecretString) -> Result<Self, VaultError> {
        Self::with_rng(credential, &mut OsRng)
    }

    /// Masks `credential` using the supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::EmptyCredential`] if the credential is blank.
    pub fn with_rng<R>(credential: SecretString, rng: &mut R) -> Result<Self, VaultError>
    where
        R: RngCore + CryptoRng,
    {
        let plaintext = credential.expose_secret();
        if plaintext.trim().is_empty() {
            return Err(VaultError::EmptyCredential);
        }

        let mut mask = vec![0u8; plaintext.len()];
        rng.fill_bytes(&mut mask);

        let cipher = plaintext
            .as_bytes()
            .iter()
            .zip(&mask)
            .map(|(p, m)| p ^ m)
            .collect();

        Ok(Self { cipher, mask })
    }

    /// Reconstitutes the credential.
    ///
    /// Use the returned value for a single request and drop it; dropping zeroizes it.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Corrupted`] if the stored bytes no longer decode.
    pub fn reveal(&self) -> Result<SecretString, VaultError> {
        let bytes: Vec<u8> = self
            .cipher
            .iter()
            .zip(&self.mask)
            .map(|(c, m)| c ^ m)
            .collect();

        // from_utf8 takes ownership without copying, so the only plaintext buffer is
        // the one handed to SecretString.
        match String::from_utf8(bytes) {
            Ok(plaintext) => Ok(SecretString::from(plaintext)),
            Err(err) => {
                err.into_bytes().zeroize();
                Err(VaultError::Corrupted)
            }
        }
    }

    /// Length of the stored credential in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cipher.len()
    }

    /// Always `false`; empty credentials are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cipher.is_empty()
    }
}

impl fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialVault")
            .field("credential", &"[REDACTED]")
            .field("len", &self.cipher.len())
            .finish()
    }
}
