//! Cryptographic primitives.

mod token_cipher;

pub use token_cipher::{SealedToken, TokenCipher};
