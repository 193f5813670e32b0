use std::fmt::Display;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying access tokens.
///
/// Pinned to HS256 (HMAC with SHA-256). A token whose header names any other algorithm is
/// rejected before its signature is looked at, so an asymmetric-algorithm header can never
/// trick the verifier into treating the secret as a public key.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed access token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is zero or negative
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<String, JwtError> {
        if ttl.num_seconds() <= 0 {
            return Err(JwtError::InvalidTtl(ttl.num_seconds()));
        }

        self.encode(&Claims::for_subject(subject, Utc::now(), ttl))
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Checks, in order: the header algorithm, the signature, expiry (no leeway), and the
    /// issuer.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is not a well-formed JWT or has the wrong issuer
    /// * `WrongAlgorithm` - Header declares anything other than HS256
    /// * `BadSignature` - Signature does not match header and claims
    /// * `Expired` - Current time is past `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let header = decode_header(token)?;
        if header.alg != self.algorithm {
            return Err(JwtError::WrongAlgorithm(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Validate a token and parse its subject.
    ///
    /// # Errors
    /// Everything `decode` returns, plus `MalformedSubject` when `sub` does not parse as `T`.
    pub fn verify_subject<T>(&self, token: &str) -> Result<T, JwtError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let claims = self.decode(token)?;

        claims
            .sub
            .parse()
            .map_err(|e: T::Err| JwtError::MalformedSubject(e.to_string()))
    }
}
