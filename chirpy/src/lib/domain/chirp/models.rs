use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::chirp::errors::ChirpOrderError;
use crate::domain::user::models::UserId;

/// Longest accepted chirp, in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const PROFANITY_MASK: &str = "****";

/// A short text post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ChirpId {
    type Err = ChirpIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp text, length-checked and with profanity masked.
///
/// Words are split on single spaces and compared case-insensitively; a masked word is
/// replaced whole, so punctuation attached to it ("fornax!") keeps it unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    /// # Errors
    /// * `TooLong` - More than [`MAX_CHIRP_LENGTH`] characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if length > MAX_CHIRP_LENGTH {
            return Err(ChirpBodyError::TooLong {
                length,
                max: MAX_CHIRP_LENGTH,
            });
        }

        Ok(Self(mask_profanity(&body)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn mask_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                PROFANITY_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Direction of a chirp listing, by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChirpOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

impl FromStr for ChirpOrder {
    type Err = ChirpOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(ChirpOrder::OldestFirst),
            "desc" => Ok(ChirpOrder::NewestFirst),
            other => Err(ChirpOrderError::Unknown(other.to_string())),
        }
    }
}

/// Which chirps to list and in what order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChirpQuery {
    pub author_id: Option<UserId>,
    pub order: ChirpOrder,
}

/// Command to post a chirp as an authenticated user
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
    pub author_id: UserId,
}
