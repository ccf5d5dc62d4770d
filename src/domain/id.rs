use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of every record identifier: 16 random bytes rendered as hex.
pub const ID_LEN: usize = 32;

#[derive(Error, Debug, PartialEq)]
pub enum IdError {
    #[error("expected {ID_LEN} characters, got {0}")]
    WrongLength(usize),
    #[error("expected lowercase hexadecimal characters")]
    NotHex,
}

/// A record identifier: exactly 32 lowercase hexadecimal characters.
///
/// Every id in a bundle (payment, settlement payment, ledger entries,
/// transaction record) and the transaction scope token share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexId(String);

impl HexId {
    pub fn parse(value: &str) -> Result<Self, IdError> {
        if value.len() != ID_LEN {
            return Err(IdError::WrongLength(value.len()));
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(IdError::NotHex);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexId> for String {
    fn from(id: HexId) -> Self {
        id.0
    }
}

/// Supplies fresh random record identifiers.
///
/// Ids are uniformly random per call and never derived from input data, so
/// re-running a bundle always produces a disjoint set of records.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> HexId;
}

pub type IdGeneratorBox = Box<dyn IdGenerator>;
