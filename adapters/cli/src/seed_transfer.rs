#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "bomber";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded session payload.
pub(crate) const SNAPSHOT_HEADER: &str = "bomber:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of the seeds that reproduce a session, plus the grid shape the
/// seeds were captured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionSeedSnapshot {
    /// Number of tile columns contained in the grid.
    pub columns: u32,
    /// Number of tile rows contained in the grid.
    pub rows: u32,
    /// Seed that drives map generation and enemy spawns.
    pub world_seed: u64,
    /// Seed that drives enemy behavior timers and direction draws.
    pub ai_seed: u64,
}

impl SessionSeedSnapshot {
    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            world_seed: self.world_seed,
            ai_seed: self.ai_seed,
        };
        let json = serde_json::to_vec(&payload).expect("seed snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.columns, self.rows)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, SeedTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SeedTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SeedTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(SeedTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(SeedTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(SeedTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(SeedTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(SeedTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SeedTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(SeedTransferError::InvalidPayload)?;

        Ok(Self {
            columns,
            rows,
            world_seed: decoded.world_seed,
            ai_seed: decoded.ai_seed,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct SerializableSnapshot {
    world_seed: u64,
    ai_seed: u64,
}

/// Errors that can occur while decoding session transfer strings.
#[derive(Debug)]
pub(crate) enum SeedTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for SeedTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "session payload was empty"),
            Self::MissingPrefix => write!(f, "session string is missing the prefix"),
            Self::MissingVersion => write!(f, "session string is missing the version"),
            Self::MissingDimensions => write!(f, "session string is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "session string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "session prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "session version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode session payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse session payload: {error}")
            }
        }
    }
}

impl Error for SeedTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), SeedTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| SeedTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| SeedTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| SeedTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(SeedTransferError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_the_seeds() {
        let snapshot = SessionSeedSnapshot {
            columns: 13,
            rows: 11,
            world_seed: 0xdead_beef_0bad_f00d,
            ai_seed: 42,
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:13x11:")));

        let decoded = SessionSeedSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn decode_rejects_a_foreign_prefix() {
        let error = SessionSeedSnapshot::decode("puzzle:v1:13x11:e30")
            .expect_err("foreign prefix must be rejected");
        assert!(matches!(error, SeedTransferError::InvalidPrefix(_)));
    }

    #[test]
    fn decode_rejects_zero_dimensions() {
        let error = SessionSeedSnapshot::decode("bomber:v1:0x11:e30")
            .expect_err("zero columns must be rejected");
        assert!(matches!(error, SeedTransferError::InvalidDimensions(_)));
    }

    #[test]
    fn decode_rejects_an_empty_string() {
        let error =
            SessionSeedSnapshot::decode("   ").expect_err("blank payload must be rejected");
        assert!(matches!(error, SeedTransferError::EmptyPayload));
    }
}
