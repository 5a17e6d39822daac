//! Single-line transfer encoding for sharing level layouts.
//!
//! A level file is an ordinary JSON array on disk, but for pasting a
//! layout into chat or an issue tracker a one-line form is handier. The
//! encoding is `level:v1:<count>:<payload>` where the payload is the
//! base64 of the JSON record list and the count is the number of records
//! it must contain.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use tower_defence_core::PlacementRecord;

const TRANSFER_DOMAIN: &str = "level";
const TRANSFER_VERSION: &str = "v1";
const FIELD_DELIMITER: char = ':';

/// Failures raised while decoding a level transfer string.
#[derive(Debug, Error)]
pub(crate) enum TransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("transfer string was empty")]
    EmptyPayload,
    /// One of the colon-delimited segments was missing.
    #[error("transfer string is missing its {0} segment")]
    MissingSegment(&'static str),
    /// The string did not start with the expected domain.
    #[error("transfer domain '{0}' is not supported")]
    UnsupportedDomain(String),
    /// The string used a version this build cannot read.
    #[error("transfer version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The record count segment could not be parsed.
    #[error("could not parse record count '{0}'")]
    InvalidCount(String),
    /// The payload held a different number of records than declared.
    #[error("payload holds {actual} records but the header declares {declared}")]
    CountMismatch {
        /// Count declared in the header.
        declared: usize,
        /// Count actually decoded from the payload.
        actual: usize,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode transfer payload")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a valid record list.
    #[error("could not parse transfer payload")]
    InvalidPayload(#[source] serde_json::Error),
}

/// Encodes a record list into a single-line transfer string.
pub(crate) fn encode(records: &[PlacementRecord]) -> String {
    let json = serde_json::to_vec(records).expect("placement record serialization never fails");
    let payload = STANDARD_NO_PAD.encode(json);
    format!(
        "{TRANSFER_DOMAIN}:{TRANSFER_VERSION}:{count}:{payload}",
        count = records.len()
    )
}

/// Decodes a transfer string back into its record list.
pub(crate) fn decode(value: &str) -> Result<Vec<PlacementRecord>, TransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransferError::EmptyPayload);
    }

    let mut segments = trimmed.split(FIELD_DELIMITER);
    let domain = segments
        .next()
        .ok_or(TransferError::MissingSegment("domain"))?;
    let version = segments
        .next()
        .ok_or(TransferError::MissingSegment("version"))?;
    let count = segments
        .next()
        .ok_or(TransferError::MissingSegment("count"))?;
    let payload = segments
        .next()
        .ok_or(TransferError::MissingSegment("payload"))?;

    if domain != TRANSFER_DOMAIN {
        return Err(TransferError::UnsupportedDomain(domain.to_owned()));
    }
    if version != TRANSFER_VERSION {
        return Err(TransferError::UnsupportedVersion(version.to_owned()));
    }
    let declared = count
        .parse::<usize>()
        .map_err(|_| TransferError::InvalidCount(count.to_owned()))?;

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(TransferError::InvalidEncoding)?;
    let records: Vec<PlacementRecord> =
        serde_json::from_slice(&bytes).map_err(TransferError::InvalidPayload)?;

    if records.len() != declared {
        return Err(TransferError::CountMismatch {
            declared,
            actual: records.len(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_defence_core::Position;

    #[test]
    fn round_trip_empty_level() {
        let encoded = encode(&[]);
        assert!(encoded.starts_with("level:v1:0:"));
        let decoded = decode(&encoded).expect("transfer decodes");
        assert!(decoded.is_empty());
    }

    #[test]
    fn round_trip_populated_level() {
        let records = vec![
            PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0),
            PlacementRecord::new("Decoration.Tree", Position::new(30.0, 40.0), 0.5),
        ];

        let encoded = encode(&records);
        assert!(encoded.starts_with("level:v1:2:"));
        let decoded = decode(&encoded).expect("transfer decodes");
        assert_eq!(decoded, records);
    }

    #[test]
    fn foreign_domain_is_rejected() {
        let mangled = encode(&[]).replace("level:", "dungeon:");
        match decode(&mangled) {
            Err(TransferError::UnsupportedDomain(domain)) => assert_eq!(domain, "dungeon"),
            other => panic!("expected UnsupportedDomain, got {other:?}"),
        }
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let records = vec![PlacementRecord::new(
            "Tower.Archer",
            Position::new(0.0, 0.0),
            1.0,
        )];
        let mangled = encode(&records).replacen(":1:", ":3:", 1);
        match decode(&mangled) {
            Err(TransferError::CountMismatch {
                declared: 3,
                actual: 1,
            }) => {}
            other => panic!("expected CountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(decode("   "), Err(TransferError::EmptyPayload)));
    }
}
