//! # Reference Identifiers
//!
//! A reference id is the human-shareable handle a student quotes when asking
//! about their acknowledgement. It is minted client-side, once per submission
//! attempt and before the network call, so it exists even though delivery of
//! the record is never confirmed.
//!
//! Format: `<PREFIX>-<base36 epoch millis>-<6 random base36 chars>`, upper
//! case, e.g. `ACK-LZ3K9Q2B-7F0XQ1`. Uniqueness is probabilistic: two ids
//! collide only if minted in the same millisecond with the same 31-bit
//! suffix.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PledgeError;
use crate::temporal::Timestamp;

/// Prefix used when the operator does not configure one.
pub const DEFAULT_REFERENCE_PREFIX: &str = "ACK";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 6;

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Human-shareable submission reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    /// Mint a new id with the current time and thread-local randomness.
    pub fn generate(prefix: &str) -> Self {
        Self::generate_with(prefix, &Timestamp::now(), &mut rand::thread_rng())
    }

    /// Mint an id from an explicit instant and random source.
    pub fn generate_with<R: Rng + ?Sized>(prefix: &str, at: &Timestamp, rng: &mut R) -> Self {
        let millis = u64::try_from(at.epoch_millis()).unwrap_or(0);
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())]))
            .collect();
        Self(format!("{prefix}-{}-{suffix}", to_base36(millis)))
    }

    /// Parse and check the shape of an existing id.
    ///
    /// The prefix may itself contain dashes; the timestamp and suffix are
    /// taken from the right.
    pub fn parse(s: &str) -> Result<Self, PledgeError> {
        let mut parts = s.rsplitn(3, '-');
        let (suffix, stamp, prefix) = match (parts.next(), parts.next(), parts.next()) {
            (Some(suffix), Some(stamp), Some(prefix)) => (suffix, stamp, prefix),
            _ => {
                return Err(PledgeError::InvalidIdentifier(format!(
                    "reference id must have three dash-separated parts: {s:?}"
                )))
            }
        };
        if prefix.is_empty() {
            return Err(PledgeError::InvalidIdentifier(format!(
                "reference id has an empty prefix: {s:?}"
            )));
        }
        if stamp.is_empty() || !is_upper_base36(stamp) {
            return Err(PledgeError::InvalidIdentifier(format!(
                "reference id timestamp is not upper-case base36: {stamp:?}"
            )));
        }
        if suffix.len() != SUFFIX_LEN || !is_upper_base36(suffix) {
            return Err(PledgeError::InvalidIdentifier(format!(
                "reference id suffix must be {SUFFIX_LEN} upper-case base36 characters: {suffix:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_upper_base36(s: &str) -> bool {
    s.bytes().all(|b| BASE36_DIGITS.contains(&b))
}

/// Upper-case base36 rendering of an unsigned integer.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn generated_id_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let at = Timestamp::from_epoch_millis(1_700_000_000_000).unwrap();
        let id = ReferenceId::generate_with("ACK", &at, &mut rng);
        let text = id.to_string();
        assert!(text.starts_with("ACK-LOYW3V28-"), "got {text}");
        assert_eq!(text.len(), "ACK-LOYW3V28-".len() + SUFFIX_LEN);
        assert!(ReferenceId::parse(&text).is_ok());
    }

    #[test]
    fn ids_are_unique_across_ten_thousand_calls() {
        let ids: HashSet<ReferenceId> =
            (0..10_000).map(|_| ReferenceId::generate(DEFAULT_REFERENCE_PREFIX)).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn parse_accepts_dashed_prefix() {
        let id = ReferenceId::parse("POL-ACK-LOYW3V28-ABC123").unwrap();
        assert_eq!(id.as_str(), "POL-ACK-LOYW3V28-ABC123");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(ReferenceId::parse("ACK").is_err());
        assert!(ReferenceId::parse("-LOYW3V28-ABC123").is_err());
        assert!(ReferenceId::parse("ACK-loyw3v28-ABC123").is_err());
        assert!(ReferenceId::parse("ACK-LOYW3V28-ABC").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ReferenceId::parse("ACK-1-ABCDEF").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ACK-1-ABCDEF\"");
    }
}
