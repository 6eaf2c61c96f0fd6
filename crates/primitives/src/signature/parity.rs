//! The recovery-bit codec.
//!
//! A signature's one-bit recovery identifier appears on the wire in three
//! historical encodings, all of which coexist in chain data:
//!
//! | encoding | transaction variant | formula |
//! |---|---|---|
//! | `27 + r` | legacy, no replay protection | [`legacy_v`] |
//! | `35 + 2·chain_id + r` | legacy, [EIP-155] replay-protected | [`eip155_v`] |
//! | `r` | typed (fee-market) y-parity | [`y_parity_v`] |
//!
//! This module is a pure bidirectional mapping between the recovery id and
//! those encodings; it holds no state and never assumes a chain id.
//!
//! [EIP-155]: https://eips.ethereum.org/EIPS/eip-155

/// Error decoding a wire `v` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParityError {
    /// The `v` value fits none of the known encodings in the given context.
    #[error("invalid v value: {0}")]
    InvalidV(u64),
    /// `v >= 35` but subtracting `35 + 2·chain_id` does not leave a bit.
    #[error("v value {v} is inconsistent with chain id {chain_id}")]
    InconsistentChainId {
        /// The wire value.
        v: u64,
        /// The chain id used for decoding.
        chain_id: u64,
    },
}

/// Encodes a recovery id for a legacy transaction without replay
/// protection: `v = 27 + r`.
pub const fn legacy_v(recovery_id: u8) -> u64 {
    27 + recovery_id as u64
}

/// Encodes a recovery id for an EIP-155 replay-protected legacy
/// transaction: `v = 35 + 2·chain_id + r`.
pub const fn eip155_v(recovery_id: u8, chain_id: u64) -> u64 {
    35 + 2 * chain_id + recovery_id as u64
}

/// Encodes a recovery id for a typed transaction: the bit itself.
pub const fn y_parity_v(recovery_id: u8) -> u64 {
    recovery_id as u64
}

/// Decodes a wire `v` into the recovery id.
///
/// Precedence: the legacy pair `{27, 28}` first; then, when a non-zero
/// chain id is supplied, the EIP-155 range; finally the direct y-parity
/// form `{0, 1}`. An EIP-155 value that does not land on the supplied
/// chain id is an inconsistency, not a fallback.
pub fn recovery_id(v: u64, chain_id: Option<u64>) -> Result<u8, ParityError> {
    if v == 27 || v == 28 {
        return Ok((v - 27) as u8);
    }
    if let Some(chain_id) = chain_id.filter(|c| *c > 0) {
        if v >= 35 {
            let bit = v
                .checked_sub(35 + 2 * chain_id)
                .ok_or(ParityError::InconsistentChainId { v, chain_id })?;
            if bit > 1 {
                return Err(ParityError::InconsistentChainId { v, chain_id });
            }
            return Ok(bit as u8);
        }
    }
    if v <= 1 {
        return Ok(v as u8);
    }
    Err(ParityError::InvalidV(v))
}

/// Best-effort recovery id for a `v` whose chain id is unknown.
///
/// For `v >= 35` the bit is inferred from parity (`35 + 2·c` is always
/// odd). This is a heuristic: it is only sound when no chain id is
/// available, because it cannot detect a `v` from a different chain.
pub const fn parity_heuristic(v: u64) -> Option<u8> {
    match v {
        0 | 1 => Some(v as u8),
        27 | 28 => Some((v - 27) as u8),
        v if v >= 35 => Some(if v % 2 == 1 { 0 } else { 1 }),
        _ => None,
    }
}

/// Whether `v` carries EIP-155 replay protection for the given chain:
/// `v ∈ {35 + 2·chain_id, 36 + 2·chain_id}`.
pub const fn is_replay_protected(v: u64, chain_id: u64) -> bool {
    v == 35 + 2 * chain_id || v == 36 + 2 * chain_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_each_encoding() {
        assert_eq!(recovery_id(27, None), Ok(0));
        assert_eq!(recovery_id(28, Some(1)), Ok(1));
        assert_eq!(recovery_id(37, Some(1)), Ok(0));
        assert_eq!(recovery_id(38, Some(1)), Ok(1));
        assert_eq!(recovery_id(0, None), Ok(0));
        assert_eq!(recovery_id(1, None), Ok(1));
    }

    #[test]
    fn legacy_pair_wins_even_with_a_chain_id() {
        // chain id 0 with v in {27, 28} is a valid legacy signature, and a
        // positive chain id does not reinterpret the pair
        assert_eq!(recovery_id(27, Some(0)), Ok(0));
        assert_eq!(recovery_id(28, Some(5)), Ok(1));
        assert!(!is_replay_protected(27, 5));
    }

    #[test]
    fn inconsistent_chain_id_is_an_error() {
        // v = 37 encodes chain 1; decoding against chain 5 leaves a
        // negative bit
        assert_eq!(
            recovery_id(37, Some(5)),
            Err(ParityError::InconsistentChainId { v: 37, chain_id: 5 })
        );
        assert_eq!(
            recovery_id(40, Some(1)),
            Err(ParityError::InconsistentChainId { v: 40, chain_id: 1 })
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(recovery_id(2, None), Err(ParityError::InvalidV(2)));
        assert_eq!(recovery_id(29, None), Err(ParityError::InvalidV(29)));
    }

    #[test]
    fn heuristic_covers_documented_cases() {
        assert_eq!(parity_heuristic(27), Some(0));
        assert_eq!(parity_heuristic(28), Some(1));
        assert_eq!(parity_heuristic(37), Some(0));
        assert_eq!(parity_heuristic(38), Some(1));
        assert_eq!(parity_heuristic(29), None);
    }

    proptest! {
        #[test]
        fn encode_decode_round_trip(recid in 0u8..=1, chain_id in 1u64..u64::MAX / 4) {
            prop_assert_eq!(recovery_id(legacy_v(recid), None).unwrap(), recid);
            prop_assert_eq!(recovery_id(eip155_v(recid, chain_id), Some(chain_id)).unwrap(), recid);
            prop_assert_eq!(recovery_id(y_parity_v(recid), None).unwrap(), recid);
        }

        #[test]
        fn replay_protection_detection(recid in 0u8..=1, chain_id in 0u64..u64::MAX / 4) {
            let v = eip155_v(recid, chain_id);
            prop_assert!(is_replay_protected(v, chain_id));
            prop_assert!(!is_replay_protected(legacy_v(recid), chain_id));
        }
    }
}
