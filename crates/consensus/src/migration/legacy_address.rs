// Path: crates/consensus/src/migration/legacy_address.rs

//! Decoding of Gen2 Base58 addresses.
//!
//! A Gen2 address is the Base58 (bitcoin alphabet) encoding of a version
//! byte, the 20-byte key hash and a 4-byte checksum. The checksum is not
//! verified: snapshot documents are produced by the legacy node itself and
//! their integrity is covered by the snapshot hash.

use range_types::error::MigrationError;
use range_types::primitives::bytes_to_address;
use range_types::Address;

const VERSION_LEN: usize = 1;
const CHECKSUM_LEN: usize = 4;
const MIN_PAYLOAD_LEN: usize = VERSION_LEN + CHECKSUM_LEN + 1;

/// Decodes a Gen2 address into its Gen3 form.
///
/// The bytes between the version byte and the checksum are interpreted as an
/// address: longer bodies keep their trailing 20 bytes, shorter ones are
/// left-padded.
pub fn decode_legacy_address(encoded: &str) -> Result<Address, MigrationError> {
    let fail = |reason: String| MigrationError::AddressDecode {
        address: encoded.to_string(),
        reason,
    };
    let raw = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| fail(e.to_string()))?;
    if raw.len() < MIN_PAYLOAD_LEN {
        return Err(fail(format!(
            "payload of {} bytes is shorter than {}",
            raw.len(),
            MIN_PAYLOAD_LEN
        )));
    }
    let body = raw
        .get(VERSION_LEN..raw.len() - CHECKSUM_LEN)
        .ok_or_else(|| fail("payload bounds".into()))?;
    Ok(bytes_to_address(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use range_test_utils::fixtures::{encode_legacy_address, LEGACY_P2PKH_VERSION};

    #[test]
    fn strips_version_and_checksum() {
        let mut payload = vec![0x21u8];
        payload.extend_from_slice(&[0xAB; 20]);
        payload.extend_from_slice(&[1, 2, 3, 4]);
        let encoded = bs58::encode(&payload).into_string();
        assert_eq!(
            decode_legacy_address(&encoded).unwrap(),
            Address::repeat_byte(0xAB)
        );
    }

    #[test]
    fn rejects_non_base58_characters() {
        // '0', 'O', 'I' and 'l' are not in the bitcoin alphabet.
        let err = decode_legacy_address("0OIl").unwrap_err();
        assert!(matches!(err, MigrationError::AddressDecode { .. }));
    }

    #[test]
    fn rejects_short_payloads() {
        let encoded = bs58::encode([0x21u8, 1, 2, 3, 4]).into_string();
        assert!(decode_legacy_address(&encoded).is_err());
        assert!(decode_legacy_address("").is_err());
    }

    #[test]
    fn short_body_is_left_padded() {
        let encoded = bs58::encode([0x21u8, 0x07, 9, 9, 9, 9]).into_string();
        assert_eq!(
            decode_legacy_address(&encoded).unwrap(),
            Address::from_low_u64_be(7)
        );
    }

    proptest! {
        #[test]
        fn decodes_any_encoded_address(bytes in proptest::array::uniform20(any::<u8>())) {
            let address = Address::from(bytes);
            let encoded = encode_legacy_address(LEGACY_P2PKH_VERSION, &address);
            prop_assert_eq!(decode_legacy_address(&encoded).unwrap(), address);
        }
    }
}
