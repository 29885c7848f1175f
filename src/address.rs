//! Packing between base58check Tezos addresses and the raw byte form that
//! appears inside Michelson big map keys and values.

use crate::core::{ IndexerError, IndexerResult };

const TZ1_PREFIX: [u8; 3] = [6, 161, 159];
const TZ2_PREFIX: [u8; 3] = [6, 161, 161];
const TZ3_PREFIX: [u8; 3] = [6, 161, 164];
const KT1_PREFIX: [u8; 3] = [2, 90, 121];

/// Pack a `tz1`/`tz2`/`tz3`/`KT1` address into the hex byte form used in
/// big map keys: tag bytes plus the 20-byte hash.
pub fn pack_address(address: &str) -> IndexerResult<String> {
    let payload = bs58
        ::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| IndexerError::InvalidAddress(format!("{}: {}", address, e)))?;

    if payload.len() != 23 {
        return Err(
            IndexerError::InvalidAddress(
                format!("{}: unexpected payload length {}", address, payload.len())
            )
        );
    }

    let (prefix, hash) = payload.split_at(3);
    match prefix {
        p if p == TZ1_PREFIX => Ok(format!("0000{}", hex::encode(hash))),
        p if p == TZ2_PREFIX => Ok(format!("0001{}", hex::encode(hash))),
        p if p == TZ3_PREFIX => Ok(format!("0002{}", hex::encode(hash))),
        p if p == KT1_PREFIX => Ok(format!("01{}00", hex::encode(hash))),
        _ => Err(IndexerError::InvalidAddress(format!("{}: unsupported address kind", address))),
    }
}

/// Recover the base58check address from its packed hex form.
pub fn unpack_address(packed: &str) -> IndexerResult<String> {
    let bytes = hex
        ::decode(packed)
        .map_err(|e| IndexerError::InvalidAddress(format!("{}: {}", packed, e)))?;

    if bytes.len() != 22 {
        return Err(
            IndexerError::InvalidAddress(
                format!("{}: unexpected packed length {}", packed, bytes.len())
            )
        );
    }

    let (prefix, hash): ([u8; 3], &[u8]) = match bytes[0] {
        0x00 =>
            match bytes[1] {
                0x00 => (TZ1_PREFIX, &bytes[2..]),
                0x01 => (TZ2_PREFIX, &bytes[2..]),
                0x02 => (TZ3_PREFIX, &bytes[2..]),
                tag => {
                    return Err(
                        IndexerError::InvalidAddress(format!("{}: unknown key hash tag {}", packed, tag))
                    );
                }
            }
        0x01 => {
            if bytes[21] != 0x00 {
                return Err(
                    IndexerError::InvalidAddress(format!("{}: malformed originated address", packed))
                );
            }
            (KT1_PREFIX, &bytes[1..21])
        }
        tag => {
            return Err(
                IndexerError::InvalidAddress(format!("{}: unknown address tag {}", packed, tag))
            );
        }
    };

    let mut payload = prefix.to_vec();
    payload.extend_from_slice(hash);

    Ok(bs58::encode(payload).with_check().into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_implicit_address() {
        assert_eq!(
            pack_address("tz1Y68Da76MHixYhJhyU36bVh7a8C9UmtvrR").unwrap(),
            "00008890efbd6ca6bbd7771c116111a2eec4169e0ed8"
        );
    }

    #[test]
    fn test_pack_all_address_kinds() {
        assert_eq!(
            pack_address("tz1KjMn6Hb23eu1rNemou6ytAzzNxzvaYHyK").unwrap(),
            "00000102030405060708090a0b0c0d0e0f1011121314"
        );
        assert_eq!(
            pack_address("tz28QZkJtASQaeeieppeZjx8iaFPUtPpBrZd").unwrap(),
            "00010102030405060708090a0b0c0d0e0f1011121314"
        );
        assert_eq!(
            pack_address("tz3LRNhdn2ZwyH7255tuZhQWXw8uFiXNJRVw").unwrap(),
            "00020102030405060708090a0b0c0d0e0f1011121314"
        );
        assert_eq!(
            pack_address("KT18g6ejmStajqDwZZ5ZwTfu1ZKzhYq5RboW").unwrap(),
            "010102030405060708090a0b0c0d0e0f101112131400"
        );
    }

    #[test]
    fn test_unpack_round_trips() {
        for address in [
            "tz1Y68Da76MHixYhJhyU36bVh7a8C9UmtvrR",
            "tz28QZkJtASQaeeieppeZjx8iaFPUtPpBrZd",
            "tz3LRNhdn2ZwyH7255tuZhQWXw8uFiXNJRVw",
            "KT18g6ejmStajqDwZZ5ZwTfu1ZKzhYq5RboW",
        ] {
            let packed = pack_address(address).unwrap();
            assert_eq!(unpack_address(&packed).unwrap(), address);
        }
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(pack_address("not-an-address").is_err());
        assert!(unpack_address("zz").is_err());
        assert!(unpack_address("0000").is_err());
        // unknown leading tag
        assert!(unpack_address("02000102030405060708090a0b0c0d0e0f1011121314").is_err());
    }
}
