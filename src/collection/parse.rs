//! Regex decoding of the Michelson text blobs Conseil returns for the
//! ledger, token and metadata big maps.
//!
//! The maps store one fixed shape each; anything that does not match is
//! reported as a parse error and the caller decides whether to skip the row.

use crate::address::unpack_address;
use crate::collection::types::{ ExtraValue, ObjktDetails, OwnedObjkt };
use crate::conseil::BigMapRow;
use crate::core::{ IndexerError, IndexerResult };
use once_cell::sync::Lazy;
use regex::{ Captures, Regex };
use std::collections::HashMap;

/// Token detail value, in field order: extras block, price, artifact hash,
/// packed owner, sale flag, auction flag, collection id, packed creator,
/// royalty, edition index, edition size.
static OBJKT_DETAILS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"[{] [0-9]+ ; [{] (.*) [}] ; [0-9]+ ; ([0-9]+) ; "ipfs:\\/\\/([a-zA-Z0-9]+)" ; 0x([0-9a-z]+) ; ([TrueFals]+) ; ([TrueFals]+) ; ([0-9]+) ; 0x([0-9a-z]+) ; ([0-9]+) ; ([0-9]+) ; ([0-9]+) [}]"#
    ).expect("token detail pattern")
});

static OBJKT_METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^Pair [0-9]+ [{] Elt "" 0x([0-9a-z]+) ;"#).expect("token metadata pattern")
});

/// Ledger keys are `Pair 0x<packed address> <token id>`.
static OWNED_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.* ([0-9]+)$").expect("ledger key pattern")
});

/// Byte length of the `ipfs://` scheme prefix inside metadata payloads.
const METADATA_URI_PREFIX_LEN: usize = 7;

/// Decode one ledger row into the held token id and amount. Returns `None`
/// for rows whose key or value does not have the expected shape.
pub fn parse_owned_row(row: &BigMapRow) -> Option<OwnedObjkt> {
    let key = row.key_text();
    let caps = OWNED_KEY_PATTERN.captures(&key)?;
    let token_id = caps.get(1)?.as_str().parse().ok()?;
    let amount = row.value_text().parse().ok()?;

    Some(OwnedObjkt { token_id, amount })
}

/// Decode a token big map value into its detail record.
pub fn parse_details(value: &str) -> IndexerResult<ObjktDetails> {
    let caps = OBJKT_DETAILS_PATTERN.captures(value).ok_or_else(|| {
        IndexerError::Parse(format!("value did not match the token detail shape: {}", value))
    })?;

    Ok(ObjktDetails {
        extras: parse_extras(&caps[1]),
        price: numeric_group(&caps, 2)?,
        artifact_hash: caps[3].to_string(),
        owner: unpack_address(&caps[4])?,
        on_sale: &caps[5] == "True",
        on_auction: &caps[6] == "True",
        collection_id: numeric_group(&caps, 7)?,
        creator: unpack_address(&caps[8])?,
        royalty: numeric_group(&caps, 9)?,
        edition_index: numeric_group(&caps, 10)?,
        edition_size: numeric_group(&caps, 11)?,
    })
}

/// Decode a metadata big map value into its content hash.
pub fn parse_metadata_hash(value: &str) -> IndexerResult<String> {
    let caps = OBJKT_METADATA_PATTERN.captures(value).ok_or_else(|| {
        IndexerError::Parse(format!("value did not match the token metadata shape: {}", value))
    })?;

    decode_metadata_hash(&caps[1])
}

/// Strip the fixed `ipfs://` prefix from a hex-encoded metadata payload.
pub fn decode_metadata_hash(hex_payload: &str) -> IndexerResult<String> {
    let bytes = hex
        ::decode(hex_payload)
        .map_err(|e| IndexerError::Parse(format!("metadata payload is not valid hex: {}", e)))?;

    if bytes.len() < METADATA_URI_PREFIX_LEN {
        return Err(
            IndexerError::Parse(format!("metadata payload too short: {} bytes", bytes.len()))
        );
    }

    Ok(String::from_utf8_lossy(&bytes[METADATA_URI_PREFIX_LEN..]).into_owned())
}

/// Decode the extras block: `;`-separated `Elt "key" "value"` entries where
/// a value may itself be a comma-separated list.
fn parse_extras(blob: &str) -> HashMap<String, ExtraValue> {
    let mut extras = HashMap::new();

    for segment in blob.split(';') {
        let trimmed = segment.trim();
        let without_elt = trimmed.strip_prefix("Elt ").unwrap_or(trimmed);
        let entry = without_elt.replace('"', "");
        if entry.is_empty() {
            continue;
        }

        let (key, raw_values) = match entry.find(' ') {
            Some(i) => (entry[..i].to_string(), entry[i + 1..].to_string()),
            None => (entry.clone(), String::new()),
        };

        let mut values: Vec<String> = raw_values
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let value = if values.len() == 1 {
            ExtraValue::Single(values.remove(0))
        } else {
            ExtraValue::Many(values)
        };

        extras.insert(key, value);
    }

    extras
}

fn numeric_group(caps: &Captures<'_>, index: usize) -> IndexerResult<u64> {
    caps[index]
        .parse()
        .map_err(|_| IndexerError::Parse(format!("numeric field {} out of range: {}", index, &caps[index])))
}
