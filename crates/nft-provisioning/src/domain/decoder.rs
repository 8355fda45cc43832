//! # Record Decoder
//!
//! Structural validation of the raw record. No cryptography and no session
//! access happen here.
//!
//! ## Checks, in order
//!
//! 1. Declared length fits the buffer
//! 2. Length is strictly greater than the header
//! 3. Type and version are the supported ones
//! 4. Data covers the whole unsigned payload
//! 5. Name plus terminator fits a slot, checked before the name is copied

use super::entities::{
    CollectionName, ContractAddress, DecodedRecord, ADDRESS_LENGTH, ALGORITHM_ID_SIZE,
    CHAIN_ID_SIZE, COLLECTION_NAME_CAPACITY, HEADER_SIZE, KEY_ID_SIZE, RECORD_TYPE_V1,
    RECORD_VERSION_V1,
};
use super::errors::StructuralError;

/// Size of the unsigned payload for a given collection name length.
pub fn unsigned_payload_size(collection_name_length: usize) -> usize {
    HEADER_SIZE
        + collection_name_length
        + ADDRESS_LENGTH
        + CHAIN_ID_SIZE
        + KEY_ID_SIZE
        + ALGORITHM_ID_SIZE
}

/// Decode the first `declared_length` bytes of `buffer`.
///
/// Nothing outside the returned record is touched; on error no part of the
/// record is exposed.
pub fn decode_record(
    buffer: &[u8],
    declared_length: usize,
) -> Result<DecodedRecord<'_>, StructuralError> {
    let data = buffer
        .get(..declared_length)
        .ok_or(StructuralError::DeclaredLengthOverrun {
            declared: declared_length,
            available: buffer.len(),
        })?;

    if data.len() <= HEADER_SIZE {
        return Err(StructuralError::TooShortForHeader {
            header: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let record_type = data[0];
    if record_type != RECORD_TYPE_V1 {
        return Err(StructuralError::UnsupportedType(record_type));
    }

    let record_version = data[1];
    if record_version != RECORD_VERSION_V1 {
        return Err(StructuralError::UnsupportedVersion(record_version));
    }

    let name_length = usize::from(data[2]);
    let payload_size = unsigned_payload_size(name_length);
    if data.len() < payload_size {
        return Err(StructuralError::TooShortForPayload {
            expected: payload_size,
            actual: data.len(),
        });
    }

    if name_length + 1 > COLLECTION_NAME_CAPACITY {
        return Err(StructuralError::CollectionNameTooLong {
            required: name_length + 1,
            capacity: COLLECTION_NAME_CAPACITY,
        });
    }

    let (unsigned_payload, signature_section) = data.split_at(payload_size);

    let (name, rest) = unsigned_payload[HEADER_SIZE..].split_at(name_length);
    let (address, rest) = rest.split_at(ADDRESS_LENGTH);
    let (chain_id, rest) = rest.split_at(CHAIN_ID_SIZE);
    let key_id = rest[0];
    let algorithm_id = rest[KEY_ID_SIZE];

    let collection_name =
        CollectionName::from_bytes(name).ok_or(StructuralError::CollectionNameTooLong {
            required: name_length + 1,
            capacity: COLLECTION_NAME_CAPACITY,
        })?;

    let mut contract_address: ContractAddress = [0u8; ADDRESS_LENGTH];
    contract_address.copy_from_slice(address);

    let mut chain_id_bytes = [0u8; CHAIN_ID_SIZE];
    chain_id_bytes.copy_from_slice(chain_id);

    Ok(DecodedRecord {
        record_type,
        record_version,
        collection_name,
        contract_address,
        chain_id: u64::from_be_bytes(chain_id_bytes),
        key_id,
        algorithm_id,
        unsigned_payload,
        signature_section,
    })
}
