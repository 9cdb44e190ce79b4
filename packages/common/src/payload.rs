//! Bridge payload wire codec.
//!
//! The locker encodes a batch of depositors into a single compose payload that
//! travels with the bridged tokens; the executor decodes it on the destination
//! chain. Both sides may be deployed by different parties, so this layout is a
//! bit-exact external contract and must never drift.
//!
//! # Byte Layout (64 + 32k bytes total)
//! - Bytes 0-31:   campaign hash (32 bytes)
//! - Bytes 32-63:  nonce (uint256, big-endian, left-padded)
//! - Bytes 64+:    k depositor entries of 32 bytes each:
//!   - entry bytes 0-19:  depositor owner address (20-byte canonical form)
//!   - entry bytes 20-31: amount (uint96, big-endian)
//!
//! An entry is the Solidity packing `uint256(uint160(owner)) << 96 | amount`,
//! written out big-endian.
//!
//! The encoder over-allocates for the worst case (every candidate depositor
//! included) and shrinks afterwards, so `resize` only ever shrinks; growing
//! would expose uninitialized bytes and is rejected.

use thiserror::Error;

/// Byte offset of the campaign hash within the header
pub const CAMPAIGN_HASH_OFFSET: usize = 0;

/// Byte offset of the nonce within the header
pub const NONCE_OFFSET: usize = 32;

/// Total header size in bytes
pub const HEADER_SIZE: usize = 64;

/// Size of one depositor entry in bytes
pub const ENTRY_SIZE: usize = 32;

/// Size of the owner address within an entry
pub const OWNER_BYTES: usize = 20;

/// Largest amount representable in an entry's 96-bit amount field
pub const MAX_WIRE_AMOUNT: u128 = (1u128 << 96) - 1;

/// Decode failures. All of these are permanent: re-delivery of the same
/// malformed buffer fails identically, so callers must not retry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Truncated payload: got {got} bytes, the header alone is 64")]
    Truncated { got: usize },

    #[error("Misaligned payload: {got} bytes after the header is not a multiple of 32")]
    Misaligned { got: usize },

    #[error("Entry index {index} out of bounds: payload holds {entries} entries")]
    OutOfBounds { index: usize, entries: usize },

    #[error("Cannot grow payload: holds {current} entries, requested {requested}")]
    CannotGrow { current: usize, requested: usize },
}

/// Decoded header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadHeader {
    /// Campaign hash, bytes [0,32)
    pub campaign_hash: [u8; 32],
    /// Nonce, bytes [32,64), preserved verbatim
    pub nonce: [u8; 32],
}

impl PayloadHeader {
    /// Low 8 bytes of the nonce as a u64 (the locker only ever writes u64
    /// nonces; the full 32 bytes stay available in `nonce`)
    pub fn nonce_u64(&self) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.nonce[24..32]);
        u64::from_be_bytes(raw)
    }
}

/// One decoded depositor entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEntry {
    /// Escrow owner address, 20-byte canonical form
    pub owner: [u8; 20],
    /// Amount, at most `MAX_WIRE_AMOUNT`
    pub amount: u128,
}

// ============================================================================
// Encoder
// ============================================================================

/// Write-side payload buffer. Allocated once for the worst-case entry count,
/// filled by fixed-offset writes, then shrunk to the entries actually used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgePayload {
    buf: Vec<u8>,
}

impl BridgePayload {
    /// Allocate a payload sized for `capacity` entries and write the header.
    pub fn init(campaign_hash: &[u8; 32], nonce: u64, capacity: usize) -> Self {
        let mut buf = vec![0u8; HEADER_SIZE + ENTRY_SIZE * capacity];
        buf[CAMPAIGN_HASH_OFFSET..CAMPAIGN_HASH_OFFSET + 32].copy_from_slice(campaign_hash);
        // uint256 nonce - left-padded to 32 bytes, big-endian
        buf[NONCE_OFFSET + 24..NONCE_OFFSET + 32].copy_from_slice(&nonce.to_be_bytes());
        Self { buf }
    }

    /// Number of entry slots currently in the buffer
    pub fn capacity(&self) -> usize {
        (self.buf.len() - HEADER_SIZE) / ENTRY_SIZE
    }

    /// Write one entry at `index`.
    ///
    /// `index < capacity` and `amount <= MAX_WIRE_AMOUNT` are caller
    /// invariants; violating them is a programming error, not a recoverable
    /// condition, so both panic.
    pub fn write_entry(&mut self, index: usize, owner: &[u8; OWNER_BYTES], amount: u128) {
        assert!(
            index < self.capacity(),
            "entry index {} out of capacity {}",
            index,
            self.capacity()
        );
        assert!(
            amount <= MAX_WIRE_AMOUNT,
            "amount {} exceeds the 96-bit wire ceiling",
            amount
        );

        let offset = HEADER_SIZE + ENTRY_SIZE * index;
        self.buf[offset..offset + OWNER_BYTES].copy_from_slice(owner);
        // uint96 amount - big-endian, low 12 bytes of the u128
        let amount_bytes = amount.to_be_bytes();
        self.buf[offset + OWNER_BYTES..offset + ENTRY_SIZE].copy_from_slice(&amount_bytes[4..16]);
    }

    /// Shrink the logical length to `new_count` entries. Growing is rejected:
    /// the bytes past the current length were never written.
    pub fn resize(&mut self, new_count: usize) -> Result<(), PayloadError> {
        let current = self.capacity();
        if new_count > current {
            return Err(PayloadError::CannotGrow {
                current,
                requested: new_count,
            });
        }
        self.buf.truncate(HEADER_SIZE + ENTRY_SIZE * new_count);
        Ok(())
    }

    /// Finished wire bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Validate the overall shape of a received buffer: header present and entry
/// region 32-byte aligned. Run this before iterating entries.
pub fn validate(buf: &[u8]) -> Result<(), PayloadError> {
    if buf.len() < HEADER_SIZE {
        return Err(PayloadError::Truncated { got: buf.len() });
    }
    let body = buf.len() - HEADER_SIZE;
    if body % ENTRY_SIZE != 0 {
        return Err(PayloadError::Misaligned { got: body });
    }
    Ok(())
}

/// Read the header fields. The nonce bytes are returned verbatim.
pub fn read_header(buf: &[u8]) -> Result<PayloadHeader, PayloadError> {
    if buf.len() < HEADER_SIZE {
        return Err(PayloadError::Truncated { got: buf.len() });
    }
    let mut campaign_hash = [0u8; 32];
    campaign_hash.copy_from_slice(&buf[CAMPAIGN_HASH_OFFSET..CAMPAIGN_HASH_OFFSET + 32]);
    let mut nonce = [0u8; 32];
    nonce.copy_from_slice(&buf[NONCE_OFFSET..NONCE_OFFSET + 32]);
    Ok(PayloadHeader {
        campaign_hash,
        nonce,
    })
}

/// Number of entries in a validated buffer
pub fn entry_count(buf: &[u8]) -> Result<usize, PayloadError> {
    validate(buf)?;
    Ok((buf.len() - HEADER_SIZE) / ENTRY_SIZE)
}

/// Read entry `index`, failing `OutOfBounds` when the buffer is shorter than
/// `HEADER_SIZE + ENTRY_SIZE * (index + 1)`.
pub fn read_entry(buf: &[u8], index: usize) -> Result<PayloadEntry, PayloadError> {
    let entries = entry_count(buf)?;
    if index >= entries {
        return Err(PayloadError::OutOfBounds { index, entries });
    }

    let offset = HEADER_SIZE + ENTRY_SIZE * index;
    let mut owner = [0u8; OWNER_BYTES];
    owner.copy_from_slice(&buf[offset..offset + OWNER_BYTES]);

    let mut amount_bytes = [0u8; 16];
    amount_bytes[4..16].copy_from_slice(&buf[offset + OWNER_BYTES..offset + ENTRY_SIZE]);
    let amount = u128::from_be_bytes(amount_bytes);

    Ok(PayloadEntry { owner, amount })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(campaign: [u8; 32], nonce: u64, entries: &[([u8; 20], u128)]) -> Vec<u8> {
        let mut payload = BridgePayload::init(&campaign, nonce, entries.len());
        for (i, (owner, amount)) in entries.iter().enumerate() {
            payload.write_entry(i, owner, *amount);
        }
        payload.into_bytes()
    }

    #[test]
    fn round_trip_reproduces_header_and_entries() {
        let campaign = [0x42u8; 32];
        let entries: Vec<([u8; 20], u128)> = vec![
            ([0x01; 20], 1),
            ([0x02; 20], 100_000_000),
            ([0x03; 20], MAX_WIRE_AMOUNT),
        ];
        let buf = encode(campaign, 77, &entries);

        let header = read_header(&buf).unwrap();
        assert_eq!(header.campaign_hash, campaign);
        assert_eq!(header.nonce_u64(), 77);
        assert_eq!(entry_count(&buf).unwrap(), 3);

        for (i, (owner, amount)) in entries.iter().enumerate() {
            let entry = read_entry(&buf, i).unwrap();
            assert_eq!(&entry.owner, owner);
            assert_eq!(entry.amount, *amount);
        }
    }

    /// Known-byte vector: the layout must never drift, so assert exact hex.
    #[test]
    fn wire_vector_exact_bytes() {
        let campaign = [0x11u8; 32];
        let buf = encode(campaign, 7, &[([0xAA; 20], 100), ([0xBB; 20], MAX_WIRE_AMOUNT)]);

        let mut expected = String::new();
        expected.push_str(&"11".repeat(32)); // campaign hash
        expected.push_str(&"00".repeat(31)); // nonce 7 as uint256
        expected.push_str("07");
        expected.push_str(&"aa".repeat(20)); // entry 0 owner
        expected.push_str("000000000000000000000064"); // amount 100 as uint96
        expected.push_str(&"bb".repeat(20)); // entry 1 owner
        expected.push_str(&"ff".repeat(12)); // amount 2^96-1
        assert_eq!(hex::encode(&buf), expected);
        assert_eq!(buf.len(), HEADER_SIZE + 2 * ENTRY_SIZE);
    }

    #[test]
    fn nonce_bytes_preserved_verbatim() {
        let mut buf = encode([0u8; 32], 0, &[]);
        // Forge a nonce with high bytes set; decode must hand it back intact.
        buf[NONCE_OFFSET] = 0xDE;
        buf[NONCE_OFFSET + 1] = 0xAD;
        let header = read_header(&buf).unwrap();
        assert_eq!(header.nonce[0], 0xDE);
        assert_eq!(header.nonce[1], 0xAD);
        assert_eq!(header.nonce_u64(), 0);
    }

    #[test]
    fn resize_shrinks_and_never_grows() {
        let campaign = [0x01u8; 32];
        let mut payload = BridgePayload::init(&campaign, 1, 5);
        payload.write_entry(0, &[0x0A; 20], 10);
        payload.write_entry(1, &[0x0B; 20], 20);

        payload.resize(2).unwrap();
        assert_eq!(payload.capacity(), 2);

        let err = payload.resize(3).unwrap_err();
        assert_eq!(
            err,
            PayloadError::CannotGrow {
                current: 2,
                requested: 3
            }
        );

        let buf = payload.into_bytes();
        assert_eq!(entry_count(&buf).unwrap(), 2);
        assert_eq!(read_entry(&buf, 1).unwrap().amount, 20);
    }

    #[test]
    fn resize_to_zero_leaves_header_only() {
        let mut payload = BridgePayload::init(&[0x02u8; 32], 9, 4);
        payload.resize(0).unwrap();
        let buf = payload.into_bytes();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(entry_count(&buf).unwrap(), 0);
        assert_eq!(read_header(&buf).unwrap().nonce_u64(), 9);
    }

    #[test]
    fn truncated_buffer_rejected() {
        let buf = vec![0u8; HEADER_SIZE - 1];
        assert_eq!(
            validate(&buf).unwrap_err(),
            PayloadError::Truncated {
                got: HEADER_SIZE - 1
            }
        );
        assert!(read_header(&buf).is_err());
    }

    #[test]
    fn misaligned_buffer_rejected() {
        let buf = vec![0u8; HEADER_SIZE + ENTRY_SIZE + 5];
        assert_eq!(
            validate(&buf).unwrap_err(),
            PayloadError::Misaligned {
                got: ENTRY_SIZE + 5
            }
        );
        assert!(entry_count(&buf).is_err());
    }

    #[test]
    fn read_entry_out_of_bounds() {
        let buf = encode([0u8; 32], 1, &[([0x0C; 20], 5)]);
        assert!(read_entry(&buf, 0).is_ok());
        assert_eq!(
            read_entry(&buf, 1).unwrap_err(),
            PayloadError::OutOfBounds {
                index: 1,
                entries: 1
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of capacity")]
    fn write_past_capacity_panics() {
        let mut payload = BridgePayload::init(&[0u8; 32], 0, 1);
        payload.write_entry(1, &[0u8; 20], 1);
    }

    #[test]
    #[should_panic(expected = "96-bit wire ceiling")]
    fn write_over_ceiling_panics() {
        let mut payload = BridgePayload::init(&[0u8; 32], 0, 1);
        payload.write_entry(0, &[0u8; 20], MAX_WIRE_AMOUNT + 1);
    }

    #[test]
    fn entries_preserve_write_order() {
        let owners: Vec<[u8; 20]> = (0u8..10).map(|i| [i; 20]).collect();
        let entries: Vec<([u8; 20], u128)> = owners
            .iter()
            .enumerate()
            .map(|(i, o)| (*o, (i as u128 + 1) * 1000))
            .collect();
        let buf = encode([0x05u8; 32], 3, &entries);
        for (i, (owner, amount)) in entries.iter().enumerate() {
            let entry = read_entry(&buf, i).unwrap();
            assert_eq!(&entry.owner, owner);
            assert_eq!(entry.amount, *amount);
        }
    }
}
