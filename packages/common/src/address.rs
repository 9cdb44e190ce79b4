//! Depositor address wire translation.
//!
//! The payload carries depositor owners as raw 20-byte addresses. Cosmos
//! addresses are bech32-encoded 20-byte payloads, so the locker strips the
//! encoding before writing an entry and the executor re-encodes with its own
//! chain's prefix when materializing accounts. A self-contained bech32
//! implementation keeps the translation identical on both sides regardless of
//! the host chain's API.

use cosmwasm_std::{StdError, StdResult};

/// Decode a bech32 address to raw 20 bytes
pub fn decode_bech32_address(addr: &str) -> StdResult<[u8; 20]> {
    // Format: hrp + "1" + base32_data + checksum
    let parts: Vec<&str> = addr.rsplitn(2, '1').collect();
    if parts.len() != 2 {
        return Err(StdError::generic_err("Invalid bech32 format"));
    }

    let data_part = parts[0];
    // The data part includes the address data + 6 char checksum
    if data_part.len() < 7 {
        return Err(StdError::generic_err("Bech32 data too short"));
    }

    // Remove the 6-character checksum
    let data_without_checksum = &data_part[..data_part.len() - 6];

    // Decode base32 (Bech32 alphabet)
    let decoded = decode_bech32_data(data_without_checksum)?;

    // Convert from 5-bit groups to 8-bit bytes
    let bytes = convert_bits(&decoded, 5, 8, false)?;

    if bytes.len() != 20 {
        return Err(StdError::generic_err(format!(
            "Invalid address length: expected 20 bytes, got {}",
            bytes.len()
        )));
    }

    let mut result = [0u8; 20];
    result.copy_from_slice(&bytes);
    Ok(result)
}

/// Encode raw 20 bytes to a bech32 address with given prefix
pub fn encode_bech32_address(bytes: &[u8; 20], hrp: &str) -> StdResult<String> {
    // Convert 8-bit bytes to 5-bit groups
    let data5 = convert_bits(bytes, 8, 5, true)?;

    // Encode as base32
    let data_str = encode_bech32_data(&data5);

    // Compute checksum
    let checksum = compute_bech32_checksum(hrp, &data5)?;
    let checksum_str = encode_bech32_data(&checksum);

    Ok(format!("{}1{}{}", hrp, data_str, checksum_str))
}

/// Convert bits between different group sizes
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> StdResult<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        let v = value as u32;
        acc = (acc << from_bits) | v;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad && bits > 0 {
        result.push(((acc << (to_bits - bits)) & max_v) as u8);
    } else if !pad && bits >= from_bits {
        return Err(StdError::generic_err("Invalid padding"));
    }

    Ok(result)
}

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Decode bech32 base32 data
fn decode_bech32_data(data: &str) -> StdResult<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len());

    for c in data.chars() {
        let idx = BECH32_CHARSET
            .iter()
            .position(|&x| x as char == c)
            .ok_or_else(|| StdError::generic_err(format!("Invalid bech32 character: {}", c)))?;
        result.push(idx as u8);
    }

    Ok(result)
}

/// Encode bytes to bech32 base32 string
fn encode_bech32_data(data: &[u8]) -> String {
    data.iter()
        .map(|&b| BECH32_CHARSET[b as usize] as char)
        .collect()
}

/// Compute bech32 checksum
fn compute_bech32_checksum(hrp: &str, data: &[u8]) -> StdResult<Vec<u8>> {
    let mut values = expand_hrp(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let polymod = bech32_polymod(&values) ^ 1;

    let mut checksum = Vec::with_capacity(6);
    for i in 0..6 {
        checksum.push(((polymod >> (5 * (5 - i))) & 31) as u8);
    }

    Ok(checksum)
}

/// Expand HRP for checksum calculation
fn expand_hrp(hrp: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(hrp.len() * 2 + 1);

    for c in hrp.chars() {
        result.push((c as u8) >> 5);
    }
    result.push(0);
    for c in hrp.chars() {
        result.push((c as u8) & 31);
    }

    result
}

/// Bech32 polymod function
fn bech32_polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}
