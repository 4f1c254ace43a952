/*!
 * Array Packer
 * Width-tagged base64 encoding of bitmask sequences
 *
 * Format: one tag character (`A` 8-bit, `B` 16-bit, `C` 32-bit) followed by
 * the base64 of the elements written little-endian with no padding between
 * them. The width is chosen from the largest element, so every element of a
 * batch shares it. The url-safe variant swaps `+`/`/` for `-`/`_` and drops
 * `=` padding.
 */

use super::width::WidthClass;
use crate::core::types::Bitmask;
use crate::core::{PackError, PackResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;

/// Encode `bitmasks`; an empty slice packs to the empty string
pub fn pack(bitmasks: &[Bitmask], url_safe: bool) -> String {
    let Some(&max) = bitmasks.iter().max() else {
        return String::new();
    };

    let width = WidthClass::for_max(max);
    let mut buffer = Vec::with_capacity(bitmasks.len() * width.byte_len());
    for &bitmask in bitmasks {
        width.write(bitmask, &mut buffer);
    }

    let body = STANDARD.encode(&buffer);
    let body = if url_safe { to_url_safe(&body) } else { body };

    let mut packed = String::with_capacity(body.len() + 1);
    packed.push(width.tag());
    packed.push_str(&body);
    packed
}

/// Decode a string produced by [`pack`] with the same `url_safe` flag
///
/// Fails without returning partial data on an unknown tag, a payload that
/// is not base64, or a byte count that is not a multiple of the width.
pub fn unpack(packed: &str, url_safe: bool) -> PackResult<Vec<Bitmask>> {
    let mut chars = packed.chars();
    let Some(tag) = chars.next() else {
        return Ok(Vec::new());
    };
    let width = WidthClass::from_tag(tag).ok_or_else(|| PackError::InvalidPrefix(tag.to_string()))?;

    let body = chars.as_str();
    let body = if url_safe {
        from_url_safe(body)
    } else {
        body.to_string()
    };

    let bytes = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| PackError::InvalidBase64(e.to_string()))?;

    if bytes.len() % width.byte_len() != 0 {
        return Err(PackError::InvalidLength {
            len: bytes.len(),
            width: width.byte_len(),
        });
    }

    let bitmasks: Vec<Bitmask> = bytes
        .chunks_exact(width.byte_len())
        .map(|chunk| width.read(chunk))
        .collect();
    debug!("Unpacked {} elements of {:?}", bitmasks.len(), width);
    Ok(bitmasks)
}

fn to_url_safe(body: &str) -> String {
    body.trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

fn from_url_safe(body: &str) -> String {
    let mut restored: String = body
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while restored.len() % 4 != 0 {
        restored.push('=');
    }
    restored
}
