//! Bit shifting over byte buffers by arbitrary amounts.
//!
//! Buffers are treated as one big-endian bit string: [`shift_left`] moves
//! bits toward index 0, [`shift_right`] toward the last byte. Both keep the
//! buffer length, discard bits pushed past the edge and fill with zeros.
//!
//! A shift by `n` is split into `n / 8` whole-byte moves followed by a single
//! sub-byte pass of `n % 8` bits that carries bits across adjacent bytes.

/// Shift `bytes` left by `n` bits.
pub fn shift_left(bytes: &[u8], n: usize) -> Vec<u8> {
    let len = bytes.len();
    let whole = n / 8;
    let mut out = vec![0u8; len];
    if whole >= len {
        return out;
    }
    out[..len - whole].copy_from_slice(&bytes[whole..]);
    shift_left_bits(&mut out, (n % 8) as u32);
    out
}

/// Shift `bytes` right by `n` bits.
pub fn shift_right(bytes: &[u8], n: usize) -> Vec<u8> {
    let len = bytes.len();
    let whole = n / 8;
    let mut out = vec![0u8; len];
    if whole >= len {
        return out;
    }
    out[whole..].copy_from_slice(&bytes[..len - whole]);
    shift_right_bits(&mut out, (n % 8) as u32);
    out
}

/// In-place left shift by fewer than 8 bits.
fn shift_left_bits(buf: &mut [u8], bits: u32) {
    if bits == 0 {
        return;
    }
    for i in 0..buf.len() {
        let carry = buf.get(i + 1).map_or(0, |next| next >> (8 - bits));
        buf[i] = (buf[i] << bits) | carry;
    }
}

/// In-place right shift by fewer than 8 bits.
fn shift_right_bits(buf: &mut [u8], bits: u32) {
    if bits == 0 {
        return;
    }
    for i in (0..buf.len()).rev() {
        let carry = if i > 0 { buf[i - 1] << (8 - bits) } else { 0 };
        buf[i] = (buf[i] >> bits) | carry;
    }
}
