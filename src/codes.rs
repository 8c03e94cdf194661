//! Codes
//!
//! Random code strings printed into QR images and handed out on redemption.

use rand::{Rng, seq::SliceRandom};

/// Characters used in generated codes.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a redemption code.
pub const REDEMPTION_CODE_LEN: usize = 12;

/// Prefix of every QR code identifier.
pub const QR_CODE_PREFIX: &str = "BT-";

/// Length of the random part of a QR code identifier.
pub const QR_CODE_BODY_LEN: usize = 12;

/// Generate a redemption code.
pub fn redemption_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_code(rng, REDEMPTION_CODE_LEN)
}

/// Generate the identifier encoded into a campaign QR image.
pub fn qr_code_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{QR_CODE_PREFIX}{}", random_code(rng, QR_CODE_BODY_LEN))
}

/// Whether `code` has the shape of a redemption code.
pub fn is_redemption_code(code: &str) -> bool {
    code.len() == REDEMPTION_CODE_LEN && code.bytes().all(|byte| ALPHABET.contains(&byte))
}

fn random_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .filter_map(|_| ALPHABET.choose(rng).copied().map(char::from))
        .collect()
}
