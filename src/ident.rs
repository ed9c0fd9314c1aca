use rand::Rng;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of a document id.
pub const DOCUMENT_ID_LENGTH: usize = 8;
/// Length of a generated asset file stem.
pub const ASSET_NAME_LENGTH: usize = 12;

/// Short lowercase alphanumeric identifier. Not suitable for secrets.
#[inline]
#[must_use]
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::thread_rng(), length)
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[must_use]
pub fn document_id() -> String {
    format!("email_{}", generate(DOCUMENT_ID_LENGTH))
}
