use rand::Rng;

/// Characters allowed in public reference codes (uppercase alphanumeric)
const REFERENCE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const TRANSACTION_PREFIX: &str = "TXN-";
pub const TRANSACTION_SUFFIX_LENGTH: usize = 10;

pub const PAYMENT_PREFIX: &str = "PAY-";
pub const PAYMENT_SUFFIX_LENGTH: usize = 12;

fn random_suffix<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..REFERENCE_CHARS.len());
            char::from(REFERENCE_CHARS[idx])
        })
        .collect()
}

/// Generate a public transaction reference, e.g. `TXN-4K2Q9ZB0XA`
pub fn generate_transaction_id() -> String {
    format!(
        "{TRANSACTION_PREFIX}{}",
        random_suffix(&mut rand::thread_rng(), TRANSACTION_SUFFIX_LENGTH)
    )
}

/// Generate a gateway payment reference from the given RNG, e.g. `PAY-7H3M0Q2LZ8KD`
pub fn generate_payment_reference_with<R: Rng>(rng: &mut R) -> String {
    format!(
        "{PAYMENT_PREFIX}{}",
        random_suffix(rng, PAYMENT_SUFFIX_LENGTH)
    )
}

/// Check `code` is `prefix` followed by exactly `len` reference characters
pub fn is_valid_reference(code: &str, prefix: &str, len: usize) -> bool {
    code.strip_prefix(prefix).is_some_and(|suffix| {
        suffix.len() == len && suffix.bytes().all(|b| REFERENCE_CHARS.contains(&b))
    })
}
