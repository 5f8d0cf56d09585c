//! Opaque paste identifier generation.

use rand::Rng;

use crate::constants::PASTE_ID_LEN;

const ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890abcdefghijklmnopqrstuvwxyz";

/// Generate a random alphanumeric paste id.
///
/// # Returns
/// An id of [`PASTE_ID_LEN`] characters.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..PASTE_ID_LEN)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}

/// Generate an id that does not collide according to `exists_check`.
///
/// # Returns
/// An id for which `exists_check` returned `false`.
pub fn generate_unique_id<F>(exists_check: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id();
        if !exists_check(&id) {
            return id;
        }
    }
}
