use crate::domain::id::{HexId, ID_LEN, IdGenerator};
use rand::Rng;

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Draws each hex digit independently from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandIdGenerator;

impl IdGenerator for RandIdGenerator {
    fn generate(&self) -> HexId {
        let mut rng = rand::thread_rng();
        let raw: String = (0..ID_LEN)
            .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
            .collect();
        // Generated from the hex alphabet at the right length, so parsing
        // cannot fail.
        HexId::parse(&raw).unwrap_or_else(|_| unreachable!("generated id is canonical hex"))
    }
}
