//! Stable snapshot hashing for deterministic verification of sessions.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Session;

impl Session {
    /// Hashes every piece of state a move or accusation can change, plus the
    /// seed-derived solution. Entity texts are excluded so narrative rewrites
    /// do not change the hash.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write(&self.mansion.canonical_bytes());
        hasher.write_i32(self.player.x);
        hasher.write_i32(self.player.y);
        hasher.write_u64(self.murderer as u64);
        hasher.write_u64(self.murder_weapon as u64);
        for weapon in &self.cast.weapons {
            hasher.write_u8(u8::from(weapon.collected));
        }
        for clue in &self.cast.clues {
            hasher.write_u8(u8::from(clue.found));
        }
        hasher.write_u64(self.inventory.len() as u64);
        for name in &self.inventory {
            hasher.write(name.as_bytes());
            hasher.write_u8(0xff);
        }
        hasher.write_u32(self.accusations);
        hasher.write_u8(u8::from(self.solved));
        hasher.finish()
    }
}
