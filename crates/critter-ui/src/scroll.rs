//! Scroll offsets that outlive a frame.
//!
//! Areas are rebuilt every frame, so the one piece of state a scroll region
//! needs to remember is kept here, keyed by a caller-chosen `ScrollKey`.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollKey(pub u64);

impl From<u64> for ScrollKey {
    fn from(v: u64) -> Self {
        ScrollKey(v)
    }
}

impl From<&str> for ScrollKey {
    /// FNV-1a of the string, stable across runs.
    fn from(s: &str) -> Self {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in s.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
        ScrollKey(h)
    }
}

/// Vertical offsets, always `<= 0`: content moves up as the user scrolls down.
#[derive(Clone, Debug, Default)]
pub struct ScrollOffsets {
    offsets: HashMap<ScrollKey, i32>,
}

impl ScrollOffsets {
    pub fn get(&self, key: ScrollKey) -> i32 {
        self.offsets.get(&key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: ScrollKey, offset: i32) {
        self.offsets.insert(key, offset.min(0));
    }

    pub fn remove(&mut self, key: ScrollKey) {
        self.offsets.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
