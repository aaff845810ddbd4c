//! Raw platform input and the per-frame snapshot derived from it.
//!
//! The platform hands over levels (button bitmask, key-down table, pointer
//! position). Edges, key repeat and character decoding happen here, once per
//! frame, so widgets only ever look at an `InputSnapshot`.

use bitflags::bitflags;
use web_time::Duration;

/// Number of tracked physical scancodes.
pub const KEY_COUNT: usize = 512;
/// Seconds a key has to stay down before it repeats.
pub const DEFAULT_REPEAT_DELAY: f32 = 0.2;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

/// Key-down levels indexed by scancode.
#[derive(Clone, Debug)]
pub struct KeyState {
    down: Box<[bool; KEY_COUNT]>,
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            down: Box::new([false; KEY_COUNT]),
        }
    }

    /// Out-of-range scancodes are ignored.
    pub fn set(&mut self, scancode: u16, down: bool) {
        if let Some(slot) = self.down.get_mut(scancode as usize) {
            *slot = down;
        }
    }

    pub fn press(&mut self, scancode: u16) {
        self.set(scancode, true);
    }

    pub fn release(&mut self, scancode: u16) {
        self.set(scancode, false);
    }

    pub fn is_down(&self, scancode: u16) -> bool {
        self.down.get(scancode as usize).copied().unwrap_or(false)
    }
}

/// Everything the platform layer reports for one frame.
#[derive(Clone, Debug)]
pub struct RawInput {
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub buttons: MouseButtons,
    /// Wheel delta in notches; positive scrolls content towards its top.
    pub scroll: i32,
    pub view_width: i32,
    pub view_height: i32,
    /// A character already decoded by the platform (IME, text events).
    /// Key-repeat output from `keys` takes precedence.
    pub typed: Option<char>,
    pub keys: KeyState,
    pub dt: Duration,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            mouse_x: -1,
            mouse_y: -1,
            buttons: MouseButtons::empty(),
            scroll: 0,
            view_width: 0,
            view_height: 0,
            typed: None,
            keys: KeyState::new(),
            dt: Duration::from_secs_f64(1.0 / 60.0),
        }
    }
}

impl RawInput {
    pub fn new(view_width: i32, view_height: i32) -> Self {
        Self {
            view_width,
            view_height,
            ..Self::default()
        }
    }
}

/// Platform keyboard layout: scancode to 7-bit ASCII.
pub trait KeyMap {
    fn to_ascii(&self, scancode: u16) -> Option<u8>;
}

/// Identity layout where the scancode already is the ASCII code.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiKeyMap;

impl KeyMap for AsciiKeyMap {
    fn to_ascii(&self, scancode: u16) -> Option<u8> {
        match scancode {
            0x08 | 0x0d | 0x1b | 0x20..=0x7e => Some(scancode as u8),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyPoll {
    pub ch: Option<u8>,
    /// Keys that produced a character this frame but lost to an earlier
    /// scancode. Only one character is delivered per frame.
    pub dropped: u32,
}

/// Type-once-then-repeat cadence for held keys.
#[derive(Clone, Debug)]
pub struct KeyRepeat {
    timers: Box<[f32; KEY_COUNT]>,
    delay: f32,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_DELAY)
    }
}

impl KeyRepeat {
    pub fn new(delay: f32) -> Self {
        Self {
            timers: Box::new([0.0; KEY_COUNT]),
            delay,
        }
    }

    pub fn poll(&mut self, keys: &KeyState, map: &dyn KeyMap, dt: f32) -> KeyPoll {
        let mut out = KeyPoll::default();
        for (scancode, timer) in self.timers.iter_mut().enumerate() {
            let scancode = scancode as u16;
            if !keys.is_down(scancode) {
                *timer = 0.0;
                continue;
            }
            if *timer > self.delay {
                *timer = 0.0;
            }
            if *timer == 0.0
                && let Some(ascii) = map.to_ascii(scancode)
            {
                if out.ch.is_none() {
                    out.ch = Some(ascii & 0x7f);
                } else {
                    out.dropped += 1;
                }
            }
            *timer += dt;
        }
        if out.dropped > 0 {
            log::debug!("{} simultaneous key(s) dropped this frame", out.dropped);
        }
        out
    }
}

/// Pointer and keyboard state as widgets see it during one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSnapshot {
    pub mx: i32,
    pub my: i32,
    pub left: bool,
    pub left_pressed: bool,
    pub left_released: bool,
    pub scroll: i32,
    /// This frame's character, 0 for none.
    pub ch: u8,
    pub last_ch: u8,
    pub dropped_keys: u32,
    pub view_width: i32,
    pub view_height: i32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            mx: -1,
            my: -1,
            left: false,
            left_pressed: false,
            left_released: false,
            scroll: 0,
            ch: 0,
            last_ch: 0,
            dropped_keys: 0,
            view_width: 0,
            view_height: 0,
        }
    }
}

impl InputSnapshot {
    pub fn update(&mut self, raw: &RawInput, keys: KeyPoll) {
        let left = raw.buttons.contains(MouseButtons::LEFT);
        self.left_pressed = !self.left && left;
        self.left_released = self.left && !left;
        self.left = left;

        self.mx = raw.mouse_x;
        self.my = raw.mouse_y;
        self.scroll = raw.scroll;
        self.view_width = raw.view_width;
        self.view_height = raw.view_height;

        let typed = raw
            .typed
            .filter(char::is_ascii)
            .map(|c| c as u8)
            .unwrap_or(0);
        self.last_ch = self.ch;
        self.ch = keys.ch.unwrap_or(typed) & 0x7f;
        self.dropped_keys = keys.dropped;
    }

    /// Marks this frame's pointer events as consumed.
    pub fn clear_edges(&mut self) {
        self.left_pressed = false;
        self.left_released = false;
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_press_release_edges() {
        let mut snap = InputSnapshot::default();
        let mut raw = RawInput::new(100, 100);

        raw.buttons = MouseButtons::LEFT;
        snap.update(&raw, KeyPoll::default());
        assert!(snap.left && snap.left_pressed && !snap.left_released);

        snap.update(&raw, KeyPoll::default());
        assert!(snap.left && !snap.left_pressed);

        raw.buttons = MouseButtons::empty();
        snap.update(&raw, KeyPoll::default());
        assert!(!snap.left && snap.left_released);
    }

    #[test]
    fn test_non_ascii_typed_char_is_dropped() {
        let mut snap = InputSnapshot::default();
        let mut raw = RawInput::new(100, 100);
        raw.typed = Some('é');
        snap.update(&raw, KeyPoll::default());
        assert_eq!(snap.ch, 0);

        raw.typed = Some('x');
        snap.update(&raw, KeyPoll::default());
        assert_eq!(snap.ch, b'x');
        assert_eq!(snap.last_ch, 0);
    }

    #[test]
    fn test_key_repeat_cadence() {
        let mut repeat = KeyRepeat::default();
        let mut keys = KeyState::new();
        keys.press(b'a' as u16);

        let mut emitted = Vec::new();
        for frame in 0..30 {
            if repeat.poll(&keys, &AsciiKeyMap, DT).ch.is_some() {
                emitted.push(frame);
            }
        }
        // Emits on the first frame, then again once the timer passes 0.2s.
        assert_eq!(emitted[0], 0);
        assert!(emitted.len() >= 2);
        let gap = emitted[1] - emitted[0];
        assert!((12..=14).contains(&gap), "repeat gap {gap}");

        keys.release(b'a' as u16);
        assert_eq!(repeat.poll(&keys, &AsciiKeyMap, DT).ch, None);
        keys.press(b'a' as u16);
        assert_eq!(repeat.poll(&keys, &AsciiKeyMap, DT).ch, Some(b'a'));
    }

    #[test]
    fn test_only_first_key_in_scan_order_wins() {
        let mut repeat = KeyRepeat::default();
        let mut keys = KeyState::new();
        keys.press(b'z' as u16);
        keys.press(b'b' as u16);
        let poll = repeat.poll(&keys, &AsciiKeyMap, DT);
        assert_eq!(poll.ch, Some(b'b'));
        assert_eq!(poll.dropped, 1);
    }

    #[test]
    fn test_unmapped_keys_are_silent() {
        let mut repeat = KeyRepeat::default();
        let mut keys = KeyState::new();
        keys.press(300);
        assert_eq!(repeat.poll(&keys, &AsciiKeyMap, DT), KeyPoll::default());
    }
}
