#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let byte = |i: usize, fallback: u8| {
            s.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .unwrap_or(fallback)
        };
        match s.len() {
            6 => Color(byte(0, 0), byte(2, 0), byte(4, 0), 255),
            8 => Color(byte(0, 0), byte(2, 0), byte(4, 0), byte(6, 255)),
            _ => Color(0, 0, 0, 255),
        }
    }
    pub const fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Packed `0xAABBGGRR`, the byte order vertex colors are uploaded in.
    pub const fn to_abgr(self) -> u32 {
        (self.3 as u32) << 24 | (self.2 as u32) << 16 | (self.1 as u32) << 8 | self.0 as u32
    }

    pub const fn from_abgr(abgr: u32) -> Self {
        Color(
            (abgr & 0xff) as u8,
            (abgr >> 8 & 0xff) as u8,
            (abgr >> 16 & 0xff) as u8,
            (abgr >> 24) as u8,
        )
    }

    /// Channels as `[r, g, b]` in 0..=1.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }

    pub fn from_rgb_f32(rgb: [f32; 3], a: u8) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Color(q(rgb[0]), q(rgb[1]), q(rgb[2]), a)
    }

    pub fn from_hsv(h: f32, s: f32, v: f32, a: u8) -> Self {
        Self::from_rgb_f32(hsv_to_rgb([h, s, v]), a)
    }
}

/// `[r, g, b]` in 0..=1 to `[h, s, v]`, hue as a fraction of a full turn in `[0, 1)`.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    let mut h = if delta <= 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    if h < 0.0 {
        h += 1.0;
    }
    if h >= 1.0 {
        h -= 1.0;
    }
    [h, s, max]
}

pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    if s <= 0.0 {
        return [v, v, v];
    }
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
