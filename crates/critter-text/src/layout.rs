use critter_core::Vertex;

use crate::BakedFont;

/// Tab columns relative to the start of the string.
pub const TAB_STOPS: [f32; 4] = [150.0, 210.0, 270.0, 330.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

fn next_tab_stop(pen: f32, origin: f32) -> f32 {
    TAB_STOPS
        .iter()
        .map(|stop| stop + origin)
        .find(|&stop| pen < stop)
        .unwrap_or(pen)
}

/// Pixel extent from the pen origin to the right edge of the last glyph.
pub fn text_length(font: &BakedFont, text: &str) -> f32 {
    let mut pen = 0.0f32;
    let mut len = 0.0f32;
    for b in text.bytes() {
        if b == b'\t' {
            pen = next_tab_stop(pen, 0.0);
        } else if let Some(g) = font.glyph(b) {
            let round_x = (pen + g.xoff + 0.5).floor();
            len = round_x + g.width() + 0.5;
            pen += g.xadvance;
        }
    }
    len
}

/// Appends six vertices per glyph to `out` and returns the glyph count.
///
/// `y` is the baseline. Bytes outside `32..128` other than tab are skipped.
pub fn layout_text(
    font: &BakedFont,
    x: f32,
    y: f32,
    text: &str,
    align: TextAlign,
    color: u32,
    out: &mut Vec<Vertex>,
) -> usize {
    let mut pen = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - text_length(font, text) / 2.0,
        TextAlign::Right => x - text_length(font, text),
    };
    let origin = pen;

    let (aw, ah) = font.atlas_size();
    let inv_w = 1.0 / aw.max(1) as f32;
    let inv_h = 1.0 / ah.max(1) as f32;
    let half = font.half_texel();

    let mut count = 0;
    for b in text.bytes() {
        if b == b'\t' {
            pen = next_tab_stop(pen, origin);
            continue;
        }
        let Some(g) = font.glyph(b) else {
            continue;
        };

        let x0 = (pen + g.xoff).floor();
        let y0 = (y + g.yoff).floor();
        let x1 = x0 + g.width();
        let y1 = y0 + g.height();

        let s0 = (f32::from(g.x0) + half) * inv_w;
        let t0 = (f32::from(g.y0) + half) * inv_h;
        let s1 = (f32::from(g.x1) + half) * inv_w;
        let t1 = (f32::from(g.y1) + half) * inv_h;

        out.extend_from_slice(&[
            Vertex::textured(x0, y0, s0, t0, color),
            Vertex::textured(x1, y1, s1, t1, color),
            Vertex::textured(x1, y0, s1, t0, color),
            Vertex::textured(x0, y0, s0, t0, color),
            Vertex::textured(x0, y1, s0, t1, color),
            Vertex::textured(x1, y1, s1, t1, color),
        ]);
        pen += g.xadvance;
        count += 1;
    }
    count
}
