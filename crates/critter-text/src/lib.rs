//! Baked bitmap fonts.
//!
//! A font is rasterized once, at one pixel size, into a single-channel atlas
//! covering printable ASCII. After that nothing is shaped or rasterized: text
//! is a row of textured quads advanced by per-glyph metrics (see `layout`).

pub mod layout;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont, point};
use critter_core::FontHandle;
use fontdb::Database;
use thiserror::Error;

pub use layout::{TAB_STOPS, TextAlign, layout_text, text_length};

/// First baked character (space).
pub const FIRST_CHAR: u8 = 32;
/// Characters `32..128`; 127 bakes as an empty glyph.
pub const GLYPH_COUNT: usize = 96;
pub const MAX_FONTS: usize = 20;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("font data could not be parsed")]
    InvalidFont,
    #[error("glyph atlas {width}x{height} is full at {ch:?}")]
    AtlasFull { ch: char, width: u32, height: u32 },
    #[error("font table holds at most {limit} fonts")]
    FontTableFull { limit: usize },
    #[error("no sans-serif system font found")]
    NoSystemFont,
    #[error("unknown font handle {0:?}")]
    UnknownFont(FontHandle),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Atlas rect and placement of one glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BakedGlyph {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    /// Offset from the pen position to the quad's top-left corner.
    pub xoff: f32,
    pub yoff: f32,
    pub xadvance: f32,
}

impl BakedGlyph {
    pub fn width(&self) -> f32 {
        f32::from(self.x1) - f32::from(self.x0)
    }

    pub fn height(&self) -> f32 {
        f32::from(self.y1) - f32::from(self.y0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BakeOptions {
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// UV inset in texels, 0.5 for samplers that address texel corners.
    pub half_texel: f32,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            atlas_width: 512,
            atlas_height: 512,
            half_texel: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BakedFont {
    glyphs: Vec<BakedGlyph>,
    atlas: Vec<u8>,
    atlas_width: u32,
    atlas_height: u32,
    size: f32,
    half_texel: f32,
}

impl BakedFont {
    pub fn bake(ttf: &[u8], px: f32, opts: BakeOptions) -> Result<Self, TextError> {
        let font = FontRef::try_from_slice(ttf).map_err(|_| TextError::InvalidFont)?;
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);

        let (aw, ah) = (opts.atlas_width, opts.atlas_height);
        let mut atlas = vec![0u8; (aw * ah) as usize];
        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);

        // Shelf packing, one texel of padding around each glyph.
        let mut next_x = 1u32;
        let mut next_y = 1u32;
        let mut row_h = 0u32;

        for code in FIRST_CHAR..FIRST_CHAR + GLYPH_COUNT as u8 {
            let ch = code as char;
            let id = scaled.glyph_id(ch);
            let xadvance = scaled.h_advance(id);
            let glyph = id.with_scale_and_position(scale, point(0.0, 0.0));

            let Some(outlined) = scaled.outline_glyph(glyph) else {
                glyphs.push(BakedGlyph {
                    xadvance,
                    ..Default::default()
                });
                continue;
            };
            let bb = outlined.px_bounds();
            let w = bb.width().ceil().max(1.0) as u32;
            let h = bb.height().ceil().max(1.0) as u32;

            if next_x + w + 1 >= aw {
                next_x = 1;
                next_y += row_h + 1;
                row_h = 0;
            }
            if next_y + h + 1 >= ah {
                return Err(TextError::AtlasFull {
                    ch,
                    width: aw,
                    height: ah,
                });
            }
            let (x, y) = (next_x, next_y);
            next_x += w + 1;
            row_h = row_h.max(h + 1);

            outlined.draw(|gx, gy, cov| {
                if gx >= w || gy >= h {
                    return;
                }
                let idx = ((y + gy) * aw + x + gx) as usize;
                if let Some(px) = atlas.get_mut(idx) {
                    *px = (cov.clamp(0.0, 1.0) * 255.0) as u8;
                }
            });

            glyphs.push(BakedGlyph {
                x0: x as u16,
                y0: y as u16,
                x1: (x + w) as u16,
                y1: (y + h) as u16,
                xoff: bb.min.x,
                yoff: bb.min.y,
                xadvance,
            });
        }

        log::debug!(
            "baked {} glyphs at {px}px into {aw}x{ah}, {} rows used",
            glyphs.len(),
            next_y + row_h
        );

        Ok(Self {
            glyphs,
            atlas,
            atlas_width: aw,
            atlas_height: ah,
            size: px,
            half_texel: opts.half_texel,
        })
    }

    /// Synthetic font where every glyph is an `advance` x `height` box sitting
    /// on the baseline. The atlas is blank; useful for headless layout.
    pub fn fixed_width(advance: f32, height: f32) -> Self {
        let w = advance.round().max(1.0) as u16;
        let h = height.round().max(1.0) as u16;
        let glyph = BakedGlyph {
            x0: 0,
            y0: 0,
            x1: w,
            y1: h,
            xoff: 0.0,
            yoff: -height,
            xadvance: advance,
        };
        Self {
            glyphs: vec![glyph; GLYPH_COUNT],
            atlas: vec![0; w as usize * h as usize],
            atlas_width: u32::from(w),
            atlas_height: u32::from(h),
            size: height,
            half_texel: 0.0,
        }
    }

    pub fn glyph(&self, ch: u8) -> Option<&BakedGlyph> {
        let idx = ch.checked_sub(FIRST_CHAR)? as usize;
        self.glyphs.get(idx)
    }

    /// Single-channel coverage, `atlas_size().0` bytes per row.
    pub fn atlas(&self) -> &[u8] {
        &self.atlas
    }

    pub fn atlas_size(&self) -> (u32, u32) {
        (self.atlas_width, self.atlas_height)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn half_texel(&self) -> f32 {
        self.half_texel
    }
}

/// Up to `MAX_FONTS` baked fonts and the one currently used for drawing.
#[derive(Debug, Default)]
pub struct FontTable {
    fonts: Vec<BakedFont>,
    current: Option<FontHandle>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first font added becomes current.
    pub fn insert(&mut self, font: BakedFont) -> Result<FontHandle, TextError> {
        if self.fonts.len() >= MAX_FONTS {
            return Err(TextError::FontTableFull { limit: MAX_FONTS });
        }
        let handle = FontHandle(self.fonts.len() as u16);
        self.fonts.push(font);
        if self.current.is_none() {
            self.current = Some(handle);
        }
        Ok(handle)
    }

    pub fn get(&self, handle: FontHandle) -> Option<&BakedFont> {
        self.fonts.get(handle.0 as usize)
    }

    pub fn set_current(&mut self, handle: FontHandle) -> Result<(), TextError> {
        if self.get(handle).is_none() {
            return Err(TextError::UnknownFont(handle));
        }
        self.current = Some(handle);
        Ok(())
    }

    pub fn current(&self) -> Option<(FontHandle, &BakedFont)> {
        let handle = self.current?;
        self.get(handle).map(|f| (handle, f))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Bytes of the default sans-serif face installed on this machine.
pub fn system_font() -> Result<Vec<u8>, TextError> {
    let mut db = Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    };
    let id = db.query(&query).ok_or(TextError::NoSystemFont)?;
    let (source, _face_index) = db.face_source(id).ok_or(TextError::NoSystemFont)?;

    match source {
        fontdb::Source::Binary(data) => {
            let bytes: &[u8] = data.as_ref().as_ref();
            Ok(bytes.to_vec())
        }
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            Ok(std::fs::read(path)?)
        }
    }
}
