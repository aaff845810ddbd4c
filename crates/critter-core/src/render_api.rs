use std::ops::Range;

use crate::IRect;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Packed `0xAABBGGRR`.
    pub color: u32,
}

impl Vertex {
    pub const fn colored(x: f32, y: f32, color: u32) -> Self {
        Self {
            pos: [x, y],
            uv: [0.0, 0.0],
            color,
        }
    }

    pub const fn textured(x: f32, y: f32, u: f32, v: f32, color: u32) -> Self {
        Self {
            pos: [x, y],
            uv: [u, v],
            color,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontHandle(pub u16);

/// Renderer-side texture the caller uploaded; opaque to the GUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// One-hot swizzle vector selecting this channel.
    pub fn swizzle(self) -> [f32; 4] {
        let mut s = [0.0; 4];
        s[self as usize] = 1.0;
        s
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderKind {
    /// Flat vertex colors.
    Color,
    /// Alpha-mask glyph quads sampled from the font's atlas.
    Text(FontHandle),
    /// Textured quad. `texture: None` asks for the missing-texture placeholder.
    Image {
        texture: Option<TextureId>,
        lod: f32,
        enabled: bool,
        channel: Option<Channel>,
    },
}

/// The only thing the GUI knows about the graphics API.
pub trait RenderSink {
    /// `None` disables clipping.
    fn set_clip_rect(&mut self, clip: Option<IRect>);
    fn bind_glyph_atlas(&mut self, font: FontHandle);
    fn emit_triangles(&mut self, vertices: &[Vertex], shader: ShaderKind);
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub clip: Option<IRect>,
    pub shader: ShaderKind,
    pub vertices: Range<usize>,
}

/// Triangle batches recorded during a frame, replayed into a `RenderSink`.
///
/// Consecutive pushes that share shader and clip are merged into one command.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    vertices: Vec<Vertex>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.commands.clear();
    }

    pub fn push(&mut self, clip: Option<IRect>, shader: ShaderKind, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }
        let start = self.vertices.len();
        self.vertices.extend_from_slice(vertices);
        let end = self.vertices.len();

        if let Some(last) = self.commands.last_mut()
            && last.clip == clip
            && last.shader == shader
            && last.vertices.end == start
        {
            last.vertices.end = end;
            return;
        }
        self.commands.push(DrawCommand {
            clip,
            shader,
            vertices: start..end,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn replay(&self, sink: &mut dyn RenderSink) {
        let mut clip: Option<Option<IRect>> = None;
        let mut atlas: Option<FontHandle> = None;
        for cmd in &self.commands {
            if clip != Some(cmd.clip) {
                sink.set_clip_rect(cmd.clip);
                clip = Some(cmd.clip);
            }
            if let ShaderKind::Text(font) = cmd.shader
                && atlas != Some(font)
            {
                sink.bind_glyph_atlas(font);
                atlas = Some(font);
            }
            sink.emit_triangles(&self.vertices[cmd.vertices.clone()], cmd.shader);
        }
    }
}

/// RGBA8 placeholder: white with a red diagonal cross.
///
/// `line_width` is the half-thickness of each diagonal in normalized
/// `[-1, 1]` texture space.
pub fn missing_texture(width: u32, height: u32, line_width: f32) -> Vec<u8> {
    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    let s = std::f32::consts::FRAC_1_SQRT_2;

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let px = x as f32 / width as f32 * 2.0 - 1.0;
            let py = y as f32 / height as f32 * 2.0 - 1.0;
            let on_a = (px * s - py * s).abs() <= line_width;
            let on_b = (px * s + py * s).abs() <= line_width;
            pixels.extend_from_slice(if on_a || on_b { &RED } else { &WHITE });
        }
    }
    pixels
}
