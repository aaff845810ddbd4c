use critter_canvas::{Tessellator, TriangleOrientation};
use critter_core::{
    AreaId, Color, DrawList, FontHandle, GuiError, IRect, IdStack, InputSnapshot, KeyMap, KeyRepeat,
    RawInput, RenderSink, Result, ShaderKind, Vertex, WidgetId,
};
use critter_text::{BakeOptions, BakedFont, FontTable, TextAlign, TextError};

use crate::area::{Area, AreaKind};
use crate::config::GuiConfig;
use crate::interaction::Interaction;
use crate::scroll::{ScrollKey, ScrollOffsets};

/// One GUI instance: input, interaction state, areas, fonts and the frame's
/// recorded geometry.
///
/// ```
/// use critter_core::{AsciiKeyMap, RawInput};
/// use critter_ui::GuiContext;
///
/// let mut gui = GuiContext::default();
/// let input = RawInput::new(800, 600);
///
/// gui.begin_frame(&input, &AsciiKeyMap).unwrap();
/// gui.begin_area("Settings", 10, 10, 200, 300, true, 0).unwrap();
/// if gui.button("Reset", true) {
///     // clicked
/// }
/// gui.end_area().unwrap();
/// gui.end_frame().unwrap();
/// assert!(!gui.draw_list().is_empty());
/// ```
pub struct GuiContext {
    pub(crate) config: GuiConfig,
    pub(crate) input: InputSnapshot,
    pub(crate) keys: KeyRepeat,
    pub(crate) ui: Interaction,
    pub(crate) ids: IdStack,
    /// Indexed by `AreaId`; slot 0 is the root.
    pub(crate) areas: Vec<Area>,
    pub(crate) widget_counter: u32,
    pub(crate) scroll: ScrollOffsets,
    pub(crate) fonts: FontTable,
    pub(crate) tess: Tessellator,
    pub(crate) draw: DrawList,
    pub(crate) text_scratch: Vec<Vertex>,
    pub(crate) in_frame: bool,
    pub(crate) inside_any_area: bool,
}

impl Default for GuiContext {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

pub(crate) fn push_shape(draw: &mut DrawList, clip: Option<IRect>, shape: Result<&[Vertex]>) {
    match shape {
        Ok(v) => draw.push(clip, ShaderKind::Color, v),
        Err(e) => log::warn!("shape skipped: {e}"),
    }
}

impl GuiContext {
    pub fn new(config: GuiConfig) -> Self {
        let keys = KeyRepeat::new(config.metrics.key_repeat_delay);
        Self {
            config,
            input: InputSnapshot::default(),
            keys,
            ui: Interaction::default(),
            ids: IdStack::new(),
            areas: vec![Area::default()],
            widget_counter: 0,
            scroll: ScrollOffsets::default(),
            fonts: FontTable::new(),
            tess: Tessellator::new(),
            draw: DrawList::new(),
            text_scratch: Vec::new(),
            in_frame: false,
            inside_any_area: false,
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Takes effect for layout immediately; the key repeat delay applies from
    /// the next `begin_frame`.
    pub fn set_config(&mut self, config: GuiConfig) {
        self.keys = KeyRepeat::new(config.metrics.key_repeat_delay);
        self.config = config;
    }

    /// Input as seen by the current (or last) frame.
    pub fn input_snapshot(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn interaction(&self) -> &Interaction {
        &self.ui
    }

    // ---- frame ----

    pub fn begin_frame(&mut self, raw: &RawInput, keymap: &dyn KeyMap) -> Result<()> {
        if self.in_frame {
            log::error!("begin_frame called twice without end_frame");
            return Err(GuiError::FrameAlreadyStarted);
        }
        let poll = self.keys.poll(&raw.keys, keymap, raw.dt.as_secs_f32());
        self.input.update(raw, poll);
        self.ui.begin_frame();

        self.ids.reset();
        self.areas.truncate(1);
        self.areas[0] = Area::default();
        self.widget_counter = 0;
        self.inside_any_area = false;
        self.draw.clear();
        self.in_frame = true;
        Ok(())
    }

    /// Closes the frame. Scopes left open are reported after the frame state
    /// has been reset, so the next frame starts clean either way.
    pub fn end_frame(&mut self) -> Result<()> {
        if !self.in_frame {
            return Err(GuiError::NotInFrame);
        }
        let open = self
            .ids
            .iter()
            .skip(1)
            .filter(|id| {
                let a = &self.areas[id.0 as usize];
                a.kind == AreaKind::Scroll || !a.closed
            })
            .count();

        self.ui.end_frame();
        self.input.clear_edges();
        self.in_frame = false;

        if open > 0 {
            log::error!("{open} scope(s) still open at end_frame");
            return Err(GuiError::UnclosedScopes(open));
        }
        log::trace!(
            "frame done: {} areas, {} widgets, {} draw commands",
            self.areas.len() - 1,
            self.widget_counter,
            self.draw.commands().len()
        );
        Ok(())
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Replays the last frame's geometry into `sink`.
    pub fn render<S: RenderSink>(&self, sink: &mut S) {
        self.draw.replay(sink);
    }

    pub(crate) fn require_frame(&self, what: &str) -> bool {
        if !self.in_frame {
            log::warn!("{what} called outside begin_frame/end_frame, ignored");
        }
        self.in_frame
    }

    // ---- ids and areas ----

    pub(crate) fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.ids.current(), self.widget_counter);
        self.widget_counter += 1;
        self.ui.confirm(id);
        id
    }

    /// Id in the reserved view-border area, still counted by the frame's
    /// widget ordinal.
    pub(crate) fn next_border_id(&mut self) -> WidgetId {
        let id = WidgetId::new(AreaId::VIEW_BORDER, self.widget_counter);
        self.widget_counter += 1;
        self.ui.confirm(id);
        id
    }

    pub(crate) fn area(&self) -> &Area {
        &self.areas[self.ids.current().0 as usize]
    }

    pub(crate) fn area_mut(&mut self) -> &mut Area {
        let idx = self.ids.current().0 as usize;
        &mut self.areas[idx]
    }

    pub(crate) fn area_enabled(&self) -> bool {
        self.area().enabled
    }

    pub(crate) fn pointer_in(&self, r: IRect) -> bool {
        r.contains(self.input.mx, self.input.my)
    }

    /// Inclusive hit test. With `check_scroll` the pointer must also be inside
    /// the current area's visible region.
    pub(crate) fn in_rect(&self, x: i32, y: i32, w: i32, h: i32, check_scroll: bool) -> bool {
        (!check_scroll || self.area().inside) && self.pointer_in(IRect::new(x, y, w, h))
    }

    /// True if the pointer was inside any area opened so far this frame.
    pub fn mouse_over_area(&self) -> bool {
        self.inside_any_area
    }

    pub fn scroll_offset(&self, key: impl Into<ScrollKey>) -> i32 {
        self.scroll.get(key.into())
    }

    pub fn set_scroll_offset(&mut self, key: impl Into<ScrollKey>, offset: i32) {
        self.scroll.set(key.into(), offset);
    }

    // ---- fonts ----

    pub fn create_font(&mut self, ttf: &[u8], px: f32) -> Result<FontHandle, TextError> {
        self.create_font_with(ttf, px, BakeOptions::default())
    }

    pub fn create_font_with(
        &mut self,
        ttf: &[u8],
        px: f32,
        opts: BakeOptions,
    ) -> Result<FontHandle, TextError> {
        let font = BakedFont::bake(ttf, px, opts)?;
        self.add_font(font)
    }

    pub fn add_font(&mut self, font: BakedFont) -> Result<FontHandle, TextError> {
        let handle = self.fonts.insert(font)?;
        log::info!("font {handle:?} added, {} loaded", self.fonts.len());
        Ok(handle)
    }

    pub fn set_font(&mut self, handle: FontHandle) -> Result<(), TextError> {
        self.fonts.set_current(handle)
    }

    /// Atlas pixels of a font, one coverage byte per texel, with its size.
    pub fn font_atlas(&self, handle: FontHandle) -> Option<(&[u8], u32, u32)> {
        let font = self.fonts.get(handle)?;
        let (w, h) = font.atlas_size();
        Some((font.atlas(), w, h))
    }

    /// Width of `text` in the current font, 0 without one.
    pub fn text_length(&self, text: &str) -> f32 {
        self.fonts
            .current()
            .map(|(_, f)| critter_text::text_length(f, text))
            .unwrap_or(0.0)
    }

    pub(crate) fn font_size(&self) -> f32 {
        self.fonts.current().map(|(_, f)| f.size()).unwrap_or(0.0)
    }

    // ---- drawing ----

    /// Clip rect of the current area: one pixel taller than the scissor so the
    /// top row of antialiasing survives.
    pub(crate) fn clip(&self) -> Option<IRect> {
        self.area().clip_rect()
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let clip = self.clip();
        let fringe = self.config.metrics.fringe;
        push_shape(&mut self.draw, clip, self.tess.rect(x, y, w, h, color.to_abgr(), fringe));
    }

    pub fn draw_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
        let clip = self.clip();
        let fringe = self.config.metrics.fringe;
        push_shape(
            &mut self.draw,
            clip,
            self.tess.rounded_rect(x, y, w, h, r, color.to_abgr(), fringe),
        );
    }

    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, r: f32, color: Color) {
        let clip = self.clip();
        let fringe = self.config.metrics.fringe;
        push_shape(
            &mut self.draw,
            clip,
            self.tess.line(x0, y0, x1, y1, r, color.to_abgr(), fringe),
        );
    }

    pub fn draw_triangle(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        orientation: TriangleOrientation,
        color: Color,
    ) {
        let clip = self.clip();
        let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
        push_shape(
            &mut self.draw,
            clip,
            self.tess.triangle(x, y, w, h, orientation, color.to_abgr()),
        );
    }

    /// Draws `text` with its baseline at `y` in the current font.
    pub fn draw_text(&mut self, x: i32, y: i32, align: TextAlign, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        let clip = self.clip();
        let Some((handle, font)) = self.fonts.current() else {
            log::trace!("no font loaded, skipping {text:?}");
            return;
        };
        self.text_scratch.clear();
        critter_text::layout_text(
            font,
            x as f32,
            y as f32,
            text,
            align,
            color.to_abgr(),
            &mut self.text_scratch,
        );
        self.draw.push(clip, ShaderKind::Text(handle), &self.text_scratch);
    }
}
