//! Row widgets.
//!
//! Each call takes the next id, claims a row at the area's cursor, hit tests
//! it, runs the interaction logic and records its geometry. Return values are
//! computed from this frame's input; nothing is retained between calls.

use critter_canvas::TriangleOrientation;
use critter_core::{Channel, Color, ShaderKind, TextureId, Vertex, WidgetId};
use critter_text::TextAlign;

use crate::context::{GuiContext, push_shape};
use crate::textfield::{Edit, TextBuffer};

/// Most tabs a single strip shows.
pub const MAX_TABS: usize = 16;

/// Horizontal placement of a row inside its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// At the content edge, ignoring indentation.
    Left,
    #[default]
    LeftIndented,
    Center,
    CenterIndented,
    Right,
}

/// View edge a `border_button` attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Border {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageOptions {
    pub lod: f32,
    pub align: Align,
    pub enabled: bool,
    /// Flip v for textures stored bottom row first.
    pub origin_bottom_left: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            lod: 0.0,
            align: Align::LeftIndented,
            enabled: true,
            origin_bottom_left: false,
        }
    }
}

/// Decimal places shown for a slider stepping by `inc`.
pub fn slider_decimals(inc: f32) -> usize {
    // The epsilon keeps 0.1 from landing just above -1 after log10.
    let digits = (inc.log10() - 1e-4).ceil() as i32;
    if digits >= 0 { 0 } else { (-digits) as usize }
}

pub fn format_slider_value(val: f32, inc: f32) -> String {
    let decimals = slider_decimals(inc);
    format!("{val:.decimals$}")
}

impl GuiContext {
    /// Claims a row of height `h` at the cursor and returns its top.
    fn claim_row(&mut self, h: i32) -> i32 {
        let spacing = self.config.metrics.spacing;
        let a = self.area_mut();
        let y = a.widget_y;
        a.widget_y += h + spacing;
        y
    }

    /// x and width of a row. `trim` takes one pixel off indented rows.
    fn row_span(&self, align: Align, trim: bool) -> (i32, i32) {
        let a = self.area();
        match align {
            Align::Left => (a.content.x + self.config.metrics.area_padding, a.widget_w),
            Align::LeftIndented | Align::Right => (a.widget_x, a.widget_w - i32::from(trim)),
            Align::Center | Align::CenterIndented => {
                (a.widget_x, a.widget_w - (a.widget_x - a.scissor.x))
            }
        }
    }

    fn baseline(&self, y: i32) -> i32 {
        let m = &self.config.metrics;
        y + m.button_height / 2 + m.text_height / 2
    }

    fn label_color(&self, id: WidgetId, enabled: bool) -> Color {
        let t = &self.config.theme;
        if !enabled {
            t.text_disabled
        } else if self.ui.is_hot(id) {
            t.text_hot
        } else {
            t.text
        }
    }

    pub fn button(&mut self, text: &str, enabled: bool) -> bool {
        let rgb = self.config.theme.button;
        let r = self.config.metrics.button_radius;
        self.button_ex(text, enabled, Align::LeftIndented, rgb, r)
    }

    /// Button with explicit placement, fill color (alpha ignored) and corner radius.
    pub fn button_ex(
        &mut self,
        text: &str,
        enabled: bool,
        align: Align,
        rgb: Color,
        r: i32,
    ) -> bool {
        if !self.require_frame("button") {
            return false;
        }
        let id = self.next_id();
        let bh = self.config.metrics.button_height;
        let y = self.claim_row(bh);
        let (x, w) = self.row_span(align, true);

        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, bh, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        let fill = rgb.with_alpha(if self.ui.is_active(id) { 196 } else { 96 });
        self.draw_rounded_rect(x as f32, y as f32, w as f32, bh as f32, r as f32, fill);
        let color = self.label_color(id, enabled);
        let baseline = self.baseline(y);
        self.draw_text(x + bh / 2, baseline, TextAlign::Left, text, color);
        fired
    }

    /// Full-width selectable row, highlighted only while hot.
    pub fn item(&mut self, text: &str, enabled: bool) -> bool {
        if !self.require_frame("item") {
            return false;
        }
        let id = self.next_id();
        let bh = self.config.metrics.button_height;
        let (x, w) = (self.area().widget_x, self.area().widget_w);
        let y = self.claim_row(bh);

        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, bh, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        if self.ui.is_hot(id) {
            let alpha = if self.ui.is_active(id) { 196 } else { 96 };
            let fill = self.config.theme.accent.with_alpha(alpha);
            self.draw_rounded_rect(x as f32, y as f32, w as f32, bh as f32, 2.0, fill);
        }
        let t = &self.config.theme;
        let color = if enabled { t.text } else { t.text_disabled };
        let baseline = self.baseline(y);
        self.draw_text(x + bh / 2, baseline, TextAlign::Left, text, color);
        fired
    }

    /// Checkbox row. Returns true when clicked; the caller flips its state.
    pub fn check(&mut self, text: &str, checked: bool, enabled: bool) -> bool {
        if !self.require_frame("check") {
            return false;
        }
        let id = self.next_id();
        let m = self.config.metrics;
        let (x, w) = (self.area().widget_x, self.area().widget_w);
        let y = self.claim_row(m.button_height);

        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, m.button_height, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);
        let active = self.ui.is_active(id);

        let cs = m.check_size;
        let cx = (x + m.button_height / 2 - cs / 2) as f32;
        let cy = (y + m.button_height / 2 - cs / 2) as f32;
        let cs = cs as f32;
        let frame = self.config.theme.control.with_alpha(if active { 196 } else { 96 });
        self.draw_rounded_rect(cx - 3.0, cy - 3.0, cs + 6.0, cs + 6.0, 4.0, frame);
        if checked {
            let mark = if enabled {
                Color::WHITE.with_alpha(if active { 255 } else { 200 })
            } else {
                self.config.theme.text_disabled
            };
            self.draw_rounded_rect(cx, cy, cs, cs, cs / 2.0 - 1.0, mark);
        }

        let color = self.label_color(id, enabled);
        let baseline = self.baseline(y);
        self.draw_text(x + m.button_height, baseline, TextAlign::Left, text, color);
        fired
    }

    /// Checkbox bound to `flag`. Returns true on the frame it toggles.
    pub fn bool_toggle(&mut self, text: &str, flag: &mut bool, enabled: bool) -> bool {
        let clicked = self.check(text, *flag, enabled);
        if clicked {
            *flag = !*flag;
        }
        clicked
    }

    /// Radio list: one check per label, returns the selected index.
    pub fn choose(&mut self, selected: usize, labels: &[&str], enabled: bool) -> usize {
        let mut out = selected;
        for (i, label) in labels.iter().enumerate() {
            if self.check(label, i == selected, enabled) {
                out = i;
            }
        }
        out
    }

    /// Disclosure row. `subtext` is drawn right aligned.
    pub fn collapse(
        &mut self,
        text: &str,
        subtext: Option<&str>,
        checked: bool,
        enabled: bool,
    ) -> bool {
        if !self.require_frame("collapse") {
            return false;
        }
        let id = self.next_id();
        let m = self.config.metrics;
        let (x, w) = (self.area().widget_x, self.area().widget_w);
        let y = self.claim_row(m.button_height);

        let cx = x + m.button_height / 2 - m.check_size / 2;
        let cy = y + m.button_height / 2 - m.check_size / 2 + m.spacing / 2;
        let text_y = self.baseline(y) + m.spacing / 2;

        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, m.button_height, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        let arrow = Color::WHITE.with_alpha(if self.ui.is_active(id) { 255 } else { 200 });
        let cs = m.check_size;
        if checked {
            self.draw_triangle(cx, cy, cs, cs, TriangleOrientation::Up, arrow);
        } else {
            self.draw_triangle(cx - 1, cy, cs, cs, TriangleOrientation::Right, arrow);
        }

        let color = self.label_color(id, enabled);
        self.draw_text(x + m.button_height, text_y, TextAlign::Left, text, color);
        if let Some(sub) = subtext {
            let dim = self.config.theme.area_title;
            self.draw_text(x + w - m.button_height / 2, text_y, TextAlign::Right, sub, dim);
        }
        fired
    }

    pub fn label(&mut self, text: &str) {
        self.label_colored(text, Color::WHITE);
    }

    /// Text row without spacing below it.
    pub fn label_colored(&mut self, text: &str, color: Color) {
        if !self.require_frame("label") {
            return;
        }
        let bh = self.config.metrics.button_height;
        let a = self.area_mut();
        let (x, y) = (a.widget_x, a.widget_y);
        a.widget_y += bh;
        let baseline = self.baseline(y);
        self.draw_text(x, baseline, TextAlign::Left, text, color);
    }

    /// Right-aligned text row without spacing below it.
    pub fn value(&mut self, text: &str) {
        if !self.require_frame("value") {
            return;
        }
        let bh = self.config.metrics.button_height;
        let a = self.area_mut();
        let (x, y, w) = (a.widget_x, a.widget_y, a.widget_w);
        a.widget_y += bh;
        let baseline = self.baseline(y);
        let color = self.config.theme.text;
        self.draw_text(x + w - bh / 2, baseline, TextAlign::Right, text, color);
    }

    /// Horizontal slider. `val` snaps to multiples of `inc` while dragged.
    /// Returns true while the value changes and on release.
    #[allow(clippy::too_many_arguments)]
    pub fn slider(
        &mut self,
        text: &str,
        val: &mut f32,
        min: f32,
        max: f32,
        inc: f32,
        enabled: bool,
        align: Align,
    ) -> bool {
        if !self.require_frame("slider") {
            return false;
        }
        let id = self.next_id();
        let m = self.config.metrics;
        let (sh, marker) = (m.slider_height, m.slider_marker_width);
        let y = self.claim_row(sh);
        let (x, w) = self.row_span(align, false);

        let track = self.config.theme.slider_track;
        self.draw_rounded_rect(x as f32, y as f32, w as f32, sh as f32, 4.0, track);

        let range = w - marker;
        let mut u = ((*val - min) / (max - min)).clamp(0.0, 1.0);
        let mut pos = (u * range as f32) as i32;
        let mut changed = false;

        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x + pos, y, marker, sh, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        if self.ui.is_active(id) {
            if self.ui.went_active {
                self.ui.drag_x = self.input.mx;
                self.ui.drag_origin = u;
            }
            if self.ui.drag_x != self.input.mx && range > 0 {
                let delta = (self.input.mx - self.ui.drag_x) as f32 / range as f32;
                u = (self.ui.drag_origin + delta).clamp(0.0, 1.0);
                let mut v = min + u * (max - min);
                if inc > 0.0 {
                    v = (v / inc + 0.5).floor() * inc;
                }
                *val = v;
                pos = (u * range as f32) as i32;
                changed = true;
            }
        }

        let t = self.config.theme;
        let marker_color = if self.ui.is_active(id) {
            Color::WHITE
        } else if self.ui.is_hot(id) {
            t.accent.with_alpha(128)
        } else {
            t.marker
        };
        let (mx, my) = ((x + pos) as f32, y as f32);
        self.draw_rounded_rect(mx, my, marker as f32, sh as f32, 4.0, marker_color);

        let msg = format_slider_value(*val, inc);
        let color = self.label_color(id, enabled);
        let baseline = y + sh / 2 + m.text_height / 2;
        self.draw_text(x + sh / 2, baseline, TextAlign::Left, text, color);
        self.draw_text(x + w - sh / 2, baseline, TextAlign::Right, &msg, color);

        fired || changed
    }

    /// Integer slider stepping by one.
    pub fn slider_i32(
        &mut self,
        text: &str,
        val: &mut i32,
        min: i32,
        max: i32,
        enabled: bool,
        align: Align,
    ) -> bool {
        let mut v = *val as f32;
        let res = self.slider(text, &mut v, min as f32, max as f32, 1.0, enabled, align);
        *val = v as i32;
        res
    }

    /// Single-line ASCII field. Clicking toggles focus; while focused the
    /// frame's character edits `buf`. Returns whether the field has focus.
    pub fn input(&mut self, label: &str, buf: &mut TextBuffer, enabled: bool) -> bool {
        let r = self.config.metrics.input_radius;
        self.input_ex(label, buf, enabled, Align::LeftIndented, r)
    }

    pub fn input_ex(
        &mut self,
        label: &str,
        buf: &mut TextBuffer,
        enabled: bool,
        align: Align,
        r: i32,
    ) -> bool {
        if !self.require_frame("input") {
            return false;
        }
        let id = self.next_id();
        let bh = self.config.metrics.button_height;
        let y = self.claim_row(bh);
        let (mut x, mut w) = self.row_span(align, true);
        let baseline = self.baseline(y);

        if !label.is_empty() {
            let color = self.config.theme.text;
            self.draw_text(x, baseline, TextAlign::Left, label, color);
        }

        if self.ui.is_input_field(id) {
            match buf.apply(self.input.ch) {
                Edit::Commit => self.ui.clear_input_field(),
                Edit::Rejected => log::debug!("text field full at {} bytes", buf.capacity()),
                _ => {}
            }
        }

        if !label.is_empty() {
            let shift = self.text_length(label) as i32 + 6;
            x += shift;
            w -= shift;
        }
        let enabled = enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, bh, true);
        self.ui.input_logic(id, over, &self.input);

        let focused = self.ui.is_input_field(id);
        let t = self.config.theme;
        let fill = if focused { t.accent } else { t.control };
        self.draw_rounded_rect(x as f32, y as f32, w as f32, bh as f32, r as f32, fill);

        let color = if focused {
            Color::BLACK
        } else if self.ui.is_hot(id) {
            t.text_hot
        } else {
            Color::WHITE
        };
        self.draw_text(x + 6, baseline, TextAlign::Left, buf.as_str(), color);
        focused
    }

    pub fn tabs(&mut self, selected: usize, labels: &[&str], enabled: bool) -> usize {
        let m = self.config.metrics;
        self.tabs_ex(selected, labels, enabled, Align::LeftIndented, m.tabs_height, m.tabs_radius)
    }

    /// Tab strip, one id per tab. Returns the selected index.
    pub fn tabs_ex(
        &mut self,
        selected: usize,
        labels: &[&str],
        enabled: bool,
        align: Align,
        height: i32,
        r: i32,
    ) -> usize {
        if !self.require_frame("tabs") {
            return selected;
        }
        if labels.len() > MAX_TABS {
            log::warn!("{} tabs requested, showing the first {MAX_TABS}", labels.len());
        }
        let labels = &labels[..labels.len().min(MAX_TABS)];
        if labels.is_empty() {
            return selected;
        }
        let n = labels.len() as i32;

        let y = self.claim_row(height);
        let (x, w) = self.row_span(align, true);
        let tab_w = w / n;
        let half = w / (n * 2);
        let text_y = y + height / 2 + self.font_size() as i32 / 2 - 2;
        let tab_h = height as f32;

        let t = self.config.theme;
        let strip = t.control.with_alpha(if enabled { 96 } else { 64 });
        self.draw_rounded_rect(x as f32, y as f32, w as f32, tab_h, r as f32, strip);

        let enabled = enabled && self.area_enabled();
        let mut sel = selected;
        for (i, label) in labels.iter().enumerate() {
            let id = self.next_id();
            let bx = x + i as i32 * w / n;

            let over = enabled && self.in_rect(bx, y, tab_w, height, true);
            let fired = self.ui.button_logic(id, over, &mut self.input);

            let text_color = if i == sel {
                if enabled { Color::BLACK } else { Color::WHITE.with_alpha(100) }
            } else if self.ui.is_hot(id) {
                t.accent.with_alpha(if enabled { 255 } else { 100 })
            } else {
                Color::WHITE.with_alpha(if enabled { 200 } else { 100 })
            };

            if i == sel {
                let fill = if enabled {
                    t.accent.with_alpha(200)
                } else {
                    t.control.with_alpha(32)
                };
                self.draw_rounded_rect(bx as f32, y as f32, tab_w as f32, tab_h, r as f32, fill);
            } else if self.ui.is_active(id) {
                let fill = t.control.with_alpha(196);
                self.draw_rounded_rect(bx as f32, y as f32, tab_w as f32, tab_h, r as f32, fill);
            }
            self.draw_text(bx + half, text_y, TextAlign::Center, label, text_color);

            if fired {
                sel = i;
            }
        }
        sel
    }

    fn image_x(&self, align: Align, w: i32) -> i32 {
        let a = self.area();
        match align {
            Align::Left => a.content.x + self.config.metrics.area_padding,
            Align::LeftIndented => a.widget_x,
            Align::Center => a.content.x + (a.widget_w - w) / 2,
            Align::CenterIndented => (a.widget_x + a.widget_w + a.content.x - w) / 2,
            Align::Right => a.content.x + a.widget_w - w,
        }
    }

    fn image_quad(
        &mut self,
        texture: Option<TextureId>,
        channel: Option<Channel>,
        w: i32,
        h: i32,
        opts: ImageOptions,
    ) -> bool {
        if !self.require_frame("image") {
            return false;
        }
        let id = self.next_id();
        let x = self.image_x(opts.align, w);
        let y = self.claim_row(h);

        let enabled = opts.enabled && self.area_enabled();
        let over = enabled && self.in_rect(x, y, w, h, true);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = (x0 + w as f32, y0 + h as f32);
        let (v0, v1) = if opts.origin_bottom_left { (1.0, 0.0) } else { (0.0, 1.0) };
        let white = Color::WHITE.to_abgr();
        let quad = [
            Vertex::textured(x0, y0, 0.0, v0, white),
            Vertex::textured(x1, y0, 1.0, v0, white),
            Vertex::textured(x1, y1, 1.0, v1, white),
            Vertex::textured(x1, y1, 1.0, v1, white),
            Vertex::textured(x0, y1, 0.0, v1, white),
            Vertex::textured(x0, y0, 0.0, v0, white),
        ];
        let shader = ShaderKind::Image {
            texture,
            lod: opts.lod,
            enabled,
            channel,
        };
        let clip = self.clip();
        self.draw.push(clip, shader, &quad);
        fired
    }

    /// Clickable texture row. `None` draws the missing-texture placeholder.
    pub fn image(
        &mut self,
        texture: Option<TextureId>,
        w: i32,
        h: i32,
        opts: ImageOptions,
    ) -> bool {
        self.image_quad(texture, None, w, h, opts)
    }

    /// Image sized to `width_frac` of the row width at the given aspect ratio.
    pub fn image_scaled(
        &mut self,
        texture: Option<TextureId>,
        width_frac: f32,
        aspect: f32,
        opts: ImageOptions,
    ) -> bool {
        let w = width_frac * self.area().widget_w as f32;
        let h = if aspect > 0.0 { w / aspect } else { w };
        self.image_quad(texture, None, w as i32, h as i32, opts)
    }

    /// Shows one channel of `texture` as grey.
    pub fn image_channel(
        &mut self,
        texture: Option<TextureId>,
        channel: Channel,
        w: i32,
        h: i32,
        opts: ImageOptions,
    ) -> bool {
        self.image_quad(texture, Some(channel), w, h, opts)
    }

    /// Strip along a view edge with an arrow, independent of any area.
    pub fn border_button(&mut self, border: Border, checked: bool, enabled: bool) -> bool {
        if !self.require_frame("border_button") {
            return false;
        }
        const TRI: i32 = 12;
        const EDGE: i32 = 15;

        let id = self.next_border_id();
        let (vw, vh) = (self.input.view_width, self.input.view_height);
        use TriangleOrientation as O;
        let (x, y, w, h, tx, ty, orientation) = match border {
            Border::Left => (
                -EDGE,
                -1,
                2 * EDGE + 1,
                vh,
                0,
                (vh - TRI) / 2,
                if checked { O::Left } else { O::Right },
            ),
            Border::Right => (
                vw - EDGE,
                -1,
                2 * EDGE + 1,
                vh,
                vw - TRI - 2,
                (vh - (2 * EDGE + 1)) / 2,
                if checked { O::Right } else { O::Left },
            ),
            Border::Top => (
                0,
                -EDGE,
                vw,
                2 * EDGE,
                (vw - TRI) / 2,
                0,
                if checked { O::Up } else { O::Down },
            ),
            Border::Bottom => (
                0,
                vh - EDGE,
                vw,
                2 * EDGE,
                (vw - TRI) / 2,
                vh - TRI,
                if checked { O::Down } else { O::Up },
            ),
        };

        let over = enabled && self.in_rect(x, y, w, h, false);
        let fired = self.ui.button_logic(id, over, &mut self.input);

        // Drawn unclipped: the strip belongs to the view, not to the current area.
        let t = self.config.theme;
        let fringe = self.config.metrics.fringe;
        let strip = if self.ui.is_active(id) { t.border_strip_active } else { t.border_strip };
        push_shape(
            &mut self.draw,
            None,
            self.tess
                .rect(x as f32, y as f32, w as f32, h as f32, strip.to_abgr(), fringe),
        );
        let arrow = if self.ui.is_hot(id) {
            t.accent.with_alpha(222)
        } else {
            Color::WHITE.with_alpha(192)
        };
        let s = TRI as f32;
        push_shape(
            &mut self.draw,
            None,
            self.tess
                .triangle(tx as f32, ty as f32, s, s, orientation, arrow.to_abgr()),
        );
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_decimals_follow_increment() {
        assert_eq!(slider_decimals(1.0), 0);
        assert_eq!(slider_decimals(5.0), 0);
        assert_eq!(slider_decimals(0.1), 1);
        assert_eq!(slider_decimals(0.01), 2);
        assert_eq!(slider_decimals(0.001), 3);
    }

    #[test]
    fn test_slider_value_text() {
        insta::assert_snapshot!(format_slider_value(0.5, 0.01), @"0.50");
        insta::assert_snapshot!(format_slider_value(42.0, 1.0), @"42");
        insta::assert_snapshot!(format_slider_value(0.6, 0.05), @"0.6");
    }
}
