//! Panels and scroll regions.
//!
//! Every area owns a content rect, a scissor rect and a widget cursor that
//! rows advance downwards. A panel stays current after `end_area` so its
//! cursor can still be queried; it is popped by the next `begin_area`,
//! `end_area` or `end_scroll`, whichever comes first. Scroll regions are
//! strictly nested and popped by `end_scroll`.

use critter_core::{GuiError, IRect, MAX_AREA_DEPTH, Result, WidgetId};
use critter_text::TextAlign;

use crate::context::GuiContext;
use crate::scroll::ScrollKey;

/// Areas per frame, root included.
pub const MAX_AREAS: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AreaKind {
    #[default]
    Root,
    Panel,
    Scroll,
}

impl AreaKind {
    pub fn name(self) -> &'static str {
        match self {
            AreaKind::Root => "root",
            AreaKind::Panel => "area",
            AreaKind::Scroll => "scroll",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Area {
    pub kind: AreaKind,
    /// `end_area` was called on this panel.
    pub closed: bool,
    /// Outer rect; for scroll regions `h` is the visible height.
    pub rect: IRect,
    pub content: IRect,
    pub scissor: IRect,
    pub scissor_enabled: bool,
    pub widget_x: i32,
    pub widget_y: i32,
    pub widget_w: i32,
    pub scroll_key: Option<ScrollKey>,
    /// Id of the scrollbar thumb.
    pub scroll_id: Option<WidgetId>,
    /// Pointer is within the visible part of this area.
    pub inside: bool,
    /// A wheel event was consumed here or in a nested region this frame.
    pub did_scroll: bool,
    pub enabled: bool,
}

impl Area {
    /// Scissor grown by one pixel upwards, clamped to the view origin.
    pub fn clip_rect(&self) -> Option<IRect> {
        self.scissor_enabled.then(|| {
            IRect::new(
                self.scissor.x.max(0),
                (self.scissor.y - 1).max(0),
                self.scissor.w,
                self.scissor.h + 1,
            )
        })
    }
}

impl GuiContext {
    fn open_area(&mut self) -> Result<WidgetId> {
        // Nesting is the tighter bound whenever both are hit.
        if self.ids.depth() >= MAX_AREA_DEPTH {
            log::error!("area stack overflow at depth {}", self.ids.depth());
            return Err(GuiError::AreaDepthExceeded {
                limit: MAX_AREA_DEPTH,
            });
        }
        if self.areas.len() >= MAX_AREAS {
            log::error!("area capacity of {MAX_AREAS} reached");
            return Err(GuiError::AreaCapacityExceeded { limit: MAX_AREAS });
        }
        let id = self.ids.next()?;
        debug_assert_eq!(id.0 as usize, self.areas.len());
        self.areas.push(Area::default());
        Ok(self.next_id())
    }

    fn pop_closed_panels(&mut self) {
        while self.ids.depth() > 1 {
            let a = self.area();
            if a.kind != AreaKind::Panel || !a.closed {
                break;
            }
            self.ids.pop();
        }
    }

    /// Opens a panel at `x, y` with a title bar when `name` is non-empty.
    /// Returns whether the pointer is inside its content.
    #[allow(clippy::too_many_arguments)]
    pub fn begin_area(
        &mut self,
        name: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        enabled: bool,
        r: i32,
    ) -> Result<bool> {
        if !self.require_frame("begin_area") {
            return Err(GuiError::NotInFrame);
        }
        self.pop_closed_panels();
        let scroll_id = self.open_area()?;

        let m = &self.config.metrics;
        let header = if name.is_empty() { 0 } else { m.area_header };
        let pad = m.area_padding;
        let content = IRect::new(x + pad, y + pad + header, w - pad, h - pad * 2 - header);
        let inside = self.pointer_in(content);

        *self.area_mut() = Area {
            kind: AreaKind::Panel,
            closed: false,
            rect: IRect::new(x, y, w, h),
            content,
            scissor: content,
            scissor_enabled: false,
            widget_x: content.x,
            widget_y: content.y,
            widget_w: w - pad * 2,
            scroll_key: None,
            scroll_id: Some(scroll_id),
            inside,
            did_scroll: false,
            enabled,
        };

        let bg = self.config.theme.area_background;
        if r == 0 {
            // The extra 0.3 closes the seam between adjacent panels.
            self.draw_rect(x as f32, y as f32, w as f32 + 0.3, h as f32 + 0.3, bg);
        } else {
            self.draw_rounded_rect(x as f32, y as f32, w as f32, h as f32, r as f32, bg);
        }
        if !name.is_empty() {
            let title = self.config.theme.area_title;
            self.draw_text(x + 10, y + 18, TextAlign::Left, name, title);
        }

        self.area_mut().scissor_enabled = true;
        self.inside_any_area |= inside;
        Ok(inside)
    }

    pub fn end_area(&mut self) -> Result<()> {
        if !self.require_frame("end_area") {
            return Err(GuiError::NotInFrame);
        }
        // A nested panel closed earlier is still on the stack.
        self.pop_closed_panels();
        let area = self.area_mut();
        if area.kind == AreaKind::Panel && !area.closed {
            area.closed = true;
            return Ok(());
        }
        let found = area.kind.name();
        log::error!("end_area while the innermost scope is {found}");
        Err(GuiError::ScopeMismatch {
            expected: "area",
            found,
        })
    }

    /// Opens a scroll region `height` pixels tall at the cursor. Its offset is
    /// remembered under `key` across frames.
    pub fn begin_scroll(
        &mut self,
        height: i32,
        key: impl Into<ScrollKey>,
        enabled: bool,
    ) -> Result<bool> {
        if !self.require_frame("begin_scroll") {
            return Err(GuiError::NotInFrame);
        }
        let key = key.into();
        let parent_idx = self.ids.current().0 as usize;
        let parent = self.areas[parent_idx].clone();
        let scroll_id = self.open_area()?;

        let gutter = self.config.metrics.area_padding * 3;
        let spacing = self.config.metrics.spacing;
        let offset = self.scroll.get(key);

        let bottom = (parent.widget_y + height).min(parent.scissor.bottom());
        let top = parent.widget_y.max(parent.scissor.y);
        let content = IRect::new(
            parent.content.x,
            parent.widget_y,
            parent.content.w - gutter,
            height,
        );
        let scissor = IRect::new(content.x, top - 1, content.w, (bottom - top).max(0));
        let hover = IRect::new(parent.scissor.x, scissor.y, parent.scissor.w, scissor.h);
        let inside = self.pointer_in(hover);

        *self.area_mut() = Area {
            kind: AreaKind::Scroll,
            closed: false,
            rect: content,
            content,
            scissor,
            scissor_enabled: true,
            widget_x: parent.widget_x,
            widget_y: parent.widget_y + offset,
            widget_w: parent.widget_w - gutter,
            scroll_key: Some(key),
            scroll_id: Some(scroll_id),
            inside,
            did_scroll: false,
            enabled,
        };
        self.areas[parent_idx].widget_y += height + spacing;

        self.inside_any_area |= inside;
        Ok(inside)
    }

    /// Closes the innermost scroll region: applies the wheel, then draws and
    /// drives the scrollbar in the parent's clip.
    pub fn end_scroll(&mut self, r: i32) -> Result<()> {
        if !self.require_frame("end_scroll") {
            return Err(GuiError::NotInFrame);
        }
        self.pop_closed_panels();
        let area = self.area().clone();
        if area.kind != AreaKind::Scroll {
            let found = area.kind.name();
            log::error!("end_scroll while the innermost scope is {found}");
            return Err(GuiError::ScopeMismatch {
                expected: "scroll",
                found,
            });
        }
        self.area_mut().scissor_enabled = false;

        let m = &self.config.metrics;
        let (spacing, step, bar_w) = (m.spacing, m.scroll_step, m.scrollbar_width());
        let key = area.scroll_key.unwrap_or(ScrollKey(0));
        let mut offset = self.scroll.get(key);

        let xx = area.content.x + area.content.w - 1;
        let yy = area.content.y;
        let height = area.rect.h;

        let sbot = (area.content.y + height).max(area.widget_y - spacing);
        let stop = area.content.y + offset;
        let sh = (sbot - stop).max(1);
        let diff = height - sh;
        let min = if diff < 0 { diff } else { offset };

        let bar = height as f32 / sh as f32;
        let has_bar = bar < 1.0;

        let mut did_scroll = area.did_scroll;
        if area.inside && !area.did_scroll && !self.ui.any_active() && self.input.scroll != 0 {
            offset = (offset + step * self.input.scroll).max(min).min(0);
            if has_bar {
                did_scroll = true;
            }
        }

        self.ids.pop();
        self.area_mut().did_scroll |= did_scroll;

        if has_bar {
            let thumb_y = (-offset as f32 / sh as f32).clamp(0.0, 1.0);
            let hy = yy + (thumb_y * height as f32) as i32;
            let hh = (bar * height as f32) as i32;

            let hid = area.scroll_id.unwrap_or(WidgetId::new(self.ids.current(), u32::MAX));
            let over = self.in_rect(xx, hy, bar_w, hh, true);
            self.ui.button_logic(hid, over, &mut self.input);

            if self.ui.is_active(hid) {
                if self.ui.went_active {
                    self.ui.drag_y = self.input.my;
                }
                if self.ui.drag_y != self.input.my {
                    let drag = self.input.my - self.ui.drag_y;
                    let factor = sh as f32 / height as f32;
                    offset = (offset - (drag as f32 * factor) as i32).max(min).min(0);
                    self.ui.drag_y = self.input.my;
                }
            }

            let theme = &self.config.theme;
            let track = theme.scroll_track;
            let thumb = if self.ui.is_active(hid) {
                theme.accent.with_alpha(196)
            } else if self.ui.is_hot(hid) {
                theme.accent.with_alpha(96)
            } else {
                theme.marker
            };
            let r = r as f32;
            self.draw_rounded_rect(xx as f32, yy as f32, bar_w as f32, height as f32, r, track);
            self.draw_rounded_rect(xx as f32, hy as f32, bar_w as f32, hh as f32, r, thumb);
        } else if let Some(hid) = area.scroll_id
            && self.ui.is_active(hid)
        {
            // Content shrank under a dragged thumb.
            self.ui.clear_active(&mut self.input);
        }

        if let Some(key) = area.scroll_key {
            self.scroll.set(key, offset);
        }
        Ok(())
    }

    /// A titled panel whose body is a single scroll region.
    #[allow(clippy::too_many_arguments)]
    pub fn begin_scroll_area(
        &mut self,
        name: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        key: impl Into<ScrollKey>,
        enabled: bool,
        r: i32,
    ) -> Result<bool> {
        let inside = self.begin_area(name, x, y, w, h, enabled, r)?;
        let m = &self.config.metrics;
        let margins = if name.is_empty() {
            0
        } else {
            m.area_header + 2 * m.area_padding - 1
        };
        self.begin_scroll(h - margins, key, enabled)?;
        Ok(inside)
    }

    pub fn end_scroll_area(&mut self, r: i32) -> Result<()> {
        self.end_scroll(r)?;
        self.end_area()
    }

    pub fn indent(&mut self, w: i32) {
        if !self.require_frame("indent") {
            return;
        }
        let a = self.area_mut();
        a.widget_x += w;
        a.widget_w -= w;
    }

    pub fn unindent(&mut self, w: i32) {
        if !self.require_frame("unindent") {
            return;
        }
        let a = self.area_mut();
        a.widget_x -= w;
        a.widget_w += w;
    }

    pub fn separator(&mut self, h: i32) {
        if !self.require_frame("separator") {
            return;
        }
        self.area_mut().widget_y += h;
    }

    /// Advances by `h` with a one pixel rule across the row's middle.
    pub fn separator_line(&mut self, h: i32) {
        if !self.require_frame("separator_line") {
            return;
        }
        let a = self.area_mut();
        let (x, y, w) = (a.widget_x, a.widget_y + h / 2 - 1, a.widget_w);
        a.widget_y += h;
        let color = self.config.theme.separator;
        self.draw_rect(x as f32, y as f32, w as f32, 1.0, color);
    }

    pub fn widget_x(&self) -> i32 {
        self.area().widget_x
    }

    pub fn widget_y(&self) -> i32 {
        self.area().widget_y
    }

    pub fn widget_w(&self) -> i32 {
        self.area().widget_w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_rect_grows_upwards_and_clamps() {
        let mut a = Area {
            scissor: IRect::new(-4, 0, 100, 50),
            ..Default::default()
        };
        assert_eq!(a.clip_rect(), None);
        a.scissor_enabled = true;
        assert_eq!(a.clip_rect(), Some(IRect::new(0, 0, 100, 51)));
        a.scissor.y = 10;
        assert_eq!(a.clip_rect(), Some(IRect::new(0, 9, 100, 51)));
    }
}
