//! Hot / active / focused bookkeeping shared by every widget.
//!
//! A widget is *hot* while the pointer is over it and nothing else holds the
//! pointer, *active* between the press that started on it and the matching
//! release. Hot is double buffered: widgets nominate themselves into
//! `hot_to_be` during a frame and the nomination becomes `hot` at the start of
//! the next one, so the last widget drawn under the pointer wins without
//! earlier widgets flickering in the same frame.
//!
//! Text focus is tracked separately in `input_field` and survives activation
//! of other widgets, so a scrollbar can be dragged while a field keeps focus.

use critter_core::{InputSnapshot, WidgetId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    pub hot: Option<WidgetId>,
    pub hot_to_be: Option<WidgetId>,
    pub active: Option<WidgetId>,
    pub input_field: Option<WidgetId>,
    /// Set on the frame a widget became active.
    pub went_active: bool,
    /// Some widget evaluated so far this frame is hot.
    pub is_hot: bool,
    check_presence: bool,
    active_present: bool,
    pub drag_x: i32,
    pub drag_y: i32,
    pub drag_origin: f32,
}

impl Interaction {
    pub fn any_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, id: WidgetId) -> bool {
        self.active == Some(id)
    }

    pub fn is_hot(&self, id: WidgetId) -> bool {
        self.hot == Some(id)
    }

    pub fn is_input_field(&self, id: WidgetId) -> bool {
        self.input_field == Some(id)
    }

    pub fn set_hot(&mut self, id: WidgetId) {
        self.hot_to_be = Some(id);
    }

    pub fn set_active(&mut self, id: WidgetId) {
        self.active = Some(id);
        self.went_active = true;
    }

    /// Releases the pointer and consumes this frame's pointer edges so widgets
    /// evaluated later in the frame do not react to the same click.
    pub fn clear_active(&mut self, input: &mut InputSnapshot) {
        self.active = None;
        input.clear_edges();
    }

    pub fn clear_input_field(&mut self) {
        self.input_field = None;
    }

    /// Records that `id` was issued this frame. An active widget that is not
    /// issued for a whole frame loses activation in `end_frame`.
    pub fn confirm(&mut self, id: WidgetId) {
        if self.check_presence && self.active == Some(id) {
            self.active_present = true;
        }
    }

    pub fn begin_frame(&mut self) {
        self.hot = self.hot_to_be.take();
        self.went_active = false;
        self.is_hot = false;
        self.active_present = false;
    }

    pub fn end_frame(&mut self) {
        if self.check_presence && !self.active_present {
            if let Some(id) = self.active {
                log::debug!("active widget {id:?} vanished, releasing it");
            }
            self.active = None;
        }
        self.check_presence = self.active.is_some();
    }

    /// Press-and-release behavior. Returns true on the frame the pointer is
    /// released over the widget that received the press.
    pub fn button_logic(&mut self, id: WidgetId, over: bool, input: &mut InputSnapshot) -> bool {
        let mut fired = false;

        if !self.any_active() {
            if over {
                self.set_hot(id);
            }
            if self.is_hot(id) && input.left_pressed {
                self.set_active(id);
            }
        }

        if self.is_active(id) {
            if over {
                self.set_hot(id);
            }
            if input.left_released {
                fired = self.is_hot(id);
                self.clear_active(input);
            }
        }

        if self.is_hot(id) {
            self.is_hot = true;
        }
        fired
    }

    /// Focus toggling for text fields. A press while nothing is hot drops focus.
    pub fn input_logic(&mut self, id: WidgetId, over: bool, input: &InputSnapshot) {
        if !self.any_active() {
            if over {
                self.set_hot(id);
            }
            if self.is_hot(id) && input.left_pressed {
                if self.is_input_field(id) {
                    self.clear_input_field();
                } else {
                    self.input_field = Some(id);
                }
            }
        }

        if self.is_hot(id) {
            self.is_hot = true;
        }

        if input.left_pressed && !self.is_hot && self.input_field.is_some() {
            self.clear_input_field();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::AreaId;

    const A: WidgetId = WidgetId::new(AreaId(1), 0);
    const B: WidgetId = WidgetId::new(AreaId(1), 1);

    fn frame(
        ui: &mut Interaction,
        input: &mut InputSnapshot,
        left: bool,
        f: impl FnOnce(&mut Interaction, &mut InputSnapshot),
    ) {
        input.left_pressed = !input.left && left;
        input.left_released = input.left && !left;
        input.left = left;
        ui.begin_frame();
        f(ui, input);
        ui.end_frame();
        input.clear_edges();
    }

    #[test]
    fn test_hot_takes_a_frame_to_settle() {
        let mut ui = Interaction::default();
        let mut input = InputSnapshot::default();

        frame(&mut ui, &mut input, false, |ui, input| {
            assert!(!ui.button_logic(A, true, input));
            assert!(!ui.is_hot(A));
        });
        assert_eq!(ui.hot_to_be, Some(A));

        frame(&mut ui, &mut input, false, |ui, input| {
            ui.button_logic(A, true, input);
            assert!(ui.is_hot(A));
            assert!(ui.is_hot);
        });
    }

    #[test]
    fn test_last_widget_under_pointer_wins() {
        let mut ui = Interaction::default();
        let mut input = InputSnapshot::default();
        frame(&mut ui, &mut input, false, |ui, input| {
            ui.button_logic(A, true, input);
            ui.button_logic(B, true, input);
        });
        assert_eq!(ui.hot_to_be, Some(B));
    }

    #[test]
    fn test_press_elsewhere_drops_focus_but_activation_keeps_it() {
        let mut ui = Interaction::default();
        let mut input = InputSnapshot::default();

        for left in [false, true, false] {
            frame(&mut ui, &mut input, left, |ui, input| ui.input_logic(A, true, input));
        }
        assert!(ui.is_input_field(A));

        ui.set_active(B);
        assert!(ui.is_input_field(A));
        ui.active = None;

        // Pointer moves away; the next press lands on nothing hot.
        frame(&mut ui, &mut input, false, |ui, input| ui.input_logic(A, false, input));
        frame(&mut ui, &mut input, true, |ui, input| ui.input_logic(A, false, input));
        assert_eq!(ui.input_field, None);
    }

    #[test]
    fn test_missing_active_widget_is_released() {
        let mut ui = Interaction::default();
        let mut input = InputSnapshot::default();

        frame(&mut ui, &mut input, false, |ui, input| {
            ui.confirm(A);
            ui.button_logic(A, true, input);
        });
        frame(&mut ui, &mut input, true, |ui, input| {
            ui.confirm(A);
            ui.button_logic(A, true, input);
        });
        assert!(ui.is_active(A));

        // Still issued: stays active.
        frame(&mut ui, &mut input, true, |ui, _| ui.confirm(A));
        assert!(ui.is_active(A));

        // Not issued for a frame: released.
        frame(&mut ui, &mut input, true, |_, _| {});
        assert!(!ui.any_active());
    }

    #[test]
    fn test_clear_active_consumes_edges() {
        let mut ui = Interaction::default();
        let mut input = InputSnapshot {
            left_released: true,
            scroll: 2,
            ..Default::default()
        };
        ui.set_active(A);
        ui.clear_active(&mut input);
        assert!(!input.left_released);
        assert_eq!(input.scroll, 0);
    }
}
