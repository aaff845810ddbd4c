//! Layout metrics and the color theme.
//!
//! Both are plain data with defaults matching the stock look. With the `serde`
//! feature they can be loaded from a file; missing fields fall back to the
//! defaults.

use critter_core::{Color, DEFAULT_REPEAT_DELAY};

/// Pixel sizes used by layout and hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Metrics {
    pub button_height: i32,
    pub slider_height: i32,
    pub slider_marker_width: i32,
    pub check_size: i32,
    /// Vertical gap after every row.
    pub spacing: i32,
    /// Cap height used to center text vertically in a row.
    pub text_height: i32,
    pub area_padding: i32,
    /// Title bar height of named areas.
    pub area_header: i32,
    /// Pixels scrolled per wheel notch.
    pub scroll_step: i32,
    pub button_radius: i32,
    pub input_radius: i32,
    pub tabs_height: i32,
    pub tabs_radius: i32,
    /// Seconds a key must be held before it repeats.
    pub key_repeat_delay: f32,
    /// Width of the antialiasing fringe around filled shapes.
    pub fringe: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            button_height: 20,
            slider_height: 20,
            slider_marker_width: 10,
            check_size: 8,
            spacing: 4,
            text_height: 8,
            area_padding: 6,
            area_header: 20,
            scroll_step: 20,
            button_radius: 9,
            input_radius: 4,
            tabs_height: 20,
            tabs_radius: 9,
            key_repeat_delay: DEFAULT_REPEAT_DELAY,
            fringe: 1.0,
        }
    }
}

impl Metrics {
    /// Width of a scroll region's bar, also the gutter reserved for it.
    pub fn scrollbar_width(&self) -> i32 {
        self.area_padding * 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Theme {
    pub area_background: Color,
    pub area_title: Color,
    pub text: Color,
    pub text_hot: Color,
    pub text_disabled: Color,
    /// Highlight for hot and selected states; widgets vary its alpha.
    pub accent: Color,
    /// Neutral fill behind checks, inputs and tab strips; widgets vary its alpha.
    pub control: Color,
    /// Default button fill. Only rgb is used.
    pub button: Color,
    pub slider_track: Color,
    pub scroll_track: Color,
    /// Idle slider marker and scrollbar thumb.
    pub marker: Color,
    pub separator: Color,
    pub border_strip: Color,
    pub border_strip_active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            area_background: Color(0, 0, 0, 192),
            area_title: Color(255, 255, 255, 128),
            text: Color(255, 255, 255, 200),
            text_hot: Color(255, 196, 0, 255),
            text_disabled: Color(128, 128, 128, 200),
            accent: Color(255, 196, 0, 255),
            control: Color(128, 128, 128, 96),
            button: Color(128, 128, 128, 255),
            slider_track: Color(0, 0, 0, 128),
            scroll_track: Color(0, 0, 0, 196),
            marker: Color(255, 255, 255, 64),
            separator: Color(255, 255, 255, 32),
            border_strip: Color(0, 0, 0, 222),
            border_strip_active: Color(23, 23, 23, 192),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct GuiConfig {
    pub metrics: Metrics,
    pub theme: Theme,
}
