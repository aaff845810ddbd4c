//! # Critter UI
//!
//! An immediate-mode GUI engine. The host calls widget functions every frame
//! between `begin_frame` and `end_frame`; each call hit tests, updates the
//! shared interaction state, records its geometry and returns what happened.
//! Widgets keep no state of their own: the caller owns values, the context
//! only remembers which widget is hot, active or focused, plus scroll offsets.
//!
//! Widgets are identified by their area and the order they are called in, so
//! the same call sequence yields the same ids frame after frame.
//!
//! ```rust
//! use critter_core::{AsciiKeyMap, RawInput};
//! use critter_ui::{Align, GuiContext};
//!
//! let mut gui = GuiContext::default();
//! let mut volume = 0.5_f32;
//! let mut muted = false;
//!
//! gui.begin_frame(&RawInput::new(1280, 720), &AsciiKeyMap).unwrap();
//! gui.begin_area("Audio", 20, 20, 240, 200, true, 4).unwrap();
//! gui.slider("Volume", &mut volume, 0.0, 1.0, 0.05, !muted, Align::LeftIndented);
//! gui.bool_toggle("Mute", &mut muted, true);
//! gui.end_area().unwrap();
//! gui.end_frame().unwrap();
//! ```
//!
//! Geometry is replayed into a `critter_core::RenderSink` with
//! [`GuiContext::render`] after the frame ends.

pub mod area;
pub mod color_wheel;
pub mod config;
pub mod interaction;
pub mod scroll;
pub mod textfield;
pub mod widgets;

mod context;

pub use critter_canvas::TriangleOrientation;
pub use critter_text::TextAlign;

pub use area::{AreaKind, MAX_AREAS};
pub use config::{GuiConfig, Metrics, Theme};
pub use context::GuiContext;
pub use interaction::Interaction;
pub use scroll::ScrollKey;
pub use textfield::{Edit, TextBuffer};
pub use widgets::{Align, Border, ImageOptions, MAX_TABS};
