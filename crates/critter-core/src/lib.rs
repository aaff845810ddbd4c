//! # Critter core
//!
//! Plain data shared by every Critter crate. Nothing in here knows about
//! widgets; `critter-ui` builds the immediate-mode engine on top.
//!
//! - `geometry`: `Vec2`, `Rect` and the integer layout `IRect`.
//! - `color`: 8-bit RGBA `Color` plus HSV helpers used by the color wheel.
//! - `input`: `RawInput` from the platform, key repeat, and the per-frame
//!   `InputSnapshot` widgets read.
//! - `ids`: `IdStack`, `AreaId` and `WidgetId`.
//! - `render_api`: `Vertex`, `ShaderKind`, the `RenderSink` trait and the
//!   `DrawList` that records a frame's triangles.
//!
//! ## Rendering contract
//!
//! The GUI never talks to a graphics API. A frame is recorded into a
//! `DrawList` and replayed into any `RenderSink`:
//!
//! ```rust
//! use critter_core::*;
//!
//! #[derive(Default)]
//! struct CountingSink {
//!     triangles: usize,
//! }
//!
//! impl RenderSink for CountingSink {
//!     fn set_clip_rect(&mut self, _clip: Option<IRect>) {}
//!     fn bind_glyph_atlas(&mut self, _font: FontHandle) {}
//!     fn emit_triangles(&mut self, vertices: &[Vertex], _shader: ShaderKind) {
//!         self.triangles += vertices.len() / 3;
//!     }
//! }
//!
//! let mut list = DrawList::new();
//! let white = Color::WHITE.to_abgr();
//! list.push(None, ShaderKind::Color, &[
//!     Vertex::colored(0.0, 0.0, white),
//!     Vertex::colored(10.0, 0.0, white),
//!     Vertex::colored(0.0, 10.0, white),
//! ]);
//!
//! let mut sink = CountingSink::default();
//! list.replay(&mut sink);
//! assert_eq!(sink.triangles, 1);
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod input;
pub mod render_api;
pub mod tests;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use input::*;
pub use render_api::*;
