//! Drives a settings panel through a scripted pointer and keyboard sequence
//! without a window, and logs what every frame produced.
//!
//! ```text
//! RUST_LOG=info cargo run -p frame_replay -- [config.json]
//! ```

use anyhow::Context;
use critter_core::{
    AsciiKeyMap, FontHandle, IRect, MouseButtons, RawInput, RenderSink, ShaderKind, Vertex,
};
use critter_text::BakedFont;
use critter_ui::{Align, Border, GuiConfig, GuiContext, ImageOptions, TextBuffer};

#[derive(Default)]
struct CountingSink {
    triangles: usize,
    text_triangles: usize,
    clip_changes: usize,
    atlas_binds: usize,
}

impl RenderSink for CountingSink {
    fn set_clip_rect(&mut self, _clip: Option<IRect>) {
        self.clip_changes += 1;
    }
    fn bind_glyph_atlas(&mut self, _font: FontHandle) {
        self.atlas_binds += 1;
    }
    fn emit_triangles(&mut self, vertices: &[Vertex], shader: ShaderKind) {
        let n = vertices.len() / 3;
        self.triangles += n;
        if let ShaderKind::Text(_) = shader {
            self.text_triangles += n;
        }
    }
}

/// One scripted frame of platform input.
#[derive(Clone, Copy, Default)]
struct Step {
    x: i32,
    y: i32,
    left: bool,
    scroll: i32,
    typed: Option<char>,
}

impl Step {
    fn at(x: i32, y: i32) -> Self {
        Self { x, y, ..Self::default() }
    }
    fn down(self) -> Self {
        Self { left: true, ..self }
    }
    fn wheel(self, scroll: i32) -> Self {
        Self { scroll, ..self }
    }
    fn typing(self, ch: char) -> Self {
        Self { typed: Some(ch), ..self }
    }
}

#[derive(Default)]
struct Settings {
    tab: usize,
    exposure: f32,
    samples: i32,
    vsync: bool,
    name: TextBuffer,
    tint: [f32; 3],
    tint_open: bool,
    sidebar: bool,
    clicks: u32,
}

fn script() -> Vec<Step> {
    let mut steps = vec![Step::at(40, 70), Step::at(40, 70).down(), Step::at(40, 70)];
    // Drag the exposure marker to the right.
    steps.extend([Step::at(30, 118), Step::at(30, 118).down()]);
    steps.extend((0..6).map(|i| Step::at(30 + i * 25, 118).down()));
    steps.push(Step::at(180, 118));
    // Focus the name field and type.
    steps.extend([Step::at(200, 190), Step::at(200, 190).down(), Step::at(200, 190)]);
    steps.extend("crit".chars().map(|c| Step::at(200, 190).typing(c)));
    steps.push(Step::at(200, 190).typing('\r'));
    // Wheel through the list.
    steps.extend((0..4).map(|_| Step::at(100, 260).wheel(-2)));
    // Toggle the sidebar border.
    steps.extend([Step::at(5, 300), Step::at(5, 300).down(), Step::at(5, 300)]);
    steps
}

fn build(gui: &mut GuiContext, s: &mut Settings) -> anyhow::Result<()> {
    gui.begin_area("Settings", 10, 10, 320, 560, true, 6)?;

    s.tab = gui.tabs(s.tab, &["Render", "Output"], true);
    if gui.button("Apply", true) {
        s.clicks += 1;
        log::info!("apply clicked ({} so far)", s.clicks);
    }
    gui.separator_line(8);

    gui.slider("Exposure", &mut s.exposure, -4.0, 4.0, 0.1, true, Align::LeftIndented);
    gui.slider_i32("Samples", &mut s.samples, 1, 16, !s.vsync, Align::LeftIndented);
    gui.bool_toggle("V-Sync", &mut s.vsync, true);
    gui.input("Name", &mut s.name, true);

    gui.begin_scroll(120, "presets", true)?;
    gui.indent(8);
    for i in 0..12 {
        if gui.item(&format!("Preset {i}"), true) {
            log::info!("preset {i} picked");
        }
    }
    gui.unindent(8);
    gui.end_scroll(3)?;

    gui.color_wheel_collapsible("Tint", &mut s.tint, &mut s.tint_open, 0.6, true);
    gui.image(None, 64, 64, ImageOptions::default());
    gui.value(&format!("{} clicks", s.clicks));
    gui.end_area()?;

    if gui.border_button(Border::Left, s.sidebar, true) {
        s.sidebar = !s.sidebar;
    }
    Ok(())
}

fn load_font(gui: &mut GuiContext) -> anyhow::Result<()> {
    let handle = match critter_text::system_font().and_then(|ttf| gui.create_font(&ttf, 15.0)) {
        Ok(h) => h,
        Err(e) => {
            log::warn!("system font unavailable ({e}), using fixed-width metrics");
            gui.add_font(BakedFont::fixed_width(7.0, 13.0))?
        }
    };
    gui.set_font(handle)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<GuiConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => GuiConfig::default(),
    };

    let mut gui = GuiContext::new(config);
    load_font(&mut gui)?;

    let mut settings = Settings {
        exposure: 0.0,
        samples: 4,
        name: TextBuffer::new(24),
        tint: [1.0, 0.5, 0.0],
        tint_open: true,
        ..Settings::default()
    };

    for (frame, step) in script().into_iter().enumerate() {
        let mut raw = RawInput::new(1024, 768);
        raw.mouse_x = step.x;
        raw.mouse_y = step.y;
        raw.scroll = step.scroll;
        raw.typed = step.typed;
        if step.left {
            raw.buttons = MouseButtons::LEFT;
        }

        gui.begin_frame(&raw, &AsciiKeyMap)?;
        build(&mut gui, &mut settings)?;
        gui.end_frame()?;

        let mut sink = CountingSink::default();
        gui.render(&mut sink);
        log::info!(
            "frame {frame:>2}: {} triangles ({} text), {} clip changes, {} atlas binds",
            sink.triangles,
            sink.text_triangles,
            sink.clip_changes,
            sink.atlas_binds
        );
    }

    log::info!(
        "final: exposure {:.1}, samples {}, vsync {}, name {:?}, presets offset {}, sidebar {}",
        settings.exposure,
        settings.samples,
        settings.vsync,
        settings.name.as_str(),
        gui.scroll_offset("presets"),
        settings.sidebar
    );
    Ok(())
}
