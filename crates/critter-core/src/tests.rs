#[cfg(test)]
mod tests {
    use crate::*;

    #[derive(Default)]
    struct RecordingSink {
        clips: Vec<Option<IRect>>,
        atlases: Vec<FontHandle>,
        batches: Vec<(usize, ShaderKind)>,
    }

    impl RenderSink for RecordingSink {
        fn set_clip_rect(&mut self, clip: Option<IRect>) {
            self.clips.push(clip);
        }
        fn bind_glyph_atlas(&mut self, font: FontHandle) {
            self.atlases.push(font);
        }
        fn emit_triangles(&mut self, vertices: &[Vertex], shader: ShaderKind) {
            self.batches.push((vertices.len(), shader));
        }
    }

    fn tri(color: u32) -> [Vertex; 3] {
        [
            Vertex::colored(0.0, 0.0, color),
            Vertex::colored(1.0, 0.0, color),
            Vertex::colored(0.0, 1.0, color),
        ]
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_color_abgr_packing() {
        let c = Color(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_abgr(), 0x4433_2211);
        assert_eq!(Color::from_abgr(c.to_abgr()), c);
    }

    #[test]
    fn test_hsv_primaries() {
        let red = rgb_to_hsv([1.0, 0.0, 0.0]);
        assert_eq!(red, [0.0, 1.0, 1.0]);

        let green = rgb_to_hsv([0.0, 1.0, 0.0]);
        assert!((green[0] - 1.0 / 3.0).abs() < 1e-6);

        let blue = rgb_to_hsv([0.0, 0.0, 1.0]);
        assert!((blue[0] - 2.0 / 3.0).abs() < 1e-6);

        for rgb in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.2, 0.4, 0.6]] {
            let back = hsv_to_rgb(rgb_to_hsv(rgb));
            for i in 0..3 {
                assert!((back[i] - rgb[i]).abs() < 1e-5, "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_irect_contains_is_inclusive() {
        let r = IRect::new(10, 10, 100, 20);
        assert!(r.contains(10, 10));
        assert!(r.contains(110, 30));
        assert!(!r.contains(111, 30));
        assert!(!r.contains(50, 9));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_draw_list_merges_matching_batches() {
        let clip = Some(IRect::new(0, 0, 10, 10));
        let mut list = DrawList::new();
        list.push(clip, ShaderKind::Color, &tri(1));
        list.push(clip, ShaderKind::Color, &tri(2));
        list.push(None, ShaderKind::Color, &tri(3));
        list.push(None, ShaderKind::Text(FontHandle(0)), &tri(4));
        list.push(None, ShaderKind::Text(FontHandle(0)), &[]);

        assert_eq!(list.commands().len(), 3);
        assert_eq!(list.commands()[0].vertices, 0..6);
        assert_eq!(list.vertices().len(), 12);
    }

    #[test]
    fn test_replay_sets_clip_and_atlas_only_on_change() {
        let clip = Some(IRect::new(0, 0, 10, 10));
        let mut list = DrawList::new();
        list.push(clip, ShaderKind::Text(FontHandle(1)), &tri(1));
        list.push(clip, ShaderKind::Color, &tri(1));
        list.push(clip, ShaderKind::Text(FontHandle(1)), &tri(1));
        list.push(None, ShaderKind::Color, &tri(1));

        let mut sink = RecordingSink::default();
        list.replay(&mut sink);
        assert_eq!(sink.clips, vec![clip, None]);
        assert_eq!(sink.atlases, vec![FontHandle(1)]);
        assert_eq!(sink.batches.len(), 4);
        assert!(sink.batches.iter().all(|(n, _)| *n == 3));
    }

    #[test]
    fn test_missing_texture_has_cross() {
        let px = missing_texture(64, 64, 0.04);
        assert_eq!(px.len(), 64 * 64 * 4);
        let at = |x: usize, y: usize| &px[(y * 64 + x) * 4..(y * 64 + x) * 4 + 4];
        // Diagonal is red, the middle of an edge is white.
        assert_eq!(at(0, 0), &[255, 0, 0, 255]);
        assert_eq!(at(32, 32), &[255, 0, 0, 255]);
        assert_eq!(at(32, 0), &[255, 255, 255, 255]);
    }

    #[test]
    fn test_channel_swizzle() {
        assert_eq!(Channel::Green.swizzle(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(Channel::Alpha.swizzle(), [0.0, 0.0, 0.0, 1.0]);
    }
}
