//! Hue ring with an inscribed saturation/value triangle.
//!
//! The triangle is laid out in its own frame with the hue corner on the +x
//! axis, black at -120° and white at +120°, then rotated by the hue when
//! drawn. Pointer positions are rotated back into that frame before the
//! barycentric lookup.

use std::f32::consts::{PI, TAU};

use critter_core::{Color, ShaderKind, Vec2, hsv_to_rgb, rgb_to_hsv};

use crate::context::GuiContext;

/// Sign of the cross product of `p - b` and `a - b`.
fn sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// True for points inside or on the edge of `abc`, either winding.
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let b1 = sign(p, a, b) < 0.0;
    let b2 = sign(p, b, c) < 0.0;
    let b3 = sign(p, c, a) < 0.0;
    b1 == b2 && b2 == b3
}

/// Projection of `p` onto the segment `ab`, clamped to its ends.
pub fn closest_point_on_line(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let l = b - a;
    let len = l.length();
    if len <= 0.0 {
        return a;
    }
    let dir = l * (1.0 / len);
    let dot = (p - a).dot(dir);
    if dot < 0.0 {
        a
    } else if dot > len {
        b
    } else {
        a + dir * dot
    }
}

/// Nearest point on the outline of `abc`. Ties go to `ab`, then `bc`.
pub fn closest_point_on_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let candidates = [
        closest_point_on_line(p, a, b),
        closest_point_on_line(p, b, c),
        closest_point_on_line(p, c, a),
    ];
    let mut best = candidates[0];
    let mut best_len = (p - best).length();
    for q in &candidates[1..] {
        let len = (p - *q).length();
        if len < best_len {
            best = *q;
            best_len = len;
        }
    }
    best
}

/// Weights `(u, v, w)` of `a`, `b` and `c` for `p`.
pub fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> (f32, f32, f32) {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    (1.0 - v - w, v, w)
}

/// HSL with every component in 0..=1.
pub fn hsl_color(h: f32, s: f32, l: f32, a: u8) -> Color {
    let v = l + s * l.min(1.0 - l);
    let sv = if v > 0.0 { 2.0 * (1.0 - l / v) } else { 0.0 };
    Color::from_hsv(h, sv, v, a)
}

/// Hue, black and white corners for a triangle inscribed at `radius`.
fn triangle_corners(radius: f32) -> [Vec2; 3] {
    let hue = Vec2::new(radius, 0.0);
    let black = hue.rotated(-120.0_f32.to_radians());
    let white = hue.rotated(120.0_f32.to_radians());
    [hue, black, white]
}

/// Point in the triangle frame that encodes saturation and value.
fn sv_point(tri: [Vec2; 3], sat: f32, val: f32) -> Vec2 {
    let [aa, bb, cc] = tri;
    let ca = aa - cc;
    let ss = cc + ca * sat;
    ss + (bb - ss) * (1.0 - val)
}

/// Inverse of `sv_point`, clamped away from zero so hue survives the round trip.
fn sv_from_point(tri: [Vec2; 3], p: Vec2) -> (f32, f32) {
    let [aa, bb, cc] = tri;
    let (u, v, _) = barycentric(aa, bb, cc, p);
    let val = (1.0 - v).clamp(1e-4, 1.0);
    let sat = (u / val).clamp(1e-4, 1.0);
    (sat, val)
}

impl GuiContext {
    /// Edits `rgb` in place. `size` is the fraction of the row width used
    /// for the wheel's diameter. Returns true while the pointer drags either
    /// part.
    pub fn color_wheel(
        &mut self,
        rgb: &mut [f32; 3],
        respect_indent: bool,
        size: f32,
        enabled: bool,
    ) -> bool {
        if !self.require_frame("color_wheel") {
            return false;
        }
        let wheel_id = self.next_id();
        let triangle_id = self.next_id();

        let spacing = self.config.metrics.spacing;
        let a = self.area();
        let (area_x, area_w) = if respect_indent {
            (a.widget_x, a.widget_w)
        } else {
            (a.content.x, a.content.w)
        };
        let width = area_w as f32 * size;
        let center = Vec2::new(
            area_x as f32 + area_w as f32 * 0.5,
            a.widget_y as f32 + width * 0.5,
        );
        self.area_mut().widget_y += width as i32 + spacing;

        let ro = width * 0.5 - 5.0;
        let rd = size * 25.0;
        let ri = ro - rd;
        if ri <= 6.0 {
            log::warn!("color wheel {width}px wide is too small to draw");
            return false;
        }
        let aeps = 0.5 / ro;
        let cm = Vec2::new(self.input.mx as f32, self.input.my as f32) - center;
        let tri = triangle_corners(ri - 6.0);
        let [aa, bb, cc] = tri;

        let mut hsv = rgb_to_hsv(*rgb);
        let enabled = enabled && self.area_enabled();
        if enabled {
            if self.input.left_pressed {
                let len = cm.length();
                if len > ri {
                    if len < ro {
                        self.ui.set_active(wheel_id);
                    }
                } else {
                    self.ui.set_active(triangle_id);
                }
            }
            let owns_drag = self.ui.is_active(wheel_id) || self.ui.is_active(triangle_id);
            if self.input.left_released && owns_drag {
                self.ui.clear_active(&mut self.input);
            }
            if self.input.left && self.ui.is_active(wheel_id) {
                hsv[0] = cm.y.atan2(cm.x) / PI * 0.5;
                if hsv[0] < 0.0 {
                    hsv[0] += 1.0;
                }
            }
        }

        let dragging_triangle = enabled && self.input.left && self.ui.is_active(triangle_id);
        let sel = if dragging_triangle {
            let t = cm.rotated(-hsv[0] * TAU);
            if point_in_triangle(t, aa, bb, cc) {
                t
            } else {
                closest_point_on_triangle(t, aa, bb, cc)
            }
        } else {
            sv_point(tri, hsv[1], hsv[2])
        };
        let (sat, val) = sv_from_point(tri, sel);
        *rgb = hsv_to_rgb([hsv[0], sat, val]);

        let (saturation, alpha0, alpha1) = if enabled { (1.0, 255, 192) } else { (0.0, 10, 10) };
        let clip = self.clip();

        for i in 0..6 {
            let a0 = i as f32 / 6.0 * TAU - aeps;
            let a1 = (i + 1) as f32 / 6.0 * TAU + aeps;
            let c0 = hsl_color(a0 / TAU, saturation, 0.55, alpha0).to_abgr();
            let c1 = hsl_color(a1 / TAU, saturation, 0.55, alpha0).to_abgr();
            self.draw
                .push(clip, ShaderKind::Color, self.tess.ring(center, ri, ro, a0, a1, c0, c1, 8));
        }

        let outline = Color(0, 0, 0, 64).to_abgr();
        self.draw
            .push(clip, ShaderKind::Color, self.tess.stroke_circle(center, ri - 0.5, 1.0, outline));
        self.draw
            .push(clip, ShaderKind::Color, self.tess.stroke_circle(center, ro + 0.5, 1.0, outline));

        // Everything below lives in the triangle frame, turned by the hue.
        let turn = hsv[0] * TAU;
        let to_screen = |p: Vec2| center + p.rotated(turn);

        let marker = Color::WHITE.with_alpha(alpha1);
        let (hx, hy, hw, hh) = (ri - 1.0, -3.0, rd + 2.0, 6.0);
        let handle = [
            to_screen(Vec2::new(hx, hy)),
            to_screen(Vec2::new(hx + hw, hy)),
            to_screen(Vec2::new(hx + hw, hy + hh)),
            to_screen(Vec2::new(hx, hy + hh)),
        ];
        for k in 0..4 {
            let (p, q) = (handle[k], handle[(k + 1) % 4]);
            self.draw_line(p.x, p.y, q.x, q.y, 2.0, marker);
        }

        let corners = [to_screen(aa), to_screen(bb), to_screen(cc)];
        let edge = Color(0, 0, 0, 64);
        for k in 0..3 {
            let (p, q) = (corners[k], corners[(k + 1) % 3]);
            self.draw_line(p.x, p.y, q.x, q.y, 2.0, edge);
        }

        let hue = hsl_color(hsv[0], saturation, 0.5, 255).to_abgr();
        let black = Color(0, 0, 0, alpha0).to_abgr();
        let white = Color(255, 255, 255, alpha0).to_abgr();
        self.draw.push(
            clip,
            ShaderKind::Color,
            self.tess
                .gradient_triangle([(corners[0], hue), (corners[1], black), (corners[2], white)]),
        );

        self.draw.push(
            clip,
            ShaderKind::Color,
            self.tess.stroke_circle(to_screen(sel), 5.0, 2.0, marker.to_abgr()),
        );

        dragging_triangle || (enabled && self.input.left && self.ui.is_active(wheel_id))
    }

    /// Collapse row showing the color as text; the wheel is shown below it
    /// while `activated` is set.
    pub fn color_wheel_collapsible(
        &mut self,
        text: &str,
        rgb: &mut [f32; 3],
        activated: &mut bool,
        size: f32,
        enabled: bool,
    ) -> bool {
        let sub = format!("[RGB {:.2} {:.2} {:.2}]", rgb[0], rgb[1], rgb[2]);
        if self.collapse(text, Some(&sub), *activated, true) {
            *activated = !*activated;
        }
        if *activated {
            self.color_wheel(rgb, false, size, enabled)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_point_in_triangle_either_winding() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, c, b));
        assert!(!point_in_triangle(Vec2::new(8.0, 8.0), a, b, c));
    }

    #[test]
    fn test_closest_point_clamps_to_segment() {
        let (a, b) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert_eq!(closest_point_on_line(Vec2::new(-5.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_line(Vec2::new(15.0, 3.0), a, b), b);
        assert_eq!(closest_point_on_line(Vec2::new(4.0, 3.0), a, b), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_closest_point_on_triangle_picks_nearest_edge() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        let p = closest_point_on_triangle(Vec2::new(-3.0, 5.0), a, b, c);
        assert_eq!(p, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_barycentric_corners() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        let (u, v, w) = barycentric(a, b, c, b);
        assert!(approx(u, 0.0) && approx(v, 1.0) && approx(w, 0.0));
        let (u, v, w) = barycentric(a, b, c, Vec2::new(2.0, 3.0));
        assert!(approx(u + v + w, 1.0));
    }

    #[test]
    fn test_primaries_survive_triangle_projection() {
        let tri = triangle_corners(40.0);
        for rgb in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            let hsv = rgb_to_hsv(rgb);
            let (sat, val) = sv_from_point(tri, sv_point(tri, hsv[1], hsv[2]));
            let out = hsv_to_rgb([hsv[0], sat, val]);
            for k in 0..3 {
                assert!(approx(out[k], rgb[k]), "{rgb:?} came back as {out:?}");
            }
        }
    }

    #[test]
    fn test_sv_point_interior_round_trip() {
        let tri = triangle_corners(40.0);
        let (sat, val) = sv_from_point(tri, sv_point(tri, 0.5, 0.75));
        assert!(approx(sat, 0.5));
        assert!(approx(val, 0.75));
    }

    #[test]
    fn test_hsl_midtones() {
        assert_eq!(hsl_color(0.0, 1.0, 0.5, 255), Color(255, 0, 0, 255));
        assert_eq!(hsl_color(0.0, 0.0, 0.5, 255), Color(128, 128, 128, 255));
    }
}
