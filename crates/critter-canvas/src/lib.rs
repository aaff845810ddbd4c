//! Shape tessellation for the GUI's color shader.
//!
//! Every filled shape is a convex outline turned into triangles: a fan from
//! the first point for the interior, plus a one-ring fringe pushed outward
//! along mitered normals whose outer edge fades to transparent. That fringe is
//! the only antialiasing there is, so outlines should land on half pixels
//! (`rect` insets by 0.5 for that reason).

use std::f32::consts::{PI, TAU};

use critter_core::{GuiError, Vec2, Vertex};

/// Largest outline `polygon` accepts.
pub const MAX_POLYGON_POINTS: usize = 100;
/// Points on the unit circle table used for rounded corners.
pub const CIRCLE_SEGMENTS: usize = 32;

const MAX_MITER: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriangleOrientation {
    Left,
    Right,
    Up,
    Down,
}

/// Linear blend of two packed `0xAABBGGRR` colors.
pub fn lerp_abgr(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        let ca = (a >> shift & 0xff) as f32;
        let cb = (b >> shift & 0xff) as f32;
        let c = (ca + (cb - ca) * t + 0.5) as u32;
        out |= c.min(255) << shift;
    }
    out
}

/// Reusable scratch buffers plus the precomputed circle table.
///
/// Each call overwrites the previous output; copy the returned slice out (for
/// example into a `DrawList`) before tessellating the next shape.
#[derive(Clone, Debug)]
pub struct Tessellator {
    circle: [Vec2; CIRCLE_SEGMENTS],
    points: Vec<Vec2>,
    normals: Vec<Vec2>,
    offsets: Vec<Vec2>,
    out: Vec<Vertex>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        let mut circle = [Vec2::ZERO; CIRCLE_SEGMENTS];
        for (i, p) in circle.iter_mut().enumerate() {
            *p = Vec2::from_angle(i as f32 / CIRCLE_SEGMENTS as f32 * TAU);
        }
        Self {
            circle,
            points: Vec::with_capacity(MAX_POLYGON_POINTS),
            normals: Vec::with_capacity(MAX_POLYGON_POINTS),
            offsets: Vec::with_capacity(MAX_POLYGON_POINTS),
            out: Vec::new(),
        }
    }

    /// Fills a convex outline with an antialiased fringe `fringe` pixels wide.
    pub fn polygon(
        &mut self,
        points: &[Vec2],
        fringe: f32,
        color: u32,
    ) -> Result<&[Vertex], GuiError> {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.fill(fringe, color)
    }

    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: u32,
        fringe: f32,
    ) -> Result<&[Vertex], GuiError> {
        self.points.clear();
        self.points.extend_from_slice(&[
            Vec2::new(x + 0.5, y + 0.5),
            Vec2::new(x + w - 0.5, y + 0.5),
            Vec2::new(x + w - 0.5, y + h - 0.5),
            Vec2::new(x + 0.5, y + h - 0.5),
        ]);
        self.fill(fringe, color)
    }

    /// Four quarter arcs of `CIRCLE_SEGMENTS / 4` segments each. Radius 0 is a
    /// plain `rect`.
    pub fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        r: f32,
        color: u32,
        fringe: f32,
    ) -> Result<&[Vertex], GuiError> {
        if r == 0.0 {
            return self.rect(x, y, w, h, color, fringe);
        }
        let quarter = CIRCLE_SEGMENTS / 4;
        let corners = [
            (0, Vec2::new(x + w - r, y + h - r)),
            (quarter, Vec2::new(x + r, y + h - r)),
            (quarter * 2, Vec2::new(x + r, y + r)),
            (quarter * 3, Vec2::new(x + w - r, y + r)),
        ];

        self.points.clear();
        for (start, center) in corners {
            for i in start..=start + quarter {
                let c = self.circle[i % CIRCLE_SEGMENTS];
                self.points.push(center + c * r);
            }
        }
        self.fill(fringe, color)
    }

    /// Thick segment with squared ends; `r` is the full width including the fringe.
    pub fn line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        r: f32,
        color: u32,
        fringe: f32,
    ) -> Result<&[Vertex], GuiError> {
        let mut d = Vec2::new(x1 - x0, y1 - y0);
        let len = d.length();
        if len > 0.0001 {
            d = d * (1.0 / len);
        }
        let half = ((r - fringe) * 0.5).max(0.01);
        let d = d * half;
        let n = Vec2::new(d.y, -d.x);

        let a = Vec2::new(x0, y0);
        let b = Vec2::new(x1, y1);
        self.points.clear();
        self.points.extend_from_slice(&[a - d - n, a - d + n, b + d + n, b + d - n]);
        self.fill(fringe, color)
    }

    /// Arrow-head triangle filling the `w` x `h` box, pointing `orientation`.
    pub fn triangle(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        orientation: TriangleOrientation,
        color: u32,
    ) -> Result<&[Vertex], GuiError> {
        let (x, y) = (x + 0.5, y + 0.5);
        let pts = match orientation {
            TriangleOrientation::Left => [
                Vec2::new(x + w, y),
                Vec2::new(x, y + h / 2.0 - 0.5),
                Vec2::new(x + w, y + h - 1.0),
            ],
            TriangleOrientation::Right => [
                Vec2::new(x, y),
                Vec2::new(x + w, y + h / 2.0 - 0.5),
                Vec2::new(x, y + h - 1.0),
            ],
            TriangleOrientation::Up => [
                Vec2::new(x, y + h - 1.0),
                Vec2::new(x + w / 2.0 - 0.5, y),
                Vec2::new(x + w - 1.0, y + h - 1.0),
            ],
            TriangleOrientation::Down => [
                Vec2::new(x, y),
                Vec2::new(x + w / 2.0 - 0.5, y + h - 1.0),
                Vec2::new(x + w - 1.0, y),
            ],
        };
        self.points.clear();
        self.points.extend_from_slice(&pts);
        self.fill(1.0, color)
    }

    /// One triangle with a color per corner, no fringe.
    pub fn gradient_triangle(&mut self, corners: [(Vec2, u32); 3]) -> &[Vertex] {
        self.out.clear();
        for (p, c) in corners {
            self.out.push(Vertex::colored(p.x, p.y, c));
        }
        &self.out
    }

    /// Annulus slice between angles `a0..a1` (radians), colors blended along the arc.
    #[allow(clippy::too_many_arguments)]
    pub fn ring(
        &mut self,
        center: Vec2,
        r_inner: f32,
        r_outer: f32,
        a0: f32,
        a1: f32,
        c0: u32,
        c1: u32,
        segments: usize,
    ) -> &[Vertex] {
        self.out.clear();
        let segments = segments.max(1);
        for i in 0..segments {
            let t0 = i as f32 / segments as f32;
            let t1 = (i + 1) as f32 / segments as f32;
            let d0 = Vec2::from_angle(a0 + (a1 - a0) * t0);
            let d1 = Vec2::from_angle(a0 + (a1 - a0) * t1);
            let (k0, k1) = (lerp_abgr(c0, c1, t0), lerp_abgr(c0, c1, t1));

            let i0 = center + d0 * r_inner;
            let o0 = center + d0 * r_outer;
            let i1 = center + d1 * r_inner;
            let o1 = center + d1 * r_outer;
            self.out.extend_from_slice(&[
                Vertex::colored(i0.x, i0.y, k0),
                Vertex::colored(o0.x, o0.y, k0),
                Vertex::colored(o1.x, o1.y, k1),
                Vertex::colored(o1.x, o1.y, k1),
                Vertex::colored(i1.x, i1.y, k1),
                Vertex::colored(i0.x, i0.y, k0),
            ]);
        }
        &self.out
    }

    /// Circle outline `width` pixels thick centered on `radius`.
    pub fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: u32,
    ) -> &[Vertex] {
        let half = width * 0.5;
        self.ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            0.0,
            2.0 * PI,
            color,
            color,
            CIRCLE_SEGMENTS,
        )
    }

    fn fill(&mut self, fringe: f32, color: u32) -> Result<&[Vertex], GuiError> {
        fill_convex(
            &self.points,
            fringe,
            color,
            &mut self.normals,
            &mut self.offsets,
            &mut self.out,
        )?;
        Ok(&self.out)
    }
}

fn fill_convex(
    points: &[Vec2],
    fringe: f32,
    color: u32,
    normals: &mut Vec<Vec2>,
    offsets: &mut Vec<Vec2>,
    out: &mut Vec<Vertex>,
) -> Result<(), GuiError> {
    out.clear();
    let n = points.len();
    if n > MAX_POLYGON_POINTS {
        log::warn!("polygon with {n} points exceeds {MAX_POLYGON_POINTS}");
        return Err(GuiError::CapacityExceeded {
            what: "polygon",
            limit: MAX_POLYGON_POINTS,
            requested: n,
        });
    }
    if n < 3 {
        return Ok(());
    }

    // Outward means left of each edge for clockwise-on-screen outlines;
    // flip for the other winding.
    let area2: f32 = (0..n)
        .map(|i| {
            let (a, b) = (points[(i + n - 1) % n], points[i]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    let sign = if area2 < 0.0 { -1.0 } else { 1.0 };

    normals.clear();
    for i in 0..n {
        let d = (points[(i + 1) % n] - points[i]).normalized();
        normals.push(Vec2::new(d.y, -d.x) * sign);
    }

    offsets.clear();
    for i in 0..n {
        let prev = normals[(i + n - 1) % n];
        let mut dm = (prev + normals[i]) * 0.5;
        let dmr2 = dm.dot(dm);
        if dmr2 > 0.000001 {
            dm = dm * (1.0 / dmr2).min(MAX_MITER);
        }
        offsets.push(points[i] + dm * fringe);
    }

    let clear = color & 0x00ff_ffff;
    out.reserve(n * 6 + (n - 2) * 3);
    for i in 0..n {
        let j = (i + n - 1) % n;
        out.extend_from_slice(&[
            Vertex::colored(points[i].x, points[i].y, color),
            Vertex::colored(points[j].x, points[j].y, color),
            Vertex::colored(offsets[j].x, offsets[j].y, clear),
            Vertex::colored(offsets[j].x, offsets[j].y, clear),
            Vertex::colored(offsets[i].x, offsets[i].y, clear),
            Vertex::colored(points[i].x, points[i].y, color),
        ]);
    }
    for i in 2..n {
        out.extend_from_slice(&[
            Vertex::colored(points[0].x, points[0].y, color),
            Vertex::colored(points[i - 1].x, points[i - 1].y, color),
            Vertex::colored(points[i].x, points[i].y, color),
        ]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0xffff_ffff;

    fn bounds(v: &[Vertex]) -> (f32, f32, f32, f32) {
        v.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(x0, y0, x1, y1), v| {
                let [x, y] = v.pos;
                (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
            },
        )
    }

    #[test]
    fn test_rect_vertex_count_and_fringe() {
        let mut t = Tessellator::new();
        let v = t.rect(10.0, 10.0, 20.0, 10.0, WHITE, 1.0).unwrap();
        // 6 per edge for the fringe, 3 per fan triangle.
        assert_eq!(v.len(), 4 * 6 + 2 * 3);

        let (x0, y0, x1, y1) = bounds(v);
        // Inset by half a pixel, then the fringe pushes corners out along the
        // diagonal miter by a full pixel on each axis.
        assert!((x0 - 9.5).abs() < 1e-4, "{x0}");
        assert!((y0 - 9.5).abs() < 1e-4, "{y0}");
        assert!((x1 - 30.5).abs() < 1e-4, "{x1}");
        assert!((y1 - 20.5).abs() < 1e-4, "{y1}");

        let faded = v.iter().filter(|v| v.color == 0x00ff_ffff).count();
        assert_eq!(faded, 4 * 3);
    }

    #[test]
    fn test_fringe_goes_outward_for_either_winding() {
        let mut t = Tessellator::new();
        let cw = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let ccw = [cw[3], cw[2], cw[1], cw[0]];
        let a = bounds(t.polygon(&cw, 1.0, WHITE).unwrap());
        let b = bounds(t.polygon(&ccw, 1.0, WHITE).unwrap());
        assert_eq!(a, (-1.0, -1.0, 11.0, 11.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_polygon_capacity_is_explicit() {
        let mut t = Tessellator::new();
        let pts: Vec<Vec2> = (0..MAX_POLYGON_POINTS + 1)
            .map(|i| Vec2::from_angle(i as f32 / 101.0 * TAU) * 50.0)
            .collect();
        assert_eq!(
            t.polygon(&pts, 1.0, WHITE).err(),
            Some(GuiError::CapacityExceeded {
                what: "polygon",
                limit: MAX_POLYGON_POINTS,
                requested: MAX_POLYGON_POINTS + 1,
            })
        );
        assert!(t.polygon(&pts[..MAX_POLYGON_POINTS], 1.0, WHITE).is_ok());
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let mut t = Tessellator::new();
        assert!(t.polygon(&[Vec2::ZERO, Vec2::new(1.0, 1.0)], 1.0, WHITE).unwrap().is_empty());
    }

    #[test]
    fn test_rounded_rect_uses_36_outline_points() {
        let mut t = Tessellator::new();
        let v = t.rounded_rect(0.0, 0.0, 100.0, 20.0, 4.0, WHITE, 1.0).unwrap();
        assert_eq!(v.len(), 36 * 6 + 34 * 3);

        let zero = t.rounded_rect(0.0, 0.0, 100.0, 20.0, 0.0, WHITE, 1.0).unwrap().len();
        assert_eq!(zero, 4 * 6 + 2 * 3);
    }

    #[test]
    fn test_line_has_minimum_width() {
        let mut t = Tessellator::new();
        let v = t.line(0.0, 0.0, 10.0, 0.0, 1.0, WHITE, 1.0).unwrap();
        let (_, y0, _, y1) = bounds(&v[..24]);
        assert!(y1 - y0 > 0.0);
    }

    #[test]
    fn test_lerp_abgr_endpoints() {
        assert_eq!(lerp_abgr(0x0000_0000, 0xffff_ffff, 0.0), 0);
        assert_eq!(lerp_abgr(0x0000_0000, 0xffff_ffff, 1.0), 0xffff_ffff);
        assert_eq!(lerp_abgr(0x0000_00ff, 0x0000_0000, 0.5), 0x0000_0080);
    }

    #[test]
    fn test_ring_segment_count() {
        let mut t = Tessellator::new();
        assert_eq!(t.ring(Vec2::ZERO, 10.0, 20.0, 0.0, PI, WHITE, WHITE, 8).len(), 48);
        assert_eq!(t.stroke_circle(Vec2::ZERO, 5.0, 2.0, WHITE).len(), CIRCLE_SEGMENTS * 6);
    }
}
