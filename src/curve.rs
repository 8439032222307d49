/// Vertical nudge applied to flat curves so a gradient along them has a direction.
pub const CURVE_EPSILON: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cubic Bezier link shape between a source end and a target end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicCurve {
    /// `tightness` in `[-1, 0]`; `0` gives the symmetric S-curve, lower values
    /// pull both control points outward toward the endpoints.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, tightness: f64) -> Self {
        let mid_x = (x1 + x2) / 2.0;
        let mid_x1 = mid_x + tightness * mid_x;
        let mid_x2 = mid_x - tightness * mid_x;

        let control1_y = if y1 == y2 { y1 + CURVE_EPSILON } else { y1 };

        Self {
            start: Point::new(x1, y1),
            control1: Point::new(mid_x1, control1_y),
            control2: Point::new(mid_x2, y2),
            end: Point::new(x2, y2),
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// `segments + 1` points from start to end.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|step| self.point_at(step as f64 / segments as f64))
            .collect()
    }

    pub fn svg_path(&self) -> String {
        format!(
            "M{},{} C{},{} {},{} {},{}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Approximate distance from `point` to the curve, over `segments` chords.
    pub fn distance_to(&self, point: Point, segments: usize) -> f64 {
        self.sample(segments)
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min)
    }
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq <= f64::EPSILON {
        0.0
    } else {
        (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let px = a.x + t * dx - point.x;
    let py = a.y + t * dy - point.y;
    (px * px + py * py).sqrt()
}
