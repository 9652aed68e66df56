use egui::{Pos2, Vec2, pos2};

/// Segments used to flatten one cubic Bézier
const CUBIC_STEPS: usize = 16;

/// A polyline outline built from lines and cubic Béziers, flattened eagerly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Pos2>,
    closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the outline at `p`, discarding anything added before
    pub fn move_to(&mut self, p: Pos2) -> &mut Self {
        self.points.clear();
        self.points.push(p);
        self.closed = false;
        self
    }

    pub fn line_to(&mut self, p: Pos2) -> &mut Self {
        self.points.push(p);
        self
    }

    /// Appends a cubic Bézier from the current point through `c1`, `c2` to `end`.
    pub fn cubic_to(&mut self, c1: Pos2, c2: Pos2, end: Pos2) -> &mut Self {
        let Some(&start) = self.points.last() else {
            self.points.push(end);
            return self;
        };
        for step in 1..=CUBIC_STEPS {
            let t = step as f32 / CUBIC_STEPS as f32;
            self.points.push(cubic_point(start, c1, c2, end, t));
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    /// Axis-aligned rectangle from `origin` spanning `size`; negative extents are allowed.
    pub fn rect(origin: Pos2, size: Vec2) -> Self {
        let mut path = Self::new();
        path.move_to(origin)
            .line_to(pos2(origin.x + size.x, origin.y))
            .line_to(origin + size)
            .line_to(pos2(origin.x, origin.y + size.y))
            .close();
        path
    }

    pub fn circle(center: Pos2, radius: f32) -> Self {
        let mut path = Self::new();
        // Roughly one vertex per two pixels of circumference
        let steps = ((radius * std::f32::consts::PI).ceil() as usize).clamp(16, 720);
        for step in 0..steps {
            let angle = step as f32 / steps as f32 * std::f32::consts::TAU;
            let p = center + Vec2::angled(angle) * radius;
            if step == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close();
        path
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn cubic_point(p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    pos2(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_cubic_ends_on_endpoint() {
        let mut path = Path::new();
        path.move_to(pos2(0.0, 0.0))
            .cubic_to(pos2(0.0, 10.0), pos2(10.0, 10.0), pos2(10.0, 0.0));
        assert_eq!(path.points().len(), CUBIC_STEPS + 1);
        assert_eq!(path.points().last(), Some(&pos2(10.0, 0.0)));
    }

    #[test]
    fn test_rect_with_negative_extent() {
        let path = Path::rect(pos2(40.0, 30.0), vec2(-30.0, -20.0));
        assert!(path.is_closed());
        assert_eq!(
            path.points(),
            &[pos2(40.0, 30.0), pos2(10.0, 30.0), pos2(10.0, 10.0), pos2(40.0, 10.0)]
        );
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let path = Path::circle(pos2(50.0, 50.0), 30.0);
        for p in path.points() {
            assert!((p.distance(pos2(50.0, 50.0)) - 30.0).abs() < 1e-3);
        }
    }
}
