//! Integer Bresenham walk.

/// Endpoint-inclusive pixel walk from `(x0, y0)` to `(x1, y1)`.
///
/// Each step moves at most one pixel in x and one in y; both move on
/// diagonal steps.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    error: i32,
    done: bool,
}

impl BresenhamLine {
    /// Starts a walk. `dy` is kept negative so one error term covers all octants.
    #[must_use]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            error: dx + dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }

        let doubled = 2 * self.error;
        if doubled >= self.dy {
            self.error += self.dy;
            self.x += self.sx;
        }
        if doubled <= self.dx {
            self.error += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}
