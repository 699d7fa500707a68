//! Curve fits over ball positions.

use hoopclip_models::Point;

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// Line through two points. `None` for a vertical line.
    pub fn through(a: Point, b: Point) -> Option<Self> {
        let dx = b.x - a.x;
        if dx == 0.0 {
            return None;
        }
        let slope = (b.y - a.y) / dx;
        let intercept = a.y - slope * a.x;
        (slope.is_finite() && intercept.is_finite()).then_some(Self { slope, intercept })
    }

    /// X at which the line reaches `y`. `None` for a horizontal line.
    pub fn x_at(&self, y: f64) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        let x = (y - self.intercept) / self.slope;
        x.is_finite().then_some(x)
    }
}

/// Parabola `y = a*u^2 + b*u + c` with `u = x - x_offset`.
///
/// Fitting in shifted coordinates keeps the normal equations well
/// conditioned for pixel-sized x values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub x_offset: f64,
}

impl Parabola {
    /// Least-squares fit. Needs at least three points with distinct x.
    pub fn fit(points: &[Point]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let n = points.len() as f64;
        let x_offset = points.iter().map(|p| p.x).sum::<f64>() / n;

        // Power sums of u and moments of y
        let mut s = [0.0f64; 5];
        let mut t = [0.0f64; 3];
        for p in points {
            let u = p.x - x_offset;
            let mut pow = 1.0;
            for (k, sk) in s.iter_mut().enumerate() {
                *sk += pow;
                if k < 3 {
                    t[k] += pow * p.y;
                }
                pow *= u;
            }
        }

        // Normal equations, unknowns ordered (a, b, c)
        let m = [[s[4], s[3], s[2]], [s[3], s[2], s[1]], [s[2], s[1], s[0]]];
        let rhs = [t[2], t[1], t[0]];

        let det = det3(&m);
        let scale = s[4].abs().max(1.0) * s[2].abs().max(1.0) * n;
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON * scale {
            return None;
        }

        let solve = |col: usize| {
            let mut mc = m;
            for (row, value) in rhs.iter().enumerate() {
                mc[row][col] = *value;
            }
            det3(&mc) / det
        };

        let fit = Self {
            a: solve(0),
            b: solve(1),
            c: solve(2),
            x_offset,
        };
        (fit.a.is_finite() && fit.b.is_finite() && fit.c.is_finite()).then_some(fit)
    }

    pub fn y_at(&self, x: f64) -> f64 {
        let u = x - self.x_offset;
        self.a * u * u + self.b * u + self.c
    }
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_through_points() {
        let line = Line::through(Point::new(0.0, 1.0), Point::new(2.0, 5.0)).unwrap();
        assert_eq!(line.slope, 2.0);
        assert_eq!(line.intercept, 1.0);
        assert_eq!(line.x_at(9.0), Some(4.0));
    }

    #[test]
    fn test_vertical_and_horizontal_lines() {
        assert!(Line::through(Point::new(3.0, 1.0), Point::new(3.0, 5.0)).is_none());
        let flat = Line::through(Point::new(0.0, 4.0), Point::new(5.0, 4.0)).unwrap();
        assert_eq!(flat.x_at(10.0), None);
    }

    #[test]
    fn test_parabola_recovers_exact_curve() {
        let points: Vec<Point> = (0..8)
            .map(|i| {
                let x = 200.0 + 15.0 * i as f64;
                Point::new(x, 0.01 * (x - 320.0).powi(2) + 230.0)
            })
            .collect();

        let fit = Parabola::fit(&points).unwrap();
        assert!((fit.y_at(320.0) - 230.0).abs() < 1e-6);
        assert!((fit.y_at(260.0) - 266.0).abs() < 1e-6);
    }

    #[test]
    fn test_parabola_needs_distinct_x() {
        let stacked = vec![
            Point::new(100.0, 10.0),
            Point::new(100.0, 20.0),
            Point::new(100.0, 30.0),
        ];
        assert!(Parabola::fit(&stacked).is_none());
        assert!(Parabola::fit(&stacked[..2]).is_none());
    }
}
