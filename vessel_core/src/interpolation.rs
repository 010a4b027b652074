//! Table lookup helpers shared by the stress table and the external-pressure
//! charts. Both tables are sequences of points with strictly ascending x.

/// Where a query value falls relative to an ascending abscissa sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// Exactly on tabulated point `i`
    Exact(usize),
    /// Strictly between points `i` and `i + 1`
    Between(usize),
    /// Below the first point
    BelowRange,
    /// Above the last point
    AboveRange,
    /// `x` is NaN, or the abscissa sequence is empty
    Undefined,
}

/// Locate `x` in `xs` (strictly ascending, non-empty).
pub fn bracket(xs: &[f64], x: f64) -> Bracket {
    let (Some(&first), Some(&last)) = (xs.first(), xs.last()) else {
        return Bracket::Undefined;
    };
    if x.is_nan() {
        return Bracket::Undefined;
    }
    if x < first {
        return Bracket::BelowRange;
    }
    if x > last {
        return Bracket::AboveRange;
    }
    // partition_point returns the first index with xs[i] >= x
    let i = xs.partition_point(|&v| v < x);
    if xs[i] == x {
        Bracket::Exact(i)
    } else {
        Bracket::Between(i.saturating_sub(1))
    }
}

/// Straight-line interpolation between (x0, y0) and (x1, y1).
#[inline]
pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Interpolate over paired points, clamping to the endpoints outside the range.
///
/// A NaN query propagates as NaN.
pub fn interpolate_clamped(points: &[(f64, f64)], x: f64) -> f64 {
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    match bracket(&xs, x) {
        Bracket::Exact(i) => points[i].1,
        Bracket::Between(i) => {
            let (x0, y0) = points[i];
            let (x1, y1) = points[i + 1];
            linear(x0, y0, x1, y1, x)
        }
        Bracket::BelowRange => points[0].1,
        Bracket::AboveRange => points[points.len() - 1].1,
        Bracket::Undefined => f64::NAN,
    }
}

/// True when every abscissa is finite and strictly greater than the previous one.
pub fn is_strictly_ascending(xs: &[f64]) -> bool {
    xs.iter().all(|x| x.is_finite()) && xs.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket() {
        let xs = [100.0, 200.0, 300.0];
        assert_eq!(bracket(&xs, 100.0), Bracket::Exact(0));
        assert_eq!(bracket(&xs, 300.0), Bracket::Exact(2));
        assert_eq!(bracket(&xs, 150.0), Bracket::Between(0));
        assert_eq!(bracket(&xs, 250.0), Bracket::Between(1));
        assert_eq!(bracket(&xs, 50.0), Bracket::BelowRange);
        assert_eq!(bracket(&xs, 301.0), Bracket::AboveRange);
    }

    #[test]
    fn test_single_point_table() {
        assert_eq!(bracket(&[5.0], 5.0), Bracket::Exact(0));
        assert_eq!(interpolate_clamped(&[(5.0, 1.0)], 9.0), 1.0);
    }

    #[test]
    fn test_nan_is_undefined() {
        assert_eq!(bracket(&[100.0, 200.0], f64::NAN), Bracket::Undefined);
        assert_eq!(bracket(&[5.0], f64::NAN), Bracket::Undefined);
        assert_eq!(bracket(&[], 1.0), Bracket::Undefined);
        assert_eq!(bracket(&[100.0, 200.0], f64::INFINITY), Bracket::AboveRange);
        assert!(interpolate_clamped(&[(1.0, 10.0), (2.0, 20.0)], f64::NAN).is_nan());
    }

    #[test]
    fn test_linear_midpoint() {
        assert!((linear(0.0, 10.0, 10.0, 20.0, 5.0) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamped() {
        let pts = [(1.0, 10.0), (2.0, 20.0)];
        assert_eq!(interpolate_clamped(&pts, 0.0), 10.0);
        assert_eq!(interpolate_clamped(&pts, 3.0), 20.0);
        assert!((interpolate_clamped(&pts, 1.25) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_ascending_check() {
        assert!(is_strictly_ascending(&[1.0, 2.0, 3.0]));
        assert!(!is_strictly_ascending(&[1.0, 1.0, 3.0]));
        assert!(!is_strictly_ascending(&[1.0, f64::NAN]));
    }
}
