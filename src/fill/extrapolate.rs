//! One-sided polynomial extrapolation into outflow ghost cells.

/// Deepest ghost layer the extrapolation formulas cover.
pub const MAX_GHOST_WIDTH: usize = 6;

/// Highest number of points used by a single extrapolation.
const MAX_POINTS: usize = 6;

/// Binomial coefficients `C(n, k)` for `n <= MAX_POINTS`.
const BINOMIAL: [[f64; MAX_POINTS + 1]; MAX_POINTS + 1] = [
    [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 3.0, 3.0, 1.0, 0.0, 0.0, 0.0],
    [1.0, 4.0, 6.0, 4.0, 1.0, 0.0, 0.0],
    [1.0, 5.0, 10.0, 10.0, 5.0, 1.0, 0.0],
    [1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0],
];

/// Values of one primitive variable along an outflow line, indexed by
/// distance from the cell behind the boundary cell: slot 0 is the interior
/// neighbour of the boundary cell, slot 1 the boundary cell and slot `k + 1`
/// the `k`-th ghost cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostLine {
    values: [f64; MAX_GHOST_WIDTH + 2],
}

impl GhostLine {
    /// Starts a line from the two interior values and the boundary derivative.
    ///
    /// `derivative` is taken along the outward normal, `spacing` is the grid
    /// spacing. The first ghost cell is set so that the centred difference
    /// across the boundary cell reproduces the derivative.
    pub fn new(behind: f64, boundary: f64, derivative: f64, spacing: f64) -> Self {
        let mut values = [0.0; MAX_GHOST_WIDTH + 2];
        values[0] = behind;
        values[1] = boundary;
        values[2] = behind + 2.0 * spacing * derivative;
        Self { values }
    }

    /// Fills ghost cells `2..=width` from nearer values. Each cell uses an
    /// extrapolation one order higher than the previous one, capped at
    /// `MAX_POINTS` points, so the sweep must run outward.
    pub fn sweep(&mut self, width: usize) {
        debug_assert!(width <= MAX_GHOST_WIDTH);

        for ghost in 2..=width {
            self.values[ghost + 1] = self.extrapolate(ghost);
        }
    }

    /// Extrapolates ghost cell `ghost` from the `min(ghost + 1, MAX_POINTS)`
    /// nearer values.
    fn extrapolate(&self, ghost: usize) -> f64 {
        let points = (ghost + 1).min(MAX_POINTS);
        let slot = ghost + 1;

        let mut value = 0.0;
        for j in 1..=points {
            let sign = if j % 2 == 1 { 1.0 } else { -1.0 };
            value += sign * BINOMIAL[points][j] * self.values[slot - j];
        }

        value
    }

    /// Value of the `k`-th ghost cell (`k >= 1`).
    pub fn ghost(&self, k: usize) -> f64 {
        self.values[k + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a line sampling `f` at distances `-1, 0, 1, ...` from the
    /// boundary cell, with exact derivative `df` at the boundary cell.
    fn line(f: impl Fn(f64) -> f64, df: f64, width: usize) -> GhostLine {
        let mut line = GhostLine::new(f(-1.0), f(0.0), df, 1.0);
        line.sweep(width);
        line
    }

    #[test]
    fn reproduces_polynomials() {
        // Linear and quadratic data are reproduced at every depth.
        let linear = line(|x| 3.0 - 2.0 * x, -2.0, MAX_GHOST_WIDTH);
        let quadratic = line(|x| 1.0 + x + 0.5 * x * x, 1.0, MAX_GHOST_WIDTH);

        for k in 1..=MAX_GHOST_WIDTH {
            let x = k as f64;
            assert!((linear.ghost(k) - (3.0 - 2.0 * x)).abs() < 1e-12);
            assert!((quadratic.ghost(k) - (1.0 + x + 0.5 * x * x)).abs() < 1e-10);
        }
    }

    #[test]
    fn order_increases_with_depth() {
        // With exact nearer values, the k-th formula is exact for polynomials
        // of degree below its point count.
        let quartic = |x: f64| x.powi(4) - 2.0 * x.powi(3) + x;
        let mut line = GhostLine::new(quartic(-1.0), quartic(0.0), 0.0, 1.0);
        for k in 1..=3 {
            line.values[k + 1] = quartic(k as f64);
        }
        assert!((line.extrapolate(4) - quartic(4.0)).abs() < 1e-9);

        let quintic = |x: f64| x.powi(5) - x.powi(2);
        let mut line = GhostLine::new(quintic(-1.0), quintic(0.0), 0.0, 1.0);
        for k in 1..=5 {
            line.values[k + 1] = quintic(k as f64);
        }
        assert!((line.extrapolate(6) - quintic(6.0)).abs() < 1e-7);
    }

    #[test]
    fn uniform_data() {
        let line = line(|_| 7.5, 0.0, 3);
        for k in 1..=3 {
            assert!((line.ghost(k) - 7.5).abs() < 1e-14);
        }
    }
}
