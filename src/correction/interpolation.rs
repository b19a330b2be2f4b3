use crate::models::VcfGrid;

use super::bracket::find_bracket;

/// Point on the line through `(x0, y0)` and `(x1, y1)` evaluated at `x`.
///
/// Returns `y0` when the two abscissae coincide. No clamping: `x` outside
/// `[x0, x1]` extrapolates.
///
/// ```
/// use tank_mass_calculator::correction::linear_interpolate;
///
/// assert_eq!(linear_interpolate(15.0, 10.0, 20.0, 1.0, 2.0), 1.5);
/// assert_eq!(linear_interpolate(5.0, 10.0, 10.0, 3.0, 9.0), 3.0);
/// ```
pub fn linear_interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Bilinear interpolation of the VCF grid at temperature `t` and density `rho`.
///
/// Each axis is bracketed independently. A degenerate bracket on one axis reduces
/// the problem to linear interpolation along the other; degenerate on both returns
/// the stored cell.
pub fn bilinear_interpolate_vcf(t: f64, rho: f64, grid: &VcfGrid) -> f64 {
    let temps = grid.temperatures();
    let dens = grid.densities();
    let t_bracket = find_bracket(temps, t, |&v| v);
    let d_bracket = find_bracket(dens, rho, |&v| v);
    let (i1, i2) = t_bracket.indices();
    let (j1, j2) = d_bracket.indices();

    let (t1, t2) = (temps[i1], temps[i2]);
    let (d1, d2) = (dens[j1], dens[j2]);

    match (t_bracket.is_degenerate(), d_bracket.is_degenerate()) {
        (true, true) => grid.value(i1, j1),
        (true, false) => linear_interpolate(rho, d1, d2, grid.value(i1, j1), grid.value(i1, j2)),
        (false, true) => linear_interpolate(t, t1, t2, grid.value(i1, j1), grid.value(i2, j1)),
        (false, false) => {
            let q11 = grid.value(i1, j1);
            let q21 = grid.value(i2, j1);
            let q12 = grid.value(i1, j2);
            let q22 = grid.value(i2, j2);
            let area = (t2 - t1) * (d2 - d1);
            (q11 * (t2 - t) * (d2 - rho)
                + q21 * (t - t1) * (d2 - rho)
                + q12 * (t2 - t) * (rho - d1)
                + q22 * (t - t1) * (rho - d1))
                / area
        }
    }
}
