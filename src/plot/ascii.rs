//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or over ssh
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - iteration samples `(n, Xn)`: `o`
//! - bifurcation points `(parameter, tail value)`: `.`
//!
//! Non-finite values are skipped; they are off-chart by definition.

use crate::domain::{BifurcationResult, Trajectory};
use crate::report::finite_range;

/// Render `Xn` against `n` for an iteration run.
pub fn render_iteration_plot(t: &Trajectory, width: usize, height: usize) -> String {
    let points = t.indexed_xs();
    let n_max = t.len().saturating_sub(1) as f64;
    let x_bounds = axis_bounds(0.0, n_max);

    let note = match finite_range(t.xs.iter().copied()) {
        Some(_) => String::new(),
        None => " (no finite samples)".to_string(),
    };
    render_scatter(
        &points,
        x_bounds,
        'o',
        width,
        height,
        |(x0, x1), (y0, y1)| format!("Plot: n=[{x0:.0}, {x1:.0}] | Xn=[{y0:.4}, {y1:.4}]{note}\n"),
    )
}

/// Render tail values against the swept parameter.
pub fn render_bifurcation_plot(r: &BifurcationResult, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = r.points().collect();
    let x_bounds = axis_bounds(r.range.start, r.range.stop);
    let symbol = r.kind.parameter_symbol();
    render_scatter(
        &points,
        x_bounds,
        '.',
        width,
        height,
        |(x0, x1), (y0, y1)| {
            format!("Plot: {symbol}=[{x0:.4}, {x1:.4}] | Trajectories=[{y0:.4}, {y1:.4}]\n")
        },
    )
}

fn render_scatter<F>(
    points: &[(f64, f64)],
    x_bounds: (f64, f64),
    ch: char,
    width: usize,
    height: usize,
    header: F,
) -> String
where
    F: FnOnce((f64, f64), (f64, f64)) -> String,
{
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = finite_range(points.iter().map(|&(_, y)| y))
        .map(|(lo, hi)| pad_range(lo, hi, 0.05))
        .unwrap_or((0.0, 1.0));
    let (x_min, x_max) = x_bounds;

    let mut grid = vec![vec![' '; width]; height];
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) || x < x_min || x > x_max {
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = ch;
    }

    let mut out = header((x_min, x_max), (y_min, y_max));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

/// Widen a degenerate axis so the mapping below never divides by zero.
fn axis_bounds(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
