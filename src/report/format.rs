//! Formatted terminal output for iteration and bifurcation runs.
//!
//! We keep formatting code in one place so:
//! - the map/sweep code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{BifurcationResult, Trajectory};

/// Min/max over the finite values of `values`, if there are any.
pub fn finite_range<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}

fn fmt_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{lo:.6}, {hi:.6}]"),
        None => "-".to_string(),
    }
}

/// Two-line title used by every front-end: figure title and formula.
pub fn iteration_title(t: &Trajectory) -> (String, &'static str) {
    (format!("{} Map", t.kind.display_name()), t.kind.formula())
}

pub fn bifurcation_title(r: &BifurcationResult) -> (String, &'static str) {
    (format!("{} Bifurcation", r.kind.display_name()), r.kind.formula())
}

/// Short summary of an iteration run.
pub fn format_iteration_summary(t: &Trajectory) -> String {
    let mut out = String::new();
    let (title, formula) = iteration_title(t);
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!("{formula}\n"));
    out.push_str(&format!(
        "{} = {} | samples = {}\n",
        t.kind.parameter_symbol(),
        t.parameter,
        t.len()
    ));

    let non_finite = t.xs.iter().filter(|v| !v.is_finite()).count();
    out.push_str(&format!(
        "Xn range: {} | non-finite: {non_finite}\n",
        fmt_range(finite_range(t.xs.iter().copied()))
    ));
    if let Some(last) = t.xs.last() {
        out.push_str(&format!("last Xn: {last}\n"));
    }
    out
}

/// Short summary of a bifurcation sweep.
pub fn format_bifurcation_summary(r: &BifurcationResult) -> String {
    let mut out = String::new();
    let (title, formula) = bifurcation_title(r);
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!("{formula}\n"));
    out.push_str(&format!(
        "{} in [{}, {}) step {} | samples = {} | points = {}\n",
        r.kind.parameter_symbol(),
        r.range.start,
        r.range.stop,
        r.range.step,
        r.len(),
        r.points().count(),
    ));
    out.push_str(&format!(
        "Trajectories range: {} | diverged samples: {}\n",
        fmt_range(finite_range(r.points().map(|(_, v)| v))),
        r.non_finite_count()
    ));
    out
}
