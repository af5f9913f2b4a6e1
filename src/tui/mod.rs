//! Ratatui-based plot windows.
//!
//! Each result is shown as one full-screen "window". A window's data is
//! computed only once the previous window has been closed (q / Esc / Enter);
//! closing the last returns. There is no other interaction: the plots are
//! static views.

use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::domain::{BifurcationResult, Trajectory};
use crate::error::AppError;
use crate::report::{bifurcation_title, finite_range, iteration_title};

mod plotters_chart;

use plotters_chart::ScatterChart;

/// Grid used to thin dense scatter data before drawing.
///
/// Terminal canvases are a few hundred dots wide at most, so a full
/// bifurcation sweep (hundreds of thousands of points) collapses to far fewer
/// visible dots.
const DECIMATE_COLS: usize = 1024;
const DECIMATE_ROWS: usize = 512;

/// Everything needed to draw one plot window.
#[derive(Debug, Clone)]
pub struct PlotView {
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl PlotView {
    /// `Xn` against `n`.
    pub fn iteration(t: &Trajectory) -> Self {
        let (title, formula) = iteration_title(t);
        let points = t.indexed_xs();
        let n_max = (t.len().saturating_sub(1) as f64).max(1.0);
        Self {
            title,
            subtitle: formula.to_string(),
            summary: format!(
                "{} = {} | samples = {}",
                t.kind.parameter_symbol(),
                t.parameter,
                t.len()
            ),
            x_label: "n",
            y_label: "Xn",
            x_bounds: [0.0, n_max],
            y_bounds: padded_y_bounds(&points),
            points,
        }
    }

    /// Tail values against the swept parameter, x clamped to the sweep range.
    pub fn bifurcation(r: &BifurcationResult) -> Self {
        let (title, formula) = bifurcation_title(r);
        let all: Vec<(f64, f64)> = r.points().collect();
        let x_bounds = [r.range.start, r.range.stop];
        let y_bounds = padded_y_bounds(&all);
        let points = decimate(&all, x_bounds, y_bounds, DECIMATE_COLS, DECIMATE_ROWS);
        Self {
            title,
            subtitle: formula.to_string(),
            summary: format!(
                "{} in [{}, {}) | samples = {} | diverged = {}",
                r.kind.parameter_symbol(),
                r.range.start,
                r.range.stop,
                r.len(),
                r.non_finite_count()
            ),
            x_label: r.kind.parameter_symbol(),
            y_label: "Trajectories",
            points,
            x_bounds,
            y_bounds,
        }
    }
}

/// Show `total` windows one after another.
///
/// `build(i)` produces the view for window `i` and is called only after
/// window `i - 1` has been closed, so a slow computation never delays the
/// windows before it.
pub fn run<F>(total: usize, build: F) -> Result<(), AppError>
where
    F: FnMut(usize) -> Result<PlotView, AppError>,
{
    if total == 0 {
        return Ok(());
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    present(&mut terminal, total, build)
}

/// Build and show windows strictly in turn. A `Quit` stops before the next
/// build.
fn present<S, F>(screen: &mut S, total: usize, mut build: F) -> Result<(), AppError>
where
    S: Screen,
    F: FnMut(usize) -> Result<PlotView, AppError>,
{
    for i in 0..total {
        screen.busy(i + 1, total)?;
        let view = build(i)?;
        let window = Window {
            view: &view,
            index: i + 1,
            total,
        };
        if screen.show(&window)? == Exit::Quit {
            break;
        }
    }
    Ok(())
}

/// Surface the windows are shown on.
trait Screen {
    /// Placeholder while window `index` is being computed.
    fn busy(&mut self, index: usize, total: usize) -> Result<(), AppError>;
    /// Show `window` until the user closes it.
    fn show(&mut self, window: &Window<'_>) -> Result<Exit, AppError>;
}

impl<B: Backend> Screen for Terminal<B> {
    fn busy(&mut self, index: usize, total: usize) -> Result<(), AppError> {
        self.draw(|f| draw_busy(f, index, total))
            .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
        Ok(())
    }

    fn show(&mut self, window: &Window<'_>) -> Result<Exit, AppError> {
        // Log lines written while computing land on the alternate screen.
        self.clear()
            .map_err(|e| AppError::new(4, format!("Terminal clear error: {e}")))?;
        window.event_loop(self)
    }
}

fn draw_busy(frame: &mut ratatui::Frame<'_>, index: usize, total: usize) {
    let p = Paragraph::new(format!("Running... (plot {index}/{total})"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, frame.area());
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// Show the next window.
    Next,
    /// Stop showing windows.
    Quit,
}

struct Window<'a> {
    view: &'a PlotView,
    index: usize,
    total: usize,
}

impl Window<'_> {
    fn event_loop<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<Exit, AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(exit) = exit_for_key(key.code) {
                        return Ok(exit);
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.view.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(self.view.subtitle.clone())),
            Line::from(Span::styled(
                self.view.summary.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Numerical Solutions and Bifurcation Diagrams")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.view.points.is_empty() {
            let msg = Paragraph::new("No finite points to plot.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        // Axis titles come from the chart's own mesh.
        let widget = ScatterChart {
            points: &self.view.points,
            x_bounds: self.view.x_bounds,
            y_bounds: self.view.y_bounds,
            x_label: self.view.x_label,
            y_label: self.view.y_label,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.index < self.total {
            "Enter/q/Esc close (next plot)"
        } else {
            "Enter/q/Esc close"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(
                format!("plot {}/{}", self.index, self.total),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn exit_for_key(code: KeyCode) -> Option<Exit> {
    match code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => Some(Exit::Next),
        KeyCode::Char('Q') => Some(Exit::Quit),
        _ => None,
    }
}

fn padded_y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let Some((lo, hi)) = finite_range(points.iter().map(|&(_, y)| y)) else {
        return [0.0, 1.0];
    };
    let pad = ((hi - lo).abs() * 0.05).max(1e-3);
    [lo - pad, hi + pad]
}

/// Keep at most one point per `cols x rows` cell; drops non-finite and
/// out-of-bounds points. First point per cell wins, order is preserved.
fn decimate(
    points: &[(f64, f64)],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    cols: usize,
    rows: usize,
) -> Vec<(f64, f64)> {
    let (x0, x1) = (x_bounds[0], x_bounds[1]);
    let (y0, y1) = (y_bounds[0], y_bounds[1]);
    if !(x1 > x0 && y1 > y0) || cols == 0 || rows == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) || x < x0 || x > x1 || y < y0 || y > y1 {
            continue;
        }
        let cx = (((x - x0) / (x1 - x0)) * (cols - 1) as f64).round() as usize;
        let cy = (((y - y0) / (y1 - y0)) * (rows - 1) as f64).round() as usize;
        if seen.insert((cx, cy)) {
            out.push((x, y));
        }
    }
    out
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}
