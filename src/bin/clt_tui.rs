//! clt-darts animation player - Terminal User Interface
//!
//! Replays an exported animation, or computes a fresh one, with ratatui.
//! Playback state lives in `clt_darts::tui::player_app`.
//!
//! ```text
//! clt-tui [ARTIFACT]
//! clt-tui [--darts N] [--days N] [--speed N] [--seed N]
//! clt-tui --help
//! ```

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
use clt_darts::tui::args::{PlayerArgs, PLAYER_USAGE};

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let args = PlayerArgs::parse_from(std::env::args().skip(1));
    if args.show_help {
        print!("{PLAYER_USAGE}");
        return Ok(());
    }

    let app = match args.into_app() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use clt_darts::tui::player_app::{PlayerApp, CURVE_LEGEND, PANEL_TITLES};
    use clt_darts::visualization::Rgb;
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Alignment, Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{
            canvas::{Canvas, Line as CanvasLine, Points},
            Block, Borders, Paragraph,
        },
        Frame, Terminal,
    };
    use std::io;
    use std::time::Instant;

    /// Segments of the dashed board outline.
    const BOARD_SEGMENTS: usize = 72;
    /// Curve points per dash.
    const DASH_POINTS: usize = 4;

    /// Run the TUI application.
    pub fn run(mut app: PlayerApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = app.frame_interval();

        loop {
            let start = Instant::now();
            terminal.draw(|f| ui(f, &app))?;

            let timeout = tick_rate.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }

            app.update();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    const fn color(rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    fn panel<'a>(title: &'a str, fg: Rgb, bg: Color) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(bg))
            .title(Span::styled(
                title,
                Style::default().fg(color(fg)).add_modifier(Modifier::BOLD),
            ))
    }

    fn ui(f: &mut Frame, app: &PlayerApp) {
        let bg = color(app.theme.background);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(50),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(f.area());
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        render_title(f, rows[0], app, bg);
        render_scatter(f, top[0], app, bg);
        render_heatmap(f, top[1], app, bg);
        render_histogram(f, rows[2], app, bg);
        render_status(f, rows[3], app, bg);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &PlayerApp, bg: Color) {
        let title = Paragraph::new(Line::from(Span::styled(
            app.animation.metadata.title.clone(),
            Style::default()
                .fg(color(app.theme.foreground))
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("[Space] Pause  [←/→] Step  [R] Restart  [L] Loop  [Q] Quit"),
        );
        f.render_widget(title, area);
    }

    fn render_scatter(f: &mut Frame, area: Rect, app: &PlayerApp, bg: Color) {
        let half = app.animation.layout.scatter_half_width;
        let points = app.scatter_points();
        let board = app.board_outline(BOARD_SEGMENTS);
        let board_color = color(app.theme.board);

        let canvas = Canvas::default()
            .block(panel(PANEL_TITLES[0], app.theme.scatter_title, bg))
            .background_color(bg)
            .x_bounds([-half, half])
            .y_bounds([-half, half])
            .paint(move |ctx| {
                for &((x1, y1), (x2, y2)) in &board {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: board_color,
                    });
                }
                for &(x, y, rgb) in &points {
                    ctx.draw(&Points {
                        coords: &[(x, y)],
                        color: color(rgb),
                    });
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_heatmap(f: &mut Frame, area: Rect, app: &PlayerApp, bg: Color) {
        let edges = &app.animation.layout.heatmap_edges;
        let (lo, hi) = (edges.lo(), edges.hi());
        let cells = app.heatmap_cells();

        let canvas = Canvas::default()
            .block(panel(PANEL_TITLES[1], app.theme.heatmap_title, bg))
            .background_color(bg)
            .x_bounds([lo, hi])
            .y_bounds([lo, hi])
            .paint(move |ctx| {
                for cell in &cells {
                    ctx.print(
                        cell.x,
                        cell.y,
                        Span::styled("█", Style::default().fg(color(cell.color))),
                    );
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_histogram(f: &mut Frame, area: Rect, app: &PlayerApp, bg: Color) {
        let edges = &app.animation.layout.histogram_edges;
        let (lo, hi) = (edges.lo(), edges.hi());
        let y_limit = app.frame().map_or(1.0, |fr| fr.y_limit);
        let bars = app.histogram_bars();
        let curve = app.curve_points();
        let bar_color = color(app.theme.histogram);
        let curve_color = color(app.theme.curve);

        let canvas = Canvas::default()
            .block(panel(PANEL_TITLES[2], app.theme.histogram, bg))
            .background_color(bg)
            .x_bounds([lo, hi])
            .y_bounds([0.0, y_limit])
            .paint(move |ctx| {
                for &(x, density) in &bars {
                    if density > 0.0 {
                        ctx.draw(&CanvasLine {
                            x1: x,
                            y1: 0.0,
                            x2: x,
                            y2: density,
                            color: bar_color,
                        });
                    }
                }
                ctx.layer();
                for dash in curve.chunks(DASH_POINTS).step_by(2) {
                    for pair in dash.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: pair[0].0,
                            y1: pair[0].1,
                            x2: pair[1].0,
                            y2: pair[1].1,
                            color: curve_color,
                        });
                    }
                }
                ctx.print(
                    hi - (hi - lo) * 0.2,
                    y_limit * 0.92,
                    Span::styled(
                        format!("- - {CURVE_LEGEND}"),
                        Style::default().fg(curve_color),
                    ),
                );
            });
        f.render_widget(canvas, area);
    }

    fn render_status(f: &mut Frame, area: Rect, app: &PlayerApp, bg: Color) {
        let status = Paragraph::new(Line::from(Span::styled(
            app.status_line(),
            Style::default().fg(color(app.theme.foreground)),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }
}
