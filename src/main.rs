//! A snap-to-cell day picker for the terminal.
//!
//! Drag the row with the mouse, flick it, or step with the keyboard; the
//! row always comes to rest with a day centred under the indicator.

mod app;
mod config;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{frame_interval, spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::ui::{
    carousel_widget::CarouselWidget, layout::AppLayout, overlay::IndicatorOverlay, popup,
    theme::Theme,
};

/// Animation frame period.
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Snap-to-cell day carousel")]
struct Cli {
    /// First day in the row (YYYY-MM-DD, defaults to today).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Number of days to load.
    #[arg(long, default_value_t = 60)]
    days: usize,

    /// Day to centre on at launch (defaults to today when in range).
    #[arg(long)]
    index: Option<usize>,

    /// Cell width in columns; overrides the saved setting.
    #[arg(long = "cell-width")]
    cell_width: Option<u16>,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

/// Index of today within the loaded range, if it is there.
fn today_index(start: NaiveDate, count: usize) -> Option<usize> {
    let days = (Local::now().date_naive() - start).num_days();
    usize::try_from(days).ok().filter(|&i| i < count)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let start = cli.start.unwrap_or_else(|| Local::now().date_naive());
    let mut user_config = config::AppConfig::load();
    if let Some(width) = cli.cell_width {
        user_config.cell_width = config::clamp_cell_width(width);
    }
    let mut state = AppState::new(start, cli.days, user_config)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // The viewport must be known before centring anything.
    let size = terminal.size()?;
    state.set_terminal_area(Rect::new(0, 0, size.width, size.height));
    if let Some(index) = cli.index.or_else(|| today_index(start, cli.days)) {
        state.carousel.scroll_to_index(index);
        state.pump_surface();
    }

    // ── async sources ─────────────────────────────────────────
    let mut events = spawn_event_reader();
    let mut frames = frame_interval(FRAME);

    // ── event loop ────────────────────────────────────────────
    loop {
        let size = terminal.size()?;
        state.set_terminal_area(Rect::new(0, 0, size.width, size.height));

        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            let carousel = &state.carousel;

            let title = match state.selected_day() {
                Some(day) => format!(" {} ", day.date.format("%A, %-d %B %Y")),
                None => " — ".to_string(),
            };
            let block = Block::default()
                .title(title)
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());

            let offset = carousel.surface().offset();
            let row = CarouselWidget::new(&state.days, carousel.geometry(), offset)
                .selected(carousel.model().selected_index())
                .block(block);
            frame.render_widget(row, layout.carousel_area);

            let overlay = IndicatorOverlay {
                geometry: carousel.geometry(),
                appearance: carousel.appearance(),
                scale: carousel.indicator_scale(),
                lit: state.flash.borrow().is_lit(),
            };
            frame.render_widget(overlay, layout.carousel_inner());

            let activity = state.activity.borrow();
            let pulses = state.flash.borrow().pulses;
            let lines: Vec<Line> = activity
                .recent()
                .take(layout.activity_area.height.saturating_sub(2) as usize)
                .map(Line::raw)
                .collect();
            let log = Paragraph::new(lines).style(Theme::log_style()).block(
                Block::default()
                    .title(format!(
                        " Activity · {} selections · {pulses} pulses ",
                        activity.crossings
                    ))
                    .title_style(Theme::title_style())
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style()),
            );
            frame.render_widget(log, layout.activity_area);

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Carousel => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::SettingsMenu => "",
            };
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            if state.active_view == ActiveView::SettingsMenu {
                frame.render_widget(
                    popup::SettingsPopup {
                        state: &state,
                        selected: state.settings_selected,
                    },
                    frame.area(),
                );
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => {}
                }
            }

            _ = frames.tick() => state.on_frame(),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(day) = state.selected_day() {
        tracing::info!("exiting on {}", day.date);
    }

    Ok(())
}
