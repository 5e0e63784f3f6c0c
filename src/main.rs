//! A terminal case-study viewer with inertial scroll physics.
//!
//! Run the binary to open the built-in demo project, or pass a project
//! file. The gallery pane glides and snaps, the narrative pane follows
//! the active image, and the scrubber column scrubs between items.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::content::ProjectData;
use crate::core::geometry::LayoutQuery;
use crate::core::projection::Distortion;
use crate::ui::{
    gallery::GalleryWidget,
    layout::AppLayout,
    narrative::NarrativeWidget,
    scrubber::ScrubberWidget,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Case-study viewer with inertial scroll")]
struct Cli {
    /// Project file to open (defaults to the built-in demo).
    project: Option<PathBuf>,

    /// Override the configured frame rate.
    #[arg(long)]
    fps: Option<u64>,

    /// Print the parsed project and measured gallery geometry, then exit.
    #[arg(long)]
    dump: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let project = match &cli.project {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read project file {}", path.display()))?;
            ProjectData::parse(&text)
                .with_context(|| format!("cannot parse project file {}", path.display()))?
        }
        None => ProjectData::demo(),
    };

    let mut user_config = config::AppConfig::load();
    if let Some(fps) = cli.fps {
        user_config.fps = fps.clamp(15, 240);
    }

    if cli.dump {
        dump_project(&project, &user_config);
        return Ok(());
    }

    let mut state = AppState::new(project, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(state.config.frame_interval());

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so input latency never exceeds one frame.
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &state);
        })?;

        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        state.terminal_area = Rect::new(0, 0, w, h);
                    }
                    AppEvent::Frame => state.advance(Instant::now()),
                }
            }
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

    Ok(())
}

// ───────────────────────────────────────── rendering ─────────

fn draw(frame: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let gallery_layout = state.gallery_layout(&layout);
    let narrative_layout = state.narrative_layout(&layout);
    let gallery_items = state.project.gallery();
    let active = state.sync.active_index();

    // Pivot index tracking the active item, for heading highlight.
    let active_id = state.active_id();
    let active_pivot = state.project.pivots().iter().position(|pivot| {
        active_id
            .as_deref()
            .is_some_and(|id| pivot.target_id == id)
    });

    let gallery_block = Block::default()
        .title(format!(" {} ", state.project.title))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(gallery_block, layout.gallery_area);
    frame.render_widget(
        GalleryWidget::new(
            &gallery_items,
            &gallery_layout,
            state.gallery.position(),
            Distortion::from_velocity(state.gallery.displacement()),
            active,
        ),
        layout.gallery_viewport(),
    );

    frame.render_widget(
        ScrubberWidget::new(&gallery_layout, state.gallery.position(), active),
        layout.scrubber_track(),
    );

    let narrative_block = Block::default()
        .title(format!(" {} ", state.project.subtitle))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(narrative_block, layout.narrative_area);
    frame.render_widget(
        NarrativeWidget::new(&narrative_layout, state.narrative.position(), active_pivot),
        layout.narrative_viewport(),
    );

    let status = format!(
        " {} / {}  [{}]  ·  j/k next/prev  g/G ends  q quit",
        active + 1,
        gallery_items.len(),
        active_id.as_deref().unwrap_or("-"),
    );
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── dump mode ─────────

/// Print the parsed project and its measured geometry for a nominal
/// 120×40 terminal. Useful when authoring project files.
fn dump_project(project: &ProjectData, config: &config::AppConfig) {
    let layout = AppLayout::from_area(Rect::new(0, 0, 120, 40));
    let viewport = layout.gallery_viewport();
    let gallery = core::geometry::GalleryLayout::measure(
        &project.gallery(),
        f64::from(viewport.height),
        &config.gallery_metrics(),
    );

    println!("title:    {}", project.title);
    println!("subtitle: {}", project.subtitle);
    for (label, value) in &project.meta {
        println!("meta:     {label} = {value}");
    }
    println!();
    println!(
        "gallery: {} items, content {:.1} rows, max scroll {:.1}",
        gallery.item_count(),
        gallery.content(),
        gallery.max_scroll(),
    );
    for (i, item) in project.gallery().iter().enumerate() {
        let snap = gallery.snap_position(i).unwrap_or(0.0);
        println!("  [{i}] {:<12} snap {snap:>7.1}  ({})", item.id, item.src);
    }
    println!();
    println!("pivots:");
    for pivot in project.pivots() {
        println!("  {:<12} → {}", pivot.heading, pivot.target_id);
    }
}
