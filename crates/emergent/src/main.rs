mod cli;
mod logging;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use emergent_config::{Config, MAX_PARTICLES};
use emergent_core::{MAX_FPS, MIN_FPS, Viewport};
use emergent_field::Animator;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
};
use tracing::{info, warn};

use crate::cli::Cli;

/// Particles added or removed per key press.
const COUNT_STEP: usize = 10;

/// Frame rate change per key press.
const FPS_STEP: u32 = 5;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if cli.write_default_config {
        Config::write_default(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    let config = cli.load_config(&config_path)?;

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let _log_guard = logging::init(cli.log_file.as_deref())?;
    info!(config = %config_path.display(), "starting emergent");

    let terminal = ratatui::init();
    let result = App::new(config, Some(config_path)).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Effective settings, including command line overrides.
    config: Config,
    /// File that theme and speed changes are written back to.
    config_path: Option<PathBuf>,
    /// Theme or speed changed since startup.
    settings_changed: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            running: false,
            config,
            config_path,
            settings_changed: false,
        }
    }

    /// Run the application's main loop.
    ///
    /// The animator lives exactly as long as this call: it is mounted at the
    /// initial terminal size and torn down before returning.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let mut animator = Animator::mount(
            self.config.field.clone(),
            self.viewport(size.width, size.height),
            self.config.display.fps,
            Instant::now(),
        );
        animator.set_speed(self.config.display.speed);

        self.running = true;
        let result = self.event_loop(&mut terminal, &mut animator);

        animator.teardown();
        self.persist_settings();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        animator: &mut Animator,
    ) -> color_eyre::Result<()> {
        while self.running {
            let now = Instant::now();
            if animator.frame_due(now) {
                animator.advance_frame(now);
                terminal.draw(|frame| self.render(frame, &*animator))?;
            }
            let timeout = animator
                .time_until_next_frame(Instant::now())
                .unwrap_or(Duration::from_millis(100));
            self.handle_crossterm_events(animator, timeout)?;
        }
        Ok(())
    }

    /// Viewport in logical units for a terminal of `cols` x `rows` cells.
    fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::from_cells(cols, rows, self.config.display.cell)
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, animator: &Animator) {
        let display = &self.config.display;
        let color = display.theme.accent_color();
        animator.render(frame, display.theme);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Status
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        if display.show_title {
            frame.render_widget(
                Line::from("Emergent".bold().fg(color)).centered(),
                chunks[1],
            );
            let mut status = format!(
                "{} particles · {} · {} · {} fps",
                animator.field().len(),
                animator.speed(),
                display.theme,
                animator.fps().unwrap_or(display.fps)
            );
            if animator.is_paused() {
                status.push_str(" · paused");
            }
            frame.render_widget(
                Line::from(status).style(Style::new().dark_gray()).centered(),
                chunks[2],
            );
        }

        if display.show_help {
            let help = Line::from(vec![
                "q".bold().fg(color),
                " quit  ".dark_gray(),
                "c".bold().fg(color),
                " theme  ".dark_gray(),
                "s".bold().fg(color),
                " speed  ".dark_gray(),
                "p".bold().fg(color),
                " pause  ".dark_gray(),
                "r".bold().fg(color),
                " reseed  ".dark_gray(),
                "+/-".bold().fg(color),
                " particles  ".dark_gray(),
                "[/]".bold().fg(color),
                " fps  ".dark_gray(),
                "h".bold().fg(color),
                " hide help".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, chunks[4]);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks for at most `timeout` so the next frame is drawn on time.
    fn handle_crossterm_events(
        &mut self,
        animator: &mut Animator,
        timeout: Duration,
    ) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.on_key_event(key, animator)
                }
                Event::Resize(cols, rows) => animator.on_resize(self.viewport(cols, rows)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, animator: &mut Animator) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('s')) => self.cycle_speed(animator),
            (_, KeyCode::Char('p')) => animator.toggle_pause(),
            (_, KeyCode::Char('r')) => animator.reseed(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => {
                let count = animator.field().config().particle_count + COUNT_STEP;
                animator.set_particle_count(count.min(MAX_PARTICLES));
            }
            (_, KeyCode::Char('-')) => {
                let count = animator
                    .field()
                    .config()
                    .particle_count
                    .saturating_sub(COUNT_STEP);
                animator.set_particle_count(count);
            }
            (_, KeyCode::Char(']')) => self.change_fps(animator, FPS_STEP as i64),
            (_, KeyCode::Char('[')) => self.change_fps(animator, -(FPS_STEP as i64)),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.config.display.theme = self.config.display.theme.next();
        self.settings_changed = true;
    }

    /// Cycle through animation speeds.
    fn cycle_speed(&mut self, animator: &mut Animator) {
        self.config.display.speed = self.config.display.speed.next();
        animator.set_speed(self.config.display.speed);
        self.settings_changed = true;
    }

    /// Raise or lower the frame rate within the supported range.
    fn change_fps(&mut self, animator: &mut Animator, delta: i64) {
        let fps = (i64::from(self.config.display.fps) + delta)
            .clamp(i64::from(MIN_FPS), i64::from(MAX_FPS)) as u32;
        self.config.display.fps = fps;
        animator.set_fps(fps);
    }

    fn toggle_help(&mut self) {
        self.config.display.show_help = !self.config.display.show_help;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    /// Write theme and speed changes back to the config file.
    ///
    /// Only those two keys are touched, so command line overrides never end
    /// up in the file.
    fn persist_settings(&self) {
        if !self.settings_changed {
            return;
        }
        let Some(path) = &self.config_path else {
            return;
        };
        let mut on_disk = match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "not saving settings, config file is unreadable");
                return;
            }
        };
        on_disk.display.theme = self.config.display.theme;
        on_disk.display.speed = self.config.display.speed;
        match on_disk.save_to(path) {
            Ok(()) => info!(path = %path.display(), "saved display settings"),
            Err(e) => warn!(error = %e, "failed to save display settings"),
        }
    }
}
