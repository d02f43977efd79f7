use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pumpdeck::{
    app::App,
    catalog::Catalog,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, DeckEventSource, FixedTicker, Runner, Ticker},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;

/// terminal showcase for an industrial pump catalog
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Browse an industrial pump catalog in the terminal: an autoplaying hero carousel of product categories, a hot-deals strip that pauses while hovered, product pages and search."
)]
pub struct Cli {
    /// catalog JSON to load instead of the bundled one
    #[clap(short = 'c', long)]
    catalog: Option<PathBuf>,

    /// config file to read (and write with --save-config)
    #[clap(long)]
    config: Option<PathBuf>,

    /// hero autoplay interval in milliseconds
    #[clap(long)]
    hero_interval: Option<u64>,

    /// hot-deals autoplay interval in milliseconds
    #[clap(long)]
    deals_interval: Option<u64>,

    /// quiet period after manual navigation before autoplay resumes, in milliseconds
    #[clap(long)]
    resume_delay: Option<u64>,

    /// number of deals shown at once
    #[clap(long)]
    deals_visible: Option<usize>,

    /// slide transition length in milliseconds
    #[clap(long)]
    transition: Option<u64>,

    /// write the effective configuration back to the config file
    #[clap(long)]
    save_config: bool,

    /// log file path (defaults to the local state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer command line overrides over the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(v) = self.hero_interval {
            config.hero_interval_ms = v;
        }
        if let Some(v) = self.deals_interval {
            config.deals_interval_ms = v;
        }
        if let Some(v) = self.resume_delay {
            config.resume_delay_ms = v;
        }
        if let Some(v) = self.deals_visible {
            config.deals_visible = v;
        }
        if let Some(v) = self.transition {
            config.transition_ms = v;
        }
        config
    }

    fn load_catalog(&self) -> Result<Catalog, pumpdeck::error::CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::bundled(),
        }
    }
}

/// Restores the terminal on every exit path, including early returns and panics
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(logging::default_log_path) {
        logging::init(&path)?;
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    config.validate()?;
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let catalog = cli.load_catalog()?;
    let clock = SystemClock;
    let mut app = App::new(catalog, config.clone(), clock.now())?;

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );
    info!("pumpdeck started");
    start_tui(&mut terminal, &mut app, &runner, &clock)?;
    terminal.show_cursor()?;
    info!("pumpdeck exiting");

    Ok(())
}

fn start_tui<B: Backend, E: DeckEventSource, T: Ticker, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    clock: &C,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f, clock.now()))?;

    while !app.should_quit {
        let event = runner.step();
        let now = clock.now();
        if app.dispatch(event, now) && !app.should_quit {
            terminal.draw(|f| ui::draw(app, f, now))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pumpdeck::clock::ManualClock;
    use pumpdeck::runtime::{DeckEvent, TestEventSource};
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["pumpdeck"]).unwrap();
        assert!(cli.catalog.is_none());
        assert!(cli.hero_interval.is_none());
        assert!(!cli.save_config);
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "pumpdeck",
            "--hero-interval",
            "5000",
            "--deals-interval",
            "2000",
            "--resume-delay",
            "1000",
            "--deals-visible",
            "3",
            "--transition",
            "0",
        ])
        .unwrap();
        let cfg = cli.apply(Config::default());
        assert_eq!(cfg.hero_interval_ms, 5000);
        assert_eq!(cfg.deals_interval_ms, 2000);
        assert_eq!(cfg.resume_delay_ms, 1000);
        assert_eq!(cfg.deals_visible, 3);
        assert_eq!(cfg.transition_ms, 0);
        assert_eq!(cfg.tick_rate_ms, Config::default().tick_rate_ms);
    }

    #[test]
    fn test_cli_catalog_path() {
        let path = "/nonexistent/pumpdeck/catalog.json";
        let cli = Cli::try_parse_from(["pumpdeck", "-c", path]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from(path)));
        assert!(cli.load_catalog().is_err());
    }

    #[test]
    fn test_cli_config_store_path() {
        let cli = Cli::try_parse_from(["pumpdeck", "--config", "/tmp/x.json"]).unwrap();
        assert_eq!(cli.config_store().path(), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn test_start_tui_quits_on_q() {
        let clock = ManualClock::new();
        let mut app =
            App::new(Catalog::bundled().unwrap(), Config::default(), clock.now()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        let (tx, es) = TestEventSource::channel();
        tx.send(DeckEvent::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)))
            .unwrap();
        tx.send(DeckEvent::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(1)));

        start_tui(&mut terminal, &mut app, &runner, &clock).unwrap();
        assert!(app.should_quit);
        assert_eq!(
            app.home.as_ref().unwrap().hero.controller.current_index(),
            1
        );
    }
}
