use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use proctop::app::App;
use proctop::config::{self, load_config, load_config_from_path};
use proctop::event::{Event, EventHandler};
use proctop::ui;

#[derive(Parser)]
#[command(
    name = "proctop",
    about = "Keyboard-driven process monitor with a host capacity view"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Disable the automatic refresh tick (redraw on keypress only)
    #[arg(long, default_value_t = false)]
    no_auto_refresh: bool,

    /// Write tracing output to this file (stderr would corrupt the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_logging(cli.log_file.as_deref())?;

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(100));
    let mut app = App::new(config);
    app.startup_probe()?;

    let mut events = EventHandler::new(tick_rate);
    let mut title = app.title();
    execute!(stdout(), SetTitle(title))?;

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    should_draw = app.on_tick();
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                if app.title() != title {
                    title = app.title();
                    execute!(stdout(), SetTitle(title))?;
                }
                terminal.draw(|frame| ui::draw(frame, &mut app))?;
            }
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if cli.no_auto_refresh {
        config.general.auto_refresh = false;
    }

    config
}

/// Send tracing output to a file when requested via `--log-file` or
/// `PROCTOP_LOG`; otherwise logging stays off.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let env_path = std::env::var_os("PROCTOP_LOG").map(PathBuf::from);
    let Some(path) = path.map(Path::to_path_buf).or(env_path) else {
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&path)?;
    let make_writer = move || {
        file.try_clone()
            .expect("failed to clone tracing output file")
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(make_writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
