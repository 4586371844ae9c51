use codeshell::app::{EventResult, Workbench};
use codeshell::kernel::services::adapters::{
    ensure_settings_file, load_settings, HttpFileService, MemoryFileService,
};
use codeshell::kernel::services::ports::{RemoteFileService, Settings};
use codeshell::tui::terminal_guard::{install_termination_signals, TerminalGuard};
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

const USAGE: &str = "usage: codeshell [--remote <url>] [--offline [<db.json>]]";

#[derive(Debug, Default)]
struct CliArgs {
    remote: Option<String>,
    offline: bool,
    db_path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut args = args.into_iter().peekable();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--remote=") {
            out.remote = Some(value.to_string());
        } else if arg == "--remote" {
            out.remote = Some(args.next().ok_or("--remote needs a url")?);
        } else if arg == "--offline" {
            out.offline = true;
            if args.peek().is_some_and(|next| !next.starts_with("--")) {
                out.db_path = args.next().map(PathBuf::from);
            }
        } else if arg == "-h" || arg == "--help" {
            return Err(USAGE.to_string());
        } else {
            return Err(format!("unknown argument: {arg}\n{USAGE}"));
        }
    }
    Ok(out)
}

fn build_remote(
    args: &CliArgs,
    settings: &Settings,
) -> std::io::Result<Arc<dyn RemoteFileService>> {
    if args.offline {
        let service = match &args.db_path {
            Some(path) => MemoryFileService::from_db_json(path)?,
            None => MemoryFileService::new(),
        };
        return Ok(Arc::new(service));
    }

    let base_url = args
        .remote
        .clone()
        .unwrap_or_else(|| settings.remote.base_url.clone());
    let timeout = Duration::from_millis(settings.remote.timeout_ms);
    Ok(Arc::new(HttpFileService::new(base_url, timeout)))
}

fn main() -> std::io::Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let log_guard = logging::init();
    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "could not create settings file");
    }
    let settings = load_settings();
    let remote = build_remote(&args, &settings)?;
    tracing::info!(
        remote = %remote.describe(),
        log_dir = ?log_guard.as_ref().map(|g| g.log_dir()),
        "starting"
    );

    let mut workbench = Workbench::new(remote, &settings)?;

    let guard = TerminalGuard::new()?;
    guard.install_panic_restore();
    let (signal_tx, signal_rx) = mpsc::channel();
    let _signals = install_termination_signals(guard.restorer(), signal_tx)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    terminal.clear()?;

    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
            })?;
            dirty = false;
        }

        if let Ok(signal) = signal_rx.try_recv() {
            tracing::info!(?signal, "shutting down");
            break;
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => match workbench.handle_key(key, Instant::now()) {
                    EventResult::Quit => break,
                    EventResult::Consumed => dirty = true,
                    EventResult::Ignored => {}
                },
                Event::Mouse(mouse) => dirty |= workbench.handle_mouse(mouse),
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        dirty |= workbench.tick(Instant::now());
    }

    workbench.shutdown();
    drop(terminal);
    drop(guard);
    Ok(())
}
