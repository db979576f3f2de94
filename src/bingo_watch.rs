// src/bingo_watch.rs
//
// Terminal bingo card watcher.
//
// Looks up a player's cards by their six-character ID, then polls the drawn balls on a fixed
// period and crosses out matching numbers. A banner is shown when a card is fully crossed out.
//
// Interactive Controls:
// - ENTER: Dismiss the win banner
// - R: Reload cards and drawn balls (manual retry after an error)
// - ESC / Q / Ctrl+C: Exit
//
// CLI Options:
// - --player: Player ID (prompted for when missing)
// - --config: Configuration file (default conf/client.conf)
// - --interval: Seconds between drawn-balls refreshes
// - --exit: Display the current state once and exit
// - --verbose: Debug logging on stderr

use bingo_watch::api_client::ApiClient;
use bingo_watch::config::{ClientConfig, DEFAULT_CONFIG_PATH};
use bingo_watch::logging::{self, log_debug, log_error, log_info, log_warning};
use bingo_watch::player::PlayerId;
use bingo_watch::session::{Poller, Session};
use bingo_watch::terminal::{self, KeyAction};

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Watch - Follow your bingo cards while the balls are drawn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Player ID, 6 characters (default from config, otherwise prompted)
    #[arg(short, long)]
    player: Option<String>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seconds between drawn-balls refreshes (default from config)
    #[arg(long)]
    interval: Option<u64>,

    /// Exit after displaying the current state (no interactive loop)
    #[arg(long)]
    exit: bool,

    /// Print debug messages on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::set_verbose(args.verbose);

    if let Err(e) = run(args).await {
        log_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = ClientConfig::load_from_or_default(&args.config);
    if let Some(interval) = args.interval {
        if interval == 0 {
            return Err("--interval must be at least 1 second".into());
        }
        config.poll_interval = interval;
    }

    let player = match args.player.or_else(|| config.player_id.clone()) {
        Some(raw) => PlayerId::parse(&raw)?,
        None => match terminal::read_player_id()? {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    let api = ApiClient::new(&config)?;
    log_info(&format!("Watching cards of player {player} on {}", api.cards_url()));

    let mut session = Session::new(player);
    session.begin_refresh();
    show(&session, &config, !args.exit)?;

    session.refresh_balls(&api).await;
    session.load_cards(&api).await;
    let mut poller = Poller::new(config.poll_period(), Instant::now());

    loop {
        show(&session, &config, !args.exit)?;
        if args.exit {
            break;
        }

        match next_key(poller.remaining(Instant::now())).await {
            Some(KeyAction::Quit) => break,
            Some(KeyAction::Dismiss) => {
                session.dismiss_win();
                continue;
            }
            Some(KeyAction::Retry) => {
                session.retry(&api).await;
                poller.reset(Instant::now());
                continue;
            }
            None => {}
        }

        if poller.is_due(Instant::now()) {
            session.refresh_balls(&api).await;
            poller.reset(Instant::now());
        }
    }

    log_info("Stopped watching");
    Ok(())
}

fn show(session: &Session, config: &ClientConfig, clear: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if clear {
        // Clear screen for better readability
        write!(stdout, "\x1b[2J\x1b[1;1H")?;
    }
    write!(stdout, "{}", terminal::render(session, config.poll_period()))?;
    stdout.flush()
}

/// Wait for a key press until the next refresh is due; plain sleep when there is no terminal.
async fn next_key(timeout: Duration) -> Option<KeyAction> {
    match tokio::task::spawn_blocking(move || terminal::wait_for_key(timeout)).await {
        Ok(Ok(action)) => action,
        Ok(Err(e)) => {
            log_debug(&format!("Keyboard input unavailable ({e}), sleeping {}s", timeout.as_secs()));
            sleep(timeout).await;
            None
        }
        Err(e) => {
            log_warning(&format!("Keyboard task failed: {e}"));
            sleep(timeout).await;
            None
        }
    }
}
