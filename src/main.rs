use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use draft_rater::config::Config;
use draft_rater::deck::SavedDeck;
use draft_rater::{DraftError, Rater};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_IO: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rate every pool card against the picks (default if no subcommand)
    Rate {
        /// Number of cards to show (defaults to `top` from config, 20)
        #[arg(short, long)]
        top: Option<usize>,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show statistics for the picks
    Stats,
    /// Show which pool card each name resolves to
    Resolve {
        #[arg(required = true)]
        queries: Vec<String>,
        /// Print the full card for every match
        #[arg(long)]
        details: bool,
    },
    /// Save the picks as a named deck
    Save {
        name: String,
        /// Set the picks were drafted from
        #[arg(short, long)]
        set: String,
    },
    /// List saved decks
    Decks,
}

#[derive(Parser, Debug)]
#[command(name = "draft-rater")]
#[command(about = "Limited draft pick rating CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/draft-rater/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Card pool JSON (overrides `pool` from config)
    #[arg(long, global = true)]
    pool: Option<PathBuf>,

    /// A picked card; repeat for each pick
    #[arg(short, long = "pick", global = true)]
    pick: Vec<String>,

    /// Saved deck whose cards count as picks (a file path or a saved deck name)
    #[arg(short, long, global = true)]
    deck: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("draft_rater=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn deck_dir(config: &Config) -> anyhow::Result<PathBuf> {
    match &config.deck_dir {
        Some(dir) => Ok(dir.clone()),
        None => draft_rater::deck::get_deck_dir(),
    }
}

/// `--deck` accepts a file path, or the name of a deck saved in the deck directory
fn resolve_deck_arg(arg: &str, config: &Config) -> anyhow::Result<PathBuf> {
    let as_path = Path::new(arg);
    if as_path.exists() {
        return Ok(as_path.to_path_buf());
    }
    draft_rater::deck::deck_path(&deck_dir(config)?, arg)
}

fn list_saved_decks(config: &Config) {
    let names = deck_dir(config).and_then(|dir| draft_rater::deck::list_decks(&dir));
    match names {
        Ok(names) if names.is_empty() => println!("No saved decks found."),
        Ok(names) => {
            for (i, name) in names.iter().enumerate() {
                println!("{:>2}. {}", i + 1, name);
            }
        }
        Err(e) => exit_with(EXIT_IO, format!("Deck error: {:#}", e)),
    }
}

/// Where the picks and the pool come from, as given on the command line
struct PickSource {
    pool: Option<PathBuf>,
    deck: Option<String>,
    picks: Vec<String>,
}

/// A loaded pool plus the picks to rate against it
struct Session {
    rater: Rater,
    picks: Vec<String>,
    set_name: Option<String>,
}

/// Load picks (saved deck first, then --pick in the order given) and the pool
fn load_session(source: PickSource, config: &Config, verbose: bool, start_time: Instant) -> Session {
    let mut set_name: Option<String> = None;
    let mut picks: Vec<String> = Vec::new();
    if let Some(deck_arg) = &source.deck {
        let loaded = resolve_deck_arg(deck_arg, config)
            .and_then(|path| draft_rater::deck::load_deck(&path));
        match loaded {
            Ok(deck) => {
                set_name = Some(deck.set);
                picks.extend(deck.cards);
            }
            Err(e) => exit_with(EXIT_IO, format!("Deck error: {:#}", e)),
        }
    }
    picks.extend(source.picks);

    let rater = build_rater(source.pool, config);

    if verbose {
        eprintln!(
            "Loaded {} pool cards, {} picks in {:?}",
            rater.index().len(),
            picks.len(),
            start_time.elapsed()
        );
    }

    Session {
        rater,
        picks,
        set_name,
    }
}

/// Print every pick that matches no pool card to stderr; returns how many
fn report_unresolved(session: &Session) -> usize {
    let missing = session.rater.unresolved(&session.picks);
    if !missing.is_empty() {
        eprintln!("{}", draft_rater::output::format_not_found(&missing));
    }
    missing.len()
}

fn build_rater(cli_pool: Option<PathBuf>, config: &Config) -> Rater {
    let Some(pool_path) = cli_pool.or_else(|| config.pool.clone()) else {
        exit_with(
            EXIT_CONFIG,
            "No card pool given. Pass --pool FILE or set `pool:` in ~/.config/draft-rater/config.yaml",
        );
    };

    let cards = match draft_rater::cards::load_pool(&pool_path) {
        Ok(cards) => cards,
        Err(e) => exit_with(EXIT_IO, format!("Pool error: {:#}", e)),
    };

    match Rater::from_cards(cards, config.effective_scoring()) {
        Ok(rater) => rater,
        Err(DraftError::InvalidConfig(errors)) => exit_with(
            EXIT_CONFIG,
            format!("Scoring config errors: {}", errors.join("; ")),
        ),
        Err(e) => exit_with(EXIT_IO, format!("Pool error: {} ({})", e, pool_path.display())),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rate { top: None, tsv: false });
    let start_time = Instant::now();

    // Load config
    let config = match draft_rater::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate scoring config at startup
    if let Err(errors) = draft_rater::scoring::validate_scoring(&config.effective_scoring()) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let source = PickSource {
        pool: cli.pool,
        deck: cli.deck,
        picks: cli.pick,
    };
    let use_colors = draft_rater::output::should_use_colors();

    match command {
        Commands::Rate { top, tsv } => {
            let session = load_session(source, &config, cli.verbose, start_time);
            if session.picks.is_empty() {
                exit_with(
                    EXIT_CONFIG,
                    "No picks given. Use --pick NAME (repeatable) or --deck FILE.",
                );
            }
            report_unresolved(&session);

            let rated = session.rater.rate(&session.picks);
            let top = top.unwrap_or(config.top);

            if tsv {
                let output = draft_rater::output::format_tsv(&rated, top);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else {
                println!("{}", draft_rater::output::format_rated_table(&rated, top, use_colors));
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Rated {} cards in {:?}", rated.len(), start_time.elapsed());
            }
        }
        Commands::Stats => {
            let session = load_session(source, &config, cli.verbose, start_time);
            report_unresolved(&session);

            let analysis = session.rater.analyze(&session.picks);
            if analysis.is_empty() {
                println!("No deck to analyze.");
            } else {
                println!(
                    "{}",
                    draft_rater::output::format_stats(
                        &analysis,
                        session.set_name.as_deref(),
                        use_colors
                    )
                );
            }
        }
        Commands::Resolve { queries, details } => {
            let session = load_session(source, &config, cli.verbose, start_time);
            for (query, resolution) in queries.iter().zip(session.rater.resolve(&queries)) {
                println!(
                    "{}",
                    draft_rater::output::format_resolution(query, &resolution, use_colors)
                );
                if details {
                    if let Some(card) = resolution.card() {
                        println!("{}", draft_rater::output::format_card_detail(card, use_colors));
                    }
                }
            }
        }
        Commands::Save { name, set } => {
            let session = load_session(source, &config, cli.verbose, start_time);
            if session.picks.is_empty() {
                exit_with(EXIT_CONFIG, "No deck to save.");
            }
            let skipped = report_unresolved(&session);
            if skipped > 0 {
                eprintln!("Skipping {} picks not found in the pool", skipped);
            }

            // Store the pool's spelling of every resolved pick
            let names: Vec<String> = session
                .rater
                .index()
                .resolve_many(&session.picks)
                .iter()
                .map(|card| card.name().to_string())
                .collect();

            let deck = SavedDeck::new(set, names);
            let saved = deck_dir(&config)
                .and_then(|dir| draft_rater::deck::save_deck(&dir, &name, &deck));
            match saved {
                Ok(path) => println!("Deck saved to {} ({} cards)", path.display(), deck.len()),
                Err(e) => exit_with(EXIT_IO, format!("Deck error: {:#}", e)),
            }
        }
        // Listing decks needs neither a pool nor picks
        Commands::Decks => list_saved_decks(&config),
    }

    std::process::exit(EXIT_SUCCESS);
}
