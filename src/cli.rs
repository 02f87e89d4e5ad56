use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::constants::DATA_LOAD_FAILURE_MSG;
use crate::cpv::CpvIndex;
use crate::errors::{AppError, AppResult};
use crate::filter::{AwardModeFilter, KindFilter};
use crate::loader::{self, DataSet, DataSource};
use crate::render;
use crate::session::BrowseSession;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// One run's worth of inputs, assembled either from CLI flags or from a TOML
/// configuration file before being handed to the shared workflow.
#[derive(Debug, Default)]
struct RunArgs {
    data: String,
    search: Option<String>,
    kind: Option<String>,
    mode: Option<String>,
    location: Option<String>,
    cpv: Option<String>,
    all: bool,
}

/// Parses command-line arguments and executes the selected command.
///
/// Four subcommands are handled:
/// - `list`: load the dataset, apply the filters once, print result cards
/// - `browse`: interactive prompt over the same filters plus CPV drill-down
/// - `cpv`: print the taxonomy options at the root or under a node
/// - `toml`: run `list` or `browse` from a TOML configuration file
///
/// With no subcommand the help text is printed.
pub async fn run() -> AppResult<()> {
    let cmd = Command::new("gppd-cli")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(filter_args(
            Command::new("list")
                .about("Load the dataset, apply filters once, and print result cards")
                .after_help(
                    "Example:\n  gppd-cli list -d data/web -k contract -m direct -q \"γραφική ύλη\"",
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Print every matching record instead of the first page")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(filter_args(
            Command::new("browse")
                .about("Interactively filter, drill into CPV categories, and page through results")
                .after_help("Type 'help' at the prompt for the available commands."),
        ))
        .subcommand(
            Command::new("cpv")
                .about("Print the CPV taxonomy options at the root or under a node")
                .arg(data_arg())
                .arg(
                    Arg::new("under")
                        .short('u')
                        .long("under")
                        .help("CPV code to list the children of")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("list", sub)) => {
            let args = run_args_from_matches(sub);
            let config = config_from_matches(sub)?;
            run_list(&args, &config).await?;
        }
        Some(("browse", sub)) => {
            let args = run_args_from_matches(sub);
            let config = config_from_matches(sub)?;
            run_browse(&args, &config).await?;
        }
        Some(("cpv", sub)) => {
            let data = sub.get_one::<String>("data").expect("data is required");
            let under = sub.get_one::<String>("under").map(|s| s.as_str());
            run_cpv(data, under, &ResolvedConfig::default()).await?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            let args = RunArgs {
                data: file_config.data.clone(),
                search: file_config.search.clone(),
                kind: file_config.kind.clone(),
                mode: file_config.mode.clone(),
                location: file_config.location.clone(),
                cpv: file_config.cpv.clone(),
                all: file_config.all,
            };

            match file_config.command.as_str() {
                "list" => run_list(&args, &file_config.resolved).await?,
                _ => run_browse(&args, &file_config.resolved).await?,
            }
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

/// The data-source and filter flags shared by `list` and `browse`.
fn filter_args(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(data_arg())
        .arg(
            Arg::new("search")
                .short('q')
                .long("search")
                .help("Free-text search over title, organization, reference/protocol and location")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("kind")
                .short('k')
                .long("kind")
                .help("Record kind: 'all', 'request', 'notice', 'auction', 'contract', or 'payment'")
                .default_value("all")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .help("Award mode: 'all', 'direct', or 'competition'")
                .default_value("all")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("location")
                .short('l')
                .long("location")
                .help("Exact NUTS location label")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("cpv")
                .long("cpv")
                .help("CPV code to restrict results to")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("page_size")
                .short('p')
                .long("page-size")
                .help("Results per page")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Set),
        )
}

fn data_arg() -> Arg<'static> {
    Arg::new("data")
        .short('d')
        .long("data")
        .help("Dataset directory or HTTP(S) base URL")
        .required(true)
        .action(ArgAction::Set)
}

fn run_args_from_matches(sub: &ArgMatches) -> RunArgs {
    RunArgs {
        data: sub
            .get_one::<String>("data")
            .expect("data is required")
            .clone(),
        search: sub.get_one::<String>("search").cloned(),
        kind: sub.get_one::<String>("kind").cloned(),
        mode: sub.get_one::<String>("mode").cloned(),
        location: sub.get_one::<String>("location").cloned(),
        cpv: sub.get_one::<String>("cpv").cloned(),
        all: sub.try_get_one::<bool>("all").ok().flatten().copied().unwrap_or(false),
    }
}

fn config_from_matches(sub: &ArgMatches) -> AppResult<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    if let Some(&page_size) = sub.get_one::<usize>("page_size") {
        if page_size == 0 {
            return Err(AppError::InvalidInput(
                "Page size must be greater than 0".into(),
            ));
        }
        config.page_size = page_size;
    }
    Ok(config)
}

/// Loads the dataset, surfacing any failure as the single user-facing
/// data-load error with a diagnostic log.
async fn load_or_report(source: &DataSource, config: &ResolvedConfig) -> AppResult<DataSet> {
    match loader::load_dataset(source, config).await {
        Ok(dataset) => Ok(dataset),
        Err(e) => {
            error!(error = %e, "Dataset load failed");
            eprintln!("{DATA_LOAD_FAILURE_MSG}");
            Err(e)
        }
    }
}

/// Builds a session with the initial filters applied.
fn build_session(dataset: DataSet, args: &RunArgs, config: &ResolvedConfig) -> AppResult<BrowseSession> {
    let mut session = BrowseSession::new(dataset.records, dataset.nodes, config.page_size);

    if let Some(query) = &args.search {
        session.set_query(query.clone());
    }
    if let Some(kind) = &args.kind {
        session.set_kind(KindFilter::from(kind.as_str()));
    }
    if let Some(mode) = &args.mode {
        session.set_award_mode(AwardModeFilter::from(mode.as_str()));
    }
    if let Some(location) = &args.location {
        session.set_location(Some(location.clone()));
    }
    if let Some(code) = &args.cpv {
        session.select_cpv_code(code)?;
    }

    Ok(session)
}

async fn run_list(args: &RunArgs, config: &ResolvedConfig) -> AppResult<()> {
    let source = DataSource::parse(&args.data)?;
    let dataset = load_or_report(&source, config).await?;
    let mut session = build_session(dataset, args, config)?;

    if args.all {
        while session.has_more() {
            session.load_more();
        }
    }

    print_results(&session, config);
    if session.has_more() {
        println!(
            "\n{} more not shown; rerun with --all or a larger --page-size.",
            render::format_count(session.filtered().len() - session.visible().len())
        );
    }

    info!(
        total = session.records_len(),
        matched = session.filtered().len(),
        shown = session.visible().len(),
        "List completed"
    );
    Ok(())
}

async fn run_cpv(data: &str, under: Option<&str>, config: &ResolvedConfig) -> AppResult<()> {
    let source = DataSource::parse(data)?;
    let nodes = match loader::load_taxonomy(&source, config).await {
        Ok(nodes) => nodes,
        Err(e) => {
            error!(error = %e, "Taxonomy load failed");
            eprintln!("{DATA_LOAD_FAILURE_MSG}");
            return Err(e);
        }
    };
    let index = CpvIndex::build(&nodes);

    let parent = match under {
        Some(code) => Some(
            index
                .get(code)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown CPV code: {code}")))?
                .clone(),
        ),
        None => None,
    };

    let options = index.options_under(parent.as_ref());
    match &parent {
        Some(node) => println!("Children of {}:", render::format_cpv_option(node)),
        None => println!("Top-level CPV divisions:"),
    }
    for node in &options {
        println!("  {}", render::format_cpv_option(node));
    }
    if options.is_empty() {
        println!("  (none)");
    }
    Ok(())
}

fn print_results(session: &BrowseSession, config: &ResolvedConfig) {
    println!(
        "{}",
        render::format_meta(session.filtered().len(), session.visible().len())
    );
    for record in session.visible() {
        println!();
        print!("{}", render::format_card(record, config.max_cpv_shown));
    }
}

const BROWSE_HELP: &str = "\
Commands:
  search <text>    free-text search ('search' alone clears it)
  kind <value>     all | request | notice | auction | contract | payment
  mode <value>     all | direct | competition
  loc <label>      exact NUTS label ('loc' alone clears it)
  locations        list the labels present in the dataset
  cpv              show the current CPV position and its options
  cd <code>        descend into a CPV option
  up               go one CPV level up
  top              clear the CPV selection
  more             load another page of results
  show             reprint the current results
  help             this text
  quit             exit";

async fn run_browse(args: &RunArgs, config: &ResolvedConfig) -> AppResult<()> {
    let source = DataSource::parse(&args.data)?;
    let dataset = load_or_report(&source, config).await?;
    let mut session = build_session(dataset, args, config)?;

    println!(
        "Loaded {} records. Type 'help' for commands.",
        render::format_count(session.records_len())
    );
    print_results(&session, config);
    print_more_hint(&session);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("gppd> ");
        std::io::stdout()
            .flush()
            .map_err(|e| AppError::IoError(e.to_string()))?;

        let line = match lines.next() {
            Some(line) => line.map_err(|e| AppError::IoError(e.to_string()))?,
            None => break,
        };
        let input = line.trim();
        let (verb, rest) = match input.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        match verb {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" => println!("{BROWSE_HELP}"),
            "search" => {
                session.set_query(rest);
                print_results(&session, config);
                print_more_hint(&session);
            }
            "kind" => {
                session.set_kind(KindFilter::from(rest));
                print_results(&session, config);
                print_more_hint(&session);
            }
            "mode" => {
                session.set_award_mode(AwardModeFilter::from(rest));
                print_results(&session, config);
                print_more_hint(&session);
            }
            "loc" => {
                session.set_location(if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                });
                print_results(&session, config);
                print_more_hint(&session);
            }
            "locations" => {
                for label in session.locations() {
                    println!("  {label}");
                }
            }
            "cpv" => {
                println!("CPV: {}", session.cpv_breadcrumb());
                let options = session.cpv_options();
                for node in &options {
                    println!("  {}", render::format_cpv_option(node));
                }
                if options.is_empty() {
                    println!("  (no further subdivisions)");
                }
            }
            "cd" => match session.cpv_descend(rest) {
                Ok(()) => {
                    println!("CPV: {}", session.cpv_breadcrumb());
                    print_results(&session, config);
                    print_more_hint(&session);
                }
                Err(e) => println!("{e}"),
            },
            "up" => {
                session.cpv_ascend();
                println!("CPV: {}", session.cpv_breadcrumb());
                print_results(&session, config);
                print_more_hint(&session);
            }
            "top" => {
                session.cpv_top();
                print_results(&session, config);
                print_more_hint(&session);
            }
            "more" => {
                if session.has_more() {
                    session.load_more();
                    print_results(&session, config);
                    print_more_hint(&session);
                } else {
                    println!("All matching results are already shown.");
                }
            }
            "show" => {
                print_results(&session, config);
                print_more_hint(&session);
            }
            _ => println!("Unknown command '{verb}'. Type 'help' for commands."),
        }
    }

    info!("Browse session ended");
    Ok(())
}

fn print_more_hint(session: &BrowseSession) {
    if session.has_more() {
        println!(
            "\nType 'more' to load another {} results.",
            render::format_count(session.next_batch())
        );
    }
}
