//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed the sample todos into an in-memory store and run one palette query.
//! - Print results with matches bracketed, for quick local sanity checks.
//!
//! Usage: `hotkey_cli [--filter all|open|done] [--log-level LEVEL] [query...]`

use clap::{Parser, ValueEnum};
use hotkey_core::model::todo::now_epoch_ms;
use hotkey_core::{
    init_stderr_logging, seed_sample_todos, CommandPalette, EmptyState, PaletteConfig,
    SelectionBus, SqliteTodoStore, StatusFilter, SystemClock, TodoService,
};
use log::error;
use std::error::Error;
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(
    name = "hotkey_cli",
    version,
    about = "Run one palette query against the sample todos"
)]
struct Args {
    /// Status filter applied with the query.
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    filter: FilterArg,

    /// Log level written to stderr.
    #[arg(long, env = "HOTKEY_LOG", default_value = "warn")]
    log_level: String,

    /// Search words, joined with single spaces.
    query: Vec<String>,
}

impl Args {
    fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum FilterArg {
    All,
    Open,
    Done,
}

impl From<FilterArg> for StatusFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => Self::All,
            FilterArg::Open => Self::Open,
            FilterArg::Done => Self::Done,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_stderr_logging(&args.log_level) {
        eprintln!("logging disabled: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("hotkey_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let store = Rc::new(SqliteTodoStore::open_in_memory()?);
    seed_sample_todos(&TodoService::new(Rc::clone(&store)), now_epoch_ms())?;

    let mut palette = CommandPalette::new(
        store,
        Rc::new(SystemClock),
        PaletteConfig::default(),
        Rc::new(SelectionBus::new()),
    );
    let query = args.query_text();
    palette.set_search_text(query.as_str());
    palette.set_status_filter(args.filter.into());
    palette.flush();

    if let Some(err) = palette.session().engine().last_error() {
        return Err(err.to_string().into());
    }

    match palette.empty_state() {
        EmptyState::NoTodos => println!("No todos yet."),
        EmptyState::NoMatches => println!("No todos match \"{}\".", query.trim()),
        EmptyState::Results => {
            for result in palette.results() {
                let marker = if palette.highlighted() == Some(result.id) {
                    '>'
                } else {
                    ' '
                };
                let title = palette
                    .title_segments(result)
                    .into_iter()
                    .map(|segment| {
                        if segment.is_match {
                            format!("[{}]", segment.text)
                        } else {
                            segment.text.to_string()
                        }
                    })
                    .collect::<String>();
                println!("{marker} {title} ({})", result.status.display_name());
            }
            println!("{}", palette.footer_hint());
        }
    }

    Ok(())
}
