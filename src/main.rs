//! bookmodel - replay builder event scripts

use std::process::ExitCode;

use clap::Parser;

use bookmodel::{BookModel, dump, replay_file};

#[derive(Parser)]
#[command(name = "bookmodel")]
#[command(version, about = "Replay book builder events and show the resulting model", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookmodel events.json           Print the model as a text outline
    bookmodel --json events.json    Print the model as JSON
    RUST_LOG=debug bookmodel events.json")]
struct Cli {
    /// Event script (JSON array of builder events)
    #[arg(value_name = "EVENTS")]
    input: String,

    /// Print the model as JSON instead of a text outline
    #[arg(short, long)]
    json: bool,

    /// Only report a one-line summary
    #[arg(short, long, conflicts_with = "json")]
    quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let book = replay_file(&cli.input).map_err(|e| e.to_string())?;
    log::info!("replayed {}", cli.input);

    if cli.json {
        let json = serde_json::to_string_pretty(&book).map_err(|e| e.to_string())?;
        println!("{json}");
    } else if cli.quiet {
        println!("{}", summary(&book));
    } else {
        print!("{}", dump::render(&book));
    }
    Ok(())
}

fn summary(book: &BookModel) -> String {
    let paragraphs: usize = book.models().map(|(_, m)| m.paragraph_count()).sum();
    format!(
        "{} models, {} paragraphs, {} contents entries, {} labels, {} images",
        book.models().count(),
        paragraphs,
        book.contents().len(),
        book.labels().len(),
        book.images().len()
    )
}
