mod cli;
mod error;
mod fmt;
mod form;
mod logging;
mod models;
mod settings;
mod storage;
mod store;
mod tui;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        None | Some(Commands::Tracker) => cli::tracker::run(),
        Some(Commands::Init { data_dir }) => cli::init::run(data_dir),
        Some(Commands::Add {
            name,
            description,
            amount,
        }) => cli::expenses::add(&name, &description, &amount),
        Some(Commands::Edit {
            id,
            name,
            description,
            amount,
        }) => cli::expenses::edit(id, name.as_deref(), description.as_deref(), amount.as_deref()),
        Some(Commands::Delete { id }) => cli::expenses::delete(id),
        Some(Commands::List) => cli::expenses::list(),
        Some(Commands::Total) => cli::expenses::total(),
        Some(Commands::Status) => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
