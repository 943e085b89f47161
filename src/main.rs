mod cli;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            file,
            bank,
            output,
            json,
            policy,
        } => cli::convert::run(&file, &bank, output.as_deref(), json, policy.as_deref()),
        Commands::Banks => cli::banks::run(),
        Commands::Preview {
            file,
            rows,
            date_column,
        } => cli::preview::run(&file, rows, date_column),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetOutputDir { dir } => cli::config::set_output_dir(&dir),
            ConfigCommands::SetPolicy { bank, policy } => cli::config::set_policy(&bank, &policy),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
