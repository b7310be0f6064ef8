mod cli;
mod error;
mod fmt;
mod models;
mod reports;
mod session;
mod settings;
mod share;
mod storage;
mod store;
mod workbook;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ExpensesCommands, TripsCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Login { email, password } => cli::auth::login(&email, password),
        Commands::Register { name, email, password } => {
            cli::auth::register(&name, &email, password)
        }
        Commands::Logout => cli::auth::logout(),
        Commands::Whoami => cli::auth::whoami(),
        Commands::Profile {
            name,
            position,
            department,
            employee_id,
            phone_number,
        } => cli::auth::profile(name, position, department, employee_id, phone_number),
        Commands::Trips { command } => match command {
            TripsCommands::Add {
                title,
                description,
                destination,
                start,
                end,
                status,
            } => cli::trips::add(&title, description, destination, start, end, &status),
            TripsCommands::List => cli::trips::list(),
            TripsCommands::Update {
                id,
                title,
                description,
                destination,
                start,
                end,
                status,
            } => cli::trips::update(&id, title, description, destination, start, end, status),
            TripsCommands::Delete { id, yes } => cli::trips::delete(&id, yes),
            TripsCommands::Complete { id } => cli::trips::complete(&id),
        },
        Commands::Expenses { command } => match command {
            ExpensesCommands::Add {
                trip,
                amount,
                description,
                category,
                date,
            } => cli::expenses::add(&trip, amount, &description, &category, date),
            ExpensesCommands::List {
                trip,
                category,
                from_date,
                to_date,
            } => cli::expenses::list(trip, category, from_date, to_date),
            ExpensesCommands::Update {
                id,
                amount,
                description,
                category,
                date,
            } => cli::expenses::update(&id, amount, description, category, date),
            ExpensesCommands::Delete { id, yes } => cli::expenses::delete(&id, yes),
        },
        Commands::Report { trip, from_date, to_date } => {
            cli::report::run(trip, from_date, to_date)
        }
        Commands::Export {
            trip,
            from_date,
            to_date,
            output,
        } => cli::export::run(trip, from_date, to_date, output),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "perdiem", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
