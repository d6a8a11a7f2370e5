use finance_tracker::args::{Args, Command};
use finance_tracker::report;
use finance_tracker::Ledger;
use std::error::Error;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let ledger = match Ledger::open(&args.data_file) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("failed to open data file: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(&ledger, args.command) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(ledger: &Ledger, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            kind,
            description,
            amount,
            timestamp,
        } => {
            let entry = ledger.add(&kind, &description, amount, timestamp)?;
            println!("{}", report::render_added(&entry));
        }
        Command::List => println!("{}", report::render_listing(&ledger.list()?)),
        Command::Summary => println!("{}", report::render_summary(&ledger.summarize()?)),
        Command::Clear => {
            ledger.clear()?;
            println!("Todas as transações foram removidas.");
        }
        Command::Export => print!("{}", report::export_csv(&ledger.list()?)?),
    }

    Ok(())
}

/// RUST_LOG takes precedence over the --verbose flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finance_tracker={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
