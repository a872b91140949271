use busflow::{
    app,
    config::BusflowConfiguration,
    model::BusflowCliError,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct BusflowAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// builds the transition matrix from a road network and a movement history
    Build {
        #[arg(long, help = "path to .pbf or JSON-lines file of way records")]
        ways_file: String,
        #[arg(long, help = "path to JSON-lines movement history, optionally .gz")]
        history_file: String,
        #[arg(long, help = "path to file with busflow run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for the transition matrix JSON file")]
        output_file: String,
    },
    /// prints every transition recorded from one segment
    Row {
        #[arg(long, help = "path to a transition matrix JSON file")]
        matrix_file: String,
        #[arg(long, help = "segment as \"(src, dst)\"")]
        segment: String,
    },
    /// prints the most frequent intermediate segments of an ordered pair
    Pair {
        #[arg(long, help = "path to a transition matrix JSON file")]
        matrix_file: String,
        #[arg(long, help = "segment traveled first, as \"(src, dst)\"")]
        from: String,
        #[arg(long, help = "segment traveled later, as \"(src, dst)\"")]
        to: String,
    },
    /// recomputes one ordered pair directly from the movement history
    Between {
        #[arg(long, help = "path to .pbf or JSON-lines file of way records")]
        ways_file: String,
        #[arg(long, help = "path to JSON-lines movement history, optionally .gz")]
        history_file: String,
        #[arg(long, help = "path to file with busflow run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "segment traveled first, as \"(src, dst)\"")]
        from: String,
        #[arg(long, help = "segment traveled later, as \"(src, dst)\"")]
        to: String,
    },
    /// reports network and ingestion statistics without building the matrix
    Summary {
        #[arg(long, help = "path to .pbf or JSON-lines file of way records")]
        ways_file: String,
        #[arg(long, help = "path to JSON-lines movement history, optionally .gz")]
        history_file: Option<String>,
        #[arg(long, help = "path to file with busflow run parameters")]
        configuration_file: Option<String>,
    },
}

fn read_configuration(
    configuration_file: &Option<String>,
) -> Result<BusflowConfiguration, BusflowCliError> {
    match configuration_file {
        None => Ok(BusflowConfiguration::default()),
        Some(f) => {
            log::info!("reading busflow configuration from {f}");
            BusflowConfiguration::try_from(f)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), BusflowCliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// query misses are an answer, not a failure
fn print_or_no_data<T: Serialize>(
    result: Result<T, BusflowCliError>,
) -> Result<(), BusflowCliError> {
    match result {
        Ok(value) => print_json(&value),
        Err(BusflowCliError::MatrixError { source }) if source.is_no_data() => {
            println!("{source}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn run(app: &App) -> Result<(), BusflowCliError> {
    env_logger::init();
    match app {
        App::Build {
            ways_file,
            history_file,
            configuration_file,
            output_file,
        } => {
            let conf = read_configuration(configuration_file)?;
            let report = app::run_build(ways_file, history_file, output_file, &conf)?;
            eprintln!("finished.");
            print_json(&report)
        }
        App::Row {
            matrix_file,
            segment,
        } => print_or_no_data(app::run_row(matrix_file, segment)),
        App::Pair {
            matrix_file,
            from,
            to,
        } => print_or_no_data(app::run_pair(matrix_file, from, to)),
        App::Between {
            ways_file,
            history_file,
            configuration_file,
            from,
            to,
        } => {
            let conf = read_configuration(configuration_file)?;
            let result = app::run_between(ways_file, history_file, from, to, &conf)?;
            match result.modes {
                Some(modes) => print_json(&modes),
                None => {
                    println!("no data for pair {from} -> {to}");
                    Ok(())
                }
            }
        }
        App::Summary {
            ways_file,
            history_file,
            configuration_file,
        } => {
            let conf = read_configuration(configuration_file)?;
            let report = app::run_summary(ways_file, history_file.as_deref(), &conf)?;
            print_json(&report)
        }
    }
}

fn main() {
    let args = BusflowAppArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("busflow failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
