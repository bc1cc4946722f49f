use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use oresight::config::DisplayConfig;
use oresight::report::document::REPORT_FILE_NAME;
use oresight::session::DashboardSession;
use oresight_cli::dashboard::render_dashboard;
use oresight_cli::util::{load_display_config, validate_spreadsheet_file, write_bytes_to_file};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("ORESIGHT_LOG", "error,oresight=info"))
        .init();

    let matches = Command::new("oresight")
        .version(clap::crate_version!())
        .about("\u{26CF} oresight - Mining Sensor Analytics Dashboard")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("analyze")
                .about("Analyze a measurement spreadsheet and render the dashboard")
                .arg(
                    Arg::new("input")
                        .help("Path to the measurement spreadsheet (.xlsx or .csv)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("File path the dashboard HTML will be written to")
                        .default_value("oresight_dashboard.html")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("report")
                        .short('r')
                        .long("report")
                        .help("Also write the narrative analysis report to this path")
                        .num_args(0..=1)
                        .default_missing_value(REPORT_FILE_NAME)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON display configuration override")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("analyze", sub_matches)) => run_analyze(sub_matches),
        _ => unreachable!(),
    }
}

fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").expect("has default");

    validate_spreadsheet_file(&input.display().to_string())?;

    let config = match matches.get_one::<String>("config") {
        Some(path) => load_display_config(path)?,
        None => DisplayConfig::default(),
    };

    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let mut session = DashboardSession::new(config);
    session
        .upload(name, &bytes)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    let analysis = session
        .analysis()
        .context("Session holds no analysis after upload")?;

    println!("----- Dataset Overview -----");
    println!("Number of records: {}", analysis.table.len());
    println!("Number of columns: {}", analysis.table.source_columns());
    println!("----- Summary Statistics -----");
    for (stat_name, value) in analysis.summary.entries() {
        println!("{}: {}", stat_name, value);
    }

    let dashboard = render_dashboard(analysis, session.config());
    dashboard
        .save_to_file(output)
        .with_context(|| format!("Failed to write dashboard to {}", output))?;
    log::info!("Dashboard written to {}", output);

    if let Some(report_path) = matches.get_one::<String>("report") {
        let report_bytes = session.generate_report()?;
        write_bytes_to_file(report_path, &report_bytes)
            .with_context(|| format!("Failed to write report to {}", report_path))?;
        println!("Report written to {}", report_path);
    }

    Ok(())
}
