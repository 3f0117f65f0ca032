use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    str::FromStr,
};

use clap::{Parser, Subcommand};
use thiserror::Error;

use piston_motion::{
    config::{CamsConfig, ConfigError, DEFAULT_OUTPUT_FILE, EngineConfig, LobeConfig, RunConfig},
    models::engine::{
        cycle::{CycleError, sample_cycle},
        geometry::{EngineGeometry, GeometryError, ParameterError, StaticMetrics},
    },
    report::{DEFAULT_PRECISION, MetricsSummary, ReportError, Summary, save_csv},
    support::units::UnitSystem,
};

#[derive(Parser)]
#[command(name = "piston-motion")]
#[command(about = "Piston kinematics and valve timing for engine builds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a run file over a full cycle and write the CSV report
    Run {
        /// Path to the run YAML file
        config: PathBuf,
        /// Output CSV path (overrides the run file)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Decimal places for lengths and speeds
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,
    },
    /// Validate a run file and print its static metrics
    Check {
        /// Path to the run YAML file
        config: PathBuf,
    },
    /// Enter engine values at the prompt
    Interactive {
        /// Enter values in inches and cubic inches
        #[arg(long)]
        imperial: bool,
        /// Output CSV path (skips the file name prompt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engine parameters rejected")]
    Parameter(#[from] ParameterError),

    #[error("static metrics failed")]
    Geometry(#[from] GeometryError),

    #[error("cycle sampling failed")]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("console I/O failed")]
    Io(#[from] io::Error),

    #[error("input closed before all values were entered")]
    InputClosed,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run {
            config,
            output,
            precision,
        } => cmd_run(&config, output.as_deref(), precision),
        Commands::Check { config } => cmd_check(&config),
        Commands::Interactive { imperial, output } => cmd_interactive(imperial, output.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error_chain(&error));
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(config_path: &Path, output: Option<&Path>, precision: usize) -> Result<(), CliError> {
    let config = RunConfig::load(config_path)?;
    let output = output.map_or_else(|| config.output_path(), Path::to_path_buf);
    execute(&config, &output, precision)
}

fn cmd_check(config_path: &Path) -> Result<(), CliError> {
    println!("Checking run file: {}", config_path.display());

    let config = RunConfig::load(config_path)?;
    println!("{}", check_report(&config)?);
    Ok(())
}

/// Validity line and static metrics of a run file.
///
/// Warnings are only counted here. Their text goes out as `tracing` events.
fn check_report(config: &RunConfig) -> Result<String, CliError> {
    let params = config.engine_parameters();
    let warnings = params.validate()?;
    let cams = config.cam_specification()?;
    let metrics = StaticMetrics::compute(&EngineGeometry::new(&params))?;

    let mut report = String::from("✓ Run file is valid");
    match warnings.len() {
        0 => {}
        1 => report.push_str(" (1 warning)"),
        n => report.push_str(&format!(" ({n} warnings)")),
    }
    report.push('\n');
    if cams.is_none() {
        report.push_str("  no cam specification, valve lift will be zero\n");
    }
    report.push_str(&MetricsSummary::new(&metrics, params.units).to_string());
    Ok(report)
}

fn cmd_interactive(imperial: bool, output: Option<&Path>) -> Result<(), CliError> {
    let units = if imperial {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    };

    println!(
        "Piston motion: enter engine values in {} and {}.\n",
        units.length_label(),
        units.volume_label()
    );

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    interactive_session(&mut prompt, units, output, |config, path| {
        execute(config, path, DEFAULT_PRECISION)
    })
}

/// Prompts for runs until the user declines another one or input closes.
///
/// A rejected run is reported and asked for again. Closed input ends the
/// session cleanly once at least one run has completed.
fn interactive_session<R, W, F>(
    prompt: &mut Prompt<R, W>,
    units: UnitSystem,
    output: Option<&Path>,
    mut run: F,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&RunConfig, &Path) -> Result<(), CliError>,
{
    let mut completed = 0_usize;

    loop {
        let attempt = prompt_run(prompt, units, output)
            .and_then(|(config, path)| run(&config, &path));

        match attempt {
            Ok(()) => {
                completed += 1;
                match prompt.confirm("Run another calculation? [y/N]") {
                    Ok(true) => writeln!(prompt.output)?,
                    Ok(false) | Err(CliError::InputClosed) => return Ok(()),
                    Err(error) => return Err(error),
                }
            }
            Err(CliError::InputClosed) if completed > 0 => return Ok(()),
            Err(error @ (CliError::Io(_) | CliError::InputClosed)) => return Err(error),
            Err(error) => {
                eprintln!("error: {}", error_chain(&error));
                eprintln!("Please enter the values again.\n");
            }
        }
    }
}

/// Validates, samples, prints and saves one run.
fn execute(config: &RunConfig, output: &Path, precision: usize) -> Result<(), CliError> {
    let params = config.engine_parameters();
    params.validate()?;
    let cams = config.cam_specification()?;

    let results = sample_cycle(&EngineGeometry::new(&params), cams.as_ref())?;

    let mut summary = Summary::new(&results, params.units);
    if let Some(cams) = &cams {
        summary = summary.with_cams(cams);
    }
    println!("{summary}\n");

    save_csv(output, &results, params.units, precision)?;
    println!("✓ Results written to {}", output.display());
    Ok(())
}

/// Reads one run's worth of values and the CSV path.
fn prompt_run<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    units: UnitSystem,
    output: Option<&Path>,
) -> Result<(RunConfig, PathBuf), CliError> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => csv_file_name(&prompt.line("File name")?),
    };

    let engine = prompt_engine(prompt, units)?;
    let cams = if prompt.confirm("Add cam specification? [y/N]")? {
        Some(CamsConfig {
            intake: prompt_lobe(prompt, "Intake", units)?,
            exhaust: prompt_lobe(prompt, "Exhaust", units)?,
        })
    } else {
        None
    };

    let config = RunConfig {
        units,
        engine,
        cams,
        output: None,
    };
    Ok((config, path))
}

fn prompt_engine<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    units: UnitSystem,
) -> Result<EngineConfig, CliError> {
    let len = units.length_label();
    let vol = units.volume_label();

    Ok(EngineConfig {
        bore: prompt.number(&format!("Bore ({len})"))?,
        stroke: prompt.number(&format!("Stroke ({len})"))?,
        rod_length: prompt.number(&format!("Rod length ({len})"))?,
        deck_height: prompt.number(&format!("Deck height ({len})"))?,
        gasket_height: prompt.number(&format!("Gasket thickness ({len})"))?,
        comp_height: prompt.number(&format!("Compression height ({len})"))?,
        piston_volume: prompt.number(&format!("Piston dome (+) or dish (-) volume ({vol})"))?,
        chamber_volume: prompt.number(&format!("Chamber volume ({vol})"))?,
        rpm: prompt.number("Max RPM")?,
        cylinder_count: prompt.number("Cylinders")?,
    })
}

fn prompt_lobe<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    lobe: &str,
    units: UnitSystem,
) -> Result<LobeConfig, CliError> {
    let len = units.length_label();
    let checking = units.length_value(units.default_checking_lift());

    let max_lift = prompt.number(&format!("{lobe} lobe lift ({len})"))?;
    let checking_lift = prompt.optional_number(&format!(
        "{lobe} checking lift ({len}, blank for {checking:.3})"
    ))?;
    let duration_at_lift = prompt.number(&format!("{lobe} duration at checking lift (deg)"))?;

    // Exhaust centerlines are quoted before TDC on cam cards.
    let (centerline, centerline_btdc) = if lobe == "Exhaust" {
        (None, Some(prompt.number(&format!("{lobe} centerline (deg BTDC)"))?))
    } else {
        (Some(prompt.number(&format!("{lobe} centerline (deg ATDC)"))?), None)
    };

    let rocker_ratio = prompt.optional_number(&format!("{lobe} rocker ratio (blank for 1.0)"))?;

    Ok(LobeConfig {
        max_lift,
        duration_at_lift,
        checking_lift,
        centerline,
        centerline_btdc,
        rocker_ratio,
        valve_diameter: None,
        valve_angle: None,
        pocket_depth: None,
    })
}

/// Turns a typed name into a CSV path, adding `.csv` when no extension is given.
fn csv_file_name(name: &str) -> PathBuf {
    if name.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT_FILE);
    }
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Line-oriented console prompts.
struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn line(&mut self, label: &str) -> Result<String, CliError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_owned())
    }

    /// Asks until the answer parses.
    fn number<T: FromStr>(&mut self, label: &str) -> Result<T, CliError> {
        loop {
            let text = self.line(label)?;
            match text.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "'{text}' is not a valid number")?,
            }
        }
    }

    /// Like [`number`](Self::number), but a blank answer means no value.
    fn optional_number(&mut self, label: &str) -> Result<Option<f64>, CliError> {
        loop {
            let text = self.line(label)?;
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "'{text}' is not a valid number")?,
            }
        }
    }

    fn confirm(&mut self, label: &str) -> Result<bool, CliError> {
        let answer = self.line(label)?.to_ascii_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use clap::CommandFactory;

    const METRIC_ENGINE: &str = "100\n90\n150\n229\n1\n34\n0\n70\n6000\n4\n";

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_arguments() {
        let cli = Cli::parse_from([
            "piston-motion",
            "run",
            "engine.yaml",
            "-o",
            "out.csv",
            "--precision",
            "3",
        ]);
        match cli.command {
            Commands::Run {
                config,
                output,
                precision,
            } => {
                assert_eq!(config, PathBuf::from("engine.yaml"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(precision, 3);
            }
            _ => panic!("expected run"),
        }
    }

    fn engine_config() -> EngineConfig {
        prompt_engine(&mut prompt(METRIC_ENGINE), UnitSystem::Metric).unwrap()
    }

    #[test]
    fn reads_engine_values_in_order() {
        let mut prompt = prompt(METRIC_ENGINE);

        let engine = prompt_engine(&mut prompt, UnitSystem::Metric).unwrap();

        assert_eq!(engine.bore, 100.0);
        assert_eq!(engine.deck_height, 229.0);
        assert_eq!(engine.chamber_volume, 70.0);
        assert_eq!(engine.rpm, 6000.0);
        assert_eq!(engine.cylinder_count, 4);
    }

    #[test]
    fn labels_follow_unit_system() {
        let mut prompt = prompt(METRIC_ENGINE);
        prompt_engine(&mut prompt, UnitSystem::Imperial).unwrap();

        let asked = String::from_utf8(prompt.output).unwrap();
        assert!(asked.starts_with("Bore (in): "));
        assert!(asked.contains("Chamber volume (ci): "));
    }

    #[test]
    fn reasks_until_number_parses() {
        let mut prompt = prompt("ninety\n\n90\n");

        let stroke: f64 = prompt.number("Stroke").unwrap();

        assert_eq!(stroke, 90.0);
        let asked = String::from_utf8(prompt.output).unwrap();
        assert_eq!(asked.matches("Stroke: ").count(), 3);
        assert!(asked.contains("'ninety' is not a valid number"));
    }

    #[test]
    fn closed_input_stops_prompting() {
        let mut prompt = prompt("100\n");
        assert!(matches!(
            prompt_engine(&mut prompt, UnitSystem::Metric),
            Err(CliError::InputClosed)
        ));
    }

    #[test]
    fn full_run_with_cams() {
        let input = format!(
            "build\n{METRIC_ENGINE}y\n12\n\n220\n106\n1.5\n11.5\n1.0\n228\n114\n\n"
        );
        let mut prompt = prompt(&input);

        let (config, path) = prompt_run(&mut prompt, UnitSystem::Metric, None).unwrap();

        assert_eq!(path, PathBuf::from("build.csv"));
        let cams = config.cams.unwrap();
        assert_eq!(cams.intake.centerline, Some(106.0));
        assert_eq!(cams.intake.checking_lift, None);
        assert_eq!(cams.intake.rocker_ratio, Some(1.5));
        assert_eq!(cams.exhaust.centerline_btdc, Some(114.0));
        assert_eq!(cams.exhaust.checking_lift, Some(1.0));
        assert_eq!(cams.exhaust.rocker_ratio, None);
    }

    #[test]
    fn output_flag_skips_file_name() {
        let input = format!("{METRIC_ENGINE}n\n");
        let mut prompt = prompt(&input);

        let (config, path) =
            prompt_run(&mut prompt, UnitSystem::Metric, Some(Path::new("given.csv"))).unwrap();

        assert_eq!(path, PathBuf::from("given.csv"));
        assert!(config.cams.is_none());
    }

    #[test]
    fn session_repeats_until_input_closes() {
        let input = format!("first\n{METRIC_ENGINE}n\ny\nsecond\n{METRIC_ENGINE}n\ny\n");
        let mut prompt = prompt(&input);
        let mut paths = Vec::new();

        interactive_session(&mut prompt, UnitSystem::Metric, None, |_, path| {
            paths.push(path.to_path_buf());
            Ok(())
        })
        .unwrap();

        assert_eq!(paths, vec![PathBuf::from("first.csv"), PathBuf::from("second.csv")]);
        let asked = String::from_utf8(prompt.output).unwrap();
        assert_eq!(asked.matches("Run another calculation? [y/N]: ").count(), 2);
    }

    #[test]
    fn session_stops_when_declined() {
        let input = format!("{METRIC_ENGINE}n\nn\n{METRIC_ENGINE}n\n");
        let mut prompt = prompt(&input);
        let output = Some(Path::new("given.csv"));
        let mut runs = 0;

        interactive_session(&mut prompt, UnitSystem::Metric, output, |_, _| {
            runs += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(runs, 1);
    }

    #[test]
    fn session_asks_again_after_rejected_run() {
        let input = format!("{METRIC_ENGINE}n\n{METRIC_ENGINE}n\nn\n");
        let mut prompt = prompt(&input);
        let output = Some(Path::new("given.csv"));
        let mut runs = 0;

        interactive_session(&mut prompt, UnitSystem::Metric, output, |_, _| {
            runs += 1;
            if runs == 1 {
                Err(CliError::from(ParameterError::Invalid {
                    field: "rpm",
                    source: piston_motion::support::constraint::ConstraintError::Zero,
                }))
            } else {
                Ok(())
            }
        })
        .unwrap();

        assert_eq!(runs, 2);
    }

    #[test]
    fn session_closed_before_any_run_is_an_error() {
        let mut prompt = prompt("100\n");

        let outcome = interactive_session(&mut prompt, UnitSystem::Metric, None, |_, _| Ok(()));

        assert!(matches!(outcome, Err(CliError::InputClosed)));
    }

    #[test]
    fn check_counts_warnings_without_repeating_them() {
        let mut config = RunConfig {
            units: UnitSystem::Metric,
            engine: engine_config(),
            cams: None,
            output: None,
        };
        config.engine.rod_length = 80.0;

        let report = check_report(&config).unwrap();

        assert!(report.starts_with("✓ Run file is valid (1 warning)\n"));
        assert!(!report.contains("shorter"));
        assert!(report.contains("no cam specification"));
        assert!(report.ends_with("Compression ratio: 10.08:1"));
    }

    #[test]
    fn check_of_clean_run_has_no_warning_count() {
        let config = RunConfig {
            units: UnitSystem::Metric,
            engine: engine_config(),
            cams: None,
            output: None,
        };

        let report = check_report(&config).unwrap();

        assert!(report.starts_with("✓ Run file is valid\n"));
    }

    #[test]
    fn file_names_get_csv_extension() {
        assert_eq!(csv_file_name("run1"), PathBuf::from("run1.csv"));
        assert_eq!(csv_file_name("run1.txt"), PathBuf::from("run1.txt"));
        assert_eq!(csv_file_name(""), PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn error_chain_includes_sources() {
        let error = CliError::from(ParameterError::Invalid {
            field: "stroke",
            source: piston_motion::support::constraint::ConstraintError::Zero,
        });
        assert_eq!(
            error_chain(&error),
            "engine parameters rejected: invalid stroke: value must not be zero"
        );
    }
}
