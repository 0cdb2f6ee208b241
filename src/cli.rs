//! The command line interface for the calculator.
use crate::log;
use crate::parameters::{Parameter, ScenarioParameters};
use crate::settings::Settings;
use crate::store::CalculatorState;
use crate::view::{explore, field_names, write_view};
use ::log::info;
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the calculator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// A new value for one of the inputs, given on the command line as `NAME=VALUE`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The input to change
    pub param: Parameter,
    /// The new value, as typed
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected NAME=VALUE, got \"{s}\""))?;
        let name = name.trim();
        let param = Parameter::from_str(name).map_err(|_| {
            format!(
                "Unknown input \"{name}\". Valid inputs are: {}",
                field_names()
            )
        })?;

        Ok(Self {
            param,
            value: value.trim().to_string(),
        })
    }
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Change an input from the value in the scenario file (e.g. `price_increase=8`)
    #[arg(
        short = 's',
        long = "set",
        value_name = "NAME=VALUE",
        value_parser = Assignment::from_str
    )]
    pub assignments: Vec<Assignment>,
    /// Maximum length of the chart bars, in characters
    #[arg(long)]
    pub chart_width: Option<usize>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Calculate and show the results for a scenario file.
    Run {
        /// Path to the scenario file. Default inputs are used if omitted.
        scenario_file: Option<PathBuf>,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Change inputs interactively and see the results update.
    Explore {
        /// Path to the scenario file. Default inputs are used if omitted.
        scenario_file: Option<PathBuf>,
        /// Maximum length of the chart bars, in characters
        #[arg(long)]
        chart_width: Option<usize>,
    },
    /// Manage example scenarios.
    Example {
        /// The available subcommands for managing example scenarios.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
    /// Write a documented scenario file with the default inputs to the console.
    Parameters,
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run {
                scenario_file,
                opts,
            } => handle_run_command(scenario_file.as_deref(), &opts, None),
            Self::Explore {
                scenario_file,
                chart_width,
            } => handle_explore_command(scenario_file.as_deref(), chart_width, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
            Self::Parameters => handle_parameters_command(),
        }
    }
}

/// Parse CLI arguments and start the calculator
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ opdays --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided, and initialise the program logger
fn init_program(settings: Option<Settings>) -> Result<Settings> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(Some(settings.log_level.as_str())).context("Failed to initialise logging.")?;

    Ok(settings)
}

/// Load the inputs from a scenario file, or use the defaults if no file is given
pub fn load_parameters(scenario_file: Option<&Path>) -> Result<ScenarioParameters> {
    let Some(scenario_file) = scenario_file else {
        info!("No scenario file given; using default inputs");
        return Ok(ScenarioParameters::default());
    };

    let params = ScenarioParameters::from_path(scenario_file)?;
    info!("Loaded scenario from {}", scenario_file.display());

    Ok(params)
}

/// Calculate the results for a scenario and write the calculator view to `out`.
///
/// Assignments are applied in order, each one updating the results as it is applied.
pub fn run_calculator<W: Write>(
    scenario_file: Option<&Path>,
    assignments: &[Assignment],
    chart_width: usize,
    out: &mut W,
) -> Result<CalculatorState> {
    let params = load_parameters(scenario_file).context("Failed to load scenario.")?;
    let mut state = CalculatorState::new(params);
    for assignment in assignments {
        state
            .set_from_str(assignment.param, &assignment.value)
            .with_context(|| format!("Could not apply --set {}", assignment.param))?;
    }

    write_view(out, &state, chart_width)?;

    Ok(state)
}

/// Handle the `run` command.
pub fn handle_run_command(
    scenario_file: Option<&Path>,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init_program(settings)?;
    let chart_width = opts.chart_width.unwrap_or(settings.chart_width);

    run_calculator(
        scenario_file,
        &opts.assignments,
        chart_width,
        &mut std::io::stdout().lock(),
    )?;

    Ok(())
}

/// Handle the `explore` command.
pub fn handle_explore_command(
    scenario_file: Option<&Path>,
    chart_width: Option<usize>,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init_program(settings)?;
    let chart_width = chart_width.unwrap_or(settings.chart_width);

    let params = load_parameters(scenario_file).context("Failed to load scenario.")?;
    let mut state = CalculatorState::new(params);
    explore(
        &mut state,
        std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        chart_width,
    )?;
    info!("Session ended");

    Ok(())
}

/// Handle the `parameters` command.
fn handle_parameters_command() -> Result<()> {
    print!("{}", ScenarioParameters::default_file_contents()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("price_increase=8", Parameter::PriceIncrease, "8")]
    #[case(" water_cost = 100 ", Parameter::WaterCost, "100")]
    #[case("base_revenue=", Parameter::BaseRevenue, "")]
    fn test_assignment_from_str(
        #[case] s: &str,
        #[case] param: Parameter,
        #[case] value: &str,
    ) {
        assert_eq!(
            Assignment::from_str(s).unwrap(),
            Assignment {
                param,
                value: value.to_string()
            }
        );
    }

    #[rstest]
    #[case("price_increase")]
    #[case("rent=100")]
    fn test_assignment_from_str_invalid(#[case] s: &str) {
        assert!(Assignment::from_str(s).is_err());
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "opdays",
            "run",
            "scenario.toml",
            "--set",
            "additional_days=2",
            "-s",
            "tax_rate=21",
        ])
        .unwrap();
        let Some(Commands::Run {
            scenario_file,
            opts,
        }) = cli.command
        else {
            panic!("Expected run command");
        };
        assert_eq!(scenario_file, Some(PathBuf::from("scenario.toml")));
        assert_eq!(opts.assignments.len(), 2);
        assert_eq!(opts.assignments[1].param, Parameter::TaxRate);
    }
}
