//! Presentation of the calculator: input fields, profit summaries and the results chart.
use crate::chart::ChartData;
use crate::format::format_ars;
use crate::parameters::{Parameter, ParameterGroup};
use crate::store::CalculatorState;
use anyhow::Result;
use itertools::Itertools;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// The title shown at the top of the calculator
const TITLE: &str = "Operating Days Financial Calculator";

/// Prompt shown while waiting for input in an interactive session
const PROMPT: &str = "> ";

const EXPLORE_HELP: &str = "Commands:
  set <field> <value>   Change an input (also: <field> = <value>)
  show                  Show all inputs and results
  fields                List the input fields
  help                  Show this message
  quit                  End the session";

/// Write the input fields, grouped as they appear on screen
pub fn write_inputs<W: Write>(out: &mut W, state: &CalculatorState) -> Result<()> {
    let label_width = Parameter::iter()
        .map(|param| param.label().chars().count())
        .max()
        .unwrap_or_default();

    for group in ParameterGroup::iter() {
        writeln!(out, "{group}")?;
        for param in Parameter::iter().filter(|param| param.group() == group) {
            writeln!(
                out,
                "  {:<label_width$}  {}",
                param.label(),
                state.value(param)
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write the monthly profit for each scenario
pub fn write_summary<W: Write>(out: &mut W, state: &CalculatorState) -> Result<()> {
    writeln!(out, "Monthly Results")?;
    for (scenario, result) in state.results().iter() {
        writeln!(out, "  {scenario}: {}", format_ars(result.profit))?;
    }

    Ok(())
}

/// Write the results chart
pub fn write_chart<W: Write>(
    out: &mut W,
    state: &CalculatorState,
    chart_width: usize,
) -> Result<()> {
    let chart = ChartData::from_results(state.results());
    write!(out, "{}", chart.render(chart_width))?;

    Ok(())
}

/// Write the whole calculator view: title, inputs, profit summary and chart
pub fn write_view<W: Write>(
    out: &mut W,
    state: &CalculatorState,
    chart_width: usize,
) -> Result<()> {
    writeln!(out, "{TITLE}\n")?;
    write_inputs(out, state)?;
    write_summary(out, state)?;
    writeln!(out)?;
    write_chart(out, state, chart_width)
}

/// A command entered during an interactive session
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Set(Parameter, &'a str),
    Show,
    Fields,
    Help,
    Quit,
    Empty,
}

impl<'a> Command<'a> {
    /// Parse a line of user input
    fn parse(line: &'a str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if word == "set" {
            let rest = rest.trim();
            let (field, value) = rest
                .split_once('=')
                .or_else(|| rest.split_once(char::is_whitespace))
                .unwrap_or((rest, ""));
            return Self::parse_set(field, value);
        }

        if let Some((field, value)) = line.split_once('=') {
            return Self::parse_set(field, value);
        }

        match word {
            "show" => Ok(Self::Show),
            "fields" => Ok(Self::Fields),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            unknown => anyhow::bail!("Unknown command \"{unknown}\". Type \"help\" for help."),
        }
    }

    fn parse_set(field: &str, value: &'a str) -> Result<Self> {
        let field = field.trim();
        let param = Parameter::from_str(field).map_err(|_| {
            anyhow::anyhow!("Unknown field \"{field}\". Type \"fields\" for a list.")
        })?;

        Ok(Self::Set(param, value.trim()))
    }
}

/// Run an interactive session, reading commands from `input` and writing to `out`.
///
/// Every change to an input is followed immediately by the updated results. Invalid commands are
/// reported and the session carries on. The session ends on `quit` or at the end of the input.
pub fn explore<R: BufRead, W: Write>(
    state: &mut CalculatorState,
    input: R,
    out: &mut W,
    chart_width: usize,
) -> Result<()> {
    write_view(out, state, chart_width)?;
    writeln!(out, "\nType \"help\" for a list of commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Set(param, value) => match state.set_from_str(param, value) {
                Ok(()) => {
                    write_summary(out, state)?;
                    writeln!(out)?;
                    write_chart(out, state, chart_width)?;
                }
                Err(err) => writeln!(out, "{err:#}")?,
            },
            Command::Show => write_view(out, state, chart_width)?,
            Command::Fields => {
                for param in Parameter::iter() {
                    writeln!(out, "  {:<22} {}", param.to_string(), param.label())?;
                }
            }
            Command::Help => writeln!(out, "{EXPLORE_HELP}")?,
            Command::Quit => break,
            Command::Empty => {}
        }
    }

    Ok(())
}

/// The names of all input fields, separated by commas
pub fn field_names() -> String {
    Parameter::iter().join(", ")
}
