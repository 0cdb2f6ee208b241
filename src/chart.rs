//! A grouped bar chart of the scenario results, drawn as text.
use crate::format::format_ars;
use crate::scenario::{Scenario, ScenarioResults};
use crate::units::Money;
use itertools::Itertools;
use std::fmt::Write;
use strum::{Display, EnumIter, IntoEnumIterator};

/// The glyph used to draw bars for negative values
const NEGATIVE_BAR_GLYPH: char = '▒';

/// One of the values plotted for each scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Series {
    /// Scenario revenue
    Revenue,
    /// Scenario costs
    Costs,
    /// Scenario profit
    #[strum(to_string = "Net Profit")]
    NetProfit,
}

impl Series {
    /// The glyph used to draw bars for positive values in this series
    fn glyph(self) -> char {
        match self {
            Self::Revenue => '█',
            Self::Costs => '▓',
            Self::NetProfit => '░',
        }
    }
}

/// The plotted values for one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    /// The scenario the values belong to
    pub scenario: Scenario,
    /// Revenue for the scenario
    pub revenue: Money,
    /// Costs for the scenario
    pub costs: Money,
    /// Profit for the scenario
    pub net_profit: Money,
}

impl ChartRow {
    /// The value of the given series for this row
    pub fn value(&self, series: Series) -> Money {
        match series {
            Series::Revenue => self.revenue,
            Series::Costs => self.costs,
            Series::NetProfit => self.net_profit,
        }
    }
}

/// The data for a grouped bar chart with one group per scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// One row per scenario, in order of operating days
    pub rows: Vec<ChartRow>,
}

impl ChartData {
    /// Build the chart data from a set of results
    pub fn from_results(results: &ScenarioResults) -> Self {
        let rows = results
            .iter()
            .map(|(scenario, result)| ChartRow {
                scenario,
                revenue: result.revenue,
                costs: result.costs,
                net_profit: result.profit,
            })
            .collect();

        Self { rows }
    }

    /// The largest finite absolute value in the chart, used to scale the bars
    fn scale(&self) -> f64 {
        self.rows
            .iter()
            .cartesian_product(Series::iter())
            .map(|(row, series)| row.value(series).value().abs())
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }

    /// Draw the chart with bars of at most `width` characters.
    ///
    /// Each bar is labelled with its formatted value. Non-finite values are drawn without a bar.
    pub fn render(&self, width: usize) -> String {
        let scale = self.scale();
        let label_width = Series::iter()
            .map(|series| series.to_string().chars().count())
            .max()
            .unwrap_or_default();

        let mut out = String::new();
        for row in &self.rows {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{}", row.scenario);
            for series in Series::iter() {
                let value = row.value(series);
                let bar = draw_bar(value, scale, width, series.glyph());
                let _ = writeln!(
                    out,
                    "  {:<label_width$} {:<width$} {}",
                    series.to_string(),
                    bar,
                    format_ars(value)
                );
            }
        }

        let legend = Series::iter()
            .map(|series| format!("{} {series}", series.glyph()))
            .join("   ");
        let _ = writeln!(out, "\n{legend}   {NEGATIVE_BAR_GLYPH} negative");

        out
    }
}

/// Draw a single bar, proportional to `value / scale`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn draw_bar(value: Money, scale: f64, width: usize, glyph: char) -> String {
    let value = value.value();
    if !value.is_finite() || scale <= 0.0 {
        return String::new();
    }

    let len = ((value.abs() / scale) * width as f64).round() as usize;
    let glyph = if value < 0.0 { NEGATIVE_BAR_GLYPH } else { glyph };

    std::iter::repeat_n(glyph, len.min(width)).collect()
}
