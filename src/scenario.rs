//! The scenario engine: projects monthly revenue, costs and profit for each number of operating
//! days.
use crate::parameters::ScenarioParameters;
use crate::units::{Dimensionless, Money, Percent};
use strum::{Display, EnumIter};

/// A number of operating days per week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Scenario {
    /// The current five-day week
    #[strum(to_string = "5 Days")]
    FiveDay,
    /// Opening on a sixth day
    #[strum(to_string = "6 Days")]
    SixDay,
    /// Opening on a sixth and seventh day
    #[strum(to_string = "7 Days")]
    SevenDay,
}

impl Scenario {
    /// Extra operating days per month compared with the five-day week
    pub fn extra_days_per_month(self) -> f64 {
        match self {
            Self::FiveDay => 0.0,
            Self::SixDay => 4.0,
            Self::SevenDay => 8.0,
        }
    }

    /// Factor applied to the five-day utility costs
    pub fn utility_multiplier(self) -> Dimensionless {
        match self {
            Self::FiveDay => Dimensionless(1.0),
            Self::SixDay => Dimensionless(1.2),
            Self::SevenDay => Dimensionless(1.4),
        }
    }

    /// The scenario which carries the cost of new employees for the given `additional_days`
    /// selector, if any.
    pub fn staffed_by(additional_days: u32) -> Option<Scenario> {
        match additional_days {
            1 => Some(Self::SixDay),
            2 => Some(Self::SevenDay),
            _ => None,
        }
    }
}

/// The projected monthly figures for one scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioResult {
    /// Monthly revenue
    pub revenue: Money,
    /// Monthly costs
    pub costs: Money,
    /// Monthly profit (always `revenue - costs`)
    pub profit: Money,
}

impl ScenarioResult {
    /// Create a new [`ScenarioResult`], deriving profit from revenue and costs
    pub fn new(revenue: Money, costs: Money) -> Self {
        Self {
            revenue,
            costs,
            profit: revenue - costs,
        }
    }
}

/// The results for all three scenarios
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioResults {
    /// Five operating days
    pub five_day: ScenarioResult,
    /// Six operating days
    pub six_day: ScenarioResult,
    /// Seven operating days
    pub seven_day: ScenarioResult,
}

impl ScenarioResults {
    /// Get the result for the specified scenario
    pub fn get(&self, scenario: Scenario) -> &ScenarioResult {
        match scenario {
            Scenario::FiveDay => &self.five_day,
            Scenario::SixDay => &self.six_day,
            Scenario::SevenDay => &self.seven_day,
        }
    }

    /// Iterate over the results in order of operating days
    pub fn iter(&self) -> std::array::IntoIter<(Scenario, &ScenarioResult), 3> {
        [
            (Scenario::FiveDay, &self.five_day),
            (Scenario::SixDay, &self.six_day),
            (Scenario::SevenDay, &self.seven_day),
        ]
        .into_iter()
    }
}

impl<'a> IntoIterator for &'a ScenarioResults {
    type Item = (Scenario, &'a ScenarioResult);
    type IntoIter = std::array::IntoIter<(Scenario, &'a ScenarioResult), 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The COGS percentage restated against post-increase prices.
///
/// The base COGS rate is relative to current prices, so it shrinks as prices rise. A price
/// increase of -100% gives a non-finite rate.
pub fn adjusted_cogs_percent(params: &ScenarioParameters) -> Percent {
    params.base_cogs_percent / params.price_increase.growth_factor()
}

/// Calculate revenue, costs and profit for the five-, six- and seven-day scenarios.
///
/// The percentage-based costs are each applied to the scenario's own revenue. Utility costs are
/// the five-day costs scaled by a fixed multiplier. The employee cost is only added to the
/// scenario selected by `additional_days`.
pub fn calculate_scenarios(params: &ScenarioParameters) -> ScenarioResults {
    let price_factor = params.price_increase.growth_factor();
    let cogs_percent = adjusted_cogs_percent(params);
    let five_day_revenue = params.base_revenue * price_factor;
    let staffed = Scenario::staffed_by(params.additional_days);

    let calculate = |scenario: Scenario| {
        let added_revenue =
            params.new_day_revenue * Dimensionless(scenario.extra_days_per_month()) * price_factor;
        let revenue = if scenario == Scenario::FiveDay {
            five_day_revenue
        } else {
            five_day_revenue + added_revenue
        };

        let utilities =
            (params.electricity_cost + params.water_cost) * scenario.utility_multiplier();
        let employees = if staffed == Some(scenario) {
            params.employee_cost * params.new_employees
        } else {
            Money(0.0)
        };

        let costs = revenue * cogs_percent.fraction()
            + revenue * params.tax_rate.fraction()
            + revenue * params.indirect_cost_percent.fraction()
            + utilities
            + employees;

        ScenarioResult::new(revenue, costs)
    };

    ScenarioResults {
        five_day: calculate(Scenario::FiveDay),
        six_day: calculate(Scenario::SixDay),
        seven_day: calculate(Scenario::SevenDay),
    }
}
