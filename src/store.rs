//! The calculator state: the current inputs and the results derived from them.
use crate::input::parse_field;
use crate::parameters::{Parameter, ScenarioParameters, check_price_increase};
use crate::scenario::{ScenarioResults, calculate_scenarios};
use crate::units::{Headcount, Money, MoneyPerEmployee, Percent};
use anyhow::{Context, Result};
use log::debug;

macro_rules! define_setter {
    ($setter:ident, $field:ident, $type:ty, $param:expr) => {
        /// Set the value of the
        #[doc = concat!("`", stringify!($field), "`")]
        /// input and recalculate the results
        pub fn $setter(&mut self, value: $type) {
            self.params.$field = value;
            self.recalculate($param);
        }
    };
}

/// Holds the calculator inputs along with the results for all scenarios.
///
/// The results are recalculated every time an input changes, so they always match the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    params: ScenarioParameters,
    results: ScenarioResults,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(ScenarioParameters::default())
    }
}

impl CalculatorState {
    /// Create a new [`CalculatorState`], calculating the initial results
    pub fn new(params: ScenarioParameters) -> Self {
        let results = calculate_scenarios(&params);
        Self { params, results }
    }

    /// The current inputs
    pub fn parameters(&self) -> &ScenarioParameters {
        &self.params
    }

    /// The results for the current inputs
    pub fn results(&self) -> &ScenarioResults {
        &self.results
    }

    /// The current value of an input as a plain number
    pub fn value(&self, param: Parameter) -> f64 {
        self.params.value(param)
    }

    define_setter!(set_base_revenue, base_revenue, Money, Parameter::BaseRevenue);
    define_setter!(set_additional_days, additional_days, u32, Parameter::AdditionalDays);
    define_setter!(set_new_day_revenue, new_day_revenue, Money, Parameter::NewDayRevenue);
    define_setter!(set_new_employees, new_employees, Headcount, Parameter::NewEmployees);
    define_setter!(set_employee_cost, employee_cost, MoneyPerEmployee, Parameter::EmployeeCost);
    define_setter!(set_base_cogs_percent, base_cogs_percent, Percent, Parameter::BaseCogsPercent);
    define_setter!(set_tax_rate, tax_rate, Percent, Parameter::TaxRate);
    define_setter!(
        set_indirect_cost_percent,
        indirect_cost_percent,
        Percent,
        Parameter::IndirectCostPercent
    );
    define_setter!(set_electricity_cost, electricity_cost, Money, Parameter::ElectricityCost);
    define_setter!(set_water_cost, water_cost, Money, Parameter::WaterCost);

    /// Set the `price_increase` input and recalculate the results
    pub fn set_price_increase(&mut self, value: Percent) {
        check_price_increase(value);
        self.params.price_increase = value;
        self.recalculate(Parameter::PriceIncrease);
    }

    /// Set an input from text typed into its field.
    ///
    /// A blank field counts as zero. If the text is not a valid number, an error is returned and
    /// the state is left unchanged.
    pub fn set_from_str(&mut self, param: Parameter, raw: &str) -> Result<()> {
        let number = || -> Result<f64> {
            parse_field(raw).with_context(|| format!("Invalid value for {param}"))
        };

        match param {
            Parameter::AdditionalDays => self.set_additional_days(
                parse_field(raw).with_context(|| format!("Invalid value for {param}"))?,
            ),
            Parameter::BaseRevenue => self.set_base_revenue(Money(number()?)),
            Parameter::NewDayRevenue => self.set_new_day_revenue(Money(number()?)),
            Parameter::NewEmployees => self.set_new_employees(Headcount(number()?)),
            Parameter::EmployeeCost => self.set_employee_cost(MoneyPerEmployee(number()?)),
            Parameter::PriceIncrease => self.set_price_increase(Percent(number()?)),
            Parameter::BaseCogsPercent => self.set_base_cogs_percent(Percent(number()?)),
            Parameter::TaxRate => self.set_tax_rate(Percent(number()?)),
            Parameter::IndirectCostPercent => self.set_indirect_cost_percent(Percent(number()?)),
            Parameter::ElectricityCost => self.set_electricity_cost(Money(number()?)),
            Parameter::WaterCost => self.set_water_cost(Money(number()?)),
        }

        Ok(())
    }

    /// Replace the results with those for the current inputs
    fn recalculate(&mut self, changed: Parameter) {
        self.results = calculate_scenarios(&self.params);
        debug!(
            "Recalculated scenarios after {changed} changed to {}",
            self.params.value(changed)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_calculates_results() {
        let state = CalculatorState::default();
        assert_eq!(
            *state.results(),
            calculate_scenarios(&ScenarioParameters::default())
        );
    }

    #[test]
    fn test_setter_recalculates() {
        let mut state = CalculatorState::default();
        state.set_base_revenue(Money(10_000_000.0));
        assert_approx_eq!(Money, state.parameters().base_revenue, Money(10_000_000.0));
        assert_approx_eq!(
            Money,
            state.results().five_day.revenue,
            Money(10_500_000.0),
            epsilon = 1e-6
        );
        assert_eq!(*state.results(), calculate_scenarios(state.parameters()));
    }

    #[test]
    fn test_set_additional_days() {
        let mut state = CalculatorState::default();
        let five_day = state.results().five_day;
        let six_day_costs = state.results().six_day.costs;
        state.set_additional_days(2);
        assert_eq!(state.results().five_day, five_day);
        assert!(state.results().six_day.costs < six_day_costs);
    }

    #[test]
    fn test_set_from_str_every_parameter() {
        let mut state = CalculatorState::default();
        for param in Parameter::iter() {
            state.set_from_str(param, "3").unwrap();
            assert_approx_eq!(f64, state.value(param), 3.0);
            assert_eq!(*state.results(), calculate_scenarios(state.parameters()));
        }
    }

    #[rstest]
    #[case(Parameter::WaterCost, "", 0.0)]
    #[case(Parameter::WaterCost, "-500", -500.0)]
    #[case(Parameter::PriceIncrease, "-100", -100.0)]
    #[case(Parameter::AdditionalDays, "  ", 0.0)]
    fn test_set_from_str_accepts(
        #[case] param: Parameter,
        #[case] raw: &str,
        #[case] expected: f64,
    ) {
        let mut state = CalculatorState::default();
        state.set_from_str(param, raw).unwrap();
        assert_approx_eq!(f64, state.value(param), expected);
    }

    #[rstest]
    #[case(Parameter::BaseRevenue, "lots")]
    #[case(Parameter::AdditionalDays, "1.5")]
    #[case(Parameter::AdditionalDays, "-1")]
    fn test_set_from_str_rejects(#[case] param: Parameter, #[case] raw: &str) {
        let mut state = CalculatorState::default();
        let err = state.set_from_str(param, raw).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid value for {param}"));
        assert_eq!(state, CalculatorState::default());
    }
}
