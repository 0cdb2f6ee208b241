//! Defines the `ScenarioParameters` struct, which holds the eleven inputs to the calculator.
use crate::input::{input_err_msg, read_toml};
use crate::units::{Headcount, Money, MoneyPerEmployee, Percent};
use anyhow::{Context, Result};
use documented::DocumentedFields;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

const DEFAULT_PARAMETERS_FILE_HEADER: &str = "# Inputs for the operating days calculator
# All monetary values are monthly amounts in ARS. Percentages are given as e.g. 5 for 5%.
";

/// The inputs to the scenario calculations.
///
/// Any field missing from an input file takes its default value.
#[derive(Debug, Clone, PartialEq, DocumentedFields, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioParameters {
    /// Current monthly revenue, before any price increase
    pub base_revenue: Money,
    /// Which extra day is staffed by new employees (1 = sixth day, 2 = seventh day)
    pub additional_days: u32,
    /// Revenue from one additional operating day, before any price increase
    pub new_day_revenue: Money,
    /// Number of employees hired to cover the extra days
    pub new_employees: Headcount,
    /// Monthly cost of each new employee
    pub employee_cost: MoneyPerEmployee,
    /// Price increase applied to all revenue (%)
    pub price_increase: Percent,
    /// Cost of goods sold as a percentage of revenue at current prices
    pub base_cogs_percent: Percent,
    /// Tax rate as a percentage of revenue
    pub tax_rate: Percent,
    /// Indirect costs as a percentage of revenue
    pub indirect_cost_percent: Percent,
    /// Monthly electricity cost when open five days a week
    pub electricity_cost: Money,
    /// Monthly water cost when open five days a week
    pub water_cost: Money,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            base_revenue: Money(53_400_000.0),
            additional_days: 1,
            new_day_revenue: Money(1_800_000.0),
            new_employees: Headcount(2.0),
            employee_cost: MoneyPerEmployee(1_500_000.0),
            price_increase: Percent(5.0),
            base_cogs_percent: Percent(21.2),
            tax_rate: Percent(19.7),
            indirect_cost_percent: Percent(10.0),
            electricity_cost: Money(1_500_000.0),
            water_cost: Money(222_000.0),
        }
    }
}

impl ScenarioParameters {
    /// Read scenario parameters from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the parameters file
    ///
    /// # Returns
    ///
    /// The parameters or an error if the file could not be read
    pub fn from_path<P: AsRef<Path>>(file_path: P) -> Result<ScenarioParameters> {
        let file_path = file_path.as_ref();
        let params: ScenarioParameters = read_toml(file_path)?;
        check_price_increase(params.price_increase);

        Ok(params)
    }

    /// The value of the given parameter as a plain number
    pub fn value(&self, param: Parameter) -> f64 {
        match param {
            Parameter::BaseRevenue => self.base_revenue.value(),
            Parameter::AdditionalDays => self.additional_days.into(),
            Parameter::NewDayRevenue => self.new_day_revenue.value(),
            Parameter::NewEmployees => self.new_employees.value(),
            Parameter::EmployeeCost => self.employee_cost.value(),
            Parameter::PriceIncrease => self.price_increase.value(),
            Parameter::BaseCogsPercent => self.base_cogs_percent.value(),
            Parameter::TaxRate => self.tax_rate.value(),
            Parameter::IndirectCostPercent => self.indirect_cost_percent.value(),
            Parameter::ElectricityCost => self.electricity_cost.value(),
            Parameter::WaterCost => self.water_cost.value(),
        }
    }

    /// The contents of a parameters file holding the default values, with each field documented
    pub fn default_file_contents() -> Result<String> {
        let params_raw = toml::to_string(&ScenarioParameters::default())
            .context("Could not convert parameters to TOML")?;

        let mut out = DEFAULT_PARAMETERS_FILE_HEADER.to_string();
        for line in params_raw.lines() {
            let Some(last) = line.find('=') else {
                continue;
            };

            let field = line[..last].trim();
            let docs = ScenarioParameters::get_field_docs(field)
                .ok()
                .with_context(|| format!("Missing doc comment for field {field}"))?;
            writeln!(&mut out, "\n# {}", docs.trim())?;
            writeln!(&mut out, "{}", line.trim())?;
        }

        Ok(out)
    }
}

/// Warn if the price increase makes the adjusted COGS rate undefined.
///
/// The value is still accepted: the resulting infinities propagate into the results.
pub fn check_price_increase(price_increase: Percent) {
    if price_increase <= Percent(-100.0) {
        warn!(
            "A price increase of {price_increase}% makes the adjusted COGS rate undefined; results \
            will not be finite"
        );
    }
}

/// How the input fields are grouped on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ParameterGroup {
    /// Revenue-related inputs
    #[strum(to_string = "Base Parameters")]
    Base,
    /// Cost-related inputs
    #[strum(to_string = "Cost Parameters")]
    Cost,
}

/// Identifies one of the eleven input parameters.
///
/// The string form matches the field name used in parameter files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Parameter {
    /// Current monthly revenue
    BaseRevenue,
    /// Which extra day carries the new employees' cost
    AdditionalDays,
    /// Revenue from one extra operating day
    NewDayRevenue,
    /// Number of new employees
    NewEmployees,
    /// Monthly cost per new employee
    EmployeeCost,
    /// Price increase
    PriceIncrease,
    /// COGS rate at current prices
    BaseCogsPercent,
    /// Tax rate
    TaxRate,
    /// Indirect cost rate
    IndirectCostPercent,
    /// Electricity cost
    ElectricityCost,
    /// Water cost
    WaterCost,
}

impl Parameter {
    /// The label shown next to the input field
    pub fn label(self) -> &'static str {
        match self {
            Self::BaseRevenue => "Current Monthly Revenue (ARS)",
            Self::AdditionalDays => "Staffed Extra Day (1 = 6th, 2 = 7th)",
            Self::NewDayRevenue => "New Day Revenue (ARS)",
            Self::NewEmployees => "New Employees",
            Self::EmployeeCost => "Cost per Employee (ARS)",
            Self::PriceIncrease => "Price Increase (%)",
            Self::BaseCogsPercent => "COGS (%)",
            Self::TaxRate => "Tax Rate (%)",
            Self::IndirectCostPercent => "Indirect Costs (%)",
            Self::ElectricityCost => "Electricity (ARS)",
            Self::WaterCost => "Water (ARS)",
        }
    }

    /// The group the input field is shown in
    pub fn group(self) -> ParameterGroup {
        match self {
            Self::BaseRevenue
            | Self::AdditionalDays
            | Self::NewDayRevenue
            | Self::PriceIncrease => ParameterGroup::Base,
            Self::NewEmployees
            | Self::EmployeeCost
            | Self::BaseCogsPercent
            | Self::TaxRate
            | Self::IndirectCostPercent
            | Self::ElectricityCost
            | Self::WaterCost => ParameterGroup::Cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use tempfile::tempdir;

    fn write_params_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("scenario.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            write!(file, "{contents}").unwrap();
        }
        (dir, file_path)
    }

    #[test]
    fn test_from_path_partial() {
        let (_dir, file_path) = write_params_file("base_revenue = 1000\nadditional_days = 2\n");
        let params = ScenarioParameters::from_path(&file_path).unwrap();
        assert_eq!(
            params,
            ScenarioParameters {
                base_revenue: Money(1000.0),
                additional_days: 2,
                ..ScenarioParameters::default()
            }
        );
    }

    #[test]
    fn test_from_path_empty() {
        let (_dir, file_path) = write_params_file("");
        assert_eq!(
            ScenarioParameters::from_path(&file_path).unwrap(),
            ScenarioParameters::default()
        );
    }

    #[test]
    fn test_from_path_accepts_negative_values() {
        let (_dir, file_path) = write_params_file("water_cost = -10\nprice_increase = -100\n");
        let params = ScenarioParameters::from_path(&file_path).unwrap();
        assert_approx_eq!(Money, params.water_cost, Money(-10.0));
        assert_approx_eq!(Percent, params.price_increase, Percent(-100.0));
    }

    #[rstest]
    #[case("unknown_field = 1\n")]
    #[case("base_revenue = \"lots\"\n")]
    #[case("additional_days = 1.5\n")]
    fn test_from_path_invalid(#[case] contents: &str) {
        let (_dir, file_path) = write_params_file(contents);
        let err = ScenarioParameters::from_path(&file_path).unwrap_err();
        assert_eq!(err.to_string(), input_err_msg(&file_path));
    }

    #[test]
    fn test_default_file_contents_round_trip() {
        let contents = ScenarioParameters::default_file_contents().unwrap();
        assert!(contents.contains("# Current monthly revenue, before any price increase"));
        let (_dir, file_path) = write_params_file(&contents);
        assert_eq!(
            ScenarioParameters::from_path(&file_path).unwrap(),
            ScenarioParameters::default()
        );
    }

    #[test]
    fn test_parameter_names_match_fields() {
        let params = ScenarioParameters::default();
        for param in Parameter::iter() {
            let name: &str = param.into();
            assert!(ScenarioParameters::get_field_docs(name).is_ok(), "{name}");
            assert_eq!(Parameter::from_str(name).unwrap(), param);
        }
        assert_approx_eq!(f64, params.value(Parameter::BaseRevenue), 53_400_000.0);
        assert_approx_eq!(f64, params.value(Parameter::AdditionalDays), 1.0);
        assert_approx_eq!(f64, params.value(Parameter::BaseCogsPercent), 21.2);
    }

    #[rstest]
    #[case(Parameter::BaseRevenue, ParameterGroup::Base)]
    #[case(Parameter::PriceIncrease, ParameterGroup::Base)]
    #[case(Parameter::BaseCogsPercent, ParameterGroup::Cost)]
    #[case(Parameter::WaterCost, ParameterGroup::Cost)]
    fn test_parameter_group(#[case] param: Parameter, #[case] expected: ParameterGroup) {
        assert_eq!(param.group(), expected);
    }
}
