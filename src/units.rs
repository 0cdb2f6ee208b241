//! This module defines the unit types used in scenario calculations and their conversions.
use float_cmp::{ApproxEq, F64Margin};
use serde::{Deserialize, Serialize};

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Neg,
            derive_more::Display,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn new(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Whether the underlying value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl From<f64> for $name {
            fn from(val: f64) -> Self {
                Self(val)
            }
        }

        impl From<$name> for f64 {
            fn from(val: $name) -> Self {
                val.0
            }
        }

        impl ApproxEq for $name {
            type Margin = F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                self.0.approx_eq(other.0, margin)
            }
        }
    };
}

macro_rules! impl_scale {
    ($name:ident) => {
        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name(self.0 / rhs.0)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::from(self.0 * lhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Dimensionless);
unit_struct!(Money);
unit_struct!(Percent);
unit_struct!(Headcount);

// Derived quantities
unit_struct!(MoneyPerEmployee);

impl_scale!(Money);
impl_scale!(Percent);

// Multiplication rules
impl_mul!(MoneyPerEmployee, Headcount, Money);

impl Percent {
    /// The percentage expressed as a fraction of one (e.g. 5% -> 0.05)
    pub fn fraction(self) -> Dimensionless {
        Dimensionless(self.0 / 100.0)
    }

    /// The factor by which a quantity grows when increased by this percentage (e.g. 5% -> 1.05)
    pub fn growth_factor(self) -> Dimensionless {
        Dimensionless(1.0 + self.0 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, 0.05, 1.05)]
    #[case(0.0, 0.0, 1.0)]
    #[case(-100.0, -1.0, 0.0)]
    #[case(19.7, 0.197, 1.197)]
    fn test_percent_conversions(
        #[case] percent: f64,
        #[case] fraction: f64,
        #[case] growth: f64,
    ) {
        let percent = Percent(percent);
        assert_approx_eq!(Dimensionless, percent.fraction(), Dimensionless(fraction));
        assert_approx_eq!(Dimensionless, percent.growth_factor(), Dimensionless(growth));
    }

    #[test]
    fn test_money_arithmetic() {
        let total = Money(1_500_000.0) + Money(222_000.0);
        assert_approx_eq!(Money, total, Money(1_722_000.0));
        assert_approx_eq!(
            Money,
            total * Dimensionless(1.2),
            Money(2_066_400.0),
            epsilon = 1e-6
        );
        assert_approx_eq!(Money, total - Money(22_000.0), Money(1_700_000.0));
        assert_approx_eq!(Money, -total, Money(-1_722_000.0));
    }

    #[test]
    fn test_employee_cost() {
        let cost = MoneyPerEmployee(1_500_000.0) * Headcount(2.0);
        assert_approx_eq!(Money, cost, Money(3_000_000.0));
        let cost = Headcount(3.0) * MoneyPerEmployee(1_000.0);
        assert_approx_eq!(Money, cost, Money(3_000.0));
    }

    #[test]
    fn test_percent_div() {
        let adjusted = Percent(21.2) / Percent(5.0).growth_factor();
        assert_approx_eq!(Percent, adjusted, Percent(20.190_476_190_476_19), epsilon = 1e-9);
    }
}
