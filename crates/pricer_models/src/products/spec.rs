//! Serialisable contract descriptions.

use super::error::ProductError;
use super::payoff::PayoffType;
use super::{
    AsianBasketCallPut, BermudanCallPut, DigitalCallPut, EuropeanCallPut, ProductEnum,
    WorstOfDigitalCallPut,
};

/// Trade parameters for each contract variant.
///
/// This is the form contracts take at the service boundary (run files, JSON
/// requests). [`ContractSpec::build`] validates it into a [`ProductEnum`].
///
/// # Examples
/// ```
/// use pricer_models::products::{ContractSpec, PayoffType, Product};
///
/// let spec = ContractSpec::American {
///     payoff: PayoffType::Put,
///     strike: 100.0,
///     time_to_exp: 1.0,
///     n_exercise: 50,
/// };
/// let product = spec.build().unwrap();
/// assert_eq!(product.fix_times().len(), 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ContractSpec {
    /// European call/put
    European {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike
        strike: f64,
        /// Time to expiry in years
        time_to_exp: f64,
    },
    /// European digital call/put
    Digital {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike
        strike: f64,
        /// Time to expiry in years
        time_to_exp: f64,
    },
    /// Worst-of basket digital
    WorstOfDigital {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike, as a performance ratio
        strike: f64,
        /// Time of the initial fixing
        fixing_time: f64,
        /// Time of the final fixing and payment
        expiry_time: f64,
        /// Number of assets in the basket
        n_assets: usize,
    },
    /// Asian basket call/put
    AsianBasket {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike
        strike: f64,
        /// Averaging times
        fix_times: Vec<f64>,
        /// Basket weights
        weights: Vec<f64>,
    },
    /// Bermudan call/put
    Bermudan {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike
        strike: f64,
        /// Exercise times
        exercise_times: Vec<f64>,
    },
    /// American call/put on an equally spaced exercise grid
    American {
        /// Payoff direction
        payoff: PayoffType,
        /// Strike
        strike: f64,
        /// Time to expiry in years
        time_to_exp: f64,
        /// Number of exercise times
        n_exercise: usize,
    },
}

impl ContractSpec {
    /// Validate and build the contract.
    pub fn build(&self) -> Result<ProductEnum, ProductError> {
        let product = match self {
            ContractSpec::European {
                payoff,
                strike,
                time_to_exp,
            } => EuropeanCallPut::new(*payoff, *strike, *time_to_exp)?.into(),
            ContractSpec::Digital {
                payoff,
                strike,
                time_to_exp,
            } => DigitalCallPut::new(*payoff, *strike, *time_to_exp)?.into(),
            ContractSpec::WorstOfDigital {
                payoff,
                strike,
                fixing_time,
                expiry_time,
                n_assets,
            } => WorstOfDigitalCallPut::new(*payoff, *strike, *fixing_time, *expiry_time, *n_assets)?
                .into(),
            ContractSpec::AsianBasket {
                payoff,
                strike,
                fix_times,
                weights,
            } => AsianBasketCallPut::new(*payoff, *strike, fix_times.clone(), weights.clone())?
                .into(),
            ContractSpec::Bermudan {
                payoff,
                strike,
                exercise_times,
            } => BermudanCallPut::new(*payoff, *strike, exercise_times.clone())?.into(),
            ContractSpec::American {
                payoff,
                strike,
                time_to_exp,
                n_exercise,
            } => BermudanCallPut::american(*payoff, *strike, *time_to_exp, *n_exercise)?.into(),
        };
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::Product;

    #[test]
    fn test_build_each_variant() {
        let specs = [
            ContractSpec::European {
                payoff: PayoffType::Call,
                strike: 100.0,
                time_to_exp: 1.0,
            },
            ContractSpec::Digital {
                payoff: PayoffType::Put,
                strike: 100.0,
                time_to_exp: 1.0,
            },
            ContractSpec::WorstOfDigital {
                payoff: PayoffType::Call,
                strike: 1.0,
                fixing_time: 0.0,
                expiry_time: 1.0,
                n_assets: 3,
            },
            ContractSpec::AsianBasket {
                payoff: PayoffType::Call,
                strike: 100.0,
                fix_times: vec![0.5, 1.0],
                weights: vec![0.5, 0.5],
            },
            ContractSpec::Bermudan {
                payoff: PayoffType::Put,
                strike: 100.0,
                exercise_times: vec![0.5, 1.0],
            },
        ];
        let names: Vec<_> = specs
            .iter()
            .map(|s| s.build().unwrap().type_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "EuropeanCallPut",
                "DigitalCallPut",
                "WorstOfDigitalCallPut",
                "AsianBasketCallPut",
                "BermudanCallPut"
            ]
        );
    }

    #[test]
    fn test_build_propagates_errors() {
        let spec = ContractSpec::Bermudan {
            payoff: PayoffType::Put,
            strike: 100.0,
            exercise_times: vec![1.0, 0.5],
        };
        assert!(matches!(spec.build(), Err(ProductError::InvalidSchedule { .. })));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_tagged() {
        let json = r#"{"type":"european","payoff":"CALL","strike":100.0,"time_to_exp":1.0}"#;
        let spec: ContractSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec,
            ContractSpec::European {
                payoff: PayoffType::Call,
                strike: 100.0,
                time_to_exp: 1.0
            }
        );
    }
}
