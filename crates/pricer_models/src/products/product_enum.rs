//! Static dispatch over all contract variants.

use super::error::ProductError;
use super::schedule::Schedule;
use super::traits::Product;
use super::{AsianBasketCallPut, BermudanCallPut, DigitalCallPut, EuropeanCallPut, WorstOfDigitalCallPut};
use pricer_core::math::PathMatrix;

/// Enum wrapping every contract variant.
///
/// Pricers are generic over [`Product`]; this enum lets service code hold any
/// contract without trait objects.
///
/// # Examples
/// ```
/// use pricer_models::products::{EuropeanCallPut, PayoffType, Product, ProductEnum};
///
/// let p: ProductEnum = EuropeanCallPut::new(PayoffType::Call, 100.0, 1.0).unwrap().into();
/// assert_eq!(p.type_name(), "EuropeanCallPut");
/// assert!(p.supports_path_eval());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ProductEnum {
    /// European call/put
    European(EuropeanCallPut),
    /// European digital call/put
    Digital(DigitalCallPut),
    /// Worst-of basket digital
    WorstOfDigital(WorstOfDigitalCallPut),
    /// Asian basket call/put
    AsianBasket(AsianBasketCallPut),
    /// Bermudan or American call/put
    Bermudan(BermudanCallPut),
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $e:expr) => {
        match $self {
            ProductEnum::European($p) => $e,
            ProductEnum::Digital($p) => $e,
            ProductEnum::WorstOfDigital($p) => $e,
            ProductEnum::AsianBasket($p) => $e,
            ProductEnum::Bermudan($p) => $e,
        }
    };
}

impl Product for ProductEnum {
    fn type_name(&self) -> &'static str {
        dispatch!(self, p => p.type_name())
    }

    fn schedule(&self) -> &Schedule {
        dispatch!(self, p => p.schedule())
    }

    fn pay_amounts(&self) -> &[f64] {
        dispatch!(self, p => p.pay_amounts())
    }

    fn n_assets(&self) -> usize {
        dispatch!(self, p => p.n_assets())
    }

    fn supports_path_eval(&self) -> bool {
        dispatch!(self, p => p.supports_path_eval())
    }

    fn supports_step_eval(&self) -> bool {
        dispatch!(self, p => p.supports_step_eval())
    }

    fn eval_path(&mut self, path: &PathMatrix) -> Result<(), ProductError> {
        dispatch!(self, p => p.eval_path(path))
    }

    fn intrinsic(&self, idx: usize, spots: &[f64]) -> Result<f64, ProductError> {
        dispatch!(self, p => p.intrinsic(idx, spots))
    }

    fn eval_step(
        &mut self,
        idx: usize,
        spots: &[f64],
        cont_value: f64,
    ) -> Result<f64, ProductError> {
        dispatch!(self, p => p.eval_step(idx, spots, cont_value))
    }
}

impl From<EuropeanCallPut> for ProductEnum {
    fn from(p: EuropeanCallPut) -> Self {
        ProductEnum::European(p)
    }
}

impl From<DigitalCallPut> for ProductEnum {
    fn from(p: DigitalCallPut) -> Self {
        ProductEnum::Digital(p)
    }
}

impl From<WorstOfDigitalCallPut> for ProductEnum {
    fn from(p: WorstOfDigitalCallPut) -> Self {
        ProductEnum::WorstOfDigital(p)
    }
}

impl From<AsianBasketCallPut> for ProductEnum {
    fn from(p: AsianBasketCallPut) -> Self {
        ProductEnum::AsianBasket(p)
    }
}

impl From<BermudanCallPut> for ProductEnum {
    fn from(p: BermudanCallPut) -> Self {
        ProductEnum::Bermudan(p)
    }
}
