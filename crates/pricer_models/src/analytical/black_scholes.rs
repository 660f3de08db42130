//! Black-Scholes prices and Greeks for European and digital options.
//!
//! ## Mathematical Formulas
//!
//! With forward F = S·e^((r-q)T) and φ = +1 (call) / -1 (put):
//!
//! **European**: V = φ·e^(-rT)·(F·N(φd₁) - K·N(φd₂))
//! **Digital**: V = e^(-rT)·N(φd₂)
//!
//! Where:
//! - d₁ = ln(F/K) / (σ√T) + σ√T/2
//! - d₂ = d₁ - σ√T
//!
//! Theta is the derivative with respect to calendar time (the negative of
//! the derivative with respect to T).

use super::error::AnalyticalError;
use crate::products::PayoffType;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};

/// Below this total volatility σ√T (or time) the limiting values are used.
const EPSILON: f64 = 1e-12;

/// Price and first-order sensitivities of an option.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Present value
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t (calendar time)
    pub theta: f64,
    /// ∂V/∂σ
    pub vega: f64,
}

/// Forward price `S·e^((r-q)T)`.
///
/// # Errors
/// - `InvalidSpot` if spot is negative or not finite
/// - `InvalidExpiry` if the time to expiry is negative or not finite
///
/// # Examples
/// ```
/// use pricer_models::analytical::fwd_price;
///
/// let f = fwd_price(100.0, 1.0, 0.05, 0.02).unwrap();
/// assert!((f - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
/// ```
pub fn fwd_price(
    spot: f64,
    time_to_exp: f64,
    int_rate: f64,
    div_yield: f64,
) -> Result<f64, AnalyticalError> {
    if !(spot >= 0.0 && spot.is_finite()) {
        return Err(AnalyticalError::InvalidSpot { spot });
    }
    check_expiry(time_to_exp)?;
    Ok(spot * ((int_rate - div_yield) * time_to_exp).exp())
}

fn check_expiry(time_to_exp: f64) -> Result<(), AnalyticalError> {
    if !(time_to_exp >= 0.0 && time_to_exp.is_finite()) {
        return Err(AnalyticalError::InvalidExpiry { time_to_exp });
    }
    Ok(())
}

fn check_common(spot: f64, time_to_exp: f64, volatility: f64) -> Result<(), AnalyticalError> {
    if !(spot > 0.0 && spot.is_finite()) {
        return Err(AnalyticalError::InvalidSpot { spot });
    }
    check_expiry(time_to_exp)?;
    if !(volatility >= 0.0 && volatility.is_finite()) {
        return Err(AnalyticalError::InvalidVolatility { volatility });
    }
    Ok(())
}

/// Price and Greeks of a European call/put.
///
/// # Arguments
/// * `payoff` - Call or put
/// * `spot` - Spot price (> 0)
/// * `strike` - Strike (≥ 0)
/// * `time_to_exp` - Time to expiry in years (≥ 0)
/// * `int_rate` - Continuously compounded interest rate
/// * `div_yield` - Continuous dividend yield
/// * `volatility` - Lognormal volatility (≥ 0)
///
/// # Examples
/// ```
/// use pricer_models::analytical::european_option_bs;
/// use pricer_models::products::PayoffType;
///
/// let g = european_option_bs(PayoffType::Call, 100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// assert!((g.price - 10.450583572185565).abs() < 1e-8);
/// ```
pub fn european_option_bs(
    payoff: PayoffType,
    spot: f64,
    strike: f64,
    time_to_exp: f64,
    int_rate: f64,
    div_yield: f64,
    volatility: f64,
) -> Result<Greeks, AnalyticalError> {
    check_common(spot, time_to_exp, volatility)?;
    if !(strike >= 0.0 && strike.is_finite()) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }

    let phi = payoff.phi();
    let fwd = fwd_price(spot, time_to_exp, int_rate, div_yield)?;
    let df = (-int_rate * time_to_exp).exp();
    let qf = (-div_yield * time_to_exp).exp();
    let sqrt_t = time_to_exp.sqrt();
    let sig_t = volatility * sqrt_t;

    if sig_t < EPSILON {
        let in_the_money = phi * (fwd - strike) > 0.0;
        let price = df * payoff.intrinsic(fwd, strike);
        let (delta, theta) = if in_the_money {
            let theta = if time_to_exp < EPSILON {
                0.0
            } else {
                phi * (div_yield * qf * spot - int_rate * df * strike)
            };
            (phi * qf, theta)
        } else {
            (0.0, 0.0)
        };
        return Ok(Greeks {
            price,
            delta,
            gamma: 0.0,
            theta,
            vega: 0.0,
        });
    }

    let d1 = (fwd / strike).ln() / sig_t + 0.5 * sig_t;
    let d2 = d1 - sig_t;
    let nd1 = norm_cdf(phi * d1);
    let nd2 = norm_cdf(phi * d2);
    let npd1 = norm_pdf(d1);

    let price = phi * df * (fwd * nd1 - strike * nd2);
    let delta = phi * qf * nd1;
    let gamma = qf * npd1 / (spot * sig_t);
    let theta = -qf * npd1 * spot * volatility / (2.0 * sqrt_t)
        + phi * div_yield * qf * spot * nd1
        - phi * int_rate * df * strike * nd2;
    let vega = qf * sqrt_t * spot * npd1;

    Ok(Greeks {
        price,
        delta,
        gamma,
        theta,
        vega,
    })
}

/// Price and Greeks of a cash-or-nothing digital call/put paying 1.
///
/// The call pays when the terminal spot is at or above the strike, the put
/// when it is strictly below.
///
/// # Examples
/// ```
/// use pricer_models::analytical::digital_option_bs;
/// use pricer_models::products::PayoffType;
///
/// let call = digital_option_bs(PayoffType::Call, 100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let put = digital_option_bs(PayoffType::Put, 100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// assert!((call.price + put.price - (-0.05_f64).exp()).abs() < 1e-12);
/// ```
pub fn digital_option_bs(
    payoff: PayoffType,
    spot: f64,
    strike: f64,
    time_to_exp: f64,
    int_rate: f64,
    div_yield: f64,
    volatility: f64,
) -> Result<Greeks, AnalyticalError> {
    check_common(spot, time_to_exp, volatility)?;
    if !(strike > 0.0 && strike.is_finite()) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }

    let phi = payoff.phi();
    let fwd = fwd_price(spot, time_to_exp, int_rate, div_yield)?;
    let df = (-int_rate * time_to_exp).exp();
    let sig_t = volatility * time_to_exp.sqrt();

    if sig_t < EPSILON {
        let price = df * payoff.digital(fwd, strike);
        let theta = if time_to_exp < EPSILON {
            0.0
        } else {
            int_rate * price
        };
        return Ok(Greeks {
            price,
            delta: 0.0,
            gamma: 0.0,
            theta,
            vega: 0.0,
        });
    }

    let log_moneyness = (fwd / strike).ln();
    let d1 = log_moneyness / sig_t + 0.5 * sig_t;
    let d2 = d1 - sig_t;
    let npd2 = norm_pdf(d2);
    let drift = int_rate - div_yield - 0.5 * volatility * volatility;

    let price = df * norm_cdf(phi * d2);
    let delta = phi * df * npd2 / (spot * sig_t);
    let gamma = -phi * df * d1 * npd2 / (spot * spot * sig_t * sig_t);
    let theta = int_rate * price
        + phi * df * npd2 * ((spot / strike).ln() / time_to_exp - drift) / (2.0 * sig_t);
    let vega = -phi * df * npd2 * d1 / volatility;

    Ok(Greeks {
        price,
        delta,
        gamma,
        theta,
        vega,
    })
}
