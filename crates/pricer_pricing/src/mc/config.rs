//! Monte Carlo simulation configuration.
//!
//! [`McParams`] selects the uniform generator, the path discretisation and
//! the variance-reduction technique of a run. Its wire format is a string
//! mapping:
//!
//! | Key | Values | Required |
//! |-----|--------|----------|
//! | `URNGTYPE` | `MINSTDRAND`, `MT19937`, `RANLUX3`, `RANLUX4`, `SOBOL` | yes |
//! | `PATHGENTYPE` | `EULER` | yes |
//! | `CONTROLVARTYPE` | `NONE`, `ANTITHETIC` | no, defaults to `NONE` |
//! | `SEED` | unsigned 32-bit integer | no, defaults to the engine's seed |
//!
//! Values are trimmed and matched case-insensitively. Unknown keys and
//! unknown values are rejected.

use super::error::ConfigError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Uniform generator key.
pub const KEY_URNGTYPE: &str = "URNGTYPE";
/// Path generator key.
pub const KEY_PATHGENTYPE: &str = "PATHGENTYPE";
/// Variance-reduction key.
pub const KEY_CONTROLVARTYPE: &str = "CONTROLVARTYPE";
/// Seed key.
pub const KEY_SEED: &str = "SEED";

macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $key:expr, { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Wire-format name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ConfigError::InvalidValue {
                        key: $key.to_string(),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

config_enum!(
    /// Uniform random number generator kind.
    UrngType, KEY_URNGTYPE, {
        /// Park-Miller minimal standard LCG
        MinStdRand => "MINSTDRAND",
        /// 32-bit Mersenne Twister
        Mt19937 => "MT19937",
        /// RANLUX, 24-bit (luxury level 3)
        Ranlux3 => "RANLUX3",
        /// RANLUX, 48-bit (luxury level 4)
        Ranlux4 => "RANLUX4",
        /// Sobol quasi-random sequence
        Sobol => "SOBOL",
    }
);

config_enum!(
    /// Path discretisation scheme.
    PathGenType, KEY_PATHGENTYPE, {
        /// Log-Euler scheme on the fixing grid
        Euler => "EULER",
    }
);

config_enum!(
    /// Variance-reduction technique.
    ControlVarType, KEY_CONTROLVARTYPE, {
        /// Plain Monte Carlo
        None => "NONE",
        /// Antithetic pairs
        Antithetic => "ANTITHETIC",
    }
);

/// Monte Carlo run configuration.
///
/// Immutable once built. Use [`McParams::builder`] in code or parse the
/// string mapping with `TryFrom`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{ControlVarType, McParams, UrngType};
/// use std::collections::BTreeMap;
///
/// let params = McParams::builder()
///     .urng_type(UrngType::Sobol)
///     .control_var_type(ControlVarType::Antithetic)
///     .build();
/// assert_eq!(params.urng_type(), UrngType::Sobol);
///
/// let mut map = BTreeMap::new();
/// map.insert("URNGTYPE".to_string(), " sobol ".to_string());
/// map.insert("PATHGENTYPE".to_string(), "Euler".to_string());
/// map.insert("CONTROLVARTYPE".to_string(), "antithetic".to_string());
/// assert_eq!(McParams::try_from(map).unwrap(), params);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "BTreeMap<String, String>",
        into = "BTreeMap<String, String>"
    )
)]
pub struct McParams {
    urng_type: UrngType,
    path_gen_type: PathGenType,
    control_var_type: ControlVarType,
    seed: Option<u32>,
}

impl McParams {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> McParamsBuilder {
        McParamsBuilder::default()
    }

    /// Uniform generator kind.
    #[inline]
    pub fn urng_type(&self) -> UrngType {
        self.urng_type
    }

    /// Path discretisation scheme.
    #[inline]
    pub fn path_gen_type(&self) -> PathGenType {
        self.path_gen_type
    }

    /// Variance-reduction technique.
    #[inline]
    pub fn control_var_type(&self) -> ControlVarType {
        self.control_var_type
    }

    /// Seed override, if any.
    #[inline]
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Whether antithetic pairs are simulated.
    #[inline]
    pub fn is_antithetic(&self) -> bool {
        self.control_var_type == ControlVarType::Antithetic
    }

    /// Wire-format mapping.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_URNGTYPE.to_string(), self.urng_type.to_string());
        map.insert(KEY_PATHGENTYPE.to_string(), self.path_gen_type.to_string());
        map.insert(
            KEY_CONTROLVARTYPE.to_string(),
            self.control_var_type.to_string(),
        );
        if let Some(seed) = self.seed {
            map.insert(KEY_SEED.to_string(), seed.to_string());
        }
        map
    }
}

impl Default for McParams {
    fn default() -> Self {
        McParamsBuilder::default().build()
    }
}

impl TryFrom<BTreeMap<String, String>> for McParams {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if let Some(key) = map.keys().find(|k| {
            ![KEY_URNGTYPE, KEY_PATHGENTYPE, KEY_CONTROLVARTYPE, KEY_SEED].contains(&k.as_str())
        }) {
            return Err(ConfigError::UnknownKey(key.clone()));
        }

        let urng_type = map
            .get(KEY_URNGTYPE)
            .ok_or(ConfigError::MissingKey(KEY_URNGTYPE))?
            .parse()?;
        let path_gen_type = map
            .get(KEY_PATHGENTYPE)
            .ok_or(ConfigError::MissingKey(KEY_PATHGENTYPE))?
            .parse()?;
        let control_var_type = match map.get(KEY_CONTROLVARTYPE) {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => ControlVarType::None,
        };
        let seed = match map.get(KEY_SEED) {
            Some(v) if !v.trim().is_empty() => {
                Some(v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: KEY_SEED.to_string(),
                    value: v.clone(),
                })?)
            }
            _ => None,
        };

        Ok(Self {
            urng_type,
            path_gen_type,
            control_var_type,
            seed,
        })
    }
}

impl From<McParams> for BTreeMap<String, String> {
    fn from(params: McParams) -> Self {
        params.to_map()
    }
}

/// Builder for [`McParams`].
///
/// Defaults: `MT19937`, `EULER`, `NONE`, engine default seed.
#[derive(Clone, Debug)]
pub struct McParamsBuilder {
    urng_type: UrngType,
    path_gen_type: PathGenType,
    control_var_type: ControlVarType,
    seed: Option<u32>,
}

impl Default for McParamsBuilder {
    fn default() -> Self {
        Self {
            urng_type: UrngType::Mt19937,
            path_gen_type: PathGenType::Euler,
            control_var_type: ControlVarType::None,
            seed: None,
        }
    }
}

impl McParamsBuilder {
    /// Sets the uniform generator kind.
    #[inline]
    pub fn urng_type(mut self, urng_type: UrngType) -> Self {
        self.urng_type = urng_type;
        self
    }

    /// Sets the path discretisation scheme.
    #[inline]
    pub fn path_gen_type(mut self, path_gen_type: PathGenType) -> Self {
        self.path_gen_type = path_gen_type;
        self
    }

    /// Sets the variance-reduction technique.
    #[inline]
    pub fn control_var_type(mut self, control_var_type: ControlVarType) -> Self {
        self.control_var_type = control_var_type;
        self
    }

    /// Sets the generator seed.
    #[inline]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> McParams {
        McParams {
            urng_type: self.urng_type,
            path_gen_type: self.path_gen_type,
            control_var_type: self.control_var_type,
            seed: self.seed,
        }
    }
}
