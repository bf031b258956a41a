use crate::depth::DEFAULT_DEPTH_LEVELS;
use crate::error::FeatureError;
use crate::slippage::{DEFAULT_MAX_LEVELS, DEFAULT_NOTIONAL};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Call-time parameters for the feature engine.
///
/// Missing fields take their defaults when deserialized, so a partial document such
/// as `{"notional": "2500"}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Window for standalone depth and imbalance features
    pub depth_levels: usize,
    /// Reference order size in quote currency for slippage and impact
    pub notional: Decimal,
    /// Cap on levels walked when filling `notional`
    pub max_levels: usize,
}

impl FeatureConfig {
    /// Checks every window is non-empty and the reference notional is not negative.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orderbook_features::FeatureConfig;
    ///
    /// assert!(FeatureConfig::default().validate().is_ok());
    ///
    /// let config = FeatureConfig { max_levels: 0, ..FeatureConfig::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), FeatureError> {
        let windows = [
            ("depth_levels", self.depth_levels),
            ("max_levels", self.max_levels),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, levels)| *levels == 0) {
            return Err(FeatureError::InvalidConfig {
                message: format!("{name} must be at least 1"),
            });
        }

        if self.notional < Decimal::ZERO {
            return Err(FeatureError::InvalidConfig {
                message: format!("notional must not be negative, got {}", self.notional),
            });
        }

        Ok(())
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            depth_levels: DEFAULT_DEPTH_LEVELS,
            notional: DEFAULT_NOTIONAL,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }
}
