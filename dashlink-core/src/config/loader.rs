//! `board.toml` loading
//!
//! Every section and key is optional; anything left out keeps the
//! reference board's default. Example:
//!
//! ```toml
//! [i2c]
//! sda = 8
//! scl = 9
//! frequency = 400000
//!
//! [can]
//! bitrate = 250000
//!
//! [display]
//! buffer_factor = 10
//! ```

use super::{BoardConfig, ConfigError};

impl BoardConfig {
    /// Parse and validate a `board.toml` document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(source).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
