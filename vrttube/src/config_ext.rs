//! Extension to manage video platform settings in vrtconfig

use crate::client::DEFAULT_API_BASE;
use anyhow::Result;
use serde_yaml::Value;
use vrtconfig::Config;

/// Extension trait for video platform configuration in vrtconfig
///
/// # Example
///
/// ```rust,ignore
/// use vrtconfig::get_config;
/// use vrttube::TubeConfigExt;
///
/// let config = get_config();
/// let api_base = config.get_tube_api_base()?;
/// ```
pub trait TubeConfigExt {
    /// Gets the video API base URL (default: a public Invidious instance)
    fn get_tube_api_base(&self) -> Result<String>;

    /// Sets the video API base URL
    fn set_tube_api_base(&self, url: String) -> Result<()>;
}

impl TubeConfigExt for Config {
    fn get_tube_api_base(&self) -> Result<String> {
        match self.get_value(&["tube", "api_base"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_API_BASE.to_string()),
        }
    }

    fn set_tube_api_base(&self, url: String) -> Result<()> {
        self.set_value(&["tube", "api_base"], Value::String(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert!(DEFAULT_API_BASE.starts_with("https://"));
    }
}
