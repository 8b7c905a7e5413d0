//! Scheme configuration loaded from TOML.
//!
//! ```toml
//! source = "#6750a4"
//! dark = true
//! contrast = 0.5
//! spec = "2025"
//! ```
//!
//! Every key is optional. Missing keys take the same defaults as
//! [`DynamicScheme::builder`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tone_hct::Argb;
use tracing::debug;

use crate::error::{Result, SchemeError};
use crate::scheme::DynamicScheme;
use crate::spec::SpecVersion;

/// Parameters for one scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// Seed color as `#RRGGBB` or `#RGB`
    #[serde(default = "default_source")]
    pub source: String,

    /// Dark mode (default: false)
    #[serde(default)]
    pub dark: bool,

    /// Contrast level in [-1, 1] (default: 0)
    #[serde(default)]
    pub contrast: f64,

    /// Rule version, "2021" or "2025" (default: "2021")
    #[serde(default)]
    pub spec: SpecVersion,
}

fn default_source() -> String {
    "#6750a4".to_string()
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            dark: false,
            contrast: 0.0,
            spec: SpecVersion::default(),
        }
    }
}

impl SchemeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SchemeError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded scheme config");
        Ok(config)
    }

    pub fn source_color(&self) -> Result<Argb> {
        Argb::hex(&self.source).ok_or_else(|| SchemeError::InvalidColor(self.source.clone()))
    }

    pub fn build(&self) -> Result<DynamicScheme> {
        DynamicScheme::builder(self.source_color()?)
            .dark(self.dark)
            .contrast_level(self.contrast)
            .spec_version(self.spec)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_defaults() {
        let config = SchemeConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchemeConfig::default());
        assert_eq!(config.source_color().unwrap(), Argb(0xff67_50a4));
    }

    #[test]
    fn full_config() {
        let config = SchemeConfig::from_toml_str(
            r##"
            source = "#0066ff"
            dark = true
            contrast = 0.5
            spec = "2025"
            "##,
        )
        .unwrap();
        assert_eq!(
            config,
            SchemeConfig {
                source: "#0066ff".to_string(),
                dark: true,
                contrast: 0.5,
                spec: SpecVersion::V2025,
            }
        );

        let scheme = config.build().unwrap();
        assert!(scheme.is_dark());
        assert_eq!(scheme.spec_version(), SpecVersion::V2025);
        assert_eq!(scheme.contrast_level(), 0.5);
    }

    #[test]
    fn unknown_spec_is_a_config_error() {
        let err = SchemeConfig::from_toml_str(r#"spec = "2019""#).unwrap_err();
        assert!(matches!(err, SchemeError::Config(_)), "{err}");
    }

    #[test]
    fn bad_source_color() {
        let config = SchemeConfig {
            source: "purple".to_string(),
            ..SchemeConfig::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            SchemeError::InvalidColor("purple".to_string())
        );
    }

    #[test]
    fn contrast_is_validated_on_build() {
        let config = SchemeConfig::from_toml_str("contrast = 2.0").unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            SchemeError::ContrastOutOfRange(2.0)
        );
    }

    #[test]
    fn missing_file() {
        let err = SchemeConfig::load("/nonexistent/scheme.toml").unwrap_err();
        assert!(matches!(err, SchemeError::Config(_)));
    }
}
