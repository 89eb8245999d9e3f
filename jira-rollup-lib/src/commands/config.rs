use crate::HashSet;
use crate::Result;
use crate::sections::SectionKind;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use strum::IntoEnumIterator;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the working directory when no configuration path is given
pub const DEFAULT_CONFIG_FILE: &str = "rollup.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sections to compute
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionKind>,

    /// Text shown for sections with nothing to report
    #[serde(default = "default_empty_placeholder")]
    pub empty_placeholder: String,
}

fn default_sections() -> Vec<SectionKind> {
    SectionKind::iter().collect()
}

fn default_empty_placeholder() -> String {
    "No data.".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `rollup.toml` in `base_dir` is used when it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("unable to read configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("unable to parse configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML)
            .into_app_err_with(|| format!("unable to write default configuration to '{output_path}'"))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("sections must name at least one section");
        }

        let mut seen = HashSet::default();
        for kind in &self.sections {
            if !seen.insert(kind) {
                bail!("section '{kind}' is listed more than once");
            }
        }

        if self.empty_placeholder.trim().is_empty() {
            bail!("empty_placeholder must not be blank");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
