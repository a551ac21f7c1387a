use crate::common::DEFAULT_PLACEHOLDER;

#[cfg(feature = "cli")]
use crate::common::{ConfigSnafu, Result};
#[cfg(feature = "cli")]
use snafu::ResultExt;

pub const DEFAULT_DISPLAY_WIDTH: usize = 80;

#[cfg(feature = "cli")]
const ENV_PREFIX: &str = "SLIPSTREAM";

/// What to do when a JSON key converts to a name that is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Drop the key, log a warning and record the collision on the resource.
    #[default]
    Warn,
    /// Fail construction.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub collision_policy: CollisionPolicy,

    pub display_width: usize,

    pub truncate_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            truncate_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Overlay `SLIPSTREAM_*` environment variables on the defaults.
    #[cfg(feature = "cli")]
    pub fn populate_from_env() -> Result<Self> {
        Self::populate_from(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    #[cfg(feature = "cli")]
    fn populate_from(source: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize::<Config>())
            .boxed()
            .context(ConfigSnafu {
                message: format!("Failed to load {ENV_PREFIX}_* configuration"),
            })
    }
}
