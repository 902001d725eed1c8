//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`P2D_SECTION__KEY`)

use std::fmt;
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use phys2d_math::Vec2;
use phys2d_physics::PhysicsError;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Frame loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`P2D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User overrides are optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // P2D_PHYSICS__FIXED_TIMESTEP=0.005 -> physics.fixed_timestep = 0.005
        figment = figment.merge(Env::prefixed("P2D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.to_physics_config()?;
        let sim = &self.simulation;
        if !(sim.frame_dt > 0.0 && sim.max_frame_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_dt and max_frame_dt must be positive (got {} and {})",
                sim.frame_dt, sim.max_frame_dt
            )));
        }
        Ok(())
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration [x, y]
    pub gravity: [f32; 2],
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Fixed steps allowed per frame before time is dropped
    pub max_steps_per_update: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let defaults = phys2d_physics::PhysicsConfig::default();
        Self {
            gravity: defaults.gravity.into(),
            fixed_timestep: defaults.fixed_timestep,
            max_steps_per_update: defaults.max_steps_per_update,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's config, validating it on the way
    pub fn to_physics_config(&self) -> Result<phys2d_physics::PhysicsConfig, ConfigError> {
        let config = phys2d_physics::PhysicsConfig::new(Vec2::from(self.gravity))
            .with_fixed_timestep(self.fixed_timestep)
            .with_max_steps_per_update(self.max_steps_per_update);
        config.validate()?;
        Ok(config)
    }
}

/// Frame loop configuration for the headless harness
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frame delta cap in seconds (spiral of death guard)
    pub max_frame_dt: f32,
    /// Simulated frame delta in seconds
    pub frame_dt: f32,
    /// Total simulated time in seconds
    pub duration: f32,
    /// Seconds between scene dumps (0 disables them)
    pub debug_interval: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.25,
            frame_dt: 1.0 / 60.0,
            duration: 10.0,
            debug_interval: 1.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Forward gizmos to the logging renderer every frame
    pub draw_gizmos: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            draw_gizmos: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// Reading or parsing a source failed
    Load(figment::Error),
    /// Physics settings rejected by the engine
    Physics(PhysicsError),
    /// Any other out-of-range value
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e)
    }
}

impl From<PhysicsError> for ConfigError {
    fn from(e: PhysicsError) -> Self {
        ConfigError::Physics(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Physics(e) => write!(f, "Invalid physics configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e),
            ConfigError::Physics(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}
