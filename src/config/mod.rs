use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::area::{CalibrationCorners, DEFAULT_LATCH_RADIUS};
use crate::constants::{DEFAULT_EXPORTS_DIR, DEFAULT_REFERENCE_IMAGE};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    /// Game coordinates of the reference image's edges. Read once at startup.
    pub calibration: CalibrationCorners,

    /// Image the areas are traced over
    pub reference_image: PathBuf,

    /// Directory `<name>.enum` files are written to
    pub exports_dir: PathBuf,

    /// Clicks within this many pixels of an existing vertex snap onto it
    pub latch_radius: f64,

    /// Folder the import dialog opened last (not required to exist)
    pub last_import_dir: Option<PathBuf>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            calibration: CalibrationCorners::default(),
            reference_image: PathBuf::from(DEFAULT_REFERENCE_IMAGE),
            exports_dir: PathBuf::from(DEFAULT_EXPORTS_DIR),
            latch_radius: DEFAULT_LATCH_RADIUS,
            last_import_dir: None,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

impl AppConfig {
    /// Exports directory with relative paths resolved against the data directory
    pub fn exports_dir(&self) -> PathBuf {
        crate::paths::resolve_data_path(&self.data.exports_dir)
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the folder areas were last imported from
#[derive(Message)]
pub struct UpdateLastImportDirRequest {
    pub path: PathBuf,
}

/// Parses config file contents, falling back to defaults with a reason on failure.
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config() -> (AppConfig, Option<String>) {
    let config_path = crate::paths::config_file();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    (
        AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    )
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (loaded, reset_reason) = load_config();
    *config = loaded;

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update the last import folder
fn update_last_import_dir_system(
    mut events: MessageReader<UpdateLastImportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_import_dir.as_ref() == Some(&event.path) {
            continue;
        }
        config.data.last_import_dir = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastImportDirRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    update_last_import_dir_system
                        .run_if(on_message::<UpdateLastImportDirRequest>),
                ),
            );
    }
}
