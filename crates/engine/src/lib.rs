use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod content;
pub mod math;
pub mod physics;

pub use app::{
    plan_sim_steps, run_headless, ActionStates, EntityId, InputAction, InputEdgeTracker,
    InputScript, InputSnapshot, InputSource, LoopConfig, LoopSummary, RawInputSample, Scene,
    SceneCommand, ScriptError, ScriptedInput, StepPlan,
};
pub use content::{
    load_item_catalog, parse_item_catalog, CatalogError, CatalogErrorCode, ItemCatalog,
    ItemDefinition, ItemId, JsonFileStore, SourceLocation, StoreError, WriteStage,
};
pub use math::{forward_from_yaw_pitch, rotate_about_y, Vec2, Vec3};
pub use physics::{Collider, Layer, LayerMask, PhysicsWorld, RaycastHit, Shape};

pub const DATA_DIR_ENV_VAR: &str = "NOTEPAD_DATA_DIR";
pub const APP_DIR_NAME: &str = "notepad_game";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error(
        "no per-user data directory is available on this platform\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"$HOME/.local/share/notepad_game\""
    )]
    NoPlatformDataDir { env_var: &'static str },
    #[error("failed to create data directory at {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves the directory that holds save files, creating it if needed.
pub fn resolve_data_dir() -> Result<PathBuf, StartupError> {
    let dir = match env::var(DATA_DIR_ENV_VAR) {
        Ok(value) => PathBuf::from(value),
        Err(env::VarError::NotPresent) => dirs::data_dir()
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or(StartupError::NoPlatformDataDir {
                env_var: DATA_DIR_ENV_VAR,
            })?,
        Err(source) => {
            return Err(StartupError::EnvVar {
                var: DATA_DIR_ENV_VAR,
                source,
            })
        }
    };
    ensure_dir(&dir)
}

fn ensure_dir(dir: &Path) -> Result<PathBuf, StartupError> {
    fs::create_dir_all(dir).map_err(|source| StartupError::CreateDataDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(normalize_path(dir))
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
