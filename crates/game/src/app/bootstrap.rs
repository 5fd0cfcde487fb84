use std::env;
use std::path::PathBuf;

use engine::{
    load_item_catalog, resolve_data_dir, CatalogError, InputScript, LoopConfig, ScriptError,
    ScriptedInput, StartupError,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{PlayerTuning, RoomScene};
use super::menu::{MainMenu, MenuCommand};
use super::save::{SaveError, SaveManager, SaveService};

const ASSETS_DIR_ENV_VAR: &str = "NOTEPAD_ASSETS_DIR";
const INPUT_SCRIPT_ENV_VAR: &str = "NOTEPAD_INPUT_SCRIPT";
const FRAMES_ENV_VAR: &str = "NOTEPAD_FRAMES";
const MENU_ACTION_ENV_VAR: &str = "NOTEPAD_MENU_ACTION";
const DEFAULT_ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");

/// Main-menu button pressed on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    /// Load game if it is enabled, else new game.
    Continue,
    NewGame,
    DeleteSave,
    Quit,
}

impl MenuAction {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "continue" => Some(Self::Continue),
            "new" => Some(Self::NewGame),
            "delete" => Some(Self::DeleteSave),
            "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to load item catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("save lifecycle failed: {0}")]
    Save(#[from] SaveError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) entry: MenuCommand,
    pub(crate) saves: SaveService,
    pub(crate) scene: RoomScene,
    pub(crate) input: ScriptedInput,
}

pub(crate) fn build_app() -> Result<AppWiring, AppError> {
    init_tracing();
    info!("=== Notepad Room Startup ===");

    let data_dir = resolve_data_dir()?;
    let assets_dir = env_path_or(ASSETS_DIR_ENV_VAR, PathBuf::from(DEFAULT_ASSETS_DIR));
    let script_path = env_path_or(
        INPUT_SCRIPT_ENV_VAR,
        assets_dir.join("scripts").join("demo_input.json"),
    );
    info!(
        data_dir = %data_dir.display(),
        assets_dir = %assets_dir.display(),
        input_script = %script_path.display(),
        "startup"
    );

    let catalog = load_item_catalog(&assets_dir.join("base").join("items.xml"))?;

    let mut saves = SaveService::new();
    if !saves.install(SaveManager::in_dir(&data_dir))? {
        warn!("save_manager_already_installed; keeping the existing one");
    }
    let mut menu = MainMenu::open(&saves);
    let entry = run_menu(&mut menu, &mut saves, parse_menu_action_from_env())?;

    let input = ScriptedInput::new(InputScript::load(&script_path)?);
    let config = LoopConfig {
        frame_count: parse_frame_count_from_env(LoopConfig::default().frame_count),
        ..LoopConfig::default()
    };

    let notes = saves
        .manager()
        .and_then(SaveManager::record)
        .map(|record| record.note_pad_data.clone())
        .unwrap_or_default();
    let scene = RoomScene::new(PlayerTuning::default(), &catalog).with_notes(&notes);

    Ok(AppWiring {
        config,
        entry,
        saves,
        scene,
        input,
    })
}

fn run_menu(
    menu: &mut MainMenu,
    saves: &mut SaveService,
    action: MenuAction,
) -> Result<MenuCommand, SaveError> {
    match action {
        MenuAction::Continue if menu.load_game_enabled() => menu.load_game(saves),
        MenuAction::Continue | MenuAction::NewGame => menu.new_game(saves),
        MenuAction::DeleteSave => {
            menu.delete_save(saves)?;
            menu.new_game(saves)
        }
        MenuAction::Quit => Ok(menu.quit()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn env_path_or(var: &'static str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        Ok(_) | Err(env::VarError::NotPresent) => fallback,
        Err(error) => {
            warn!(env_var = var, error = %error, "unable to read env var; using default");
            fallback
        }
    }
}

fn parse_menu_action_from_env() -> MenuAction {
    match env::var(MENU_ACTION_ENV_VAR) {
        Ok(value) => MenuAction::parse(&value).unwrap_or_else(|| {
            warn!(
                env_var = MENU_ACTION_ENV_VAR,
                value = value.as_str(),
                "unknown menu action; using continue"
            );
            MenuAction::Continue
        }),
        Err(env::VarError::NotPresent) => MenuAction::Continue,
        Err(error) => {
            warn!(
                env_var = MENU_ACTION_ENV_VAR,
                error = %error,
                "unable to read menu action env var; using continue"
            );
            MenuAction::Continue
        }
    }
}

fn parse_frame_count_from_env(fallback: u32) -> u32 {
    match env::var(FRAMES_ENV_VAR) {
        Ok(value) => parse_frame_count(&value).unwrap_or_else(|| {
            warn!(
                env_var = FRAMES_ENV_VAR,
                value = value.as_str(),
                "invalid frame count; falling back to default"
            );
            fallback
        }),
        Err(env::VarError::NotPresent) => fallback,
        Err(error) => {
            warn!(
                env_var = FRAMES_ENV_VAR,
                error = %error,
                "unable to read frame count env var; falling back to default"
            );
            fallback
        }
    }
}

fn parse_frame_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|frames| *frames > 0)
}
