use tracing::{info, warn};

use super::save::{SaveResult, SaveService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuCommand {
    Stay,
    EnterRoom,
    Quit,
}

/// Main-menu actions over the save lifecycle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MainMenu {
    load_game_enabled: bool,
}

impl MainMenu {
    /// "Load game" is offered only when a save from an earlier session was
    /// found at startup and is still on disk.
    pub(crate) fn open(saves: &SaveService) -> Self {
        let load_game_enabled = saves
            .manager()
            .is_some_and(|manager| manager.found_on_activation() && manager.file_exists());
        info!(load_game_enabled, "main_menu_opened");
        Self { load_game_enabled }
    }

    pub(crate) fn load_game_enabled(&self) -> bool {
        self.load_game_enabled
    }

    pub(crate) fn load_game(&mut self, saves: &mut SaveService) -> SaveResult<MenuCommand> {
        if !self.load_game_enabled {
            warn!("load_game_pressed_while_disabled");
            return Ok(MenuCommand::Stay);
        }
        saves.require_mut()?.load()?;
        Ok(MenuCommand::EnterRoom)
    }

    pub(crate) fn new_game(&mut self, saves: &mut SaveService) -> SaveResult<MenuCommand> {
        saves.require_mut()?.new_game()?;
        self.load_game_enabled = true;
        Ok(MenuCommand::EnterRoom)
    }

    pub(crate) fn delete_save(&mut self, saves: &mut SaveService) -> SaveResult<MenuCommand> {
        saves.require_mut()?.delete_save_file()?;
        self.load_game_enabled = false;
        Ok(MenuCommand::Stay)
    }

    pub(crate) fn quit(&self) -> MenuCommand {
        info!("quit_selected");
        MenuCommand::Quit
    }
}
