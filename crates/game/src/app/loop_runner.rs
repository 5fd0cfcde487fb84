use std::process::ExitCode;

use engine::run_headless;
use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::gameplay::RoomScene;
use super::menu::MenuCommand;
use super::save::{SaveError, SaveResult, SaveService};

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        config,
        entry,
        mut saves,
        mut scene,
        mut input,
    } = app;

    if entry != MenuCommand::EnterRoom {
        info!(?entry, "menu_exit_without_play");
        return ExitCode::SUCCESS;
    }

    let summary = run_headless(&config, &mut scene, &mut input);
    info!(
        frames = summary.frames_run,
        ticks = summary.ticks_run,
        quit = summary.quit_requested,
        "session_finished"
    );

    if let Err(err) = persist_session(&mut saves, &scene) {
        error!(error = %err, "save_on_exit_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Copies the room's note pad into the loaded record and writes it out.
fn persist_session(saves: &mut SaveService, scene: &RoomScene) -> SaveResult<()> {
    let manager = saves.require_mut()?;
    let record = manager.record_mut().ok_or(SaveError::NotLoaded)?;
    record.note_pad_data = scene.note_pad().pages().to_vec();
    manager.save()?;
    info!(pages = scene.note_pad().filled_pages(), "session_saved");
    Ok(())
}
