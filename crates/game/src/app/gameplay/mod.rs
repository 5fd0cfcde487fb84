mod drawer;
mod hud;
mod interaction;
mod inventory;
mod notepad;
mod player;
mod room;
mod selection;

pub(crate) use player::PlayerTuning;
pub(crate) use room::RoomScene;

/// Physics layer reserved for objects the player can target.
pub(crate) const INTERACTABLE_LAYER_INDEX: u8 = 6;
pub(crate) const STARTING_ITEM_IDS: [u32; 4] = [1, 2, 3, 4];

#[cfg(test)]
mod tests;
