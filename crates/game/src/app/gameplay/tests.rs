use engine::{
    EntityId, InputAction, InputSnapshot, ItemCatalog, ItemDefinition, ItemId, Scene,
    SceneCommand, Shape, Vec2,
};

use super::room::DESK_DRAWER_NOTE;
use super::*;

const FRAME_DT: f32 = 1.0 / 60.0;

fn catalog(ids: &[u32]) -> ItemCatalog {
    ItemCatalog::from_items(ids.iter().map(|id| ItemDefinition {
        id: ItemId(*id),
        name: format!("item_{id}"),
        icon: format!("icons/item_{id}"),
    }))
}

fn use_pressed() -> InputSnapshot {
    InputSnapshot::empty()
        .with_action_down(InputAction::Use, true)
        .with_action_pressed(InputAction::Use, true)
}

fn drawer_front_z(room: &RoomScene, id: EntityId) -> f32 {
    match room.physics().collider(id).map(|collider| collider.shape) {
        Some(Shape::Aabb { min, .. }) => min.z,
        other => panic!("unexpected drawer collider: {other:?}"),
    }
}

#[test]
fn room_seeds_starting_items_and_full_display() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1, 2, 3, 4]));
    assert_eq!(room.player().inventory().number_of_items(), 4);

    room.update(FRAME_DT, &InputSnapshot::empty());
    let display = room.player().display();
    assert_eq!(display.visible_count(), 3);
    assert_eq!(display.previous.icon.as_deref(), Some("icons/item_4"));
    assert_eq!(display.current.icon.as_deref(), Some("icons/item_1"));
    assert_eq!(display.next.icon.as_deref(), Some("icons/item_2"));
}

#[test]
fn missing_catalog_items_are_skipped() {
    let room = RoomScene::new(PlayerTuning::default(), &catalog(&[2, 4]));
    let inventory = room.player().inventory();
    let ids = (0..inventory.number_of_items())
        .filter_map(|index| inventory.check_item(index))
        .map(|item| item.id.0)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn player_spawns_looking_at_drawer_and_use_slides_it_open() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1]));
    room.update(FRAME_DT, &InputSnapshot::empty());
    let target = room.player().target().expect("drawer targeted");
    assert_eq!(room.objects().get(target).map(|o| o.label()), Some("desk_drawer"));
    let closed_front = drawer_front_z(&room, target);

    room.update(FRAME_DT, &use_pressed());
    for _ in 0..90 {
        room.update(FRAME_DT, &InputSnapshot::empty().with_action_down(InputAction::Use, true));
    }
    let open_front = drawer_front_z(&room, target);
    assert!((closed_front - open_front - 0.4).abs() < 1e-4, "moved {}", closed_front - open_front);
}

#[test]
fn looking_away_loses_target() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1]));
    room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_look_delta(Vec2 { x: 180.0, y: 0.0 }),
    );
    assert_eq!(room.player().target(), None);
}

#[test]
fn fixed_update_walks_player_forward() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1]));
    room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_action_down(InputAction::MoveForward, true),
    );
    for _ in 0..50 {
        room.fixed_update(0.02);
    }
    let position = room.player().position();
    assert!((position.z - 0.12).abs() < 1e-4, "z={}", position.z);
}

#[test]
fn quit_press_ends_the_scene() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[]));
    let command = room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_action_pressed(InputAction::Quit, true),
    );
    assert_eq!(command, SceneCommand::Quit);
}

#[test]
fn debug_title_names_target_and_selection() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1, 2]));
    room.update(FRAME_DT, &InputSnapshot::empty());
    let title = room.debug_title().expect("title");
    assert!(title.contains("target=desk_drawer"), "{title}");
    assert!(title.contains("selected=item_1"), "{title}");
}

#[test]
fn blocked_room_player_keeps_display_updated() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1, 2, 3]));
    room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_action_pressed(InputAction::NotePad, true),
    );
    assert!(room.player().is_blocked());
    assert_eq!(room.player().target(), None);

    room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_scroll_delta(Vec2 { x: 0.0, y: 100.0 }),
    );
    assert_eq!(room.player().selection_index(), 0);
    assert_eq!(room.player().display().visible_count(), 3);
    assert!(room.debug_title().expect("title").contains("blocked=true"));

    room.update(
        FRAME_DT,
        &InputSnapshot::empty().with_action_pressed(InputAction::NotePad, true),
    );
    assert!(!room.player().is_blocked());
}

#[test]
fn opening_desk_drawer_jots_its_note_once() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1]));
    room.update(FRAME_DT, &InputSnapshot::empty());
    room.update(FRAME_DT, &use_pressed());
    assert_eq!(room.note_pad().filled_pages(), 1);
    assert_eq!(room.note_pad().pages()[0], DESK_DRAWER_NOTE);

    for _ in 0..3 {
        room.update(FRAME_DT, &use_pressed());
    }
    assert_eq!(room.note_pad().filled_pages(), 1);
    assert!(room.debug_title().expect("title").contains("notes=1"));
}

#[test]
fn restored_notes_are_not_duplicated_by_the_drawer() {
    let saved = vec![DESK_DRAWER_NOTE.to_string(), String::new(), String::new()];
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1])).with_notes(&saved);
    room.update(FRAME_DT, &InputSnapshot::empty());
    room.update(FRAME_DT, &use_pressed());
    assert_eq!(room.note_pad().pages(), saved.as_slice());
}

#[test]
fn debug_title_reports_outline_and_drawer_state() {
    let mut room = RoomScene::new(PlayerTuning::default(), &catalog(&[1, 2, 3]));
    room.update(FRAME_DT, &InputSnapshot::empty());
    let title = room.debug_title().expect("title");
    assert!(title.contains("state=closed outlined=true"), "{title}");
    assert!(title.contains("slot=0 hud=3"), "{title}");

    room.update(FRAME_DT, &use_pressed());
    let title = room.debug_title().expect("title");
    assert!(title.contains("state=opening"), "{title}");
}
