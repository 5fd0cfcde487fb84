use engine::{ItemDefinition, Vec2};

use super::inventory::Inventory;

/// Scroll magnitude that counts as one wheel notch.
pub(crate) const SCROLL_STEP_THRESHOLD: f32 = 100.0;

/// Wrap-around index into the inventory, stepped by scroll input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SelectionCycler {
    index: i64,
}

impl SelectionCycler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn index(&self) -> usize {
        usize::try_from(self.index).unwrap_or(0)
    }

    /// Only the vertical component counts. An empty inventory pins the index to 0.
    pub(crate) fn poll(&mut self, scroll_delta: Vec2, len: usize) {
        if scroll_delta.y >= SCROLL_STEP_THRESHOLD {
            self.index += 1;
        } else if scroll_delta.y <= -SCROLL_STEP_THRESHOLD {
            self.index -= 1;
        }
        self.normalize(len);
    }

    pub(crate) fn normalize(&mut self, len: usize) {
        let len = len as i64;
        if len == 0 {
            self.index = 0;
        } else if self.index >= len {
            self.index = 0;
        } else if self.index < 0 {
            self.index = len - 1;
        }
    }

    /// Past the end returns item 0, before the start returns the last item.
    /// `index + offset == len` is not past the end and yields `None`.
    pub(crate) fn neighbor<'a>(
        &self,
        offset: i64,
        inventory: &'a Inventory,
    ) -> Option<&'a ItemDefinition> {
        let len = inventory.number_of_items() as i64;
        let target = self.index + offset;
        if target > len {
            return inventory.check_item(0);
        }
        if target < 0 {
            return usize::try_from(len - 1)
                .ok()
                .and_then(|last| inventory.check_item(last));
        }
        usize::try_from(target)
            .ok()
            .and_then(|position| inventory.check_item(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::inventory::test_item;
    use engine::ItemId;

    const UP: Vec2 = Vec2 { x: 0.0, y: 120.0 };
    const DOWN: Vec2 = Vec2 { x: 0.0, y: -120.0 };

    fn inventory_of(len: u32) -> Inventory {
        let mut inventory = Inventory::new();
        for id in 0..len {
            inventory.add_item_fast(test_item(id), 1);
        }
        inventory
    }

    fn neighbor_id(cycler: &SelectionCycler, offset: i64, inventory: &Inventory) -> Option<u32> {
        cycler.neighbor(offset, inventory).map(|item| item.id.0)
    }

    #[test]
    fn small_scroll_does_not_step() {
        let mut cycler = SelectionCycler::new();
        cycler.poll(Vec2 { x: 500.0, y: 99.0 }, 3);
        cycler.poll(Vec2 { x: 0.0, y: -99.0 }, 3);
        assert_eq!(cycler.index(), 0);
        cycler.poll(Vec2 { x: 0.0, y: 100.0 }, 3);
        assert_eq!(cycler.index(), 1);
    }

    #[test]
    fn stepping_wraps_in_both_directions() {
        let mut cycler = SelectionCycler::new();
        cycler.poll(DOWN, 3);
        assert_eq!(cycler.index(), 2);
        cycler.poll(UP, 3);
        assert_eq!(cycler.index(), 0);
    }

    #[test]
    fn index_stays_in_range_for_any_step_sequence() {
        for len in 1..=6usize {
            let mut cycler = SelectionCycler::new();
            let mut seed = 0x2545_f491u32 ^ len as u32;
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                let delta = if seed & 1 == 0 { UP } else { DOWN };
                cycler.poll(delta, len);
                assert!(cycler.index() < len, "len={len} index={}", cycler.index());
            }
        }
    }

    #[test]
    fn shrinking_inventory_renormalizes_index() {
        let mut cycler = SelectionCycler::new();
        cycler.poll(DOWN, 4);
        assert_eq!(cycler.index(), 3);
        cycler.poll(Vec2::ZERO, 2);
        assert_eq!(cycler.index(), 0);
    }

    #[test]
    fn empty_inventory_pins_index_and_has_no_neighbors() {
        let mut cycler = SelectionCycler::new();
        cycler.poll(UP, 0);
        assert_eq!(cycler.index(), 0);
        let inventory = Inventory::new();
        assert!(cycler.neighbor(0, &inventory).is_none());
        assert!(cycler.neighbor(-1, &inventory).is_none());
        assert!(cycler.neighbor(1, &inventory).is_none());
    }

    #[test]
    fn previous_neighbor_wraps_to_last_item() {
        let inventory = inventory_of(4);
        let cycler = SelectionCycler::new();
        assert_eq!(neighbor_id(&cycler, -1, &inventory), Some(3));

        let mut cycler = SelectionCycler::new();
        cycler.poll(UP, 4);
        cycler.poll(UP, 4);
        assert_eq!(neighbor_id(&cycler, -1, &inventory), Some(1));
    }

    #[test]
    fn next_neighbor_clamps_to_first_item_only_past_length() {
        let inventory = inventory_of(3);
        let mut cycler = SelectionCycler::new();
        assert_eq!(neighbor_id(&cycler, 1, &inventory), Some(1));

        // index 2: index + 1 == len, which is not past the end
        cycler.poll(DOWN, 3);
        assert_eq!(cycler.index(), 2);
        assert_eq!(neighbor_id(&cycler, 1, &inventory), None);

        // index + 2 > len clamps rather than wrapping to item 1
        assert_eq!(neighbor_id(&cycler, 2, &inventory), Some(0));
        assert_eq!(
            cycler.neighbor(0, &inventory).map(|item| item.id),
            Some(ItemId(2))
        );
    }
}
