use super::inventory::Inventory;
use super::selection::SelectionCycler;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DisplaySlot {
    pub(crate) visible: bool,
    pub(crate) icon: Option<String>,
}

impl DisplaySlot {
    fn shown(icon: Option<String>) -> Self {
        Self {
            visible: true,
            icon,
        }
    }

    fn hidden() -> Self {
        Self::default()
    }
}

/// Previous / current / next item icons around the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InventoryDisplay {
    pub(crate) previous: DisplaySlot,
    pub(crate) current: DisplaySlot,
    pub(crate) next: DisplaySlot,
}

impl InventoryDisplay {
    pub(crate) fn refresh(&mut self, inventory: &Inventory, selection: &SelectionCycler) {
        let icon_at = |offset: i64| {
            selection
                .neighbor(offset, inventory)
                .map(|item| item.icon.clone())
        };
        let count = inventory.number_of_items();

        self.current = if count == 0 {
            DisplaySlot::hidden()
        } else {
            DisplaySlot::shown(icon_at(0))
        };
        self.previous = if count > 2 {
            DisplaySlot::shown(icon_at(-1))
        } else {
            DisplaySlot::hidden()
        };
        self.next = if count > 1 {
            DisplaySlot::shown(icon_at(1))
        } else {
            DisplaySlot::hidden()
        };
    }

    pub(crate) fn visible_count(&self) -> usize {
        [&self.previous, &self.current, &self.next]
            .iter()
            .filter(|slot| slot.visible)
            .count()
    }
}
