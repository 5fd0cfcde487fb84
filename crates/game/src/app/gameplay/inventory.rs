use engine::{ItemDefinition, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InventorySlot {
    pub(crate) item: ItemDefinition,
    pub(crate) count: u32,
}

/// Ordered; positions are what the selection index points at.
#[derive(Debug, Clone, Default)]
pub(crate) struct Inventory {
    slots: Vec<InventorySlot>,
}

impl Inventory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stacks onto the slot holding the same item id, else appends.
    pub(crate) fn add_item_fast(&mut self, item: ItemDefinition, count: u32) {
        if count == 0 {
            return;
        }
        match self.slots.iter_mut().find(|slot| slot.item.id == item.id) {
            Some(slot) => slot.count = slot.count.saturating_add(count),
            None => self.slots.push(InventorySlot { item, count }),
        }
    }

    /// Removes the slot once its count reaches zero. Returns how many were taken.
    pub(crate) fn remove_item(&mut self, index: usize, count: u32) -> u32 {
        let Some(slot) = self.slots.get_mut(index) else {
            return 0;
        };
        let taken = slot.count.min(count);
        slot.count -= taken;
        if slot.count == 0 {
            self.slots.remove(index);
        }
        taken
    }

    pub(crate) fn item_index(&self, id: ItemId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item.id == id)
    }

    pub(crate) fn number_of_items(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn check_item(&self, index: usize) -> Option<&ItemDefinition> {
        self.slots.get(index).map(|slot| &slot.item)
    }

    pub(crate) fn count_of(&self, id: ItemId) -> u32 {
        self.item_index(id)
            .and_then(|index| self.slots.get(index))
            .map_or(0, |slot| slot.count)
    }
}

#[cfg(test)]
pub(crate) fn test_item(id: u32) -> ItemDefinition {
    ItemDefinition {
        id: ItemId(id),
        name: format!("item_{id}"),
        icon: format!("icons/item_{id}"),
    }
}
