//! # Session Context and Slot Store
//!
//! Fixed ring of [`MAX_ITEMS`] metadata slots owned by the enclosing
//! session. The cursor is advanced before each write, so the first commit of
//! a fresh session lands on slot 1 and commit *N* evicts the slot written
//! [`MAX_ITEMS`] commits earlier, consumed or not.
//!
//! Occupancy markers are kept in a parallel array, next to the slots rather
//! than inside them.

use super::entities::{
    ContractAddress, MetadataSlot, PluginType, VerifiedRecord, MAX_ITEMS,
};

/// Per-session state shared between the provisioning handler and the
/// transaction display flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    slots: [MetadataSlot; MAX_ITEMS],
    token_set: [bool; MAX_ITEMS],
    current_item_index: usize,
    plugin_type: PluginType,
}

impl SessionContext {
    /// A fresh session: all slots empty, cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `record` into the next slot and return its index.
    pub fn commit(&mut self, record: &VerifiedRecord) -> usize {
        self.current_item_index = (self.current_item_index + 1) % MAX_ITEMS;
        let index = self.current_item_index;

        self.slots[index] = MetadataSlot {
            collection_name: *record.collection_name(),
            contract_address: *record.contract_address(),
        };
        self.token_set[index] = true;

        index
    }

    /// Slot at `index`, if it holds verified metadata.
    pub fn slot(&self, index: usize) -> Option<&MetadataSlot> {
        if self.is_occupied(index) {
            self.slots.get(index)
        } else {
            None
        }
    }

    /// Whether slot `index` holds verified metadata.
    pub fn is_occupied(&self, index: usize) -> bool {
        self.token_set.get(index).copied().unwrap_or(false)
    }

    /// Index of the most recently written slot (or the initial cursor).
    pub fn current_index(&self) -> usize {
        self.current_item_index
    }

    /// Occupied slot holding `address`, most recent first.
    pub fn find_by_contract_address(
        &self,
        address: &ContractAddress,
    ) -> Option<(usize, &MetadataSlot)> {
        (0..MAX_ITEMS)
            .map(|offset| (self.current_item_index + MAX_ITEMS - offset) % MAX_ITEMS)
            .filter_map(|index| self.slot(index).map(|slot| (index, slot)))
            .find(|(_, slot)| &slot.contract_address == address)
    }

    /// Plugin routing decision for the next transaction.
    pub fn plugin_type(&self) -> PluginType {
        self.plugin_type
    }

    /// Set the plugin routing decision.
    pub fn set_plugin_type(&mut self, plugin_type: PluginType) {
        self.plugin_type = plugin_type;
    }

    /// Clear every slot, marker and the cursor.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
