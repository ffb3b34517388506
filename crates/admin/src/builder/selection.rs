//! Attribute selection state for the multi-attribute builder.
//!
//! Tracks which attributes, and which values of each, are currently chosen
//! for the product being authored. The state is an immutable value; every
//! mutation goes through [`AttributeSelectionState::apply`] with an explicit
//! [`SelectionAction`], so a sequence of UI events can be replayed
//! deterministically in tests.
//!
//! Attribute-selected-ness and value assignment are two separate explicit
//! facts: an attribute can be selected while it still has zero values
//! chosen. Deselecting an attribute cascade-clears its values by removing
//! the entry entirely, so no dangling entries survive.

use storekeeper_core::{AttributeId, AttributeValueId};

/// Which attributes and values are currently chosen, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSelectionState {
    entries: Vec<SelectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectionEntry {
    attribute_id: AttributeId,
    value_ids: Vec<AttributeValueId>,
}

/// Closed set of selection mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// Mark an attribute as active for variant generation.
    SelectAttribute(AttributeId),
    /// Remove an attribute and cascade-clear all its selected values.
    DeselectAttribute(AttributeId),
    /// Add the value if absent, remove it if present. Toggling a value of
    /// an unselected attribute implicitly selects the attribute.
    ToggleValue {
        attribute_id: AttributeId,
        value_id: AttributeValueId,
    },
    /// Select every given value at once (the "All" checkbox).
    SelectAllValues {
        attribute_id: AttributeId,
        value_ids: Vec<AttributeValueId>,
    },
    /// Clear the attribute's values but keep the attribute selected.
    ClearValues(AttributeId),
}

impl AttributeSelectionState {
    /// Empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Apply an action, returning the next state. Pure: `self` is unchanged.
    #[must_use]
    pub fn apply(&self, action: &SelectionAction) -> Self {
        let mut next = self.clone();
        match action {
            SelectionAction::SelectAttribute(attribute_id) => {
                next.ensure_entry(*attribute_id);
            }
            SelectionAction::DeselectAttribute(attribute_id) => {
                next.entries.retain(|e| e.attribute_id != *attribute_id);
            }
            SelectionAction::ToggleValue {
                attribute_id,
                value_id,
            } => {
                let entry = next.ensure_entry(*attribute_id);
                if let Some(pos) = entry.value_ids.iter().position(|v| v == value_id) {
                    entry.value_ids.remove(pos);
                } else {
                    entry.value_ids.push(*value_id);
                }
            }
            SelectionAction::SelectAllValues {
                attribute_id,
                value_ids,
            } => {
                let entry = next.ensure_entry(*attribute_id);
                for value_id in value_ids {
                    if !entry.value_ids.contains(value_id) {
                        entry.value_ids.push(*value_id);
                    }
                }
            }
            SelectionAction::ClearValues(attribute_id) => {
                if let Some(entry) = next.entry_mut(*attribute_id) {
                    entry.value_ids.clear();
                }
            }
        }
        next
    }

    /// Whether the attribute is currently selected.
    #[must_use]
    pub fn is_selected(&self, attribute_id: AttributeId) -> bool {
        self.entries.iter().any(|e| e.attribute_id == attribute_id)
    }

    /// Selected value ids for an attribute, in selection order. Empty when
    /// the attribute is not selected or has no values chosen yet.
    #[must_use]
    pub fn selected_values(&self, attribute_id: AttributeId) -> &[AttributeValueId] {
        self.entries
            .iter()
            .find(|e| e.attribute_id == attribute_id)
            .map_or(&[], |e| e.value_ids.as_slice())
    }

    /// Selected attribute ids in selection order.
    pub fn selected_attributes(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.entries.iter().map(|e| e.attribute_id)
    }

    /// Whether any attribute has at least one value selected.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.entries.iter().any(|e| !e.value_ids.is_empty())
    }

    /// The full Cartesian product of the selected value sets.
    ///
    /// Attributes without any chosen value yet are skipped rather than
    /// collapsing the whole product to zero combinations. Each combination
    /// lists one `(attribute, value)` pair per contributing attribute, in
    /// selection order.
    ///
    /// Backs the authoring UI's combination preview. The single-variant
    /// mode deliberately never expands these into records; see
    /// [`super::expand::expand_uniform`].
    #[must_use]
    pub fn combinations(&self) -> Vec<Vec<(AttributeId, AttributeValueId)>> {
        let active: Vec<&SelectionEntry> = self
            .entries
            .iter()
            .filter(|e| !e.value_ids.is_empty())
            .collect();
        if active.is_empty() {
            return Vec::new();
        }

        let mut combos: Vec<Vec<(AttributeId, AttributeValueId)>> = vec![Vec::new()];
        for entry in active {
            let mut expanded = Vec::with_capacity(combos.len() * entry.value_ids.len());
            for combo in &combos {
                for value_id in &entry.value_ids {
                    let mut next = combo.clone();
                    next.push((entry.attribute_id, *value_id));
                    expanded.push(next);
                }
            }
            combos = expanded;
        }
        combos
    }

    /// Number of concrete combinations the current selection describes.
    /// Shown next to the mode switch so the admin sees how many records a
    /// per-combination expansion would produce.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.value_ids.is_empty())
            .map(|e| e.value_ids.len())
            .product::<usize>()
            * usize::from(self.has_values())
    }

    fn ensure_entry(&mut self, attribute_id: AttributeId) -> &mut SelectionEntry {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.attribute_id == attribute_id)
        {
            #[allow(clippy::indexing_slicing)] // position() guarantees the index
            &mut self.entries[pos]
        } else {
            self.entries.push(SelectionEntry {
                attribute_id,
                value_ids: Vec::new(),
            });
            self.entries.last_mut().unwrap_or_else(|| unreachable!())
        }
    }

    fn entry_mut(&mut self, attribute_id: AttributeId) -> Option<&mut SelectionEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.attribute_id == attribute_id)
    }
}
