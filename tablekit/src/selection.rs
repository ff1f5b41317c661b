//! Row selection state.
//!
//! Selection is tracked by row key rather than index, so it survives rows
//! being inserted, removed or reordered by the data source.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{Result, TableError};

/// Selection mode of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SelectionMode {
    /// Rows are activated, not selected
    #[default]
    None,
    /// At most one selected row
    Single,
    /// Any number of rows, with a checkbox column and select-all
    Multiple,
}

/// State of the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tristate {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Callback receiving the selected keys, sorted, after every change.
pub type SelectionObserver = Box<dyn FnMut(&[String])>;

/// Key-based selection with select-all tri-state.
///
/// Knows the ordered keys of the loaded rows, which bound every operation:
/// a key outside them is rejected with [`TableError::UnknownRowKey`].
#[derive(Default)]
pub struct SelectionCoordinator {
    mode: SelectionMode,
    selected: HashSet<String>,
    /// Anchor for range selection (last toggled or selected key)
    anchor: Option<String>,
    known: Vec<String>,
    observer: Option<SelectionObserver>,
}

impl fmt::Debug for SelectionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("mode", &self.mode)
            .field("selected", &self.selected_keys())
            .field("anchor", &self.anchor)
            .field("known", &self.known.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl SelectionCoordinator {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the mode. Leaving `Multiple` keeps at most the anchor selected;
    /// switching to `None` clears everything.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        let keep: HashSet<String> = match mode {
            SelectionMode::None => HashSet::new(),
            SelectionMode::Single => self
                .anchor
                .clone()
                .filter(|a| self.selected.contains(a))
                .or_else(|| self.selected_sorted().into_iter().next())
                .into_iter()
                .collect(),
            SelectionMode::Multiple => return,
        };
        self.replace(keep);
    }

    /// Register the change observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(&[String]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Selected keys, sorted for deterministic output.
    pub fn selected_keys(&self) -> Vec<String> {
        self.selected_sorted()
    }

    fn selected_sorted(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Keys of the loaded rows, in row order.
    pub fn known_keys(&self) -> &[String] {
        &self.known
    }

    /// State of the select-all checkbox, derived from the current sets.
    pub fn tristate(&self) -> Tristate {
        if self.selected.is_empty() {
            Tristate::Unchecked
        } else if self.selected.len() == self.known.len()
            && self.known.iter().all(|k| self.selected.contains(k))
        {
            Tristate::Checked
        } else {
            Tristate::Indeterminate
        }
    }

    fn require_enabled(&self) -> Result<()> {
        match self.mode {
            SelectionMode::None => Err(TableError::SelectionDisabled),
            _ => Ok(()),
        }
    }

    fn require_known(&self, key: &str) -> Result<()> {
        if self.known.iter().any(|k| k == key) {
            Ok(())
        } else {
            Err(TableError::UnknownRowKey(key.to_string()))
        }
    }

    /// Swap in a new set and notify if it differs. Returns true on change.
    fn replace(&mut self, selected: HashSet<String>) -> bool {
        if selected == self.selected {
            return false;
        }
        self.selected = selected;
        self.notify();
        true
    }

    fn notify(&mut self) {
        let keys = self.selected_sorted();
        log::debug!("[selection] changed: {} selected", keys.len());
        if let Some(observer) = self.observer.as_mut() {
            observer(&keys);
        }
    }

    /// Flip a row's membership. In single mode selecting a row deselects the
    /// previous one.
    pub fn toggle_row(&mut self, key: &str) -> Result<bool> {
        self.require_enabled()?;
        self.require_known(key)?;

        let mut next = self.selected.clone();
        if !next.remove(key) {
            if self.mode == SelectionMode::Single {
                next.clear();
            }
            next.insert(key.to_string());
        }
        self.anchor = Some(key.to_string());
        Ok(self.replace(next))
    }

    /// Select exactly one row, clearing the others.
    pub fn select(&mut self, key: &str) -> Result<bool> {
        self.require_enabled()?;
        self.require_known(key)?;

        self.anchor = Some(key.to_string());
        Ok(self.replace(HashSet::from([key.to_string()])))
    }

    /// Select the rows between the anchor and `key`, inclusive, in row order.
    ///
    /// If `extend` is false, rows outside the range are deselected. Without
    /// an anchor, or in single mode, this selects `key` alone.
    pub fn range_select(&mut self, key: &str, extend: bool) -> Result<bool> {
        self.require_enabled()?;
        self.require_known(key)?;
        if self.mode == SelectionMode::Single {
            return self.select(key);
        }

        let target = self.known.iter().position(|k| k == key);
        let anchor = self
            .anchor
            .as_deref()
            .and_then(|a| self.known.iter().position(|k| k == a));
        let (Some(target), Some(anchor)) = (target, anchor) else {
            return self.select(key);
        };
        let (start, end) = if anchor <= target {
            (anchor, target)
        } else {
            (target, anchor)
        };

        let mut next = if extend {
            self.selected.clone()
        } else {
            HashSet::new()
        };
        next.extend(self.known[start..=end].iter().cloned());
        // Anchor stays put so successive shift-presses pivot around it.
        Ok(self.replace(next))
    }

    /// Select every loaded row. Only available in multiple mode.
    pub fn select_all(&mut self) -> Result<bool> {
        if self.mode != SelectionMode::Multiple {
            return Err(TableError::SelectionDisabled);
        }
        let next = self.known.iter().cloned().collect();
        Ok(self.replace(next))
    }

    /// The select-all checkbox: clears when everything is selected,
    /// otherwise selects all.
    pub fn toggle_all(&mut self) -> Result<bool> {
        if self.tristate() == Tristate::Checked {
            if self.mode != SelectionMode::Multiple {
                return Err(TableError::SelectionDisabled);
            }
            Ok(self.clear_all())
        } else {
            self.select_all()
        }
    }

    /// Deselect everything.
    pub fn clear_all(&mut self) -> bool {
        self.anchor = None;
        self.replace(HashSet::new())
    }

    /// Replace the selection. Every key must be known; in single mode only
    /// the last key is kept.
    pub fn set_selected<I, S>(&mut self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.require_enabled()?;
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        for key in &keys {
            self.require_known(key)?;
        }

        let next: HashSet<String> = match self.mode {
            SelectionMode::Single => keys.last().cloned().into_iter().collect(),
            _ => keys.into_iter().collect(),
        };
        Ok(self.replace(next))
    }

    /// Update the ordered keys of the loaded rows.
    ///
    /// Selected keys that are gone are dropped; new keys are never selected.
    /// Repeated keys keep their first position.
    pub fn set_known_keys(&mut self, mut keys: Vec<String>) -> bool {
        let mut seen = HashSet::with_capacity(keys.len());
        keys.retain(|k| seen.insert(k.clone()));
        self.known = keys;
        if self
            .anchor
            .as_ref()
            .is_some_and(|a| !self.known.contains(a))
        {
            self.anchor = None;
        }
        let known: HashSet<&String> = self.known.iter().collect();
        let next: HashSet<String> = self
            .selected
            .iter()
            .filter(|k| known.contains(k))
            .cloned()
            .collect();
        self.replace(next)
    }
}
