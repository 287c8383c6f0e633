//! Module slots: a bounded label and an independent threshold per id.

use crate::config::{
    DEFAULT_DEBUG_LEVEL, GLOBAL_LABEL, GLOBAL_MODULE, MAX_MODULES, MODULE_LABEL_SIZE, UNUSED_LABEL,
};
use crate::level::DebugLevel;

/// Short module name, truncated to `MODULE_LABEL_SIZE - 1` bytes
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ModuleLabel {
    bytes: [u8; MODULE_LABEL_SIZE],
    len: usize,
}

impl ModuleLabel {
    pub fn new(label: &str) -> Self {
        let mut copy_len = label.len().min(MODULE_LABEL_SIZE - 1);
        // Never split a UTF-8 sequence
        while !label.is_char_boundary(copy_len) {
            copy_len -= 1;
        }
        let mut bytes = [0u8; MODULE_LABEL_SIZE];
        bytes[..copy_len].copy_from_slice(&label.as_bytes()[..copy_len]);
        Self { bytes, len: copy_len }
    }

    pub fn unused() -> Self {
        Self::new(UNUSED_LABEL)
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or(UNUSED_LABEL)
    }

    pub fn is_unused(&self) -> bool {
        self.as_str() == UNUSED_LABEL
    }
}

impl core::fmt::Debug for ModuleLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl core::fmt::Display for ModuleLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One module's label and threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModuleSlot {
    pub label: ModuleLabel,
    pub level: DebugLevel,
}

/// Fixed table of module slots. Slot 0 is the global module.
pub struct ModuleTable {
    slots: [ModuleSlot; MAX_MODULES],
}

impl ModuleTable {
    pub fn new(global_level: DebugLevel) -> Self {
        let unused = ModuleSlot {
            label: ModuleLabel::unused(),
            level: DebugLevel::None,
        };
        let mut slots = [unused; MAX_MODULES];
        slots[GLOBAL_MODULE] = ModuleSlot {
            label: ModuleLabel::new(GLOBAL_LABEL),
            level: global_level,
        };
        Self { slots }
    }

    pub fn get(&self, module: usize) -> Option<&ModuleSlot> {
        self.slots.get(module)
    }

    pub fn level(&self, module: usize) -> Option<DebugLevel> {
        self.get(module).map(|slot| slot.level)
    }

    pub fn label(&self, module: usize) -> Option<&str> {
        self.get(module).map(|slot| slot.label.as_str())
    }

    /// Store a threshold without looking at the label. Returns false for an
    /// out-of-range id.
    pub fn set_level(&mut self, module: usize, level: DebugLevel) -> bool {
        match self.slots.get_mut(module) {
            Some(slot) => {
                slot.level = level;
                true
            }
            None => false,
        }
    }

    pub fn set_label(&mut self, module: usize, label: &str) -> bool {
        match self.slots.get_mut(module) {
            Some(slot) => {
                slot.label = ModuleLabel::new(label);
                true
            }
            None => false,
        }
    }

    pub fn set_all_levels(&mut self, level: DebugLevel) {
        for slot in self.slots.iter_mut() {
            slot.level = level;
        }
    }

    /// Look a module up by label, ignoring ASCII case. Unused slots never match.
    pub fn find(&self, label: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| !slot.label.is_unused() && slot.label.as_str().eq_ignore_ascii_case(label))
    }

    /// Registered (non-"NA") modules with their ids
    pub fn registered(&self) -> impl Iterator<Item = (usize, &ModuleSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.label.is_unused())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleSlot> {
        self.slots.iter()
    }
}

impl Default for ModuleTable {
    fn default() -> Self {
        Self::new(DEFAULT_DEBUG_LEVEL)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_truncation() {
        let label = ModuleLabel::new("ACCELEROMETER");
        assert_eq!(label.as_str(), "ACCELEROM");
        assert_eq!(label.as_str().len(), MODULE_LABEL_SIZE - 1);
    }

    #[test]
    fn test_label_truncation_keeps_utf8_valid() {
        // 'é' is two bytes and straddles the cut
        let label = ModuleLabel::new("ABCDEFGHé");
        assert_eq!(label.as_str(), "ABCDEFGH");
    }

    #[test]
    fn test_default_table() {
        let table = ModuleTable::default();
        assert_eq!(table.label(0), Some("GLOBAL"));
        assert_eq!(table.level(0), Some(DebugLevel::Info));
        assert_eq!(table.label(1), Some("NA"));
        assert_eq!(table.level(1), Some(DebugLevel::None));
        assert_eq!(table.label(MAX_MODULES), None);
        assert_eq!(table.registered().count(), 1);
    }

    #[test]
    fn test_find_by_label() {
        let mut table = ModuleTable::default();
        table.set_label(3, "Motor");
        assert_eq!(table.find("MOTOR"), Some(3));
        assert_eq!(table.find("global"), Some(0));
        assert_eq!(table.find("NA"), None);
    }

    #[test]
    fn test_set_all_levels_hits_unused_slots() {
        let mut table = ModuleTable::default();
        table.set_all_levels(DebugLevel::Error);
        assert!(table.iter().all(|slot| slot.level == DebugLevel::Error));
    }
}
