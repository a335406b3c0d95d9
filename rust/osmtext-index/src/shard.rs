//! Shard keys and the single-slot shard cache.

use crate::entry::AddressEntry;

/// Extension of every shard file.
pub const SHARD_FILE_EXTENSION: &str = "json";

/// The fixed-length token prefix naming a shard file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShardKey(String);

impl ShardKey {
    pub(crate) fn new(prefix: impl Into<String>) -> ShardKey {
        ShardKey(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the shard resource under the base location, e.g. `mai.json`.
    pub fn file_name(&self) -> String {
        format!("{}.{SHARD_FILE_EXTENSION}", self.0)
    }
}

impl std::fmt::Display for ShardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds at most one resident shard.
///
/// `entries` always belong to the shard named by `active`, and are empty when
/// no shard is resident. A new shard replaces the resident one wholesale.
#[derive(Debug, Default)]
pub struct ShardSlot {
    active: Option<ShardKey>,
    entries: Vec<AddressEntry>,
}

impl ShardSlot {
    pub fn new() -> ShardSlot {
        ShardSlot::default()
    }

    pub fn active_key(&self) -> Option<&ShardKey> {
        self.active.as_ref()
    }

    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    /// Returns `true` if `key` is the resident shard.
    pub fn is_resident(&self, key: &ShardKey) -> bool {
        self.active.as_ref() == Some(key)
    }

    /// Makes `key` the resident shard, discarding the previous one.
    pub fn replace(&mut self, key: ShardKey, entries: Vec<AddressEntry>) {
        self.active = Some(key);
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_key_file_name() {
        let key = ShardKey::new("mai");
        assert_eq!(key.file_name(), "mai.json");
        assert_eq!(key.to_string(), "mai");
    }

    #[test]
    fn test_slot_replacement() {
        let mut slot = ShardSlot::new();
        assert!(slot.active_key().is_none());
        assert!(slot.entries().is_empty());

        let abc = ShardKey::new("abc");
        let xyz = ShardKey::new("xyz");
        slot.replace(abc.clone(), vec![AddressEntry::new("Abcde Road", 0.0, 0.0)]);
        assert!(slot.is_resident(&abc));
        assert!(!slot.is_resident(&xyz));

        slot.replace(xyz.clone(), Vec::new());
        assert!(slot.is_resident(&xyz));
        assert!(!slot.is_resident(&abc));
        assert!(slot.entries().is_empty());
    }
}
