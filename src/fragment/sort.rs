use super::Entry;

/// Order entries by change type, keeping file order within a type
pub fn sort_entries(entries: &mut [Entry]) {
  entries.sort_by_key(|e| e.entry_type.priority());
}
