//! Record collection diff computation.
//!
//! The core entry point is [`diff_records`], which pairs two ordered record
//! collections under an [`IdentityMode`] and produces a [`RecordDiff`].

use std::collections::{HashMap, HashSet};

use crate::diff::model::{FieldChange, Identity, IdentityMode, RecordChange, RecordDiff};
use crate::record::Record;

/// Compute the additions, removals and changes between two collections.
///
/// The caller decides what an empty `old` means; this function simply
/// reports every record of `new` as an addition in that case.
pub fn diff_records(old: &[Record], new: &[Record], mode: &IdentityMode) -> RecordDiff {
    match mode {
        IdentityMode::Positional => diff_positional(old, new),
        IdentityMode::Keyed { key } => diff_keyed(old, new, key),
    }
}

/// List the fields whose canonical values differ between two records.
///
/// Fields are reported in `before` order, followed by fields that exist
/// only in `after`.
pub fn changed_fields(before: &Record, after: &Record) -> Vec<FieldChange> {
    let mut changes: Vec<FieldChange> = before
        .iter()
        .filter_map(|(name, old)| match after.get(name) {
            Some(new) if new.same_as(old) => None,
            new => Some(FieldChange {
                field: name.to_string(),
                old: Some(old.clone()),
                new: new.cloned(),
            }),
        })
        .collect();

    changes.extend(
        after
            .iter()
            .filter(|(name, _)| !before.contains(name))
            .map(|(name, new)| FieldChange {
                field: name.to_string(),
                old: None,
                new: Some(new.clone()),
            }),
    );

    changes
}

fn record_change(identity: Identity, before: &Record, after: &Record) -> Option<RecordChange> {
    let changed = changed_fields(before, after);
    if changed.is_empty() {
        return None;
    }
    Some(RecordChange {
        identity,
        before: before.clone(),
        after: after.clone(),
        changed_fields: changed,
    })
}

fn diff_positional(old: &[Record], new: &[Record]) -> RecordDiff {
    let paired = old.len().min(new.len());

    let changes = old
        .iter()
        .zip(new.iter())
        .enumerate()
        .filter_map(|(index, (before, after))| record_change(Identity::Index(index), before, after))
        .collect();

    RecordDiff {
        additions: new[paired..].to_vec(),
        removals: old[paired..].to_vec(),
        changes,
    }
}

/// Key of a record in keyed mode.
///
/// A missing or null key field yields `None`: such a record can only ever be
/// an addition or a removal.
fn key_of(record: &Record, key: &str) -> Option<String> {
    record
        .get(key)
        .filter(|value| !value.is_null())
        .map(|value| value.canonical())
}

/// Build key → index, keeping the last record for a duplicated key.
fn key_index(records: &[Record], key: &str) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| key_of(record, key).map(|k| (k, index)))
        .collect()
}

/// Records that win the key lookup, in source order, with their keys.
///
/// Keyless records are yielded with `None`; shadowed duplicates are skipped.
fn effective<'a>(
    records: &'a [Record],
    index: &'a HashMap<String, usize>,
    key: &'a str,
) -> impl Iterator<Item = (Option<String>, &'a Record)> + 'a {
    records
        .iter()
        .enumerate()
        .filter_map(move |(i, record)| match key_of(record, key) {
            None => Some((None, record)),
            Some(k) if index.get(&k) == Some(&i) => Some((Some(k), record)),
            Some(_) => None,
        })
}

fn diff_keyed(old: &[Record], new: &[Record], key: &str) -> RecordDiff {
    let old_index = key_index(old, key);
    let new_index = key_index(new, key);

    let mut diff = RecordDiff::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (k, after) in effective(new, &new_index, key) {
        match k.and_then(|k| old_index.get(&k).map(|&i| (k, i))) {
            Some((k, i)) => {
                seen.insert(k.clone());
                if let Some(change) = record_change(Identity::Key(k), &old[i], after) {
                    diff.changes.push(change);
                }
            }
            None => diff.additions.push(after.clone()),
        }
    }

    diff.removals = effective(old, &old_index, key)
        .filter(|(k, _)| k.as_ref().map_or(true, |k| !seen.contains(k)))
        .map(|(_, record)| record.clone())
        .collect();

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    fn effect(id: i64, values: Vec<i64>) -> Record {
        Record::new()
            .with("id", id)
            .with("effectType", 20)
            .with("values", values)
    }

    #[test]
    fn test_changed_fields_reports_added_and_dropped_fields() {
        let before = Record::new().with("a", 1).with("b", 2);
        let after = Record::new().with("a", 1).with("c", 3);

        let changes = changed_fields(&before, &after);
        let names: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(changes[0].new, None);
        assert_eq!(changes[1].old, None);
        assert_eq!(changes[1].new, Some(FieldValue::Int(3)));
    }

    #[test]
    fn test_positional_tail_addition_and_removal() {
        let a = vec![effect(1, vec![0, 5])];
        let b = vec![effect(1, vec![0, 5]), effect(2, vec![1, 1])];

        let grow = diff_records(&a, &b, &IdentityMode::Positional);
        assert_eq!(grow.additions, vec![effect(2, vec![1, 1])]);
        assert!(grow.removals.is_empty() && grow.changes.is_empty());

        let shrink = diff_records(&b, &a, &IdentityMode::Positional);
        assert_eq!(shrink.removals, vec![effect(2, vec![1, 1])]);
        assert!(shrink.additions.is_empty() && shrink.changes.is_empty());
    }

    #[test]
    fn test_keyed_missing_key_is_add_or_remove() {
        let keyless_old = Record::new().with("enabled", true);
        let keyless_new = Record::new().with("enabled", false);
        let old = vec![Record::new().with("id32", 1), keyless_old.clone()];
        let new = vec![Record::new().with("id32", 1), keyless_new.clone()];

        let diff = diff_records(&old, &new, &IdentityMode::keyed("id32"));
        assert_eq!(diff.additions, vec![keyless_new]);
        assert_eq!(diff.removals, vec![keyless_old]);
        assert!(diff.changes.is_empty());
    }

    #[test]
    fn test_keyed_null_key_counts_as_missing() {
        let old = vec![Record::new().with("id32", FieldValue::Null)];
        let new = vec![Record::new().with("id32", FieldValue::Null)];

        let diff = diff_records(&old, &new, &IdentityMode::keyed("id32"));
        assert_eq!(diff.additions.len(), 1);
        assert_eq!(diff.removals.len(), 1);
    }

    #[test]
    fn test_keyed_duplicate_key_last_wins() {
        let old = vec![Record::new().with("id32", 1).with("v", "a")];
        let new = vec![
            Record::new().with("id32", 1).with("v", "shadowed"),
            Record::new().with("id32", 1).with("v", "a"),
        ];

        let diff = diff_records(&old, &new, &IdentityMode::keyed("id32"));
        assert!(diff.is_empty(), "last duplicate equals old record: {:?}", diff);
    }

    #[test]
    fn test_keyed_change_identity_is_canonical_key() {
        let old = vec![Record::new().with("id32", 7).with("enabled", true)];
        let new = vec![Record::new().with("id32", 7).with("enabled", false)];

        let diff = diff_records(&old, &new, &IdentityMode::keyed("id32"));
        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.changes[0].identity, Identity::Key("7".to_string()));
        assert_eq!(diff.changes[0].field_names(), vec!["enabled"]);
    }

    #[test]
    fn test_string_and_number_keys_do_not_collide() {
        let old = vec![Record::new().with("id", 1)];
        let new = vec![Record::new().with("id", "1")];

        let diff = diff_records(&old, &new, &IdentityMode::keyed("id"));
        assert_eq!(diff.additions.len(), 1);
        assert_eq!(diff.removals.len(), 1);
    }
}
