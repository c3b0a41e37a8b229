use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{DifferingEntry, ExclusiveEntry, SectionDiff};
use crate::schema::{is_single_occurrence, SINGLE_ENTRY_KEY};
use crate::{entry_key, field_dict, Element};

pub(super) fn diff_section(name: &str, lhs: &[&Element], rhs: &[&Element]) -> SectionDiff {
    let left = keyed_entries(name, lhs);
    let right = keyed_entries(name, rhs);

    let mut diff = SectionDiff::new(name);

    for (key, element) in &left {
        match right.get(key) {
            Some(other) => {
                let lhs_fields = field_dict(element);
                let rhs_fields = field_dict(other);
                if lhs_fields != rhs_fields {
                    diff.differing.push(DifferingEntry {
                        key: key.clone(),
                        left: lhs_fields,
                        right: rhs_fields,
                    });
                }
            }
            None => diff.only_in_left.push(ExclusiveEntry::new(key.clone(), element)),
        }
    }
    for (key, element) in &right {
        if !left.contains_key(key) {
            diff.only_in_right.push(ExclusiveEntry::new(key.clone(), element));
        }
    }

    if left.is_empty() && right.is_empty() {
        if is_single_occurrence(name) {
            diff_single(&mut diff, lhs, rhs);
        } else if !lhs.is_empty() || !rhs.is_empty() {
            debug!(section = name, "skipping unkeyed section");
        }
    }

    diff
}

fn keyed_entries<'a>(section: &str, entries: &[&'a Element]) -> BTreeMap<String, &'a Element> {
    let mut keyed = BTreeMap::new();
    for element in entries {
        let Some(key) = entry_key(section, element) else {
            continue;
        };
        if keyed.insert(key, *element).is_some() {
            warn!(section, "duplicate entry key; keeping the last occurrence");
        }
    }
    keyed
}

fn diff_single(diff: &mut SectionDiff, lhs: &[&Element], rhs: &[&Element]) {
    match (lhs, rhs) {
        ([left], [right]) => {
            let lhs_fields = field_dict(left);
            let rhs_fields = field_dict(right);
            if lhs_fields != rhs_fields {
                diff.differing.push(DifferingEntry {
                    key: SINGLE_ENTRY_KEY.to_string(),
                    left: lhs_fields,
                    right: rhs_fields,
                });
            }
        }
        ([left], []) => diff.only_in_left.push(ExclusiveEntry::new(SINGLE_ENTRY_KEY, left)),
        ([], [right]) => diff.only_in_right.push(ExclusiveEntry::new(SINGLE_ENTRY_KEY, right)),
        _ => debug!(
            section = diff.name.as_str(),
            left = lhs.len(),
            right = rhs.len(),
            "single-occurrence section repeats; not compared"
        ),
    }
}
