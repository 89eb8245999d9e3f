use crate::facts::Issue;
use crate::hash_map_with_capacity;
use core::hash::Hash;

/// Issues sharing one value of a reporting dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, K> {
    pub key: K,
    pub issues: Vec<&'a Issue>,
}

/// Groups `issues` by the keys `key_fn` extracts, producing one group per entry of `key_order`.
///
/// Groups come out in `key_order` order and are kept even when empty. Keys missing from
/// `key_order` are dropped. An issue with several keys lands in each matching group once, and
/// issues keep their input order within a group.
pub fn group_by<'a, K, I, F>(issues: &[&'a Issue], key_order: &[K], key_fn: F) -> Vec<Group<'a, K>>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
    F: Fn(&'a Issue) -> I,
{
    let mut positions = hash_map_with_capacity(key_order.len());
    for (index, key) in key_order.iter().enumerate() {
        let _ = positions.entry(key.clone()).or_insert(index);
    }

    let mut groups: Vec<Group<'a, K>> = key_order
        .iter()
        .map(|key| Group {
            key: key.clone(),
            issues: Vec::new(),
        })
        .collect();

    let mut hit: Vec<usize> = Vec::new();
    for &issue in issues {
        hit.clear();
        for key in key_fn(issue) {
            if let Some(&index) = positions.get(&key)
                && !hit.contains(&index)
            {
                hit.push(index);
                groups[index].issues.push(issue);
            }
        }
    }

    groups
}
