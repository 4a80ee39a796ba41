use super::tree::DottedTree;
use super::value::Value;

/// Deep-merges `overlay` over `base`, returning a new tree.
///
/// Keys present on both sides are merged recursively when both values are
/// trees; otherwise the overlay value replaces the base value (including
/// arrays, and a base tree facing a scalar). Base-only keys keep their
/// position and overlay-only keys are appended.
pub fn merge(base: &DottedTree, overlay: &DottedTree) -> DottedTree {
    let mut merged = base.clone();
    deep_merge(&mut merged, overlay.clone());
    merged
}

pub(crate) fn deep_merge(base: &mut DottedTree, overlay: DottedTree) {
    let entries = base.entries_mut();
    for (key, value) in overlay {
        match (entries.get_mut(&key), value) {
            (Some(Value::Tree(base_tree)), Value::Tree(overlay_tree)) => {
                deep_merge(base_tree, overlay_tree);
            }
            (_, value) => {
                entries.insert(key, value);
            }
        }
    }
}
