//! Dependency Filter
//!
//! Restricts a full result map to the entries reachable from a requested
//! root interface. Reachability is the transitive closure of component
//! references: resolution is fully recursive, so a filter that only kept the
//! root's direct children would silently drop the lower levels of a nested
//! hierarchy. See DESIGN.md for the rationale.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::builder::RawModel;
use crate::content;

/// Restrict `all` to the root plus everything transitively reachable from it
/// through component references.
///
/// Returns `None` when `root_id` is not present in `all` — "model id not
/// found" is distinct from an empty result.
pub fn filter_reachable<C>(all: &BTreeMap<String, C>, root_id: &str) -> Option<BTreeMap<String, C>>
where
    C: RawModel + Clone,
{
    let root = content::canonical_model_id(root_id);
    if !all.contains_key(&root) {
        return None;
    }

    let mut reachable = BTreeSet::new();
    reachable.insert(root.clone());
    let mut queue = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        let Some(container) = all.get(&id) else {
            continue;
        };
        let Some(contents) = content::contents_of(container.raw()) else {
            continue;
        };

        for element in contents
            .iter()
            .filter(|element| content::has_type(element, "Component"))
        {
            let Some(schema_ref) = content::component_schema_ref(element) else {
                continue;
            };
            let key = content::canonical_model_id(schema_ref);
            if reachable.insert(key.clone()) {
                queue.push_back(key);
            }
        }
    }

    Some(
        all.iter()
            .filter(|(id, _)| reachable.contains(*id))
            .map(|(id, container)| (id.clone(), container.clone()))
            .collect(),
    )
}
