use crate::domain::model::{SectorNode, SectorRecord};
use crate::utils::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

/// What to do with a record whose `parent_id` is not in the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the record (and anything below it) out of the forest.
    #[default]
    Drop,
    /// Fail the whole build with [`FormError::DanglingParent`].
    Reject,
}

/// Turn the flat parent/child list into an ordered forest.
///
/// Roots and siblings keep input order. Every record is placed once, by its
/// own `parent_id`, so nothing here walks the tree; records whose parent
/// chain never reaches a root (self-parent, mutual parents) are simply not
/// reachable from the result.
#[instrument(level = "debug", skip(records), fields(records = records.len()))]
pub fn build_forest(records: Vec<SectorRecord>, policy: OrphanPolicy) -> Result<Vec<SectorNode>> {
    let mut index: HashMap<i64, usize> = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        index.insert(record.id, position);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();

    for (position, record) in records.iter().enumerate() {
        match record.parent_id {
            None => roots.push(position),
            Some(parent_id) => match index.get(&parent_id) {
                Some(&parent) => children[parent].push(position),
                None => match policy {
                    OrphanPolicy::Drop => {
                        tracing::debug!(
                            "Dropping sector {} ({}): parent {} not found",
                            record.id,
                            record.name,
                            parent_id
                        );
                    }
                    OrphanPolicy::Reject => {
                        return Err(FormError::DanglingParent {
                            id: record.id,
                            parent_id,
                        });
                    }
                },
            },
        }
    }

    let mut slots: Vec<Option<SectorRecord>> = records.into_iter().map(Some).collect();
    let forest = roots
        .into_iter()
        .filter_map(|root| take_subtree(root, &mut slots, &children))
        .collect();

    Ok(forest)
}

fn take_subtree(
    position: usize,
    slots: &mut [Option<SectorRecord>],
    children: &[Vec<usize>],
) -> Option<SectorNode> {
    let record = slots[position].take()?;
    let mut node = SectorNode::from(record);
    node.children = children[position]
        .iter()
        .filter_map(|&child| take_subtree(child, slots, children))
        .collect();
    Some(node)
}
