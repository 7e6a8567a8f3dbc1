use crate::domain::model::{DisplaySector, SectorNode};

pub const DEFAULT_INDENT_MARKER: &str = "----";

/// Pre-order walk of the forest; each name gets `marker` repeated once per
/// level below the roots.
pub fn flatten_forest(forest: &[SectorNode], marker: &str) -> Vec<DisplaySector> {
    let mut out = Vec::new();
    for root in forest {
        push_subtree(root, 0, marker, &mut out);
    }
    out
}

pub fn flatten_forest_default(forest: &[SectorNode]) -> Vec<DisplaySector> {
    flatten_forest(forest, DEFAULT_INDENT_MARKER)
}

fn push_subtree(node: &SectorNode, depth: usize, marker: &str, out: &mut Vec<DisplaySector>) {
    out.push(DisplaySector {
        id: node.id,
        parent_id: node.parent_id,
        depth,
        name: format!("{}{}", marker.repeat(depth), node.name),
    });
    for child in &node.children {
        push_subtree(child, depth + 1, marker, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sector_tree::{build_forest, OrphanPolicy};
    use crate::domain::model::SectorRecord;

    fn names(list: &[DisplaySector]) -> Vec<&str> {
        list.iter().map(|s| s.name.as_str()).collect()
    }

    fn sample_records() -> Vec<SectorRecord> {
        vec![
            SectorRecord::new(1, None, "Manufacturing"),
            SectorRecord::new(19, Some(1), "Construction materials"),
            SectorRecord::new(6, Some(1), "Food and Beverage"),
            SectorRecord::new(342, Some(6), "Bakery & confectionery products"),
            SectorRecord::new(2, None, "Service"),
            SectorRecord::new(25, Some(2), "Business services"),
            SectorRecord::new(3, None, "Other"),
        ]
    }

    #[test]
    fn test_flatten_basic_scenario() {
        let records = vec![
            SectorRecord::new(1, None, "A"),
            SectorRecord::new(2, Some(1), "B"),
            SectorRecord::new(3, None, "C"),
        ];
        let forest = build_forest(records, OrphanPolicy::Drop).unwrap();

        let flat = flatten_forest_default(&forest);

        assert_eq!(names(&flat), vec!["A", "----B", "C"]);
    }

    #[test]
    fn test_prefix_matches_depth() {
        let forest = build_forest(sample_records(), OrphanPolicy::Drop).unwrap();

        let flat = flatten_forest_default(&forest);

        for sector in &flat {
            let prefix_len = DEFAULT_INDENT_MARKER.len() * sector.depth;
            assert_eq!(
                &sector.name[..prefix_len],
                DEFAULT_INDENT_MARKER.repeat(sector.depth)
            );
            assert!(!sector.name[prefix_len..].starts_with('-'));
        }
        let bakery = flat.iter().find(|s| s.id == 342).unwrap();
        assert_eq!(bakery.depth, 2);
        assert_eq!(bakery.name, "--------Bakery & confectionery products");
    }

    #[test]
    fn test_length_preserved_without_orphans() {
        let records = sample_records();
        let expected = records.len();
        let forest = build_forest(records, OrphanPolicy::Reject).unwrap();

        assert_eq!(flatten_forest_default(&forest).len(), expected);
    }

    #[test]
    fn test_parent_precedes_descendants() {
        let forest = build_forest(sample_records(), OrphanPolicy::Drop).unwrap();
        let flat = flatten_forest_default(&forest);
        let position = |id: i64| flat.iter().position(|s| s.id == id).unwrap();

        for sector in &flat {
            if let Some(parent_id) = sector.parent_id {
                assert!(position(parent_id) < position(sector.id));
            }
        }
        assert_eq!(
            flat.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 19, 6, 342, 2, 25, 3]
        );
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let forest = build_forest(sample_records(), OrphanPolicy::Drop).unwrap();

        let first = flatten_forest_default(&forest);
        let second = flatten_forest_default(&forest);

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_marker() {
        let forest = build_forest(sample_records(), OrphanPolicy::Drop).unwrap();

        let flat = flatten_forest(&forest, "  ");

        assert_eq!(flat[3].name, "    Bakery & confectionery products");
    }
}
