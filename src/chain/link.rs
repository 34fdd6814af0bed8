//! Successor linking and ring closure over a record arena.

use std::collections::HashMap;

use crate::chain::record::{Link, ResourceRecord};
use crate::error::RepairError;

/// Positions of the records involved in closing a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainClosure {
    /// Index of the record whose link was broken.
    pub faulty: usize,
    /// Index of the tail the faulty record is now linked to.
    pub last: usize,
}

/// Fill in `successor` for every record claimed as a predecessor.
///
/// When several records claim the same predecessor, the later one in
/// `records` wins.
pub fn assign_successors(records: &mut [ResourceRecord]) {
    let mut claimants: HashMap<String, usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if let Some(pred) = record.predecessor() {
            claimants.insert(pred.to_string(), idx);
        }
    }

    let successors: Vec<Option<String>> = records
        .iter()
        .map(|r| claimants.get(&r.id).map(|&idx| records[idx].id.clone()))
        .collect();

    for (record, successor) in records.iter_mut().zip(successors) {
        if successor.is_some() {
            record.successor = successor;
        }
    }
}

/// Link successors, then attach the faulty record after the chain's tail.
///
/// The faulty record is the first one whose link is unparseable. The tail
/// is the first record without a successor, which may be the faulty record
/// itself; it then links to itself and becomes a head.
///
/// # Errors
///
/// Returns [`RepairError::ChainIncomplete`] when either record is missing.
/// `records` keeps its successor assignments but no ring is closed.
pub fn close_chain(records: &mut [ResourceRecord]) -> Result<ChainClosure, RepairError> {
    assign_successors(records);

    let faulty = records.iter().position(|r| r.link == Link::Unparseable);
    let last = records.iter().position(|r| r.successor.is_none());

    let (Some(faulty), Some(last)) = (faulty, last) else {
        return Err(RepairError::ChainIncomplete {
            faulty_found: faulty.is_some(),
            last_found: last.is_some(),
        });
    };

    let faulty_id = records[faulty].id.clone();
    let last_id = records[last].id.clone();
    records[faulty].link = if faulty == last { Link::Head } else { Link::Linked(last_id) };
    records[last].successor = Some(faulty_id);

    Ok(ChainClosure { faulty, last })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::chain::reconstruct::reconstruct;
    use crate::ports::SearchEntry;

    fn record(id: &str, link: Link) -> ResourceRecord {
        ResourceRecord {
            id: id.into(),
            name: "temp_log.csv".into(),
            url: String::new(),
            dataset_id: "p".into(),
            link,
            successor: None,
        }
    }

    fn entry(id: &str, pred: &str) -> SearchEntry {
        SearchEntry {
            id: id.into(),
            name: "temp_log.csv".into(),
            url: format!("https://data.coat.no/dataset/p/resource/{pred}/download/temp_log.csv"),
            package_id: "p".into(),
        }
    }

    /// Follow successors from the head, returning the visited ids.
    fn walk(records: &[ResourceRecord]) -> Vec<String> {
        let by_id: HashMap<&str, &ResourceRecord> =
            records.iter().map(|r| (r.id.as_str(), r)).collect();
        let mut current = records.iter().find(|r| r.is_head());
        let mut seen = Vec::new();
        while let Some(r) = current {
            if seen.contains(&r.id) {
                break;
            }
            seen.push(r.id.clone());
            current = r.successor.as_deref().and_then(|s| by_id.get(s).copied());
        }
        seen
    }

    #[test]
    fn temp_log_scenario_links_sentinel_after_tail() {
        let entries = vec![entry("a", "a"), entry("b", "a")];
        let sentinel = ResourceRecord::invalid("c", "temp_log.csv", "", "p");
        let mut records = reconstruct("temp_log.csv", &entries, &sentinel).unwrap();

        let closure = close_chain(&mut records).unwrap();

        let (a, b, c) = (&records[0], &records[1], &records[2]);
        assert!(a.is_head());
        assert_eq!(a.successor.as_deref(), Some("b"));
        assert_eq!(b.predecessor(), Some("a"));
        assert_eq!(b.successor.as_deref(), Some("c"));
        assert_eq!(c.predecessor(), Some("b"));
        assert_eq!(closure, ChainClosure { faulty: 2, last: 1 });
    }

    #[test]
    fn head_is_never_faulty() {
        let mut records = vec![record("a", Link::Head), record("b", Link::Linked("a".into()))];
        let err = close_chain(&mut records).unwrap_err();
        assert!(matches!(err, RepairError::ChainIncomplete { faulty_found: false, last_found: true }));
    }

    #[test]
    fn corrupted_middle_record_attaches_to_tail() {
        let mut records = vec![
            record("a", Link::Head),
            record("b", Link::Linked("a".into())),
            record("d", Link::Unparseable),
            record("e", Link::Linked("d".into())),
        ];

        let closure = close_chain(&mut records).unwrap();

        assert_eq!(closure.faulty, 2);
        // b and e have no claimant; b comes first in search order.
        assert_eq!(closure.last, 1);
        assert_eq!(records[2].predecessor(), Some("b"));
        assert_eq!(records[1].successor.as_deref(), Some("d"));
    }

    #[test]
    fn faulty_listed_first_is_its_own_tail() {
        let entries = vec![entry("a", "a"), entry("b", "a")];
        let mut records = vec![ResourceRecord::invalid("c", "temp_log.csv", "", "p")];
        records.extend(entries.iter().map(ResourceRecord::from_entry));

        let closure = close_chain(&mut records).unwrap();

        assert_eq!(closure, ChainClosure { faulty: 0, last: 0 });
        assert!(records[0].is_head());
        assert_eq!(records[0].successor.as_deref(), Some("c"));
        assert_eq!(records[2].successor, None);
    }

    #[test]
    fn faulty_closes_onto_itself_when_others_form_a_ring() {
        let mut records = vec![
            record("a", Link::Linked("b".into())),
            record("b", Link::Linked("a".into())),
            record("c", Link::Unparseable),
        ];

        let closure = close_chain(&mut records).unwrap();

        assert_eq!(closure, ChainClosure { faulty: 2, last: 2 });
        assert!(records[2].is_head());
    }

    #[test]
    fn claimed_faulty_with_no_tail_is_incomplete() {
        let mut records = vec![
            record("a", Link::Linked("c".into())),
            record("c", Link::Unparseable),
        ];
        // Successor left over from an earlier closure.
        records[0].successor = Some("c".into());

        let err = close_chain(&mut records).unwrap_err();

        assert!(matches!(err, RepairError::ChainIncomplete { faulty_found: true, last_found: false }));
        assert!(err.is_already_repaired());
    }

    #[test]
    fn lone_faulty_record_becomes_head() {
        let mut records = vec![record("c", Link::Unparseable)];

        let closure = close_chain(&mut records).unwrap();

        assert_eq!(closure, ChainClosure { faulty: 0, last: 0 });
        assert!(records[0].is_head());
    }

    #[test]
    fn duplicate_claimants_last_write_wins() {
        let mut records = vec![
            record("a", Link::Head),
            record("b", Link::Linked("a".into())),
            record("d", Link::Linked("a".into())),
        ];

        assign_successors(&mut records);

        assert_eq!(records[0].successor.as_deref(), Some("d"));
    }

    #[test]
    fn closed_ring_is_left_unchanged() {
        let mut records = vec![
            record("a", Link::Head),
            record("b", Link::Linked("a".into())),
            record("c", Link::Linked("b".into())),
        ];
        records[0].successor = Some("b".into());
        records[1].successor = Some("c".into());
        records[2].successor = Some("a".into());
        let before = records.clone();
        let err = close_chain(&mut records).unwrap_err();
        assert!(err.is_already_repaired());
        assert_eq!(records, before);
    }

    #[test]
    fn rerun_after_repair_is_a_no_op() {
        let entries = vec![entry("a", "a"), entry("b", "a"), entry("c", "b")];
        let sentinel = ResourceRecord::invalid("c", "temp_log.csv", "", "p");
        let mut records = reconstruct("temp_log.csv", &entries, &sentinel).unwrap();

        let err = close_chain(&mut records).unwrap_err();

        assert!(err.is_already_repaired());
        assert!(records.iter().all(|r| r.link != Link::Unparseable));
    }

    proptest! {
        #[test]
        fn well_formed_chain_walks_head_to_tail(len in 1usize..12, seed in any::<u64>()) {
            let ids: Vec<String> = (0..len).map(|_| uuid::Uuid::new_v4().to_string()).collect();
            let mut entries: Vec<SearchEntry> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| entry(id, if i == 0 { id } else { &ids[i - 1] }))
                .collect();
            // Deterministic shuffle so search order differs from chain order.
            let n = entries.len();
            for i in (1..n).rev() {
                let j = (seed.rotate_left(i as u32) as usize) % (i + 1);
                entries.swap(i, j);
            }

            let mut records: Vec<ResourceRecord> =
                entries.iter().map(ResourceRecord::from_entry).collect();
            assign_successors(&mut records);

            let visited = walk(&records);
            prop_assert_eq!(visited.len(), len);
            prop_assert_eq!(visited.iter().collect::<HashSet<_>>().len(), len);
            prop_assert_eq!(visited.last(), ids.last());
            let tail = records.iter().find(|r| &r.id == ids.last().unwrap()).unwrap();
            prop_assert!(tail.successor.is_none());
        }

        #[test]
        fn single_corruption_is_repaired_onto_tail(len in 2usize..10, broken in 1usize..10) {
            let broken = broken % len;
            prop_assume!(broken != 0);
            let ids: Vec<String> = (0..len).map(|_| uuid::Uuid::new_v4().to_string()).collect();
            let mut records: Vec<ResourceRecord> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let link = if i == 0 {
                        Link::Head
                    } else if i == broken {
                        Link::Unparseable
                    } else {
                        Link::Linked(ids[i - 1].clone())
                    };
                    record(id, link)
                })
                .collect();

            let closure = close_chain(&mut records).unwrap();

            // The record before the break lost its claimant, and it is the
            // first successor-less record in order.
            prop_assert_eq!(closure.faulty, broken);
            prop_assert_eq!(closure.last, broken - 1);
            prop_assert_eq!(&records[broken].link, &Link::Linked(ids[broken - 1].clone()));
            prop_assert_eq!(records[broken - 1].successor.as_deref(), Some(ids[broken].as_str()));
        }
    }
}
