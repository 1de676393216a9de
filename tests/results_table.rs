// tests/results_table.rs

use crackwatch::session::{ResultRecord, ResultTable};
use proptest::prelude::*;

#[test]
fn duplicates_are_kept_in_order() {
    let mut table = ResultTable::new();
    table.append(ResultRecord::new("abc", "one"));
    table.append(ResultRecord::new("abc", "one"));
    table.append(ResultRecord::new("def", "two"));

    assert_eq!(table.len(), 3);
    let hashes: Vec<&str> = table.iter().map(|r| r.hash.as_str()).collect();
    assert_eq!(hashes, vec!["abc", "abc", "def"]);
}

#[test]
fn clear_empties_the_table() {
    let mut table = ResultTable::new();
    table.append(ResultRecord::new("abc", "one"));
    table.clear();
    assert!(table.is_empty());
    assert!(table.records().is_empty());
}

proptest! {
    #[test]
    fn clear_then_append_holds_exactly_the_new_records(
        before in prop::collection::vec(("[0-9a-f]{1,8}", "[ -~]{0,8}"), 0..10),
        after in prop::collection::vec(("[0-9a-f]{1,8}", "[ -~]{0,8}"), 0..10),
    ) {
        let mut table = ResultTable::new();
        for (h, s) in &before {
            table.append(ResultRecord::new(h.as_str(), s.as_str()));
        }

        table.clear();
        let expected: Vec<ResultRecord> = after
            .iter()
            .map(|(h, s)| ResultRecord::new(h.as_str(), s.as_str()))
            .collect();
        for record in &expected {
            table.append(record.clone());
        }

        prop_assert_eq!(table.records(), expected.as_slice());
        let iterated: Vec<&ResultRecord> = (&table).into_iter().collect();
        prop_assert_eq!(iterated.len(), expected.len());
    }
}
