//! Tests for the reconciling view: merge scenarios and invariants under
//! arbitrary interleavings of snapshots, pushes and local updates.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    use crate::{Bookmark, BookmarkChange, BookmarkId, BookmarkView, UserId};

    const OWNER: UserId = UserId::from_u128(100);

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn bm(id: u128, title: &str, secs: i64) -> Bookmark {
        Bookmark::new(
            BookmarkId::from_u128(id),
            format!("https://{}.com", title.to_lowercase()),
            title,
            at(secs),
            OWNER,
        )
    }

    fn titles(view: &BookmarkView) -> Vec<String> {
        view.iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn local_insert_then_push_of_same_row_is_not_duplicated() {
        let mut view = BookmarkView::from_snapshot(vec![]);
        let a = bm(1, "A", 10);

        assert!(view.apply_created(a.clone()));
        assert_eq!(titles(&view), vec!["A"]);

        assert!(!view.apply(BookmarkChange::Created(a)));
        assert_eq!(titles(&view), vec!["A"]);
    }

    #[test]
    fn push_delete_then_matching_poll_is_unchanged() {
        let mut view = BookmarkView::from_snapshot(vec![bm(2, "B", 20), bm(1, "A", 10)]);
        let changed = view.apply(BookmarkChange::Deleted { id: BookmarkId::from_u128(2), user_id: OWNER });
        assert!(changed);
        assert_eq!(titles(&view), vec!["A"]);

        assert!(!view.replace(vec![bm(1, "A", 10)]));
        assert_eq!(titles(&view), vec!["A"]);
    }

    #[test]
    fn delete_of_absent_id_is_noop() {
        let mut view = BookmarkView::from_snapshot(vec![bm(1, "A", 10)]);
        let before = view.snapshot();
        assert!(!view.apply_deleted(&BookmarkId::from_u128(42)));
        assert_eq!(view.snapshot(), before);
    }

    #[test]
    fn created_twice_equals_created_once() {
        let mut once = BookmarkView::new();
        once.apply_created(bm(3, "C", 30));
        let mut twice = once.clone();
        twice.apply_created(bm(3, "C", 30));
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn newer_local_insert_goes_first() {
        let mut view = BookmarkView::from_snapshot(vec![bm(1, "A", 10)]);
        view.apply_created(bm(2, "B", 20));
        assert_eq!(titles(&view), vec!["B", "A"]);
    }

    #[test]
    fn older_push_row_keeps_descending_order() {
        let mut view = BookmarkView::from_snapshot(vec![bm(2, "B", 20)]);
        view.apply_created(bm(1, "A", 10));
        assert_eq!(titles(&view), vec!["B", "A"]);
    }

    #[test]
    fn poll_discards_local_only_rows() {
        let mut view = BookmarkView::from_snapshot(vec![bm(1, "A", 10)]);
        view.apply_created(bm(2, "B", 20));
        assert!(view.replace(vec![bm(1, "A", 10)]));
        assert_eq!(titles(&view), vec!["A"]);
        assert!(!view.contains(&BookmarkId::from_u128(2)));
    }

    #[test]
    fn poll_sorts_unsorted_snapshot() {
        let mut view = BookmarkView::new();
        view.replace(vec![bm(1, "A", 10), bm(3, "C", 30), bm(2, "B", 20)]);
        assert_eq!(titles(&view), vec!["C", "B", "A"]);
    }

    #[test]
    fn snapshot_with_duplicate_ids_keeps_first() {
        let view = BookmarkView::from_snapshot(vec![bm(1, "A", 10), bm(1, "A-dup", 5)]);
        assert_eq!(view.len(), 1);
        assert_eq!(titles(&view), vec!["A"]);
    }

    #[test]
    fn same_timestamp_is_ordered_by_id() {
        let view = BookmarkView::from_snapshot(vec![bm(9, "Z", 10), bm(4, "Y", 10)]);
        let ids: Vec<_> = view.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BookmarkId::from_u128(4), BookmarkId::from_u128(9)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Created(u8, i64),
        Deleted(u8),
        Poll(Vec<(u8, i64)>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8, 0i64..50).prop_map(|(id, t)| Op::Created(id, t)),
            (0u8..8).prop_map(Op::Deleted),
            prop::collection::vec((0u8..8, 0i64..50), 0..8).prop_map(Op::Poll),
        ]
    }

    fn row(id: u8, secs: i64) -> Bookmark {
        bm(u128::from(id), &format!("T{id}"), secs)
    }

    fn apply_op(view: &mut BookmarkView, op: &Op) {
        match op {
            Op::Created(id, t) => {
                view.apply_created(row(*id, *t));
            },
            Op::Deleted(id) => {
                view.apply_deleted(&BookmarkId::from_u128(u128::from(*id)));
            },
            Op::Poll(rows) => {
                view.replace(rows.iter().map(|(id, t)| row(*id, *t)).collect());
            },
        }
    }

    fn assert_sorted_and_unique(view: &BookmarkView) -> Result<(), TestCaseError> {
        let snapshot = view.snapshot();
        let mut seen = std::collections::HashSet::new();
        for b in &snapshot {
            prop_assert!(seen.insert(b.id), "duplicate id {}", b.id);
        }
        for pair in snapshot.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
        prop_assert_eq!(snapshot.len(), view.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn never_contains_duplicate_ids(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut view = BookmarkView::new();
            for op in &ops {
                apply_op(&mut view, op);
                assert_sorted_and_unique(&view)?;
            }
        }

        #[test]
        fn created_is_idempotent(
            ops in prop::collection::vec(op_strategy(), 0..20),
            id in 0u8..8,
            t in 0i64..50,
        ) {
            let mut view = BookmarkView::new();
            for op in &ops {
                apply_op(&mut view, op);
            }
            let mut once = view.clone();
            once.apply_created(row(id, t));
            let mut twice = once.clone();
            prop_assert!(!twice.apply_created(row(id, t)));
            prop_assert_eq!(once.snapshot(), twice.snapshot());
        }

        #[test]
        fn deleting_absent_id_is_noop(ops in prop::collection::vec(op_strategy(), 0..20)) {
            let mut view = BookmarkView::new();
            for op in &ops {
                apply_op(&mut view, op);
            }
            let before = view.snapshot();
            prop_assert!(!view.apply_deleted(&BookmarkId::from_u128(999)));
            prop_assert_eq!(view.snapshot(), before);
        }

        #[test]
        fn poll_result_is_sorted_descending(rows in prop::collection::vec((0u8..8, 0i64..50), 0..12)) {
            let mut view = BookmarkView::from_snapshot(vec![row(1, 1)]);
            view.replace(rows.iter().map(|(id, t)| row(*id, *t)).collect());
            assert_sorted_and_unique(&view)?;
        }
    }
}
