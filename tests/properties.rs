//! Property tests for collection mutations.

mod support;

use book_catalog::{BookCollection, CatalogConfig, CatalogError};
use proptest::prelude::*;
use support::{book, CallLog};

fn seeded(ids: &[u64]) -> BookCollection {
    BookCollection::with_books(
        CatalogConfig::default(),
        ids.iter().map(|id| book(*id, &format!("t{}", id), "i", "a")),
    )
}

proptest! {
    #[test]
    fn find_returns_first_added_with_id(ids in prop::collection::vec(0u64..20, 0..30)) {
        let books = BookCollection::new();
        let mut added = Vec::new();
        for (position, id) in ids.iter().enumerate() {
            added.push(books.add(book(*id, &format!("b{}", position), "i", "a")).unwrap());
        }

        for id in 0u64..20 {
            let expected = added.iter().find(|b| b.id == id);
            let found = books.find_by_id(id).unwrap();
            match (expected, found) {
                (Some(expected), Some(found)) => prop_assert!(expected.same_snapshot(&found)),
                (None, None) => {}
                (expected, found) => prop_assert!(false, "mismatch for {}: {:?} vs {:?}", id, expected, found),
            }
        }
    }

    #[test]
    fn remove_member_shrinks_by_one(
        ids in prop::collection::vec(0u64..10, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let books = seeded(&ids);
        let before = books.books().unwrap();
        let victim = before[pick.index(before.len())].clone();

        prop_assert!(books.remove(&victim).unwrap());
        let after = books.books().unwrap();
        prop_assert_eq!(after.len(), before.len() - 1);
        prop_assert!(!after.iter().any(|b| b.same_record(&victim)));
    }

    #[test]
    fn remove_non_member_changes_nothing(ids in prop::collection::vec(0u64..10, 0..20)) {
        let books = seeded(&ids);
        let before = books.books().unwrap();
        // Same fields as a possible member, but stored elsewhere.
        let outsider = BookCollection::new().add(book(3, "t3", "i", "a")).unwrap();

        prop_assert!(!books.remove(&outsider).unwrap());
        let after = books.books().unwrap();
        prop_assert_eq!(after.len(), before.len());
        prop_assert!(before.iter().zip(&after).all(|(a, b)| a.same_snapshot(b)));
    }

    #[test]
    fn update_touches_only_its_record(
        len in 1usize..15,
        pick in any::<prop::sample::Index>(),
        title in "[a-z]{1,8}",
    ) {
        let ids: Vec<u64> = (1..=len as u64).collect();
        let books = seeded(&ids);
        let before = books.books().unwrap();
        let target = pick.index(len);
        let id = before[target].id;

        books.update(book(id, &title, "new", "someone")).unwrap();
        let after = books.books().unwrap();

        for (index, (old, new)) in before.iter().zip(&after).enumerate() {
            if index == target {
                prop_assert_eq!(&**new, &book(id, &title, "new", "someone"));
                prop_assert!(new.same_record(old));
            } else {
                prop_assert!(old.same_snapshot(new));
            }
        }
    }

    #[test]
    fn handles_taken_before_updates_still_remove(
        len in 1usize..15,
        pick in any::<prop::sample::Index>(),
        rounds in 1usize..4,
    ) {
        let ids: Vec<u64> = (1..=len as u64).collect();
        let books = seeded(&ids);
        let target = books.books().unwrap()[pick.index(len)].clone();

        for round in 0..rounds {
            books.update(book(target.id, &format!("v{}", round), "i", "a")).unwrap();
        }

        prop_assert!(books.remove(&target).unwrap());
        let after = books.books().unwrap();
        prop_assert_eq!(after.len(), len - 1);
        prop_assert!(books.find_by_id(target.id).unwrap().is_none());
    }

    #[test]
    fn created_ids_are_unique_up_to_exhaustion(
        start in (u64::MAX - 20)..u64::MAX,
        creates in 0usize..40,
    ) {
        let books = seeded(&[start]);
        let mut seen = vec![start];
        for _ in 0..creates {
            match books.create(support::draft()) {
                Ok(created) => {
                    prop_assert!(!seen.contains(&created.id));
                    seen.push(created.id);
                }
                Err(err) => {
                    prop_assert_eq!(err, CatalogError::IdsExhausted);
                    prop_assert_eq!(*seen.last().unwrap(), u64::MAX);
                }
            }
        }
        prop_assert_eq!(books.len().unwrap(), seen.len());
    }

    #[test]
    fn update_absent_id_fails_cleanly(ids in prop::collection::vec(0u64..10, 0..20)) {
        let books = seeded(&ids);
        let log = CallLog::new();
        log.subscribe(&books, "view");
        let before = books.books().unwrap();

        let result = books.update(book(50, "x", "y", "z"));
        prop_assert_eq!(result.unwrap_err(), CatalogError::NotFound { id: 50 });
        let after = books.books().unwrap();
        prop_assert!(before.iter().zip(&after).all(|(a, b)| a.same_snapshot(b)));
        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(log.count(), 0);
    }

    #[test]
    fn each_mutation_notifies_once(ops in prop::collection::vec(0u8..3, 0..40)) {
        let books = BookCollection::new();
        let log = CallLog::new();
        log.subscribe(&books, "first");
        log.subscribe(&books, "second");

        let mut calls = 0;
        for (step, op) in ops.iter().enumerate() {
            match op {
                0 => { books.add(book(step as u64, "t", "i", "a")).unwrap(); }
                1 => { books.remove_by_id(step as u64 / 2).unwrap(); }
                _ => { let _ = books.update(book(step as u64 / 2, "u", "i", "a")); }
            }
            let failed_update = *op >= 2 && books.find_by_id(step as u64 / 2).unwrap().is_none();
            if !failed_update {
                calls += 1;
            }
        }

        let seen = log.calls();
        prop_assert_eq!(seen.len(), calls * 2);
        for pair in seen.chunks(2) {
            prop_assert_eq!(pair, &["first".to_string(), "second".to_string()][..]);
        }
    }
}
