//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;
    use crate::store::TransactionStore;
    use crate::test_utils::date;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn category(db: &Database, owner: &str, name: &str, kind: TransactionKind) -> Category {
        db.create_category(
            owner,
            &NewCategory {
                name: name.to_string(),
                kind,
            },
        )
        .unwrap()
    }

    fn record(
        db: &Database,
        owner: &str,
        category_id: i64,
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
    ) -> Transaction {
        db.create_transaction(
            owner,
            &NewTransaction {
                category_id,
                kind,
                amount,
                date,
                description: None,
            },
        )
        .unwrap()
    }

    /// Alice's expense in `category`
    fn expense(db: &Database, category: i64, amount: Decimal, on: NaiveDate) -> Transaction {
        record(db, ALICE, category, TransactionKind::Expense, amount, on)
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_categories(ALICE).unwrap().is_empty());
        assert!(db
            .list_transactions(ALICE, &TransactionQuery::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let columns: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN ('id', 'owner', 'category_id', 'kind', 'amount_cents', 'date', 'description', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(columns, 8);

        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_category_crud() {
        let db = Database::in_memory().unwrap();

        let groceries = category(&db, ALICE, "Groceries", TransactionKind::Expense);
        let salary = category(&db, ALICE, "  Salary ", TransactionKind::Income);
        assert!(groceries.id > 0);
        assert_eq!(salary.name, "Salary");
        assert_eq!(salary.owner, ALICE);

        let names: Vec<String> = db
            .list_categories(ALICE)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Groceries", "Salary"]);

        assert!(db.get_category(ALICE, groceries.id).unwrap().is_some());
        assert!(db.get_category(BOB, groceries.id).unwrap().is_none());

        assert!(db.delete_category(ALICE, groceries.id).unwrap());
        assert!(!db.delete_category(ALICE, groceries.id).unwrap());
        assert_eq!(db.list_categories(ALICE).unwrap().len(), 1);
    }

    #[test]
    fn test_category_name_validation() {
        let db = Database::in_memory().unwrap();

        let empty = NewCategory {
            name: "   ".to_string(),
            kind: TransactionKind::Expense,
        };
        assert!(matches!(
            db.create_category(ALICE, &empty),
            Err(Error::InvalidData(_))
        ));

        let long = NewCategory {
            name: "x".repeat(101),
            kind: TransactionKind::Expense,
        };
        assert!(matches!(
            db.create_category(ALICE, &long),
            Err(Error::InvalidData(_))
        ));

        let max = NewCategory {
            name: "x".repeat(100),
            kind: TransactionKind::Expense,
        };
        assert!(db.create_category(ALICE, &max).is_ok());
    }

    #[test]
    fn test_categories_are_owner_scoped() {
        let db = Database::in_memory().unwrap();
        let mine = category(&db, ALICE, "Food", TransactionKind::Expense);
        category(&db, BOB, "Food", TransactionKind::Expense);

        assert_eq!(db.list_categories(ALICE).unwrap().len(), 1);
        assert_eq!(db.list_categories(BOB).unwrap().len(), 1);

        // Bob cannot delete Alice's category
        assert!(!db.delete_category(BOB, mine.id).unwrap());
        assert!(db.get_category(ALICE, mine.id).unwrap().is_some());
    }

    #[test]
    fn test_transaction_crud() {
        let db = Database::in_memory().unwrap();
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);

        let tx = db
            .create_transaction(
                ALICE,
                &NewTransaction {
                    category_id: food.id,
                    kind: TransactionKind::Expense,
                    amount: dec!(12.34),
                    date: date(2024, 6, 5),
                    description: Some("Lunch".to_string()),
                },
            )
            .unwrap();

        assert_eq!(tx.amount, dec!(12.34));
        assert_eq!(tx.category_name, "Food");
        assert_eq!(tx.description.as_deref(), Some("Lunch"));
        assert_eq!(tx.date, date(2024, 6, 5));

        let fetched = db.get_transaction(ALICE, tx.id).unwrap().unwrap();
        assert_eq!(fetched, tx);
        assert!(db.get_transaction(BOB, tx.id).unwrap().is_none());

        assert!(!db.delete_transaction(BOB, tx.id).unwrap());
        assert!(db.delete_transaction(ALICE, tx.id).unwrap());
        assert!(db.get_transaction(ALICE, tx.id).unwrap().is_none());
    }

    #[test]
    fn test_transaction_requires_owned_category() {
        let db = Database::in_memory().unwrap();
        let bobs = category(&db, BOB, "Food", TransactionKind::Expense);

        let new = NewTransaction {
            category_id: bobs.id,
            kind: TransactionKind::Expense,
            amount: dec!(5),
            date: date(2024, 6, 5),
            description: None,
        };
        assert!(matches!(
            db.create_transaction(ALICE, &new),
            Err(Error::InvalidData(_))
        ));

        let missing = NewTransaction {
            category_id: 9999,
            ..new
        };
        assert!(matches!(
            db.create_transaction(ALICE, &missing),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_transaction_amount_validation() {
        let db = Database::in_memory().unwrap();
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);

        let new = NewTransaction {
            category_id: food.id,
            kind: TransactionKind::Expense,
            amount: dec!(1.005),
            date: date(2024, 6, 5),
            description: None,
        };
        assert!(matches!(
            db.create_transaction(ALICE, &new),
            Err(Error::InvalidData(_))
        ));
        assert!(db
            .list_transactions(ALICE, &TransactionQuery::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_category_cascades() {
        let db = Database::in_memory().unwrap();
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);
        let rent = category(&db, ALICE, "Rent", TransactionKind::Expense);
        expense(&db, food.id, dec!(10), date(2024, 6, 1));
        expense(&db, food.id, dec!(20), date(2024, 6, 2));
        expense(&db, rent.id, dec!(900), date(2024, 6, 3));

        assert!(db.delete_category(ALICE, food.id).unwrap());

        let remaining = db
            .list_transactions(ALICE, &TransactionQuery::default())
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category_name, "Rent");
    }

    #[test]
    fn test_list_transactions_ordering_and_range() {
        let db = Database::in_memory().unwrap();
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);
        let a = expense(&db, food.id, dec!(30), date(2024, 6, 1));
        let b = expense(&db, food.id, dec!(10), date(2024, 6, 15));
        let c = expense(&db, food.id, dec!(20), date(2024, 6, 30));

        let bobs_food = category(&db, BOB, "Food", TransactionKind::Expense);
        record(
            &db,
            BOB,
            bobs_food.id,
            TransactionKind::Expense,
            dec!(1),
            date(2024, 6, 2),
        );

        let ids = |query: TransactionQuery| -> Vec<i64> {
            db.list_transactions(ALICE, &query)
                .unwrap()
                .into_iter()
                .map(|t| t.id)
                .collect()
        };

        // Default is newest first
        assert_eq!(ids(TransactionQuery::default()), vec![c.id, b.id, a.id]);
        assert_eq!(
            ids(TransactionQuery {
                ordering: TransactionOrdering::AmountAsc,
                ..Default::default()
            }),
            vec![b.id, c.id, a.id]
        );
        assert_eq!(
            ids(TransactionQuery {
                ordering: TransactionOrdering::DateAsc,
                ..Default::default()
            }),
            vec![a.id, b.id, c.id]
        );

        // Inclusive range
        assert_eq!(
            ids(TransactionQuery {
                start_date: Some(date(2024, 6, 15)),
                end_date: Some(date(2024, 6, 30)),
                ..Default::default()
            }),
            vec![c.id, b.id]
        );

        // Half a range is ignored
        assert_eq!(
            ids(TransactionQuery {
                start_date: Some(date(2024, 6, 15)),
                ..Default::default()
            })
            .len(),
            3
        );
    }

    #[test]
    fn test_sum_by_kind_is_exact() {
        let db = Database::in_memory().unwrap();
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);
        for _ in 0..10 {
            expense(&db, food.id, dec!(0.10), date(2024, 6, 5));
        }
        // Edges of the month are included, neighbours are not
        expense(&db, food.id, dec!(1), date(2024, 6, 1));
        expense(&db, food.id, dec!(1), date(2024, 6, 30));
        expense(&db, food.id, dec!(50), date(2024, 5, 31));
        expense(&db, food.id, dec!(50), date(2024, 7, 1));

        let june = Period::new(2024, 6).unwrap();
        assert_eq!(
            db.sum_by_kind(ALICE, june, TransactionKind::Expense).unwrap(),
            dec!(3.00)
        );
        assert_eq!(
            db.sum_by_kind(ALICE, june, TransactionKind::Income).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            db.sum_by_kind(BOB, june, TransactionKind::Expense).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_group_sum_by_category_order() {
        let db = Database::in_memory().unwrap();
        let rent = category(&db, ALICE, "Rent", TransactionKind::Expense);
        let food = category(&db, ALICE, "Food", TransactionKind::Expense);
        let books = category(&db, ALICE, "Books", TransactionKind::Expense);
        let salary = category(&db, ALICE, "Salary", TransactionKind::Income);

        expense(&db, rent.id, dec!(100), date(2024, 6, 1));
        expense(&db, food.id, dec!(60), date(2024, 6, 2));
        expense(&db, food.id, dec!(40), date(2024, 6, 3));
        expense(&db, books.id, dec!(25), date(2024, 6, 4));
        record(
            &db,
            ALICE,
            salary.id,
            TransactionKind::Income,
            dec!(5000),
            date(2024, 6, 1),
        );
        // Expense under an income category still counts as expense
        expense(&db, salary.id, dec!(5), date(2024, 6, 1));

        let june = Period::new(2024, 6).unwrap();
        let totals = db
            .group_sum_by_category(ALICE, june, TransactionKind::Expense)
            .unwrap();

        let rows: Vec<(&str, Decimal)> = totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Food", dec!(100)),
                ("Rent", dec!(100)),
                ("Books", dec!(25)),
                ("Salary", dec!(5)),
            ]
        );
    }

    #[test]
    fn test_group_sum_merges_same_name() {
        let db = Database::in_memory().unwrap();
        let first = category(&db, ALICE, "Food", TransactionKind::Expense);
        let second = category(&db, ALICE, "Food", TransactionKind::Expense);
        expense(&db, first.id, dec!(10), date(2024, 6, 1));
        expense(&db, second.id, dec!(15), date(2024, 6, 1));

        let june = Period::new(2024, 6).unwrap();
        let totals = db
            .group_sum_by_category(ALICE, june, TransactionKind::Expense)
            .unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, dec!(25));
    }

    #[test]
    fn test_audit_log() {
        let db = Database::in_memory().unwrap();

        db.log_audit(ALICE, "create", Some("category"), Some(1), None)
            .unwrap();
        db.log_audit(ALICE, "delete", Some("category"), Some(1), Some("cascade"))
            .unwrap();
        db.log_audit(BOB, "list", Some("transaction"), None, None)
            .unwrap();

        let entries = db.list_audit_log(ALICE, 10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].details.as_deref(), Some("cascade"));
        assert_eq!(entries[1].action, "create");
        assert!(entries.iter().all(|e| e.actor == ALICE));

        assert_eq!(db.list_audit_log(ALICE, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_encrypted_database_reopens_with_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new_with_key(path, Some("correct horse")).unwrap();
            category(&db, ALICE, "Food", TransactionKind::Expense);
        }

        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        assert_eq!(db.list_categories(ALICE).unwrap().len(), 1);

        assert!(Database::new_with_key(path, Some("wrong")).is_err());
    }
}
