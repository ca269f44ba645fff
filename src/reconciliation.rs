// 💸 Reconciliation - moving earned allowance into a child's balance
//
// The summary is a pure read over the window aggregator; the transfer adds
// the chosen amount to the child's balance and nothing else. Completions are
// never marked as paid, so reconciling the same window twice pays twice -
// the parent decides when and how much, the tracker only does the bookkeeping.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, TrackerError};
use crate::model::Role;
use crate::report::aggregate_for_child;
use crate::store::ChoreStore;

// ============================================================================
// SUMMARY
// ============================================================================

/// What a child earned inside the window next to what they already hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary {
    pub child_name: String,
    pub earned: f64,
    pub current_balance: f64,
}

/// Per-child earned/balance pairs, children in first-seen order. Read-only.
pub fn reconcile_summary(store: &ChoreStore, cutoff: DateTime<Utc>) -> Vec<ChildSummary> {
    store
        .children()
        .map(|user| ChildSummary {
            child_name: user.name.clone(),
            earned: aggregate_for_child(store, &user.name, cutoff).total,
            current_balance: user.balance,
        })
        .collect()
}

// ============================================================================
// TRANSFER
// ============================================================================

/// Receipt for one completed transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReceipt {
    pub child_name: String,
    pub amount: f64,
    pub new_balance: f64,
}

/// Transfer `amount` into the named child's balance.
///
/// The name is checked before the amount, so an unknown or non-child name
/// reports not-found even when the amount is also bad. The amount must be
/// finite and > 0.
pub fn reconcile(store: &mut ChoreStore, child_name: &str, amount: f64) -> Result<ReconcileReceipt> {
    let user = store
        .find_user(child_name)
        .ok_or_else(|| TrackerError::UserNotFound(child_name.to_string()))?;
    if user.role != Role::Child {
        return Err(TrackerError::NotAChild(child_name.to_string()));
    }

    if !amount.is_finite() || amount <= 0.0 {
        return Err(TrackerError::InvalidAmount(amount));
    }

    let user = store
        .user_mut(child_name)
        .ok_or_else(|| TrackerError::UserNotFound(child_name.to_string()))?;
    user.balance += amount;

    Ok(ReconcileReceipt {
        child_name: child_name.to_string(),
        amount,
        new_balance: user.balance,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::week_cutoff;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn sample_store() -> ChoreStore {
        let mut store = ChoreStore::default();
        store.ensure_user("Sam");
        store.create_chore("Dishes", "daily", 1.5, "🍽", true).unwrap();
        for _ in 0..3 {
            store.record_completion("Sam", 1, now()).unwrap();
        }
        store
    }

    #[test]
    fn test_summary_matches_aggregate() {
        let mut store = sample_store();
        store.ensure_user("Alex");

        let summary = reconcile_summary(&store, week_cutoff(now()));

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].child_name, "Sam");
        assert_eq!(summary[0].earned, 4.5);
        assert_eq!(summary[0].current_balance, 0.0);
        assert_eq!(summary[1].earned, 0.0);
    }

    #[test]
    fn test_summary_does_not_mutate() {
        let store = sample_store();

        reconcile_summary(&store, week_cutoff(now()));
        reconcile_summary(&store, week_cutoff(now()));

        assert_eq!(store.find_user("Sam").unwrap().balance, 0.0);
    }

    #[test]
    fn test_reconcile_adds_exactly_amount() {
        let mut store = sample_store();

        let receipt = reconcile(&mut store, "Sam", 4.5).unwrap();
        assert_eq!(receipt.child_name, "Sam");
        assert_eq!(receipt.amount, 4.5);
        assert_eq!(receipt.new_balance, 4.5);
        assert_eq!(store.find_user("Sam").unwrap().balance, 4.5);

        println!("✅ Reconcile test passed");
    }

    #[test]
    fn test_reconcile_twice_pays_twice() {
        let mut store = sample_store();

        // nothing marks the completions as paid, so a second reconcile of
        // the same window doubles the payout
        reconcile(&mut store, "Sam", 4.5).unwrap();
        let receipt = reconcile(&mut store, "Sam", 4.5).unwrap();

        assert_eq!(receipt.new_balance, 9.0);

        // and the summary still reports the same earned value
        let summary = reconcile_summary(&store, week_cutoff(now()));
        assert_eq!(summary[0].earned, 4.5);
        assert_eq!(summary[0].current_balance, 9.0);
    }

    #[test]
    fn test_balance_never_decreases_across_valid_reconciles() {
        let mut store = sample_store();

        let mut last = 0.0;
        for amount in [0.01, 4.5, 100.0, 0.5] {
            let receipt = reconcile(&mut store, "Sam", amount).unwrap();
            assert!(receipt.new_balance >= last);
            last = receipt.new_balance;
        }
    }

    #[test]
    fn test_reconcile_rejects_bad_amounts() {
        let mut store = sample_store();

        for amount in [0.0, -4.5, f64::NAN, f64::INFINITY] {
            let err = reconcile(&mut store, "Sam", amount).unwrap_err();
            assert!(matches!(err, TrackerError::InvalidAmount(_)));
        }
        assert_eq!(store.find_user("Sam").unwrap().balance, 0.0);
    }

    #[test]
    fn test_reconcile_requires_known_child() {
        let mut store = sample_store();
        store.ensure_user("aaron");

        let err = reconcile(&mut store, "Nobody", 4.5).unwrap_err();
        assert_eq!(err, TrackerError::UserNotFound("Nobody".to_string()));

        let err = reconcile(&mut store, "aaron", 4.5).unwrap_err();
        assert_eq!(err, TrackerError::NotAChild("aaron".to_string()));

        // the name is checked before the amount
        let err = reconcile(&mut store, "Nobody", -1.0).unwrap_err();
        assert!(err.is_not_found());
    }
}
