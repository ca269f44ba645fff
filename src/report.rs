// 📊 Window aggregator - what did each child earn in the last week?
//
// Both front-ends render their reports from this one module: per child and
// per chore, count the completions inside the trailing window and price them.
//
// Numeric contract: totals accumulate unrounded f64 values and are rounded
// to cents only at the presentation boundary (format_money / the web UI).

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{Result, TrackerError};
use crate::model::Timing;
use crate::store::ChoreStore;

/// Fixed trailing window, not configurable
pub const REPORT_WINDOW_DAYS: i64 = 7;

/// Start of the reporting window: `now` minus seven days. Completions with
/// `timestamp >= cutoff` count (inclusive lower bound).
pub fn week_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(REPORT_WINDOW_DAYS)
}

// ============================================================================
// AGGREGATES
// ============================================================================

/// One chore a child completed at least once inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub chore_id: u32,
    pub name: String,
    pub timing: Timing,
    pub emoji: String,
    pub required: bool,
    pub count: usize,
    /// count * price, unrounded
    pub value: f64,
}

/// A child's windowed activity, priced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildReport {
    pub child_name: String,
    pub total: f64,
    pub items: Vec<ReportItem>,
}

/// A child's windowed activity plus their balance, for the child-facing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildCompletions {
    pub child_name: String,
    pub items: Vec<ReportItem>,
    pub total: f64,
    pub balance: f64,
}

/// Aggregate one child's completions since `cutoff`.
///
/// Items follow catalog order, chores with no qualifying completion are
/// omitted entirely, and `total` is the exact sum of the emitted values.
pub fn aggregate_for_child(store: &ChoreStore, child_name: &str, cutoff: DateTime<Utc>) -> ChildReport {
    let mut items = Vec::new();
    let mut total = 0.0;

    for chore in store.chores() {
        let count = store
            .completions()
            .iter()
            .filter(|c| c.child_name == child_name && c.chore_id == chore.id && c.timestamp >= cutoff)
            .count();

        if count > 0 {
            let value = count as f64 * chore.price;
            total += value;
            items.push(ReportItem {
                chore_id: chore.id,
                name: chore.name.clone(),
                timing: chore.timing,
                emoji: chore.emoji.clone(),
                required: chore.required,
                count,
                value,
            });
        }
    }

    ChildReport {
        child_name: child_name.to_string(),
        total,
        items,
    }
}

/// Aggregate every child, in the order the children first appeared.
pub fn aggregate_all_children(store: &ChoreStore, cutoff: DateTime<Utc>) -> Vec<ChildReport> {
    store
        .children()
        .map(|user| aggregate_for_child(store, &user.name, cutoff))
        .collect()
}

/// The named user's windowed aggregation plus their current balance.
///
/// Any existing user may be asked for (a parent just gets an empty list);
/// an unknown name is an error.
pub fn completions_for_child(
    store: &ChoreStore,
    name: &str,
    cutoff: DateTime<Utc>,
) -> Result<ChildCompletions> {
    let user = store
        .find_user(name)
        .ok_or_else(|| TrackerError::UserNotFound(name.to_string()))?;

    let report = aggregate_for_child(store, name, cutoff);
    Ok(ChildCompletions {
        child_name: report.child_name,
        items: report.items,
        total: report.total,
        balance: user.balance,
    })
}

// ============================================================================
// MONEY FORMATTING
// ============================================================================

/// Presentation-boundary rounding: `4.5` -> `"$4.50"`.
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

// ============================================================================
// TESTS
// ============================================================================
