// 🗄️ ChoreStore - the one in-memory table set everything operates on
//
// Holds the user table, the chore catalog, the completion log and the id
// counter. There is no persistence: the store lives exactly as long as the
// process. Every operation takes the store explicitly, so tests build their
// own and the two front-ends share one behind a single coarse lock.
//
// Ordering invariants the aggregator depends on:
// - users keep first-created order (report output follows it)
// - chores keep insertion order (display numbering and item order follow it)
// - chore ids are unique and strictly increasing, starting at 1

use chrono::{DateTime, Utc};

use crate::error::{Result, TrackerError};
use crate::model::{Chore, Completion, ParentRoster, Role, Timing, User, DEFAULT_EMOJI};

pub struct ChoreStore {
    roster: ParentRoster,
    users: Vec<User>,
    chores: Vec<Chore>,
    completions: Vec<Completion>,
    next_chore_id: u32,
}

impl ChoreStore {
    pub fn new(roster: ParentRoster) -> Self {
        ChoreStore {
            roster,
            users: Vec::new(),
            chores: Vec::new(),
            completions: Vec::new(),
            next_chore_id: 1,
        }
    }

    // ========================================================================
    // USERS
    // ========================================================================

    /// Look up or create the user record for this exact name.
    ///
    /// Lookup is case-sensitive while role inference is case-insensitive:
    /// "Sam" and "sam" are two distinct records, both children.
    pub fn ensure_user(&mut self, name: &str) -> &User {
        let idx = match self.users.iter().position(|u| u.name == name) {
            Some(idx) => idx,
            None => {
                let role = self.roster.role_for(name);
                self.users.push(User::new(name.to_string(), role));
                self.users.len() - 1
            }
        };
        &self.users[idx]
    }

    /// Exact-name lookup, no side effects.
    pub fn find_user(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// All users in first-created order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Child users in first-created order.
    pub fn children(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_child())
    }

    pub(crate) fn user_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.name == name)
    }

    // ========================================================================
    // CHORE CATALOG
    // ========================================================================

    /// Create a chore and append it to the catalog.
    ///
    /// `timing` must be one of the wire strings daily / adhoc / weekly and
    /// `price` a finite number >= 0. A blank emoji falls back to ⭐.
    pub fn create_chore(
        &mut self,
        name: &str,
        timing: &str,
        price: f64,
        emoji: &str,
        required: bool,
    ) -> Result<Chore> {
        let timing: Timing = timing.parse()?;

        if !price.is_finite() || price < 0.0 {
            return Err(TrackerError::InvalidPrice(price));
        }

        let emoji = if emoji.trim().is_empty() {
            DEFAULT_EMOJI
        } else {
            emoji
        };

        let chore = Chore {
            id: self.next_chore_id,
            name: name.to_string(),
            timing,
            price,
            emoji: emoji.to_string(),
            required,
        };
        self.next_chore_id += 1;

        self.chores.push(chore.clone());
        Ok(chore)
    }

    /// The catalog in insertion order.
    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    pub fn find_chore(&self, id: u32) -> Option<&Chore> {
        self.chores.iter().find(|c| c.id == id)
    }

    // ========================================================================
    // COMPLETION LOG
    // ========================================================================

    /// Record that a child completed a chore at `now`.
    ///
    /// The name must belong to an existing child user and the id to an
    /// existing chore. There is no dedup: completing the same chore three
    /// times records three entries and all three count.
    pub fn record_completion(
        &mut self,
        child_name: &str,
        chore_id: u32,
        now: DateTime<Utc>,
    ) -> Result<Completion> {
        let user = self
            .find_user(child_name)
            .ok_or_else(|| TrackerError::UserNotFound(child_name.to_string()))?;
        if user.role != Role::Child {
            return Err(TrackerError::NotAChild(child_name.to_string()));
        }

        if self.find_chore(chore_id).is_none() {
            return Err(TrackerError::ChoreNotFound(chore_id));
        }

        let completion = Completion {
            child_name: child_name.to_string(),
            chore_id,
            timestamp: now,
        };
        self.completions.push(completion.clone());
        Ok(completion)
    }

    /// The full log in recording order.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }
}

impl Default for ChoreStore {
    fn default() -> Self {
        ChoreStore::new(ParentRoster::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_ensure_user_creates_once() {
        let mut store = ChoreStore::default();

        let user = store.ensure_user("Sam");
        assert_eq!(user.role, Role::Child);
        assert_eq!(user.balance, 0.0);

        store.ensure_user("Sam");
        assert_eq!(store.users().len(), 1);

        println!("✅ ensure_user test passed");
    }

    #[test]
    fn test_ensure_user_roles_from_roster() {
        let mut store = ChoreStore::default();

        assert_eq!(store.ensure_user("Aaron").role, Role::Parent);
        assert_eq!(store.ensure_user("janet").role, Role::Parent);
        assert_eq!(store.ensure_user("Sam").role, Role::Child);
    }

    #[test]
    fn test_user_storage_is_case_sensitive() {
        let mut store = ChoreStore::default();

        store.ensure_user("Aaron");
        store.ensure_user("aaron");

        // two records, both resolved to parent by the case-insensitive roster
        assert_eq!(store.users().len(), 2);
        assert!(store.users().iter().all(|u| u.role == Role::Parent));
    }

    #[test]
    fn test_users_keep_first_created_order() {
        let mut store = ChoreStore::default();

        store.ensure_user("Sam");
        store.ensure_user("Alex");
        store.ensure_user("Sam"); // repeat must not reorder

        let names: Vec<&str> = store.users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Sam", "Alex"]);
    }

    #[test]
    fn test_chore_ids_strictly_increasing() {
        let mut store = ChoreStore::default();

        let a = store.create_chore("Dishes", "daily", 1.5, "🍽", true).unwrap();
        let b = store.create_chore("Vacuum", "weekly", 3.0, "", false).unwrap();
        let c = store.create_chore("Trash", "adhoc", 0.5, "🗑", false).unwrap();

        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        let ids: Vec<u32> = store.chores().iter().map(|c| c.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        println!("✅ Chore id test passed");
    }

    #[test]
    fn test_create_chore_defaults_blank_emoji() {
        let mut store = ChoreStore::default();

        let chore = store.create_chore("Vacuum", "weekly", 3.0, "", false).unwrap();
        assert_eq!(chore.emoji, DEFAULT_EMOJI);

        let chore = store.create_chore("Mop", "weekly", 3.0, "  ", false).unwrap();
        assert_eq!(chore.emoji, DEFAULT_EMOJI);

        let chore = store.create_chore("Dust", "weekly", 3.0, "🧽", false).unwrap();
        assert_eq!(chore.emoji, "🧽");
    }

    #[test]
    fn test_create_chore_rejects_bad_timing() {
        let mut store = ChoreStore::default();

        let err = store.create_chore("Dishes", "monthly", 1.5, "", true).unwrap_err();
        assert_eq!(err, TrackerError::InvalidTiming("monthly".to_string()));

        // a failed create must not burn an id
        let chore = store.create_chore("Dishes", "daily", 1.5, "", true).unwrap();
        assert_eq!(chore.id, 1);
    }

    #[test]
    fn test_create_chore_rejects_bad_price() {
        let mut store = ChoreStore::default();

        assert!(matches!(
            store.create_chore("Dishes", "daily", -0.5, "", true),
            Err(TrackerError::InvalidPrice(_))
        ));
        assert!(matches!(
            store.create_chore("Dishes", "daily", f64::NAN, "", true),
            Err(TrackerError::InvalidPrice(_))
        ));
        assert!(matches!(
            store.create_chore("Dishes", "daily", f64::INFINITY, "", true),
            Err(TrackerError::InvalidPrice(_))
        ));

        // zero is a valid price (an unpaid required chore)
        assert!(store.create_chore("Bed", "daily", 0.0, "", true).is_ok());
    }

    #[test]
    fn test_record_completion() {
        let mut store = ChoreStore::default();
        store.ensure_user("Sam");
        store.create_chore("Dishes", "daily", 1.5, "🍽", true).unwrap();

        let completion = store.record_completion("Sam", 1, now()).unwrap();
        assert_eq!(completion.child_name, "Sam");
        assert_eq!(completion.chore_id, 1);
        assert_eq!(completion.timestamp, now());
        assert_eq!(store.completions().len(), 1);

        // same chore again on the same day still counts
        store.record_completion("Sam", 1, now()).unwrap();
        assert_eq!(store.completions().len(), 2);

        println!("✅ record_completion test passed");
    }

    #[test]
    fn test_record_completion_requires_known_child() {
        let mut store = ChoreStore::default();
        store.create_chore("Dishes", "daily", 1.5, "", true).unwrap();

        let err = store.record_completion("Sam", 1, now()).unwrap_err();
        assert_eq!(err, TrackerError::UserNotFound("Sam".to_string()));
        assert!(err.is_not_found());

        store.ensure_user("aaron");
        let err = store.record_completion("aaron", 1, now()).unwrap_err();
        assert_eq!(err, TrackerError::NotAChild("aaron".to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_record_completion_requires_known_chore() {
        let mut store = ChoreStore::default();
        store.ensure_user("Sam");

        let err = store.record_completion("Sam", 7, now()).unwrap_err();
        assert_eq!(err, TrackerError::ChoreNotFound(7));
    }
}
