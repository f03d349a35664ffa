//! Ledger model
//!
//! A ledger holds one user's expenses and incomes as ordered lists of
//! `{description: amount}` entries. The balance is derived on demand and
//! never stored.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::money::Money;
use crate::error::{TallyError, TallyResult};

/// Which list of a ledger an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// Lowercase noun used in prompts and messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an entered description is compared against stored descriptions
///
/// `Substring` treats the input as colliding with (or selecting) any stored
/// description that contains it, so adding "ren" is refused while "rent"
/// exists and deleting "ren" removes "rent". `Exact` requires equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Exact,
}

impl MatchMode {
    /// Check whether `input` selects the stored description
    pub fn matches(&self, stored: &str, input: &str) -> bool {
        match self {
            Self::Substring => stored.contains(input),
            Self::Exact => stored == input,
        }
    }
}

/// A single expense or income line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub description: String,
    pub amount: Money,
}

impl LedgerEntry {
    /// Create a validated entry
    pub fn new(description: impl Into<String>, amount: Money) -> TallyResult<Self> {
        let entry = Self {
            description: description.into(),
            amount,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// The description must contain at least one non-whitespace character
    pub fn validate(&self) -> TallyResult<()> {
        if self.description.trim().is_empty() {
            return Err(TallyError::Validation(
                "Description cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

// Persisted as a one-pair map, `{"rent": "450.00"}`.
impl Serialize for LedgerEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.description, &self.amount)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for LedgerEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntryVisitor)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = LedgerEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a single {description: amount} pair")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let (description, amount): (String, Money) = access
            .next_entry()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        if access.next_key::<String>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }

        Ok(LedgerEntry {
            description,
            amount,
        })
    }
}

/// One user's expenses and incomes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    expenses: Vec<LedgerEntry>,
    #[serde(default)]
    incomes: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a ledger with its mandatory opening income
    pub fn new(seed_income: LedgerEntry) -> Self {
        Self {
            expenses: Vec::new(),
            incomes: vec![seed_income],
        }
    }

    /// Entries of one kind, in insertion order
    pub fn entries(&self, kind: EntryKind) -> &[LedgerEntry] {
        match kind {
            EntryKind::Expense => &self.expenses,
            EntryKind::Income => &self.incomes,
        }
    }

    pub fn expenses(&self) -> &[LedgerEntry] {
        &self.expenses
    }

    pub fn incomes(&self) -> &[LedgerEntry] {
        &self.incomes
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<LedgerEntry> {
        match kind {
            EntryKind::Expense => &mut self.expenses,
            EntryKind::Income => &mut self.incomes,
        }
    }

    /// First entry of `kind` selected by `description` under `mode`
    pub fn find_match(
        &self,
        kind: EntryKind,
        description: &str,
        mode: MatchMode,
    ) -> Option<&LedgerEntry> {
        self.entries(kind)
            .iter()
            .find(|e| mode.matches(&e.description, description))
    }

    /// Append an entry unless its description collides with an existing one
    ///
    /// An entry that would push the list total or the balance out of the
    /// amount range is refused and the ledger is left as it was.
    pub fn add(&mut self, kind: EntryKind, entry: LedgerEntry, mode: MatchMode) -> TallyResult<()> {
        entry.validate()?;

        if self.find_match(kind, &entry.description, mode).is_some() {
            return Err(TallyError::duplicate_entry(entry.description));
        }

        self.entries_mut(kind).push(entry);
        if let Err(e) = self.balance() {
            self.entries_mut(kind).pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the first entry selected by `description`
    ///
    /// Like `add`, a removal that would leave the balance out of range is
    /// undone.
    pub fn remove(
        &mut self,
        kind: EntryKind,
        description: &str,
        mode: MatchMode,
    ) -> TallyResult<LedgerEntry> {
        let index = self
            .entries(kind)
            .iter()
            .position(|e| mode.matches(&e.description, description))
            .ok_or_else(|| TallyError::entry_not_found(description))?;

        let removed = self.entries_mut(kind).remove(index);
        if let Err(e) = self.balance() {
            self.entries_mut(kind).insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Sum of the amounts of one kind
    pub fn total(&self, kind: EntryKind) -> TallyResult<Money> {
        self.entries(kind)
            .iter()
            .try_fold(Money::zero(), |acc, e| acc.checked_add(e.amount))
            .ok_or_else(|| TallyError::Overflow(format!("{} total", kind)))
    }

    /// Incomes minus expenses
    pub fn balance(&self) -> TallyResult<Money> {
        let incomes = self.total(EntryKind::Income)?;
        let expenses = self.total(EntryKind::Expense)?;
        incomes
            .checked_sub(expenses)
            .ok_or_else(|| TallyError::Overflow("balance".into()))
    }
}

/// Every user's ledger, keyed by login
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerBook {
    ledgers: BTreeMap<String, Ledger>,
}

impl LedgerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, login: &str) -> Option<&Ledger> {
        self.ledgers.get(login)
    }

    /// Insert or replace the ledger for `login`
    pub fn insert(&mut self, login: impl Into<String>, ledger: Ledger) -> Option<Ledger> {
        self.ledgers.insert(login.into(), ledger)
    }

    pub fn contains(&self, login: &str) -> bool {
        self.ledgers.contains_key(login)
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str, amount: &str) -> LedgerEntry {
        LedgerEntry::new(description, Money::parse(amount).unwrap()).unwrap()
    }

    fn seeded() -> Ledger {
        Ledger::new(entry("salary", "1000.00"))
    }

    #[test]
    fn test_new_ledger_has_seed_income_only() {
        let ledger = seeded();
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.incomes(), &[entry("salary", "1000")]);
        assert_eq!(ledger.balance().unwrap().to_string(), "1000.00");
    }

    #[test]
    fn test_entry_requires_description() {
        let err = LedgerEntry::new("   ", Money::zero()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_add_and_balance() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("rent", "450"), MatchMode::Substring)
            .unwrap();

        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.total(EntryKind::Expense).unwrap().to_string(), "450.00");
        assert_eq!(ledger.balance().unwrap().to_string(), "550.00");
    }

    #[test]
    fn test_negative_amounts_are_accepted() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("refund", "-50"), MatchMode::Exact)
            .unwrap();
        assert_eq!(ledger.balance().unwrap().to_string(), "1050.00");
    }

    #[test]
    fn test_substring_collision_is_rejected() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("rent", "450"), MatchMode::Substring)
            .unwrap();

        let err = ledger
            .add(EntryKind::Expense, entry("ren", "10"), MatchMode::Substring)
            .unwrap_err();
        assert!(err.is_duplicate());

        // The check is input-in-stored, so a longer description is fine.
        ledger
            .add(EntryKind::Expense, entry("rental car", "80"), MatchMode::Substring)
            .unwrap();
        assert_eq!(ledger.expenses().len(), 2);
    }

    #[test]
    fn test_exact_mode_allows_substrings() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("rent", "450"), MatchMode::Exact)
            .unwrap();
        ledger
            .add(EntryKind::Expense, entry("ren", "10"), MatchMode::Exact)
            .unwrap();
        assert!(ledger
            .add(EntryKind::Expense, entry("rent", "1"), MatchMode::Exact)
            .unwrap_err()
            .is_duplicate());
    }

    #[test]
    fn test_lists_are_checked_independently() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("salary", "5"), MatchMode::Substring)
            .unwrap();
        assert_eq!(ledger.expenses().len(), 1);
    }

    #[test]
    fn test_remove_by_substring() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Expense, entry("rent", "450"), MatchMode::Substring)
            .unwrap();

        let removed = ledger
            .remove(EntryKind::Expense, "ren", MatchMode::Substring)
            .unwrap();
        assert_eq!(removed.description, "rent");
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut ledger = seeded();
        ledger
            .add(EntryKind::Income, entry("bonus q1", "100"), MatchMode::Exact)
            .unwrap();
        ledger
            .add(EntryKind::Income, entry("bonus q2", "200"), MatchMode::Exact)
            .unwrap();

        let removed = ledger
            .remove(EntryKind::Income, "bonus", MatchMode::Substring)
            .unwrap();
        assert_eq!(removed.description, "bonus q1");
        assert_eq!(ledger.incomes().len(), 2);
    }

    #[test]
    fn test_remove_missing_leaves_ledger_unchanged() {
        let mut ledger = seeded();
        let before = ledger.clone();

        let err = ledger
            .remove(EntryKind::Expense, "rent", MatchMode::Substring)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_entry_json_shape() {
        let ledger = seeded();
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"expenses": [], "incomes": [{"salary": "1000.00"}]})
        );

        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_entry_rejects_multi_pair_objects() {
        let result = serde_json::from_str::<LedgerEntry>(r#"{"a": "1.00", "b": "2.00"}"#);
        assert!(result.is_err());
        assert!(serde_json::from_str::<LedgerEntry>("{}").is_err());
    }

    #[test]
    fn test_add_refuses_total_overflow() {
        let mut ledger = Ledger::new(entry("salary", "90000000000000000"));

        let err = ledger
            .add(
                EntryKind::Income,
                entry("bonus", "90000000000000000"),
                MatchMode::Substring,
            )
            .unwrap_err();

        assert!(err.is_overflow());
        assert_eq!(ledger.incomes().len(), 1);
        assert_eq!(
            ledger.balance().unwrap().to_string(),
            "90000000000000000.00"
        );
    }

    #[test]
    fn test_add_refuses_balance_overflow() {
        let mut ledger = Ledger::new(entry("salary", "90000000000000000"));

        let err = ledger
            .add(
                EntryKind::Expense,
                entry("debt", "-90000000000000000"),
                MatchMode::Substring,
            )
            .unwrap_err();

        assert!(err.is_overflow());
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_remove_refuses_balance_overflow() {
        let mut ledger = Ledger::new(entry("salary", "90000000000000000"));
        for (description, amount) in [("loan", "90000000000000000"), ("refund", "-90000000000000000")] {
            ledger
                .add(EntryKind::Expense, entry(description, amount), MatchMode::Exact)
                .unwrap();
        }

        let err = ledger
            .remove(EntryKind::Expense, "loan", MatchMode::Exact)
            .unwrap_err();

        assert!(err.is_overflow());
        assert_eq!(ledger.expenses()[0].description, "loan");
        assert_eq!(ledger.expenses().len(), 2);
    }

    #[test]
    fn test_stored_overflowing_ledger_reports_error() {
        let json = r#"{"expenses":[],"incomes":[{"a":"90000000000000000.00"},{"b":"90000000000000000.00"}]}"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();

        assert!(ledger.total(EntryKind::Income).unwrap_err().is_overflow());
        assert!(ledger.balance().unwrap_err().is_overflow());
        assert_eq!(ledger.total(EntryKind::Expense).unwrap(), Money::zero());
    }

    #[test]
    fn test_book_lookup() {
        let mut book = LedgerBook::new();
        assert!(book.is_empty());

        book.insert("bob", seeded());
        assert!(book.contains("bob"));
        assert!(!book.contains("Bob"));
        assert!(book.get("bob").is_some());
        assert_eq!(book.len(), 1);
    }
}
