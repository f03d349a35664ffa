//! End-to-end scenarios over the library, driven by scripted answers

use tally_cli::config::{Settings, TallyPaths};
use tally_cli::crypto::{hash_password, verify_password};
use tally_cli::models::{EntryKind, Ledger, LedgerBook, LedgerEntry, MatchMode, Money};
use tally_cli::services::AccountService;
use tally_cli::storage::Storage;
use tally_cli::workflow::{AuthWorkflow, Flow, LedgerWorkflow, ScriptedPrompt, Termination};
use tempfile::TempDir;

fn setup() -> (TempDir, Storage, Settings) {
    let temp_dir = TempDir::new().unwrap();
    let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
    let storage = Storage::new(paths).unwrap();
    (temp_dir, storage, Settings::default())
}

/// Run both workflows the way the binary does
fn session(storage: &Storage, settings: &Settings, answers: &[&str]) -> (Termination, ScriptedPrompt) {
    let mut prompt = ScriptedPrompt::new(answers.iter().copied());

    let session = match AuthWorkflow::new(storage, settings).run(&mut prompt).unwrap() {
        Flow::Continue(session) => session,
        Flow::Terminate(termination) => return (termination, prompt),
    };

    let mut ledger = LedgerWorkflow::start(
        storage,
        settings,
        settings.description_match,
        &session,
        &mut prompt,
    )
    .unwrap();
    let termination = ledger.run(&mut prompt).unwrap();
    (termination, prompt)
}

fn bob(storage: &Storage) -> Ledger {
    storage.ledgers.load_all().unwrap().get("bob").unwrap().clone()
}

#[test]
fn register_seeds_ledger_with_salary() {
    let (_t, storage, settings) = setup();

    let (termination, _) = session(&storage, &settings, &["2", "bob", "pw", "1000", "salary", "5"]);

    assert_eq!(termination, Termination::UserExit);
    let ledger = bob(&storage);
    assert!(ledger.expenses().is_empty());
    assert_eq!(
        ledger.incomes(),
        &[LedgerEntry::new("salary", Money::from_cents(100000)).unwrap()]
    );
}

#[test]
fn add_rent_then_delete_by_substring() {
    let (_t, storage, settings) = setup();
    session(&storage, &settings, &["2", "bob", "pw", "1000", "salary", "5"]);

    let (_, prompt) = session(&storage, &settings, &["1", "bob", "pw", "1", "450", "rent", "5"]);
    let ledger = bob(&storage);
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(ledger.balance().unwrap(), Money::from_cents(55000));
    assert!(prompt.output().contains("bob, your current balance: $550.00"));

    session(&storage, &settings, &["1", "bob", "pw", "3", "ren", "5"]);
    let ledger = bob(&storage);
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.balance().unwrap(), Money::from_cents(100000));
}

#[test]
fn three_wrong_passwords_leave_stores_untouched() {
    let (_t, storage, settings) = setup();
    session(&storage, &settings, &["2", "bob", "pw", "1000", "salary", "5"]);

    let users_before = std::fs::read(storage.credentials.path()).unwrap();
    let ledgers_before = std::fs::read(storage.ledgers.path()).unwrap();

    let (termination, _) = session(&storage, &settings, &["1", "bob", "x", "y", "z"]);

    assert_eq!(termination, Termination::AuthenticationFailed);
    assert!(!termination.is_success());
    assert_eq!(std::fs::read(storage.credentials.path()).unwrap(), users_before);
    assert_eq!(std::fs::read(storage.ledgers.path()).unwrap(), ledgers_before);
}

#[test]
fn duplicate_registration_is_rejected_before_the_store() {
    let (_t, storage, _settings) = setup();
    let accounts = AccountService::new(&storage);

    accounts.register("alice", "one").unwrap();
    let err = accounts.register("alice", "two").unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(storage.credentials.count().unwrap(), 1);
    let stored = storage.credentials.find("alice").unwrap().unwrap();
    assert!(stored.verify("one"));
}

#[test]
fn hasher_verifies_only_the_hashed_password() {
    for password in ["", "pw", "correct horse battery staple", "пароль"] {
        let secret = hash_password(password);
        assert!(verify_password(password, &secret.digest, &secret.salt));
        assert!(!verify_password("something else", &secret.digest, &secret.salt));
    }

    let first = hash_password("pw");
    let second = hash_password("pw");
    assert_ne!(first.salt, second.salt);
    assert_ne!(first.digest, second.digest);
}

#[test]
fn ledger_store_roundtrip() {
    let (_t, storage, _settings) = setup();
    let entry = |d: &str, cents: i64| LedgerEntry::new(d, Money::from_cents(cents)).unwrap();

    let mut bob = Ledger::new(entry("salary", 100000));
    bob.add(EntryKind::Expense, entry("rent", 45000), MatchMode::Substring)
        .unwrap();
    bob.add(EntryKind::Expense, entry("coffee", -125), MatchMode::Substring)
        .unwrap();

    let mut book = LedgerBook::new();
    book.insert("bob", bob);
    book.insert("carol", Ledger::new(entry("pension", 30000)));

    storage.ledgers.save_all(&book).unwrap();
    assert_eq!(storage.ledgers.load_all().unwrap(), book);
}

#[test]
fn lost_ledger_is_reseeded_after_login() {
    let (_t, storage, settings) = setup();
    session(&storage, &settings, &["2", "bob", "pw", "1000", "salary", "5"]);
    std::fs::remove_file(storage.ledgers.path()).unwrap();

    let (termination, prompt) = session(&storage, &settings, &["1", "bob", "pw", "250", "savings", "5"]);

    assert_eq!(termination, Termination::UserExit);
    assert!(prompt.output().contains("data was lost"));
    assert_eq!(bob(&storage).balance().unwrap(), Money::from_cents(25000));
}
