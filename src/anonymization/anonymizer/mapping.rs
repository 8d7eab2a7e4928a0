//! Session mapping between original values and tokens
//!
//! Each original value maps to exactly one token and back. Tokens are built
//! from a per-type counter (`PERSON_001`, `ORG_002`, `AMOUNT_LARGE_003`) that
//! only ever increases within a session. Clearing the store zeroizes every
//! stored string and restarts the counters.

use super::magnitude::Magnitude;
use crate::anonymization::models::EntityType;
use crate::domain::LookupError;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};
use zeroize::Zeroize;

/// Build the token for the `index`-th value of a type
///
/// Financial tokens embed the amount's magnitude class.
pub fn build_token(entity_type: EntityType, index: u32, magnitude: Option<Magnitude>) -> String {
    match (entity_type, magnitude) {
        (EntityType::Financial, Some(magnitude)) => {
            format!("{}_{}_{:03}", entity_type.token_prefix(), magnitude.label(), index)
        }
        _ => format!("{}_{:03}", entity_type.token_prefix(), index),
    }
}

/// Regex matching any token this engine can issue
pub fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        let prefixes = EntityType::ALL
            .iter()
            .filter(|t| **t != EntityType::Financial)
            .map(|t| t.token_prefix())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"\b(?:(?:{prefixes})|AMOUNT_(?:SMALL|MEDIUM|LARGE|MAJOR|MASSIVE))_\d{{3,}}\b"
        );
        Regex::new(&pattern).expect("token pattern is built from fixed prefixes")
    })
}

/// Bidirectional original/token map with per-type counters
#[derive(Default)]
pub struct MappingStore {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    counters: BTreeMap<EntityType, u32>,
}

impl MappingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Token previously issued for an original value
    pub fn token_for(&self, original: &str) -> Option<&str> {
        self.forward.get(original).map(String::as_str)
    }

    /// Original value behind a token
    pub fn original_for(&self, token: &str) -> Option<&str> {
        self.reverse.get(token).map(String::as_str)
    }

    /// Get the existing token for `original` or allocate the next one
    ///
    /// Returns the token and whether it was newly allocated.
    pub fn get_or_assign(
        &mut self,
        entity_type: EntityType,
        original: &str,
        magnitude: Option<Magnitude>,
    ) -> (String, bool) {
        if let Some(token) = self.forward.get(original) {
            return (token.clone(), false);
        }

        let counter = self.counters.entry(entity_type).or_insert(0);
        *counter += 1;
        let token = build_token(entity_type, *counter, magnitude);

        self.forward.insert(original.to_string(), token.clone());
        self.reverse.insert(token.clone(), original.to_string());
        (token, true)
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true when no mapping exists
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Mappings issued per entity type
    pub fn counts_by_type(&self) -> BTreeMap<EntityType, usize> {
        self.counters
            .iter()
            .map(|(entity_type, count)| (*entity_type, *count as usize))
            .collect()
    }

    /// Zeroize and drop every mapping, resetting the counters
    ///
    /// Returns how many mappings were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.forward.len();
        for (mut original, mut token) in self.forward.drain() {
            original.zeroize();
            token.zeroize();
        }
        for (mut token, mut original) in self.reverse.drain() {
            token.zeroize();
            original.zeroize();
        }
        self.counters.clear();
        discarded
    }
}

impl std::fmt::Debug for MappingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingStore")
            .field("mappings", &self.forward.len())
            .field("counters", &self.counters)
            .finish()
    }
}

impl Drop for MappingStore {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Shared handle on one session's mapping store
///
/// Clones refer to the same store; every lookup-or-assign happens under the
/// store's lock, so concurrent documents never receive duplicate tokens.
#[derive(Debug, Clone, Default)]
pub struct MappingSession {
    store: Arc<Mutex<MappingStore>>,
}

impl MappingSession {
    /// Create a session with an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for one value, allocating if needed
    pub fn token_for(
        &self,
        entity_type: EntityType,
        original: &str,
        magnitude: Option<Magnitude>,
    ) -> String {
        self.store.lock().get_or_assign(entity_type, original, magnitude).0
    }

    /// Tokens for a whole document's values under a single lock
    pub fn assign_all<'a, I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = (EntityType, &'a str, Option<Magnitude>)>,
    {
        let mut store = self.store.lock();
        values
            .into_iter()
            .map(|(entity_type, original, magnitude)| {
                store.get_or_assign(entity_type, original, magnitude).0
            })
            .collect()
    }

    /// Original value for a token issued by this session
    pub fn resolve(&self, token: &str) -> Result<String, LookupError> {
        self.store
            .lock()
            .original_for(token)
            .map(str::to_string)
            .ok_or_else(|| LookupError::UnknownToken(token.to_string()))
    }

    /// Replace every known token in `text` with its original value
    ///
    /// Tokens from other sessions are left untouched and returned.
    pub fn restore_text(&self, text: &str) -> (String, Vec<String>) {
        let store = self.store.lock();
        let mut unknown = Vec::new();
        let restored = token_regex()
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let token = &caps[0];
                match store.original_for(token) {
                    Some(original) => original.to_string(),
                    None => {
                        unknown.push(token.to_string());
                        token.to_string()
                    }
                }
            })
            .into_owned();
        (restored, unknown)
    }

    /// Zeroize every mapping; returns how many were discarded
    pub fn clear(&self) -> usize {
        self.store.lock().clear()
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true when no mapping exists
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Mappings issued per entity type
    pub fn counts_by_type(&self) -> BTreeMap<EntityType, usize> {
        self.store.lock().counts_by_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_format() {
        assert_eq!(build_token(EntityType::Person, 1, None), "PERSON_001");
        assert_eq!(build_token(EntityType::Organization, 12, None), "ORG_012");
        assert_eq!(
            build_token(EntityType::Financial, 3, Some(Magnitude::Large)),
            "AMOUNT_LARGE_003"
        );
        assert_eq!(build_token(EntityType::CaseNumber, 1000, None), "CASE_1000");
    }

    #[test]
    fn test_same_value_same_token() {
        let mut store = MappingStore::new();
        let (a, new_a) = store.get_or_assign(EntityType::Person, "John Smith", None);
        let (b, new_b) = store.get_or_assign(EntityType::Person, "John Smith", None);
        assert_eq!(a, b);
        assert!(new_a);
        assert!(!new_b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_counters_are_per_type() {
        let mut store = MappingStore::new();
        store.get_or_assign(EntityType::Person, "A", None);
        store.get_or_assign(EntityType::Date, "1/1/2020", None);
        let (token, _) = store.get_or_assign(EntityType::Person, "B", None);
        assert_eq!(token, "PERSON_002");
        assert_eq!(store.counts_by_type().get(&EntityType::Date), Some(&1));
    }

    #[test]
    fn test_amounts_share_one_counter() {
        let mut store = MappingStore::new();
        let (a, _) = store.get_or_assign(EntityType::Financial, "£500", Some(Magnitude::Small));
        let (b, _) = store.get_or_assign(EntityType::Financial, "£5m", Some(Magnitude::Massive));
        assert_eq!(a, "AMOUNT_SMALL_001");
        assert_eq!(b, "AMOUNT_MASSIVE_002");
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut store = MappingStore::new();
        store.get_or_assign(EntityType::Person, "John Smith", None);
        store.get_or_assign(EntityType::Person, "Jane Doe", None);
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(store.original_for("PERSON_001").is_none());
        let (token, _) = store.get_or_assign(EntityType::Person, "Jane Doe", None);
        assert_eq!(token, "PERSON_001");
    }

    #[test]
    fn test_session_resolve_unknown_token() {
        let session = MappingSession::new();
        let err = session.resolve("PERSON_999").unwrap_err();
        assert_eq!(err, LookupError::UnknownToken("PERSON_999".to_string()));
    }

    #[test]
    fn test_session_clones_share_store() {
        let session = MappingSession::new();
        let clone = session.clone();
        let token = session.token_for(EntityType::Contact, "a@b.com", None);
        assert_eq!(clone.resolve(&token).unwrap(), "a@b.com");
    }

    #[test]
    fn test_restore_text() {
        let session = MappingSession::new();
        let tokens = session.assign_all([
            (EntityType::Person, "John Smith", None),
            (EntityType::Financial, "£50,000", Some(Magnitude::Large)),
        ]);
        let text = format!("{} owes {} to PERSON_042.", tokens[0], tokens[1]);
        let (restored, unknown) = session.restore_text(&text);
        assert_eq!(restored, "John Smith owes £50,000 to PERSON_042.");
        assert_eq!(unknown, vec!["PERSON_042".to_string()]);
    }

    #[test]
    fn test_concurrent_assignment_is_consistent() {
        let session = MappingSession::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| session.token_for(EntityType::Person, &format!("Name {i}"), None))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for other in &results[1..] {
            assert_eq!(other, &results[0]);
        }
        assert_eq!(session.len(), 50);
    }
}
