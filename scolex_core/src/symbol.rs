//! Symbol interning for O(1) identity equality.
//!
//! A [`SymbolRegistry`] maps string content to a single immutable record per
//! content hash. A [`Symbol`] is a cheap shared handle to one record; two
//! symbols are equal exactly when they point at the same record.
//!
//! ## Collision Handling
//!
//! Records are keyed by the content hash. Under the default
//! [`CollisionPolicy::HashOnly`] a lookup trusts the hash alone, so two
//! different strings that hash identically resolve to the same symbol (the
//! first one interned). The registry logs a `warn` event whenever it detects
//! such a merge. [`CollisionPolicy::VerifyContent`] also compares content and
//! keeps colliding strings apart.
//!
//! ## Thread Safety
//!
//! Lookup-or-insert runs under one exclusive lock. The content hash is
//! computed before the lock is taken. Records are immutable, so reading a
//! symbol's name or hash never locks.

use crate::error::{ScolexError, ScolexResult};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::sync::{Arc, LazyLock};
use tracing::{trace, warn};

/// Hash builder used for symbol content unless another one is supplied.
pub type DefaultContentHasher = BuildHasherDefault<FxHasher>;

/// Records sharing one content hash. Holds at most one record under
/// [`CollisionPolicy::HashOnly`].
type Bucket = SmallVec<[Arc<SymbolRecord>; 1]>;

type SymbolTable = FxHashMap<u64, Bucket>;

/// Immutable interned data owned by a registry.
struct SymbolRecord {
    hash: u64,
    content: Box<str>,
}

// =============================================================================
// Symbol
// =============================================================================

/// A handle to an interned symbol record.
///
/// Cloning copies the reference only. Equality and hashing use record
/// identity, never the string content.
#[derive(Clone)]
pub struct Symbol {
    record: Arc<SymbolRecord>,
}

impl Symbol {
    /// Intern `name` in the global registry.
    #[inline]
    pub fn new(name: &str) -> Self {
        intern(name)
    }

    /// Get the interned string content.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.content
    }

    /// Get the content hash recorded when the symbol was first interned.
    #[inline]
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        self.record.hash
    }

    /// Check whether two symbols reference the same record.
    #[inline]
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.record, &b.record)
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the pointer for consistency with Eq
        Arc::as_ptr(&self.record).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name(), self.content_hash())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({self})")
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        self.name()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// How a registry decides that content is already interned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// Match on the content hash alone. Distinct strings with equal hashes
    /// are merged into one symbol.
    #[default]
    HashOnly,
    /// Match on hash and content. Colliding strings get separate records.
    VerifyContent,
}

/// Construction options for a [`SymbolRegistry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Collision handling.
    pub policy: CollisionPolicy,
    /// Number of distinct hashes to preallocate room for.
    pub capacity: usize,
}

impl RegistryConfig {
    /// Use the given collision policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Preallocate room for `capacity` hashes.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Thread-safe symbol registry.
///
/// Records are never removed while the registry lives. Symbols handed out
/// keep their record alive even past the registry itself.
pub struct SymbolRegistry<S = DefaultContentHasher> {
    table: Mutex<SymbolTable>,
    hasher: S,
    policy: CollisionPolicy,
}

impl SymbolRegistry<DefaultContentHasher> {
    /// Create an empty registry with the default hash-only policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with room for `capacity` hashes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(RegistryConfig::default().with_capacity(capacity))
    }

    /// Create an empty registry from explicit options.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_hasher(config, DefaultContentHasher::default())
    }
}

impl<S: BuildHasher> SymbolRegistry<S> {
    /// Create an empty registry that hashes content with `hasher`.
    #[must_use]
    pub fn with_hasher(config: RegistryConfig, hasher: S) -> Self {
        Self {
            table: Mutex::new(FxHashMap::with_capacity_and_hasher(
                config.capacity,
                Default::default(),
            )),
            hasher,
            policy: config.policy,
        }
    }

    /// The collision policy this registry was built with.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// The hash this registry assigns to `content`.
    #[inline]
    #[must_use]
    pub fn hash_of(&self, content: &str) -> u64 {
        self.hasher.hash_one(content)
    }

    /// Intern a string, returning its symbol.
    ///
    /// Interning equal content again returns the same record.
    pub fn intern(&self, content: &str) -> Symbol {
        self.intern_cow(Cow::Borrowed(content))
    }

    /// Intern an owned string.
    ///
    /// The string becomes the record's content when it is not already
    /// interned.
    pub fn intern_owned(&self, content: String) -> Symbol {
        self.intern_cow(Cow::Owned(content))
    }

    /// Intern a string, reporting allocation failure instead of aborting.
    ///
    /// Table and content storage are reserved before anything is inserted,
    /// so a failure leaves the registry unchanged.
    pub fn try_intern(&self, content: &str) -> ScolexResult<Symbol> {
        let hash = self.hash_of(content);
        let mut table = self.table.lock();

        if let Some(found) = self.lookup(&table, hash, content) {
            return Ok(found);
        }

        table.try_reserve(1)?;
        if let Some(bucket) = table.get_mut(&hash) {
            bucket
                .try_reserve(1)
                .map_err(|_| ScolexError::allocation("symbol bucket"))?;
        }

        let mut owned = String::new();
        owned.try_reserve_exact(content.len())?;
        owned.push_str(content);

        Ok(Self::insert(&mut table, hash, owned))
    }

    /// Get an already-interned symbol without creating a new one.
    #[must_use]
    pub fn get(&self, content: &str) -> Option<Symbol> {
        let hash = self.hash_of(content);
        let table = self.table.lock();
        self.lookup(&table, hash, content)
    }

    /// Check whether `content` resolves to an interned symbol.
    #[must_use]
    pub fn contains(&self, content: &str) -> bool {
        self.get(content).is_some()
    }

    /// Number of interned records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().values().map(SmallVec::len).sum()
    }

    /// Check if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    fn intern_cow(&self, content: Cow<'_, str>) -> Symbol {
        let hash = self.hash_of(&content);
        let mut table = self.table.lock();

        if let Some(found) = self.lookup(&table, hash, &content) {
            return found;
        }

        Self::insert(&mut table, hash, content.into_owned())
    }

    fn lookup(&self, table: &SymbolTable, hash: u64, content: &str) -> Option<Symbol> {
        let bucket = table.get(&hash)?;
        let record = match self.policy {
            CollisionPolicy::HashOnly => {
                let record = bucket.first()?;
                if *record.content != *content {
                    warn!(
                        hash,
                        interned = &*record.content,
                        requested = content,
                        "symbol hash collision merged distinct content"
                    );
                }
                record
            }
            CollisionPolicy::VerifyContent => {
                bucket.iter().find(|record| *record.content == *content)?
            }
        };
        Some(Symbol {
            record: Arc::clone(record),
        })
    }

    fn insert(table: &mut SymbolTable, hash: u64, content: String) -> Symbol {
        let record = Arc::new(SymbolRecord {
            hash,
            content: content.into_boxed_str(),
        });
        trace!(hash, content = &*record.content, "interned new symbol");
        table.entry(hash).or_default().push(Arc::clone(&record));
        Symbol { record }
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SymbolRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        f.debug_struct("SymbolRegistry")
            .field("policy", &self.policy)
            .field("count", &table.values().map(SmallVec::len).sum::<usize>())
            .finish()
    }
}

/// The process-wide registry, created on first use.
pub static GLOBAL_REGISTRY: LazyLock<SymbolRegistry> = LazyLock::new(SymbolRegistry::new);

/// Intern a string using the global registry.
#[inline]
pub fn intern(content: &str) -> Symbol {
    GLOBAL_REGISTRY.intern(content)
}

/// Intern an owned string using the global registry.
#[inline]
pub fn intern_owned(content: String) -> Symbol {
    GLOBAL_REGISTRY.intern_owned(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sends every input to the same hash.
    #[derive(Default)]
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            42
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    type Colliding = BuildHasherDefault<ConstantHasher>;

    fn colliding(policy: CollisionPolicy) -> SymbolRegistry<Colliding> {
        SymbolRegistry::with_hasher(
            RegistryConfig::default().with_policy(policy),
            Colliding::default(),
        )
    }

    #[test]
    fn test_intern_same_string_returns_same_record() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern("hello");
        let s2 = registry.intern("hello");

        assert!(Symbol::ptr_eq(&s1, &s2));
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_intern_different_strings_returns_different_records() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern("hello");
        let s2 = registry.intern("world");

        assert_ne!(s1.content_hash(), s2.content_hash());
        assert!(!Symbol::ptr_eq(&s1, &s2));
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_symbol_name_and_hash() {
        let registry = SymbolRegistry::new();
        let s = registry.intern("quote");

        assert_eq!(s.name(), "quote");
        assert_eq!(s.content_hash(), registry.hash_of("quote"));
    }

    #[test]
    fn test_symbol_display_shows_name_and_hash() {
        let registry = SymbolRegistry::new();
        let s = registry.intern("+");

        assert_eq!(s.to_string(), format!("+:{}", registry.hash_of("+")));
    }

    #[test]
    fn test_symbol_debug() {
        let registry = SymbolRegistry::new();
        let s = registry.intern("debug_test");

        let debug_str = format!("{:?}", s);
        assert!(debug_str.starts_with("Symbol(debug_test:"));
    }

    #[test]
    fn test_equal_content_in_separate_registries_is_not_identical() {
        let a = SymbolRegistry::new();
        let b = SymbolRegistry::new();

        let sa = a.intern("shared");
        let sb = b.intern("shared");

        assert_eq!(sa.content_hash(), sb.content_hash());
        assert_ne!(sa, sb);
    }

    #[test]
    fn test_intern_owned() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern_owned(String::from("owned"));
        let s2 = registry.intern("owned");

        assert_eq!(s1, s2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_try_intern_matches_intern() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern("fallible");
        let s2 = registry.try_intern("fallible").unwrap();
        let s3 = registry.try_intern("fresh").unwrap();

        assert_eq!(s1, s2);
        assert_eq!(s3.name(), "fresh");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_get_does_not_insert() {
        let registry = SymbolRegistry::new();
        assert!(registry.get("absent").is_none());
        assert!(registry.is_empty());

        let s = registry.intern("present");
        assert_eq!(registry.get("present"), Some(s));
        assert!(registry.contains("present"));
        assert!(!registry.contains("absent"));
    }

    #[test]
    fn test_registry_len() {
        let registry = SymbolRegistry::with_capacity(8);
        assert_eq!(registry.len(), 0);

        registry.intern("one");
        assert_eq!(registry.len(), 1);

        registry.intern("two");
        assert_eq!(registry.len(), 2);

        registry.intern("one"); // Duplicate
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_debug() {
        let registry = SymbolRegistry::new();
        registry.intern("a");
        registry.intern("b");

        let debug_str = format!("{:?}", registry);
        assert!(debug_str.contains("SymbolRegistry"));
        assert!(debug_str.contains("count: 2"));
        assert!(debug_str.contains("HashOnly"));
    }

    #[test]
    fn test_symbol_outlives_registry() {
        let s = {
            let registry = SymbolRegistry::new();
            registry.intern("survivor")
        };

        assert_eq!(s.name(), "survivor");
    }

    #[test]
    fn test_hash_only_policy_merges_colliding_content() {
        let registry = colliding(CollisionPolicy::HashOnly);
        let alpha = registry.intern("alpha");
        let beta = registry.intern("beta");

        // Distinct content, one record: the first string interned wins.
        assert_eq!(alpha, beta);
        assert_eq!(beta.name(), "alpha");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("beta"));
    }

    #[test]
    fn test_verify_content_policy_separates_colliding_content() {
        let registry = colliding(CollisionPolicy::VerifyContent);
        let alpha = registry.intern("alpha");
        let beta = registry.intern("beta");

        assert_ne!(alpha, beta);
        assert_eq!(alpha.content_hash(), beta.content_hash());
        assert_eq!(beta.name(), "beta");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.intern("beta"), beta);
        assert!(!registry.contains("gamma"));
    }

    #[test]
    fn test_try_intern_verify_content_grows_bucket() {
        let registry = colliding(CollisionPolicy::VerifyContent);
        let alpha = registry.try_intern("alpha").unwrap();
        let beta = registry.try_intern("beta").unwrap();

        assert_ne!(alpha, beta);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_config_builder() {
        let config = RegistryConfig::default()
            .with_policy(CollisionPolicy::VerifyContent)
            .with_capacity(16);

        assert_eq!(config.policy, CollisionPolicy::VerifyContent);
        assert_eq!(config.capacity, 16);
        assert_eq!(
            SymbolRegistry::with_config(config).policy(),
            CollisionPolicy::VerifyContent
        );
        assert_eq!(SymbolRegistry::new().policy(), CollisionPolicy::HashOnly);
    }

    #[test]
    fn test_symbol_hash_uses_identity() {
        use std::collections::HashMap;

        let registry = SymbolRegistry::new();
        let s1 = registry.intern("key");
        let s2 = registry.intern("key");

        let mut map = HashMap::new();
        map.insert(s1, 42);

        assert_eq!(map.get(&s2), Some(&42));
    }

    #[test]
    fn test_unicode_and_special_content() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern("λ→🦀");
        let s2 = registry.intern("before\0after");

        assert_eq!(registry.intern("λ→🦀"), s1);
        assert_eq!(s2.name().len(), 12);
    }

    #[test]
    fn test_case_and_whitespace_significant() {
        let registry = SymbolRegistry::new();
        let s1 = registry.intern("Hello");
        let s2 = registry.intern("hello");
        let s3 = registry.intern("hello ");

        assert_ne!(s1, s2);
        assert_ne!(s2, s3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_global_registry() {
        let s1 = intern("global_test");
        let s2 = intern_owned(String::from("global_test"));
        let s3 = Symbol::new("global_test");

        assert_eq!(s1, s2);
        assert_eq!(s1, s3);
        assert!(GLOBAL_REGISTRY.contains("global_test"));
    }

    #[test]
    fn test_concurrent_interning() {
        use std::thread;

        let registry = Arc::new(SymbolRegistry::new());
        let mut handles = vec![];

        for i in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                let s = format!("thread_{}", i);
                for _ in 0..100 {
                    registry.intern(&s);
                }
                registry.intern(&s)
            }));
        }

        for handle in handles {
            let _ = handle.join().unwrap();
        }

        // Each thread should have created exactly one record
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_concurrent_same_string() {
        use std::thread;

        let registry = Arc::new(SymbolRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    registry.intern("shared_symbol");
                }
                registry.intern("shared_symbol")
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // All threads should observe the same record
        for result in &results[1..] {
            assert_eq!(&results[0], result);
        }

        assert_eq!(registry.len(), 1);
    }
}
