//! S-expression value representation.
//!
//! A [`Value`] is one of six variants: nil, boolean, number, string, symbol,
//! or a list of values. Values have plain value semantics:
//!
//! - Cloning deep-copies strings and lists. Symbols copy their record
//!   reference only, so a cloned symbol stays identical to the original.
//! - [`Value::take`] moves a value out and leaves `Nil` behind.
//! - `Nil` doubles as the empty list. Lists built through the constructors
//!   are never empty; an empty sequence becomes `Nil`.
//!
//! Lists are stored contiguously. [`Value::head`] and [`Value::tail`] give
//! cons-style traversal on top of that, at the cost of copying the remaining
//! elements on every `tail`.

use crate::error::{ScolexError, ScolexResult};
use crate::symbol::{self, Symbol, SymbolRegistry};
use std::fmt;
use std::hash::BuildHasher;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// An interned symbol.
    Symbol,
    /// An owned string.
    String,
    /// A 64-bit float.
    Number,
    /// A boolean.
    Boolean,
    /// An ordered list of values.
    List,
    /// Nil, also the empty list.
    Nil,
}

impl Tag {
    /// Get the lowercase tag name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Nil => "nil",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed S-expression.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Nil, also the canonical empty list.
    #[default]
    Nil,
    /// A boolean.
    Boolean(bool),
    /// A 64-bit float.
    Number(f64),
    /// An owned string.
    String(String),
    /// An interned symbol.
    Symbol(Symbol),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a nil value.
    #[inline]
    #[must_use]
    pub const fn nil() -> Self {
        Self::Nil
    }

    /// Create a boolean value.
    #[inline]
    #[must_use]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Create a number value.
    #[inline]
    #[must_use]
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create a string value, copying borrowed content or taking an owned
    /// `String` as is.
    #[inline]
    pub fn string(content: impl Into<String>) -> Self {
        Self::String(content.into())
    }

    /// Create a symbol value interned in the global registry.
    #[inline]
    pub fn symbol(content: &str) -> Self {
        Self::Symbol(symbol::intern(content))
    }

    /// Create a symbol value interned in `registry`.
    #[inline]
    pub fn symbol_in<S: BuildHasher>(registry: &SymbolRegistry<S>, content: &str) -> Self {
        Self::Symbol(registry.intern(content))
    }

    /// Wrap an already interned symbol.
    #[inline]
    #[must_use]
    pub const fn from_symbol(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }

    /// Create a list value. An empty sequence yields `Nil`.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = items.into_iter().collect();
        if items.is_empty() {
            Self::Nil
        } else {
            Self::List(items)
        }
    }

    /// Create a list value by copying a range of values. An empty range
    /// yields `Nil`.
    #[must_use]
    pub fn list_from_slice(items: &[Value]) -> Self {
        if items.is_empty() {
            Self::Nil
        } else {
            Self::List(items.to_vec())
        }
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Get the tag of the live variant.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Nil => Tag::Nil,
            Self::Boolean(_) => Tag::Boolean,
            Self::Number(_) => Tag::Number,
            Self::String(_) => Tag::String,
            Self::Symbol(_) => Tag::Symbol,
            Self::List(_) => Tag::List,
        }
    }

    /// Check if this is nil or an empty list.
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Truthiness: everything except nil and the empty list.
    #[inline]
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Get the boolean payload.
    pub fn as_boolean(&self) -> ScolexResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(Tag::Boolean)),
        }
    }

    /// Get the number payload.
    pub fn as_number(&self) -> ScolexResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(self.mismatch(Tag::Number)),
        }
    }

    /// Get the symbol payload.
    pub fn as_symbol(&self) -> ScolexResult<&Symbol> {
        match self {
            Self::Symbol(sym) => Ok(sym),
            _ => Err(self.mismatch(Tag::Symbol)),
        }
    }

    /// Get the string payload.
    pub fn as_str(&self) -> ScolexResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(self.mismatch(Tag::String)),
        }
    }

    /// Get the list elements.
    pub fn as_list(&self) -> ScolexResult<&[Value]> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(self.mismatch(Tag::List)),
        }
    }

    /// Get a list element by index.
    ///
    /// Fails with `TypeMismatch` on non-lists and `RangeError` when `index`
    /// is negative or not less than [`size`](Self::size).
    pub fn item(&self, index: isize) -> ScolexResult<&Value> {
        let items = self.as_list()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .ok_or(ScolexError::range(index, items.len()))
    }

    /// Number of values this value holds when viewed as a sequence.
    ///
    /// 0 for nil, 1 for scalars, the element count for lists.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.as_slice().len()
    }

    /// View this value as a sequence: list elements in order, a scalar as a
    /// single element, nil as nothing.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Self::Nil => &[],
            Self::List(items) => items,
            _ => std::slice::from_ref(self),
        }
    }

    /// Iterate over this value viewed as a sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    // =========================================================================
    // List View
    // =========================================================================

    /// First element of a non-empty list, otherwise nil.
    #[must_use]
    pub fn head(&self) -> Value {
        match self {
            Self::List(items) => items.first().cloned().unwrap_or_default(),
            _ => Self::Nil,
        }
    }

    /// All elements after the first of a non-empty list, otherwise nil.
    #[must_use]
    pub fn tail(&self) -> Value {
        match self {
            Self::List(items) if !items.is_empty() => Self::list_from_slice(&items[1..]),
            _ => Self::Nil,
        }
    }

    /// Move the value out, leaving nil in its place.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    #[inline]
    fn mismatch(&self, expected: Tag) -> ScolexError {
        ScolexError::type_mismatch(expected, self.tag())
    }
}

// =============================================================================
// Equality
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            // IEEE comparison: no epsilon, and NaN is unequal to itself
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        if items.is_empty() {
            Self::Nil
        } else {
            Self::List(items)
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::list(iter)
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build a list [`Value`] from elements convertible into values.
///
/// `sexpr![]` is nil.
///
/// ```
/// use scolex_core::{Symbol, sexpr};
///
/// let expr = sexpr![Symbol::new("+"), 1.5, 2, "three"];
/// assert_eq!(expr.size(), 4);
/// assert!(sexpr![].is_nil());
/// ```
#[macro_export]
macro_rules! sexpr {
    () => {
        $crate::Value::Nil
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::from($item)),+])
    };
}
