use super::{Formatter, ToSql};

use indexmap::IndexMap;
use quarry_core::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bound values of a compiled statement, keyed by parameter name (without the
/// leading `:`), in the order they were bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: IndexMap<String, Value>,
}

/// Reference to a bound parameter, rendered as `:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder(pub String);

/// Source of unique parameter names.
///
/// Names have the shape `q{root}[_{child}...]_p{n}`. Roots come from a
/// process-wide counter and children from a per-namespace counter, so no two
/// namespaces share a prefix.
#[derive(Debug)]
pub(super) struct Namespace {
    prefix: String,
    next_param: u64,
    next_child: u64,
}

static NEXT_ROOT: AtomicU64 = AtomicU64::new(0);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Moves every parameter of `other` into `self`.
    pub fn merge(&mut self, other: Params) {
        self.values.extend(other.values);
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }

    pub(super) fn insert(&mut self, name: String, value: Value) {
        let prev = self.values.insert(name, value);
        debug_assert!(prev.is_none(), "parameter name reused");
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push(':');
        f.dst.push_str(&self.0);
    }
}

impl Namespace {
    pub(super) fn root() -> Self {
        let id = NEXT_ROOT.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("q{id}"))
    }

    fn new(prefix: String) -> Self {
        Self {
            prefix,
            next_param: 0,
            next_child: 0,
        }
    }

    pub(super) fn child(&mut self) -> Self {
        let n = self.next_child;
        self.next_child += 1;
        Self::new(format!("{}_{n}", self.prefix))
    }

    pub(super) fn next_name(&mut self) -> String {
        let n = self.next_param;
        self.next_param += 1;
        format!("{}_p{n}", self.prefix)
    }
}
