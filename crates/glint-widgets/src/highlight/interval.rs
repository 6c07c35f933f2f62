//! Interval groups as supplied by the host, and the resolved intervals a
//! highlight pass works on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The part an interval plays inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Role {
    /// The label half of a key/value pair.
    Key,
    /// The value half of a key/value pair.
    Value,
    /// A value with no key range.
    ValueOnly,
}

/// A resolved, in-bounds range of character offsets `[start, stop)`.
///
/// Built fresh for every highlight pass from the host's [`Groups`];
/// `start <= stop <= text length` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: usize,
    pub stop: usize,
    /// Key of the group this interval came from.
    pub group: Option<String>,
    pub role: Role,
    /// Whether the interval's group is in the active emphasis set.
    pub emphasized: bool,
}

impl Interval {
    /// An emphasised interval with no owning group.
    pub fn new(start: usize, stop: usize, role: Role) -> Self {
        debug_assert!(start <= stop, "interval start must be <= stop");
        Self {
            start,
            stop,
            group: None,
            role,
            emphasized: true,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_emphasis(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Whether the interval contains the midpoint of the segment `[a, b)`.
    ///
    /// The midpoint is compared exactly, without rounding, by doubling both
    /// sides: `start <= (a + b) / 2 <= stop`.
    pub fn covers(&self, a: usize, b: usize) -> bool {
        let twice_mid = a + b;
        2 * self.start <= twice_mid && twice_mid <= 2 * self.stop
    }
}

/// An unvalidated `[start, stop]` offset pair as sent by the host.
///
/// Offsets may be negative, inverted or past the end of the text; they are
/// checked (and clamped or rejected) when a pass resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[i64; 2]", into = "[i64; 2]"))]
pub struct RawRange {
    pub start: i64,
    pub stop: i64,
}

impl RawRange {
    pub fn new(start: i64, stop: i64) -> Self {
        Self { start, stop }
    }
}

impl From<[i64; 2]> for RawRange {
    fn from([start, stop]: [i64; 2]) -> Self {
        Self { start, stop }
    }
}

impl From<RawRange> for [i64; 2] {
    fn from(range: RawRange) -> Self {
        [range.start, range.stop]
    }
}

impl From<(i64, i64)> for RawRange {
    fn from((start, stop): (i64, i64)) -> Self {
        Self { start, stop }
    }
}

impl From<std::ops::Range<usize>> for RawRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        let clamp = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Self {
            start: clamp(range.start),
            stop: clamp(range.end),
        }
    }
}

/// One `(key?, value)` entry of a group.
///
/// Serialised as a two-element array, `[[s, e] | null, [s, e]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(Option<RawRange>, RawRange)", into = "(Option<RawRange>, RawRange)")
)]
pub struct Pair {
    pub key: Option<RawRange>,
    pub value: RawRange,
}

impl Pair {
    /// A pair with both a key range and a value range.
    pub fn keyed(key: impl Into<RawRange>, value: impl Into<RawRange>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }

    /// A pair carrying only a value range.
    pub fn value_only(value: impl Into<RawRange>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }
}

impl From<(Option<RawRange>, RawRange)> for Pair {
    fn from((key, value): (Option<RawRange>, RawRange)) -> Self {
        Self { key, value }
    }
}

impl From<Pair> for (Option<RawRange>, RawRange) {
    fn from(pair: Pair) -> Self {
        (pair.key, pair.value)
    }
}

/// A named collection of pairs, e.g. every match of one extracted entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub pairs: Vec<Pair>,
}

/// Interval groups keyed by name, in insertion order.
///
/// Order matters only for display: it decides the order in which group keys
/// are listed for a segment covered by several groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group. Re-inserting an existing key replaces its pairs but
    /// keeps its original position; the old pairs are returned.
    pub fn insert(&mut self, key: impl Into<String>, pairs: Vec<Pair>) -> Option<Vec<Pair>> {
        let key = key.into();
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(existing) => Some(std::mem::replace(&mut existing.pairs, pairs)),
            None => {
                self.groups.push(Group { key, pairs });
                None
            }
        }
    }

    /// Builder-style [`insert`](Groups::insert).
    pub fn with(mut self, key: impl Into<String>, pairs: Vec<Pair>) -> Self {
        self.insert(key, pairs);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<Pair>> {
        let pos = self.groups.iter().position(|g| g.key == key)?;
        Some(self.groups.remove(pos).pairs)
    }

    pub fn get(&self, key: &str) -> Option<&[Pair]> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.pairs.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Pair>)> for Groups {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Pair>)>>(iter: I) -> Self {
        let mut groups = Groups::new();
        for (key, pairs) in iter {
            groups.insert(key, pairs);
        }
        groups
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Groups, Pair};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Groups {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for group in self {
                map.serialize_entry(&group.key, &group.pairs)?;
            }
            map.end()
        }
    }

    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = Groups;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from group key to a list of [key-range | null, value-range] pairs")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Groups, A::Error> {
            let mut groups = Groups::new();
            while let Some((key, pairs)) = access.next_entry::<String, Vec<Pair>>()? {
                groups.insert(key, pairs);
            }
            Ok(groups)
        }
    }

    impl<'de> Deserialize<'de> for Groups {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Groups, D::Error> {
            deserializer.deserialize_map(GroupsVisitor)
        }
    }
}
