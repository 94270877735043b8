//! Deserialising JSON objects keyed by city or industry name.
//!
//! Keys are folded to their canonical form as entries are read, in document
//! order. When two source keys fold to the same canonical key the later
//! entry replaces the earlier one.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::entities::normalise_city_key;

struct CanonicalMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for CanonicalMapVisitor<V> {
    type Value = HashMap<String, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = HashMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            out.insert(normalise_city_key(&key), value);
        }
        Ok(out)
    }
}

/// Read a name-keyed object into a map with canonical keys, last entry winning.
pub fn deserialize_canonical<'de, D, V>(deserializer: D) -> Result<HashMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(CanonicalMapVisitor(PhantomData))
}
