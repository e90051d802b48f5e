//! `serde` support. A map serializes as a map of its entries in edge order.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{EdgeOrder, RadixKey, RadixMap};

impl<K, V, O> Serialize for RadixMap<K, V, O>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RadixMapVisitor<K, V, O> {
    marker: PhantomData<fn() -> RadixMap<K, V, O>>,
}

impl<'de, K, V, O> Visitor<'de> for RadixMapVisitor<K, V, O>
where
    K: Deserialize<'de> + RadixKey,
    V: Deserialize<'de>,
    O: EdgeOrder<K> + Default,
{
    type Value = RadixMap<K, V, O>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    /// Duplicate keys keep their first value, like [`RadixMap::insert`].
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = RadixMap::with_order(O::default());
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, O> Deserialize<'de> for RadixMap<K, V, O>
where
    K: Deserialize<'de> + RadixKey,
    V: Deserialize<'de>,
    O: EdgeOrder<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RadixMapVisitor {
            marker: PhantomData,
        })
    }
}
