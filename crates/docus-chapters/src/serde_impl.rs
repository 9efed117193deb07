//! Serde support for [`Chapter`].
//!
//! Deserialization resolves the loosely-typed input into the tagged union:
//! strings become leaves, lists become sequences, tables/objects become
//! mappings (insertion order kept, duplicate labels rejected). Any other
//! scalar is an error.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Chapter;

impl Serialize for Chapter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(path) => serializer.serialize_str(path),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (label, value) in entries {
                    map.serialize_entry(label, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Chapter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ChapterVisitor)
    }
}

struct ChapterVisitor;

impl<'de> Visitor<'de> for ChapterVisitor {
    type Value = Chapter;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document path, a list of chapters or a table of labeled chapters")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Chapter, E> {
        Ok(Chapter::Leaf(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Chapter, E> {
        Ok(Chapter::Leaf(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Chapter, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Chapter::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Chapter, A::Error> {
        let mut entries: Vec<(String, Chapter)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();
        while let Some(label) = map.next_key::<String>()? {
            if !seen.insert(label.clone()) {
                return Err(de::Error::custom(format!(
                    "duplicate chapter label `{label}`"
                )));
            }
            let value = map.next_value()?;
            entries.push((label, value));
        }
        Ok(Chapter::Mapping(entries))
    }
}
