//! Launch script document, read with the shape each key expects
//!
//! Scalars are read through the string path of the YAML deserializer so a
//! value such as `3.10` or `0x1F` keeps the text it was written with.

use log::trace;
use serde::Deserialize;
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use std::collections::BTreeMap;
use std::fmt;

/// Keys a launch script may set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Image,
    Command,
    Entrypoint,
    WorkingDir,
    Environment,
    Volumes,
    User,
    Interactive,
    Privileged,
    NetworkMode,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "image" => Some(Field::Image),
            "command" => Some(Field::Command),
            "entrypoint" => Some(Field::Entrypoint),
            "workdir" | "working_dir" => Some(Field::WorkingDir),
            "env" | "environment" => Some(Field::Environment),
            "volume" | "volumes" => Some(Field::Volumes),
            "user" => Some(Field::User),
            "interactive" => Some(Field::Interactive),
            "privileged" => Some(Field::Privileged),
            "network_mode" => Some(Field::NetworkMode),
            _ => None,
        }
    }

    fn shape(self) -> Shape {
        match self {
            Field::Command | Field::Entrypoint | Field::Volumes => Shape::List,
            Field::Environment => Shape::Environment,
            _ => Shape::Scalar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Scalar,
    List,
    Environment,
}

/// Value of a recognised key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar exactly as written
    Scalar(String),
    /// Scalar items of a sequence; empty when the value was not a sequence
    List(Vec<String>),
}

impl Value {
    pub fn into_scalar(self) -> Option<String> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    pub fn into_list(self) -> Vec<String> {
        match self {
            Value::List(items) => items,
            Value::Scalar(_) => Vec::new(),
        }
    }

    /// `true` only for the exact text `true`
    pub fn flag(&self) -> bool {
        matches!(self, Value::Scalar(s) if s == "true")
    }
}

/// Recognised top-level entries in document order; other keys are skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub entries: Vec<(Field, Value)>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of launch settings")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(Key(key)) = map.next_key::<Key>()? {
            let Some(field) = key.as_deref().and_then(Field::from_key) else {
                trace!("Ignoring script key {:?}", key);
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let value = match field.shape() {
                Shape::Scalar => Value::Scalar(map.next_value::<String>()?),
                shape => Value::List(map.next_value_seed(ListSeed(shape))?),
            };
            entries.push((field, value));
        }
        Ok(Document { entries })
    }
}

/// Top-level key; `None` for anything that is not text
struct Key(Option<String>);

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor).map(Key)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        skip_seq(seq).map(|()| None)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        skip_map(map).map(|()| None)
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        skip_enum(data).map(|()| None)
    }
}

/// Reads a list-shaped value; a value of any other shape becomes an empty list
struct ListSeed(Shape);

impl<'de> DeserializeSeed<'de> for ListSeed {
    type Value = Vec<String>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(ListVisitor(self.0))
    }
}

struct ListVisitor(Shape);

impl<'de> Visitor<'de> for ListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of scalars")
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(items)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        if self.0 != Shape::Environment {
            return skip_map(map).map(|()| Vec::new());
        }
        // sorted so the mapping form yields a stable order
        let mut vars = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, String>()? {
            vars.insert(key, value);
        }
        Ok(vars.into_iter().map(|(k, v)| format!("{k}={v}")).collect())
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        skip_enum(data).map(|()| Vec::new())
    }
}

fn skip_seq<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

fn skip_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

// tagged values arrive as enums
fn skip_enum<'de, A: EnumAccess<'de>>(data: A) -> Result<(), A::Error> {
    let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
    variant.newtype_variant::<IgnoredAny>()?;
    Ok(())
}
