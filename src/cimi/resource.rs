use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use snafu::prelude::*;

use crate::common::{
    camel_to_snake, truncate_middle, AttributeCollisionSnafu, JsonSnafu, NotAnObjectSnafu, Result,
};
use crate::config::{CollisionPolicy, Config};

pub(super) const RESOURCE_NAME: &str = "CimiResource";

/// Names owned by the resource itself. A JSON key converting to one of these
/// is dropped.
pub const RESERVED_NAMES: &[&str] = &["json", "attribute_names", "operations_by_name"];

const OPERATIONS_KEY: &str = "operations";
const REL_KEY: &str = "rel";
const HREF_KEY: &str = "href";

/// A JSON key that was dropped because its converted name was already taken.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Collision {
    pub key: String,
    pub name: String,
}

/// A CIMI resource with its keys converted to snake_case attribute names.
///
/// Values are kept exactly as received; nested objects are not wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct CimiResource {
    json: Map<String, Value>,
    attributes: Map<String, Value>,
    operations_by_name: BTreeMap<String, Value>,
    collisions: Vec<Collision>,
}

pub(super) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(super) fn parse_object<R: Read>(reader: R) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_reader(reader).context(JsonSnafu {
        message: "Failed to parse resource",
    })?;
    into_object(value)
}

pub(super) fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => NotAnObjectSnafu {
            found: json_kind(&other),
        }
        .fail(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl CimiResource {
    /// Wrap `json`, dropping and logging any colliding keys.
    pub fn new(json: Map<String, Value>) -> Self {
        Self::build(RESOURCE_NAME, json, RESERVED_NAMES).warned(RESOURCE_NAME)
    }

    pub fn with_policy(json: Map<String, Value>, policy: CollisionPolicy) -> Result<Self> {
        Self::build(RESOURCE_NAME, json, RESERVED_NAMES).checked(RESOURCE_NAME, policy)
    }

    pub fn from_value(value: Value, policy: CollisionPolicy) -> Result<Self> {
        Self::with_policy(into_object(value)?, policy)
    }

    pub fn from_reader<R: Read>(reader: R, policy: CollisionPolicy) -> Result<Self> {
        Self::with_policy(parse_object(reader)?, policy)
    }

    pub(super) fn build(
        type_name: &'static str,
        json: Map<String, Value>,
        reserved: &[&str],
    ) -> Self {
        let mut attributes = Map::with_capacity(json.len());
        let mut collisions = Vec::new();

        for (key, value) in json.iter() {
            let name = camel_to_snake(key);
            if reserved.contains(&name.as_str()) || attributes.contains_key(&name) {
                collisions.push(Collision {
                    key: key.clone(),
                    name,
                });
            } else {
                attributes.insert(name, value.clone());
            }
        }

        let operations_by_name: BTreeMap<String, Value> = json
            .get(OPERATIONS_KEY)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|op| {
                op.get(REL_KEY)
                    .and_then(Value::as_str)
                    .map(|rel| (rel.to_string(), op.clone()))
            })
            .collect();

        tracing::debug!(
            resource = type_name,
            attributes = attributes.len(),
            operations = operations_by_name.len(),
            collisions = collisions.len(),
            "Wrapped resource"
        );

        Self {
            json,
            attributes,
            operations_by_name,
            collisions,
        }
    }

    pub(super) fn warned(self, type_name: &str) -> Self {
        for collision in self.collisions.iter() {
            tracing::warn!(
                resource = type_name,
                key = collision.key,
                name = collision.name,
                "Cannot set attribute because it is already set"
            );
        }
        self
    }

    pub(super) fn checked(self, type_name: &str, policy: CollisionPolicy) -> Result<Self> {
        if policy == CollisionPolicy::Error {
            if let Some(collision) = self.collisions.first() {
                return AttributeCollisionSnafu {
                    key: &collision.key,
                    name: &collision.name,
                }
                .fail();
            }
        }
        Ok(self.warned(type_name))
    }

    /// The raw mapping this resource was built from.
    pub fn json(&self) -> &Map<String, Value> {
        &self.json
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Converted attribute names, in the order their keys were received.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn operations_by_name(&self) -> &BTreeMap<String, Value> {
        &self.operations_by_name
    }

    pub fn operation(&self, rel: &str) -> Option<&Value> {
        self.operations_by_name.get(rel)
    }

    pub fn operation_href(&self, rel: &str) -> Option<&str> {
        self.operation(rel)
            .and_then(|op| op.get(HREF_KEY))
            .and_then(Value::as_str)
    }

    /// Keys dropped during construction.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn resource_uri(&self) -> Option<&str> {
        self.get_str("resource_uri")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    pub fn created(&self) -> Option<&str> {
        self.get_str("created")
    }

    pub fn updated(&self) -> Option<&str> {
        self.get_str("updated")
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.get("properties").and_then(Value::as_object)
    }

    /// Decode the converted attributes into a typed record.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.attributes.clone())).context(JsonSnafu {
            message: "Failed to decode record from resource attributes",
        })
    }

    pub fn render(&self, width: usize, placeholder: &str) -> String {
        self.render_as(RESOURCE_NAME, width, placeholder)
    }

    pub(super) fn render_as(&self, type_name: &str, width: usize, placeholder: &str) -> String {
        let mut present: Vec<(&String, &Value)> = self
            .attributes
            .iter()
            .filter(|(_, value)| !value.is_null())
            .collect();
        present.sort_by(|a, b| a.0.cmp(b.0));

        let lines: Vec<String> = present
            .into_iter()
            .map(|(name, value)| {
                format!(
                    "{name}: {}",
                    truncate_middle(width, &display_value(value), placeholder)
                )
            })
            .collect();

        format!("{type_name}:\n{}", lines.join("\n"))
    }
}

impl fmt::Display for CimiResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = Config::default();
        f.write_str(&self.render(config.display_width, &config.truncate_placeholder))
    }
}

impl FromStr for CimiResource {
    type Err = crate::common::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes(), CollisionPolicy::Warn)
    }
}

impl TryFrom<Value> for CimiResource {
    type Error = crate::common::Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value, CollisionPolicy::Warn)
    }
}
