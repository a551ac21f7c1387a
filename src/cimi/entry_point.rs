use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::ops::Deref;
use std::str::FromStr;

use serde_json::{Map, Value};
use snafu::prelude::*;

use crate::common::{InvalidUrlSnafu, MissingBaseUriSnafu, Result, UnknownEntryPointSnafu};
use crate::config::{CollisionPolicy, Config};

use super::resource::{into_object, parse_object, CimiResource, RESERVED_NAMES as RESOURCE_RESERVED};

const ENTRY_POINT_NAME: &str = "CloudEntryPoint";

pub const RESERVED_NAMES: &[&str] = &[
    RESOURCE_RESERVED[0],
    RESOURCE_RESERVED[1],
    RESOURCE_RESERVED[2],
    "entry_points",
];

/// The root document of a CIMI server.
///
/// Every top-level value that is an object carrying an `href` is a link to a
/// collection, indexed here by its original key.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEntryPoint {
    resource: CimiResource,
    entry_points: BTreeMap<String, String>,
}

impl CloudEntryPoint {
    pub fn new(json: Map<String, Value>) -> Self {
        Self::from_resource(
            CimiResource::build(ENTRY_POINT_NAME, json, RESERVED_NAMES).warned(ENTRY_POINT_NAME),
        )
    }

    pub fn with_policy(json: Map<String, Value>, policy: CollisionPolicy) -> Result<Self> {
        CimiResource::build(ENTRY_POINT_NAME, json, RESERVED_NAMES)
            .checked(ENTRY_POINT_NAME, policy)
            .map(Self::from_resource)
    }

    pub fn from_value(value: Value, policy: CollisionPolicy) -> Result<Self> {
        Self::with_policy(into_object(value)?, policy)
    }

    pub fn from_reader<R: Read>(reader: R, policy: CollisionPolicy) -> Result<Self> {
        Self::with_policy(parse_object(reader)?, policy)
    }

    fn from_resource(resource: CimiResource) -> Self {
        let entry_points = resource
            .json()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .get("href")
                    .and_then(Value::as_str)
                    .map(|href| (key.clone(), href.to_string()))
            })
            .collect();

        Self {
            resource,
            entry_points,
        }
    }

    pub fn resource(&self) -> &CimiResource {
        &self.resource
    }

    pub fn entry_points(&self) -> &BTreeMap<String, String> {
        &self.entry_points
    }

    pub fn entry_point(&self, name: &str) -> Option<&str> {
        self.entry_points.get(name).map(String::as_str)
    }

    pub fn base_uri(&self) -> Option<&str> {
        self.resource.get_str("base_uri")
    }

    /// Resolve the href of entry point `name` against `baseURI`.
    pub fn entry_point_url(&self, name: &str) -> Result<url::Url> {
        let href = self
            .entry_point(name)
            .context(UnknownEntryPointSnafu { name })?;
        let base_uri = self.base_uri().context(MissingBaseUriSnafu)?;

        url::Url::parse(base_uri)
            .context(InvalidUrlSnafu { url: base_uri })?
            .join(href)
            .context(InvalidUrlSnafu { url: href })
    }

    pub fn render(&self, width: usize, placeholder: &str) -> String {
        self.resource.render_as(ENTRY_POINT_NAME, width, placeholder)
    }
}

impl Deref for CloudEntryPoint {
    type Target = CimiResource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for CloudEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = Config::default();
        f.write_str(&self.render(config.display_width, &config.truncate_placeholder))
    }
}

impl FromStr for CloudEntryPoint {
    type Err = crate::common::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes(), CollisionPolicy::Warn)
    }
}

impl TryFrom<Value> for CloudEntryPoint {
    type Error = crate::common::Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value, CollisionPolicy::Warn)
    }
}
