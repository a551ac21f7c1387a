use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Cannot set attribute \"{name}\" from key \"{key}\" because it is already set"))]
    AttributeCollision { key: String, name: String },
    #[snafu(display("Expected a JSON object, found {found}"))]
    NotAnObject { found: String },
    #[snafu(display("{message}: {source}"))]
    Json {
        message: String,
        source: serde_json::Error,
    },
    #[snafu(display("Resource has no baseURI to resolve entry points against"))]
    MissingBaseUri,
    #[snafu(display("No entry point named \"{name}\""))]
    UnknownEntryPoint { name: String },
    #[snafu(display("Failed to resolve {url}: {source}"))]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[snafu(display("{message}: {source}"))]
    Config {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[snafu(display("Failed to read {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
