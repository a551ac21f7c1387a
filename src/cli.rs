use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, Command};
use snafu::ResultExt;
use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::exit;

use slipstream_api::common::{Error, IoSnafu, Result};
use slipstream_api::{CimiResource, CloudEntryPoint, CollisionPolicy, Config};

const STDIN_PATH: &str = "-";

fn journal_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug | log::Level::Trace => 7,
    }
}

fn setup_logger() {
    let mut builder = match env::var("RUST_LOG_STYLE").as_deref() {
        Ok("SYSTEMD") => {
            let mut b = env_logger::Builder::new();
            b.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    journal_priority(record.level()),
                    record.target(),
                    record.args()
                )
            });
            b
        }
        _ => pretty_env_logger::formatted_builder(),
    };

    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}

fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == STDIN_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).context(IoSnafu { path })?;
    Ok(Box::new(io::BufReader::new(file)))
}

fn entry_point_target(cep: &CloudEntryPoint, name: &str, href: &str) -> String {
    match cep.entry_point_url(name) {
        Ok(url) => url.to_string(),
        // Relative hrefs are expected without a baseURI
        Err(Error::MissingBaseUri) => href.to_string(),
        Err(err) => {
            tracing::warn!(entry_point = name, href, "{err}");
            href.to_string()
        }
    }
}

fn inspect<R: Read>(input: R, entry_point: bool, config: &Config) -> Result<String> {
    let width = config.display_width;
    let placeholder = &config.truncate_placeholder;

    if !entry_point {
        let resource = CimiResource::from_reader(input, config.collision_policy)?;
        return Ok(resource.render(width, placeholder));
    }

    let cep = CloudEntryPoint::from_reader(input, config.collision_policy)?;
    let mut out = cep.render(width, placeholder);
    out.push_str("\nentry points:");
    for (name, href) in cep.entry_points() {
        let target = entry_point_target(&cep, name, href);
        out.push_str(&format!("\n  {name}: {target}"));
    }
    Ok(out)
}

pub(crate) fn main() {
    let cli = Command::new("SlipStream API")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Reads a CIMI resource as JSON and prints its attributes.",
            "Defaults are read from SLIPSTREAM_* environment variables.",
        ))
        .arg(
            Arg::new("input")
                .default_value(STDIN_PATH)
                .help("JSON file to read, or - for stdin"),
        )
        .arg(
            Arg::new("entry-point")
                .action(ArgAction::SetTrue)
                .short('e')
                .long("entry-point")
                .help("Treat the input as a cloud entry point"),
        )
        .arg(
            Arg::new("strict")
                .action(ArgAction::SetTrue)
                .long("strict")
                .help("Fail on attribute name collisions instead of dropping them"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(clap::value_parser!(usize))
                .help("Truncate displayed values to this many characters (0 disables)"),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let mut config = match Config::populate_from_env() {
        Ok(c) => c,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    };
    if args.get_flag("strict") {
        config.collision_policy = CollisionPolicy::Error;
    }
    if let Some(width) = args.get_one::<usize>("width") {
        config.display_width = *width;
    }

    let path = args
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or(STDIN_PATH);

    let entry_point = args.get_flag("entry-point");
    match open_input(path).and_then(|input| inspect(input, entry_point, &config)) {
        Ok(out) => println!("{out}"),
        Err(err) => {
            tracing::error!(input = path, "{err}");
            exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(body: &str, entry_point: bool) -> Result<String> {
        inspect(body.as_bytes(), entry_point, &Config::default())
    }

    #[test]
    fn renders_resource() {
        let out = run(r#"{"id": "module/web", "resourceURI": "Module"}"#, false).unwrap();
        assert_eq!(out, "CimiResource:\nid: module/web\nresource_uri: Module");
    }

    #[test]
    fn lists_resolved_entry_points() {
        let body = r#"{
            "baseURI": "https://nuv.la/api/",
            "modules": {"href": "module"},
            "users": {"href": "user"}
        }"#;
        let out = run(body, true).unwrap();
        assert!(out.starts_with("CloudEntryPoint:\nbase_uri: https://nuv.la/api/\n"));
        assert!(out.ends_with(
            "entry points:\n  modules: https://nuv.la/api/module\n  users: https://nuv.la/api/user"
        ));
    }

    #[test]
    fn keeps_raw_href_without_base_uri() {
        let out = run(r#"{"modules": {"href": "module"}}"#, true).unwrap();
        assert!(out.ends_with("entry points:\n  modules: module"));
    }

    #[test]
    fn falls_back_on_invalid_base_uri() {
        let body = r#"{"baseURI": "not a url", "modules": {"href": "module"}}"#;
        let cep: CloudEntryPoint = body.parse().unwrap();
        assert!(matches!(
            cep.entry_point_url("modules"),
            Err(Error::InvalidUrl { .. })
        ));
        assert_eq!(entry_point_target(&cep, "modules", "module"), "module");

        let out = run(body, true).unwrap();
        assert!(out.ends_with("entry points:\n  modules: module"));
    }

    #[test]
    fn strict_policy_fails_inspection() {
        let config = Config {
            collision_policy: CollisionPolicy::Error,
            ..Config::default()
        };
        let result = inspect(r#"{"json": 1}"#.as_bytes(), false, &config);
        assert!(matches!(result, Err(Error::AttributeCollision { .. })));
    }

    #[test]
    fn maps_levels_to_journal_priorities() {
        assert_eq!(journal_priority(log::Level::Error), 3);
        assert_eq!(journal_priority(log::Level::Warn), 4);
        assert_eq!(journal_priority(log::Level::Info), 6);
        assert_eq!(journal_priority(log::Level::Trace), 7);
    }

    #[test]
    fn rejects_missing_files() {
        assert!(matches!(
            open_input("/nonexistent/slipstream/resource.json"),
            Err(Error::Io { .. })
        ));
    }
}
