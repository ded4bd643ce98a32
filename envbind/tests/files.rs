//! JSON file layers and their precedence against the environment.

use anyhow::{Result, anyhow, ensure};
use envbind::{
    EnvConfig, EnvError, FieldBinding, FlatMap, KEY_CONNECTOR, NO_FILES, Source, StructWalker,
    env_from_entries, load_files, resolve, unmarshal_map,
};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::fixtures::ConfigDir;

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Database {
    #[env(key = "HOST", default = "localhost")]
    host: String,
    #[env(key = "PORT", default = 5432)]
    port: u16,
}

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Service {
    #[env(key = "NAME", required)]
    name: String,
    #[env(key = "DEBUG")]
    debug: bool,
    #[env(key = "TIMEOUT", default = 1.5)]
    timeout: f64,
    #[env(key = "DB")]
    db: Database,
}

#[fixture]
fn dir() -> ConfigDir {
    ConfigDir::new().unwrap_or_else(|err| panic!("create fixture dir: {err}"))
}

#[rstest]
fn nested_file_objects_reach_nested_fields(dir: ConfigDir) -> Result<()> {
    let path = dir.json(
        "service.json",
        &json!({
            "NAME": "api",
            "DEBUG": true,
            "TIMEOUT": 3,
            "DB": {"HOST": "db.internal", "PORT": 6432},
        }),
    )?;
    let service = Service::load_from_map(&FlatMap::new(), &[path])?;
    ensure!(
        service
            == Service {
                name: "api".into(),
                debug: true,
                timeout: 3.0,
                db: Database {
                    host: "db.internal".into(),
                    port: 6432,
                },
            },
        "unexpected service: {service:?}"
    );
    Ok(())
}

#[rstest]
fn environment_wins_over_file(dir: ConfigDir) -> Result<()> {
    let path = dir.json("service.json", &json!({"NAME": "file", "DB": {"PORT": 1}}))?;
    let env = env_from_entries(["NAME=env", "DB_HOST=from-env"]);
    let mut service = Service::default();
    unmarshal_map(&env, &mut service, &[path])?;
    ensure!(service.name == "env", "env should win for NAME");
    ensure!(service.db.host == "from-env", "env should set DB_HOST");
    ensure!(service.db.port == 1, "file should set DB_PORT");
    Ok(())
}

#[rstest]
fn later_files_overwrite_earlier_files(dir: ConfigDir) -> Result<()> {
    let base = dir.json("base.json", &json!({"NAME": "base", "DEBUG": true, "DB": {"PORT": 1}}))?;
    let local = dir.json("local.json", &json!({"NAME": "local", "DB": {"PORT": 2}}))?;
    let service = Service::load_from_map(&env_from_entries(["UNRELATED=1"]), &[base, local])?;
    ensure!(service.name == "local", "later file should win");
    ensure!(service.debug, "keys only in the earlier file survive");
    ensure!(service.db.port == 2, "nested keys merge by full key");
    Ok(())
}

#[rstest]
fn arrays_and_nulls_in_files_are_ignored(dir: ConfigDir) -> Result<()> {
    let path = dir.json(
        "service.json",
        &json!({"NAME": "api", "DB": {"HOST": null, "PORT": [1, 2]}}),
    )?;
    let merged = load_files(&[&path], KEY_CONNECTOR)?;
    ensure!(!merged.contains_key("DB_PORT"), "array should be dropped");
    ensure!(!merged.contains_key("DB_HOST"), "null should be dropped");
    let service = Service::load_from_map(&env_from_entries(["X=1"]), &[path])?;
    ensure!(service.db.host == "localhost", "default host expected");
    ensure!(service.db.port == 5432, "default port expected");
    Ok(())
}

#[rstest]
fn file_value_is_recorded_as_file_source(dir: ConfigDir) -> Result<()> {
    let path = dir.json("service.json", &json!({"NAME": "api", "DEBUG": false}))?;
    let file = load_files(&[path], KEY_CONNECTOR)?;
    let env = env_from_entries(["DB_HOST=h"]);
    let mut service = Service::default();
    let mut bindings = StructWalker::walk(&mut service, KEY_CONNECTOR);
    resolve(&mut bindings, &env, &file)?;
    let source_of = |key: &str| bindings.get(key).map(FieldBinding::source);
    ensure!(source_of("NAME") == Some(Source::File), "NAME from file");
    ensure!(source_of("DEBUG") == Some(Source::File), "DEBUG from file");
    ensure!(source_of("DB_HOST") == Some(Source::Env), "DB_HOST from env");
    ensure!(source_of("DB_PORT") == Some(Source::Default), "DB_PORT from default");
    ensure!(source_of("TIMEOUT") == Some(Source::Default), "TIMEOUT from default");
    Ok(())
}

#[rstest]
fn file_type_mismatch_reports_file_origin(dir: ConfigDir) -> Result<()> {
    let path = dir.json("service.json", &json!({"NAME": "api", "DB": {"PORT": "many"}}))?;
    let mut service = Service::default();
    let err = unmarshal_map(&env_from_entries(["A=b"]), &mut service, &[path])
        .err()
        .ok_or_else(|| anyhow!("expected coercion error"))?;
    ensure!(
        matches!(&err, EnvError::Coerce { key, origin: Source::File, .. } if key == "DB_PORT"),
        "unexpected error: {err:?}"
    );
    ensure!(err.to_string().contains("from config file"), "unexpected message: {err}");
    Ok(())
}

#[rstest]
#[case::missing("absent.json", None)]
#[case::malformed("bad.json", Some("{\"NAME\": "))]
#[case::not_an_object("list.json", Some("[\"NAME\"]"))]
fn unreadable_files_fail_before_any_assignment(
    dir: ConfigDir,
    #[case] name: &str,
    #[case] contents: Option<&str>,
) -> Result<()> {
    let path = match contents {
        Some(text) => dir.file(name, text)?,
        None => dir.missing(name),
    };
    let mut service = Service::default();
    let err = unmarshal_map(&env_from_entries(["NAME=env"]), &mut service, &[&path])
        .err()
        .ok_or_else(|| anyhow!("expected file error"))?;
    ensure!(
        matches!(&err, EnvError::File { path: p, .. } if *p == path),
        "unexpected error: {err:?}"
    );
    ensure!(service == Service::default(), "target must be untouched");
    Ok(())
}

#[test]
fn no_files_reads_environment_only() -> Result<()> {
    let service = Service::load_from_map(&env_from_entries(["NAME=solo"]), NO_FILES)?;
    ensure!(service.name == "solo", "unexpected name");
    ensure!(!service.debug, "debug untouched");
    ensure!((service.timeout - 1.5).abs() < f64::EPSILON, "default timeout");
    Ok(())
}
