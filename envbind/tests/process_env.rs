//! Binding from the live process environment.
//!
//! These tests mutate process-wide state, so each one is serialised.

use anyhow::{Result, anyhow, ensure};
use envbind::{EnvConfig, EnvError, NO_FILES, read_env, unmarshal, unmarshal_file};
use serial_test::serial;
use test_helpers::env;
use test_helpers::figment::{jail_file, with_jail};

#[derive(Debug, Default, PartialEq, EnvConfig)]
struct Worker {
    #[env(key = "ENVBIND_IT_QUEUE", required)]
    queue: String,
    #[env(key = "ENVBIND_IT_THREADS", default = 4)]
    threads: usize,
    #[env(key = "ENVBIND_IT_VERBOSE")]
    verbose: bool,
}

#[test]
#[serial]
fn unmarshal_reads_process_environment() -> Result<()> {
    let _scope = env::scope([
        ("ENVBIND_IT_QUEUE", Some("jobs")),
        ("ENVBIND_IT_THREADS", Some("16")),
        ("ENVBIND_IT_VERBOSE", None),
    ]);
    let mut worker = Worker::default();
    unmarshal(&mut worker, NO_FILES)?;
    ensure!(
        worker
            == Worker {
                queue: "jobs".into(),
                threads: 16,
                verbose: false,
            },
        "unexpected worker: {worker:?}"
    );
    Ok(())
}

#[test]
#[serial]
fn load_reports_missing_required_variable() -> Result<()> {
    let _scope = env::scope([("ENVBIND_IT_QUEUE", None::<&str>)]);
    let err = Worker::load(NO_FILES)
        .err()
        .ok_or_else(|| anyhow!("queue is required"))?;
    ensure!(
        err.missing_keys() == ["ENVBIND_IT_QUEUE"],
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[test]
#[serial]
fn empty_variable_counts_as_set() -> Result<()> {
    let _scope = env::scope([("ENVBIND_IT_QUEUE", Some(""))]);
    let worker = Worker::load(NO_FILES)?;
    ensure!(worker.queue.is_empty(), "empty value should satisfy the field");
    Ok(())
}

#[test]
#[serial]
fn read_env_snapshot_contains_guarded_values() {
    let _guard = env::set_var("ENVBIND_IT_SNAPSHOT", "present");
    let snapshot = read_env();
    assert_eq!(
        snapshot.get("ENVBIND_IT_SNAPSHOT").map(String::as_str),
        Some("present")
    );
}

#[test]
#[serial]
fn unmarshal_file_layers_file_under_jailed_environment() -> Result<()> {
    let worker = with_jail(|jail| {
        jail.set_env("ENVBIND_IT_VERBOSE", "true");
        let path = jail_file(
            jail,
            "worker.json",
            r#"{"ENVBIND_IT_QUEUE": "from-file", "ENVBIND_IT_VERBOSE": false}"#,
        )?;
        let mut worker = Worker::default();
        unmarshal_file(&path, &mut worker).map_err(|err| figment::Error::from(err.to_string()))?;
        Ok(worker)
    })?;
    ensure!(worker.queue == "from-file", "file should supply the queue");
    ensure!(worker.verbose, "environment should beat the file");
    ensure!(worker.threads == 4, "default threads expected");
    Ok(())
}

#[test]
#[serial]
fn relative_file_paths_resolve_against_working_directory() -> Result<()> {
    let queue = with_jail(|jail| {
        jail.create_file("relative.json", r#"{"ENVBIND_IT_QUEUE": "relative"}"#)?;
        let worker = Worker::load(&["relative.json"])
            .map_err(|err| figment::Error::from(err.to_string()))?;
        Ok(worker.queue)
    })?;
    ensure!(queue == "relative", "unexpected queue {queue}");
    Ok(())
}

#[test]
#[serial]
fn missing_file_surfaces_as_file_error() -> Result<()> {
    let err = with_jail(|jail| {
        jail.set_env("ENVBIND_IT_QUEUE", "q");
        let mut worker = Worker::default();
        Ok(unmarshal_file("does-not-exist.json", &mut worker).err())
    })?
    .ok_or_else(|| anyhow!("missing file should fail"))?;
    ensure!(matches!(err, EnvError::File { .. }), "unexpected error: {err:?}");
    Ok(())
}
