use quillpost::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward.
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    // Production must refuse to start without an explicit database location.
    let result = run_with_env(
        || {
            panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("DATABASE_URL");
                }
                AppConfig::load()
            })
        },
        vec!["APP_ENV", "DATABASE_URL"],
    );

    assert!(
        result.is_err(),
        "Production config loading should panic without DATABASE_URL"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    // Local mode should not panic and should fall back to the local defaults.
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::remove_var("DATABASE_URL");
                env::remove_var("BIND_ADDR");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "DATABASE_URL", "BIND_ADDR"],
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.db_url, "sqlite:posts.db");
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_app_config_honors_overrides() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("DATABASE_URL", "sqlite:/var/lib/quillpost/posts.db");
                env::set_var("BIND_ADDR", "127.0.0.1:8080");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "DATABASE_URL", "BIND_ADDR"],
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.db_url, "sqlite:/var/lib/quillpost/posts.db");
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
}
