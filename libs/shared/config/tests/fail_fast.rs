// [libs/shared/config/tests/fail_fast.rs]
//! Unrecognized scheduling options must fail the service at startup, not
//! get silently ignored (spec §6).

use skirmish_shared_config::load_service_schedule;
use std::io::Write;

fn write_temp_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn unrecognized_key_is_rejected() {
    let file = write_temp_toml("sample_size = 8\ntotally_made_up_option = true\n");
    let result = load_service_schedule(file.path().to_str().unwrap());
    assert!(result.is_err());
}

#[test]
fn recognized_keys_load_cleanly() {
    let file = write_temp_toml("sample_size = 8\nadaptive_sampling = false\n");
    let cfg = load_service_schedule(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.sample_size, 8);
    assert!(!cfg.adaptive_sampling);
    // Unset fields still take the struct-level defaults.
    assert_eq!(cfg.batch_size, 100);
}

#[test]
fn missing_file_is_an_error_not_a_panic() {
    let result = load_service_schedule("/nonexistent/path/schedule.toml");
    assert!(result.is_err());
}
