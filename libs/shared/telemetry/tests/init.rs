// [libs/shared/telemetry/tests/init.rs]
//! Confirms subscriber installation does not panic and logging macros work
//! immediately afterwards. Kept to a single test in this file since
//! `init_tracing` installs a process-global subscriber exactly once.

use skirmish_shared_telemetry::init_tracing;

#[test]
fn init_tracing_installs_a_working_subscriber() {
    init_tracing("telemetry-init-test");
    tracing::info!("hello from the init test");
    tracing::warn!("a warning that should also not panic");
}
