// [libs/shared/telemetry/src/lib.rs]
//! =================================================================
//! APARATO: OBSERVABILITY NERVE (V1.0)
//! RESPONSABILIDAD: TRAZADO ESTRUCTURADO Y CAPTURA DE PANICOS
//! =================================================================
//!
//! Every worker binary calls `init_tracing` once at startup. Development
//! gets compact, colorized output; anything built in release mode gets flat
//! JSON lines suitable for a log aggregator. A panic hook makes sure a
//! worker thread dying mid-message still leaves a trace behind before the
//! process exits.

use std::panic;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Initializes the global tracing subscriber for `service_name`. Panics if a
/// subscriber is already installed in this process.
pub fn init_tracing(service_name: &str) {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{service_name}={default_level},sqlx=warn,lapin=warn,reqwest=warn").into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    }

    install_panic_hook(service_name);
    tracing::info!("observability online for service [{service_name}]");
}

fn install_panic_hook(service_name: &str) {
    let service = service_name.to_string();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("unknown panic payload");

        error!(target: "panic_monitor", service = %service, location = %location, "worker thread panicked: {payload}");
    }));
}
