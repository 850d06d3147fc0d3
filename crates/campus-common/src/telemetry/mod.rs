//! Telemetry: `tracing` subscriber installation
//!
//! Level and format come from [`TracingConfig`]; `RUST_LOG` overrides the level.

mod subscriber;

pub use subscriber::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
