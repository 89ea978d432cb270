//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.

use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-driven subscriber once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
