use std::time::Instant;
use tracing::{debug, trace, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install a fmt subscriber. `RUST_LOG` wins over the crate default.
    /// Safe to call more than once; later calls are no-ops.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("soku_style=debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }

    pub fn transform_start(file: &str, module: &str) {
        debug!("🎨 Transforming {} to {} module", file, module);
    }

    pub fn scoping_css(file: &str, scope_id: &str) {
        debug!("🔒 Scoping {} with {}", file, scope_id);
    }

    pub fn resolved_import(url: &str, var_name: &str) {
        debug!("📦 @import {} bound to {}", url, var_name);
    }

    pub fn skipped_import(url: &str, reason: &str) {
        trace!("⏭️  Leaving @import {} untouched ({})", url, reason);
    }

    pub fn optimizing_css(file: &str) {
        debug!("⚡ Optimizing CSS: {}", file);
    }

    pub fn optimize_failed(file: &str, count: usize) {
        warn!("⚠️  Optimizer reported {} error(s) for {}, skipping codegen", count, file);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
