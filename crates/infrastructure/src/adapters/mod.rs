//! Infrastructure adapters

mod system_clock;
mod tracing_notifier;

pub use system_clock::SystemClock;
pub use tracing_notifier::TracingNotifier;
