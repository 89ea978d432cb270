//! Domain logic: turn a cursor position + diagnostics into applicable fixes and their edits.
//!
//! This crate owns *which* fixes apply and *what* they change. It never parses and never
//! computes diagnostics; both come from the analysis service behind [`ports`].

mod fixes;
mod locator;
mod policy;
mod ports;
mod resolver;

pub use fixes::{builtin_fix_metas, builtin_fixes, CodeFix, FixMeta, FixOptions};
pub use locator::{locate, probe_range};
pub use policy::ResolverPolicy;
pub use ports::{AnalysisService, LogSink, Program, Symbol, TracingLogSink};
pub use resolver::{Resolution, Resolver};
