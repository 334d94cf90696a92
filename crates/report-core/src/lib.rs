//! Analysis report assembly
//!
//! This crate turns the loosely-structured result payload of the analysis
//! engine into a normalized, sectioned report ready for display. It includes:
//!
//! - Decision normalization (translated action, percentage metrics with
//!   deltas, currency-aware target price)
//! - Instrument classification for currency selection
//! - A fixed registry of report modules defining section order
//! - Section dispatch by runtime content shape, including the research and
//!   risk debate transcripts
//! - Report assembly with configuration info, demo banner and disclaimer
//!
//! # Example
//!
//! ```rust,ignore
//! use report_core::{ReportAssembler, ReportConfig, parse_payload};
//!
//! fn main() -> report_core::Result<()> {
//!     let result = parse_payload(r#"{"stock_symbol": "600519", "decision": {"action": "BUY"}}"#)?;
//!
//!     let report = ReportAssembler::new(ReportConfig::default()).assemble(&result);
//!     for section in &report.sections {
//!         println!("{} {}", section.icon, section.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod content;
pub mod debate;
pub mod decision;
pub mod error;
pub mod formatter;
pub mod labels;
pub mod model;
pub mod observer;
pub mod registry;
pub mod report;
pub mod section;

// Re-export main types for convenience
pub use config::ReportConfig;
pub use decision::DecisionSummary;
pub use error::{ReportError, Result};
pub use formatter::{FormatterFactory, OutputFormat, ReportFormatter};
pub use model::{AnalysisResult, AnalysisState, Decision, parse_payload};
pub use observer::{AssemblyEvent, AssemblyObserver, NoopObserver, TracingObserver};
pub use registry::{ModuleDescriptor, modules};
pub use report::{Report, ReportAssembler};
pub use section::{Section, SectionBody};
