//! # InsightX Profile
//!
//! Tabular data profiler.
//!
//! ## Overview
//!
//! Given a parsed CSV table, the profiler infers a semantic type for every
//! column, computes descriptive statistics, guesses the target column and
//! the machine-learning task it implies, and stores one immutable
//! [`DatasetProfile`](insightx_core::DatasetProfile) per source.
//!
//! **How it works:**
//! 1. The table is transposed into columns (cells trimmed, empty → missing)
//! 2. Each column's type is voted from a bounded sample of its values
//! 3. Statistics are computed over the whole column for that type
//! 4. The target is picked by header-name hints, else the last column
//! 5. The profile is upserted keyed by source id
//!
//! ## Example
//!
//! ```rust
//! use insightx_profile::{DatasetProfiler, RawTable};
//! use insightx_core::TaskKind;
//!
//! let table = RawTable::from_csv_str("id,age,label\n1,34,yes\n2,29,no\n").unwrap();
//! let profile = DatasetProfiler::default().profile("survey.csv", &table).unwrap();
//!
//! assert_eq!(profile.target.as_deref(), Some("label"));
//! assert_eq!(profile.inferred_task, TaskKind::Classification);
//! ```
//!
//! ## Type voting
//!
//! ```text
//! value ──> number? ──yes──> numeric
//!             │no
//!             └──> date/time? ──yes──> datetime
//!                     │no
//!                     └──> len <= 30? ──yes──> categorical
//!                             │no
//!                             └──> text
//! ```

pub mod config;
pub mod table;
pub mod infer;
pub mod stats;
pub mod task;
pub mod profiler;

pub use config::ProfilerConfig;
pub use table::{ColumnValues, RawTable};
pub use infer::{classify_value, infer_type, is_datetime, parse_number, TypeTally};
pub use stats::{column_profile, quantile_sorted, summarize, NumericSummary};
pub use task::{infer_task, select_target};
pub use profiler::DatasetProfiler;
