//! # InsightX Core
//!
//! Core library for the InsightX knowledge base.
//!
//! This crate provides the shared data model and the seams between the
//! profiling, retrieval and storage crates:
//!
//! - [`DatasetProfile`] / [`ColumnProfile`] - Immutable summary of a tabular source
//! - [`FragmentRecord`] / [`ScoredFragment`] - Embedded text and its per-query score
//! - [`Vector`] and [`cosine`] - Embedding vectors and epsilon-guarded cosine similarity
//! - [`ProfileStore`] / [`FragmentStore`] - Persistence contracts
//! - [`Embedder`] - Opaque text-to-vector provider
//!
//! ## Example
//!
//! ```rust
//! use insightx_core::{FragmentRecord, Vector};
//!
//! let fragment = FragmentRecord::new("quarterly revenue grew 12%", Vector::new(vec![0.1, 0.9]));
//! let query = Vector::new(vec![0.1, 0.8]);
//! let score = query.cosine_similarity(&fragment.embedding);
//! assert!(score > 0.99);
//! ```

pub mod error;
pub mod vector;
pub mod profile;
pub mod fragment;
pub mod store;
pub mod embedder;
pub mod chunk;

pub use error::{Error, Result};
pub use vector::{cosine, Vector, COSINE_EPSILON};
pub use profile::{ColumnProfile, ColumnType, DatasetProfile, TaskKind};
pub use fragment::{FragmentRecord, ScoredFragment};
pub use store::{FragmentStore, ProfileStore};
pub use embedder::Embedder;
pub use chunk::{chunk_text, DEFAULT_CHUNK_CHARS};
