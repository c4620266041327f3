//! # jsonbind-core
//!
//! Lenient JSON codec with descriptor-driven record binding.
//!
//! The codec converts between JSON text and in-memory values without a
//! schema: primitives, strings, enums, sequences, string-keyed maps,
//! dynamic [`Value`] trees, and structured records whose member table is
//! registered once per type and cached per thread. Object and array
//! bodies are decomposed by a depth-aware splitter instead of a full
//! tokenizer: each nesting level is split once into top-level fragments,
//! and each fragment is parsed independently.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonbind_core::{from_str, to_string, JsonRecord, RecordBuilder};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct School {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! impl JsonRecord for School {
//!     fn describe(b: &mut RecordBuilder<Self>) {
//!         b.field("Id", |s| &s.id, |s, v| s.id = v);
//!         b.field("Name", |s| &s.name, |s, v| s.name = v);
//!     }
//! }
//! jsonbind_core::bindable!(School);
//!
//! let school: School = from_str(r#"{ "Id": 72, "Name": "Alien School" }"#)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(school.id, 72);
//! assert_eq!(to_string(&school), r#"{"Id":72,"Name":"Alien School"}"#);
//! ```
//!
//! ## Leniency
//!
//! Malformed structure degrades to `None` or default values rather than
//! erroring; only integer and boolean conversion failures are fatal. The
//! literal `null` and unusable input are indistinguishable by design, and
//! unknown record keys are skipped silently.
//!
//! ## Modules
//!
//! - [`scanner`] -- whitespace compaction + depth-aware splitting
//! - [`decoder`] -- JSON text to typed values ([`FromJson`])
//! - [`encoder`] -- typed values to JSON text ([`ToJson`])
//! - [`bind`] -- record descriptors, annotations, per-thread cache
//! - [`types`] -- the dynamic [`Value`] tree
//! - [`error`] -- error types for fatal conversions

pub mod bind;
pub mod decoder;
pub mod encoder;
pub mod error;
mod escape;
pub mod scanner;
pub mod types;

pub use bind::{descriptor_of, Descriptor, JsonEnum, JsonRecord, Member, RecordBuilder};
pub use decoder::{from_str, FromJson};
pub use encoder::{to_string, JsonKey, ToJson};
pub use error::{BindError, Result};
pub use types::Value;
