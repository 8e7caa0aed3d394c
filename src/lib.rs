//! This crate is a Rust implementation of the
//! [JSON-LD](https://www.w3.org/TR/json-ld/)
//! data interchange format.
//!
//! [Linked Data (LD)](https://www.w3.org/standards/semanticweb/data)
//! is a [World Wide Web Consortium (W3C)](https://www.w3.org/)
//! initiative built upon standard Web technologies to create an
//! interrelated network of datasets across the Web.
//! The [JavaScript Object Notation (JSON)](https://tools.ietf.org/html/rfc7159) is
//! a widely used, simple, unstructured data serialization format to describe
//! data objects in a human readable way.
//! JSON-LD brings these two technologies together, adding semantics to JSON
//! to create a lightweight data serialization format that can organize data and
//! help Web applications to inter-operate at a large scale.
//!
//! # Usage
//!
//! The entry point for this library is the [`JsonLdProcessor`] trait
//! that provides an access to all the JSON-LD transformation algorithms
//! (context processing, expansion, compaction, flattening and framing).
//! It is implemented for [`RemoteDocument`] and bare
//! [`json_syntax::Value`] documents.
//!
//! ```
//! use json_ld_pipeline::{syntax::Parse, JsonLdProcessor, NoLoader, Options, RemoteDocument};
//!
//! let input = RemoteDocument::new(
//!   Some(iref::IriBuf::new("https://example.com/sample.jsonld".to_owned()).unwrap()),
//!   json_ld_pipeline::syntax::Value::parse_str(r#"
//!     {
//!       "@context": {"name": "http://xmlns.com/foaf/0.1/name"},
//!       "@id": "https://www.rust-lang.org",
//!       "name": "Rust Programming Language"
//!     }"#).unwrap().0
//! );
//!
//! let expanded = input.expand(&NoLoader, Options::default()).unwrap();
//! assert!(expanded.warnings.is_empty());
//! ```
//!
//! Every processing function returns its result together with the
//! [`Warning`]s emitted along the way. Errors carry a JSON-LD [`ErrorCode`].
//!
//! # Loading remote contexts
//!
//! Remote contexts are dereferenced through a [`Loader`]. This crate does not
//! perform any network access: [`NoLoader`] refuses every request,
//! [`FsLoader`] maps URLs to the local file system, and hash maps of
//! pre-loaded documents are loaders too.
pub use json_syntax as syntax;

pub mod algorithms;
pub mod blank;
mod container;
pub mod context;
mod direction;
mod error;
mod keyword;
pub mod loader;
mod mode;
pub mod processor;
pub mod util;
mod warning;

pub use algorithms::{
	CompactionOptions, ContextProcessingOptions, Embed, Environment, ExpansionOptions,
	ExpansionPolicy, FramingOptions, ProcessingEnvironment,
};
pub use blank::{Blank, Generator};
pub use container::*;
pub use context::{ActiveContext, TermDefinition};
pub use direction::*;
pub use error::*;
pub use keyword::*;
pub use loader::{
	ChainLoader, FsLoader, LoadError, Loader, NoLoader, RemoteDocument, RemoteDocumentReference,
};
pub use mode::*;
pub use processor::{JsonLdProcessor, Options, Processed};
pub use warning::*;
