//! Remote document loading.
use iref::{Iri, IriBuf};
use mown::Mown;

pub mod chain;
pub mod fs;
pub mod map;
pub mod none;

pub use chain::ChainLoader;
pub use fs::FsLoader;
pub use map::EntryNotFound;
pub use none::NoLoader;

/// Remote document.
///
/// Either the input document of a processing function, or a remote context
/// returned by a [`Loader`].
#[derive(Debug, Clone)]
pub struct RemoteDocument {
	/// The final URL of the loaded document, after eventual redirection.
	///
	/// Used as base URL when processing the document.
	pub url: Option<IriBuf>,

	/// The retrieved document.
	pub document: json_syntax::Value,
}

impl RemoteDocument {
	/// Creates a new remote document.
	pub fn new(url: Option<IriBuf>, document: json_syntax::Value) -> Self {
		Self { url, document }
	}

	/// Returns the URL of the document, if any.
	pub fn url(&self) -> Option<&Iri> {
		self.url.as_deref()
	}

	pub fn document(&self) -> &json_syntax::Value {
		&self.document
	}

	pub fn into_document(self) -> json_syntax::Value {
		self.document
	}
}

impl From<json_syntax::Value> for RemoteDocument {
	fn from(document: json_syntax::Value) -> Self {
		Self::new(None, document)
	}
}

/// Remote document, or a reference to it.
#[derive(Debug, Clone)]
pub enum RemoteDocumentReference {
	/// IRI to the remote document.
	Iri(IriBuf),

	/// Remote document content.
	Loaded(RemoteDocument),
}

impl RemoteDocumentReference {
	/// Loads the remote document with the given `loader`.
	///
	/// For [`Self::Iri`] returns an owned [`RemoteDocument`].
	/// For [`Self::Loaded`] returns a reference to the inner [`RemoteDocument`].
	pub fn loaded_with(&self, loader: &impl Loader) -> Result<Mown<'_, RemoteDocument>, LoadError> {
		match self {
			Self::Iri(iri) => {
				log::debug!("loading document `{iri}`");
				Ok(Mown::Owned(loader.load(iri)?))
			}
			Self::Loaded(document) => Ok(Mown::Borrowed(document)),
		}
	}
}

impl From<IriBuf> for RemoteDocumentReference {
	fn from(iri: IriBuf) -> Self {
		Self::Iri(iri)
	}
}

impl From<RemoteDocument> for RemoteDocumentReference {
	fn from(document: RemoteDocument) -> Self {
		Self::Loaded(document)
	}
}

impl From<json_syntax::Value> for RemoteDocumentReference {
	fn from(document: json_syntax::Value) -> Self {
		Self::Loaded(document.into())
	}
}

/// Loading error.
#[derive(Debug, thiserror::Error)]
#[error("loading document `{target}` failed: {cause}")]
pub struct LoadError {
	pub target: IriBuf,
	pub cause: anyhow::Error,
}

impl LoadError {
	pub fn new(target: IriBuf, cause: impl Into<anyhow::Error>) -> Self {
		Self {
			target,
			cause: cause.into(),
		}
	}
}

/// Remote context provider.
///
/// A loader is required by the processing functions to dereference the
/// remote contexts referenced in `@context` entries (and `@import`). From the
/// point of view of the algorithms, loading is a synchronous call that either
/// returns a document or fails. Caching is the responsibility of the loader.
///
/// This library provides a few loader implementations:
///   - [`NoLoader`] dummy loader that always fail. Perfect if you are certain
///     that the processing will not require any loading.
///   - Standard [`HashMap`](std::collections::HashMap) and
///     [`BTreeMap`](std::collections::BTreeMap) mapping IRIs to pre-loaded
///     documents.
///   - [`FsLoader`] redirecting registered IRI prefixes to a local
///     directory on the file system.
///   - [`ChainLoader`] trying a first loader then falling back to a second
///     one.
pub trait Loader {
	/// Loads the document behind the given IRI.
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError>;
}

impl<'l, L: Loader> Loader for &'l L {
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		L::load(self, url)
	}
}

impl<'l, L: Loader> Loader for &'l mut L {
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		L::load(self, url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn references_are_loaded_once_needed() {
		let iri = Iri::new("http://example.org/context").unwrap().to_owned();
		let mut loader = HashMap::new();
		loader.insert(
			iri.clone(),
			RemoteDocument::new(Some(iri.clone()), json_syntax::Value::Boolean(true)),
		);

		let reference = RemoteDocumentReference::from(iri.clone());
		let loaded = reference.loaded_with(&loader).unwrap();
		assert_eq!(loaded.url().map(Iri::as_str), Some(iri.as_str()));

		let missing = RemoteDocumentReference::Iri(
			Iri::new("http://example.org/missing").unwrap().to_owned(),
		);
		assert!(missing.loaded_with(&loader).is_err());

		let inline = RemoteDocumentReference::from(json_syntax::Value::Null);
		assert!(matches!(inline.loaded_with(&NoLoader).unwrap(), Mown::Borrowed(_)))
	}
}
