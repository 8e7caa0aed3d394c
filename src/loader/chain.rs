use iref::Iri;

use super::{LoadError, Loader, RemoteDocument};

/// Loads documents from the first loader, otherwise falls back to the second
/// one.
///
/// This can be useful for combining, for example, a map of pre-loaded
/// contexts with an [`FsLoader`](super::FsLoader).
///
/// Several [`ChainLoader`]s can be nested to combine more than two loaders.
pub struct ChainLoader<L1, L2>(L1, L2);

impl<L1, L2> ChainLoader<L1, L2> {
	/// Build a new chain loader.
	pub fn new(l1: L1, l2: L2) -> Self {
		ChainLoader(l1, l2)
	}
}

/// Both loaders failed.
#[derive(Debug, thiserror::Error)]
#[error("first: {0} / second: {1}")]
pub struct ChainError(LoadError, LoadError);

impl<L1: Loader, L2: Loader> Loader for ChainLoader<L1, L2> {
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		match self.0.load(url) {
			Ok(doc) => Ok(doc),
			Err(e1) => match self.1.load(url) {
				Ok(doc) => Ok(doc),
				Err(e2) => Err(LoadError::new(url.to_owned(), ChainError(e1, e2))),
			},
		}
	}
}
