use iref::Iri;

use super::{LoadError, Loader, RemoteDocument};

/// Dummy loader.
///
/// Fails at every attempt to load a resource. Can be useful when you know
/// that you will never need to load remote resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLoader;

#[derive(Debug, thiserror::Error)]
#[error("no loader")]
pub struct CannotLoad;

impl Loader for NoLoader {
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		Err(LoadError::new(url.to_owned(), CannotLoad))
	}
}
