use iref::{Iri, IriBuf};
use json_syntax::Parse;
use std::path::{Path, PathBuf};

use super::{LoadError, Loader, RemoteDocument};

/// Loading error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No mount point found for the given IRI.
	#[error("no mount point")]
	NoMountPoint,

	/// IO error.
	#[error("IO error: {0}")]
	IO(std::io::Error),

	/// Parse error.
	#[error("parse error: {0}")]
	Parse(json_syntax::parse::Error),
}

/// File-system loader.
///
/// This is a special JSON-LD document loader that can load documents from
/// the file system by attaching a directory to specific URLs.
///
/// Loaded documents are not cached: a new file system read is made each time
/// an URL is loaded even if it has already been queried before.
#[derive(Debug, Default)]
pub struct FsLoader {
	mount_points: Vec<(PathBuf, IriBuf)>,
}

impl FsLoader {
	/// Creates a new file system loader without mount points.
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind the given IRI prefix to the given path.
	///
	/// Any document with an IRI matching the given prefix will be loaded from
	/// the referenced local directory.
	pub fn mount<P: AsRef<Path>>(&mut self, url: IriBuf, path: P) {
		self.mount_points.push((path.as_ref().into(), url));
	}

	/// Returns the local file path associated to the given `url` if any.
	///
	/// Dot segments are ignored, so the path never leaves the mounted
	/// directory.
	pub fn filepath(&self, url: &Iri) -> Option<PathBuf> {
		for (path, target_url) in &self.mount_points {
			if let Some(suffix) = url.as_str().strip_prefix(target_url.as_str()) {
				let mut filepath = path.clone();
				for seg in suffix
					.split('/')
					.filter(|s| !matches!(*s, "" | "." | ".."))
				{
					filepath.push(seg)
				}

				return Some(filepath);
			}
		}

		None
	}
}

impl Loader for FsLoader {
	fn load(&self, url: &Iri) -> Result<RemoteDocument, LoadError> {
		match self.filepath(url) {
			Some(filepath) => {
				log::debug!("loading `{url}` from `{}`", filepath.display());
				let contents = std::fs::read_to_string(filepath)
					.map_err(|e| LoadError::new(url.to_owned(), Error::IO(e)))?;
				let (doc, _) = json_syntax::Value::parse_str(&contents)
					.map_err(|e| LoadError::new(url.to_owned(), Error::Parse(e)))?;
				Ok(RemoteDocument::new(Some(url.to_owned()), doc))
			}
			None => Err(LoadError::new(url.to_owned(), Error::NoMountPoint)),
		}
	}
}
