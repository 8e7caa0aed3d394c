use json_syntax::Value;

use super::{to_array, Expander};
use crate::{
	algorithms::ProcessingEnvironment,
	util::{ObjectExt, ObjectKind},
	Error,
};

impl<'a> Expander<'a> {
	/// Expands a whole document.
	///
	/// The result is always an array of top-level objects. A top-level map
	/// containing only `@graph` is replaced by its graph.
	pub fn expand_document(
		&self,
		env: &mut impl ProcessingEnvironment,
		document: &Value,
	) -> Result<Value, Error> {
		log::debug!("expanding document");
		let expanded = self.expand_element(env, document, false)?;

		// 19.1) If, after the above algorithm is run, the result is a map that
		// contains only an @graph entry, set the result to the value of
		// @graph's value.
		let expanded = match expanded {
			Value::Object(mut object)
				if object.len() == 1 && ObjectKind::of(&object) == ObjectKind::Graph =>
			{
				object.take("@graph").unwrap_or(Value::Null)
			}
			expanded => expanded,
		};

		// 19.2) Otherwise, if result is null, set it to an empty array.
		// 19.3) Finally, if result is not an array, then set result to an array
		// containing only result.
		Ok(Value::Array(to_array(expanded)))
	}
}
