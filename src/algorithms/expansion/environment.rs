use iref::Iri;

use super::ExpansionOptions;
use crate::{algorithms::ContextProcessingOptions, ActiveContext, TermDefinition};

/// Expander.
///
/// Holds the parameters shared by the recursive calls of the expansion
/// algorithm.
#[derive(Clone, Copy)]
pub struct Expander<'a> {
	pub base_url: Option<&'a Iri>,
	pub options: ExpansionOptions,
	pub active_context: &'a ActiveContext,
	pub active_property: Option<&'a str>,
}

impl<'a> Expander<'a> {
	pub fn new(
		active_context: &'a ActiveContext,
		base_url: Option<&'a Iri>,
		options: ExpansionOptions,
	) -> Self {
		Self {
			base_url,
			options,
			active_context,
			active_property: None,
		}
	}

	pub fn active_property_definition(&self) -> Option<&'a TermDefinition> {
		self.active_property.and_then(|t| self.active_context.get(t))
	}

	/// Options used to process the contexts found along the way.
	pub fn context_options(&self) -> ContextProcessingOptions {
		self.options.into()
	}

	pub fn with<'b>(
		&self,
		active_context: &'b ActiveContext,
		active_property: Option<&'b str>,
	) -> Expander<'b>
	where
		'a: 'b,
	{
		Expander {
			base_url: self.base_url,
			options: self.options,
			active_context,
			active_property,
		}
	}
}
