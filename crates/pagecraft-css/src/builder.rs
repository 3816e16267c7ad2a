//! Stylesheet items, media queries and the stylesheet builder.

use std::borrow::Cow;
use std::fmt;

use pagecraft_core::{Element, RenderOptions};

use crate::rule::CssRule;

/// An entry of a stylesheet or media query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssItem {
	/// A style rule.
	Rule(CssRule),
	/// A nested `@media` block.
	Media(MediaQuery),
	/// Stylesheet text emitted verbatim.
	Raw(Cow<'static, str>),
}

impl CssItem {
	fn to_css(&self, options: &RenderOptions, depth: usize) -> String {
		match self {
			Self::Rule(rule) => {
				if rule.is_empty() {
					tracing::debug!(selector = rule.selector(), "skipping rule without declarations");
				}
				rule.to_css(options, depth)
			}
			Self::Media(media) => media.to_css(options, depth),
			Self::Raw(text) => text.to_string(),
		}
	}
}

impl From<CssRule> for CssItem {
	fn from(rule: CssRule) -> Self {
		Self::Rule(rule)
	}
}

impl From<MediaQuery> for CssItem {
	fn from(media: MediaQuery) -> Self {
		Self::Media(media)
	}
}

impl From<&'static str> for CssItem {
	fn from(text: &'static str) -> Self {
		Self::Raw(Cow::Borrowed(text))
	}
}

impl From<String> for CssItem {
	fn from(text: String) -> Self {
		Self::Raw(Cow::Owned(text))
	}
}

/// Renders items, dropping the ones that produce no text.
fn join_items(items: &[CssItem], options: &RenderOptions, depth: usize, separator: &str) -> String {
	items
		.iter()
		.map(|item| item.to_css(options, depth))
		.filter(|css| !css.is_empty())
		.collect::<Vec<_>>()
		.join(separator)
}

/// An `@media (condition) { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
	condition: Cow<'static, str>,
	items: Vec<CssItem>,
}

impl MediaQuery {
	/// Creates an empty media query. The condition is wrapped in
	/// parentheses when rendered.
	pub fn new(condition: impl Into<Cow<'static, str>>) -> Self {
		Self {
			condition: condition.into(),
			items: Vec::new(),
		}
	}

	/// Appends a rule, nested media query or raw text.
	pub fn add(mut self, item: impl Into<CssItem>) -> Self {
		self.items.push(item.into());
		self
	}

	/// Appends several items in iteration order.
	pub fn extend<I>(mut self, items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<CssItem>,
	{
		self.items.extend(items.into_iter().map(Into::into));
		self
	}

	/// Returns the condition.
	pub fn condition(&self) -> &str {
		&self.condition
	}

	/// Returns the contained items.
	pub fn items(&self) -> &[CssItem] {
		&self.items
	}

	/// Renders the block with the given options.
	///
	/// A block whose items all render empty renders as an empty string.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		self.to_css(options, 0)
	}

	fn to_css(&self, options: &RenderOptions, depth: usize) -> String {
		if options.pretty {
			let body = join_items(&self.items, options, depth + 1, "\n");
			if body.is_empty() {
				return String::new();
			}
			let indent = options.indent_str(depth);
			format!("{indent}@media ({}) {{\n{body}\n{indent}}}", self.condition)
		} else {
			let body = join_items(&self.items, options, depth + 1, " ");
			if body.is_empty() {
				return String::new();
			}
			format!("@media ({}) {{ {body} }}", self.condition)
		}
	}
}

/// Ordered collection of stylesheet items rendered as one stylesheet.
///
/// ```
/// use pagecraft_css::{Css, CssBuilder};
///
/// let css = CssBuilder::new()
///     .add(Css::class("btn").add("padding", "4px"))
///     .add(Css::media("max-width: 600px").add(Css::class("btn").add("width", "100%")))
///     .render();
///
/// assert_eq!(
///     css,
///     ".btn { padding: 4px; }\n@media (max-width: 600px) { .btn { width: 100%; } }"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssBuilder {
	items: Vec<CssItem>,
}

impl CssBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a rule, media query or raw text.
	pub fn add(mut self, item: impl Into<CssItem>) -> Self {
		self.items.push(item.into());
		self
	}

	/// Appends several items in iteration order.
	pub fn extend<I>(mut self, items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<CssItem>,
	{
		self.items.extend(items.into_iter().map(Into::into));
		self
	}

	/// Appends an item in place.
	pub fn push(&mut self, item: impl Into<CssItem>) -> &mut Self {
		self.items.push(item.into());
		self
	}

	/// Returns the items in render order.
	pub fn items(&self) -> &[CssItem] {
		&self.items
	}

	/// Number of items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns whether the builder holds no items.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Renders the stylesheet with default (compact) options.
	pub fn render(&self) -> String {
		self.render_with(&RenderOptions::default())
	}

	/// Renders the stylesheet.
	///
	/// Compact output separates blocks with a newline; pretty output with a
	/// blank line.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		let separator = if options.pretty { "\n\n" } else { "\n" };
		let css = join_items(&self.items, options, 0, separator);
		tracing::trace!(items = self.items.len(), bytes = css.len(), "rendered stylesheet");
		css
	}

	/// Wraps the rendered stylesheet in a `<style>` element.
	pub fn to_style_element(&self, options: &RenderOptions) -> pagecraft_core::Result<Element> {
		Element::new("style")?.add(self.render_with(options))
	}
}

impl fmt::Display for CssBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}
