//! Element tree types.
//!
//! ## Overview
//!
//! An [`Element`] owns its attributes and an ordered list of child
//! [`Node`]s. Children are moved into their parent when added, so a node
//! can only ever have one parent and the structure is always a tree.
//!
//! ## Example
//!
//! ```
//! use pagecraft_core::Element;
//!
//! let html = Element::new("div")?
//!     .attr("class", "card")?
//!     .add(Element::new("p")?.add("a < b")?)?
//!     .render();
//!
//! assert_eq!(html, r#"<div class="card"><p>a &lt; b</p></div>"#);
//! # Ok::<(), pagecraft_core::BuildError>(())
//! ```

use std::borrow::Cow;

use serde_json::Value;

use crate::attrs::{AttrValue, AttributeSet};
use crate::error::{BuildError, RenderError, Result};
use crate::options::RenderOptions;
use crate::render;
use crate::util::{is_valid_tag_name, is_void_element};

/// Pre-escaped markup emitted verbatim.
///
/// The caller asserts the content is safe; it bypasses all escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(Cow<'static, str>);

impl Raw {
	/// Wraps trusted markup.
	pub fn new(markup: impl Into<Cow<'static, str>>) -> Self {
		Self(markup.into())
	}

	/// The HTML5 document type declaration.
	pub fn doctype() -> Self {
		Self(Cow::Borrowed("<!DOCTYPE html>"))
	}

	/// Returns the wrapped markup.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// A nested element.
	Element(Element),
	/// Text, escaped at render time.
	Text(Cow<'static, str>),
	/// Markup emitted verbatim.
	Raw(Raw),
}

impl Node {
	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a raw markup node.
	pub fn raw(markup: impl Into<Cow<'static, str>>) -> Self {
		Self::Raw(Raw::new(markup))
	}

	/// Renders this node with default options.
	pub fn render(&self) -> String {
		render::render_node(self, &RenderOptions::default())
	}

	/// Renders this node with the given options.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		render::render_node(self, options)
	}

	/// Renders this node, reporting serializer failures instead of panicking.
	pub fn try_render(&self, options: &RenderOptions) -> std::result::Result<String, RenderError> {
		render::try_render_node(self, options)
	}
}

/// Conversion into zero or more child nodes.
///
/// Implemented for single children (elements, text, raw markup) and for
/// groups of them (tuples, arrays, `Vec`), so one `add` call can attach
/// several children in order.
pub trait IntoChildren {
	/// Appends the converted nodes to `out`.
	fn append_to(self, out: &mut Vec<Node>) -> Result<()>;
}

impl IntoChildren for Node {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(self);
		Ok(())
	}
}

impl IntoChildren for Element {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Element(self));
		Ok(())
	}
}

impl IntoChildren for Raw {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Raw(self));
		Ok(())
	}
}

impl IntoChildren for &'static str {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Text(Cow::Borrowed(self)));
		Ok(())
	}
}

impl IntoChildren for String {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Text(Cow::Owned(self)));
		Ok(())
	}
}

impl IntoChildren for &String {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Text(Cow::Owned(self.clone())));
		Ok(())
	}
}

impl IntoChildren for Cow<'static, str> {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		out.push(Node::Text(self));
		Ok(())
	}
}

/// `None` is missing content and is rejected.
impl<T: IntoChildren> IntoChildren for Option<T> {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		match self {
			Some(child) => child.append_to(out),
			None => Err(BuildError::MissingContent),
		}
	}
}

impl<T: IntoChildren> IntoChildren for Vec<T> {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		self.into_iter().try_for_each(|child| child.append_to(out))
	}
}

impl<T: IntoChildren, const N: usize> IntoChildren for [T; N] {
	fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
		self.into_iter().try_for_each(|child| child.append_to(out))
	}
}

macro_rules! impl_into_children_tuple {
	($($name:ident),+) => {
		impl<$($name: IntoChildren),+> IntoChildren for ($($name,)+) {
			#[allow(non_snake_case)]
			fn append_to(self, out: &mut Vec<Node>) -> Result<()> {
				let ($($name,)+) = self;
				$($name.append_to(out)?;)+
				Ok(())
			}
		}
	};
}

impl_into_children_tuple!(A, B);
impl_into_children_tuple!(A, B, C);
impl_into_children_tuple!(A, B, C, D);
impl_into_children_tuple!(A, B, C, D, E);
impl_into_children_tuple!(A, B, C, D, E, F);

/// An element in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	/// The tag name (e.g., "div", "span").
	tag: Cow<'static, str>,
	/// HTML attributes.
	attrs: AttributeSet,
	/// Child nodes, in render order.
	children: Vec<Node>,
	/// Whether this is a void element (no closing tag).
	is_void: bool,
}

impl Element {
	/// Creates an element with no attributes and no children.
	///
	/// Fails if `tag` is empty or not a valid element identifier.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Result<Self> {
		let tag = tag.into();
		if !is_valid_tag_name(&tag) {
			tracing::debug!(tag = %tag, "rejected tag name");
			return Err(BuildError::InvalidTagName(tag.into_owned()));
		}
		let is_void = is_void_element(&tag);
		Ok(Self {
			tag,
			attrs: AttributeSet::new(),
			children: Vec::new(),
			is_void,
		})
	}

	/// Creates an element with initial attributes, set in iteration order.
	///
	/// ```
	/// use pagecraft_core::{AttrValue, Element};
	///
	/// let input = Element::with_attrs(
	///     "input",
	///     [("type", AttrValue::from("checkbox")), ("disabled", true.into())],
	/// )?;
	/// assert_eq!(input.render(), r#"<input type="checkbox" disabled/>"#);
	/// # Ok::<(), pagecraft_core::BuildError>(())
	/// ```
	pub fn with_attrs<I, K, V>(tag: impl Into<Cow<'static, str>>, attrs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<Cow<'static, str>>,
		V: Into<AttrValue>,
	{
		let mut element = Self::new(tag)?;
		for (name, value) in attrs {
			element.attrs.set(name, value)?;
		}
		Ok(element)
	}

	/// Sets an attribute, replacing any previous value for the same name.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<AttrValue>,
	) -> Result<Self> {
		self.attrs.set(name, value)?;
		Ok(self)
	}

	/// Sets an attribute in place.
	pub fn set_attr(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<AttrValue>,
	) -> Result<&mut Self> {
		self.attrs.set(name, value)?;
		Ok(self)
	}

	/// Sets an attribute from a dynamically typed JSON value.
	///
	/// See [`AttrValue::from_json`] for the accepted shapes.
	pub fn json_attr(mut self, name: impl Into<Cow<'static, str>>, value: Value) -> Result<Self> {
		let name = name.into();
		let value = AttrValue::from_json(&name, value)?;
		self.attrs.set(name, value)?;
		Ok(self)
	}

	/// Removes an attribute, returning its value.
	pub fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
		self.attrs.remove(name)
	}

	/// Sets the `id` attribute.
	pub fn id(self, id: impl Into<Cow<'static, str>>) -> Result<Self> {
		self.attr("id", id.into())
	}

	/// Sets the `class` attribute.
	pub fn class(self, class: impl Into<Cow<'static, str>>) -> Result<Self> {
		self.attr("class", class.into())
	}

	/// Sets the inline `style` attribute.
	///
	/// Accepts either declaration text or a mapping, which renders as
	/// `prop: value; prop2: value2`.
	pub fn style(self, style: impl Into<AttrValue>) -> Result<Self> {
		self.attr("style", style)
	}

	/// Sets `data-*` attributes from a mapping.
	pub fn data(self, entries: impl Into<AttrValue>) -> Result<Self> {
		self.attr("data", entries)
	}

	/// Sets `aria-*` attributes from a mapping.
	pub fn aria(self, entries: impl Into<AttrValue>) -> Result<Self> {
		self.attr("aria", entries)
	}

	/// Appends children and returns the element for chaining.
	///
	/// Fails if the element is void or if any child is missing. The element
	/// is consumed either way, so on error it is dropped together with its
	/// children; use [`Element::push`] to keep the element after a failure.
	pub fn add(mut self, children: impl IntoChildren) -> Result<Self> {
		self.push(children)?;
		Ok(self)
	}

	/// Appends children in place and returns the same element.
	///
	/// On error the element is left exactly as it was: no child of the
	/// group is attached.
	pub fn push(&mut self, children: impl IntoChildren) -> Result<&mut Self> {
		let mut nodes = Vec::new();
		children.append_to(&mut nodes)?;
		if nodes.is_empty() {
			return Ok(self);
		}
		if self.is_void {
			tracing::debug!(tag = %self.tag, count = nodes.len(), "rejected children for void element");
			return Err(BuildError::VoidElementChildren {
				tag: self.tag.clone().into_owned(),
			});
		}
		tracing::trace!(tag = %self.tag, count = nodes.len(), "attached children");
		self.children.append(&mut nodes);
		Ok(self)
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &AttributeSet {
		&self.attrs
	}

	/// Returns the child nodes.
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Consumes the element and returns its children.
	pub fn into_children(self) -> Vec<Node> {
		self.children
	}

	/// Renders the tree to markup with default options.
	///
	/// # Panics
	///
	/// Panics if the serializer finds a void element with children, which
	/// the construction API makes unreachable.
	pub fn render(&self) -> String {
		render::render_element(self, &RenderOptions::default())
	}

	/// Renders the tree with the given options.
	///
	/// # Panics
	///
	/// Same as [`Element::render`].
	pub fn render_with(&self, options: &RenderOptions) -> String {
		render::render_element(self, options)
	}

	/// Renders the tree, reporting serializer failures as errors.
	pub fn try_render(&self, options: &RenderOptions) -> std::result::Result<String, RenderError> {
		render::try_render_element(self, options)
	}

	#[cfg(test)]
	pub(crate) fn push_unchecked(&mut self, node: Node) {
		self.children.push(node);
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Node::Element(element)
	}
}

impl From<Raw> for Node {
	fn from(raw: Raw) -> Self {
		Node::Raw(raw)
	}
}
