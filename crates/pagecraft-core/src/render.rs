//! Markup serializer.
//!
//! Turns an element tree into markup text by depth-first traversal,
//! preserving child and attribute order. Text is escaped according to the
//! element it sits in: entity escaping in ordinary elements, closing-tag
//! neutralisation inside `<script>` and `<style>`. Raw leaves are written
//! verbatim.

use std::fmt::{self, Write};

use crate::attrs::{AttrValue, AttributeSet, expands_to_prefixed};
use crate::element::{Element, Node};
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::util::{
	BLOCK_ELEMENTS, PREFORMATTED_ELEMENTS, contains_ignore_case, escape_raw_text, html_escape,
	is_raw_text_element,
};

/// Streaming serializer writing markup into any [`fmt::Write`] sink.
pub struct Serializer<'a, W> {
	out: W,
	options: &'a RenderOptions,
	depth: usize,
	/// Set while inside an element whose whitespace is significant.
	preserve: bool,
}

impl<'a, W: Write> Serializer<'a, W> {
	/// Creates a serializer writing into `out`.
	pub fn new(out: W, options: &'a RenderOptions) -> Self {
		Self {
			out,
			options,
			depth: 0,
			preserve: false,
		}
	}

	/// Consumes the serializer and returns the sink.
	pub fn into_inner(self) -> W {
		self.out
	}

	/// Writes a single node.
	pub fn write_node(&mut self, node: &Node) -> Result<(), RenderError> {
		self.node(node, None)
	}

	/// Writes an element and its subtree.
	pub fn write_element(&mut self, element: &Element) -> Result<(), RenderError> {
		let tag = element.tag_name();
		self.out.write_char('<')?;
		self.out.write_str(tag)?;
		self.attributes(element.attrs())?;

		if element.is_void() {
			if !element.children().is_empty() {
				return Err(RenderError::VoidElementChildren {
					tag: tag.to_string(),
				});
			}
			let close = if self.options.self_closing_void { "/>" } else { ">" };
			self.out.write_str(close)?;
			return Ok(());
		}

		self.out.write_char('>')?;

		let raw_text_tag = is_raw_text_element(tag).then_some(tag);
		let was_preserving = self.preserve;
		self.preserve |= contains_ignore_case(PREFORMATTED_ELEMENTS, tag);

		if self.breaks_lines(element) {
			self.depth += 1;
			for child in element.children() {
				self.newline()?;
				self.node(child, raw_text_tag)?;
			}
			self.depth -= 1;
			self.newline()?;
		} else {
			for child in element.children() {
				self.node(child, raw_text_tag)?;
			}
		}

		self.preserve = was_preserving;
		self.out.write_str("</")?;
		self.out.write_str(tag)?;
		self.out.write_char('>')?;
		Ok(())
	}

	fn node(&mut self, node: &Node, raw_text_tag: Option<&str>) -> Result<(), RenderError> {
		match node {
			Node::Element(element) => self.write_element(element),
			Node::Text(text) => {
				let escaped = match raw_text_tag {
					Some(tag) => escape_raw_text(text, tag),
					None => html_escape(text),
				};
				self.out.write_str(&escaped)?;
				Ok(())
			}
			Node::Raw(raw) => {
				self.out.write_str(raw.as_str())?;
				Ok(())
			}
		}
	}

	fn attributes(&mut self, attrs: &AttributeSet) -> Result<(), RenderError> {
		for (name, value) in attrs.iter() {
			match value {
				AttrValue::Text(text) => self.attribute(name, None, text)?,
				AttrValue::Number(number) => self.attribute(name, None, &number.to_string())?,
				AttrValue::Bool(true) => {
					self.out.write_char(' ')?;
					self.out.write_str(name)?;
				}
				AttrValue::Bool(false) => {}
				AttrValue::Map(map) if map.is_empty() => {}
				AttrValue::Map(map) if !expands_to_prefixed(name) => {
					let declarations = map
						.iter()
						.map(|(property, value)| format!("{property}: {value}"))
						.collect::<Vec<_>>()
						.join("; ");
					self.attribute(name, None, &declarations)?;
				}
				AttrValue::Map(map) => {
					for (key, value) in map {
						self.attribute(name, Some(key.as_str()), value)?;
					}
				}
			}
		}
		Ok(())
	}

	fn attribute(&mut self, name: &str, suffix: Option<&str>, value: &str) -> fmt::Result {
		self.out.write_char(' ')?;
		self.out.write_str(name)?;
		if let Some(suffix) = suffix {
			self.out.write_char('-')?;
			self.out.write_str(suffix)?;
		}
		self.out.write_str("=\"")?;
		self.out.write_str(&html_escape(value))?;
		self.out.write_char('"')
	}

	/// Children go on their own lines only when every child is a block-level
	/// element, so the inserted whitespace is never rendered.
	fn breaks_lines(&self, element: &Element) -> bool {
		self.options.pretty
			&& !self.preserve
			&& !element.children().is_empty()
			&& element.children().iter().all(|child| match child {
				Node::Element(el) => contains_ignore_case(BLOCK_ELEMENTS, el.tag_name()),
				Node::Text(_) | Node::Raw(_) => false,
			})
	}

	fn newline(&mut self) -> fmt::Result {
		self.out.write_char('\n')?;
		self.out.write_str(&self.options.indent_str(self.depth))
	}
}

/// Adapter giving a node + options pair a `Display` implementation.
struct Rendered<'a> {
	node: NodeRef<'a>,
	options: &'a RenderOptions,
}

#[derive(Clone, Copy)]
enum NodeRef<'a> {
	Element(&'a Element),
	Node(&'a Node),
	Nodes(&'a [Node]),
}

impl Rendered<'_> {
	fn write_to<W: Write>(&self, out: W) -> Result<W, RenderError> {
		let mut serializer = Serializer::new(out, self.options);
		match self.node {
			NodeRef::Element(element) => serializer.write_element(element)?,
			NodeRef::Node(node) => serializer.write_node(node)?,
			NodeRef::Nodes(nodes) => {
				for node in nodes {
					serializer.write_node(node)?;
				}
			}
		}
		Ok(serializer.into_inner())
	}

	fn try_to_string(&self) -> Result<String, RenderError> {
		let out = self.write_to(String::new())?;
		tracing::trace!(bytes = out.len(), pretty = self.options.pretty, "rendered markup");
		Ok(out)
	}
}

impl fmt::Display for Rendered<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_to(f).map(|_| ()).map_err(|err| {
			tracing::error!(error = %err, "refusing to emit invalid markup");
			fmt::Error
		})
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rendered = Rendered {
			node: NodeRef::Element(self),
			options: &RenderOptions::default(),
		};
		fmt::Display::fmt(&rendered, f)
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let rendered = Rendered {
			node: NodeRef::Node(self),
			options: &RenderOptions::default(),
		};
		fmt::Display::fmt(&rendered, f)
	}
}

pub(crate) fn render_element(element: &Element, options: &RenderOptions) -> String {
	Rendered {
		node: NodeRef::Element(element),
		options,
	}
	.to_string()
}

pub(crate) fn try_render_element(
	element: &Element,
	options: &RenderOptions,
) -> Result<String, RenderError> {
	Rendered {
		node: NodeRef::Element(element),
		options,
	}
	.try_to_string()
}

pub(crate) fn render_node(node: &Node, options: &RenderOptions) -> String {
	Rendered {
		node: NodeRef::Node(node),
		options,
	}
	.to_string()
}

pub(crate) fn try_render_node(node: &Node, options: &RenderOptions) -> Result<String, RenderError> {
	Rendered {
		node: NodeRef::Node(node),
		options,
	}
	.try_to_string()
}

/// Renders a sequence of sibling nodes without a wrapping element.
///
/// # Panics
///
/// Same as [`Element::render`].
pub fn render_nodes(nodes: &[Node], options: &RenderOptions) -> String {
	Rendered {
		node: NodeRef::Nodes(nodes),
		options,
	}
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::Raw;
	use rstest::rstest;

	fn el(tag: &'static str) -> Element {
		Element::new(tag).unwrap()
	}

	#[rstest]
	fn test_render_simple_element() {
		assert_eq!(el("div").render(), "<div></div>");
	}

	#[rstest]
	fn test_render_void_element() {
		assert_eq!(el("br").render(), "<br/>");
		assert_eq!(el("br").render_with(&RenderOptions::new().html5_void()), "<br>");
	}

	#[rstest]
	fn test_render_attributes_in_insertion_order() {
		let html = el("a")
			.attr("href", "/x?a=1&b=2")
			.unwrap()
			.attr("title", "say \"hi\"")
			.unwrap()
			.render();
		assert_eq!(
			html,
			r#"<a href="/x?a=1&amp;b=2" title="say &quot;hi&quot;"></a>"#
		);
	}

	#[rstest]
	fn test_render_boolean_attributes() {
		let html = el("input")
			.attr("type", "checkbox")
			.unwrap()
			.attr("disabled", true)
			.unwrap()
			.attr("checked", false)
			.unwrap()
			.attr("required", None::<bool>)
			.unwrap()
			.render();
		assert_eq!(html, r#"<input type="checkbox" disabled/>"#);
	}

	#[rstest]
	fn test_render_numbers() {
		let html = el("td")
			.attr("colspan", 2)
			.unwrap()
			.attr("data-ratio", 0.25)
			.unwrap()
			.render();
		assert_eq!(html, r#"<td colspan="2" data-ratio="0.25"></td>"#);
	}

	#[rstest]
	fn test_render_style_map() {
		let html = el("div")
			.style([("color", "red"), ("margin", "0 auto")])
			.unwrap()
			.render();
		assert_eq!(html, r#"<div style="color: red; margin: 0 auto"></div>"#);
	}

	#[rstest]
	fn test_render_prefixed_maps() {
		let html = el("div")
			.data([("id", "7"), ("role", "x\"y")])
			.unwrap()
			.aria([("label", "Close")])
			.unwrap()
			.render();
		assert_eq!(
			html,
			r#"<div data-id="7" data-role="x&quot;y" aria-label="Close"></div>"#
		);
	}

	#[rstest]
	fn test_render_prefixed_name_appears_once() {
		let html = el("div")
			.attr("data-id", "a")
			.unwrap()
			.data([("id", "b")])
			.unwrap()
			.render();
		assert_eq!(html, r#"<div data-id="b"></div>"#);

		let html = el("div")
			.data([("id", "b"), ("kind", "k")])
			.unwrap()
			.attr("data-id", "a")
			.unwrap()
			.render();
		assert_eq!(html, r#"<div data-kind="k" data-id="a"></div>"#);
	}

	#[rstest]
	fn test_render_attribute_value_cannot_break_out() {
		let html = el("img")
			.attr("alt", "\" onerror=\"alert(1)")
			.unwrap()
			.render();
		assert_eq!(html, r#"<img alt="&quot; onerror=&quot;alert(1)"/>"#);
	}

	#[rstest]
	fn test_render_empty_map_is_omitted() {
		let html = el("div").data(Vec::<(String, String)>::new()).unwrap().render();
		assert_eq!(html, "<div></div>");
	}

	#[rstest]
	fn test_render_text_with_escaping() {
		let html = el("p").add("<script>alert('xss')</script>").unwrap().render();
		assert_eq!(
			html,
			"<p>&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;</p>"
		);
	}

	#[rstest]
	fn test_render_raw_is_verbatim() {
		let html = el("div").add(Raw::new("<b>&nbsp;</b>")).unwrap().render();
		assert_eq!(html, "<div><b>&nbsp;</b></div>");
	}

	#[rstest]
	fn test_render_style_text_is_not_entity_escaped() {
		let html = el("style").add("a > b { content: \"&\"; }").unwrap().render();
		assert_eq!(html, "<style>a > b { content: \"&\"; }</style>");
	}

	#[rstest]
	fn test_render_script_cannot_close_early() {
		let html = el("script").add("let s = '</script>';").unwrap().render();
		assert_eq!(html, "<script>let s = '<\\/script>';</script>");
	}

	#[rstest]
	fn test_render_text_escaped_at_every_depth() {
		let html = el("div").add((el("b").add("<").unwrap(), "<")).unwrap().render();
		assert_eq!(html, "<div><b>&lt;</b>&lt;</div>");
	}

	#[rstest]
	fn test_safety_net_rejects_void_with_children() {
		let mut br = el("br");
		br.push_unchecked(Node::text("x"));
		let err = br.try_render(&RenderOptions::default()).unwrap_err();
		assert!(matches!(err, RenderError::VoidElementChildren { tag } if tag == "br"));
	}

	#[rstest]
	#[should_panic]
	fn test_render_panics_rather_than_emit_invalid_markup() {
		let mut wrapper = el("div");
		let mut img = el("img");
		img.push_unchecked(Node::text("x"));
		wrapper.push_unchecked(Node::Element(img));
		let _ = wrapper.render();
	}

	#[rstest]
	fn test_render_nodes_fragment() {
		let nodes = [Node::Raw(Raw::doctype()), Node::Element(el("html"))];
		assert_eq!(
			render_nodes(&nodes, &RenderOptions::default()),
			"<!DOCTYPE html><html></html>"
		);
	}

	#[rstest]
	fn test_pretty_block_children() {
		let tree = el("ul")
			.add((el("li").add("a").unwrap(), el("li").add("b").unwrap()))
			.unwrap();
		assert_eq!(
			tree.render_with(&RenderOptions::new().pretty()),
			"<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>"
		);
	}

	#[rstest]
	fn test_pretty_nested_indent() {
		let tree = el("html")
			.add(el("body").add(el("div").add(el("p")).unwrap()).unwrap())
			.unwrap();
		assert_eq!(
			tree.render_with(&RenderOptions::new().pretty().indent(1)),
			"<html>\n <body>\n  <div>\n   <p></p>\n  </div>\n </body>\n</html>"
		);
	}

	#[rstest]
	fn test_pretty_with_oversized_indent_field() {
		let options = RenderOptions {
			indent: usize::MAX,
			..RenderOptions::new().pretty()
		};
		let tree = el("div").add(el("div").add(el("p")).unwrap()).unwrap();
		let pad = " ".repeat(crate::options::MAX_INDENT);
		assert_eq!(
			tree.render_with(&options),
			format!("<div>\n{pad}<div>\n{pad}{pad}<p></p>\n{pad}</div>\n</div>")
		);
	}

	#[rstest]
	fn test_pretty_keeps_mixed_content_inline() {
		let tree = el("div")
			.add(("x", el("p").add("y").unwrap()))
			.unwrap();
		assert_eq!(
			tree.render_with(&RenderOptions::new().pretty()),
			"<div>x<p>y</p></div>"
		);
	}

	#[rstest]
	fn test_pretty_keeps_inline_children_inline() {
		let tree = el("div")
			.add((el("b").add("x").unwrap(), el("i").add("y").unwrap()))
			.unwrap();
		assert_eq!(
			tree.render_with(&RenderOptions::new().pretty()),
			"<div><b>x</b><i>y</i></div>"
		);
	}

	#[rstest]
	fn test_pretty_never_breaks_inside_pre() {
		let tree = el("pre")
			.add(el("div").add((el("p"), el("p"))).unwrap())
			.unwrap();
		assert_eq!(
			tree.render_with(&RenderOptions::new().pretty()),
			"<pre><div><p></p><p></p></div></pre>"
		);
	}

	#[rstest]
	fn test_serializer_into_custom_sink() {
		let options = RenderOptions::default();
		let mut serializer = Serializer::new(String::from("<!-- head -->"), &options);
		serializer.write_element(&el("hr")).unwrap();
		assert_eq!(serializer.into_inner(), "<!-- head --><hr/>");
	}

	#[rstest]
	fn test_display_matches_render() {
		let tree = el("p").add("x").unwrap();
		assert_eq!(tree.to_string(), tree.render());
		assert_eq!(Node::text("a&b").to_string(), "a&amp;b");
	}
}
