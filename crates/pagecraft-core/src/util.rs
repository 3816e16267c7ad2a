//! Escaping helpers and static element tables.

use std::borrow::Cow;

/// Escapes text for element content and double-quoted attribute values.
///
/// Only allocates when `s` contains a character that needs an entity.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	let Some(first) = s.find(['&', '<', '>', '"', '\'']) else {
		return Cow::Borrowed(s);
	};
	let mut out = String::with_capacity(s.len() + 16);
	out.push_str(&s[..first]);
	for c in s[first..].chars() {
		match entity(c) {
			Some(replacement) => out.push_str(replacement),
			None => out.push(c),
		}
	}
	Cow::Owned(out)
}

fn entity(c: char) -> Option<&'static str> {
	match c {
		'&' => Some("&amp;"),
		'<' => Some("&lt;"),
		'>' => Some("&gt;"),
		'"' => Some("&quot;"),
		'\'' => Some("&#x27;"),
		_ => None,
	}
}

/// Neutralises closing-tag sequences inside a raw-text element.
///
/// Text inside `<script>` and `<style>` is not entity-decoded by the
/// parser, so it is emitted verbatim. The only sequence that must not
/// appear is `</tag` (matched case-insensitively), which would end the
/// element early; it is rewritten as `<\/tag`.
pub fn escape_raw_text<'a>(text: &'a str, tag: &str) -> Cow<'a, str> {
	let needle_len = tag.len() + 2;
	let bytes = text.as_bytes();
	let mut out: Option<String> = None;
	let mut last = 0;
	let mut i = 0;

	while i + needle_len <= bytes.len() {
		if bytes[i] == b'<'
			&& bytes[i + 1] == b'/'
			&& bytes[i + 2..i + needle_len].eq_ignore_ascii_case(tag.as_bytes())
		{
			let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 8));
			buf.push_str(&text[last..=i]);
			buf.push('\\');
			last = i + 1;
			i += needle_len;
		} else {
			i += 1;
		}
	}

	match out {
		Some(mut buf) => {
			buf.push_str(&text[last..]);
			Cow::Owned(buf)
		}
		None => Cow::Borrowed(text),
	}
}

/// Elements that never have children and are always self-closing.
pub const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
	"source", "track", "wbr",
];

/// Elements whose text content is emitted without entity escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose whitespace is significant to rendering.
pub(crate) const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea", "script", "style"];

/// Block-level and metadata elements. Whitespace between siblings drawn
/// only from this set is not rendered.
pub(crate) const BLOCK_ELEMENTS: &[&str] = &[
	"address", "article", "aside", "base", "blockquote", "body", "caption", "col", "colgroup",
	"dd", "details", "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer",
	"form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "legend",
	"li", "link", "main", "menu", "meta", "nav", "noscript", "ol", "optgroup", "option", "p",
	"pre", "script", "section", "source", "style", "summary", "table", "tbody", "td", "template",
	"tfoot", "th", "thead", "title", "tr", "track", "ul",
];

/// Returns whether `tag` names a void element.
pub fn is_void_element(tag: &str) -> bool {
	contains_ignore_case(VOID_ELEMENTS, tag)
}

/// Returns whether `tag` names a raw-text element.
pub fn is_raw_text_element(tag: &str) -> bool {
	contains_ignore_case(RAW_TEXT_ELEMENTS, tag)
}

pub(crate) fn contains_ignore_case(table: &[&str], tag: &str) -> bool {
	table.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Checks that `tag` is a usable element identifier.
///
/// The first character must be an ASCII letter; the rest ASCII
/// alphanumerics or `-` (custom elements).
pub(crate) fn is_valid_tag_name(tag: &str) -> bool {
	let mut chars = tag.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() => {
			chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
		}
		_ => false,
	}
}

/// Checks that `name` can be written as an attribute name.
pub(crate) fn is_valid_attr_name(name: &str) -> bool {
	!name.is_empty()
		&& !name.chars().any(|c| {
			c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("plain text", "plain text")]
	#[case("caf\u{e9} \u{2603}", "caf\u{e9} \u{2603}")]
	#[case("fish & chips", "fish &amp; chips")]
	#[case("a < b > c", "a &lt; b &gt; c")]
	#[case("\" onclick=\"alert(1)", "&quot; onclick=&quot;alert(1)")]
	#[case("it's", "it&#x27;s")]
	#[case("&amp;", "&amp;amp;")]
	#[case("\u{e9}<\u{e9}", "\u{e9}&lt;\u{e9}")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	fn test_html_escape_borrows_clean_input() {
		assert!(matches!(html_escape("data-id"), Cow::Borrowed("data-id")));
		assert!(matches!(html_escape("x=\"1\""), Cow::Owned(_)));
	}

	#[rstest]
	#[case("a > b { color: red; }", "a > b { color: red; }")]
	#[case("x</style>y", "x<\\/style>y")]
	#[case("x</STYLE>y", "x<\\/STYLE>y")]
	#[case("</style</style", "<\\/style<\\/style")]
	#[case("</styles", "<\\/styles")]
	#[case("</sty", "</sty")]
	#[case("é</style>é", "é<\\/style>é")]
	fn test_escape_raw_text(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_raw_text(input, "style"), expected);
	}

	#[rstest]
	fn test_escape_raw_text_borrows_when_clean() {
		assert!(matches!(
			escape_raw_text("console.log(1 < 2)", "script"),
			Cow::Borrowed(_)
		));
	}

	#[rstest]
	#[case("br", true)]
	#[case("BR", true)]
	#[case("input", true)]
	#[case("wbr", true)]
	#[case("div", false)]
	#[case("p", false)]
	#[case("brr", false)]
	fn test_is_void_element(#[case] tag: &str, #[case] expected: bool) {
		assert_eq!(is_void_element(tag), expected);
	}

	#[rstest]
	#[case("div", true)]
	#[case("h1", true)]
	#[case("my-widget", true)]
	#[case("", false)]
	#[case("1div", false)]
	#[case("di v", false)]
	#[case("div>", false)]
	#[case("-x", false)]
	fn test_is_valid_tag_name(#[case] tag: &str, #[case] expected: bool) {
		assert_eq!(is_valid_tag_name(tag), expected);
	}

	#[rstest]
	#[case("class", true)]
	#[case("data-id", true)]
	#[case("@click", true)]
	#[case("xlink:href", true)]
	#[case("", false)]
	#[case("a b", false)]
	#[case("a=b", false)]
	#[case("a\"", false)]
	#[case("a/", false)]
	#[case("a\n", false)]
	fn test_is_valid_attr_name(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_valid_attr_name(name), expected);
	}
}
