//! # Pagecraft
//!
//! Build HTML documents as typed element trees and render them to markup.
//!
//! Trees are assembled from [`Element`]s, text and [`Raw`] fragments.
//! Construction rejects what would render as malformed markup (invalid tag
//! or attribute names, children on void elements, non-finite numbers), so a
//! tree that builds always renders. Text and attribute values are escaped
//! for their context; only [`Raw`] content is emitted verbatim.
//!
//! ## Feature Flags
//!
//! - `css` (default) - stylesheet rules, media queries and [`CssBuilder`]
//!
//! ## Quick Example
//!
//! ```
//! use pagecraft::prelude::*;
//!
//! # fn main() -> pagecraft::Result<()> {
//! let styles = CssBuilder::new()
//!     .add(Css::class("greeting").add("color", "teal"))
//!     .to_style_element(&RenderOptions::default())?;
//!
//! let page = Element::new("html")?.add((
//!     Element::new("head")?.add(styles)?,
//!     Element::new("body")?.add(
//!         Element::new("p")?.class("greeting")?.add("Fish & chips")?,
//!     )?,
//! ))?;
//!
//! let html = render_nodes(&[Node::from(Raw::doctype()), Node::from(page)], &RenderOptions::default());
//! assert_eq!(
//!     html,
//!     concat!(
//!         "<!DOCTYPE html><html><head><style>.greeting { color: teal; }</style></head>",
//!         "<body><p class=\"greeting\">Fish &amp; chips</p></body></html>",
//!     )
//! );
//! # Ok(())
//! # }
//! ```

pub use pagecraft_core::{
	AttrMap, AttrValue, AttributeSet, BuildError, ConfigError, Element, ErrorKind, IntoChildren,
	MAX_INDENT, Node, Number, Raw, RenderError, RenderOptions, Result, Serializer, html_escape,
	is_void_element, render_nodes,
};

/// Escaping helpers and element classification tables.
pub mod util {
	pub use pagecraft_core::util::*;
}

#[cfg(feature = "css")]
pub use pagecraft_css::{Css, CssBuilder, CssItem, CssRule, Declaration, MediaQuery};

/// Stylesheet model.
#[cfg(feature = "css")]
pub mod css {
	pub use pagecraft_css::*;
}

/// Re-exports for building and rendering documents.
pub mod prelude {
	pub use crate::{
		AttrValue, BuildError, Element, IntoChildren, Node, Raw, RenderOptions, render_nodes,
	};

	#[cfg(feature = "css")]
	pub use crate::{Css, CssBuilder, CssRule, MediaQuery};
}
