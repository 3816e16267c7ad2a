//! # pagecraft-core
//!
//! Element tree, attribute model and markup serializer.
//!
//! Trees are built programmatically through a chaining API and rendered to
//! markup text. Every construction call validates its input immediately, so
//! a tree that was built successfully always renders.
//!
//! ## Example
//!
//! ```
//! use pagecraft_core::{Element, Node, Raw, RenderOptions};
//!
//! let page = Element::new("html")?
//!     .attr("lang", "en")?
//!     .add(Element::new("body")?.add((
//!         Element::new("h1")?.add("Tom & Jerry")?,
//!         Element::new("input")?.attr("type", "checkbox")?.attr("disabled", true)?,
//!     ))?)?;
//!
//! assert_eq!(
//!     page.render(),
//!     r#"<html lang="en"><body><h1>Tom &amp; Jerry</h1><input type="checkbox" disabled/></body></html>"#
//! );
//!
//! // No DOCTYPE is emitted unless the caller adds one.
//! let document = pagecraft_core::render_nodes(
//!     &[Node::from(Raw::doctype()), Node::from(page)],
//!     &RenderOptions::default(),
//! );
//! assert!(document.starts_with("<!DOCTYPE html><html"));
//! # Ok::<(), pagecraft_core::BuildError>(())
//! ```

pub mod attrs;
pub mod element;
pub mod error;
pub mod options;
pub mod render;
pub mod util;

pub use attrs::{AttrMap, AttrValue, AttributeSet, Number};
pub use element::{Element, IntoChildren, Node, Raw};
pub use error::{BuildError, ConfigError, ErrorKind, RenderError, Result};
pub use options::{MAX_INDENT, RenderOptions};
pub use render::{Serializer, render_nodes};
pub use util::{html_escape, is_void_element};
