//! Stylesheet model for pagecraft.
//!
//! Rules are a selector plus ordered `property: value` declarations.
//! A [`CssBuilder`] collects rules, media queries and raw text and renders
//! them in insertion order. Nothing is deduplicated, merged or validated:
//! selectors, properties and values are emitted as given.
//!
//! ```
//! use pagecraft_core::RenderOptions;
//! use pagecraft_css::{Css, CssBuilder};
//!
//! let sheet = CssBuilder::new()
//!     .add(Css::element("body").add("margin", "0"))
//!     .add(Css::class("card").property("border_radius", "4px"));
//!
//! assert_eq!(sheet.render(), "body { margin: 0; }\n.card { border-radius: 4px; }");
//!
//! let style = sheet.to_style_element(&RenderOptions::default()).unwrap();
//! assert!(style.render().starts_with("<style>body"));
//! ```

pub mod builder;
pub mod rule;
pub mod selector;

pub use builder::{CssBuilder, CssItem, MediaQuery};
pub use rule::{CssRule, Declaration, property_name};
pub use selector::Css;
