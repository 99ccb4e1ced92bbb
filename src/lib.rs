//! JSON-described web form discovery and rendering.
//!
//! Scans a template root for `form-data.json` files, indexes each form path
//! (source file, template, parent/child linkage), and renders forms through
//! Tera. The renderer can be mounted as HTTP routes (`serve`, behind the
//! `http-server` feature) or exposed to enclosing templates as a `load_form`
//! function (`render::register_template_function`).

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod render;
pub mod schema;
#[cfg(feature = "http-server")]
pub mod serve;

pub use config::Settings;
pub use error::{FormError, FormResult};
pub use index::{FORM_DATA_FILENAME, FormIndex, FormMetadata};
pub use render::FormRenderer;
pub use schema::{FormDefinition, FormDocument};
