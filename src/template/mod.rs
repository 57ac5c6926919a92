//! Template catalog of ready-made robots.txt documents
//!
//! Templates are static data: each one is a complete document meant to
//! replace the editor buffer in one step. Every template passes validation.

mod registry;

pub use registry::{find_template, get_template, list_templates, RobotsTemplate, TemplateError};
