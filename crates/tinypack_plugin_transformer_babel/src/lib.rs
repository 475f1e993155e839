//! Custom Babel configuration for tinypack builds.
//!
//! Merges the bundler's default transforms with whatever the user's babelrc
//! resolved to, then hands the combined document to the transpiler engine.

pub use self::babel_config::*;
pub use self::babel_config_resolver::*;
pub use self::custom_options::*;
pub use self::json_merge::*;

mod babel_config;
mod babel_config_resolver;
mod custom_options;
mod json_merge;
