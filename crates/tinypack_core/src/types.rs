pub use self::json::*;
pub use crate::diagnostic::*;

mod json;
