use std::fmt::Display;
use std::fmt::Formatter;

use derive_builder::Builder;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ErrorKind;

/// A user facing error for tinypack.
#[derive(Builder, Clone, Debug, Default, Deserialize, Error, PartialEq, Serialize)]
#[builder(default, setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  /// A summary user-facing message
  pub message: String,

  /// Indicates where this diagnostic was emitted from
  ///
  /// Consumers can also enable backtraces for more detailed origin information.
  pub origin: Option<String>,

  /// What class of failure this diagnostic represents
  pub kind: ErrorKind,

  /// Hints for the user
  pub hints: Option<Vec<String>>,
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}
