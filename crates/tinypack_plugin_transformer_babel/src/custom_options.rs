use serde::Deserialize;
use tinypack_core::diagnostic_error;
use tinypack_core::types::DiagnosticBuilder;
use tinypack_core::types::DiagnosticError;
use tinypack_core::types::ErrorKind;
use tinypack_core::types::JSONObject;
use tinypack_core::types::JSONValue;

/// Options recognized under the `custom` key of the plugin option bag.
///
/// Everything outside `custom` belongs to the transpiler and is passed
/// through untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomOptions {
  /// Enable the JSX transform
  pub jsx: bool,
  /// JSX factory, defaults to `h`
  pub pragma: Option<String>,
  /// JSX fragment factory, defaults to `Fragment`
  pub pragma_frag: Option<String>,
  /// Target environments with native module and async support, skipping the
  /// legacy async and generator transforms
  pub modern: bool,
  /// Browser target descriptor forwarded to the environment preset
  pub targets: Option<JSONValue>,
  /// Minify generated output, keeping only pure-annotation comments
  pub compress: bool,
}

/// Splits the caller's option bag into our own options and the remainder.
///
/// An absent `custom` key yields default options; an ill-typed one is a
/// fault surfaced to the host, not a recovery path.
pub fn split_options(
  mut raw: JSONObject,
) -> Result<(CustomOptions, JSONObject), DiagnosticError> {
  let custom = match raw.remove("custom") {
    None => CustomOptions::default(),
    Some(value) => serde_json::from_value(value).map_err(|error| {
      diagnostic_error!(
        DiagnosticBuilder::default()
          .kind(ErrorKind::ParseError)
          .message(format!("Error parsing custom options: {error}"))
      )
    })?,
  };

  Ok((custom, raw))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn object(value: JSONValue) -> JSONObject {
    value.as_object().cloned().unwrap_or_default()
  }

  mod split_options {
    use super::*;

    #[test]
    fn defaults_custom_options_when_custom_is_absent() {
      let (custom, passthrough) =
        split_options(object(json!({ "babelrc": false }))).unwrap();

      assert!(!custom.jsx);
      assert!(!custom.modern);
      assert!(!custom.compress);
      assert_eq!(custom.pragma, None);
      assert_eq!(json!(passthrough), json!({ "babelrc": false }));
    }

    #[test]
    fn removes_custom_from_the_passthrough_options() {
      let (custom, passthrough) = split_options(object(json!({
        "custom": { "jsx": true, "pragma": "createElement" },
        "babelHelpers": "bundled",
        "extensions": [".js", ".ts"]
      })))
      .unwrap();

      assert!(custom.jsx);
      assert_eq!(custom.pragma.as_deref(), Some("createElement"));
      assert_eq!(
        json!(passthrough),
        json!({ "babelHelpers": "bundled", "extensions": [".js", ".ts"] })
      );
    }

    #[test]
    fn ignores_unrecognized_custom_keys() {
      let (custom, _) = split_options(object(json!({
        "custom": { "modern": true, "somethingElse": 42 }
      })))
      .unwrap();

      assert!(custom.modern);
    }

    #[test]
    fn errors_on_an_ill_typed_custom_value() {
      let error = split_options(object(json!({ "custom": "yes" })))
        .map(|_| ())
        .unwrap_err();

      assert!(
        error
          .to_string()
          .starts_with("Error parsing custom options:")
      );
    }
  }
}
