use tinypack_core::types::JSONObject;
use tinypack_core::types::JSONValue;

/// Recursively merges `incoming` into `base`.
///
/// Nested objects merge key by key; any other pair of values resolves to
/// `incoming`. The one sequence union in this plugin (the environment preset
/// exclude list) is handled at its call site, not here.
pub fn merge_value(base: &mut JSONValue, incoming: JSONValue) {
  match (base, incoming) {
    (JSONValue::Object(base), JSONValue::Object(incoming)) => {
      for (key, value) in incoming {
        match base.get_mut(&key) {
          Some(existing) => merge_value(existing, value),
          None => {
            base.insert(key, value);
          }
        }
      }
    }
    (base, incoming) => *base = incoming,
  }
}

/// Object-level wrapper over [`merge_value`]; `incoming` wins on conflict.
pub fn merge_objects(mut base: JSONObject, incoming: JSONObject) -> JSONObject {
  for (key, value) in incoming {
    match base.get_mut(&key) {
      Some(existing) => merge_value(existing, value),
      None => {
        base.insert(key, value);
      }
    }
  }

  base
}
