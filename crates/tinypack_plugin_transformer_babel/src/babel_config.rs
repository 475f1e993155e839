use std::path::PathBuf;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use tinypack_core::types::JSONObject;

use crate::json_merge::merge_objects;

static PURE_ANNOTATION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[@#]__PURE__").unwrap());

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigItemKind {
  Plugin,
  Preset,
}

/// The module reference behind a resolved plugin or preset.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
  /// The specifier as the config wrote it, e.g. `@babel/preset-env`
  pub request: String,
  /// Absolute module path; the item's identity during merging
  pub resolved: PathBuf,
}

/// One resolved plugin or preset plus its options.
///
/// Two items are the same item iff their resolved paths match, regardless of
/// options.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigItem {
  #[serde(rename = "type")]
  pub kind: ConfigItemKind,
  pub file: ResolvedFile,
  pub options: JSONObject,
}

/// Output settings for the code generator.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOpts {
  pub minified: bool,
  pub compact: bool,
}

impl GeneratorOpts {
  /// Comment retention rule: only pure-call annotations survive generation.
  pub fn should_print_comment(&self, comment: &str) -> bool {
    PURE_ANNOTATION.is_match(comment)
  }
}

/// The configuration document handed to the transpiler engine.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BabelConfig {
  pub presets: Vec<ConfigItem>,
  pub plugins: Vec<ConfigItem>,
  pub generator_opts: GeneratorOpts,
}

/// Merges item sequences by resolved identity.
///
/// The first occurrence of an identity keeps its position; later items with
/// the same identity deep-merge their options over it (later wins), and
/// unseen identities append at the end. Callers can therefore override a
/// single default plugin from their own config without restating the full
/// default option set.
pub fn merge_config_items<I>(kind: ConfigItemKind, lists: I) -> Vec<ConfigItem>
where
  I: IntoIterator<Item = Vec<ConfigItem>>,
{
  let mut merged: IndexMap<PathBuf, ConfigItem> = IndexMap::new();

  for list in lists {
    for item in list {
      match merged.entry(item.file.resolved.clone()) {
        indexmap::map::Entry::Occupied(mut entry) => {
          let existing = entry.get();
          let merged_item = ConfigItem {
            kind,
            file: existing.file.clone(),
            options: merge_objects(existing.options.clone(), item.options),
          };

          entry.insert(merged_item);
        }
        indexmap::map::Entry::Vacant(entry) => {
          entry.insert(item);
        }
      }
    }
  }

  merged.into_values().collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn plugin(request: &str, options: serde_json::Value) -> ConfigItem {
    ConfigItem {
      kind: ConfigItemKind::Plugin,
      file: ResolvedFile {
        request: String::from(request),
        resolved: PathBuf::from("/project/node_modules")
          .join(request)
          .join("index.js"),
      },
      options: options.as_object().cloned().unwrap_or_default(),
    }
  }

  mod merge_config_items {
    use super::*;

    #[test]
    fn appends_items_with_unseen_identities() {
      let merged = merge_config_items(
        ConfigItemKind::Plugin,
        [
          vec![plugin("a", json!({}))],
          vec![plugin("b", json!({ "loose": true }))],
        ],
      );

      assert_eq!(
        merged
          .iter()
          .map(|item| item.file.request.as_str())
          .collect::<Vec<_>>(),
        vec!["a", "b"]
      );
    }

    #[test]
    fn merges_same_identity_into_a_single_item() {
      let merged = merge_config_items(
        ConfigItemKind::Plugin,
        [
          vec![plugin("a", json!({ "loose": true, "spec": false }))],
          vec![plugin("a", json!({ "loose": false }))],
        ],
      );

      assert_eq!(merged.len(), 1);
      assert_eq!(
        json!(merged[0].options),
        json!({ "loose": false, "spec": false })
      );
    }

    #[test]
    fn first_occurrence_keeps_its_position() {
      let merged = merge_config_items(
        ConfigItemKind::Plugin,
        [
          vec![plugin("a", json!({})), plugin("b", json!({ "async": false }))],
          vec![plugin("b", json!({ "async": true }))],
        ],
      );

      assert_eq!(
        merged
          .iter()
          .map(|item| item.file.request.as_str())
          .collect::<Vec<_>>(),
        vec!["a", "b"]
      );
      assert_eq!(json!(merged[1].options), json!({ "async": true }));
    }

    #[test]
    fn options_merge_recursively_with_later_list_precedence() {
      let merged = merge_config_items(
        ConfigItemKind::Plugin,
        [
          vec![plugin("a", json!({ "targets": { "chrome": "58", "ie": "11" } }))],
          vec![plugin("a", json!({ "targets": { "chrome": "90" } }))],
        ],
      );

      assert_eq!(
        json!(merged[0].options),
        json!({ "targets": { "chrome": "90", "ie": "11" } })
      );
    }
  }

  mod should_print_comment {
    use super::*;

    #[test]
    fn keeps_pure_annotations() {
      let generator_opts = GeneratorOpts::default();

      assert!(generator_opts.should_print_comment("/* @__PURE__ */"));
      assert!(generator_opts.should_print_comment("#__PURE__"));
    }

    #[test]
    fn drops_other_comments() {
      let generator_opts = GeneratorOpts::default();

      assert!(!generator_opts.should_print_comment("eslint-disable-next-line"));
      assert!(!generator_opts.should_print_comment("TODO: tidy this up"));
    }
  }
}
