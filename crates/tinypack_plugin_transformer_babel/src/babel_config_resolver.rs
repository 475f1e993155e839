use std::path::PathBuf;

use serde_json::json;
use tinypack_core::diagnostic_error;
use tinypack_core::types::DiagnosticError;
use tinypack_core::types::JSONObject;
use tinypack_core::types::JSONValue;
use tinypack_package_manager::PackageManagerRef;

use crate::babel_config::BabelConfig;
use crate::babel_config::ConfigItem;
use crate::babel_config::ConfigItemKind;
use crate::babel_config::GeneratorOpts;
use crate::babel_config::ResolvedFile;
use crate::babel_config::merge_config_items;
use crate::custom_options::CustomOptions;
use crate::json_merge::merge_objects;

pub const JSX_TRANSFORM: &str = "@babel/plugin-transform-react-jsx";
pub const ASYNC_TO_PROMISES: &str = "babel-plugin-transform-async-to-promises";
pub const CLASS_PROPERTIES: &str = "@babel/plugin-proposal-class-properties";
pub const REGENERATOR_TRANSFORM: &str = "@babel/plugin-transform-regenerator";
pub const MACROS: &str = "babel-plugin-macros";
pub const PRESET_ENV: &str = "@babel/preset-env";

/// Transforms the environment preset must skip; async is compiled to
/// promises by our default plugins instead.
const PRESET_ENV_EXCLUDES: [&str; 2] =
  ["transform-async-to-generator", "transform-regenerator"];

fn esmodules_target() -> JSONValue {
  json!({ "esmodules": true })
}

fn item_options<'a, I>(entries: I) -> JSONObject
where
  I: IntoIterator<Item = (&'a str, JSONValue)>,
{
  entries
    .into_iter()
    .map(|(key, value)| (String::from(key), value))
    .collect()
}

/// A plugin or preset reference that has not been resolved yet.
#[derive(Clone, Debug)]
pub struct ItemDescriptor {
  pub name: String,
  pub options: JSONObject,
}

impl ItemDescriptor {
  pub fn new(name: impl Into<String>, options: JSONObject) -> Self {
    ItemDescriptor {
      name: name.into(),
      options,
    }
  }
}

/// The plugins every build gets, derived from the caller's custom options.
///
/// Order matters only in that it is the first-seen order later merges
/// preserve.
fn default_plugin_descriptors(custom: &CustomOptions) -> Vec<ItemDescriptor> {
  let mut descriptors = Vec::new();

  if custom.jsx {
    descriptors.push(ItemDescriptor::new(
      JSX_TRANSFORM,
      item_options([
        ("pragma", json!(custom.pragma.as_deref().unwrap_or("h"))),
        (
          "pragmaFrag",
          json!(custom.pragma_frag.as_deref().unwrap_or("Fragment")),
        ),
      ]),
    ));
  }

  if !custom.modern {
    descriptors.push(ItemDescriptor::new(
      ASYNC_TO_PROMISES,
      item_options([
        ("inlineHelpers", json!(true)),
        ("externalHelpers", json!(true)),
      ]),
    ));
  }

  descriptors.push(ItemDescriptor::new(
    CLASS_PROPERTIES,
    item_options([("loose", json!(true))]),
  ));

  if !custom.modern {
    descriptors.push(ItemDescriptor::new(
      REGENERATOR_TRANSFORM,
      item_options([("async", json!(false))]),
    ));
  }

  descriptors.push(ItemDescriptor::new(MACROS, JSONObject::new()));

  descriptors
}

/// Resolves the final Babel configuration for one transform invocation.
///
/// Holds no per-invocation state, so the host may share a single resolver
/// across concurrent transforms.
pub struct BabelConfigResolver {
  package_manager: PackageManagerRef,
  resolve_from: PathBuf,
}

impl BabelConfigResolver {
  pub fn new(package_manager: PackageManagerRef, resolve_from: PathBuf) -> Self {
    BabelConfigResolver {
      package_manager,
      resolve_from,
    }
  }

  /// Resolves descriptors into config items through the package manager.
  pub fn create_config_items(
    &self,
    kind: ConfigItemKind,
    descriptors: Vec<ItemDescriptor>,
  ) -> Result<Vec<ConfigItem>, DiagnosticError> {
    descriptors
      .into_iter()
      .map(|descriptor| {
        let resolution = self
          .package_manager
          .resolve(&descriptor.name, &self.resolve_from)
          .map_err(|source| {
            source.context(diagnostic_error!(
              "Failed to resolve {} from {}",
              descriptor.name,
              self.resolve_from.display()
            ))
          })?;

        Ok(ConfigItem {
          kind,
          file: ResolvedFile {
            request: descriptor.name,
            resolved: resolution.resolved,
          },
          options: descriptor.options,
        })
      })
      .collect()
  }

  /// Ensures the environment preset is present and tuned for this build.
  ///
  /// An existing preset keeps its own options over our baseline, but
  /// `modules` is always disabled and the transforms our default plugins
  /// replace are always excluded.
  pub fn resolve_preset_env(
    &self,
    mut presets: Vec<ConfigItem>,
    custom: &CustomOptions,
  ) -> Result<Vec<ConfigItem>, DiagnosticError> {
    let env_index = presets
      .iter()
      .position(|preset| preset.file.request.contains(PRESET_ENV));

    let Some(env_index) = env_index else {
      tracing::debug!("No environment preset in the caller config, synthesizing one");

      let mut options = item_options([
        ("modules", json!(false)),
        ("loose", json!(!custom.modern)),
        ("useBuiltIns", json!(false)),
        ("exclude", json!(PRESET_ENV_EXCLUDES)),
      ]);

      let targets = match custom.modern {
        true => Some(esmodules_target()),
        false => custom.targets.clone(),
      };
      if let Some(targets) = targets {
        options.insert(String::from("targets"), targets);
      }

      return self.create_config_items(
        ConfigItemKind::Preset,
        vec![ItemDescriptor::new(PRESET_ENV, options)],
      );
    };

    let preset = presets[env_index].clone();

    let mut baseline =
      item_options([("loose", json!(true)), ("useBuiltIns", json!(false))]);
    if let Some(targets) = custom.targets.clone() {
      baseline.insert(String::from("targets"), targets);
    }

    let mut options = merge_objects(baseline, preset.options.clone());
    options.insert(String::from("modules"), json!(false));

    // Fixed excludes first, then whatever the caller excluded. Duplicates are
    // kept; the engine tolerates them.
    let mut exclude = PRESET_ENV_EXCLUDES
      .iter()
      .map(|name| json!(name))
      .collect::<Vec<_>>();
    if let Some(JSONValue::Array(existing)) = preset.options.get("exclude") {
      exclude.extend(existing.clone());
    }
    options.insert(String::from("exclude"), JSONValue::Array(exclude));

    if custom.modern {
      options.insert(String::from("targets"), esmodules_target());
    }

    presets[env_index] = ConfigItem {
      kind: ConfigItemKind::Preset,
      file: preset.file,
      options,
    };

    Ok(presets)
  }

  /// Builds the configuration handed to the transpiler engine.
  #[tracing::instrument(level = "debug", skip_all)]
  pub fn resolve(
    &self,
    config: BabelConfig,
    custom: &CustomOptions,
  ) -> Result<BabelConfig, DiagnosticError> {
    let default_plugins =
      self.create_config_items(ConfigItemKind::Plugin, default_plugin_descriptors(custom))?;

    let presets = self.resolve_preset_env(config.presets, custom)?;

    // Merge the caller's babelrc plugins over our defaults
    let plugins =
      merge_config_items(ConfigItemKind::Plugin, [default_plugins, config.plugins]);

    Ok(BabelConfig {
      presets,
      plugins,
      generator_opts: GeneratorOpts {
        minified: custom.compress,
        compact: custom.compress,
      },
    })
  }
}
