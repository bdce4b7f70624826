//! Configuration of the Yul compilation pipeline.
//!
//! A [`CompilerConfig`] is resolved in two steps: [`CompilerConfig::resolve_defaults`]
//! overlays environment variables onto the hardcoded defaults, then
//! [`CompilerConfig::merge`] applies caller-supplied overrides field by field.
//! No other code in the scripts reads the environment for compiler settings.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_RESOLC_PATH,
    DEFAULT_SOLC_PATH, HOME_ENV_VAR, INPUT_FILE_ENV_VAR, OUTPUT_DIR_ENV_VAR, OUTPUT_FILE_ENV_VAR,
    RESOLC_PATH_ENV_VAR, SOLC_PATH_ENV_VAR,
};

/// Fully resolved settings for a single compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Path to the `resolc` binary
    pub resolc_path: PathBuf,
    /// Path to the `solc` binary handed to `resolc`
    pub solc_path: PathBuf,
    /// The Yul source to compile, relative to the project root unless absolute
    pub input_file: PathBuf,
    /// The directory the bytecode is written to, relative to the project root unless absolute
    pub output_dir: PathBuf,
    /// The name of the bytecode file within `output_dir`
    pub output_file: String,
}

/// Caller-supplied overrides; any field left `None` keeps the resolved default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfigOverrides {
    /// Overrides [`CompilerConfig::resolc_path`]
    pub resolc_path: Option<PathBuf>,
    /// Overrides [`CompilerConfig::solc_path`]
    pub solc_path: Option<PathBuf>,
    /// Overrides [`CompilerConfig::input_file`]
    pub input_file: Option<PathBuf>,
    /// Overrides [`CompilerConfig::output_dir`]
    pub output_dir: Option<PathBuf>,
    /// Overrides [`CompilerConfig::output_file`]
    pub output_file: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            resolc_path: PathBuf::from(DEFAULT_RESOLC_PATH),
            solc_path: PathBuf::from(DEFAULT_SOLC_PATH),
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl CompilerConfig {
    /// Overlay the process environment onto the hardcoded defaults
    pub fn resolve_defaults() -> Self {
        Self::resolve_defaults_with(|key| env::var(key).ok())
    }

    /// Overlay the variables returned by `lookup` onto the hardcoded defaults.
    ///
    /// A leading `~/` in either compiler path is expanded against `HOME`.
    pub fn resolve_defaults_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let home = lookup(HOME_ENV_VAR);

        let resolc_path = lookup(RESOLC_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.resolc_path);
        let solc_path = lookup(SOLC_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.solc_path);

        Self {
            resolc_path: expand_home(resolc_path, home.as_deref()),
            solc_path: expand_home(solc_path, home.as_deref()),
            input_file: lookup(INPUT_FILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.input_file),
            output_dir: lookup(OUTPUT_DIR_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            output_file: lookup(OUTPUT_FILE_ENV_VAR).unwrap_or(defaults.output_file),
        }
    }

    /// Apply `overrides` on top of this config, preferring any field the overrides set
    pub fn merge(self, overrides: CompilerConfigOverrides) -> Self {
        Self {
            resolc_path: overrides.resolc_path.unwrap_or(self.resolc_path),
            solc_path: overrides.solc_path.unwrap_or(self.solc_path),
            input_file: overrides.input_file.unwrap_or(self.input_file),
            output_dir: overrides.output_dir.unwrap_or(self.output_dir),
            output_file: overrides.output_file.unwrap_or(self.output_file),
        }
    }

    /// The Yul source path, resolved against `root`
    pub fn input_path(&self, root: &Path) -> PathBuf {
        root.join(&self.input_file)
    }

    /// The output directory, resolved against `root`
    pub fn output_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }

    /// The bytecode artifact path, resolved against `root`
    pub fn output_path(&self, root: &Path) -> PathBuf {
        self.output_dir_path(root).join(&self.output_file)
    }
}

/// Replace a leading `~/` with the home directory, when one is known
fn expand_home(path: PathBuf, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => Path::new(home).join(rest),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use super::{CompilerConfig, CompilerConfigOverrides};

    /// An environment lookup backed by a fixed set of variables
    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = CompilerConfig::resolve_defaults_with(lookup_from(&[]));
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(
            config.output_path(&PathBuf::from("/project")),
            PathBuf::from("/project/output/bytecode.txt")
        );
    }

    #[test]
    fn test_environment_overlays_defaults() {
        let config = CompilerConfig::resolve_defaults_with(lookup_from(&[
            ("RESOLC_PATH", "/usr/local/bin/resolc"),
            ("SOLC_PATH", "/usr/bin/solc"),
            ("YUL_OUTPUT_DIR", "build"),
        ]));

        assert_eq!(config.resolc_path, PathBuf::from("/usr/local/bin/resolc"));
        assert_eq!(config.solc_path, PathBuf::from("/usr/bin/solc"));
        assert_eq!(config.output_dir, PathBuf::from("build"));
        assert_eq!(config.input_file, CompilerConfig::default().input_file);
        assert_eq!(config.output_file, "bytecode.txt");
    }

    #[test]
    fn test_home_expansion() {
        let config =
            CompilerConfig::resolve_defaults_with(lookup_from(&[("HOME", "/home/deployer")]));
        assert_eq!(
            config.resolc_path,
            PathBuf::from("/home/deployer/.cargo/bin/resolc-0.3.0")
        );

        // Without a home directory the path is left untouched
        let config = CompilerConfig::resolve_defaults_with(lookup_from(&[]));
        assert_eq!(config.resolc_path, PathBuf::from("~/.cargo/bin/resolc-0.3.0"));
    }

    #[test]
    fn test_overrides_take_precedence_per_field() {
        let base = CompilerConfig::resolve_defaults_with(lookup_from(&[(
            "SOLC_PATH",
            "/env/solc",
        )]));
        let merged = base.clone().merge(CompilerConfigOverrides {
            output_file: Some("proxy.hex".to_string()),
            resolc_path: Some(PathBuf::from("/cli/resolc")),
            ..Default::default()
        });

        assert_eq!(merged.resolc_path, PathBuf::from("/cli/resolc"));
        assert_eq!(merged.solc_path, PathBuf::from("/env/solc"));
        assert_eq!(merged.output_file, "proxy.hex");
        assert_eq!(merged.input_file, base.input_file);
        assert_eq!(merged.output_dir, base.output_dir);

        // An empty override set is the identity
        assert_eq!(base.clone().merge(CompilerConfigOverrides::default()), base);
    }

    #[test]
    fn test_absolute_paths_ignore_root() {
        let config = CompilerConfig::default().merge(CompilerConfigOverrides {
            output_dir: Some(PathBuf::from("/tmp/artifacts")),
            ..Default::default()
        });
        assert_eq!(
            config.output_path(&PathBuf::from("/project")),
            PathBuf::from("/tmp/artifacts/bytecode.txt")
        );
    }
}
