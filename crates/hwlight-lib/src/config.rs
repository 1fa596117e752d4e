//! Service configuration: TOML file with the control-file paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# hwlight configuration: paths of the LED control files.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LCD backlight brightness control.
    #[serde(default = "default_backlight_path")]
    pub backlight_path: String,

    /// LCD backlight maximum brightness (read once at startup).
    #[serde(default = "default_backlight_max_path")]
    pub backlight_max_path: String,

    /// Red LED breath (hardware blink) toggle.
    #[serde(default = "default_red_breath_path")]
    pub red_breath_path: String,

    /// Red LED brightness.
    #[serde(default = "default_red_path")]
    pub red_path: String,

    /// Green LED breath (hardware blink) toggle.
    #[serde(default = "default_green_breath_path")]
    pub green_breath_path: String,

    /// Green LED brightness.
    #[serde(default = "default_green_path")]
    pub green_path: String,
}

fn default_backlight_path() -> String {
    "/sys/class/leds/lcd-backlight/brightness".into()
}
fn default_backlight_max_path() -> String {
    "/sys/class/leds/lcd-backlight/max_brightness".into()
}
fn default_red_breath_path() -> String {
    "/sys/class/leds/red/breath".into()
}
fn default_red_path() -> String {
    "/sys/class/leds/red/brightness".into()
}
fn default_green_breath_path() -> String {
    "/sys/class/leds/green/breath".into()
}
fn default_green_path() -> String {
    "/sys/class/leds/green/brightness".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backlight_path: default_backlight_path(),
            backlight_max_path: default_backlight_max_path(),
            red_breath_path: default_red_breath_path(),
            red_path: default_red_path(),
            green_breath_path: default_green_breath_path(),
            green_path: default_green_path(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A path field is empty or whitespace-only.
    EmptyPath(&'static str),
    /// Two output fields point at the same file.
    DuplicatePath {
        first: &'static str,
        second: &'static str,
        path: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPath(field) => write!(f, "{field} cannot be empty"),
            ValidationError::DuplicatePath {
                first,
                second,
                path,
            } => write!(f, "{first} and {second} both point at {path}"),
        }
    }
}

impl Config {
    /// Platform config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hwlight"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from an explicit path if given, otherwise from the default path.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let (config, warnings) = match path {
            Some(p) => Self::load_from(p),
            None => Self::load_with_warnings(),
        };
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Output path fields paired with their names.
    fn output_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("backlight_path", &self.backlight_path),
            ("red_breath_path", &self.red_breath_path),
            ("red_path", &self.red_path),
            ("green_breath_path", &self.green_breath_path),
            ("green_path", &self.green_path),
        ]
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let outputs = self.output_fields();
        for (field, value) in outputs
            .iter()
            .copied()
            .chain([("backlight_max_path", self.backlight_max_path.as_str())])
        {
            if value.trim().is_empty() {
                errors.push(ValidationError::EmptyPath(field));
            }
        }

        for (i, &(first, a)) in outputs.iter().enumerate() {
            for &(second, b) in &outputs[i + 1..] {
                if !a.trim().is_empty() && a.trim() == b.trim() {
                    errors.push(ValidationError::DuplicatePath {
                        first,
                        second,
                        path: a.trim().to_string(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Config with every control file placed under `dir`, using the sysfs names.
    ///
    /// Handy for pointing the service at a fake LED tree.
    pub fn rooted_at(dir: &Path) -> Self {
        let p = |rel: &str| dir.join(rel).to_string_lossy().into_owned();
        Config {
            backlight_path: p("lcd-backlight/brightness"),
            backlight_max_path: p("lcd-backlight/max_brightness"),
            red_breath_path: p("red/breath"),
            red_path: p("red/brightness"),
            green_breath_path: p("green/breath"),
            green_path: p("green/brightness"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──

    #[test]
    fn defaults_point_at_sysfs() {
        let c = Config::default();
        assert_eq!(c.backlight_path, "/sys/class/leds/lcd-backlight/brightness");
        assert_eq!(
            c.backlight_max_path,
            "/sys/class/leds/lcd-backlight/max_brightness"
        );
        assert_eq!(c.red_breath_path, "/sys/class/leds/red/breath");
        assert_eq!(c.red_path, "/sys/class/leds/red/brightness");
        assert_eq!(c.green_breath_path, "/sys/class/leds/green/breath");
        assert_eq!(c.green_path, "/sys/class/leds/green/brightness");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("red_path = \"/tmp/red\"\n").unwrap();
        assert_eq!(c.red_path, "/tmp/red");
        assert_eq!(c.green_path, default_green_path());
    }

    #[test]
    fn rooted_at_mirrors_sysfs_layout() {
        let c = Config::rooted_at(Path::new("/fake"));
        assert_eq!(c.red_breath_path, "/fake/red/breath");
        assert_eq!(c.backlight_max_path, "/fake/lcd-backlight/max_brightness");
        assert!(c.validate().is_ok());
    }

    // ── validate ──

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_path() {
        let c = Config {
            green_breath_path: "  ".into(),
            ..Config::default()
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs, vec![ValidationError::EmptyPath("green_breath_path")]);
    }

    #[test]
    fn validate_empty_max_path() {
        let c = Config {
            backlight_max_path: String::new(),
            ..Config::default()
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs, vec![ValidationError::EmptyPath("backlight_max_path")]);
    }

    #[test]
    fn validate_duplicate_path() {
        let c = Config {
            green_path: default_red_path(),
            ..Config::default()
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            &errs[0],
            ValidationError::DuplicatePath {
                first: "red_path",
                second: "green_path",
                ..
            }
        ));
    }

    #[test]
    fn validate_max_path_may_share_directory() {
        // The max file is read-only and not an output; it never collides.
        let c = Config {
            backlight_max_path: default_backlight_path(),
            ..Config::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let c = Config {
            red_path: String::new(),
            green_path: default_red_breath_path(),
            ..Config::default()
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::EmptyPath("red_path").to_string(),
            "red_path cannot be empty"
        );
        let e = ValidationError::DuplicatePath {
            first: "red_path",
            second: "green_path",
            path: "/x".into(),
        };
        assert_eq!(e.to_string(), "red_path and green_path both point at /x");
    }

    // ── load / save ──

    #[test]
    fn save_to_load_from_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let c = Config::rooted_at(dir.path());
        c.save_to(&path).unwrap();

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, c);
    }

    #[test]
    fn save_to_includes_header_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# hwlight configuration"));
    }

    #[test]
    fn save_to_cleans_up_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (c, warnings) = Config::load_from(&dir.path().join("missing.toml"));
        assert_eq!(c, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_from_invalid_toml_returns_defaults_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "red_path = [not toml").unwrap();
        let (c, warnings) = Config::load_from(&path);
        assert_eq!(c, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
    }

    #[test]
    fn load_or_default_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "green_path = \"/tmp/g\"\n").unwrap();
        assert_eq!(Config::load_or_default(Some(&path)).green_path, "/tmp/g");
    }
}
