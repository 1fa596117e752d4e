//! `config` subcommand: show current configuration and file paths.

use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width, load_config, print_json};

/// Mark a control file as present or missing.
fn presence(path: &str) -> &'static str {
    if Path::new(path).exists() {
        "present"
    } else {
        "missing"
    }
}

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let errors: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errs) => errs.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        return print_json(&ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            valid: errors.is_empty(),
            errors,
            settings: config,
        });
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "backlight_path:",
            "backlight_max_path:",
            "red_breath_path:",
            "red_path:",
            "green_breath_path:",
            "green_path:",
        ],
    );

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Control files:");
    for (key, path) in [
        ("backlight_path:", &config.backlight_path),
        ("backlight_max_path:", &config.backlight_max_path),
        ("red_breath_path:", &config.red_breath_path),
        ("red_path:", &config.red_path),
        ("green_breath_path:", &config.green_breath_path),
        ("green_path:", &config.green_path),
    ] {
        kv_indent(key, format_args!("{path} ({})", presence(path)), w);
    }

    if !errors.is_empty() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}
