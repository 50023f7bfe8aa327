//! `config` subcommand — show the effective configuration.

use super::{
    ConfigOutput, GlobalOpts, Result, config_path, kv, kv_indent, kv_width, load_config,
    print_json,
};

pub(super) fn cmd_config(opts: &GlobalOpts) -> Result<()> {
    let path = config_path(opts);
    let exists = path.exists();
    let config = load_config(opts);
    let errors: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if opts.json {
        return print_json(&ConfigOutput {
            config_file: path.display().to_string(),
            config_file_exists: exists,
            valid: errors.is_empty(),
            errors,
            settings: config,
        });
    }

    let w = kv_width(
        &["Config file:"],
        &[
            "sysfs_root:",
            "control_led:",
            "red_led:",
            "green_led:",
            "blue_led:",
            "default_max_brightness:",
        ],
    );

    if exists {
        kv("Config file:", format_args!("{} (loaded)", path.display()), w);
    } else {
        kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", path.display()),
            w,
        );
    }
    println!();

    println!("Settings:");
    kv_indent("sysfs_root:", &config.sysfs_root, w);
    kv_indent("control_led:", &config.control_led, w);
    kv_indent("red_led:", &config.red_led, w);
    kv_indent("green_led:", &config.green_led, w);
    kv_indent("blue_led:", &config.blue_led, w);
    kv_indent("default_max_brightness:", config.default_max_brightness, w);

    if !errors.is_empty() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}
