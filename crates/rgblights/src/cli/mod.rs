//! CLI subcommands — light list, state requests, calibration, config, serve loop.

mod calibration;
mod config_cmd;
mod lights;
mod serve;
mod set;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

pub(super) use rgblights_lib::config::Config;
pub(super) use rgblights_lib::error::Result;
pub(super) use rgblights_lib::led::{self, Channel, LightParam};
pub(super) use rgblights_lib::service::{LightController, Lights, StoredStates};
pub(super) use rgblights_lib::sysfs::SysfsLeds;
pub(super) use rgblights_lib::types::{FlashMode, HwLight, HwLightState, LightType};

const PADDING: usize = 2;

/// Flags shared by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub sysfs_root: Option<PathBuf>,
    pub json: bool,
}

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Print any serializable value as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| rgblights_lib::LightsError::Io(std::io::Error::other(e)))?;
    println!("{s}");
    Ok(())
}

// ── Config / controller resolution ──

/// Resolve the config file path: `--config`, else the on-device default.
pub(super) fn config_path(opts: &GlobalOpts) -> PathBuf {
    opts.config.clone().unwrap_or_else(Config::default_path)
}

/// Load the config and apply command-line overrides.
pub(super) fn load_config(opts: &GlobalOpts) -> Config {
    let mut config = Config::load(&config_path(opts));
    if let Some(root) = &opts.sysfs_root {
        config.sysfs_root = root.display().to_string();
    }
    config
}

/// Build a controller on the configured LED tree. Reads calibration.
pub(super) fn open_controller(opts: &GlobalOpts) -> Result<LightController<SysfsLeds>> {
    let config = load_config(opts);
    config.check()?;
    Ok(LightController::new(
        SysfsLeds::new(Path::new(config.sysfs_root.trim())),
        config.layout(),
        config.default_max_brightness,
    ))
}

// ── Argument parsing ──

/// Parse a light name or raw id. Unknown integers are passed through so the
/// controller can reject them.
pub(super) fn parse_light_id(s: &str) -> std::result::Result<i32, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "battery" => Ok(LightType::Battery.id()),
        "notification" | "notifications" => Ok(LightType::Notifications.id()),
        other => other
            .parse::<i32>()
            .map_err(|_| format!("unknown light \"{s}\" (use battery, notifications or an id)")),
    }
}

fn parse_color_arg(s: &str) -> std::result::Result<u32, String> {
    led::parse_color(s).map_err(|e| e.to_string())
}

fn parse_flash_arg(s: &str) -> std::result::Result<FlashMode, String> {
    s.parse::<FlashMode>().map_err(|e| e.to_string())
}

/// Arguments of a single light-state request.
#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Light to set: battery, notifications, or a raw light id
    #[arg(value_parser = parse_light_id, allow_hyphen_values = true)]
    pub light: i32,

    /// Color: name, #RRGGBB, or 0xAARRGGBB
    #[arg(value_parser = parse_color_arg)]
    pub color: u32,

    /// Flash mode: none, timed, or hardware
    #[arg(long, default_value = "none", value_parser = parse_flash_arg)]
    pub flash: FlashMode,

    /// Blink on time in milliseconds
    #[arg(long, default_value_t = 0)]
    pub on_ms: u32,

    /// Blink off time in milliseconds
    #[arg(long, default_value_t = 0)]
    pub off_ms: u32,
}

impl SetArgs {
    pub fn state(&self) -> HwLightState {
        HwLightState {
            color: self.color,
            flash_mode: self.flash,
            flash_on_ms: self.on_ms,
            flash_off_ms: self.off_ms,
        }
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct LightsOutput {
    pub count: usize,
    pub lights: Vec<HwLight>,
}

#[derive(Serialize)]
pub(super) struct StateOutput {
    pub active: LightType,
    pub states: StoredStates,
}

#[derive(Serialize)]
pub(super) struct CalibrationEntryJson {
    pub channel: Channel,
    pub led: String,
    #[serde(flatten)]
    pub param: LightParam,
}

#[derive(Serialize)]
pub(super) struct CalibrationOutput {
    pub sysfs_root: String,
    pub channels: Vec<CalibrationEntryJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: String,
    pub config_file_exists: bool,
    pub settings: Config,
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the lights this controller supports
    Lights,

    /// Set the state of one light
    Set(SetArgs),

    /// Show the calibration read from the LED driver
    Calibration,

    /// Show the effective configuration
    Config,

    /// Keep one controller alive and read requests from stdin
    Serve,
}

pub fn run(cmd: Command, opts: &GlobalOpts) -> Result<()> {
    match cmd {
        Command::Lights => lights::cmd_lights(opts),
        Command::Set(args) => set::cmd_set(&args, opts),
        Command::Calibration => calibration::cmd_calibration(opts),
        Command::Config => config_cmd::cmd_config(opts),
        Command::Serve => serve::cmd_serve(opts),
    }
}
