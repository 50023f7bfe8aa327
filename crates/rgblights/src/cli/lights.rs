//! `lights` subcommand — list the lights the controller accepts.

use super::{GlobalOpts, HwLight, Lights, LightsOutput, Result, open_controller, print_json};

pub(super) fn format_light(light: &HwLight) -> String {
    format!(
        "{} (id {}, ordinal {})",
        light.light_type, light.id, light.ordinal
    )
}

pub(super) fn cmd_lights(opts: &GlobalOpts) -> Result<()> {
    let controller = open_controller(opts)?;
    let lights = controller.get_lights();

    if opts.json {
        return print_json(&LightsOutput {
            count: lights.len(),
            lights,
        });
    }

    for light in &lights {
        println!("{}", format_light(light));
    }
    Ok(())
}
