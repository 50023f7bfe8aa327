//! `set` subcommand — apply one light state request.

use super::{
    GlobalOpts, Lights, Result, SetArgs, StateOutput, StoredStates, kv, kv_width, led,
    open_controller, print_json,
};

/// One-line description of a stored state, e.g. `#FFFF0000 timed 500/500ms`.
pub(super) fn describe_state(state: &super::HwLightState) -> String {
    let color = led::format_color(state.color);
    if state.flash_mode.is_blinking() {
        format!(
            "{color} {} {}/{}ms",
            state.flash_mode, state.flash_on_ms, state.flash_off_ms
        )
    } else {
        format!("{color} {}", state.flash_mode)
    }
}

pub(super) fn print_states(states: &StoredStates) {
    let w = kv_width(&["Active:", "Battery:", "Notification:"], &[]);
    kv("Active:", states.active(), w);
    kv("Battery:", describe_state(&states.battery), w);
    kv("Notification:", describe_state(&states.notification), w);
}

pub(super) fn cmd_set(args: &SetArgs, opts: &GlobalOpts) -> Result<()> {
    let controller = open_controller(opts)?;
    controller.set_light_state(args.light, &args.state())?;

    let states = controller.states();
    if opts.json {
        return print_json(&StateOutput {
            active: states.active(),
            states,
        });
    }
    print_states(&states);
    Ok(())
}
