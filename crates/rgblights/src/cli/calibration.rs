//! `calibration` subcommand — show the per-channel brightness ceilings.

use super::{
    CalibrationEntryJson, CalibrationOutput, Channel, GlobalOpts, Result, kv, kv_indent,
    kv_width, open_controller, print_json,
};

pub(super) fn cmd_calibration(opts: &GlobalOpts) -> Result<()> {
    let controller = open_controller(opts)?;
    let calibration = controller.calibration();
    let layout = controller.layout();
    let root = controller.sysfs().root().display().to_string();

    if opts.json {
        let channels = Channel::ALL
            .into_iter()
            .map(|ch| CalibrationEntryJson {
                channel: ch,
                led: layout.led(ch).to_string(),
                param: calibration.param(ch),
            })
            .collect();
        return print_json(&CalibrationOutput {
            sysfs_root: root,
            channels,
        });
    }

    let w = kv_width(&["LED root:"], &["red:", "green:", "blue:"]);
    kv("LED root:", &root, w);
    println!();
    println!("Max brightness (single / mixed):");
    for ch in Channel::ALL {
        let p = calibration.param(ch);
        kv_indent(
            &format!("{ch}:"),
            format_args!(
                "{} / {}  ({})",
                p.max_single_brightness,
                p.max_mixed_brightness,
                layout.led(ch)
            ),
            w,
        );
    }
    Ok(())
}
