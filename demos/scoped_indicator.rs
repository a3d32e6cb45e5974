use std::time::Duration;

use busypal::{BusyPal, FrameSource, Options, Outcome, StyleArg, StyleSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pal = BusyPal::new(
        Options::new()
            .message("Hold on, it is taking longer than expected")
            .format("{spinner} | {message}")
            .style(StyleArg::Spec(
                FrameSource::Id(25),
                StyleSpec::new().fore("black").back("#ff8700").weight("bold"),
            )),
    )?;

    let busy = pal.enter()?;
    std::thread::sleep(Duration::from_secs(4));
    busy.exit(Outcome::Done)?;

    Ok(())
}
