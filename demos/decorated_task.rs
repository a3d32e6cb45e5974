use std::time::Duration;

use busypal::{BusyPal, Cleanup, FrameSource, Options, StyleArg, StyleSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let download = BusyPal::new(
        Options::new()
            .message("Please wait")
            .format("{spinner1} {message} {spinner2} {outcome}")
            .style1(StyleArg::Id(20))
            .style2(StyleArg::Spec(
                FrameSource::Id(29),
                StyleSpec::new().fore("cyan").weight("bold"),
            ))
            .cleanup(Cleanup::field("spinner2")),
    )?
    .wrap(|secs: u64| -> Result<u64, &str> {
        std::thread::sleep(Duration::from_secs(secs));
        Ok(secs * 1024)
    });

    let bytes = download(3)??;
    println!("downloaded {} bytes", bytes);

    Ok(())
}
