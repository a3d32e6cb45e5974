use std::time::Duration;

use busypal::{busy, Options, StyleArg};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    busy(
        Options::new()
            .message("Connecting")
            .style(StyleArg::Id(7))
            .fail_text("Connection refused"),
        || -> Result<(), String> {
            std::thread::sleep(Duration::from_secs(2));
            Err("could not reach the server".to_string())
        },
    )??;

    Ok(())
}
