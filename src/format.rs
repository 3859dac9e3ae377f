use std::time::Duration;

/// Formats an elapsed duration as `MM:SS:hh` with minutes wrapping at 60.
pub fn format_elapsed(duration: Duration) -> String {
    let millis = duration.as_millis();
    let minutes = (millis / (1000 * 60)) % 60;
    let seconds = (millis / 1000) % 60;
    let hundredths = (millis % 1000) / 10;

    format!("{minutes:02}:{seconds:02}:{hundredths:02}")
}
