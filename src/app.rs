use crate::console::Screen;
use crate::speech::{lap_announcement, Announcer};
use crate::stopwatch::{LapEvent, Stopwatch};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::MissedTickBehavior;

/// A key command forwarded from the stdin read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Lap,
    Toggle,
    Reset,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim() {
        "" | "l" | "lap" => Some(Command::Lap),
        "p" | "pause" | "resume" => Some(Command::Toggle),
        "r" | "reset" => Some(Command::Reset),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

/// Drives the view from a periodic tick and applies commands as they arrive.
pub async fn run(
    mut commands: Receiver<Command>,
    screen: Screen,
    mut announcer: Box<dyn Announcer + Send>,
    tick: Duration,
) -> anyhow::Result<()> {
    let mut watch = Stopwatch::default();
    let mut interval = tokio::time::interval(tick);

    // A slow terminal must not queue a backlog of redraws.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                draw(&screen, &watch)?;
            }
            command = commands.recv() => {
                match command {
                    None | Some(Command::Quit) => break,
                    Some(Command::Lap) => {
                        match watch.press_lap() {
                            LapEvent::Started { lap } => {
                                tracing::info!(lap, "started the stopwatch");
                                announcer.announce(&lap_announcement(lap));
                            }
                            LapEvent::Recorded { lap, next } => {
                                tracing::debug!(number = lap.number, duration = ?lap.duration, "recorded a lap");
                                announcer.announce(&lap_announcement(next));
                            }
                        }
                    }
                    Some(Command::Toggle) => {
                        watch.toggle();
                        if !watch.is_idle() {
                            tracing::info!(running = watch.is_running(), "toggled the stopwatch");
                        }
                    }
                    Some(Command::Reset) => {
                        watch.reset();
                        tracing::info!("reset the stopwatch");
                    }
                }

                draw(&screen, &watch)?;
            }
        }
    }

    // Leave the cursor below the last frame.
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

fn draw(screen: &Screen, watch: &Stopwatch) -> anyhow::Result<()> {
    let frame = screen.render(watch);
    let mut stdout = io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
