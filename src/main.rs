mod app;
mod cli;
mod console;
mod format;
mod lap;
mod speech;
mod stopwatch;

use crate::cli::Arguments;
use crate::console::Screen;
use crate::speech::{Announcer, Silent, Speech};
use clap::Parser;
use std::io::{self, BufRead};
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tracing_log::LogTracer;

fn main() {
    let arguments = cli::Arguments::parse();
    let screen = set_log_level(&arguments).expect("Failed to configure logging");

    tracing::debug!(?arguments, "starting the lap timer");

    if let Err(e) = run(arguments, screen) {
        tracing::error!(%e, "Unable to run the lap timer");
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<Screen> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let screen = Screen::new(arguments.rows);
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(tracing_subscriber::fmt::writer::Tee::new(
            io::stderr,
            screen.clone(),
        ))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(screen)
}

fn run(arguments: Arguments, screen: Screen) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    let result: anyhow::Result<()> = runtime.block_on(async {
        let (sender, receiver) = tokio::sync::mpsc::channel(16);

        let announcer: Box<dyn Announcer + Send> = if arguments.quiet {
            Box::new(Silent)
        } else {
            Box::new(Speech::new(arguments.speech_command))
        };

        let mut group = tokio::task::JoinSet::new();
        group.spawn(app::run(
            receiver,
            screen,
            announcer,
            Duration::from_millis(arguments.tick_ms.max(1)),
        ));
        group.spawn_blocking(|| read_loop(sender));

        // The first task to finish ends the program.
        match group.join_next().await {
            Some(join_result) => join_result?,
            None => Ok(()),
        }
    });

    // Do not wait for a read loop still blocked on stdin.
    runtime.shutdown_background();

    result
}

fn read_loop(sender: Sender<app::Command>) -> anyhow::Result<()> {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;

        let Some(command) = app::parse_command(&line) else {
            tracing::warn!(input = %line.trim(), "unrecognized command");
            continue;
        };

        sender.blocking_send(command)?;

        if command == app::Command::Quit {
            break;
        }
    }

    Ok(())
}
