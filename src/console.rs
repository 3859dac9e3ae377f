use crate::format::format_elapsed;
use crate::stopwatch::Stopwatch;
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, RwLock};
use tracing_subscriber::fmt::MakeWriter;

const CLEAR_HOME: &str = "\x1B[2J\x1B[H";
const LOG_LINES: usize = 4;

/// The single on-screen view. Doubles as a log writer so warnings surface
/// inside the view instead of tearing the redraw.
#[derive(Clone)]
pub struct Screen {
    rows: usize,
    events: Arc<RwLock<VecDeque<String>>>,
}

impl Screen {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            events: Arc::new(RwLock::new(VecDeque::with_capacity(LOG_LINES))),
        }
    }

    pub fn read(&self) -> Vec<String> {
        match self.events.read() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn render(&self, watch: &Stopwatch) -> String {
        let mut frame = String::from(CLEAR_HOME);

        let state = if watch.is_idle() {
            "ready"
        } else if watch.is_running() {
            "running"
        } else {
            "paused"
        };

        let _ = writeln!(frame, "  {}  [{state}]", format_elapsed(watch.elapsed()));
        let _ = writeln!(frame, "  Lap: {}", format_elapsed(watch.lap_elapsed()));
        let _ = writeln!(
            frame,
            "  [enter] lap   [p] pause/resume   [r] reset   [q] quit"
        );
        let _ = writeln!(frame);

        // Newest lap on top, clipped to the visible row count.
        for lap in watch.laps().iter().rev().take(self.rows) {
            let _ = writeln!(
                frame,
                "  Lap {:<3} {}   {}",
                lap.number,
                format_elapsed(lap.duration),
                format_elapsed(lap.total)
            );
        }

        let events = self.read();
        if !events.is_empty() {
            let _ = writeln!(frame);
            for event in events {
                let _ = writeln!(frame, "  {event}");
            }
        }

        frame
    }
}

impl std::io::Write for Screen {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid utf-8"))?;
        let mut guard = self.events.write().unwrap_or_else(|e| {
            let mut guard = e.into_inner();
            guard.clear();
            guard
        });

        // Prevent the ring buffer from growing.
        if guard.len() == LOG_LINES {
            guard.pop_front();
        }

        guard.push_back(String::from(text.trim_end()));

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Screen {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
