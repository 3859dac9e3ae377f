use std::process::{Child, Command, Stdio};

/// Seam to the text-to-speech collaborator.
pub trait Announcer {
    fn announce(&mut self, text: &str);
}

pub fn lap_announcement(lap: u32) -> String {
    format!("Starting Lap {lap}")
}

/// Speaks announcements by spawning an external text-to-speech program.
/// If the previous utterance is still playing the new one is dropped.
pub struct Speech {
    program: String,
    current: Option<Child>,
}

impl Speech {
    pub fn new(program: String) -> Self {
        Self {
            program,
            current: None,
        }
    }

    fn speaking(&mut self) -> bool {
        let Some(child) = self.current.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) => {
                self.current = None;
                false
            }
            Err(e) => {
                tracing::warn!(%e, "failed to poll the speech process");
                self.current = None;
                false
            }
        }
    }
}

impl Announcer for Speech {
    fn announce(&mut self, text: &str) {
        if self.speaking() {
            tracing::debug!(text, "dropped announcement while speaking");
            return;
        }

        match Command::new(&self.program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.current = Some(child),
            Err(e) => {
                tracing::warn!(%e, program = %self.program, "failed to spawn the speech program")
            }
        }
    }
}

impl Drop for Speech {
    fn drop(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

pub struct Silent;

impl Announcer for Silent {
    fn announce(&mut self, _: &str) {}
}
