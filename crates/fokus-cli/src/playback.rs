//! Playback sinks for the terminal.
//!
//! A terminal cannot play PCM directly, so cues are either written out as
//! WAV files for an external player or reduced to the terminal bell.

use std::io::Write;
use std::path::PathBuf;

use fokus_core::{AudioClip, Playback};

pub struct TerminalPlayback {
    cue_dir: Option<PathBuf>,
    bell: bool,
    written: usize,
}

impl TerminalPlayback {
    pub fn new(cue_dir: Option<PathBuf>, bell: bool) -> Self {
        Self {
            cue_dir,
            bell,
            written: 0,
        }
    }

    fn write_clip(&mut self, clip: &AudioClip) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let Some(dir) = &self.cue_dir else {
            return Err("no cue directory".into());
        };
        std::fs::create_dir_all(dir)?;
        self.written += 1;
        let path = dir.join(format!("cue-{:04}.wav", self.written));
        std::fs::write(&path, clip.to_wav()?)?;
        Ok(path)
    }
}

impl Playback for TerminalPlayback {
    fn play(&mut self, clip: &AudioClip) {
        if self.cue_dir.is_some() {
            match self.write_clip(clip) {
                Ok(path) => tracing::debug!(path = %path.display(), "cue written"),
                Err(e) => tracing::warn!(error = %e, "failed to write cue"),
            }
        }
        if self.bell {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(b"\x07");
            let _ = stderr.flush();
        }
    }
}
