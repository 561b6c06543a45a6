use crate::geometry::Rect;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const GESTURES_LOG_FILE: &str = "gestures_log.csv";

/// Appends one CSV line per completed gesture.
///
/// The file is opened lazily on the first gesture so that a disabled log
/// never touches the disk.
#[derive(Debug)]
pub struct GestureLogger {
    path: PathBuf,
    file: Option<File>,
    count: u64,
    start_name: String,
    start_rect: Rect,
}

impl GestureLogger {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(GESTURES_LOG_FILE),
            file: None,
            count: 0,
            start_name: String::new(),
            start_rect: Rect::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of gestures written since creation.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn start_gesture(&mut self, name: &str, area: Rect) -> anyhow::Result<()> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }
        self.start_name = name.to_string();
        self.start_rect = area;
        Ok(())
    }

    pub fn end_gesture(
        &mut self,
        name: &str,
        command: &str,
        area: Rect,
        menu_shown: bool,
    ) -> anyhow::Result<()> {
        let Some(file) = self.file.as_mut() else {
            anyhow::bail!("gesture log not started");
        };
        self.count += 1;
        let now = Local::now();
        let s = &self.start_rect;
        writeln!(
            file,
            "{}, {}, {}, {}, {}, {}, {}, {:.3}, {:.3}, {:.3}, {:.3}, => , {:.3}, {:.3}, {:.3}, {:.3}",
            self.count,
            now.format("%Y-%m-%d"),
            now.format("%H:%M:%S"),
            u8::from(menu_shown),
            self.start_name,
            name,
            command,
            s.x,
            s.y,
            s.width,
            s.height,
            area.x,
            area.y,
            area.width,
            area.height,
        )?;
        file.flush()?;
        Ok(())
    }
}
