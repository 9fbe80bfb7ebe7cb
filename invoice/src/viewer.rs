use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens an image for the user to look at.
pub trait ImageViewer {
    fn open(&mut self, path: &Path) -> io::Result<()>;
}

impl<F> ImageViewer for F
where
    F: FnMut(&Path) -> io::Result<()>,
{
    fn open(&mut self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// Hands the file to the desktop's default application.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl ImageViewer for SystemViewer {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }

        let mut command = opener();
        command
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // The opener returns once the file is handed over, the viewer keeps running.
        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("the opener exited with {}", status),
            ))
        }
    }
}

#[cfg(target_os = "windows")]
fn opener() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(target_os = "macos")]
fn opener() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener() -> Command {
    Command::new("xdg-open")
}
