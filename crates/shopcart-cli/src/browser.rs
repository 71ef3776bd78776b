//! Hands a URL to the desktop's default browser.

use std::io;
use std::process::Command;

pub(crate) trait BrowserLauncher {
    /// Opens `url`, returning once the platform opener has exited.
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Launches the platform opener: `open` on macOS, `start` on Windows,
/// `xdg-open` elsewhere.
pub(crate) struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut command = opener_command(url);
        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "{} exited with {status}",
                command.get_program().to_string_lossy()
            )))
        }
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else if cfg!(windows) {
        // The empty argument is the window title `start` expects first.
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}
