use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Platform command that hands `url` to the default browser or mail client.
fn opener(url: &str) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // The empty argument is the window title `start` expects first
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command.arg(url);
    command
}

/// Opens a web link, a `mailto:` URI or a local file with the system handler.
/// Does not wait for the handler to exit.
pub fn open_url(url: &str) -> Result<()> {
    let mut command = opener(url);
    let program = command.get_program().to_string_lossy().into_owned();
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch {} for {}", program, url))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_passed_as_last_argument() {
        let uri = "mailto:me@example.com?subject=New%20message%20from%20Ada";
        let command = opener(uri);
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some(uri));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(opener("https://example.com").get_program(), "xdg-open");
        assert_eq!(opener("https://example.com").get_args().count(), 1);
    }
}
