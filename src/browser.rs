//! Opening source links in the system browser

use std::io;
use std::process::{Command, Stdio};

use crate::app::form::is_valid_http_url;

/// Hand an http(s) link to the platform opener without waiting for it
pub fn open_url(url: &str) -> io::Result<()> {
    if !is_valid_http_url(url) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not an http(s) link: {}", url),
        ));
    }

    let mut command = opener();
    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn opener() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener() -> Command {
    Command::new("xdg-open")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuses_non_http_links() {
        let err = open_url("javascript:alert(1)").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
