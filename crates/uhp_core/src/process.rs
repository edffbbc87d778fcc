//! Non-blocking line transport over a child process's pipes.

use std::io::{self, Read, Write};
#[cfg(unix)]
use std::os::fd::AsRawFd;
use std::process::{ChildStdin, ChildStdout};

use crate::EngineIo;

/// [`EngineIo`] over a spawned engine's standard input/output.
///
/// The read end is switched to non-blocking mode so the channel's polling
/// loop can enforce deadlines without a reader thread. Bytes are buffered
/// until a full newline-terminated line is available; a partial line left
/// behind by a timed-out read stays buffered for the next poll.
pub struct ProcessIo {
    stdin: ChildStdin,
    stdout: ChildStdout,
    pending: Vec<u8>,
    eof: bool,
}

impl ProcessIo {
    pub fn new(stdin: ChildStdin, stdout: ChildStdout) -> io::Result<Self> {
        set_nonblocking(&stdout)?;
        Ok(Self {
            stdin,
            stdout,
            pending: Vec::new(),
            eof: false,
        })
    }

    /// Drain whatever the process has written so far into the buffer.
    fn fill(&mut self) -> io::Result<()> {
        let mut buf = [0u8; 4096];
        loop {
            match self.stdout.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => self.pending.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

impl EngineIo for ProcessIo {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()
    }

    fn poll_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }
        if !self.eof {
            self.fill()?;
        }
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }
        if self.eof {
            // A closed stream can never terminate a message.
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "engine closed its output stream",
            ));
        }
        Ok(None)
    }
}

#[cfg(unix)]
fn set_nonblocking(stdout: &ChildStdout) -> io::Result<()> {
    let fd = stdout.as_raw_fd();
    // SAFETY: fcntl on a descriptor we own; no pointers involved.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_nonblocking(_stdout: &ChildStdout) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "non-blocking engine pipes are only supported on unix",
    ))
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod process_tests;
