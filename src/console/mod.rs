//! Line-oriented participant input.
//!
//! The trial engine never touches stdin directly: everything it shows or asks
//! goes through [`Console`], so sessions can be driven from scripted input.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Show a line of text.
    fn say(&mut self, message: &str) -> Result<()>;

    /// Show `prompt` and block until a line is entered. The returned text has
    /// its line ending removed but is otherwise untouched.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// [`Console`] over any line reader and writer. Closing the input is an error.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("failed to write to console")?;
        self.output.flush().context("failed to flush console")
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush console")?;

        // Bytes that are not UTF-8 are still an answer, just an unusable one.
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .context("failed to read participant input")?;
        if read == 0 {
            bail!("input stream closed");
        }

        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
