use std::io::{BufRead, Write};

/// Interactive prompt helper over an arbitrary reader and writer pair.
///
/// Commands take a [`Prompter`] instead of talking to stdin directly, so a
/// whole wizard can be driven from a byte buffer in tests.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<std::io::StdinLock<'static>, std::io::Stdout> {
    /// A prompter over the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prompt for a line of text. Empty input takes the default.
    pub fn prompt_string(&mut self, text: &str, default: &str) -> std::io::Result<String> {
        if default.is_empty() {
            write!(self.writer, "{text}: ")?;
        } else {
            write!(self.writer, "{text} [{default}]: ")?;
        }
        self.writer.flush()?;

        let line = self.read_line()?;
        if line.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(line)
        }
    }

    /// Prompt for a non-negative number. Empty input takes the default,
    /// anything unparseable is asked again.
    pub fn prompt_u64(&mut self, text: &str, default: u64) -> std::io::Result<u64> {
        loop {
            write!(self.writer, "{text} [{default}]: ")?;
            self.writer.flush()?;

            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.writer, "Please enter a number")?,
            }
        }
    }

    /// Ask a yes/no question. Empty input takes the default, anything other
    /// than a yes/no answer is asked again.
    pub fn confirm(&mut self, text: &str, default: bool) -> std::io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.writer, "{text} [{hint}]: ")?;
            self.writer.flush()?;

            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.writer, "Please answer y or n")?,
            }
        }
    }

    fn read_line(&mut self) -> std::io::Result<String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "Input closed while waiting for an answer",
            ));
        }

        Ok(line.trim().to_string())
    }
}
