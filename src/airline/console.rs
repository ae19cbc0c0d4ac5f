use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

/// Line-oriented terminal: prompts and menus go to `out`, failures to `err`.
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }

    /// # Errors
    /// Returns any error from the output stream.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    /// Report a failure on the error stream. Write failures are ignored.
    pub fn report(&mut self, message: &str) {
        let _ = writeln!(self.err, "{message}");
        let _ = self.err.flush();
    }

    /// Print `label` without a newline and read one line, without its line ending.
    ///
    /// # Errors
    /// Returns `io::ErrorKind::UnexpectedEof` when input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
    }

    /// Like [`prompt`](Console::prompt), with surrounding whitespace removed.
    ///
    /// # Errors
    /// Returns `io::ErrorKind::UnexpectedEof` when input is exhausted.
    pub fn prompt_trimmed(&mut self, label: &str) -> io::Result<String> {
        self.prompt(label).map(|s| s.trim().to_string())
    }

    /// Ask for a menu choice until the answer parses as an integer. `None` at end of input.
    ///
    /// # Errors
    /// Returns any error from the underlying streams.
    pub fn read_choice(&mut self) -> io::Result<Option<i64>> {
        loop {
            write!(self.out, "Please make your choice: ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => writeln!(self.out, "Your input is invalid!")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>, Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new(), Vec::new())
    }

    #[test]
    fn invalid_choices_are_reprompted() {
        let mut c = console("abc\n\n 7 \n");
        assert_eq!(c.read_choice().unwrap(), Some(7));
        let (_, out, _) = c.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Please make your choice: ").count(), 3);
        assert_eq!(out.matches("Your input is invalid!").count(), 2);
    }

    #[test]
    fn end_of_input_ends_choice_and_prompt() {
        let mut c = console("");
        assert_eq!(c.read_choice().unwrap(), None);
        let err = c.prompt("Enter username: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn prompts_strip_line_endings_only() {
        let mut c = console("  alice \r\n  F100  \n");
        assert_eq!(c.prompt("Enter username: ").unwrap(), "  alice ");
        assert_eq!(c.prompt_trimmed("Enter flight number: ").unwrap(), "F100");
        c.report("boom");
        let (_, out, err) = c.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter username: Enter flight number: "
        );
        assert_eq!(String::from_utf8(err).unwrap(), "boom\n");
    }
}
