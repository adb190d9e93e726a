//! Interactive prompts
//!
//! Each question is asked until the answer parses. End of input is
//! reported as an `UnexpectedEof` I/O error so callers can stop cleanly.

use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;

use lineup_core::{LineupError, Result};

pub const FORMATION_PROMPT: &str = "Formation: ";
pub const SORT_PROMPT: &str = "Sort by? \n1 for by Skill \n2 for by Age \n3 for by random\nEnter: ";
pub const ORIENTATION_PROMPT: &str = "1. Forward oriented 2. Midfielder oriented\nEnter: ";
pub const AGE_PROMPT: &str = "By young or old? \n1 for young \n2 for old\nEnter: ";

/// Line-based question/answer over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Answers show up on the output (a terminal echoes what is typed)
    echoed: bool,
    /// The last question is still waiting for a line ending
    mid_line: bool,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let echoed = stdin.is_terminal();
        Self {
            echoed,
            ..Self::new(stdin.lock(), io::stdout())
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter over input that is not echoed back, such as a pipe
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echoed: false,
            mid_line: false,
        }
    }

    /// Ask once and return the answer without its line ending
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.output.write_all(question.as_bytes())?;
        self.output.flush()?;
        self.mid_line = !question.ends_with('\n');

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input").into());
        }
        if self.echoed && line.ends_with('\n') {
            self.mid_line = false;
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// End a prompt line left open, so a following message starts on its own line
    pub fn finish_line(&mut self) -> Result<()> {
        if self.mid_line {
            self.output.write_all(b"\n")?;
            self.output.flush()?;
            self.mid_line = false;
        }
        Ok(())
    }

    /// Ask until the answer parses
    pub fn ask_until_valid<T>(&mut self, question: &str) -> Result<T>
    where
        T: FromStr<Err = LineupError>,
    {
        loop {
            let answer = self.ask(question)?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(e) => tracing::debug!("Rejected answer: {}", e),
            }
        }
    }
}

/// Whether an error means the user closed the input
pub fn is_end_of_input(err: &LineupError) -> bool {
    matches!(err, LineupError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}
