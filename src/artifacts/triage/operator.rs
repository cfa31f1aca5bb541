use crate::artifacts::core::error::VcError;
use derive_new::new;
use std::io::{BufRead, Write};

/// The person answering prompts.
pub trait Operator {
    /// Show `prompt` and wait for one line of input, returned without its line ending.
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String>;

    /// Show an informational line.
    fn tell(&mut self, message: &str) -> anyhow::Result<()>;

    /// Ask for an explicit `Y` before `action`; anything else is a no.
    fn confirm(&mut self, action: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("Type Y to confirm {action}: "))?;
        Ok(answer.trim() == "Y")
    }
}

/// Line-oriented operator over a reader and a writer, normally stdin/stdout.
#[derive(new)]
pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
}

impl TerminalOperator<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        TerminalOperator::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(VcError::InputClosed.into());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn tell(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn reads_one_line_per_prompt() -> anyhow::Result<()> {
        let mut output = Vec::new();
        let mut operator = TerminalOperator::new(Cursor::new("first\r\nsecond\n"), &mut output);

        assert_eq!(operator.ask("> ")?, "first");
        assert_eq!(operator.ask("> ")?, "second");
        drop(operator);

        assert_eq!(String::from_utf8(output)?, "> > ");
        Ok(())
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut operator = TerminalOperator::new(Cursor::new(""), Vec::new());

        let error = operator.ask("> ").unwrap_err();

        assert!(matches!(error.downcast_ref::<VcError>(), Some(VcError::InputClosed)));
    }

    #[test]
    fn only_an_explicit_yes_confirms() -> anyhow::Result<()> {
        let answers = ["Y", " Y ", "n", "", "y", "yes", "YES"];
        let mut operator = TerminalOperator::new(Cursor::new(answers.join("\n") + "\n"), Vec::new());

        let confirmed = answers
            .iter()
            .map(|_| operator.confirm("delete a.txt"))
            .collect::<anyhow::Result<Vec<_>>>()?;

        assert_eq!(confirmed, vec![true, true, false, false, false, false, false]);
        Ok(())
    }
}
