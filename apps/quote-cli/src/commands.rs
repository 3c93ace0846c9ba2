//! Line commands read from stdin.

use anyhow::{anyhow, bail, Context, Result};

pub const HELP: &str = "\
commands:
  plan <key>     select a plan as a pricing card would (scroll + flash)
  select <key>   select a plan inside the estimator
  inc | dec      step the page count
  pages <n>      set the page count directly (clamped to 1..=30)
  toggle <key>   flip an option
  show           print the breakdown and summary
  contact        push the summary and go to the contact form
  help           show this text
  quit           exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Plan(String),
    Select(String),
    Inc,
    Dec,
    Pages(i64),
    Toggle(String),
    Show,
    Contact,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match name {
            "plan" => Command::Plan(required(name, arg)?),
            "select" => Command::Select(required(name, arg)?),
            "inc" | "+" => Command::Inc,
            "dec" | "-" => Command::Dec,
            "pages" => {
                let raw = required(name, arg)?;
                let pages = raw
                    .parse::<i64>()
                    .with_context(|| format!("pages expects a number, got {:?}", raw))?;
                Command::Pages(pages)
            }
            "toggle" => Command::Toggle(required(name, arg)?),
            "show" => Command::Show,
            "contact" => Command::Contact,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {:?} (try `help`)", other),
        };

        Ok(Some(command))
    }
}

fn required(name: &str, arg: Option<&str>) -> Result<String> {
    arg.map(str::to_string)
        .ok_or_else(|| anyhow!("`{}` needs an argument", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("plan premium").unwrap(), Some(Command::Plan("premium".into())));
        assert_eq!(Command::parse("  inc ").unwrap(), Some(Command::Inc));
        assert_eq!(Command::parse("pages -4").unwrap(), Some(Command::Pages(-4)));
        assert_eq!(Command::parse("toggle seo").unwrap(), Some(Command::Toggle("seo".into())));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("plan").is_err());
        assert!(Command::parse("pages many").is_err());
        assert!(Command::parse("checkout").is_err());
    }
}
