//! Line-oriented front-end over the note manager.
//!
//! One command per line; the current view is printed after each command.
//! Destructive actions prompt with `[y/N]` on the same input stream.

use log::debug;
use notebox_core::{Clock, KeyValueRepository, NoteChange, NoteManager, Outcome, View};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
commands:
  list                 show the current view
  new                  start a new note
  select <n>           highlight note n
  deselect             clear the highlight
  inspect | edit       open the highlighted note
  delete               remove the highlighted note
  title <text>         set the title field
  contents <text>      set the contents field (\\n for new lines)
  save | cancel        close the open note
  help | quit";

/// Parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Select(usize),
    Deselect,
    Inspect,
    Edit,
    Delete,
    Title(String),
    Contents(String),
    Save,
    Cancel,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let command = match word.to_ascii_lowercase().as_str() {
            "" | "list" | "ls" => Self::List,
            "new" => Self::New,
            "select" | "sel" => {
                let position: usize = rest
                    .trim()
                    .parse()
                    .map_err(|_| format!("expected a note number, got `{}`", rest.trim()))?;
                Self::Select(position)
            }
            "deselect" => Self::Deselect,
            "inspect" | "view" => Self::Inspect,
            "edit" => Self::Edit,
            "delete" | "rm" => Self::Delete,
            "title" => Self::Title(rest.to_string()),
            "contents" | "body" => Self::Contents(rest.replace("\\n", "\n")),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{other}`; try `help`")),
        };
        Ok(command)
    }
}

/// Interactive session bound to an input and an output stream.
pub struct Shell<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Shell<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Runs commands until `quit` or end of input.
    pub fn run<R: KeyValueRepository, C: Clock>(
        &mut self,
        manager: &mut NoteManager<R, C>,
    ) -> io::Result<()> {
        log_changes(manager.take_changes());
        render(&mut self.output, &manager.view())?;

        while let Some(line) = self.read_line()? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(self.output, "{HELP}")?;
                    continue;
                }
                Command::List => Outcome::Applied,
                Command::New => manager.new_note(),
                Command::Select(position) => match position.checked_sub(1) {
                    Some(index) => manager.select_index(index),
                    None => Outcome::Ignored,
                },
                Command::Deselect => manager.clear_selection(),
                Command::Inspect => manager.inspect(),
                Command::Edit => manager.edit(),
                Command::Delete => manager.delete(|prompt: &str| self.ask(prompt)),
                Command::Title(text) => manager.set_title(text),
                Command::Contents(text) => manager.set_contents(text),
                Command::Save => manager.save(),
                Command::Cancel => manager.cancel(|prompt: &str| self.ask(prompt)),
            };

            match outcome {
                Outcome::Applied => {}
                Outcome::Ignored => writeln!(self.output, "(not available right now)")?,
                Outcome::Declined => writeln!(self.output, "(kept)")?,
            }
            log_changes(manager.take_changes());
            render(&mut self.output, &manager.view())?;
        }

        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Yes/no prompt; anything but an explicit yes declines.
    fn ask(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn log_changes(changes: Vec<NoteChange>) {
    for change in changes {
        match change {
            NoteChange::Added { index, id } => {
                debug!("event=list_sync module=cli status=ok change=added index={index} id={id}")
            }
            NoteChange::Edited { index, id } => {
                debug!("event=list_sync module=cli status=ok change=edited index={index} id={id}")
            }
            NoteChange::Removed { index, id } => {
                debug!("event=list_sync module=cli status=ok change=removed index={index} id={id}")
            }
        }
    }
}

fn render(out: &mut impl Write, view: &View) -> io::Result<()> {
    writeln!(out, "== {} ==", view.title_bar)?;

    if view.list_visible {
        if view.items.is_empty() {
            writeln!(out, "  (no notes yet)")?;
        }
        for (position, item) in view.items.iter().enumerate() {
            let marker = if item.selected { '>' } else { ' ' };
            writeln!(
                out,
                "{marker} {:>2}. {:<32} {}",
                position + 1,
                item.title,
                item.created_label
            )?;
        }
    }

    if let Some(detail) = &view.detail {
        writeln!(out, "title:    {}", detail.title)?;
        writeln!(out, "contents:")?;
        for line in detail.contents.lines() {
            writeln!(out, "  {line}")?;
        }
        if let (Some(created), Some(modified)) = (&detail.created_label, &detail.modified_label) {
            writeln!(out, "created:  {created}")?;
            writeln!(out, "modified: {modified}")?;
        }
        if detail.read_only {
            writeln!(out, "[read-only]")?;
        }
    }

    let actions = view.actions;
    let enabled: Vec<&str> = [
        (actions.new, "new"),
        (actions.inspect, "inspect"),
        (actions.edit, "edit"),
        (actions.delete, "delete"),
        (actions.save, "save"),
        (actions.cancel, "cancel"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    writeln!(out, "actions: {}", enabled.join(" "))
}
