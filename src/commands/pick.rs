//! Pick command - interactive commander selection
//!
//! Drives a [`SelectionSession`] from terminal prompts. Letters are typed a
//! chunk at a time; once the candidate set is small enough the names are
//! offered in a list. Partner prompts are plain yes/no questions.

use crate::{
    FetchrError,
    output,
    search::SearchEngine,
    session::{Phase, PickTarget, SelectionSession},
};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tracing::debug;

type Result<T> = std::result::Result<T, FetchrError>;

/// Typed on its own, cancels the pick
pub const CANCEL_INPUT: &str = "!";

const KEEP_TYPING: &str = "(keep typing)";

/// Answer to a candidate list prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Pick the candidate at this index
    Pick(usize),
    /// Go back to typing letters
    TypeMore,
    /// Abandon the session
    Cancel,
}

/// Source of user answers for a pick
///
/// Abstracts the terminal so the pick flow can be driven by scripted answers.
pub trait Prompter {
    /// Read a chunk of letters; an empty string erases one letter
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn letters(&mut self, prompt: &str) -> Result<String>;

    /// Choose among candidate names
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn choose(&mut self, prompt: &str, names: &[String]) -> Result<Choice>;

    /// Ask a yes/no question
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal prompts via `dialoguer`
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn letters(&mut self, prompt: &str) -> Result<String> {
        let input: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(input)
    }

    fn choose(&mut self, prompt: &str, names: &[String]) -> Result<Choice> {
        let mut items: Vec<&str> = names.iter().map(String::as_str).collect();
        items.push(KEEP_TYPING);

        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(match selection {
            Some(i) if i < names.len() => Choice::Pick(i),
            Some(_) => Choice::TypeMore,
            None => Choice::Cancel,
        })
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()?)
    }
}

/// Run one pick to completion
///
/// Returns the composite name, or `None` if the user cancelled.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn run(
    engine: &SearchEngine,
    prompter: &mut impl Prompter,
    list_threshold: usize,
    quiet: bool,
) -> Result<Option<String>> {
    let mut session = SelectionSession::new(engine);

    loop {
        match session.phase().clone() {
            Phase::Typing(target) => typing_step(&mut session, target, prompter, list_threshold, quiet)?,
            Phase::ConfirmFixedPartner(partner) => {
                let accept = prompter.confirm(&format!("Add partner {partner}?"))?;
                session.answer(accept)?;
            }
            Phase::OfferOpenChoice => {
                let accept = prompter.confirm("Choose a partner?")?;
                session.answer(accept)?;
            }
            Phase::Resolved(composite) => return Ok(Some(composite)),
            Phase::Cancelled => return Ok(None),
        }
    }
}

fn typing_step(
    session: &mut SelectionSession<'_>,
    target: PickTarget,
    prompter: &mut impl Prompter,
    list_threshold: usize,
    quiet: bool,
) -> Result<()> {
    let label = match target {
        PickTarget::Primary => "Commander",
        PickTarget::Partner => "Partner",
    };

    let count = session.candidates().len();
    if !session.query().is_empty() && count > 0 && count <= list_threshold {
        let names: Vec<String> = session
            .filtered_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        match prompter.choose(label, &names)? {
            Choice::Pick(i) => {
                if let Some(name) = names.get(i) {
                    session.pick(name)?;
                }
                return Ok(());
            }
            Choice::Cancel => {
                session.cancel()?;
                return Ok(());
            }
            Choice::TypeMore => {}
        }
    }

    let prompt = if session.query().is_empty() {
        label.to_string()
    } else {
        format!("{label} [{}] ({count} match(es))", session.query())
    };
    let input = prompter.letters(&prompt)?;

    if input == CANCEL_INPUT {
        session.cancel()?;
    } else if input.is_empty() {
        session.remove_last_char()?;
    } else {
        session.append_str(&input)?;
        if session.candidates().is_empty() {
            debug!(query = session.query(), "No candidates, rewinding");
            for _ in input.chars() {
                session.remove_last_char()?;
            }
            if !quiet {
                eprintln!("{}", output::no_results(&input));
            }
        }
    }
    Ok(())
}

/// Execute the pick command
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn execute(engine: &SearchEngine, list_threshold: usize, quiet: bool) -> Result<()> {
    let mut prompter = DialoguerPrompter::new();
    match run(engine, &mut prompter, list_threshold, quiet)? {
        Some(composite) => println!("{}", output::selection_line(&composite, quiet)),
        None => {
            if !quiet {
                eprintln!("Selection cancelled");
            }
        }
    }
    Ok(())
}
