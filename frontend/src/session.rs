use std::fmt;

use crate::error::{Error, Result};

#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Loading,
    Editing,
    Saving,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditState::Viewing => "viewing",
            EditState::Loading => "loading",
            EditState::Editing => "editing",
            EditState::Saving => "saving",
        };
        f.write_str(name)
    }
}

/// Handed out when a network round trip starts; the response is only
/// applied if the session is still on the same activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Edit lifecycle of a single post.
///
/// `Viewing -> Loading -> Editing -> Saving -> Viewing` on the success path,
/// `Loading | Editing -> Viewing` on cancel. Every activation and every
/// cancel starts a new generation, so a response for an abandoned
/// activation is reported as [`Error::StaleResponse`] instead of being
/// applied.
#[derive(Debug)]
pub struct EditSession {
    state: EditState,
    generation: u64,
    prior_html: Option<String>,
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        EditSession {
            state: EditState::Viewing,
            generation: 0,
            prior_html: None,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            state: self.state,
            action,
        }
    }

    fn check(&self, ticket: Ticket, expected: EditState) -> Result<()> {
        if ticket.0 != self.generation || self.state != expected {
            return Err(Error::StaleResponse {
                ticket: ticket.0,
                current: self.generation,
            });
        }
        Ok(())
    }

    /// `Viewing -> Loading`, keeping the body's rendered HTML for cancel.
    pub fn begin(&mut self, prior_html: String) -> Result<Ticket> {
        if self.state != EditState::Viewing {
            return Err(self.invalid("edit"));
        }
        self.generation += 1;
        self.state = EditState::Loading;
        self.prior_html = Some(prior_html);
        Ok(Ticket(self.generation))
    }

    /// `Loading -> Editing` once the raw text has arrived.
    pub fn loaded(&mut self, ticket: Ticket) -> Result<()> {
        self.check(ticket, EditState::Loading)?;
        self.state = EditState::Editing;
        Ok(())
    }

    /// Whether a failed load for `ticket` may still be shown to the user.
    pub fn is_current(&self, ticket: Ticket, state: EditState) -> bool {
        self.check(ticket, state).is_ok()
    }

    /// `Editing -> Saving`.
    pub fn start_save(&mut self) -> Result<Ticket> {
        if self.state != EditState::Editing {
            return Err(self.invalid("save"));
        }
        self.state = EditState::Saving;
        Ok(Ticket(self.generation))
    }

    /// `Saving -> Viewing`; the snapshot is dropped since the body now shows
    /// the saved text.
    pub fn saved(&mut self, ticket: Ticket) -> Result<()> {
        self.check(ticket, EditState::Saving)?;
        self.state = EditState::Viewing;
        self.prior_html = None;
        Ok(())
    }

    /// `Saving -> Editing`, so the user can retry or cancel.
    pub fn save_failed(&mut self, ticket: Ticket) -> Result<()> {
        self.check(ticket, EditState::Saving)?;
        self.state = EditState::Editing;
        Ok(())
    }

    /// `Loading | Editing -> Viewing`, returning the HTML to restore.
    pub fn cancel(&mut self) -> Result<String> {
        match self.state {
            EditState::Loading | EditState::Editing => {}
            EditState::Viewing | EditState::Saving => return Err(self.invalid("cancel")),
        }
        self.generation += 1;
        self.state = EditState::Viewing;
        Ok(self.prior_html.take().unwrap_or_default())
    }
}
