//! Profile picture selection: endpoint paths and the submission state
//! machine.

use crate::error::FlowError;

/// A candidate picked in the chooser. All three ids are opaque and inserted
/// into paths verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PictureChoice {
    pub entity_id: String,
    pub entity_type: String,
    pub file_id: String,
}

impl PictureChoice {
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        file_id: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            file_id: file_id.into(),
        }
    }

    pub fn submit_path(&self) -> String {
        format!(
            "/{}/{}/set-profile-picture/{}",
            self.entity_type, self.entity_id, self.file_id
        )
    }

    /// Page that renders the entity, including its profile picture section.
    pub fn entity_path(&self) -> String {
        format!("/{}/{}", self.entity_type, self.entity_id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionState {
    /// As rendered by the server at page load.
    Pristine,
    Loading,
    Updated,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    ChooserOpen,
    Submitting { ticket: u64, choice: PictureChoice },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Reconciled,
    ReloadFallback,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

impl SubmitTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct PictureFlow {
    phase: FlowPhase,
    section: SectionState,
    next_ticket: u64,
}

impl PictureFlow {
    pub fn new() -> Self {
        Self {
            phase: FlowPhase::Idle,
            section: SectionState::Pristine,
            next_ticket: 1,
        }
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn section(&self) -> SectionState {
        self.section
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, FlowPhase::Submitting { .. })
    }

    pub fn open_chooser(&mut self) -> Result<(), FlowError> {
        if self.in_flight() {
            return Err(FlowError::InFlight);
        }
        self.phase = FlowPhase::ChooserOpen;
        Ok(())
    }

    /// Starts a submission. Allowed from `Idle` too, since the global entry
    /// point can submit without going through the chooser.
    pub fn begin_submit(&mut self, choice: PictureChoice) -> Result<SubmitTicket, FlowError> {
        if self.in_flight() {
            return Err(FlowError::InFlight);
        }
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.saturating_add(1);
        self.phase = FlowPhase::Submitting { ticket, choice };
        self.section = SectionState::Loading;
        Ok(SubmitTicket(ticket))
    }

    pub fn complete(&mut self, ticket: SubmitTicket, completion: Completion) -> Result<(), FlowError> {
        match &self.phase {
            FlowPhase::Submitting { ticket: current, .. } if *current == ticket.0 => {}
            _ => return Err(FlowError::StaleTicket { found: ticket.0 }),
        }
        self.phase = FlowPhase::Idle;
        self.section = match completion {
            Completion::Reconciled => SectionState::Updated,
            // The page is about to reload; the placeholder stays until then.
            Completion::ReloadFallback => SectionState::Loading,
            Completion::Failed => SectionState::Failed,
        };
        Ok(())
    }
}

impl Default for PictureFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    Replace(String),
    Reload,
}

/// Decides how to apply a refreshed page: substitute the fetched section's
/// inner markup when both the fetched and the live section exist, otherwise
/// reload the whole page.
pub fn reconcile(fetched_section: Option<String>, live_section_present: bool) -> Reconciliation {
    match fetched_section {
        Some(inner) if live_section_present => Reconciliation::Replace(inner),
        _ => Reconciliation::Reload,
    }
}

impl From<&Reconciliation> for Completion {
    fn from(reconciliation: &Reconciliation) -> Self {
        match reconciliation {
            Reconciliation::Replace(_) => Completion::Reconciled,
            Reconciliation::Reload => Completion::ReloadFallback,
        }
    }
}
