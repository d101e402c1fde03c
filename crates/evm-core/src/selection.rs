use crate::Voter;

/// The voter the operator is currently looking at.
///
/// Single slot, never persisted. Replaced wholesale on every select so the
/// has-voted flag always reflects the row that was last read from the store.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    voter: Option<Voter>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, voter: Voter) {
        self.voter = Some(voter);
    }

    pub fn clear(&mut self) {
        self.voter = None;
    }

    pub fn current(&self) -> Option<&Voter> {
        self.voter.as_ref()
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Voter> {
        self.voter.as_mut()
    }

    /// Whether the mark-voted action should be offered
    pub fn can_mark_voted(&self) -> bool {
        self.voter.as_ref().is_some_and(|v| !v.has_voted)
    }
}
