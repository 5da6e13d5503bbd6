use thiserror::Error;

use crate::journal::{InputJournal, InputPayload};
use crate::session::{Session, SessionError};
use crate::types::{Pos, Verdict};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("could not start the recorded session: {0}")]
    Setup(#[from] SessionError),
    #[error("recorded input {seq} was rejected: {source}")]
    Rejected { seq: u64, source: SessionError },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_pos: Pos,
    /// Verdict of the last accusation, if any was made.
    pub verdict: Option<Verdict>,
    pub solved: bool,
    pub snapshot_hash: u64,
    pub inputs_applied: usize,
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let mut session = Session::new(journal.seed, &journal.config)?;
    let mut verdict = None;

    for record in &journal.inputs {
        let rejected = |source| ReplayError::Rejected { seq: record.seq, source };
        match &record.payload {
            InputPayload::Move { direction } => {
                session.step(*direction).map_err(rejected)?;
            }
            InputPayload::Accuse { weapon } => {
                verdict = Some(session.accuse(weapon).map_err(rejected)?);
            }
        }
    }

    Ok(ReplayResult {
        final_pos: session.player(),
        verdict,
        solved: session.is_solved(),
        snapshot_hash: session.snapshot_hash(),
        inputs_applied: journal.inputs.len(),
    })
}
