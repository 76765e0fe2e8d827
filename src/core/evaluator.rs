use crate::models::{Candidate, CandidateId, Decision, MatchRecord};

/// Outcome of evaluating a decision against a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Rejections are never evaluated
    Skipped,
    NotMutual,
    Mutual,
}

impl MatchOutcome {
    pub fn is_mutual(&self) -> bool {
        matches!(self, MatchOutcome::Mutual)
    }
}

/// Decide whether a decision produces a mutual match
///
/// A match happens if and only if the decision is Like and the candidate
/// already liked the viewer.
#[inline]
pub fn evaluate(candidate: &Candidate, decision: Decision) -> MatchOutcome {
    match decision {
        Decision::Reject => MatchOutcome::Skipped,
        Decision::Like if candidate.liked_you => MatchOutcome::Mutual,
        Decision::Like => MatchOutcome::NotMutual,
    }
}

/// Append-only record of the session's mutual matches
#[derive(Debug, Clone, Default)]
pub struct MatchLedger {
    records: Vec<MatchRecord>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidate: &Candidate) -> &MatchRecord {
        self.records.push(MatchRecord::new(candidate.clone()));
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, candidate_id: CandidateId) -> bool {
        self.records.iter().any(|r| r.candidate.id == candidate_id)
    }
}
