use crate::{
    api::error::display_chain,
    core::{
        invoice::{Invoice, Upload},
        merger::merge,
        pipeline::Outcome,
        ranking::{RankingEntry, SortKey, View},
    },
    prelude::*,
};

/// Identifies a submission attempt, so that responses to abandoned attempts can be told apart.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, derive_more::Display)]
pub struct Generation(u64);

impl Generation {
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[must_use]
#[derive(Debug, Default)]
pub enum Phase {
    #[default]
    Idle,

    /// The remote calls are in flight, the invoice is known once the analysis has succeeded.
    Submitting { invoice: Option<Invoice> },

    /// The invoice is analyzed. The ranking is empty if the comparison has failed.
    Success { invoice: Invoice, ranking: Vec<RankingEntry>, comparison_error: Option<String> },

    Failed { error: String },
}

/// Why a submission has not been started.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("no file is selected")]
    NoFileSelected,

    #[error("a submission is already in progress")]
    AlreadySubmitting,
}

#[must_use]
#[derive(Debug)]
pub struct Submission {
    pub generation: Generation,
    pub upload: Upload,
}

/// User-facing state of a single session.
///
/// All the transitions go through the methods below, so that, for example,
/// an error and a pending submission cannot coexist.
#[must_use]
#[derive(Debug, Default)]
pub struct Session {
    upload: Option<Upload>,
    generation: Generation,
    phase: Phase,
    filter: String,
    sort_key: SortKey,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the file for the next submission.
    ///
    /// A submission that is still in flight gets abandoned: its results will be discarded.
    pub fn select_file(&mut self, upload: Upload) {
        if self.is_submitting() {
            info!(generation = %self.generation, "abandoning the pending submission");
            self.generation = self.generation.next();
            self.phase = Phase::Idle;
        }
        self.upload = Some(upload);
    }

    /// Start a new submission, clearing the previous results.
    pub fn begin(&mut self) -> Result<Submission, ValidationError> {
        if self.is_submitting() {
            return Err(ValidationError::AlreadySubmitting);
        }
        let upload = self.upload.clone().ok_or(ValidationError::NoFileSelected)?;
        self.generation = self.generation.next();
        self.phase = Phase::Submitting { invoice: None };
        info!(generation = %self.generation, file_name = %upload.file_name, "submitting…");
        Ok(Submission { generation: self.generation, upload })
    }

    /// Record the analyzed invoice while the comparison is still pending.
    ///
    /// Returns `false` if the submission is stale and the invoice has been discarded.
    pub fn record_invoice(&mut self, generation: Generation, invoice: Invoice) -> bool {
        if !self.is_current(generation) {
            debug!(%generation, current = %self.generation, "discarding a stale invoice");
            return false;
        }
        self.phase = Phase::Submitting { invoice: Some(invoice) };
        true
    }

    /// Finish the submission.
    ///
    /// Returns `false` if the submission is stale and the outcome has been discarded.
    pub fn complete(&mut self, generation: Generation, outcome: Outcome) -> bool {
        if !self.is_current(generation) {
            debug!(%generation, current = %self.generation, "discarding a stale outcome");
            return false;
        }
        self.phase = match outcome {
            Outcome::Abandoned => {
                debug!(%generation, "the pipeline has stopped early, nothing to complete");
                return false;
            }
            Outcome::Succeeded { invoice, quotes } => {
                let ranking = merge(&invoice, quotes);
                info!(%generation, n_entries = ranking.len(), "ranked");
                Phase::Success { invoice, ranking, comparison_error: None }
            }
            Outcome::ComparisonFailed { invoice, error } => Phase::Success {
                invoice,
                ranking: Vec::new(),
                comparison_error: Some(display_chain(&error)),
            },
            Outcome::AnalysisFailed(error) => Phase::Failed { error: display_chain(&error) },
        };
        true
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub const fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub const fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// The invoice figures, available as soon as the analysis has succeeded.
    #[must_use]
    pub fn invoice(&self) -> Option<&Invoice> {
        match &self.phase {
            Phase::Submitting { invoice } => invoice.as_ref(),
            Phase::Success { invoice, .. } => Some(invoice),
            Phase::Idle | Phase::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn ranking(&self) -> &[RankingEntry] {
        match &self.phase {
            Phase::Success { ranking, .. } => ranking,
            _ => &[],
        }
    }

    /// Why the analysis has failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Why the ranking is missing despite the successful analysis.
    #[must_use]
    pub fn comparison_error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Success { comparison_error, .. } => comparison_error.as_deref(),
            _ => None,
        }
    }

    /// The ranking filtered and sorted according to the current settings.
    pub fn view(&self) -> View<'_> {
        View::derive(self.ranking(), &self.filter, self.sort_key)
    }

    fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation && self.is_submitting()
    }
}
