use std::{
    cell::{Ref, RefCell},
    ops::ControlFlow,
};

use crate::{
    api::{analyzer::InvoiceAnalyzer, comparator::TariffComparator},
    core::{
        invoice::Upload,
        pipeline,
        ranking::SortKey,
        session::{Session, Submission},
    },
    prelude::*,
};

/// Drives the session through the remote calls on user actions.
///
/// Meant for a single-threaded executor: the session is borrowed only between the awaits,
/// so that the user actions may interleave with a pending submission.
pub struct Orchestrator<A, C> {
    analyzer: A,
    comparator: C,
    session: RefCell<Session>,
}

impl<A: InvoiceAnalyzer, C: TariffComparator> Orchestrator<A, C> {
    pub fn new(analyzer: A, comparator: C) -> Self {
        Self { analyzer, comparator, session: RefCell::new(Session::new()) }
    }

    pub fn select_file(&self, upload: Upload) {
        self.session.borrow_mut().select_file(upload);
    }

    pub fn set_filter(&self, filter: impl Into<String>) {
        self.session.borrow_mut().set_filter(filter);
    }

    pub fn set_sort_key(&self, sort_key: SortKey) {
        self.session.borrow_mut().set_sort_key(sort_key);
    }

    /// Submit the selected file.
    ///
    /// Does nothing if no file is selected, or another submission is in progress.
    /// Failures end up in the session and are never returned.
    pub async fn submit(&self) {
        let begun = self.session.borrow_mut().begin();
        let Submission { generation, upload } = match begun {
            Ok(submission) => submission,
            Err(error) => {
                debug!("ignoring the submission: {error}");
                return;
            }
        };
        let outcome = pipeline::run(&self.analyzer, &self.comparator, &upload, |invoice| {
            if self.session.borrow_mut().record_invoice(generation, invoice.clone()) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .await;
        if !self.session.borrow_mut().complete(generation, outcome) {
            info!(%generation, "the submission has been superseded");
        }
    }

    pub fn session(&self) -> Ref<'_, Session> {
        self.session.borrow()
    }
}
