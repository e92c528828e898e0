use std::ops::ControlFlow;

use crate::{
    api::{
        analyzer::InvoiceAnalyzer,
        comparator::TariffComparator,
        error::{AnalysisError, ComparisonError, display_chain},
    },
    core::{
        invoice::{Invoice, Upload},
        tariff::TariffQuote,
    },
    prelude::*,
};

/// Result of running an upload through the analyzer and then the comparator.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to show, the comparison has not been attempted.
    AnalysisFailed(AnalysisError),

    /// The invoice is still meaningful on its own.
    ComparisonFailed { invoice: Invoice, error: ComparisonError },

    Succeeded { invoice: Invoice, quotes: Vec<TariffQuote> },

    /// Stopped after the analysis because nobody is waiting for the result anymore.
    Abandoned,
}

/// Analyze the upload, then compare the tariffs against the resulting invoice.
///
/// The calls are strictly sequential. `on_analyzed` is called in between, before the comparison is issued,
/// and may break to skip the comparison.
#[instrument(skip_all, fields(file_name = %upload.file_name))]
pub async fn run<A, C>(
    analyzer: &A,
    comparator: &C,
    upload: &Upload,
    on_analyzed: impl FnOnce(&Invoice) -> ControlFlow<()>,
) -> Outcome
where
    A: InvoiceAnalyzer + ?Sized,
    C: TariffComparator + ?Sized,
{
    let invoice = match analyzer.analyze(upload).await {
        Ok(invoice) => invoice,
        Err(error) => {
            error!("{}", display_chain(&error));
            return Outcome::AnalysisFailed(error);
        }
    };
    if on_analyzed(&invoice).is_break() {
        debug!("not comparing the tariffs");
        return Outcome::Abandoned;
    }

    match comparator.compare(&invoice).await {
        Ok(quotes) => Outcome::Succeeded { invoice, quotes },
        Err(error) => {
            warn!("{}", display_chain(&error));
            Outcome::ComparisonFailed { invoice, error }
        }
    }
}
