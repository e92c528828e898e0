use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::ServiceArgs,
    core::{invoice::Upload, ranking::SortKey, session::Phase},
    prelude::*,
    tables::{build_invoice_table, build_ranking_table},
};

#[derive(Parser)]
pub struct CompareArgs {
    /// Electricity invoice in PDF.
    pub file: PathBuf,

    /// Only show the tariffs whose name contains the text, case-insensitive.
    #[clap(long, env = "TARIFA_FILTER", default_value = "")]
    pub filter: String,

    #[clap(long = "sort-by", env = "TARIFA_SORT_BY", value_enum, default_value = "total-cost")]
    pub sort_key: SortKey,

    #[clap(flatten)]
    pub service: ServiceArgs,
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub async fn compare(args: &CompareArgs) -> Result {
    let orchestrator = args.service.new_orchestrator()?;
    orchestrator.select_file(Upload::read_from(&args.file)?);
    orchestrator.set_filter(args.filter.as_str());
    orchestrator.set_sort_key(args.sort_key);
    orchestrator.submit().await;

    let session = orchestrator.session();
    debug!(generation = %session.generation(), sort_key = ?session.sort_key(), "completed");
    if let Some(error) = session.error() {
        bail!("{error}");
    }
    ensure!(matches!(session.phase(), Phase::Success { .. }), "the submission has not been completed");
    let invoice = session.invoice().context("the invoice is missing")?;
    println!("{}", build_invoice_table(invoice));

    if let Some(error) = session.comparison_error() {
        warn!("no ranking: {error}");
        return Ok(());
    }
    let view = session.view();
    if view.is_empty() {
        warn!(filter = session.filter(), "no tariffs to show");
    } else {
        println!("{}", build_ranking_table(&view));
    }
    Ok(())
}
