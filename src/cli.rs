mod compare;

use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::compare::{CompareArgs, compare};
use crate::{
    api::{analyzer, client, comparator},
    core::orchestrator::Orchestrator,
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze an invoice and rank the alternative tariffs.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),
}

#[derive(Parser)]
pub struct ServiceArgs {
    /// Base URL of the invoice analysis and tariff comparison services.
    #[clap(
        long = "api-base-url",
        env = "TARIFA_API_BASE_URL",
        default_value = "http://localhost:8000"
    )]
    pub base_url: Url,

    /// Timeout of each remote call.
    #[clap(long, env = "TARIFA_TIMEOUT", default_value = "60s")]
    timeout: humantime::Duration,
}

impl ServiceArgs {
    pub fn timeout(&self) -> Duration {
        self.timeout.into()
    }

    pub fn new_orchestrator(&self) -> Result<Orchestrator<analyzer::Api, comparator::Api>> {
        let client = client::try_new(self.timeout())?;
        Ok(Orchestrator::new(
            analyzer::Api::new(client.clone(), &self.base_url)?,
            comparator::Api::new(client, &self.base_url)?,
        ))
    }
}
