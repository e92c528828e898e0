use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    api::{
        client,
        error::{ComparisonError, ServiceError},
    },
    core::{invoice::Invoice, tariff::TariffQuote},
    prelude::*,
};

#[async_trait]
pub trait TariffComparator: Sync {
    /// Quote the tariff catalog against the analyzed invoice.
    async fn compare(&self, invoice: &Invoice) -> Result<Vec<TariffQuote>, ComparisonError>;
}

/// Client of the remote tariff comparison service.
pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn new(client: Client, base_url: &Url) -> Result<Self> {
        Ok(Self { client, url: client::endpoint(base_url, &["comparar-tarifas", ""])? })
    }
}

#[async_trait]
impl TariffComparator for Api {
    #[instrument(skip_all, fields(total = %invoice.total_amount))]
    async fn compare(&self, invoice: &Invoice) -> Result<Vec<TariffQuote>, ComparisonError> {
        info!(url = %self.url, "comparing…");
        let response = self
            .client
            .post(self.url.clone())
            .json(invoice)
            .send()
            .await
            .map_err(ServiceError::from)?;
        let quotes: Vec<TariffQuote> = client::read_json(response).await?;
        info!(n_quotes = quotes.len(), "compared");
        Ok(quotes)
    }
}
