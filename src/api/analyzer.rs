use async_trait::async_trait;
use reqwest::{
    Client,
    Url,
    multipart::{Form, Part},
};

use crate::{
    api::{
        client,
        error::{AnalysisError, ServiceError},
    },
    core::invoice::{Invoice, Upload},
    prelude::*,
};

#[async_trait]
pub trait InvoiceAnalyzer: Sync {
    /// Extract the invoice figures from the file.
    async fn analyze(&self, upload: &Upload) -> Result<Invoice, AnalysisError>;
}

/// Client of the remote invoice analysis service.
pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn new(client: Client, base_url: &Url) -> Result<Self> {
        Ok(Self { client, url: client::endpoint(base_url, &["analizar-factura"])? })
    }
}

#[async_trait]
impl InvoiceAnalyzer for Api {
    #[instrument(skip_all, fields(file_name = %upload.file_name, len = upload.len()))]
    async fn analyze(&self, upload: &Upload) -> Result<Invoice, AnalysisError> {
        if upload.is_empty() {
            return Err(AnalysisError::EmptyFile);
        }
        info!(url = %self.url, "uploading…");
        let part = Part::bytes(upload.content.clone())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")
            .map_err(ServiceError::from)?;
        let response = self
            .client
            .post(self.url.clone())
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(ServiceError::from)?;
        let invoice: Invoice = client::read_json(response).await?;
        info!(
            total = %invoice.total_amount,
            tax = %invoice.tax_amount,
            rental = %invoice.rental_amount,
            "analyzed",
        );
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::dec;
    use serde_json::json;
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    use super::*;
    use crate::quantity::cost::Euros;

    fn new_api(server: &MockServer) -> Result<Api> {
        Api::new(client::try_new(Duration::from_secs(5))?, &Url::parse(&server.uri())?)
    }

    #[tokio::test]
    async fn analyze_ok() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analizar-factura"))
            .and(body_string_contains(r#"name="file"; filename="enero.pdf""#))
            .and(body_string_contains("%PDF-1.7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "importe_total": 120.50,
                "impuestos": 10.00,
                "alquiler_equipos": 5.00,
                "potencia_contratada_kw": 4.6,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let invoice = new_api(&server)?.analyze(&Upload::new("enero.pdf", "%PDF-1.7")).await?;
        assert_eq!(invoice.total_amount, Euros(dec!(120.50)));
        assert_eq!(invoice.tax_amount, Euros(dec!(10)));
        assert_eq!(invoice.rental_amount, Euros(dec!(5)));
        assert_eq!(invoice.details["potencia_contratada_kw"], 4.6);
        Ok(())
    }

    #[tokio::test]
    async fn empty_file_is_not_sent() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let result = new_api(&server)?.analyze(&Upload::new("vacia.pdf", Vec::<u8>::new())).await;
        assert!(matches!(result, Err(AnalysisError::EmptyFile)));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_with_detail() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analizar-factura"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "No se pudo leer el PDF"})),
            )
            .mount(&server)
            .await;

        let result = new_api(&server)?.analyze(&Upload::new("enero.pdf", "garbage")).await;
        match result {
            Err(AnalysisError::Service(ServiceError::Rejected { status, detail })) => {
                assert_eq!(status, 400);
                assert_eq!(detail, "No se pudo leer el PDF");
            }
            other => bail!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_malformed() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analizar-factura"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"importe_total": 120.50})))
            .mount(&server)
            .await;

        let result = new_api(&server)?.analyze(&Upload::new("enero.pdf", "%PDF")).await;
        assert!(matches!(result, Err(AnalysisError::Service(ServiceError::MalformedResponse(_)))));
        Ok(())
    }

    #[tokio::test]
    async fn timeout_is_request_error() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let api = Api::new(client::try_new(Duration::from_millis(100))?, &Url::parse(&server.uri())?)?;
        let result = api.analyze(&Upload::new("enero.pdf", "%PDF")).await;
        assert!(matches!(result, Err(AnalysisError::Service(ServiceError::Request(_)))));
        Ok(())
    }
}
