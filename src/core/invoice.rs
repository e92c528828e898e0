use std::{
    fmt::{Debug, Formatter},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{prelude::*, quantity::cost::Euros};

/// Figures extracted from an electricity invoice by the analysis service.
#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Invoice {
    #[serde(rename = "importe_total")]
    pub total_amount: Euros,

    #[serde(rename = "impuestos")]
    pub tax_amount: Euros,

    /// Metering equipment rental.
    #[serde(rename = "alquiler_equipos")]
    pub rental_amount: Euros,

    /// The rest of the breakdown, forwarded verbatim to the comparison service.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Invoice {
    /// Costs that do not depend on the tariff.
    pub fn fixed_costs(&self) -> Euros {
        self.tax_amount + self.rental_amount
    }
}

/// The selected invoice file.
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), content: content.into() }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let content =
            fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "factura.pdf".to_owned(), |name| name.to_string_lossy().into_owned());
        debug!(len = content.len(), "read");
        Ok(Self::new(file_name, content))
    }

    pub const fn len(&self) -> usize {
        self.content.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Debug for Upload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn deserialize_invoice_ok() -> Result {
        // language=json
        let body = r#"{
            "cups": "ES0021000000000000AA",
            "importe_total": 120.50,
            "impuestos": 10.00,
            "alquiler_equipos": 5,
            "consumo_kwh": 312
        }"#;
        let invoice = serde_json::from_str::<Invoice>(body)?;
        assert_eq!(invoice.total_amount, Euros(dec!(120.50)));
        assert_eq!(invoice.tax_amount, Euros(dec!(10)));
        assert_eq!(invoice.rental_amount, Euros(dec!(5)));
        assert_eq!(invoice.fixed_costs(), Euros(dec!(15)));
        assert_eq!(invoice.details.len(), 2);
        assert_eq!(invoice.details["consumo_kwh"], 312);
        Ok(())
    }

    #[test]
    fn deserialize_invoice_missing_field_fails() {
        // language=json
        let body = r#"{"importe_total": 120.50, "impuestos": 10.00}"#;
        assert!(serde_json::from_str::<Invoice>(body).is_err());
    }

    #[test]
    fn serialize_invoice_keeps_details_ok() -> Result {
        // language=json
        let body = r#"{"importe_total": 120.5, "impuestos": 10.0, "alquiler_equipos": 5.0, "cups": "ES00"}"#;
        let invoice = serde_json::from_str::<Invoice>(body)?;
        let value = serde_json::to_value(&invoice)?;
        assert_eq!(value["importe_total"], 120.5);
        assert_eq!(value["alquiler_equipos"], 5.0);
        assert_eq!(value["cups"], "ES00");
        Ok(())
    }

    #[test]
    fn upload_file_name_ok() -> Result {
        let file_name = format!("tarifa-upload-{}.pdf", std::process::id());
        let path = std::env::temp_dir().join(&file_name);
        fs::write(&path, b"%PDF-1.7")?;
        let upload = Upload::read_from(&path);
        fs::remove_file(&path)?;
        let upload = upload?;
        assert_eq!(upload.file_name, file_name);
        assert_eq!(upload.len(), 8);
        Ok(())
    }
}
