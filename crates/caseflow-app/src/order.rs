use anyhow::{Result, bail};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use caseflow_core::catalog;
use caseflow_core::selection::ImageSource;

use crate::App;

/// A label/value pair for the final summary and the CLI status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub confirmation: String,
    pub contact_name: String,
    pub total_price: u32,
    pub submitted_at: String,
}

impl App {
    /// Human-readable summary of the current order.
    pub fn order_summary(&self) -> Vec<OrderRow> {
        let selection = self.selection();
        let combo = catalog::combo(selection.combo_id);
        let mut rows = Vec::<OrderRow>::new();

        rows.push(row("Equipo", phone_label(selection.brand.as_deref(), selection.model.as_deref())));
        rows.push(row("Combo", format!("{} (${})", combo.name, combo.price)));

        if combo.includes_mica {
            let mica = selection
                .mica_id
                .as_deref()
                .and_then(|id| catalog::MICAS.iter().find(|mica| mica.id == id));
            rows.push(row(
                "Mica",
                mica.map(|mica| {
                    if mica.surcharge > 0 {
                        format!("{} (+${})", mica.name, mica.surcharge)
                    } else {
                        mica.name.to_string()
                    }
                })
                .unwrap_or_else(|| "Pendiente".to_string()),
            ));
        }

        if combo.includes_case {
            let style = selection
                .case_id
                .as_deref()
                .and_then(|id| catalog::CASE_STYLES.iter().find(|style| style.id == id));
            rows.push(row(
                "Funda",
                style
                    .map(|style| {
                        format!(
                            "{} ({}, {})",
                            style.name, selection.case_type, selection.case_color
                        )
                    })
                    .unwrap_or_else(|| "Pendiente".to_string()),
            ));
        }

        if combo.includes_image {
            rows.push(row("Imagen", image_label(&selection.image)));
        }

        rows.push(row(
            "Total",
            format!("${} {}", selection.total_price(), self.currency()),
        ));
        rows
    }

    /// Validates the contact details and completes the order.
    /// Submission is simulated (there is no network in this system);
    /// on success the wizard state is fully reset.
    pub fn submit_order(&mut self) -> Result<OrderReceipt> {
        let contact = self.selection().contact.clone();
        if contact.name.trim().is_empty() {
            bail!("contact name is required before submitting");
        }
        if !contact.email.contains('@') {
            bail!("contact email must be a valid address");
        }
        if contact.phone.trim().is_empty() {
            bail!("contact phone is required before submitting");
        }

        let submitted_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let receipt = OrderReceipt {
            confirmation: format!(
                "CF-{}",
                OffsetDateTime::now_utc().unix_timestamp()
            ),
            contact_name: contact.name.trim().to_string(),
            total_price: self.selection().total_price(),
            submitted_at,
        };

        self.reset_app();
        Ok(receipt)
    }
}

fn row(label: &str, value: String) -> OrderRow {
    OrderRow {
        label: label.to_string(),
        value,
    }
}

fn phone_label(brand: Option<&str>, model: Option<&str>) -> String {
    match (brand, model) {
        (Some(brand), Some(model)) => format!("{brand} • {model}"),
        (Some(brand), None) => brand.to_string(),
        _ => "Pendiente de selección".to_string(),
    }
}

fn image_label(image: &ImageSource) -> String {
    match image {
        ImageSource::None => "Pendiente".to_string(),
        ImageSource::Brand {
            asset_id,
            license_tag,
            ..
        } => {
            let name = catalog::LICENSED_ASSETS
                .iter()
                .find(|asset| asset.id == *asset_id)
                .map(|asset| asset.name)
                .unwrap_or(asset_id.as_str());
            format!("{name} (licencia {license_tag})")
        }
        ImageSource::Custom { .. } => "Imagen personal".to_string(),
    }
}
