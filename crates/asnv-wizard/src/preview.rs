use asnv_core::models::Document;
use chrono::NaiveDate;
use serde_json::Value;

/// Headline figures of a document that decodes as a typed ASN
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOutline {
    pub vendor_id: String,
    pub warehouse_code: String,
    pub ship_date: NaiveDate,
    pub expected_delivery: NaiveDate,
    pub shipment_id: String,
    pub cartons: usize,
    pub items: u64,
    pub total_weight: f64,
}

impl PreviewOutline {
    /// Returns `None` when the document does not match the ASN shape; the
    /// service reports why once it is submitted
    pub fn from_value(document: &Value) -> Option<Self> {
        let doc: Document = serde_json::from_value(document.clone()).ok()?;
        Some(Self {
            vendor_id: doc.vendor_id.clone(),
            warehouse_code: doc.warehouse_code.clone(),
            ship_date: doc.ship_date,
            expected_delivery: doc.expected_delivery,
            shipment_id: doc.routing.shipment_id.clone(),
            cartons: doc.carton_count(),
            items: doc.total_items(),
            total_weight: doc.total_weight(),
        })
    }
}

/// Text shown on the preview step: outline (when available) and the
/// pretty-printed document
pub fn render_preview(document: &Value) -> String {
    let mut out = String::new();

    if let Some(outline) = PreviewOutline::from_value(document) {
        out.push_str(&format!("Vendor: {}\n", outline.vendor_id));
        out.push_str(&format!("Warehouse: {}\n", outline.warehouse_code));
        out.push_str(&format!(
            "Ship Date: {} | Expected Delivery: {}\n",
            outline.ship_date, outline.expected_delivery
        ));
        out.push_str(&format!("Shipment: {}\n", outline.shipment_id));
        out.push_str(&format!(
            "Cartons: {} | Items: {} | Weight: {:.1} lbs\n\n",
            outline.cartons, outline.items, outline.total_weight
        ));
    }

    match serde_json::to_string_pretty(document) {
        Ok(pretty) => out.push_str(&pretty),
        Err(_) => out.push_str(&document.to_string()),
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use asnv_core::{SampleCategory, TemplateProvider};
    use serde_json::json;

    #[test]
    fn outline_for_typed_document() {
        let provider = TemplateProvider::builtin().unwrap();
        let doc = &provider.templates(SampleCategory::Valid)[0];
        let value = serde_json::to_value(doc).unwrap();

        let outline = PreviewOutline::from_value(&value).unwrap();
        assert_eq!(outline.vendor_id, "V12345");
        assert_eq!(outline.cartons, 2);
        assert_eq!(outline.items, 150);

        let text = render_preview(&value);
        assert!(text.starts_with("Vendor: V12345\n"));
        assert!(text.contains("\nWarehouse: "));
        assert!(text.contains(&format!("\nShipment: {}\n", outline.shipment_id)));
        assert!(text.contains("Cartons: 2 | Items: 150 | Weight: 45.2 lbs\n\n{"));
        assert!(text.contains("\"tms_routing\""));
    }

    #[test]
    fn untyped_document_renders_json_only() {
        let value = json!({"vendor_id": "V1"});

        assert!(PreviewOutline::from_value(&value).is_none());
        let text = render_preview(&value);
        assert!(text.starts_with('{'));
        assert!(text.contains("\"vendor_id\": \"V1\""));
    }
}
