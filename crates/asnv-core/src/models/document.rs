use crate::error::DocumentError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Advance Shipment Notice as submitted to the compliance service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Vendor identifier (e.g., "V12345")
    pub vendor_id: String,
    /// Receiving warehouse code (e.g., "351")
    pub warehouse_code: String,
    pub ship_date: NaiveDate,
    pub expected_delivery: NaiveDate,
    /// Transportation routing block
    #[serde(rename = "tms_routing")]
    pub routing: Routing,
    /// Cartons in shipping order
    pub cartons: Vec<Carton>,
}

/// Routing request registered with the transportation management system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routing {
    pub shipment_id: String,
    pub ready_date: NaiveDate,
    /// Declared carton count
    pub cartons: u32,
    /// Declared cube (cubic feet)
    pub cube: f64,
    pub pallets: u32,
    /// Declared weight (lbs)
    pub weight: f64,
}

/// Single carton and its contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carton {
    #[serde(rename = "ucc128_label")]
    pub label: CartonLabel,
    /// Expected to match every contained item's PO number; mismatches are
    /// reported by the service, not rejected locally
    pub po_number: String,
    pub items: Vec<Item>,
    /// Physical weight (lbs)
    pub weight: f64,
    /// Length, width, height (inches)
    pub dimensions: [f64; 3],
}

/// UCC-128 shipping label printed on a carton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartonLabel {
    /// Serial shipping container code
    pub sscc: String,
    pub department_number: String,
    pub vendor_name: String,
    /// Destination distribution center name and address
    #[serde(rename = "dsg_dc_name")]
    pub dc_name: String,
    pub po_number: String,
    pub sort_letter: String,
    pub upc: String,
    /// Destination distribution center number
    pub dc_store_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    /// Product code
    pub upc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
}

impl Document {
    /// Parses a document from its JSON text
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the document the way it is shown in the input step
    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn carton_count(&self) -> usize {
        self.cartons.len()
    }

    /// Sum of item quantities across all cartons
    pub fn total_items(&self) -> u64 {
        self.cartons
            .iter()
            .flat_map(|carton| &carton.items)
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Sum of physical carton weights
    pub fn total_weight(&self) -> f64 {
        self.cartons.iter().map(|carton| carton.weight).sum()
    }
}
