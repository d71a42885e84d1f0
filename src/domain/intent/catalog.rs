//! Bank and contact catalogs

use serde::{Deserialize, Serialize};

use crate::domain::error::CatalogParseError;

/// A bank the sign-up flow can select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: u32,
    pub name: String,
}

/// A payee contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub mobile: String,
}

/// Static catalogs the grammars close over.
/// Ships with demo data; a JSON file can replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub banks: Vec<Bank>,
    pub contacts: Vec<Contact>,
}

impl Catalog {
    /// Built-in demo catalog
    pub fn demo() -> Self {
        let banks = [
            "HDFC Bank",
            "ICICI Bank",
            "State Bank of India",
            "Axis Bank",
            "Kotak Bank",
            "Punjab National Bank",
            "Bank of Baroda",
            "Union Bank",
            "Yes Bank",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| Bank {
            id: i as u32 + 1,
            name: name.to_string(),
        })
        .collect();

        let contacts = [
            ("Alice Kumar", "9876501234"),
            ("Alice Mehta", "9876502345"),
            ("Rahul Sharma", "9876543210"),
            ("Priya Patel", "9812345670"),
            ("Vikram Singh", "9798989898"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, mobile))| Contact {
            id: i as u32 + 1,
            name: name.to_string(),
            mobile: mobile.to_string(),
        })
        .collect();

        Self { banks, contacts }
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(json: &str) -> Result<Self, CatalogParseError> {
        serde_json::from_str(json).map_err(|e| CatalogParseError(e.to_string()))
    }

    /// Bank names in catalog order
    pub fn bank_names(&self) -> impl Iterator<Item = &str> {
        self.banks.iter().map(|bank| bank.name.as_str())
    }

    /// Contact names in catalog order
    pub fn contact_names(&self) -> impl Iterator<Item = &str> {
        self.contacts.iter().map(|contact| contact.name.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}
