use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Body for POST and PUT /companies. The code is never taken from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithInvoices {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<i32>,
}
