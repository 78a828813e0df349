//! PostgreSQL backend: table DDL, database bootstrap, and parameterized queries.

use crate::error::AppError;
use crate::models::{Company, Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use crate::service::payment::next_paid_date;
use crate::store::Datastore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;

const COMPANIES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS companies (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
"#;

const INVOICES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id SERIAL PRIMARY KEY,
        comp_code TEXT NOT NULL REFERENCES companies (code) ON DELETE CASCADE,
        amt DOUBLE PRECISION NOT NULL CHECK (amt > 0),
        paid BOOLEAN NOT NULL DEFAULT FALSE,
        add_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        paid_date TIMESTAMPTZ
    )
"#;

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

/// Create `companies` and `invoices` if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(COMPANIES_DDL).execute(pool).await?;
    sqlx::query(INVOICES_DDL).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the target database name.
/// `None` when the URL names no database or names `postgres` itself.
fn admin_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let Some(db_name) = opts.get_database().map(str::to_string) else {
        return Ok(None);
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(None);
    }
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Joined row for GET /invoices/:id before nesting the company fields.
#[derive(FromRow)]
struct InvoiceDetailRow {
    id: i32,
    comp_code: String,
    amt: f64,
    paid: bool,
    add_date: DateTime<Utc>,
    paid_date: Option<DateTime<Utc>>,
    name: String,
    description: Option<String>,
}

impl From<InvoiceDetailRow> for InvoiceDetail {
    fn from(row: InvoiceDetailRow) -> Self {
        InvoiceDetail {
            id: row.id,
            company: Company {
                code: row.comp_code,
                name: row.name,
                description: row.description,
            },
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

/// Conflict for a company insert, told apart by the violated constraint.
fn company_conflict(constraint: Option<&str>, company: &Company) -> AppError {
    match constraint {
        Some("companies_name_key") => {
            AppError::Conflict(format!("company name '{}' is taken", company.name))
        }
        _ => AppError::Conflict(format!("company '{}' already exists", company.code)),
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_foreign_key_violation())
        .unwrap_or(false)
}

#[async_trait]
impl Datastore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let sql = "SELECT code, name, description FROM companies ORDER BY code";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Company>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError> {
        let sql = "SELECT code, name, description FROM companies WHERE code = $1";
        tracing::debug!(sql = %sql, code = %code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_company(&self, company: &Company) -> Result<Company, AppError> {
        let sql = r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
        "#;
        tracing::debug!(sql = %sql, code = %company.code, "query");
        sqlx::query_as::<_, Company>(sql)
            .bind(&company.code)
            .bind(&company.name)
            .bind(&company.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    let constraint = e.as_database_error().and_then(|d| d.constraint());
                    company_conflict(constraint, company)
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let sql = r#"
            UPDATE companies SET name = $1, description = $2
            WHERE code = $3
            RETURNING code, name, description
        "#;
        tracing::debug!(sql = %sql, code = %code, "query");
        sqlx::query_as::<_, Company>(sql)
            .bind(name)
            .bind(description)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("company name '{}' is taken", name))
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let sql = "DELETE FROM companies WHERE code = $1 RETURNING code";
        tracing::debug!(sql = %sql, code = %code, "query");
        let row: Option<(String,)> = sqlx::query_as(sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, AppError> {
        let sql = "SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id";
        tracing::debug!(sql = %sql, code = %code, "query");
        let rows: Vec<(i32,)> = sqlx::query_as(sql)
            .bind(code)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError> {
        let sql = "SELECT id, comp_code, amt FROM invoices ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, InvoiceSummary>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_invoice_detail(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError> {
        let sql = r#"
            SELECT i.id, i.comp_code, i.amt, i.paid, i.add_date, i.paid_date, c.name, c.description
            FROM invoices AS i
            INNER JOIN companies AS c ON (i.comp_code = c.code)
            WHERE i.id = $1
        "#;
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, InvoiceDetailRow>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(InvoiceDetail::from))
    }

    async fn insert_invoice(&self, new: &NewInvoice) -> Result<Invoice, AppError> {
        let sql = format!(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, comp_code = %new.comp_code, "query");
        sqlx::query_as::<_, Invoice>(&sql)
            .bind(&new.comp_code)
            .bind(new.amt)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::not_found(format!("Can't find company with code: {}", new.comp_code))
                } else {
                    AppError::Db(e)
                }
            })
    }

    async fn update_invoice(&self, id: i32, update: &InvoiceUpdate) -> Result<Option<Invoice>, AppError> {
        let mut tx = self.pool.begin().await?;
        let current: Option<(Option<DateTime<Utc>>,)> =
            sqlx::query_as("SELECT paid_date FROM invoices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current_paid_date,)) = current else {
            return Ok(None);
        };
        let paid_date = next_paid_date(current_paid_date, update.paid, Utc::now());

        let sql = format!(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3 WHERE id = $4 RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, paid = update.paid, "query (tx)");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(update.amt)
            .bind(update.paid)
            .bind(paid_date)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(row))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        let sql = "DELETE FROM invoices WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<(i32,)> = sqlx::query_as(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
