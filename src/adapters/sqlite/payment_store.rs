//! SQLite implementation of the `PaymentStore` port.
//!
//! The database is opened in WAL mode with a busy timeout so concurrent
//! writers serialize instead of failing immediately. The schema is applied
//! on startup; besides `payments` it carries the `users` and
//! `merchant_daily_stats` tables of the wider deployment, which no
//! operation here touches.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;

use crate::config::DatabaseConfig;
use crate::domain::payment::{Payment, PaymentError, PaymentStatus};
use crate::ports::PaymentStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    pubkey TEXT PRIMARY KEY,
    is_merchant BOOLEAN DEFAULT FALSE,
    lnbits_wallet_id TEXT DEFAULT '',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS payments (
    id TEXT PRIMARY KEY,
    bolt11 TEXT NOT NULL,
    amount_sats INTEGER NOT NULL,
    memo TEXT DEFAULT '',
    sender_pubkey TEXT,
    receiver_pubkey TEXT NOT NULL,
    payment_hash TEXT UNIQUE,
    status TEXT DEFAULT 'pending',
    created_at TIMESTAMP NOT NULL,
    settled_at TIMESTAMP
);

CREATE TABLE IF NOT EXISTS merchant_daily_stats (
    pubkey TEXT,
    date TEXT,
    total_sats INTEGER DEFAULT 0,
    transaction_count INTEGER DEFAULT 0,
    PRIMARY KEY (pubkey, date)
);

CREATE INDEX IF NOT EXISTS idx_payments_receiver ON payments(receiver_pubkey);
CREATE INDEX IF NOT EXISTS idx_payments_sender ON payments(sender_pubkey);
CREATE INDEX IF NOT EXISTS idx_payments_hash ON payments(payment_hash);
"#;

/// SQLite implementation of the PaymentStore port.
pub struct SqlitePaymentStore {
    pool: SqlitePool,
}

impl SqlitePaymentStore {
    /// Open (creating if missing) the database file and apply the schema.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), sqlx::Error> {
        // Raw execution: the schema is several statements in one batch.
        self.pool.execute(SCHEMA).await?;
        Ok(())
    }
}

/// Database row shape of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: String,
    bolt11: String,
    amount_sats: i64,
    memo: String,
    sender_pubkey: Option<String>,
    receiver_pubkey: String,
    payment_hash: String,
    status: String,
    created_at: DateTime<Utc>,
    settled_at: Option<DateTime<Utc>>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PaymentError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            status: parse_status(&row.status)?,
            id: row.id,
            invoice: row.bolt11,
            amount: row.amount_sats,
            memo: row.memo,
            sender_pubkey: row.sender_pubkey,
            receiver_pubkey: row.receiver_pubkey,
            payment_hash: row.payment_hash,
            created_at: row.created_at,
            settled_at: row.settled_at,
        })
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, PaymentError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "paid" => Ok(PaymentStatus::Paid),
        "expired" => Ok(PaymentStatus::Expired),
        other => Err(PaymentError::storage(format!("invalid status value: {other}"))),
    }
}

fn storage_err(e: sqlx::Error) -> PaymentError {
    PaymentError::storage(e.to_string())
}

const SELECT_PAYMENT: &str = "SELECT id, bolt11, amount_sats, memo, sender_pubkey, \
     receiver_pubkey, payment_hash, status, created_at, settled_at FROM payments";

#[async_trait]
impl PaymentStore for SqlitePaymentStore {
    async fn create_payment(&self, payment: &Payment) -> Result<(), PaymentError> {
        sqlx::query(
            "INSERT INTO payments (id, bolt11, amount_sats, memo, sender_pubkey, \
             receiver_pubkey, payment_hash, status, created_at, settled_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&payment.id)
        .bind(&payment.invoice)
        .bind(payment.amount)
        .bind(&payment.memo)
        .bind(&payment.sender_pubkey)
        .bind(&payment.receiver_pubkey)
        .bind(&payment.payment_hash)
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.settled_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("{SELECT_PAYMENT} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_err)?;
        row.map(Payment::try_from).transpose()
    }

    async fn get_payment_by_hash(
        &self,
        payment_hash: &str,
    ) -> Result<Option<Payment>, PaymentError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("{SELECT_PAYMENT} WHERE payment_hash = ?"))
                .bind(payment_hash)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_err)?;
        row.map(Payment::try_from).transpose()
    }

    async fn mark_paid(&self, id: &str, settled_at: DateTime<Utc>) -> Result<bool, PaymentError> {
        // Conditional on the row still being pending: a duplicate webhook
        // cannot overwrite the settlement time of the first.
        let result = sqlx::query(
            "UPDATE payments SET status = 'paid', settled_at = ? \
             WHERE id = ? AND status = 'pending'",
        )
        .bind(settled_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_payments_for(
        &self,
        pubkey: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Payment>, PaymentError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{SELECT_PAYMENT} WHERE receiver_pubkey = ? OR sender_pubkey = ? \
             ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(pubkey)
        .bind(pubkey)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.into_iter().map(Payment::try_from).collect()
    }
}
