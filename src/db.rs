use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::{macros::format_description, OffsetDateTime};

const ACCOUNTS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    password TEXT NOT NULL,
    is_available INTEGER NOT NULL DEFAULT 1,
    rating REAL NOT NULL DEFAULT 5.0,
    created_at TEXT NOT NULL,
    UNIQUE (email, role)
)";

const BOOKINGS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS bookings (
    id TEXT PRIMARY KEY,
    customer_name TEXT NOT NULL,
    customer_phone TEXT NOT NULL,
    service_type TEXT NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    address TEXT NOT NULL,
    notes TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    provider_id TEXT NOT NULL,
    assigned_to_user_id TEXT NOT NULL,
    legacy_user_id TEXT,
    rating_score INTEGER,
    rating_review TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

pub async fn init(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(ACCOUNTS_SCHEMA).execute(pool).await?;
    sqlx::query(BOOKINGS_SCHEMA).execute(pool).await?;
    Ok(())
}

// Fixed-width UTC timestamps so lexicographic order is chronological order.
pub fn now_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
        ))
        .expect("timestamp formatting")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Maid,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::Maid => "maid",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "driver" => Some(Role::Driver),
            "maid" => Some(Role::Maid),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<BookingStatus> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "accepted" => Some(BookingStatus::Accepted),
            "rejected" => Some(BookingStatus::Rejected),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRow {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub is_available: bool,
    pub rating: f64,
    pub created_at: String,
}

// Response shape for accounts; the password hash never leaves the row type.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    pub rating: f64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<AccountRow> for AccountView {
    fn from(row: AccountRow) -> AccountView {
        AccountView {
            id: row.id,
            user_id: row.user_id,
            role: row.role,
            name: row.name,
            email: row.email,
            phone: row.phone,
            is_available: row.is_available,
            rating: row.rating,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub address: String,
    pub notes: Option<String>,
    pub status: String,
    pub provider_id: String,
    pub assigned_to_user_id: String,
    pub legacy_user_id: Option<String>,
    pub rating_score: Option<i64>,
    pub rating_review: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingView {
    pub score: i64,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub address: String,
    pub notes: Option<String>,
    pub status: String,
    pub assigned_to_user_id: String,
    pub rating: Option<RatingView>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<BookingRow> for BookingView {
    fn from(row: BookingRow) -> BookingView {
        BookingView {
            id: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            service_type: row.service_type,
            date: row.date,
            time: row.time,
            address: row.address,
            notes: row.notes,
            status: row.status,
            assigned_to_user_id: row.assigned_to_user_id,
            rating: row.rating_score.map(|score| RatingView {
                score,
                review: row.rating_review,
            }),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::parse("driver"), Some(Role::Driver));
        assert_eq!(Role::parse("maid"), Some(Role::Maid));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Driver.as_str(), "driver");
    }

    #[test]
    fn booking_status_rejects_unknown_strings() {
        for s in ["pending", "accepted", "rejected", "completed", "cancelled"] {
            assert_eq!(BookingStatus::parse(s).map(|v| v.as_str()), Some(s));
        }
        assert_eq!(BookingStatus::parse("done"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let a = now_timestamp();
        let b = now_timestamp();
        assert!(a <= b);
        assert_eq!(a.len(), "2024-06-01T10:00:00.000000Z".len());
    }
}
