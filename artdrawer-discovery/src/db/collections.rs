//! Collection documents (key-value, JSON values)
//!
//! Keys: [`FAVORITES_KEY`], [`CATEGORIES_KEY`], [`REGISTRY_KEY`]. Each value is the
//! serialization of the whole collection and is rewritten in full on every change.

use artdrawer_common::{time, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Pool, Sqlite, Transaction};

pub const FAVORITES_KEY: &str = "artist_favorites";
pub const CATEGORIES_KEY: &str = "artist_categories";
pub const REGISTRY_KEY: &str = "artist_registry";

/// Load a collection; `None` when the key was never written
pub async fn load<T: DeserializeOwned>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM collections WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match row {
        Some((json,)) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Overwrite a collection
pub async fn save<T: Serialize>(db: &Pool<Sqlite>, key: &str, value: &T) -> Result<()> {
    let mut tx = db.begin().await?;
    write(&mut tx, key, value).await?;
    tx.commit().await?;
    Ok(())
}

/// Overwrite two collections in one transaction
pub async fn save_pair<A: Serialize, B: Serialize>(
    db: &Pool<Sqlite>,
    first: (&str, &A),
    second: (&str, &B),
) -> Result<()> {
    let mut tx = db.begin().await?;
    write(&mut tx, first.0, first.1).await?;
    write(&mut tx, second.0, second.1).await?;
    tx.commit().await?;
    Ok(())
}

/// Overwrite all three collections in one transaction
pub async fn save_all<A: Serialize, B: Serialize, C: Serialize>(
    db: &Pool<Sqlite>,
    first: (&str, &A),
    second: (&str, &B),
    third: (&str, &C),
) -> Result<()> {
    let mut tx = db.begin().await?;
    write(&mut tx, first.0, first.1).await?;
    write(&mut tx, second.0, second.1).await?;
    write(&mut tx, third.0, third.1).await?;
    tx.commit().await?;
    Ok(())
}

async fn write<T: Serialize>(tx: &mut Transaction<'_, Sqlite>, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;

    sqlx::query(
        r#"
        INSERT INTO collections (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(json)
    .bind(time::now().to_rfc3339())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
