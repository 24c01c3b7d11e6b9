use crate::domain::{UserProfile, PROFILE_KEY};
use sqlx::{query, query_scalar, SqlitePool};

/// Read one value from the kv store.
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    query_scalar("SELECT value FROM kv WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Insert or replace one value in the kv store.
pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    query("INSERT INTO kv (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove one value from the kv store. Deleting a missing key is fine.
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<(), sqlx::Error> {
    query("DELETE FROM kv WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}

/// Load the stored profile, if any. Malformed JSON counts as "no profile".
pub async fn load_profile(pool: &SqlitePool) -> Result<Option<UserProfile>, sqlx::Error> {
    let Some(raw) = get_value(pool, PROFILE_KEY).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<UserProfile>(&raw) {
        Ok(profile) => Ok(Some(profile)),
        Err(e) => {
            tracing::warn!(error = %e, "stored profile unreadable, treating as absent");
            Ok(None)
        }
    }
}

/// Persist the profile under the fixed key.
pub async fn save_profile(pool: &SqlitePool, profile: &UserProfile) -> Result<(), sqlx::Error> {
    let json = serde_json::to_string(profile).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    set_value(pool, PROFILE_KEY, &json).await
}

/// Daily reset check: a profile dated `today` is returned as-is, anything
/// else is deleted and `None` comes back.
pub async fn restore_daily_profile(
    pool: &SqlitePool,
    today: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    match load_profile(pool).await? {
        Some(profile) if profile.is_fresh(today) => Ok(Some(profile)),
        Some(stale) => {
            tracing::info!(
                nickname = %stale.nickname,
                date = %stale.last_login_date,
                "discarding stale profile"
            );
            delete_value(pool, PROFILE_KEY).await?;
            Ok(None)
        }
        None => Ok(None),
    }
}
