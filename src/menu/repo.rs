use std::sync::Mutex;

use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{MenuRecord, MenuRow, NewMenu};

#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Versions previously persisted for the user; empty for an unknown user.
    async fn list_versions(&self, user_id: Uuid) -> anyhow::Result<Vec<i32>>;
    /// Persist a menu, assigning the next per-user version atomically.
    async fn save(&self, menu: NewMenu) -> anyhow::Result<MenuRecord>;
}

/// Read-only `max + 1`: calling this twice without an intervening save
/// returns the same value. The authoritative assignment happens in `save`.
pub async fn next_version(store: &dyn MenuStore, user_id: Uuid) -> anyhow::Result<i32> {
    let versions = store.list_versions(user_id).await?;
    Ok(versions.into_iter().max().unwrap_or(0) + 1)
}

pub struct PgMenuStore {
    db: PgPool,
}

impl PgMenuStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const SAVE_ATTEMPTS: u32 = 3;

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn list_versions(&self, user_id: Uuid) -> anyhow::Result<Vec<i32>> {
        let rows: Vec<(i32,)> =
            sqlx::query_as("SELECT version FROM menus WHERE user_id = $1 ORDER BY version")
                .bind(user_id)
                .fetch_all(&self.db)
                .await?;
        Ok(rows.into_iter().map(|(v,)| v).collect())
    }

    async fn save(&self, menu: NewMenu) -> anyhow::Result<MenuRecord> {
        // Version is computed inside the insert; UNIQUE (user_id, version)
        // turns a concurrent writer into a retryable conflict.
        for attempt in 1..=SAVE_ATTEMPTS {
            let res = sqlx::query_as::<_, MenuRow>(
                r#"
                INSERT INTO menus (id, user_id, version, calorie_target, days, warning)
                VALUES ($1, $2,
                        (SELECT COALESCE(MAX(version), 0) + 1 FROM menus WHERE user_id = $2),
                        $3, $4, $5)
                RETURNING id, user_id, version, calorie_target, days, warning, created_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(menu.user_id)
            .bind(menu.calorie_target)
            .bind(sqlx::types::Json(&menu.days))
            .bind(&menu.warning)
            .fetch_one(&self.db)
            .await;

            match res {
                Ok(row) => return Ok(row.into()),
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    tracing::warn!(user_id = %menu.user_id, attempt, "menu version conflict, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        anyhow::bail!("could not assign a menu version after {SAVE_ATTEMPTS} attempts")
    }
}

/// In-memory store for tests and `AppState::fake()`.
#[derive(Default)]
pub struct MemoryMenuStore {
    rows: Mutex<Vec<MenuRecord>>,
}

impl MemoryMenuStore {
    pub fn records(&self) -> Vec<MenuRecord> {
        self.rows.lock().expect("store lock").clone()
    }
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn list_versions(&self, user_id: Uuid) -> anyhow::Result<Vec<i32>> {
        let rows = self.rows.lock().expect("store lock");
        Ok(rows
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.version)
            .collect())
    }

    async fn save(&self, menu: NewMenu) -> anyhow::Result<MenuRecord> {
        let mut rows = self.rows.lock().expect("store lock");
        let version = rows
            .iter()
            .filter(|m| m.user_id == menu.user_id)
            .map(|m| m.version)
            .max()
            .unwrap_or(0)
            + 1;
        let record = MenuRecord {
            id: Uuid::new_v4(),
            user_id: menu.user_id,
            version,
            calorie_target: menu.calorie_target,
            days: menu.days,
            warning: menu.warning,
            created_at: OffsetDateTime::now_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_menu(user_id: Uuid) -> NewMenu {
        NewMenu {
            user_id,
            calorie_target: 2000,
            days: vec![],
            warning: None,
        }
    }

    #[tokio::test]
    async fn next_version_starts_at_one() {
        let store = MemoryMenuStore::default();
        let user = Uuid::new_v4();
        assert_eq!(next_version(&store, user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn next_version_has_no_increment_side_effect() {
        let store = MemoryMenuStore::default();
        let user = Uuid::new_v4();
        let a = next_version(&store, user).await.unwrap();
        let b = next_version(&store, user).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn save_assigns_strictly_increasing_versions() {
        let store = MemoryMenuStore::default();
        let user = Uuid::new_v4();
        let first = store.save(new_menu(user)).await.unwrap();
        let second = store.save(new_menu(user)).await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
        assert_eq!(store.records().len(), 2);
        assert_eq!(next_version(&store, user).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn versions_are_scoped_per_user() {
        let store = MemoryMenuStore::default();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        store.save(new_menu(alice)).await.unwrap();
        store.save(new_menu(alice)).await.unwrap();
        let bobs = store.save(new_menu(bob)).await.unwrap();
        assert_eq!(bobs.version, 1);
    }
}
