use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::model::{NewUser, User, UserFilter, UserPatch};
use crate::domain::ports::UserRepository;

const USER_COLUMNS: &str =
    "id, name, surname, patronymic, passport_number, address, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    surname: String,
    patronymic: String,
    passport_number: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            patronymic: row.patronymic,
            passport_number: row.passport_number,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, new: NewUser) -> anyhow::Result<User> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (name, surname, patronymic, passport_number, address, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.surname)
        .bind(&new.patronymic)
        .bind(&new.passport_number)
        .bind(&new.address)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_passport(&self, passport_number: &str) -> anyhow::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE passport_number = $1"
        ))
        .bind(passport_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<User>> {
        let mut conditions: Vec<(&str, String)> = Vec::new();
        for (column, value) in [
            ("name", &filter.name),
            ("surname", &filter.surname),
            ("patronymic", &filter.patronymic),
            ("passport_number", &filter.passport_number),
            ("address", &filter.address),
        ] {
            if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
                conditions.push((column, format!("%{v}%")));
            }
        }

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        for (i, (column, pattern)) in conditions.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(*column);
            qb.push(" ILIKE ");
            qb.push_bind(pattern.clone());
        }
        qb.push(" ORDER BY id LIMIT ");
        qb.push_bind(i64::from(limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::from(offset));

        let rows: Vec<UserRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: &UserPatch,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET updated_at = ");
        qb.push_bind(updated_at);
        for (column, value) in [
            ("name", &patch.name),
            ("surname", &patch.surname),
            ("patronymic", &patch.patronymic),
            ("passport_number", &patch.passport_number),
            ("address", &patch.address),
        ] {
            if let Some(v) = value {
                qb.push(", ");
                qb.push(column);
                qb.push(" = ");
                qb.push_bind(v.clone());
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
