//! UserRepository - Accounts

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateUserDTO, UpdateUserDTO, UserQuery};
use crate::entities::User;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const USER_COLUMNS: &str =
    "user_id, username, email, full_name, password, role, hospital_id, created_at";

pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Find user by exact username match (usernames are unique)
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        debug!("Finding user by username");
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        debug!("Finding user by email");
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.connection_pool)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &UserQuery) -> Result<Vec<User>, Error> {
        debug!("Listing users");
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE (? IS NULL OR role = ?) AND (? IS NULL OR hospital_id = ?) \
             ORDER BY username"
        ))
        .bind(filter.role)
        .bind(filter.role)
        .bind(filter.hospital_id)
        .bind(filter.hospital_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} users", users.len());
        Ok(users)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    #[instrument(skip(self, data), fields(username = %data.username, role = ?data.role))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        debug!("Creating new user");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (username, email, full_name, password, role, hospital_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.password)
        .bind(data.role)
        .bind(data.hospital_id)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("User created with id {}", new_id);

        Ok(User {
            user_id: new_id,
            username: data.username.clone(),
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            password: data.password.clone(),
            role: data.role,
            hospital_id: data.hospital_id,
            created_at: now,
        })
    }
}

impl Read<User, i64> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        debug!("Reading user by id");
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<User, UpdateUserDTO, i64> for UserRepository {
    /// `data.password`, when present, must already be hashed
    #[instrument(skip(self, data), fields(user_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateUserDTO) -> Result<User, Error> {
        debug!("Updating user");
        let clear_hospital = data.hospital_id.is_none()
            && data.role.is_some_and(|role| !role.is_hospital_bound());
        let result = sqlx::query(
            "UPDATE users SET \
                email = COALESCE(?, email), \
                full_name = COALESCE(?, full_name), \
                password = COALESCE(?, password), \
                role = COALESCE(?, role), \
                hospital_id = CASE WHEN ? THEN NULL ELSE COALESCE(?, hospital_id) END \
             WHERE user_id = ?",
        )
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.password)
        .bind(data.role)
        .bind(clear_hospital)
        .bind(data.hospital_id)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        info!("User updated");
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        debug!("Deleting user");
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
