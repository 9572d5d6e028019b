use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::auth::dto::{SessionUser, UserInfo};
use crate::auth::password::verify_password;

/// Credentials row in the pre-existing users table. This service never
/// writes to it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, full_name, role, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// All active users, ordered by full name. Activity is a property of the
    /// external table, so there is nothing to filter on here.
    pub async fn list_active(db: &PgPool) -> anyhow::Result<Vec<UserInfo>> {
        let users = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT id, email, full_name, role
            FROM users
            ORDER BY full_name
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }
}

/// Check an email/password pair against the stored hash. Unknown email and
/// wrong password both come back as `None` so the caller cannot tell them
/// apart (no user enumeration). Never returns the hash.
pub async fn authenticate(
    db: &PgPool,
    email: &str,
    password: &str,
) -> anyhow::Result<Option<SessionUser>> {
    let Some(user) = User::find_by_email(db, email).await? else {
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(None);
    }

    Ok(Some(SessionUser {
        user_id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
    }))
}
