use crate::{
    errors::AppError,
    models::{Role, User},
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as RusqliteResult};

pub struct UserRepository {
    conn: Connection,
}

impl UserRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    const SELECT_FIELDS: &'static str = "id, name, email, password, role, created_at";

    fn map_row_to_user(row: &rusqlite::Row) -> RusqliteResult<User> {
        let role_str: String = row.get(4)?;
        let role = role_str.parse::<Role>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?;
        let created_at_str: String = row.get(5)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(User {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            role,
            created_at: Some(created_at),
        })
    }

    /// Inserts `user` and returns it with the assigned id and timestamp.
    /// Fails with `AppError::Conflict` when the email is already taken.
    pub fn create_user(&self, user: &User) -> Result<User, AppError> {
        let created_at = user.created_at.unwrap_or_else(Utc::now);
        self.conn.execute(
            "INSERT INTO users (name, email, password, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.name,
                user.email,
                user.password,
                user.role.as_str(),
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(User {
            id: Some(self.conn.last_insert_rowid()),
            created_at: Some(created_at),
            ..user.clone()
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = ?1",
            Self::SELECT_FIELDS
        );
        let user = self
            .conn
            .query_row(&sql, params![email], Self::map_row_to_user)
            .optional()?;
        Ok(user)
    }

    // Removes at most one matching row, returns the number deleted.
    pub fn delete_one_by_email(&self, email: &str) -> Result<usize, AppError> {
        let deleted = self.conn.execute(
            "DELETE FROM users WHERE id = (SELECT id FROM users WHERE email = ?1 LIMIT 1)",
            params![email],
        )?;
        Ok(deleted)
    }

    pub fn count_users(&self) -> Result<i64, AppError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DbConfig, db::schema::init_db};

    fn repo() -> UserRepository {
        UserRepository::new(init_db(&DbConfig::new(":memory:")).unwrap())
    }

    fn admin(email: &str) -> User {
        User::new(
            "Test Admin".to_string(),
            email.to_string(),
            "secret".to_string(),
            Role::Admin,
        )
    }

    #[test]
    fn create_then_find_by_email() {
        let repo = repo();
        let created = repo.create_user(&admin("info@subletmatch.com")).unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());

        let found = repo
            .find_user_by_email("info@subletmatch.com")
            .unwrap()
            .expect("user should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Test Admin");
        assert_eq!(found.password, "secret");
        assert!(found.is_admin());
        assert_eq!(found.created_at, created.created_at);
    }

    #[test]
    fn malformed_created_at_is_an_error() {
        let repo = repo();
        repo.conn
            .execute(
                "INSERT INTO users (name, email, password, role, created_at)
                 VALUES ('Broken', 'broken@subletmatch.com', 'x', 'admin', 'yesterday')",
                [],
            )
            .unwrap();

        let err = repo.find_user_by_email("broken@subletmatch.com").unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn find_unknown_email_is_none() {
        assert!(repo().find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let repo = repo();
        repo.create_user(&admin("info@subletmatch.com")).unwrap();
        let err = repo.create_user(&admin("info@subletmatch.com")).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.count_users().unwrap(), 1);
    }

    #[test]
    fn delete_one_by_email_reports_count() {
        let repo = repo();
        repo.create_user(&admin("admin@subletmatch.com")).unwrap();
        repo.create_user(&admin("info@subletmatch.com")).unwrap();

        assert_eq!(repo.delete_one_by_email("admin@subletmatch.com").unwrap(), 1);
        assert_eq!(repo.delete_one_by_email("admin@subletmatch.com").unwrap(), 0);
        assert_eq!(repo.count_users().unwrap(), 1);
    }
}
