//! # User Service
//!
//! `CreateUser`, `ToggleUserStatus`, `ResetPassword`. Every
//! generated password is bcrypt-hashed before it reaches the repository
//! and returned to the caller exactly once.

use shared::auth::password::{generate_temporary_password, PasswordHasher};
use shared::errors::ApiError;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::entities::{User, UserRole};
use crate::repository::UserRepository;

pub struct NewStudent {
    pub email: String,
    pub full_name: String,
    pub student_id: String,
    pub major: Option<String>,
    pub year_level: Option<i32>,
}

pub struct NewFaculty {
    pub email: String,
    pub full_name: String,
    pub faculty_id: String,
    pub department: Option<String>,
}

pub struct NewAdmin {
    pub email: String,
    pub full_name: String,
}

pub enum NewUser {
    Student(NewStudent),
    Faculty(NewFaculty),
    Admin(NewAdmin),
}

pub struct CreatedUser {
    pub user: User,
    pub temporary_password: String,
}

pub struct UserService {
    users: UserRepository,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: UserRepository, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// `CreateUser`: generates a random initial password,
    /// bcrypt-hashes it at the configured cost, and returns the plaintext
    /// once — the caller is responsible for surfacing it to the admin and
    /// never logging it.
    #[instrument(skip(self, new_user))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<CreatedUser, ApiError> {
        let email = match &new_user {
            NewUser::Student(s) => &s.email,
            NewUser::Faculty(f) => &f.email,
            NewUser::Admin(a) => &a.email,
        };

        if self.users.email_exists(email).await? {
            return Err(ApiError::AlreadyExists {
                resource: format!("user:{email}"),
            });
        }

        let temporary_password = generate_temporary_password();
        let password_hash = self.hasher.hash(&temporary_password)?;

        let row = match new_user {
            NewUser::Student(s) => {
                self.users
                    .insert(
                        &s.email,
                        &s.full_name,
                        &password_hash,
                        UserRole::Student,
                        Some(&s.student_id),
                        s.major.as_deref(),
                        s.year_level,
                        None,
                        None,
                    )
                    .await?
            }
            NewUser::Faculty(f) => {
                self.users
                    .insert(
                        &f.email,
                        &f.full_name,
                        &password_hash,
                        UserRole::Faculty,
                        None,
                        None,
                        None,
                        Some(&f.faculty_id),
                        f.department.as_deref(),
                    )
                    .await?
            }
            NewUser::Admin(a) => {
                self.users
                    .insert(
                        &a.email,
                        &a.full_name,
                        &password_hash,
                        UserRole::Admin,
                        None,
                        None,
                        None,
                        None,
                        None,
                    )
                    .await?
            }
        };

        Ok(CreatedUser {
            user: User::from(row),
            temporary_password,
        })
    }

    /// `ToggleUserStatus`: deactivates or reactivates without
    /// deletion.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: Uuid, is_active: bool) -> Result<User, ApiError> {
        let row = self.users.set_active(id, is_active).await?;
        Ok(User::from(row))
    }

    /// `ResetPassword`: generates a new random password,
    /// returns the plaintext once.
    #[instrument(skip(self))]
    pub async fn reset_password(&self, id: Uuid) -> Result<String, ApiError> {
        let temporary_password = generate_temporary_password();
        let password_hash = self.hasher.hash(&temporary_password)?;
        self.users.set_password_hash(id, &password_hash).await?;
        Ok(temporary_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_variants_carry_matching_email() {
        let student = NewUser::Student(NewStudent {
            email: "s@example.edu".into(),
            full_name: "S".into(),
            student_id: "S1".into(),
            major: None,
            year_level: None,
        });
        match student {
            NewUser::Student(s) => assert_eq!(s.email, "s@example.edu"),
            _ => panic!("expected student variant"),
        }
    }
}
