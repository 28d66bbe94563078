use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for profile and admin operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher used when an admin sets a new password
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn ensure_username_available(
        &self,
        id: &UserId,
        username: &Username,
    ) -> Result<(), UserError> {
        match self.repository.find_by_username(username).await? {
            Some(holder) if holder.id != *id => {
                Err(UserError::UsernameAlreadyExists(username.to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_email_available(
        &self,
        id: &UserId,
        email: &EmailAddress,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(holder) if holder.id != *id => {
                Err(UserError::EmailAlreadyExists(email.to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn apply_profile(
        &self,
        user: &mut User,
        command: UpdateProfileCommand,
    ) -> Result<(), UserError> {
        if let Some(username) = command.username {
            self.ensure_username_available(&user.id, &username).await?;
            user.username = username;
        }

        if let Some(display_name) = command.display_name {
            user.display_name = display_name;
        }

        if let Some(birthday) = command.birthday {
            user.birthday = Some(birthday);
        }

        if let Some(info) = command.info {
            user.info = Some(info);
        }

        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        self.repository.list(pagination).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;
        self.apply_profile(&mut user, command).await?;

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "Profile updated");

        Ok(updated_user)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;
        self.apply_profile(&mut user, command.profile).await?;

        if let Some(email) = command.email {
            self.ensure_email_available(&user.id, &email).await?;
            user.email = email;
        }

        if let Some(role) = command.role {
            if role != user.role {
                tracing::info!(user_id = %user.id, from = %user.role, to = %role, "Role changed");
            }
            user.role = role;
        }

        if let Some(password) = command.password {
            user.password_hash = self.password_hasher.hash(password.expose())?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated by administrator");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
