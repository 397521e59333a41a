//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{Actor, CreateUser, UpdateUser, User, UserClaims, UserInfo},
    },
    repository::Repository,
    services::audit::AuditService,
};

/// Hash a password with argon2 and a fresh salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    audit: AuditService,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, audit: AuditService) -> Self {
        Self {
            repository,
            config,
            audit,
        }
    }

    /// Verify credentials and issue a JWT
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, UserInfo)> {
        let user = match self.repository.users.find_by_username(username).await? {
            Some(u) if verify_password(&u.password_hash, password) => u,
            _ => {
                let attempted = Actor {
                    user_id: None,
                    username: username.to_string(),
                };
                self.audit
                    .record(&attempted, "Failed login", &format!("User {}", username), "auth")
                    .await;
                return Err(AppError::Authentication(
                    "Invalid username or password".to_string(),
                ));
            }
        };

        let claims = self.claims_for(&user);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))?;

        self.audit
            .record(
                &claims.actor(),
                "Login",
                &format!("User {}", user.username),
                "auth",
            )
            .await;

        Ok((token, user.into()))
    }

    fn claims_for(&self, user: &User) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role(),
            exp: now + self.config.jwt_expiration_hours as i64 * 3600,
            iat: now,
        }
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserInfo>> {
        self.repository.users.list().await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<UserInfo> {
        Ok(self.repository.users.get_by_id(id).await?.into())
    }

    pub async fn create_user(&self, actor: &Actor, data: &CreateUser) -> AppResult<UserInfo> {
        let password_hash = hash_password(&data.password)?;
        let role = data.role.unwrap_or(UserRole::User);
        let user = self
            .repository
            .users
            .create(
                &data.username,
                &password_hash,
                data.full_name.as_deref(),
                role.as_str(),
                data.email.as_deref(),
            )
            .await?;
        self.audit
            .record(
                actor,
                "Create user",
                &format!("User {}", user.username),
                "users",
            )
            .await;
        Ok(user.into())
    }

    pub async fn update_user(&self, actor: &Actor, id: i32, data: &UpdateUser) -> AppResult<UserInfo> {
        let password_hash = match &data.password {
            Some(p) => Some(hash_password(p)?),
            None => None,
        };
        let user = self
            .repository
            .users
            .update(
                id,
                data.username.as_deref(),
                password_hash.as_deref(),
                data.full_name.as_deref(),
                data.role.map(|r| r.as_str()),
                data.email.as_deref(),
            )
            .await?;
        self.audit
            .record(
                actor,
                "Edit user",
                &format!("User {}", user.username),
                "users",
            )
            .await;
        Ok(user.into())
    }

    pub async fn delete_user(&self, actor: &Actor, id: i32) -> AppResult<()> {
        let user = self.repository.users.get_by_id(id).await?;
        self.repository.users.delete(id).await?;
        self.audit
            .record(
                actor,
                "Delete user",
                &format!("User {}", user.username),
                "users",
            )
            .await;
        Ok(())
    }
}
