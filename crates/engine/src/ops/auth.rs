use base64::Engine as _;
use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{EngineError, RegisterCmd, ResultEngine, User, sessions, users, util};

use super::{Engine, on_unique_violation, with_tx};

const PASSWORD_MIN_CHARS: usize = 8;
const DISPLAY_NAME_MIN_CHARS: usize = 3;
const DISPLAY_NAME_MAX_CHARS: usize = 255;

impl Engine {
    /// Register a new account. Emails are unique after trimming and
    /// lowercasing.
    pub async fn register(&self, cmd: RegisterCmd) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let email = normalize_email(&cmd.email)?;
            let display_name = util::normalize_required_text(
                &cmd.display_name,
                "displayName",
                DISPLAY_NAME_MAX_CHARS,
            )?;
            if display_name.chars().count() < DISPLAY_NAME_MIN_CHARS {
                return Err(EngineError::InvalidField {
                    field: "displayName",
                    reason: format!("must be at least {DISPLAY_NAME_MIN_CHARS} characters"),
                });
            }
            if cmd.password.chars().count() < PASSWORD_MIN_CHARS {
                return Err(EngineError::InvalidField {
                    field: "password",
                    reason: format!("must be at least {PASSWORD_MIN_CHARS} characters"),
                });
            }

            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::EmailTaken);
            }

            let salt = random_salt();
            let digest = password_digest(&salt, &cmd.password);
            let user = User {
                id: Uuid::new_v4(),
                email,
                display_name,
                created_at: Utc::now(),
            };
            users::ActiveModel {
                id: ActiveValue::Set(user.id.to_string()),
                email: ActiveValue::Set(user.email.clone()),
                display_name: ActiveValue::Set(user.display_name.clone()),
                password_salt: ActiveValue::Set(salt),
                password_digest: ActiveValue::Set(digest),
                created_at: ActiveValue::Set(user.created_at),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| on_unique_violation(err, EngineError::EmailTaken))?;
            Ok(user)
        })
    }

    /// Verify credentials and open a session. Unknown emails and wrong
    /// passwords fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<(String, User)> {
        with_tx!(self, |db_tx| {
            let email = email.trim().to_lowercase();
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email))
                .one(&db_tx)
                .await?
                .ok_or(EngineError::InvalidCredentials)?;
            if password_digest(&model.password_salt, password) != model.password_digest {
                return Err(EngineError::InvalidCredentials);
            }

            let token = random_token();
            sessions::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                token: ActiveValue::Set(token.clone()),
                user_id: ActiveValue::Set(model.id.clone()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            let user = User::try_from(model)?;
            Ok((token, user))
        })
    }

    /// Resolve a bearer token to its account.
    pub async fn authenticate(&self, token: &str) -> ResultEngine<User> {
        let Some((_, Some(model))) = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token.to_string()))
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?
        else {
            return Err(EngineError::InvalidCredentials);
        };
        User::try_from(model)
    }

    /// Drop the session for `token`. Logging out twice is a no-op.
    pub async fn logout(&self, token: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            sessions::Entity::delete_many()
                .filter(sessions::Column::Token.eq(token.to_string()))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}

fn normalize_email(raw: &str) -> ResultEngine<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(EngineError::MissingField("email"));
    }
    // Light shape check only.
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(EngineError::InvalidField {
            field: "email",
            reason: "must be a valid email address".to_string(),
        });
    }
    Ok(email)
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}

fn random_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().r#gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn random_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().r#gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for raw in ["ada", "@example.com", "ada@", "ada@nodot"] {
            assert!(normalize_email(raw).is_err(), "accepted {raw:?}");
        }
        assert_eq!(
            normalize_email("   ").unwrap_err(),
            EngineError::MissingField("email")
        );
    }

    #[test]
    fn digest_depends_on_salt_and_password() {
        let a = password_digest("salt-a", "hunter2hunter2");
        assert_eq!(a, password_digest("salt-a", "hunter2hunter2"));
        assert_ne!(a, password_digest("salt-b", "hunter2hunter2"));
        assert_ne!(a, password_digest("salt-a", "correct horse"));
    }
}
