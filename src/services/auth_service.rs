use crate::{
    config::AppConfig,
    database::Database,
    models::User,
    utils::AppError,
};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MISSING_FIELDS: &str = "Missing fields";
pub const EMAIL_TAKEN: &str = "Email already registered";
pub const USERNAME_TAKEN: &str = "Username already taken";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // user id
    pub iat: usize,    // issued at
    pub exp: usize,    // expiration
    pub jti: String,   // JWT ID
    pub aud: String,   // audience
    pub iss: String,   // issuer
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::Auth("Invalid token subject".to_string()))
    }
}

// Request/Response structures
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Signs and verifies bearer tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: &str, issuer: &str, audience: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            Duration::minutes(config.jwt_expires_minutes),
        )
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Auth("Invalid or expired token".to_string())
            })
    }
}

// User registration
pub async fn register(
    db: &Database,
    bcrypt_cost: u32,
    request: &RegisterRequest,
) -> Result<User, AppError> {
    let (username, email, password) = match (&request.username, &request.email, &request.password) {
        (Some(u), Some(e), Some(p)) => (u.as_str(), e.as_str(), p.as_str()),
        _ => return Err(AppError::Validation(MISSING_FIELDS.to_string())),
    };

    let email_exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db.pool())
        .await?;
    if email_exists.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let username_exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(db.pool())
        .await?;
    if username_exists.is_some() {
        return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash(password, bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?) RETURNING id, username, email, password_hash",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .fetch_one(db.pool())
    .await
    .map_err(map_insert_error)?;

    log::info!("✅ User registered successfully: {} (id: {})", user.username, user.id);

    Ok(user)
}

/// A UNIQUE violation here means another request won the race after the
/// pre-checks above.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("users.email") {
                AppError::Conflict(EMAIL_TAKEN.to_string())
            } else {
                AppError::Conflict(USERNAME_TAKEN.to_string())
            };
        }
    }
    AppError::Database(e)
}

// User login
pub async fn login(
    db: &Database,
    tokens: &TokenManager,
    request: &LoginRequest,
) -> Result<LoginResponse, AppError> {
    let (email, password) = match (&request.email, &request.password) {
        (Some(e), Some(p)) => (e.as_str(), p.as_str()),
        _ => return Err(AppError::Validation(MISSING_FIELDS.to_string())),
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(db.pool())
    .await?;

    // Same error for unknown email and wrong password
    let user = match user {
        Some(user) => user,
        None => {
            log::debug!("Login attempt for unknown email");
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }
    };

    let valid = verify(password, &user.password_hash).unwrap_or_else(|e| {
        log::warn!("⚠️ Unreadable password hash for user {}: {}", user.id, e);
        false
    });

    if !valid {
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = tokens.issue(user.id)?;

    Ok(LoginResponse { access_token })
}
