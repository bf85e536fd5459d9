use crate::utils::AppError;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expires_minutes: i64,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
    pub templates_dir: String,
    pub static_dir: String,
    pub seed_products: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let port = get("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid PORT: {}", e)))?;

        let jwt_expires_minutes = get("JWT_EXPIRES_MINUTES")
            .unwrap_or_else(|| "15".to_string())
            .parse::<i64>()
            .map_err(|e| AppError::Config(format!("Invalid JWT_EXPIRES_MINUTES: {}", e)))?;
        if jwt_expires_minutes <= 0 {
            return Err(AppError::Config(
                "JWT_EXPIRES_MINUTES must be positive".to_string(),
            ));
        }

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| AppError::Config(format!("Invalid BCRYPT_COST: {}", e)))?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::Config(format!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                bcrypt_cost
            )));
        }

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let seed_products = get("SEED_PRODUCTS")
            .unwrap_or_else(|| "false".to_string())
            .parse::<bool>()
            .map_err(|e| AppError::Config(format!("Invalid SEED_PRODUCTS: {}", e)))?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: get("JWT_ISSUER").unwrap_or_else(|| "shop-service".to_string()),
            jwt_audience: get("JWT_AUDIENCE").unwrap_or_else(|| "shop-api".to_string()),
            jwt_expires_minutes,
            bcrypt_cost,
            cors_allowed_origins,
            templates_dir: get("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            seed_products,
        })
    }
}
