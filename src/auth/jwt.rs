use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

pub fn create_access_token(user_id: Uuid, email: &str, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        jti: Uuid::new_v4(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_audience(&[&config.jwt_audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: String::new(),
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: vec![],
            jwt_secret: "unit-test-secret".into(),
            jwt_issuer: "moodtrack-api".into(),
            jwt_audience: "moodtrack-client".into(),
            jwt_ttl_secs: 3600,
        }
    }

    #[test]
    fn test_token_carries_user_id() {
        let config = config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "a@b.co", &config).unwrap();
        let data = verify_token(&token, &config).unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.email, "a@b.co");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_each_token_gets_its_own_jti() {
        let config = config();
        let user_id = Uuid::new_v4();

        let t1 = verify_token(&create_access_token(user_id, "", &config).unwrap(), &config).unwrap();
        let t2 = verify_token(&create_access_token(user_id, "", &config).unwrap(), &config).unwrap();
        assert_ne!(t1.claims.jti, t2.claims.jti);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let config = config();
        let token = create_access_token(Uuid::new_v4(), "a@b.co", &config).unwrap();

        let other = Config {
            jwt_secret: "another-secret".into(),
            ..config
        };
        assert!(matches!(verify_token(&token, &other), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let config = config();
        let token = create_access_token(Uuid::new_v4(), "a@b.co", &config).unwrap();

        let other = Config {
            jwt_audience: "someone-else".into(),
            ..config
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        // Well past the default 60s leeway.
        let config = Config {
            jwt_ttl_secs: -3600,
            ..config()
        };
        let token = create_access_token(Uuid::new_v4(), "a@b.co", &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(verify_token("not.a.jwt", &config()).is_err());
    }
}
