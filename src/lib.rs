//! Lesson Planner
//!
//! AI-assisted lesson planning service:
//! - Builds a lesson-plan prompt from topic, grade, subject and duration
//! - Calls an OpenAI-style chat-completion provider and parses the reply
//! - Serves the generator over an authenticated HTTP endpoint
//! - Records best-effort usage logs per generation

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use crate::config::{AiConfig, AuthConfig, UsageLogBackend, UsageLogConfig};
use domain::usage_log::UsageLogRepository;
use infrastructure::{
    auth::{JwksJwtService, JwtConfig, JwtService, TokenIssuer, TokenVerifier},
    lesson_plan::{GeneratorConfig, LessonPlanGenerator},
    llm::{ChatCompletionClient, HttpClient},
    usage_log::{InMemoryUsageLogRepository, PostgresUsageLogRepository, UsageLogService},
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let generator = create_generator(&config.ai)?;
    let usage_log = UsageLogService::new(create_usage_log_repository(&config.usage_log).await?);
    let token_verifier = create_token_verifier(&config.auth);

    Ok(AppState::new(
        Arc::new(generator),
        Arc::new(usage_log),
        token_verifier,
    ))
}

/// Build the lesson-plan generator for the configured provider
pub fn create_generator(config: &AiConfig) -> anyhow::Result<LessonPlanGenerator<HttpClient>> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("No AI provider key configured. Set KIMI_API_KEY or APP__AI__API_KEY")
    })?;

    let http_client = match config.http_timeout_secs {
        Some(secs) => HttpClient::with_timeout(Duration::from_secs(secs))?,
        None => HttpClient::new(),
    };

    info!(endpoint = %config.base_url, model = %config.model, "AI provider configured");

    Ok(LessonPlanGenerator::new(
        ChatCompletionClient::with_endpoint(http_client, api_key, &config.base_url),
        GeneratorConfig {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        },
    ))
}

async fn create_usage_log_repository(
    config: &UsageLogConfig,
) -> anyhow::Result<Arc<dyn UsageLogRepository>> {
    match config.backend {
        UsageLogBackend::Memory => {
            info!(max_records = config.max_records, "Usage log backend: memory");
            Ok(Arc::new(InMemoryUsageLogRepository::new(config.max_records)))
        }
        UsageLogBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("usage_log.backend is postgres but DATABASE_URL is not set")
            })?;

            info!("Usage log backend: postgres");
            Ok(Arc::new(PostgresUsageLogRepository::connect(database_url).await?))
        }
    }
}

/// Token verifier from configuration: JWKS first, then HMAC secret
pub fn create_token_verifier(config: &AuthConfig) -> Arc<dyn TokenVerifier> {
    let expiration = u64::from(config.jwt_expiration_hours);

    if let Some(jwks) = &config.jwks {
        match JwksJwtService::from_jwks_json(jwks, expiration) {
            Ok(service) => {
                info!(key_id = %service.key_id(), "Using JWKS for token verification");
                return Arc::new(service);
            }
            Err(e) => warn!("Failed to parse JWKS: {}. Falling back to secret.", e),
        }
    }

    Arc::new(create_jwt_service_from_secret(config, expiration))
}

/// Token issuer from configuration, used by the `token` command
pub fn create_token_issuer(config: &AuthConfig) -> anyhow::Result<Box<dyn TokenIssuer>> {
    let expiration = u64::from(config.jwt_expiration_hours);

    if let Some(jwks) = &config.jwks {
        let service = JwksJwtService::from_jwks_json(jwks, expiration)?;
        return Ok(Box::new(service));
    }

    let secret = config
        .jwt_secret
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No JWT_SECRET or USERS_JWKS configured"))?;

    Ok(Box::new(JwtService::new(JwtConfig::new(secret, expiration))))
}

fn create_jwt_service_from_secret(config: &AuthConfig, expiration: u64) -> JwtService {
    let secret = config.jwt_secret.clone().unwrap_or_else(|| {
        warn!(
            "No USERS_JWKS or JWT_SECRET configured. Generating random secret. \
            Tokens issued elsewhere will be rejected."
        );
        generate_random_secret()
    });

    JwtService::new(JwtConfig::new(secret, expiration))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identity;

    #[test]
    fn test_generator_requires_api_key() {
        let config = AiConfig::default();
        assert!(create_generator(&config).is_err());
    }

    #[test]
    fn test_generator_uses_configured_model() {
        let config = AiConfig {
            api_key: Some("sk-test".to_string()),
            model: "k2-turbo".to_string(),
            http_timeout_secs: Some(10),
            ..AiConfig::default()
        };

        let generator = create_generator(&config).unwrap();
        assert_eq!(generator.config().model, "k2-turbo");
    }

    #[test]
    fn test_issuer_and_verifier_agree() {
        let config = AuthConfig {
            jwt_secret: Some("shared-secret".to_string()),
            ..AuthConfig::default()
        };

        let token = create_token_issuer(&config)
            .unwrap()
            .issue(&Identity::new("user-1"))
            .unwrap();
        let identity = create_token_verifier(&config).verify(&token).unwrap();

        assert_eq!(identity.user_id(), "user-1");
    }

    #[test]
    fn test_issuer_requires_secret() {
        assert!(create_token_issuer(&AuthConfig::default()).is_err());
    }

    #[test]
    fn test_random_secret_rejects_foreign_tokens() {
        let foreign = JwtService::new(JwtConfig::new("elsewhere", 1))
            .issue(&Identity::new("user-1"))
            .unwrap();

        assert!(create_token_verifier(&AuthConfig::default()).verify(&foreign).is_err());
    }

    #[tokio::test]
    async fn test_postgres_backend_requires_database_url() {
        let config = UsageLogConfig {
            backend: UsageLogBackend::Postgres,
            ..UsageLogConfig::default()
        };

        assert!(create_usage_log_repository(&config).await.is_err());
    }
}
