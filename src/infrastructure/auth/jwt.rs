//! Bearer token issuing and verification, with JWKS support

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::{BigUint, RsaPrivateKey};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::{DomainError, Identity};

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Issued at (Unix epoch)
    pub iat: i64,
    /// Expiration (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(identity: &Identity, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: identity.user_id().to_string(),
            username: identity.username().map(str::to_string),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn into_identity(self) -> Result<Identity, DomainError> {
        if self.sub.trim().is_empty() {
            return Err(DomainError::credential("Token has no subject"));
        }

        let identity = Identity::new(self.sub);
        Ok(match self.username {
            Some(username) => identity.with_username(username),
            None => identity,
        })
    }
}

/// Token expiry and HMAC secret
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Establishes the caller's identity from a bearer token
pub trait TokenVerifier: Send + Sync + Debug {
    /// Validate a token and return the identity it was issued to
    fn verify(&self, token: &str) -> Result<Identity, DomainError>;
}

/// Issues tokens for an identity
pub trait TokenIssuer: Send + Sync + Debug {
    fn issue(&self, identity: &Identity) -> Result<String, DomainError>;

    fn expiration_hours(&self) -> u64;
}

/// HMAC (HS256) token service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenVerifier for JwtService {
    fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| DomainError::credential(format!("Invalid JWT: {}", e)))?;

        token_data.claims.into_identity()
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, identity: &Identity) -> Result<String, DomainError> {
        let claims = JwtClaims::new(identity, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::credential(format!("Failed to generate JWT: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

/// JWK entry; private RSA members are only needed for issuing
#[derive(Debug, Clone, Deserialize)]
struct JwkKey {
    kty: String,
    kid: Option<String>,
    alg: Option<String>,
    n: Option<String>,
    e: Option<String>,
    d: Option<String>,
    p: Option<String>,
    q: Option<String>,
    /// Symmetric key value for oct keys
    k: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwks {
    keys: Vec<JwkKey>,
}

/// Token service configured from a JWKS document (RSA or oct keys)
///
/// An RSA key with only the public members (`n`, `e`) can verify tokens from
/// an external identity provider but cannot issue new ones.
#[derive(Clone)]
pub struct JwksJwtService {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    key_id: String,
    expiration_hours: u64,
}

impl Debug for JwksJwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksJwtService")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .field("can_issue", &self.encoding_key.is_some())
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwksJwtService {
    pub fn from_jwks_json(jwks_json: &str, expiration_hours: u64) -> Result<Self, DomainError> {
        let jwks: Jwks = serde_json::from_str(jwks_json)
            .map_err(|e| DomainError::configuration(format!("Failed to parse JWKS: {}", e)))?;

        let key = jwks
            .keys
            .iter()
            .find(|k| k.kid.is_some())
            .or_else(|| jwks.keys.first())
            .ok_or_else(|| DomainError::configuration("JWKS contains no keys"))?;

        let key_id = key.kid.clone().unwrap_or_else(|| "default".to_string());

        match key.kty.as_str() {
            "RSA" => Self::from_rsa_jwk(key, key_id, expiration_hours),
            "oct" => Self::from_symmetric_jwk(key, key_id, expiration_hours),
            other => Err(DomainError::configuration(format!(
                "Unsupported key type: {}. Use RSA or oct.",
                other
            ))),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn can_issue(&self) -> bool {
        self.encoding_key.is_some()
    }

    fn from_rsa_jwk(
        key: &JwkKey,
        key_id: String,
        expiration_hours: u64,
    ) -> Result<Self, DomainError> {
        let algorithm = match key.alg.as_deref() {
            Some("RS256") | None => Algorithm::RS256,
            Some("RS384") => Algorithm::RS384,
            Some("RS512") => Algorithm::RS512,
            Some(alg) => {
                return Err(DomainError::configuration(format!(
                    "Unsupported RSA algorithm: {}",
                    alg
                )));
            }
        };

        let n = key
            .n
            .as_deref()
            .ok_or_else(|| DomainError::configuration("RSA key missing 'n' (modulus)"))?;
        let e = key
            .e
            .as_deref()
            .ok_or_else(|| DomainError::configuration("RSA key missing 'e' (public exponent)"))?;

        let decoding_key = DecodingKey::from_rsa_components(n, e)
            .map_err(|e| DomainError::configuration(format!("Invalid RSA public key: {}", e)))?;

        let encoding_key = match key.d.as_deref() {
            Some(d) => Some(rsa_encoding_key(n, e, d, key.p.as_deref(), key.q.as_deref())?),
            None => None,
        };

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm,
            key_id,
            expiration_hours,
        })
    }

    fn from_symmetric_jwk(
        key: &JwkKey,
        key_id: String,
        expiration_hours: u64,
    ) -> Result<Self, DomainError> {
        let k = key
            .k
            .as_deref()
            .ok_or_else(|| DomainError::configuration("Symmetric key missing 'k' value"))?;

        let algorithm = match key.alg.as_deref() {
            Some("HS256") | None => Algorithm::HS256,
            Some("HS384") => Algorithm::HS384,
            Some("HS512") => Algorithm::HS512,
            Some(alg) => {
                return Err(DomainError::configuration(format!(
                    "Unsupported symmetric algorithm: {}",
                    alg
                )));
            }
        };

        let secret = decode_base64url(k, "k")?;

        Ok(Self {
            encoding_key: Some(EncodingKey::from_secret(&secret)),
            decoding_key: DecodingKey::from_secret(&secret),
            algorithm,
            key_id,
            expiration_hours,
        })
    }
}

fn rsa_encoding_key(
    n: &str,
    e: &str,
    d: &str,
    p: Option<&str>,
    q: Option<&str>,
) -> Result<EncodingKey, DomainError> {
    let n = BigUint::from_bytes_be(&decode_base64url(n, "n")?);
    let e = BigUint::from_bytes_be(&decode_base64url(e, "e")?);
    let d = BigUint::from_bytes_be(&decode_base64url(d, "d")?);

    let primes = match (p, q) {
        (Some(p), Some(q)) => vec![
            BigUint::from_bytes_be(&decode_base64url(p, "p")?),
            BigUint::from_bytes_be(&decode_base64url(q, "q")?),
        ],
        _ => Vec::new(),
    };

    let private_key = RsaPrivateKey::from_components(n, e, d, primes)
        .map_err(|e| DomainError::configuration(format!("Invalid RSA key components: {}", e)))?;

    let pem = private_key
        .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .map_err(|e| DomainError::configuration(format!("Failed to encode RSA key: {}", e)))?;

    EncodingKey::from_rsa_pem(pem.as_bytes())
        .map_err(|e| DomainError::configuration(format!("Failed to create encoding key: {}", e)))
}

fn decode_base64url(s: &str, field: &str) -> Result<Vec<u8>, DomainError> {
    URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|e| DomainError::configuration(format!("Invalid base64url in '{}': {}", field, e)))
}

impl TokenVerifier for JwksJwtService {
    fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(self.algorithm))
            .map_err(|e| DomainError::credential(format!("Invalid JWT: {}", e)))?;

        token_data.claims.into_identity()
    }
}

impl TokenIssuer for JwksJwtService {
    fn issue(&self, identity: &Identity) -> Result<String, DomainError> {
        let encoding_key = self.encoding_key.as_ref().ok_or_else(|| {
            DomainError::configuration("JWKS key has no private part; tokens cannot be issued")
        })?;

        let mut header = Header::new(self.algorithm);
        header.kid = Some(self.key_id.clone());

        encode(&header, &JwtClaims::new(identity, self.expiration_hours), encoding_key)
            .map_err(|e| DomainError::credential(format!("Failed to generate JWT: {}", e)))
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 24))
    }

    fn frizzle() -> Identity {
        Identity::new("user-42").with_username("ms.frizzle")
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();

        let token = service.issue(&frizzle()).unwrap();
        let identity = service.verify(&token).unwrap();

        assert_eq!(identity, frizzle());
    }

    #[test]
    fn test_identity_without_username() {
        let service = service();

        let token = service.issue(&Identity::new("user-7")).unwrap();
        let identity = service.verify(&token).unwrap();

        assert_eq!(identity.user_id(), "user-7");
        assert_eq!(identity.username(), None);
    }

    #[test]
    fn test_garbage_token_is_credential_error() {
        let result = service().verify("not-a-jwt");
        assert!(matches!(result, Err(DomainError::Credential { .. })));
    }

    #[test]
    fn test_wrong_secret() {
        let other = JwtService::new(JwtConfig::new("another-secret", 24));
        let token = other.issue(&frizzle()).unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let past = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: "user-42".to_string(),
            username: None,
            iat: (past - Duration::hours(2)).timestamp(),
            exp: past.timestamp(),
        };
        assert!(claims.is_expired());

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_blank_subject_rejected() {
        let claims = JwtClaims {
            sub: "  ".to_string(),
            username: None,
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(DomainError::Credential { .. })
        ));
    }

    #[test]
    fn test_jwks_invalid_json() {
        assert!(JwksJwtService::from_jwks_json("not valid json", 24).is_err());
    }

    #[test]
    fn test_jwks_empty_keys() {
        assert!(JwksJwtService::from_jwks_json(r#"{"keys": []}"#, 24).is_err());
    }

    #[test]
    fn test_jwks_hs256() {
        let k = URL_SAFE_NO_PAD.encode("super-secret-key-for-testing-purposes-12345678");
        let jwks = format!(
            r#"{{"keys": [{{"kty": "oct", "kid": "hmac-1", "alg": "HS256", "k": "{}"}}]}}"#,
            k
        );

        let service = JwksJwtService::from_jwks_json(&jwks, 24).unwrap();
        let token = service.issue(&frizzle()).unwrap();

        assert_eq!(service.key_id(), "hmac-1");
        assert_eq!(service.verify(&token).unwrap(), frizzle());
    }

    #[test]
    fn test_jwks_rs256_private_and_public() {
        use rand::rngs::OsRng;
        use rsa::traits::{PrivateKeyParts, PublicKeyParts};

        let private_key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
        let n = URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be());
        let e = URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be());
        let d = URL_SAFE_NO_PAD.encode(private_key.d().to_bytes_be());
        let primes = private_key.primes();
        let p = URL_SAFE_NO_PAD.encode(primes[0].to_bytes_be());
        let q = URL_SAFE_NO_PAD.encode(primes[1].to_bytes_be());

        let signing = JwksJwtService::from_jwks_json(
            &format!(
                r#"{{"keys": [{{"kty": "RSA", "kid": "rsa-1", "alg": "RS256", "n": "{n}", "e": "{e}", "d": "{d}", "p": "{p}", "q": "{q}"}}]}}"#
            ),
            24,
        )
        .unwrap();
        assert!(signing.can_issue());

        let token = signing.issue(&frizzle()).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.kid.as_deref(), Some("rsa-1"));
        assert_eq!(header.alg, Algorithm::RS256);

        let verifying = JwksJwtService::from_jwks_json(
            &format!(r#"{{"keys": [{{"kty": "RSA", "kid": "rsa-1", "n": "{n}", "e": "{e}"}}]}}"#),
            24,
        )
        .unwrap();
        assert!(!verifying.can_issue());
        assert!(verifying.issue(&frizzle()).is_err());
        assert_eq!(verifying.verify(&token).unwrap(), frizzle());
    }
}
