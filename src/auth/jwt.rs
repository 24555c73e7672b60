use crate::{model::role::Role, models::Claims};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

fn now() -> usize {
    Utc::now().timestamp().max(0) as usize
}

/// Signs a session token for `user_id` that expires `ttl` seconds from now.
pub fn generate_token(
    user_id: &str,
    email: &str,
    role: Role,
    secret: &str,
    ttl: usize,
) -> Result<(String, Claims), Error> {
    let issued_at = now();
    let claims = Claims {
        user_id: user_id.to_string(),
        sub: email.to_string(),
        role,
        exp: issued_at + ttl,
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, claims))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_identity_and_role() {
        let (token, issued) = generate_token("u-1", "a@b.co", Role::Manager, "k", 3600).unwrap();
        let claims = verify_token(&token, "k").unwrap();

        assert_eq!(claims.user_id, "u-1");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.exp, issued.exp);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = generate_token("u-1", "a@b.co", Role::Admin, "k1", 3600).unwrap();
        assert!(verify_token(&token, "k2").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            user_id: "u-1".into(),
            sub: "a@b.co".into(),
            role: Role::Employee,
            exp: now() - 7200,
            iat: now() - 10800,
            jti: "x".into(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap();

        assert!(verify_token(&token, "k").is_err());
    }
}
