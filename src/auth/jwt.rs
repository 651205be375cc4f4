use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: i64,
}

pub fn generate_token<K: AsRef<[u8]>>(
    claims: UserClaims,
    key: K,
) -> jsonwebtoken::errors::Result<String> {
    let header = Header::default();
    let key = EncodingKey::from_secret(key.as_ref());

    let token = jsonwebtoken::encode(&header, &claims, &key)?;
    Ok(token)
}

pub fn process_token<K: AsRef<[u8]>>(
    token: &str,
    key: K,
) -> jsonwebtoken::errors::Result<TokenData<UserClaims>> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(key.as_ref());

    let claims = jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?;
    Ok(claims)
}

#[cfg(test)]
mod test {
    use super::*;

    fn claims(exp: i64) -> UserClaims {
        UserClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            exp,
        }
    }

    #[test]
    fn token_round_trips_subject() {
        let c = claims((chrono::Utc::now() + chrono::Duration::hours(1)).timestamp());
        let token = generate_token(c.clone(), "k").unwrap();
        let data = process_token(&token, "k").unwrap();
        assert_eq!(data.claims.sub, c.sub);
    }

    #[test]
    fn wrong_key_and_expired_tokens_are_rejected() {
        let c = claims((chrono::Utc::now() + chrono::Duration::hours(1)).timestamp());
        let token = generate_token(c, "k").unwrap();
        assert!(process_token(&token, "other").is_err());

        let expired = claims((chrono::Utc::now() - chrono::Duration::hours(2)).timestamp());
        let token = generate_token(expired, "k").unwrap();
        assert!(process_token(&token, "k").is_err());
    }
}
