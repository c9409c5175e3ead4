use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PublicUser, User};
use crate::store::Store;
use crate::utils::ServiceError;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

// Generate JWT token (24h expiry)
pub fn generate_jwt(user: &User) -> Result<String, ServiceError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| ServiceError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, ServiceError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))
}

// User registration
pub fn register(store: &Store, request: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
    let name = request
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ServiceError::Validation("Name is required".to_string()))?;
    let email = request
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ServiceError::Validation("Email is required".to_string()))?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServiceError::Validation("Password is required".to_string()))?;

    let hashed = hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))?;

    store.update(|tables| {
        if tables.user_by_email(email).is_some() {
            return Err(ServiceError::Validation(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: Some(hashed),
            phone: None,
            area: None,
            bio: None,
            age: None,
            interests: vec![],
            hobbies: vec![],
            location: None,
            waves: vec![],
            created_at: Utc::now(),
        };

        let token = generate_jwt(&user)?;
        let public = PublicUser::from(&user);
        tables.users.push(user);

        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: public,
        })
    })
}

// User login
pub fn login(store: &Store, request: &LoginRequest) -> Result<AuthResponse, ServiceError> {
    let tables = store.read();

    let user = tables
        .user_by_email(&request.email)
        .ok_or_else(|| ServiceError::Validation("Invalid email or password".to_string()))?;

    let stored = user
        .password
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("Invalid email or password".to_string()))?;

    let valid = verify(&request.password, stored)
        .map_err(|e| ServiceError::Internal(format!("Password verification error: {}", e)))?;
    if !valid {
        return Err(ServiceError::Validation(
            "Invalid email or password".to_string(),
        ));
    }

    let token = generate_jwt(user)?;

    Ok(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: PublicUser::from(user),
    })
}

// Current user profile, password stripped
pub fn me(store: &Store, user_id: &str) -> Result<PublicUser, ServiceError> {
    let tables = store.read();
    tables
        .user_by_id(user_id)
        .map(PublicUser::from)
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn register_request(name: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some("kampung123".to_string()),
        }
    }

    #[test]
    fn register_then_login_round_trip() {
        let (_dir, store) = test_store();
        let registered =
            register(&store, &register_request("Mei Lin", "mei@example.com")).unwrap();
        assert!(!registered.token.is_empty());

        let logged_in = login(
            &store,
            &LoginRequest {
                email: "mei@example.com".to_string(),
                password: "kampung123".to_string(),
            },
        )
        .unwrap();
        assert_eq!(logged_in.user.email, "mei@example.com");

        let claims = verify_token(&logged_in.token).unwrap();
        assert_eq!(claims.sub, registered.user.id);
    }

    #[test]
    fn duplicate_email_rejected() {
        let (_dir, store) = test_store();
        register(&store, &register_request("Mei Lin", "mei@example.com")).unwrap();
        let err = register(&store, &register_request("Other", "mei@example.com")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn wrong_password_rejected() {
        let (_dir, store) = test_store();
        register(&store, &register_request("Mei Lin", "mei@example.com")).unwrap();
        let err = login(
            &store,
            &LoginRequest {
                email: "mei@example.com".to_string(),
                password: "wrong".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn missing_fields_rejected() {
        let (_dir, store) = test_store();
        let err = register(
            &store,
            &RegisterRequest {
                name: Some("Mei Lin".to_string()),
                email: None,
                password: Some("pw".to_string()),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(matches!(
            verify_token("not-a-jwt"),
            Err(ServiceError::Unauthorized(_))
        ));
    }
}
