use registrar_auth::{Role, create_access_token, verify_token};
use registrar_config::JwtConfig;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token("7", "test@example.com", Role::Student, &jwt_config).unwrap();
    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_token_round_trip_preserves_every_role() {
    let jwt_config = get_test_jwt_config();

    for role in [Role::Admin, Role::Teacher, Role::Student, Role::Parent] {
        let token = create_access_token("7", "test@example.com", role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.role, role);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "test@example.com");
    }
}

#[test]
fn test_token_expiry_follows_config() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token("7", "test@example.com", Role::Admin, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("7", "test@example.com", Role::Admin, &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "a_completely_different_secret_value".to_string(),
        access_token_expiry: 3600,
    };
    let err = verify_token(&token, &other).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
}

#[test]
fn test_verify_token_tampered_payload() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("7", "test@example.com", Role::Student, &jwt_config).unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    let forged = create_access_token("1", "root@example.com", Role::Admin, &jwt_config).unwrap();
    let forged_payload = forged.split('.').nth(1).unwrap().to_string();
    parts[1] = &forged_payload;
    let tampered = parts.join(".");

    // Payload swapped under the original signature
    assert!(verify_token(&tampered, &jwt_config).is_err());
}

#[test]
fn test_verify_token_garbage() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("", &jwt_config).is_err());
    assert!(verify_token("not.a.token", &jwt_config).is_err());
}
