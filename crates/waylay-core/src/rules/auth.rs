//! Authentication rule collection.

use crate::mocks::registry::RuleCollection;
use crate::rules::sample;
use crate::types::response::error_envelope;
use crate::types::rule::{HttpMethod, Rule, UrlPattern};
use serde_json::{json, Value};

pub fn collection() -> RuleCollection {
    RuleCollection::new(
        "auth",
        vec![login_rule(), captcha_rule(), refresh_rule(), logout_rule()],
    )
}

fn login_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/auth/login"), |ctx| {
        let username = ctx
            .body_field("username")
            .and_then(Value::as_str)
            .unwrap_or("");
        let password = ctx
            .body_field("password")
            .and_then(Value::as_str)
            .unwrap_or("");

        if username == "admin" && password == "123456" {
            Ok(sample::login_success(username))
        } else if username.is_empty() {
            Ok(sample::login_error("user does not exist"))
        } else {
            Ok(sample::login_error("invalid username or password"))
        }
    })
    .method(HttpMethod::Post)
    .priority(1)
    .delay_ms(500)
}

fn captcha_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/auth/captcha"), |_| {
        Ok(sample::captcha())
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(200)
}

fn refresh_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/auth/refresh"), |ctx| {
        let refresh_token = ctx
            .body_field("refreshToken")
            .and_then(Value::as_str)
            .unwrap_or("");

        if refresh_token.starts_with("refresh-") {
            let token = "mock-jwt-token-refreshed";
            Ok(json!({
                "code": 200,
                "data": {
                    "token": token,
                    "refreshToken": format!("refresh-{token}"),
                },
            }))
        } else {
            Ok(error_envelope(401, "refresh token rejected"))
        }
    })
    .method(HttpMethod::Post)
    .priority(1)
    .delay_ms(300)
}

fn logout_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/auth/logout"), |_| {
        Ok(json!({
            "code": 200,
            "data": null,
            "message": "logged out",
        }))
    })
    .method(HttpMethod::Post)
    .priority(1)
    .delay_ms(200)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::context::RequestContext;
    use rstest::rstest;

    fn login_ctx(body: Value) -> RequestContext {
        RequestContext {
            url: "/api/auth/login".to_string(),
            method: "POST".to_string(),
            body: Some(body),
            ..RequestContext::default()
        }
    }

    #[rstest]
    fn test_login_with_valid_credentials() {
        let rule = login_rule();
        let response =
            (rule.producer)(&login_ctx(json!({"username": "admin", "password": "123456"})))
                .unwrap();
        assert_eq!(response["code"], json!(200));
        assert!(response["data"]["token"].as_str().is_some());
    }

    #[rstest]
    #[case(json!({"username": "admin", "password": "wrong"}))]
    #[case(json!({"username": "guest", "password": "123456"}))]
    #[case(json!({}))]
    fn test_login_rejects_bad_credentials(#[case] body: Value) {
        let rule = login_rule();
        let response = (rule.producer)(&login_ctx(body)).unwrap();
        assert_eq!(response["code"], json!(401));
    }

    #[rstest]
    fn test_refresh_accepts_prefixed_token() {
        let rule = refresh_rule();
        let ctx = RequestContext {
            url: "/api/auth/refresh".to_string(),
            method: "POST".to_string(),
            body: Some(json!({"refreshToken": "refresh-mock-jwt-token-admin"})),
            ..RequestContext::default()
        };
        let response = (rule.producer)(&ctx).unwrap();
        assert_eq!(response["code"], json!(200));
        assert!(response["data"]["refreshToken"]
            .as_str()
            .unwrap()
            .starts_with("refresh-"));
    }

    #[rstest]
    fn test_refresh_rejects_foreign_token() {
        let rule = refresh_rule();
        let ctx = RequestContext {
            url: "/api/auth/refresh".to_string(),
            method: "POST".to_string(),
            body: Some(json!({"refreshToken": "something-else"})),
            ..RequestContext::default()
        };
        let response = (rule.producer)(&ctx).unwrap();
        assert_eq!(response["code"], json!(401));
    }

    #[rstest]
    fn test_collection_contents() {
        let collection = collection();
        assert_eq!(collection.name, "auth");
        assert_eq!(collection.rules.len(), 4);
        assert!(collection.rules.iter().all(|rule| rule.enabled));
    }
}
