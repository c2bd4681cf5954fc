//! User management rule collection.

use crate::mocks::registry::RuleCollection;
use crate::rules::sample;
use crate::types::rule::{HttpMethod, Rule, UrlPattern};
use serde_json::{json, Map, Value};

pub fn collection() -> RuleCollection {
    RuleCollection::new(
        "user",
        vec![
            list_rule(),
            detail_rule(),
            create_rule(),
            update_rule(),
            delete_rule(),
        ],
    )
}

fn list_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/user/list"), |ctx| {
        let page = ctx
            .query_param("page")
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);
        let page_size = ctx
            .query_param("pageSize")
            .and_then(|value| value.parse().ok())
            .unwrap_or(10);
        Ok(sample::paginate(sample::user_list(100), page, page_size))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(200)
}

fn detail_rule() -> Rule {
    let pattern = UrlPattern::compiled(r"/api/user/\d+$").expect("static pattern compiles");
    Rule::new(pattern, |ctx| {
        let id = ctx
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(1);
        Ok(sample::user_detail(id))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(150)
}

fn create_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/user/create"), |ctx| {
        let mut user = Map::new();
        user.insert("id".to_string(), json!(1001));
        if let Some(Value::Object(body)) = &ctx.body {
            user.extend(body.clone());
        }
        user.insert("createTime".to_string(), json!(sample::timestamp()));
        Ok(json!({"success": true, "data": Value::Object(user)}))
    })
    .method(HttpMethod::Post)
    .priority(1)
    .delay_ms(300)
}

fn update_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/user/update"), |ctx| {
        let mut user = match &ctx.body {
            Some(Value::Object(body)) => body.clone(),
            _ => Map::new(),
        };
        user.insert("updateTime".to_string(), json!(sample::timestamp()));
        Ok(json!({"success": true, "data": Value::Object(user)}))
    })
    .method(HttpMethod::Put)
    .priority(1)
    .delay_ms(300)
}

fn delete_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/user/delete"), |_| {
        Ok(json!({"success": true, "message": "deleted"}))
    })
    .method(HttpMethod::Delete)
    .priority(1)
    .delay_ms(200)
}
