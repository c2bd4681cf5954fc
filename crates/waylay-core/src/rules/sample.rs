//! Deterministic sample payload builders for the built-in rule collections.

use serde_json::{json, Value};

const SAMPLE_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

pub fn user_summary(id: u64) -> Value {
    json!({
        "id": id,
        "username": format!("user{id}"),
        "nickname": format!("User {id}"),
        "avatar": format!("https://avatars.example.com/u/{id}"),
        "email": format!("user{id}@example.com"),
        "phone": format!("1380000{id:04}"),
        "status": 1,
        "createTime": SAMPLE_TIMESTAMP,
    })
}

pub fn user_list(count: u64) -> Vec<Value> {
    (1..=count).map(user_summary).collect()
}

pub fn user_detail(id: u64) -> Value {
    let mut user = user_summary(id);
    if let Some(object) = user.as_object_mut() {
        object.insert("lastLoginTime".to_string(), json!(SAMPLE_TIMESTAMP));
    }
    user
}

pub fn timestamp() -> &'static str {
    SAMPLE_TIMESTAMP
}

/// Page slice with totals; pages are 1-based.
pub fn paginate(items: Vec<Value>, page: usize, page_size: usize) -> Value {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let list: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    json!({
        "list": list,
        "total": total,
        "page": page,
        "pageSize": page_size,
        "totalPages": total.div_ceil(page_size),
    })
}

pub fn categories() -> Value {
    json!([
        { "id": 1, "name": "Curated bundles", "icon": "gift", "badge": "" },
        { "id": 2, "name": "New arrivals", "icon": "sparkle", "badge": "NEW" },
        { "id": 3, "name": "Fresh milk tea", "icon": "cup", "badge": "" },
        { "id": 4, "name": "Light fruit tea", "icon": "leaf", "badge": "" },
    ])
}

pub fn product_groups() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Curated bundles",
            "items": [
                {
                    "id": 101,
                    "title": "Fridge-magnet bundle with a large milk tea",
                    "desc": "One large fresh milk tea plus a collectible magnet, while stock lasts.",
                    "price": 35.9,
                    "image": "https://images.example.com/products/101.jpg",
                    "badge": "bundle",
                },
                {
                    "id": 102,
                    "title": "Three-cup sharing bundle",
                    "desc": "Any three classic cups, made for the office afternoon.",
                    "price": 48.6,
                    "image": "https://images.example.com/products/102.jpg",
                    "badge": "deal",
                },
            ],
        }),
        json!({
            "id": 2,
            "name": "New arrivals",
            "items": [
                {
                    "id": 201,
                    "title": "Amber oolong latte",
                    "desc": "Roasted oolong base with fresh milk and a light caramel note.",
                    "price": 18.0,
                    "image": "https://images.example.com/products/201.jpg",
                    "badge": "hot",
                },
                {
                    "id": 202,
                    "title": "Magnolia black tea latte",
                    "desc": "Classic black tea base with fresh milk, rich and plain.",
                    "price": 16.0,
                    "image": "https://images.example.com/products/202.jpg",
                    "badge": "",
                },
            ],
        }),
        json!({
            "id": 3,
            "name": "Fresh milk tea",
            "items": [
                {
                    "id": 301,
                    "title": "Creme brulee latte",
                    "desc": "Torched custard flavor folded into a fresh milk tea.",
                    "price": 19.0,
                    "image": "https://images.example.com/products/301.jpg",
                    "badge": "recommended",
                },
            ],
        }),
        json!({
            "id": 4,
            "name": "Light fruit tea",
            "items": [
                {
                    "id": 401,
                    "title": "Grape jasmine tea",
                    "desc": "Whole grape pulp over a jasmine green tea base.",
                    "price": 18.0,
                    "image": "https://images.example.com/products/401.jpg",
                    "badge": "seasonal",
                },
            ],
        }),
    ]
}

/// Every product item across all groups, in group order.
pub fn product_items() -> Vec<Value> {
    product_groups()
        .into_iter()
        .filter_map(|group| group.get("items").and_then(Value::as_array).cloned())
        .flatten()
        .collect()
}

/// Items of the group with the given id; empty when the group is unknown.
pub fn products_in_category(category_id: u64) -> Vec<Value> {
    product_groups()
        .into_iter()
        .find(|group| group.get("id").and_then(Value::as_u64) == Some(category_id))
        .and_then(|group| group.get("items").and_then(Value::as_array).cloned())
        .unwrap_or_default()
}

/// Product item by id across all groups.
pub fn find_product(product_id: u64) -> Option<Value> {
    product_items()
        .into_iter()
        .find(|item| item.get("id").and_then(Value::as_u64) == Some(product_id))
}

pub fn login_success(username: &str) -> Value {
    let token = format!("mock-jwt-token-{username}");
    json!({
        "code": 200,
        "data": {
            "token": token,
            "refreshToken": format!("refresh-{token}"),
            "userInfo": {
                "id": 1,
                "username": username,
                "nickname": "Test User",
                "avatar": "https://avatars.example.com/u/1",
            },
        },
        "message": "login ok",
    })
}

pub fn login_error(message: &str) -> Value {
    json!({
        "code": 401,
        "data": null,
        "message": message,
        "success": false,
    })
}

pub fn captcha() -> Value {
    json!({
        "code": 200,
        "data": {
            "captchaEnabled": true,
            "uuid": "mock-uuid-0001",
            "image": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==",
        },
    })
}
