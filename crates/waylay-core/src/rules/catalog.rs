//! Product catalog rule collection.
//!
//! The specific routes sit at priority 1; the generic `/api/products`
//! listing sits at priority 5, so its substring pattern never shadows
//! `/api/products/search` or a product detail URL.

use crate::mocks::registry::RuleCollection;
use crate::rules::sample;
use crate::types::response::error_envelope;
use crate::types::rule::{HttpMethod, Rule, UrlPattern};
use serde_json::{json, Value};

pub fn collection() -> RuleCollection {
    RuleCollection::new(
        "catalog",
        vec![
            categories_rule(),
            search_rule(),
            popular_rule(),
            by_category_rule(),
            detail_rule(),
            list_rule(),
        ],
    )
}

fn categories_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/categories"), |_| {
        Ok(json!({
            "code": 200,
            "data": sample::categories(),
            "message": "categories loaded",
        }))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(200)
}

fn list_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/products"), |_| {
        Ok(json!({
            "code": 200,
            "data": sample::product_groups(),
            "message": "products loaded",
        }))
    })
    .method(HttpMethod::Get)
    .priority(5)
    .delay_ms(300)
}

fn by_category_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/products/category/*"), |ctx| {
        let category_id = ctx
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(1);
        Ok(json!({
            "code": 200,
            "data": sample::products_in_category(category_id),
            "message": "category products loaded",
        }))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(200)
}

fn search_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/products/search"), |ctx| {
        let keyword = ctx.query_param("keyword").unwrap_or("");
        Ok(json!({
            "code": 200,
            "data": search_products(keyword),
            "message": "search complete",
        }))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(250)
}

fn detail_rule() -> Rule {
    let pattern = UrlPattern::compiled(r"/api/products/\d+$").expect("static pattern compiles");
    Rule::new(pattern, |ctx| {
        let product_id = ctx
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(0);

        match sample::find_product(product_id) {
            Some(product) => Ok(json!({
                "code": 200,
                "data": product,
                "message": "product loaded",
            })),
            None => Ok(error_envelope(404, "product not found")),
        }
    })
    .method(HttpMethod::Get)
    .priority(2)
    .delay_ms(150)
}

fn popular_rule() -> Rule {
    Rule::new(UrlPattern::literal("/api/products/popular"), |_| {
        let popular: Vec<Value> = sample::product_items()
            .into_iter()
            .filter(|item| {
                matches!(
                    item.get("badge").and_then(Value::as_str),
                    Some("hot") | Some("recommended") | Some("seasonal")
                )
            })
            .take(8)
            .collect();
        Ok(json!({
            "code": 200,
            "data": popular,
            "message": "popular products loaded",
        }))
    })
    .method(HttpMethod::Get)
    .priority(1)
    .delay_ms(200)
}

/// Groups whose items mention the keyword in title or description, with
/// non-matching items dropped.
fn search_products(keyword: &str) -> Vec<Value> {
    sample::product_groups()
        .into_iter()
        .filter_map(|mut group| {
            let items: Vec<Value> = group
                .get("items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter(|item| item_matches(item, keyword))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            if items.is_empty() {
                return None;
            }
            if let Some(object) = group.as_object_mut() {
                object.insert("items".to_string(), Value::Array(items));
            }
            Some(group)
        })
        .collect()
}

fn item_matches(item: &Value, keyword: &str) -> bool {
    ["title", "desc"].iter().any(|field| {
        item.get(*field)
            .and_then(Value::as_str)
            .is_some_and(|text| text.contains(keyword))
    })
}
