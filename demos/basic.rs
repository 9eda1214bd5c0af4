//! Basic example demonstrating mock-fetch usage.
//!
//! Run with: cargo run --example basic

use mock_fetch::{clear_mocks, fetch, mock, Body, MockOptions, Request};
use reqwest::Method;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = "https://dummyjson.com/test";

    // Register mock behaviors
    mock(
        url,
        MockOptions::new()
            .with_method("POST")
            .with_header("x-foo-bar", "baz")
            .with_body(Body::json(&json!({ "foo": "bar" }))?)
            .with_status(418)
            .with_response_header("x-baz-qux", "quux"),
    )?;
    let users = mock("https://dummyjson.com/users/*", MockOptions::new().with_body("[]"))?
        .into_mock();

    println!("Registered mocks:");
    println!("  - POST {url} (x-foo-bar: baz) -> 418 {{\"foo\":\"bar\"}}");
    println!("  - GET https://dummyjson.com/users/* -> 200 []");
    println!();

    println!("=== POST {url} ===");
    let request = Request::new(url)
        .with_method(Method::POST)
        .with_header("x-foo-bar", "baz")?;
    let response = fetch(request).await?;
    println!("Status => {}", response.status());
    println!("Headers => {:?}", response.headers());
    let body: serde_json::Value = response.json().await?;
    println!("Body => {body}\n");

    println!("=== GET https://dummyjson.com/users/1 ===");
    let response = fetch("https://dummyjson.com/users/1").await?;
    println!("Body => {}", response.text().await?);
    println!("Users mock called {} time(s)\n", users.times_called());

    // Restore the real transport
    clear_mocks();
    println!("Mocks cleared.");

    Ok(())
}
