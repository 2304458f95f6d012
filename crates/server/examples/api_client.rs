//! Walks through the lost & found API against a running server
//!
//! ```text
//! cargo run -p lostfound-server &
//! cargo run -p lostfound-server --example api_client
//! ```

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:5000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Report a Lost Item:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/lost-items"))
        .json(&json!({
            "user_id": 1,
            "item_type": "Backpack",
            "color": "Black",
            "lost_location": "Main Library",
            "lost_time_from": "2024-01-01 08:00:00",
            "lost_time_to": "2024-01-01 18:00:00",
            "public_description": "Black backpack with a laptop sleeve",
            "secret_info_1": "blue42",
            "secret_info_2": "room9"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    let created: Value = resp.json().await?;
    println!("Body: {created}");
    let lost_item_id = created["lost_item_id"].as_u64().unwrap_or_default();
    println!();

    println!("3. Log Found Items:");
    let mut found_ids = Vec::new();
    for (item_type, color, location, found_time) in [
        ("backpack", "black", "Library", "2024-01-01T12:00:00Z"),
        ("backpack", "red", "Library", "2024-01-01T13:00:00Z"),
        ("phone", "black", "Gym", "2024-01-01T14:00:00Z"),
    ] {
        let resp = client
            .post(format!("{SERVER_URL}/api/v1/found-items"))
            .json(&json!({
                "admin_id": 9,
                "item_type": item_type,
                "color": color,
                "found_location": location,
                "found_time": found_time,
                "storage_location": "Front desk, shelf B"
            }))
            .send()
            .await?;
        let body: Value = resp.json().await?;
        println!("Logged: {body}");
        found_ids.push(body["found_item_id"].as_u64().unwrap_or_default());
    }
    println!();

    println!("4. Find Matches (with explanation):");
    let resp = client
        .get(format!(
            "{SERVER_URL}/api/v1/lost-items/{lost_item_id}/matches?explain=true"
        ))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("5. Submit a Claim with the Right Secrets:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/claims"))
        .json(&json!({
            "lost_item_id": lost_item_id,
            "found_item_id": found_ids[0],
            "claimer_id": 1,
            "verification_input_1": "blue42",
            "verification_input_2": "room9"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("6. Submit a Claim with a Wrong Secret:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/claims"))
        .json(&json!({
            "lost_item_id": lost_item_id,
            "found_item_id": found_ids[0],
            "claimer_id": 2,
            "verification_input_1": "blue42",
            "verification_input_2": "guess"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("7. Hand the Item Over:");
    let resp = client
        .put(format!(
            "{SERVER_URL}/api/v1/found-items/{}/status",
            found_ids[0]
        ))
        .json(&json!({ "status": "claimed" }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("8. Remaining Available Items:");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/found-items"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
