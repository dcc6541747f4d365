use dashboard::catalog;
use dashboard::client::{ApiConfig, HttpResourceApi, ResourceApi};
use dashboard::models::Resource;
use dotenvy::dotenv;
use serde::Deserialize;
use serde_json::Value;
use std::env;

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[derive(Debug, Deserialize)]
struct Fixture {
    resource: String,
    items: Vec<Value>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let path = env::args()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .ok_or("usage: seed <fixture.json> [--apply]")?;

    let fixture: Fixture = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let descriptor = catalog::find(&fixture.resource)?;
    let dry_run = is_dry_run();

    let api = if dry_run {
        None
    } else {
        Some(HttpResourceApi::new(ApiConfig::new_from_env()?)?)
    };

    let total = fixture.items.len();
    let mut created = 0;

    for (index, raw) in fixture.items.into_iter().enumerate() {
        let item = match Resource::try_from(raw) {
            Ok(item) => item,
            Err(value) => {
                println!("Skipping item {}: not an object ({})", index, value);
                continue;
            }
        };

        match &api {
            None => {
                println!("[DRY RUN] Would create {} {}", descriptor.name, Value::from(item));
            }
            Some(api) => {
                let saved = api.create(descriptor, &item).await?;
                println!(
                    "Created {} {}",
                    descriptor.name,
                    saved.id(descriptor.id_field).unwrap_or_default()
                );
            }
        }
        created += 1;
    }

    println!("Created: {} / {}", created, total);

    Ok(())
}
