use std::fs;

use pricechart_core::PageConfig;
use pricechart_payload::chart_config_from_str;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn golden_config() -> Value {
    let expected = fs::read_to_string(fixture_path("price_chart_config.json"))
        .expect("Không đọc được golden config");
    serde_json::from_str(&expected).expect("Golden không hợp lệ")
}

#[test]
fn plain_payload_matches_golden() {
    let text = fs::read_to_string(fixture_path("product_payload.json"))
        .expect("Không đọc được payload mẫu");

    let config =
        chart_config_from_str(&text, &PageConfig::default()).expect("Không dựng được config");

    let actual = serde_json::to_value(config).expect("Không serialize config");
    assert_eq!(actual, golden_config());
}

#[test]
fn embedded_payload_matches_golden() {
    let text = fs::read_to_string(fixture_path("product_payload_embedded.txt"))
        .expect("Không đọc được payload mẫu");

    let config =
        chart_config_from_str(&text, &PageConfig::default()).expect("Không dựng được config");

    let actual = serde_json::to_value(config).expect("Không serialize config");
    assert_eq!(actual, golden_config());
}
