//! Bridge WASM <-> JavaScript trung lập framework cho payload giá.

use pricechart_core::{PageConfig, PageConfigOverrides, PayloadError};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Giải mã text payload (một hoặc hai lớp JSON) thành object JS.
#[wasm_bindgen]
pub fn decode_payload(text: &str) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let payload = pricechart_payload::decode_payload_str(text)
        .map_err(|err| JsValue::from_str(&format_payload_error(err)))?;
    to_js(&payload)
}

/// Dựng cấu hình Chart.js từ text payload, có thể ghi đè một phần cấu hình trang.
#[wasm_bindgen]
pub fn build_chart_config(text: &str, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = match config {
        Some(js_cfg) => {
            let overrides: PageConfigOverrides = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            PageConfig::from(overrides)
        }
        None => PageConfig::default(),
    };

    let chart = pricechart_payload::chart_config_from_str(text, &cfg)
        .map_err(|err| JsValue::from_str(&format_payload_error(err)))?;
    to_js(&chart)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Không serialize được: {err}")))
}

fn format_payload_error(err: PayloadError) -> String {
    format!("Payload error: {err}")
}
