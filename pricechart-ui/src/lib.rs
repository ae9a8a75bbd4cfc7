//! Thành phần trang sản phẩm: biểu đồ lịch sử giá và nút "Read More".

pub mod loader;
pub mod renderer;
pub mod toggle;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use loader::{boot_page, load_timeline, ChartModuleLoader, LoadOutcome};
pub use renderer::{render_timeline, RenderOutcome};
pub use toggle::{wire_description_toggle, ToggleWiring};

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::rc::Rc;

    use pricechart_core::{PageConfig, PageConfigOverrides};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use crate::dom::{ChartJsLoader, DomPage};
    use crate::loader::boot_page;

    /// Khởi động trang: gắn nút mô tả ngay, biểu đồ giá chạy nền.
    #[wasm_bindgen]
    pub fn start_page(config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = tracing_wasm::try_set_as_global_default();

        let config = match config {
            Some(js_cfg) => {
                let overrides: PageConfigOverrides = from_value(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                PageConfig::from(overrides)
            }
            None => PageConfig::default(),
        };

        let page = Rc::new(DomPage::from_window()?);
        let loader = ChartJsLoader::new(config.chart_module_url.clone());
        let (toggle, timeline) = boot_page(page, loader, config);
        tracing::debug!(?toggle, "đã xử lý khung mô tả");

        spawn_local(async move {
            let outcome = timeline.await;
            tracing::debug!(?outcome, "luồng biểu đồ kết thúc");
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::start_page;

#[cfg(not(target_arch = "wasm32"))]
pub fn start_page(_: Option<wasm_bindgen::JsValue>) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "pricechart-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
