//! Vẽ biểu đồ lịch sử giá từ payload nhúng trong trang.

use pricechart_core::page::{ChartLibrary, Page};
use pricechart_core::{PageConfig, PageError, PayloadError};
use pricechart_payload::{build_chart_config, decode_payload_str};
use serde_json::Value;

/// Kết quả một lần vẽ. Mọi nhánh lỗi đều đã được ghi log, không nhánh nào làm hỏng trang.
#[derive(Debug)]
pub enum RenderOutcome {
    Mounted,
    NoPayload(PayloadError),
    MissingMount,
    MountFailed(PageError),
}

impl RenderOutcome {
    pub fn is_mounted(&self) -> bool {
        matches!(self, RenderOutcome::Mounted)
    }
}

/// Đọc payload, dựng cấu hình biểu đồ đường và gắn vào element biểu đồ.
///
/// Thiếu element, payload rỗng, JSON hỏng hay payload `null` đều dẫn tới
/// việc trả về sớm mà không chạm vào trang.
pub fn render_timeline<P, C>(page: &P, charts: &C, config: &PageConfig) -> RenderOutcome
where
    P: Page + ?Sized,
    C: ChartLibrary<P> + ?Sized,
{
    let payload = match read_payload(page, config) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "bỏ qua biểu đồ giá");
            return RenderOutcome::NoPayload(err);
        }
    };

    let Some(target) = page.element_by_id(&config.chart_element_id) else {
        tracing::warn!(id = %config.chart_element_id, "không tìm thấy element biểu đồ");
        return RenderOutcome::MissingMount;
    };

    let chart = build_chart_config(&payload, config);
    match charts.mount(page, &target, &chart) {
        Ok(()) => {
            tracing::debug!(id = %config.chart_element_id, "đã gắn biểu đồ giá");
            RenderOutcome::Mounted
        }
        Err(err) => {
            tracing::warn!(error = %err, "thư viện biểu đồ từ chối cấu hình");
            RenderOutcome::MountFailed(err)
        }
    }
}

fn read_payload<P: Page + ?Sized>(page: &P, config: &PageConfig) -> Result<Value, PayloadError> {
    let element = page
        .element_by_id(&config.payload_element_id)
        .ok_or_else(|| PayloadError::MissingElement(config.payload_element_id.clone()))?;
    let text = page.text_content(&element).unwrap_or_default();
    decode_payload_str(&text)
}
