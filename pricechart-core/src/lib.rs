//! Kiểu dữ liệu lõi cho biểu đồ lịch sử giá và các thành phần trang sản phẩm.

pub mod page;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cấu hình các định danh DOM và nhãn hiển thị mà trang sản phẩm cung cấp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Element chứa payload JSON dạng text.
    pub payload_element_id: String,
    /// Element mà thư viện biểu đồ gắn vào.
    pub chart_element_id: String,
    /// Khung mô tả thương hiệu có thể thu gọn.
    pub description_element_id: String,
    /// Nút "Read More" điều khiển khung mô tả.
    pub read_more_element_id: String,
    /// Class CSS làm mờ/cắt khung mô tả.
    pub faded_class: String,
    /// Chuỗi con trong path đánh dấu trang sản phẩm.
    pub product_path_marker: String,
    pub series_label: String,
    pub border_width: u32,
    pub read_more_label: String,
    pub read_less_label: String,
    /// URL module ES của Chart.js dùng cho `import()` động.
    pub chart_module_url: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            payload_element_id: "productdata".to_string(),
            chart_element_id: "price-chart".to_string(),
            description_element_id: "brand-description".to_string(),
            read_more_element_id: "brand-description-read-more".to_string(),
            faded_class: "brand-description--is-faded".to_string(),
            product_path_marker: "products/".to_string(),
            series_label: "Recorded Prices".to_string(),
            border_width: 1,
            read_more_label: "Read More".to_string(),
            read_less_label: "Read Less".to_string(),
            chart_module_url: "https://cdn.jsdelivr.net/npm/chart.js@4/auto/+esm".to_string(),
        }
    }
}

impl PageConfig {
    /// Path hiện tại có thuộc trang sản phẩm không.
    pub fn is_product_path(&self, path: &str) -> bool {
        path.contains(&self.product_path_marker)
    }
}

/// Ghi đè một phần `PageConfig`, trường nào vắng thì giữ mặc định.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfigOverrides {
    pub payload_element_id: Option<String>,
    pub chart_element_id: Option<String>,
    pub description_element_id: Option<String>,
    pub read_more_element_id: Option<String>,
    pub faded_class: Option<String>,
    pub product_path_marker: Option<String>,
    pub series_label: Option<String>,
    pub border_width: Option<u32>,
    pub read_more_label: Option<String>,
    pub read_less_label: Option<String>,
    pub chart_module_url: Option<String>,
}

impl From<PageConfigOverrides> for PageConfig {
    fn from(overrides: PageConfigOverrides) -> Self {
        let mut base = PageConfig::default();
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = overrides.$field {
                    base.$field = value;
                })*
            };
        }
        apply!(
            payload_element_id,
            chart_element_id,
            description_element_id,
            read_more_element_id,
            faded_class,
            product_path_marker,
            series_label,
            border_width,
            read_more_label,
            read_less_label,
            chart_module_url,
        );
        base
    }
}

/// Một lần ghi nhận giá của sản phẩm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub recorded_at: DateTime<Utc>,
    pub price: f64,
}

/// Payload nhúng vào trang: `dates[i]` ứng với `prices[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricePayload {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl PricePayload {
    /// Dựng payload từ chuỗi điểm giá, sắp theo thời gian, ngày dạng `YYYY-MM-DD`.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.recorded_at);
        let (dates, prices): (Vec<String>, Vec<f64>) = points
            .into_iter()
            .map(|point| (point.recorded_at.format("%Y-%m-%d").to_string(), point.price))
            .unzip();
        Self { dates, prices }
    }
}

/// Loại biểu đồ; hiện chỉ dùng biểu đồ đường.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
}

/// Cấu hình biểu đồ theo đúng hình dạng Chart.js mong đợi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    /// Nhãn trục x, lấy nguyên văn từ payload.
    pub labels: Value,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    /// Giá trị trục y, lấy nguyên văn từ payload.
    pub data: Value,
    pub border_width: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartOptions {
    pub scales: ChartScales,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartScales {
    pub y: AxisOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
}

impl ChartConfig {
    /// Biểu đồ đường một chuỗi dữ liệu, trục y bắt đầu từ 0.
    pub fn line(labels: Value, data: Value, config: &PageConfig) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels,
                datasets: vec![ChartDataset {
                    label: config.series_label.clone(),
                    data,
                    border_width: config.border_width,
                }],
            },
            options: ChartOptions {
                scales: ChartScales {
                    y: AxisOptions {
                        begin_at_zero: true,
                    },
                },
            },
        }
    }

    /// Chuỗi dữ liệu duy nhất của biểu đồ.
    pub fn series(&self) -> Option<&ChartDataset> {
        self.data.datasets.first()
    }
}

/// Trạng thái đóng/mở của một cặp nút và khung mô tả.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleState {
    is_open: bool,
}

impl ToggleState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Đảo trạng thái, trả về trạng thái mới.
    pub fn flip(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Nhãn nút tương ứng trạng thái hiện tại.
    pub fn label<'a>(&self, config: &'a PageConfig) -> &'a str {
        if self.is_open {
            &config.read_less_label
        } else {
            &config.read_more_label
        }
    }
}

/// Lỗi khi đọc payload giá nhúng trong trang.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Không tìm thấy element payload #{0}")]
    MissingElement(String),
    #[error("Element payload không có nội dung")]
    Empty,
    #[error("Không đọc được JSON payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Payload rỗng (null, false, 0 hoặc chuỗi rỗng)")]
    Null,
}

/// Lỗi thao tác trên trang.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Không tìm thấy element #{0}")]
    MissingElement(String),
    #[error("Thao tác DOM thất bại: {0}")]
    Dom(String),
    #[error("Không gắn được biểu đồ: {0}")]
    Mount(String),
}

/// Lỗi khi tải module biểu đồ bất đồng bộ.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Không tải được module biểu đồ: {0}")]
    Fetch(String),
    #[error("Module biểu đồ thiếu export hợp lệ: {0}")]
    Export(String),
}
