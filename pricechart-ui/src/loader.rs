//! Tải thư viện biểu đồ theo điều kiện path rồi vẽ biểu đồ.

use std::future::Future;
use std::rc::Rc;

use pricechart_core::page::{ChartLibrary, Page};
use pricechart_core::{LoadError, PageConfig};

use crate::renderer::{render_timeline, RenderOutcome};
use crate::toggle::{wire_description_toggle, ToggleWiring};

/// Nguồn cung cấp thư viện biểu đồ, tải bất đồng bộ.
#[allow(async_fn_in_trait)]
pub trait ChartModuleLoader<P: Page + ?Sized> {
    type Library: ChartLibrary<P>;

    async fn load(&self) -> Result<Self::Library, LoadError>;
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// Không phải trang sản phẩm, module không được yêu cầu.
    Skipped,
    Rendered(RenderOutcome),
    LoadFailed(LoadError),
}

/// Chỉ trên trang sản phẩm mới tải module biểu đồ rồi gọi renderer.
///
/// Lỗi tải module được ghi log và trả về dưới dạng `LoadFailed`; không thử lại.
pub async fn load_timeline<P, L>(page: &P, loader: &L, config: &PageConfig) -> LoadOutcome
where
    P: Page + ?Sized,
    L: ChartModuleLoader<P> + ?Sized,
{
    let path = page.location_path();
    if !config.is_product_path(&path) {
        tracing::debug!(%path, "không phải trang sản phẩm");
        return LoadOutcome::Skipped;
    }

    match loader.load().await {
        Ok(library) => LoadOutcome::Rendered(render_timeline(page, &library, config)),
        Err(err) => {
            tracing::warn!(error = %err, "không tải được module biểu đồ");
            LoadOutcome::LoadFailed(err)
        }
    }
}

/// Khởi động các thành phần của trang.
///
/// Nút mô tả được gắn ngay lập tức; luồng biểu đồ trả về dưới dạng future
/// độc lập, lỗi của nó không ảnh hưởng tới nút mô tả.
pub fn boot_page<P, L>(
    page: Rc<P>,
    loader: L,
    config: PageConfig,
) -> (ToggleWiring, impl Future<Output = LoadOutcome>)
where
    P: Page + 'static,
    P::Element: 'static,
    L: ChartModuleLoader<P>,
{
    let toggle = wire_description_toggle(&page, &config);
    let timeline = async move { load_timeline(&*page, &loader, &config).await };
    (toggle, timeline)
}
