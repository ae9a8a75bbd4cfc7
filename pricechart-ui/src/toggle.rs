//! Nút "Read More" mở rộng/thu gọn khung mô tả thương hiệu.

use std::rc::Rc;

use pricechart_core::page::{Page, PageEvent};
use pricechart_core::{PageConfig, PageError, ToggleState};

#[derive(Debug)]
pub enum ToggleWiring {
    Wired,
    /// Trang không có khung mô tả.
    NoContainer,
    Failed(PageError),
}

/// Gắn handler click cho nút "Read More" nếu trang có khung mô tả.
///
/// Trạng thái đóng/mở chỉ nằm trong closure của handler, class CSS và nhãn
/// nút luôn được cập nhật cùng nhau.
pub fn wire_description_toggle<P>(page: &Rc<P>, config: &PageConfig) -> ToggleWiring
where
    P: Page + 'static,
    P::Element: 'static,
{
    let Some(container) = page.element_by_id(&config.description_element_id) else {
        tracing::debug!(id = %config.description_element_id, "không có khung mô tả");
        return ToggleWiring::NoContainer;
    };

    match bind_toggle(page, container, config) {
        Ok(()) => ToggleWiring::Wired,
        Err(err) => {
            tracing::warn!(error = %err, "không gắn được nút Read More");
            ToggleWiring::Failed(err)
        }
    }
}

fn bind_toggle<P>(page: &Rc<P>, container: P::Element, config: &PageConfig) -> Result<(), PageError>
where
    P: Page + 'static,
    P::Element: 'static,
{
    page.set_style(&container, "overflow", "hidden")?;

    let button = page
        .element_by_id(&config.read_more_element_id)
        .ok_or_else(|| PageError::MissingElement(config.read_more_element_id.clone()))?;

    let handler_page = Rc::downgrade(page);
    let label_target = button.clone();
    let config = config.clone();
    let mut state = ToggleState::default();

    page.on_click(
        &button,
        Box::new(move |event: &dyn PageEvent| {
            event.prevent_default();
            let Some(page) = handler_page.upgrade() else {
                return;
            };
            // Trạng thái chỉ đổi khi class đã đổi.
            if let Err(err) = page.toggle_class(&container, &config.faded_class) {
                tracing::warn!(error = %err, "không đổi được class khung mô tả");
                return;
            }
            state.flip();
            page.set_text_content(&label_target, state.label(&config));
        }),
    )
}
