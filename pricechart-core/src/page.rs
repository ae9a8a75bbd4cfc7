//! Trừu tượng hóa trang web mà các thành phần phụ thuộc vào.
//!
//! Mọi truy vấn DOM đi qua trait [`Page`] thay vì hàm toàn cục, nhờ đó logic
//! vẽ biểu đồ và nút "Read More" chạy được cả trong trình duyệt lẫn trong test.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::{ChartConfig, PageError};

/// Sự kiện click được chuyển cho handler.
pub trait PageEvent {
    fn prevent_default(&self);
}

/// Handler click do thành phần đăng ký; sống cùng vòng đời trang.
pub type ClickHandler = Box<dyn FnMut(&dyn PageEvent)>;

/// Khả năng truy vấn và thay đổi trang.
pub trait Page {
    type Element: Clone;

    /// Path của địa chỉ hiện tại (ví dụ `/products/42`).
    fn location_path(&self) -> String;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Nội dung text của element; `None` nếu không có.
    fn text_content(&self, element: &Self::Element) -> Option<String>;

    fn set_text_content(&self, element: &Self::Element, text: &str);

    fn set_style(&self, element: &Self::Element, property: &str, value: &str)
        -> Result<(), PageError>;

    /// Bật/tắt class, trả về `true` nếu class hiện đang có mặt.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> Result<bool, PageError>;

    fn on_click(&self, element: &Self::Element, handler: ClickHandler) -> Result<(), PageError>;
}

/// Thư viện biểu đồ có thể gắn một biểu đồ vào element của trang.
pub trait ChartLibrary<P: Page + ?Sized> {
    fn mount(&self, page: &P, target: &P::Element, config: &ChartConfig) -> Result<(), PageError>;
}

impl<P, C> ChartLibrary<P> for Rc<C>
where
    P: Page + ?Sized,
    C: ChartLibrary<P> + ?Sized,
{
    fn mount(&self, page: &P, target: &P::Element, config: &ChartConfig) -> Result<(), PageError> {
        (**self).mount(page, target, config)
    }
}

/// Element trong trang giả lập.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub text: Option<String>,
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
}

/// Trang trong bộ nhớ (dùng cho test và CLI), ghi lại số lần bị thay đổi.
#[derive(Default)]
pub struct MemoryPage {
    path: String,
    elements: RefCell<HashMap<String, MemoryElement>>,
    handlers: RefCell<HashMap<String, Vec<ClickHandler>>>,
    mutations: Cell<usize>,
}

impl MemoryPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Thêm element rỗng; không tính là thay đổi trang.
    pub fn with_element(self, id: &str) -> Self {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), MemoryElement::default());
        self
    }

    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.elements.borrow_mut().insert(
            id.to_string(),
            MemoryElement {
                text: Some(text.to_string()),
                ..MemoryElement::default()
            },
        );
        self
    }

    /// Ảnh chụp trạng thái hiện tại của element.
    pub fn element(&self, id: &str) -> Option<MemoryElement> {
        self.elements.borrow().get(id).cloned()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|element| element.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    pub fn handler_count(&self, id: &str) -> usize {
        self.handlers.borrow().get(id).map(Vec::len).unwrap_or(0)
    }

    /// Mô phỏng click; trả về `true` nếu có handler gọi `prevent_default`.
    pub fn click(&self, id: &str) -> bool {
        let mut handlers = self.handlers.borrow_mut().remove(id).unwrap_or_default();
        let event = MemoryEvent::default();
        for handler in handlers.iter_mut() {
            handler(&event);
        }
        let mut slot = self.handlers.borrow_mut();
        let entry = slot.entry(id.to_string()).or_default();
        handlers.append(entry);
        *entry = handlers;
        event.default_prevented.get()
    }

    fn mutate<T>(
        &self,
        id: &str,
        apply: impl FnOnce(&mut MemoryElement) -> T,
    ) -> Result<T, PageError> {
        let mut elements = self.elements.borrow_mut();
        let element = elements
            .get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
        self.mutations.set(self.mutations.get() + 1);
        Ok(apply(element))
    }
}

impl Page for MemoryPage {
    type Element = String;

    fn location_path(&self) -> String {
        self.path.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.elements
            .borrow()
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn text_content(&self, element: &String) -> Option<String> {
        self.elements
            .borrow()
            .get(element)
            .and_then(|element| element.text.clone())
    }

    fn set_text_content(&self, element: &String, text: &str) {
        let _ = self.mutate(element, |element| element.text = Some(text.to_string()));
    }

    fn set_style(&self, element: &String, property: &str, value: &str) -> Result<(), PageError> {
        self.mutate(element, |element| {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        })
    }

    fn toggle_class(&self, element: &String, class: &str) -> Result<bool, PageError> {
        self.mutate(element, |element| {
            if element.classes.remove(class) {
                false
            } else {
                element.classes.insert(class.to_string());
                true
            }
        })
    }

    fn on_click(&self, element: &String, handler: ClickHandler) -> Result<(), PageError> {
        if !self.elements.borrow().contains_key(element) {
            return Err(PageError::MissingElement(element.clone()));
        }
        self.handlers
            .borrow_mut()
            .entry(element.clone())
            .or_default()
            .push(handler);
        Ok(())
    }
}

#[derive(Default)]
struct MemoryEvent {
    default_prevented: Cell<bool>,
}

impl PageEvent for MemoryEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }
}

/// Thư viện biểu đồ giả, lưu lại các cấu hình đã gắn.
#[derive(Default)]
pub struct RecordingCharts {
    mounted: RefCell<Vec<(String, ChartConfig)>>,
    fail_with: Option<String>,
}

impl RecordingCharts {
    /// Thư viện luôn báo lỗi khi gắn biểu đồ.
    pub fn failing(reason: &str) -> Self {
        Self {
            mounted: RefCell::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn mounted(&self) -> Vec<(String, ChartConfig)> {
        self.mounted.borrow().clone()
    }
}

impl ChartLibrary<MemoryPage> for RecordingCharts {
    fn mount(
        &self,
        page: &MemoryPage,
        target: &String,
        config: &ChartConfig,
    ) -> Result<(), PageError> {
        if let Some(reason) = &self.fail_with {
            return Err(PageError::Mount(reason.clone()));
        }
        page.mutate(target, |_| ())?;
        self.mounted
            .borrow_mut()
            .push((target.clone(), config.clone()));
        Ok(())
    }
}
