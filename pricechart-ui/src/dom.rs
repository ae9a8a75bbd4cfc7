//! Cài đặt `Page` trên DOM thật và liên kết Chart.js qua `import()` động.

use js_sys::{Array, Function, Promise, Reflect};
use pricechart_core::page::{ChartLibrary, ClickHandler, Page, PageEvent};
use pricechart_core::{ChartConfig, LoadError, PageError};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::loader::ChartModuleLoader;

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(url: &str) -> Result<Promise, JsValue>;
}

/// Trang trình duyệt hiện tại.
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        Ok(Self { window, document })
    }
}

fn dom_error(err: JsValue) -> PageError {
    PageError::Dom(format!("{err:?}"))
}

impl Page for DomPage {
    type Element = Element;

    fn location_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn text_content(&self, element: &Element) -> Option<String> {
        element.text_content()
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<(), PageError> {
        let element = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| PageError::Dom(format!("#{} không phải HtmlElement", element.id())))?;
        element
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }

    fn toggle_class(&self, element: &Element, class: &str) -> Result<bool, PageError> {
        element.class_list().toggle(class).map_err(dom_error)
    }

    fn on_click(&self, element: &Element, mut handler: ClickHandler) -> Result<(), PageError> {
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            handler(&DomEvent(event));
        }));
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // Handler sống cùng trang.
        closure.forget();
        Ok(())
    }
}

struct DomEvent(Event);

impl PageEvent for DomEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Constructor `Chart` lấy từ module ES của Chart.js.
pub struct ChartJs {
    constructor: Function,
}

impl ChartLibrary<DomPage> for ChartJs {
    fn mount(&self, _: &DomPage, target: &Element, config: &ChartConfig) -> Result<(), PageError> {
        let options = config
            .serialize(&Serializer::json_compatible())
            .map_err(|err| PageError::Mount(err.to_string()))?;
        let target: &JsValue = target.as_ref();
        // Chart.js tự giữ instance trong registry của nó.
        Reflect::construct(&self.constructor, &Array::of2(target, &options))
            .map_err(|err| PageError::Mount(format!("{err:?}")))?;
        Ok(())
    }
}

/// Tải Chart.js bằng `import()` động từ URL cấu hình.
pub struct ChartJsLoader {
    module_url: String,
}

impl ChartJsLoader {
    pub fn new(module_url: impl Into<String>) -> Self {
        Self {
            module_url: module_url.into(),
        }
    }
}

impl ChartModuleLoader<DomPage> for ChartJsLoader {
    type Library = ChartJs;

    async fn load(&self) -> Result<ChartJs, LoadError> {
        let promise =
            import_module(&self.module_url).map_err(|err| LoadError::Fetch(format!("{err:?}")))?;
        let module = JsFuture::from(promise)
            .await
            .map_err(|err| LoadError::Fetch(format!("{err:?}")))?;

        let constructor = Reflect::get(&module, &JsValue::from_str("default"))
            .map_err(|err| LoadError::Export(format!("{err:?}")))?
            .dyn_into::<Function>()
            .map_err(|value| LoadError::Export(format!("default không phải hàm: {value:?}")))?;
        Ok(ChartJs { constructor })
    }
}
