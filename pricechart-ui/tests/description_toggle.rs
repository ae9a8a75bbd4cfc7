use std::rc::Rc;

use futures::executor::block_on;
use pricechart_core::page::{ClickHandler, MemoryPage, Page, RecordingCharts};
use pricechart_core::{LoadError, PageConfig, PageError};
use pricechart_ui::{boot_page, wire_description_toggle, ChartModuleLoader, LoadOutcome, ToggleWiring};

const CONTAINER: &str = "brand-description";
const BUTTON: &str = "brand-description-read-more";
const FADED: &str = "brand-description--is-faded";

fn described_page(path: &str) -> Rc<MemoryPage> {
    Rc::new(
        MemoryPage::new(path)
            .with_text(CONTAINER, "Long brand story")
            .with_text(BUTTON, "Read More"),
    )
}

fn button_text(page: &MemoryPage) -> Option<String> {
    page.element(BUTTON).and_then(|element| element.text)
}

#[test]
fn wiring_clips_container_overflow() {
    let page = described_page("/brands/acme");

    let wiring = wire_description_toggle(&page, &PageConfig::default());

    assert!(matches!(wiring, ToggleWiring::Wired));
    let container = page.element(CONTAINER).unwrap();
    assert_eq!(container.styles.get("overflow").map(String::as_str), Some("hidden"));
    assert!(!page.has_class(CONTAINER, FADED));
    assert_eq!(page.handler_count(BUTTON), 1);
}

#[test]
fn odd_clicks_open_even_clicks_close() {
    let page = described_page("/brands/acme");
    wire_description_toggle(&page, &PageConfig::default());

    for clicks in 1..=5 {
        assert!(page.click(BUTTON), "click phải chặn điều hướng mặc định");
        if clicks % 2 == 1 {
            assert!(page.has_class(CONTAINER, FADED));
            assert_eq!(button_text(&page).as_deref(), Some("Read Less"));
        } else {
            assert!(!page.has_class(CONTAINER, FADED));
            assert_eq!(button_text(&page).as_deref(), Some("Read More"));
        }
    }
}

#[test]
fn missing_container_skips_wiring() {
    let page = Rc::new(MemoryPage::new("/").with_text(BUTTON, "Read More"));

    let wiring = wire_description_toggle(&page, &PageConfig::default());

    assert!(matches!(wiring, ToggleWiring::NoContainer));
    assert_eq!(page.mutations(), 0);
    assert_eq!(page.handler_count(BUTTON), 0);
    assert!(!page.click(BUTTON));
}

#[test]
fn missing_button_is_reported() {
    let page = Rc::new(MemoryPage::new("/").with_text(CONTAINER, "story"));

    let wiring = wire_description_toggle(&page, &PageConfig::default());

    assert!(matches!(
        wiring,
        ToggleWiring::Failed(PageError::MissingElement(ref id)) if id == BUTTON
    ));
}

#[test]
fn wired_toggle_does_not_keep_page_alive() {
    let page = described_page("/brands/acme");
    assert!(matches!(
        wire_description_toggle(&page, &PageConfig::default()),
        ToggleWiring::Wired
    ));

    let weak = Rc::downgrade(&page);
    drop(page);

    assert!(weak.upgrade().is_none());
}

/// Trang có class list từ chối mọi thay đổi.
struct FrozenClassList(MemoryPage);

impl Page for FrozenClassList {
    type Element = String;

    fn location_path(&self) -> String {
        self.0.location_path()
    }

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.0.element_by_id(id)
    }

    fn text_content(&self, element: &String) -> Option<String> {
        self.0.text_content(element)
    }

    fn set_text_content(&self, element: &String, text: &str) {
        self.0.set_text_content(element, text)
    }

    fn set_style(&self, element: &String, property: &str, value: &str) -> Result<(), PageError> {
        self.0.set_style(element, property, value)
    }

    fn toggle_class(&self, _: &String, class: &str) -> Result<bool, PageError> {
        Err(PageError::Dom(format!("class {class:?} không hợp lệ")))
    }

    fn on_click(&self, element: &String, handler: ClickHandler) -> Result<(), PageError> {
        self.0.on_click(element, handler)
    }
}

#[test]
fn failed_class_toggle_keeps_state_in_sync() {
    let page = Rc::new(FrozenClassList(
        MemoryPage::new("/brands/acme")
            .with_text(CONTAINER, "story")
            .with_text(BUTTON, "Read More"),
    ));
    assert!(matches!(
        wire_description_toggle(&page, &PageConfig::default()),
        ToggleWiring::Wired
    ));

    for _ in 0..3 {
        assert!(page.0.click(BUTTON));
        assert!(!page.0.has_class(CONTAINER, FADED));
        assert_eq!(button_text(&page.0).as_deref(), Some("Read More"));
    }
}

struct RejectingLoader;

impl ChartModuleLoader<MemoryPage> for RejectingLoader {
    type Library = RecordingCharts;

    async fn load(&self) -> Result<RecordingCharts, LoadError> {
        Err(LoadError::Fetch("chunk failed".to_string()))
    }
}

#[test]
fn module_rejection_does_not_affect_toggle() {
    let page = described_page("/products/7");

    let (toggle, timeline) = boot_page(Rc::clone(&page), RejectingLoader, PageConfig::default());
    assert!(matches!(toggle, ToggleWiring::Wired));

    let outcome = block_on(timeline);
    assert!(matches!(outcome, LoadOutcome::LoadFailed(_)));

    page.click(BUTTON);
    assert!(page.has_class(CONTAINER, FADED));
    assert_eq!(button_text(&page).as_deref(), Some("Read Less"));
}

#[test]
fn boot_renders_chart_alongside_toggle() {
    struct Ready(Rc<RecordingCharts>);

    impl ChartModuleLoader<MemoryPage> for Ready {
        type Library = Rc<RecordingCharts>;

        async fn load(&self) -> Result<Rc<RecordingCharts>, LoadError> {
            Ok(Rc::clone(&self.0))
        }
    }

    let page = Rc::new(
        MemoryPage::new("/products/9")
            .with_text(CONTAINER, "story")
            .with_text(BUTTON, "Read More")
            .with_text("productdata", r#"{"dates":["d1"],"prices":[3]}"#)
            .with_element("price-chart"),
    );
    let charts = Rc::new(RecordingCharts::default());

    let (toggle, timeline) = boot_page(
        Rc::clone(&page),
        Ready(Rc::clone(&charts)),
        PageConfig::default(),
    );

    assert!(matches!(toggle, ToggleWiring::Wired));
    assert!(matches!(block_on(timeline), LoadOutcome::Rendered(_)));
    assert_eq!(charts.mounted().len(), 1);
}
