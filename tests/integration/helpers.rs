use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tailview::app::App;
use tailview::error::FetchError;
use tailview::gateway::Gateway;
use tailview::panel::{Layout, Panel};

/// Gateway double: pops canned outcomes in order and records every
/// request it sees. Exhausting the queue is a transport failure.
pub struct MockGateway {
    responses: RefCell<VecDeque<Result<String, FetchError>>>,
    pub requests: RefCell<Vec<(String, Value)>>,
}

impl MockGateway {
    pub fn new(responses: Vec<Result<String, FetchError>>) -> Rc<Self> {
        Rc::new(Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Gateway for MockGateway {
    async fn request(&self, endpoint: &str, context: &Value) -> Result<String, FetchError> {
        self.requests.borrow_mut().push((endpoint.to_owned(), context.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("mock exhausted".to_owned())))
    }
}

/// Build a minimal `App` wired to a mock gateway. No terminal, no network.
pub fn test_app(responses: Vec<Result<String, FetchError>>) -> (App, Rc<MockGateway>) {
    let gateway = MockGateway::new(responses);
    let mut app = App::test_default();
    app.gateway = Rc::clone(&gateway) as Rc<dyn Gateway>;
    (app, gateway)
}

/// Layout double: the content is its own measurement — one entry per
/// line, the line being the entry's height in units. Lets tests express
/// arbitrary entry geometry through ordinary content strings.
pub struct HeightLayout;

impl Layout for HeightLayout {
    fn measure(&self, content: &str, _width: u32) -> Vec<u32> {
        content.lines().filter_map(|line| line.parse().ok()).collect()
    }
}

pub fn height_content(heights: &[u32]) -> String {
    heights.iter().map(u32::to_string).collect::<Vec<_>>().join("\n")
}

/// Headless panel with the given entry heights installed.
pub fn height_panel(heights: &[u32], visible: u32) -> Panel {
    let mut panel = Panel::new(Box::new(HeightLayout), 80, visible);
    panel.set_content(height_content(heights));
    panel
}
