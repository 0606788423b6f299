use reviewer_llm::PromptForwarder;

#[derive(Clone, Debug)]
pub struct AppState {
    pub forwarder: PromptForwarder,
}

impl AppState {
    pub fn new(forwarder: PromptForwarder) -> Self {
        Self { forwarder }
    }
}
