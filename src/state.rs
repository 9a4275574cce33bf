use crate::client::OllamaClient;
use crate::config::Args;

// app's shared state, read-only once the server is up
pub struct AppState {
    pub client: OllamaClient,
    pub display_model: String, // model name the page falls back to
}

impl AppState {
    pub fn new(client: OllamaClient, display_model: impl Into<String>) -> Self {
        Self {
            client,
            display_model: display_model.into(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let client = OllamaClient::new(&args.ollama_base_url, &args.ollama_model);
        Self::new(client, args.display_model())
    }
}
