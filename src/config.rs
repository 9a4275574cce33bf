use clap::Parser;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

// CLI argument structure; every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "research-agent")]
#[command(about = "Web front end that forwards prompts to a local Ollama server")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Ollama server url
    #[arg(short = 'u', long, env = "OLLAMA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub ollama_base_url: String,

    // Model used for generation
    #[arg(short = 'm', long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL)]
    pub ollama_model: String,

    // Model name shown in the browser when Ollama reports none
    #[arg(long, env = "OLLAMA_DISPLAY_MODEL")]
    pub display_model: Option<String>,

    // Default log filter, RUST_LOG takes precedence
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn display_model(&self) -> &str {
        self.display_model.as_deref().unwrap_or(&self.ollama_model)
    }
}
