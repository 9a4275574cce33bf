use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, TextEncoder, register_counter, register_histogram};

lazy_static! {
    pub static ref GENERATE_REQUESTS: Counter =
        register_counter!("agent_generate_requests_total", "Total number of generate requests").unwrap();
    pub static ref GENERATE_FAILURES: Counter =
        register_counter!("agent_generate_failures_total", "Generate requests that ended in an error").unwrap();
    pub static ref GENERATE_LATENCY: Histogram = register_histogram!(
        "agent_generate_latency_seconds",
        "Generate latency in seconds"
    )
    .unwrap();
    pub static ref STATUS_CHECKS: Counter =
        register_counter!("agent_status_checks_total", "Total Ollama status checks").unwrap();
    pub static ref STREAM_CHUNKS: Counter =
        register_counter!("agent_stream_chunks_total", "Streamed fragments received from Ollama").unwrap();
}

// Render the default registry in Prometheus text format
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_registered_metrics() {
        GENERATE_REQUESTS.inc();
        STATUS_CHECKS.inc();
        let text = render().unwrap();
        assert!(text.contains("agent_generate_requests_total"));
        assert!(text.contains("agent_status_checks_total"));
    }
}
