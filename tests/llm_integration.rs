//! Integration tests against the live OpenAI API.
//!
//! Gated behind the `integration-tests` feature and marked `#[ignore]`.
//!
//! ```bash
//! export OPENAI_API_KEY="your-openai-api-key"
//! cargo test --features integration-tests --test llm_integration -- --ignored
//! ```
//!
//! These make real, billed API calls with short prompts.

#![cfg(feature = "integration-tests")]

use std::time::Duration;

use futures_util::TryStreamExt;

use studybot::adapter::outbound::llm::openai::OpenAi;
use studybot::domain::{Identity, Prompt};
use studybot::port::CompletionStreamer;

fn create_client() -> Option<OpenAi> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(OpenAi::new(key, "gpt-4o-mini", 0.0)),
        _ => {
            eprintln!("Skipping OpenAI test: OPENAI_API_KEY not set");
            None
        }
    }
}

async fn ask(client: &OpenAi, prompt: &str) -> Vec<String> {
    let prompt = Prompt::parse(prompt).unwrap();
    let identity = Identity::new("integration-test");

    tokio::time::timeout(Duration::from_secs(30), async {
        client
            .stream(&prompt, &identity)
            .await?
            .map_ok(|fragment| fragment.into_string())
            .try_collect::<Vec<_>>()
            .await
    })
    .await
    .expect("Request timed out")
    .expect("API call failed")
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn streams_a_short_answer() {
    let Some(client) = create_client() else {
        return;
    };

    let fragments = ask(&client, "Respond with exactly: PONG").await;

    assert!(fragments.iter().all(|f| !f.is_empty()));
    assert!(fragments.concat().contains("PONG"), "got {fragments:?}");
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn longer_answers_arrive_in_several_fragments() {
    let Some(client) = create_client() else {
        return;
    };

    let fragments = ask(&client, "List the planets of the solar system, one per line.").await;

    assert!(fragments.len() > 1, "got {fragments:?}");
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn invalid_key_fails_before_streaming() {
    let client = OpenAi::new("sk-invalid", "gpt-4o-mini", 0.0);
    let prompt = Prompt::parse("hi").unwrap();

    let result = client.stream(&prompt, &Identity::new("integration-test")).await;

    assert!(result.is_err());
}
