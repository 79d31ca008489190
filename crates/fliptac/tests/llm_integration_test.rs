//! Live checks against the language model backends.
//!
//! Run with `--features api` and the provider keys in the environment.

use fliptac::{LlmClient, LlmConfig, LlmProvider, MoveSelector, OracleConfig, TextOracle};
use fliptac_core::{Board, Coord, Mark};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn live_config(provider: LlmProvider, model: &str) -> LlmConfig {
    dotenvy::dotenv().ok();
    OracleConfig::default()
        .with_llm_provider(provider)
        .with_llm_model(model.to_string())
        .create_llm_config()
        .expect("API key not set")
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_anthropic_connectivity() {
    let client = LlmClient::new(live_config(LlmProvider::Anthropic, "claude-3-5-haiku-latest"));
    let response = client
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");
    assert!(!response.is_empty());
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_connectivity() {
    let client = LlmClient::new(live_config(LlmProvider::OpenAI, "gpt-4o-mini"));
    let response = client
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");
    assert!(!response.is_empty());
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_text_oracle_plays_a_legal_move() {
    let client = LlmClient::new(live_config(LlmProvider::OpenAI, "gpt-4o-mini"));
    let mut oracle = TextOracle::new(client, Duration::from_secs(30), StdRng::seed_from_u64(1));

    let mut board = Board::new(5);
    board.occupy(Mark::X, Coord::new(0, 2));
    board.occupy(Mark::O, Coord::new(4, 2));

    let selection = oracle.select_move(&board, Mark::X, Mark::O).await;
    let coord = selection.coord().expect("X has legal moves");
    assert!(board.is_valid_move(Mark::X, coord));
    eprintln!("Oracle chose {} (fallback: {:?})", coord, selection.fallback());
}
