use gcp_language_http::{Document, EncodingType, LanguageClient, LanguageConfig};

/// Live calls need request authentication; everything else can fall back to
/// defaults. Returns `None` when the environment carries no usable auth.
fn live_config() -> Option<LanguageConfig> {
    let config = LanguageConfig::from_env().ok()?;
    if config.api_key.is_none() && config.access_token.is_none() {
        return None;
    }
    Some(config)
}

#[tokio::test]
async fn live_sentiment_and_entities() {
    let Some(config) = live_config() else {
        eprintln!(
            "skipping live test: set GCP_LANGUAGE_API_KEY or GCP_LANGUAGE_ACCESS_TOKEN"
        );
        return;
    };

    let client = LanguageClient::from_config(&config).expect("client must build");
    let document = Document::plain_text(
        "Enjoy your vacation in Lisbon! The beaches were wonderful and the food was excellent.",
    );

    let sentiment = client
        .analyze_sentiment(&document, EncodingType::Utf8)
        .await
        .expect("sentiment analysis must succeed");
    assert!(sentiment.document_sentiment.score > 0.0);
    assert!(!sentiment.sentences.is_empty());

    let entities = client
        .analyze_entities(&document, EncodingType::Utf8)
        .await
        .expect("entity analysis must succeed");
    assert!(entities.entities.iter().any(|entity| entity.name == "Lisbon"));
}
