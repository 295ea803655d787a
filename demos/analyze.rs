use gcp_language_http::{Document, EncodingType, LanguageClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = LanguageClient::from_env()?;

    let document = Document::plain_text(
        "Grace Hopper wrote the first compiler. The idea was brilliant.",
    );

    let sentiment = client
        .analyze_sentiment(&document, EncodingType::Utf8)
        .await?;
    println!(
        "document sentiment: score {:.2}, magnitude {:.2}",
        sentiment.document_sentiment.score, sentiment.document_sentiment.magnitude
    );
    for sentence in sentiment.sentences {
        println!("  {:?}", sentence.text.content);
    }

    let entities = client.analyze_entities(&document, EncodingType::Utf8).await?;
    for entity in entities.entities {
        println!(
            "entity: {} ({:?}, salience {:.2})",
            entity.name, entity.entity_type, entity.salience
        );
    }

    Ok(())
}
