use gcp_language_http::{
    AnnotateTextFeatures, AnnotateTextRequest, Document, EncodingType, LanguageClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = LanguageClient::from_env()?;

    let document = Document::plain_text(
        "The borrow checker rejects programs that might access freed memory, \
         which makes systems programming considerably safer.",
    );

    let classification = client.classify_text(&document).await?;
    for category in classification.categories {
        println!("{} ({:.2})", category.name, category.confidence);
    }

    let annotated = client
        .annotate_text(&AnnotateTextRequest {
            document,
            features: AnnotateTextFeatures {
                extract_entities: true,
                extract_document_sentiment: true,
                moderate_text: true,
                ..AnnotateTextFeatures::default()
            },
            encoding_type: Some(EncodingType::Utf8),
        })
        .await?;

    if let Some(sentiment) = annotated.document_sentiment {
        println!("sentiment score {:.2}", sentiment.score);
    }
    for category in annotated.moderation_categories {
        println!("moderation: {} ({:.2})", category.name, category.confidence);
    }

    Ok(())
}
