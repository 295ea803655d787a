use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Input document for every analysis method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document format.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Inline document text. Mutually exclusive with `gcs_content_uri`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Cloud Storage URI of the document. Mutually exclusive with `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_content_uri: Option<String>,
    /// ISO-639-1 language hint; detected by the service when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Document {
    /// Creates a plain-text document from inline content.
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            doc_type: DocumentType::PlainText,
            content: Some(content.into()),
            gcs_content_uri: None,
            language: None,
        }
    }

    /// Creates an HTML document from inline content.
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            doc_type: DocumentType::Html,
            content: Some(content.into()),
            gcs_content_uri: None,
            language: None,
        }
    }

    /// Creates a plain-text document backed by a Cloud Storage object.
    pub fn from_gcs_uri(uri: impl Into<String>) -> Self {
        Self {
            doc_type: DocumentType::PlainText,
            content: None,
            gcs_content_uri: Some(uri.into()),
            language: None,
        }
    }

    /// Sets the language hint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Document format accepted by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Unspecified; the service rejects documents without a type.
    TypeUnspecified,
    /// Plain UTF-8 text.
    PlainText,
    /// HTML markup.
    Html,
}

/// Encoding used to compute mention and sentence offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncodingType {
    /// No offsets are computed.
    None,
    /// Offsets in UTF-8 bytes.
    Utf8,
    /// Offsets in UTF-16 code units.
    Utf16,
    /// Offsets in UTF-32 code points.
    Utf32,
}

/// Sentiment score in `[-1.0, 1.0]` with non-negative magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    /// Overall positivity/negativity of the text.
    #[serde(default)]
    pub score: f32,
    /// Absolute magnitude of sentiment regardless of polarity.
    #[serde(default)]
    pub magnitude: f32,
}

/// Span of text with its offset into the original document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    /// Text content of the span.
    #[serde(default)]
    pub content: String,
    /// Offset per the request encoding; absent when offsets were disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_offset: Option<i32>,
}

/// Sentence extracted from the document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// Sentence text.
    #[serde(default)]
    pub text: TextSpan,
    /// Sentence-level sentiment, when sentiment analysis was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Named entity recognized in the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Representative name of the entity.
    pub name: String,
    /// Entity kind.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Metadata such as `mid` or `wikipedia_url`, when known.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Salience in `[0.0, 1.0]`; relevance of the entity to the whole text.
    #[serde(default)]
    pub salience: f32,
    /// Mentions of this entity within the document.
    #[serde(default)]
    pub mentions: Vec<EntityMention>,
    /// Aggregate sentiment toward the entity, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Entity kind reported by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Location,
    Organization,
    Event,
    WorkOfArt,
    ConsumerGood,
    Other,
    PhoneNumber,
    Address,
    Date,
    Number,
    Price,
    /// Unknown kind; also the fallback for kinds newer than this crate.
    /// The catch-all must stay the last variant.
    #[serde(other)]
    Unknown,
}

/// Single mention of an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMention {
    /// Mention text.
    #[serde(default)]
    pub text: TextSpan,
    /// Whether the mention is a proper noun or a common noun.
    #[serde(rename = "type")]
    pub mention_type: MentionType,
    /// Sentiment of this particular mention, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Mention kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentionType {
    Proper,
    Common,
    /// Unknown kind; also the fallback for kinds newer than this crate.
    /// The catch-all must stay the last variant.
    #[serde(other)]
    TypeUnknown,
}

/// Content category with the classifier's confidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationCategory {
    /// Category path, e.g. `/Science/Computer Science`.
    pub name: String,
    /// Classifier confidence in `[0.0, 1.0]`.
    #[serde(default)]
    pub confidence: f32,
}

/// Response of [`LanguageClient::analyze_sentiment`](crate::LanguageClient::analyze_sentiment).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSentimentResponse {
    /// Sentiment of the whole document.
    pub document_sentiment: Sentiment,
    /// Language the service detected or was told.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Per-sentence sentiment.
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

/// Response of [`LanguageClient::analyze_entities`](crate::LanguageClient::analyze_entities).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeEntitiesResponse {
    /// Recognized entities, most salient first.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Language the service detected or was told.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Response of [`LanguageClient::classify_text`](crate::LanguageClient::classify_text).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyTextResponse {
    /// Categories the document was classified into.
    #[serde(default)]
    pub categories: Vec<ClassificationCategory>,
}

/// Response of [`LanguageClient::moderate_text`](crate::LanguageClient::moderate_text).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateTextResponse {
    /// Harmful-content categories with confidence scores.
    #[serde(default)]
    pub moderation_categories: Vec<ClassificationCategory>,
}

/// Feature toggles for [`LanguageClient::annotate_text`](crate::LanguageClient::annotate_text).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateTextFeatures {
    /// Run entity extraction.
    #[serde(default)]
    pub extract_entities: bool,
    /// Run document-level sentiment analysis.
    #[serde(default)]
    pub extract_document_sentiment: bool,
    /// Run content classification.
    #[serde(default)]
    pub classify_text: bool,
    /// Run content moderation.
    #[serde(default)]
    pub moderate_text: bool,
}

/// Request for [`LanguageClient::annotate_text`](crate::LanguageClient::annotate_text):
/// several analyses over one document in a single call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateTextRequest {
    /// Document to analyze.
    pub document: Document,
    /// Which analyses to run.
    pub features: AnnotateTextFeatures,
    /// Offset encoding for returned spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<EncodingType>,
}

/// Response of [`LanguageClient::annotate_text`](crate::LanguageClient::annotate_text).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateTextResponse {
    /// Sentences, present when sentiment analysis was requested.
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    /// Entities, present when entity extraction was requested.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Document sentiment, present when sentiment analysis was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_sentiment: Option<Sentiment>,
    /// Language the service detected or was told.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Classification categories, when classification was requested.
    #[serde(default)]
    pub categories: Vec<ClassificationCategory>,
    /// Moderation categories, when moderation was requested.
    #[serde(default)]
    pub moderation_categories: Vec<ClassificationCategory>,
}

/// Wire body for the single-document analysis methods.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentRequest<'a> {
    pub(crate) document: &'a Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) encoding_type: Option<EncodingType>,
}
