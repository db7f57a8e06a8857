//! Interview question generation with a deterministic fallback.
//!
//! [`InterviewService::generate`] is total: every failure of the remote
//! model — transport fault, malformed reply, wrong item count — collapses
//! into the fixed fallback set for the topic. The individual failure modes
//! are kept apart in [`GenerationOutcome`] so each one stays observable in
//! logs and testable in isolation.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

use super::ports::{CompletionRequest, QuestionModel};

/// Number of questions in every generated or fallback set.
pub const QUESTION_COUNT: usize = 5;

/// Validation failures raised when constructing a [`Topic`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicValidationError {
    /// Topic is empty after trimming whitespace.
    #[error("Topic cannot be empty")]
    Empty,
}

/// A non-empty, trimmed interview topic.
///
/// # Examples
/// ```
/// use backend::domain::Topic;
///
/// let topic = Topic::new(" Rust ").expect("valid topic");
/// assert_eq!(topic.as_str(), "Rust");
/// assert!(Topic::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// Construct a topic, trimming surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, TopicValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TopicValidationError::Empty);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the topic as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level attached to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Canonical capitalised name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Parse failure for [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised difficulty level: {0}")]
pub struct DifficultyParseError(String);

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    /// Case-insensitive parse, so model replies using `"advanced"` still
    /// match the canonical `Advanced`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DifficultyParseError(raw.to_owned())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Difficulty scope requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyFilter {
    /// Return the whole question set unfiltered.
    All,
    /// Keep only questions tagged with one level.
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Parse the URL path segment. Only the four literal values
    /// `Beginner`, `Intermediate`, `Advanced` and `All` are recognised.
    pub fn from_path(raw: &str) -> Option<Self> {
        match raw {
            "All" => Some(Self::All),
            "Beginner" => Some(Self::Only(Difficulty::Beginner)),
            "Intermediate" => Some(Self::Only(Difficulty::Intermediate)),
            "Advanced" => Some(Self::Only(Difficulty::Advanced)),
            _ => None,
        }
    }
}

impl std::fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(level) => f.write_str(level.as_str()),
        }
    }
}

/// One generated interview question with its model answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

/// Raised when building a [`QuestionSet`] from the wrong number of items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a question set holds exactly {QUESTION_COUNT} questions, got {found}")]
pub struct WrongQuestionCount {
    pub found: usize,
}

/// An ordered set of exactly [`QUESTION_COUNT`] questions.
///
/// Produced fresh on every call; never persisted or mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet(Vec<InterviewQuestion>);

impl QuestionSet {
    /// Build a set from validated questions, enforcing the exact count.
    pub fn from_questions(questions: Vec<InterviewQuestion>) -> Result<Self, WrongQuestionCount> {
        if questions.len() != QUESTION_COUNT {
            return Err(WrongQuestionCount {
                found: questions.len(),
            });
        }
        Ok(Self(questions))
    }

    /// The deterministic fallback set for a topic. Requires no network
    /// access and always succeeds.
    pub fn fallback(topic: &Topic) -> Self {
        let questions = FALLBACK_TEMPLATES
            .iter()
            .map(|template| InterviewQuestion {
                question: template.question.replace("{topic}", topic.as_str()),
                answer: template.answer.replace("{topic}", topic.as_str()),
                difficulty: template.difficulty,
            })
            .collect();
        Self(questions)
    }

    /// Borrow the questions in order.
    pub fn questions(&self) -> &[InterviewQuestion] {
        self.0.as_slice()
    }

    /// Consume the set, yielding the questions in order.
    pub fn into_questions(self) -> Vec<InterviewQuestion> {
        self.0
    }
}

struct FallbackTemplate {
    question: &'static str,
    answer: &'static str,
    difficulty: Difficulty,
}

/// Fixed fallback content, parameterised by topic. Order and difficulty
/// tags are part of the observable contract.
const FALLBACK_TEMPLATES: [FallbackTemplate; QUESTION_COUNT] = [
    FallbackTemplate {
        question: "What are the key concepts and principles in {topic}?",
        answer: "The key concepts in {topic} include fundamental principles, best practices, \
                 and core methodologies that form the foundation of this field.",
        difficulty: Difficulty::Intermediate,
    },
    FallbackTemplate {
        question: "How would you explain {topic} to someone with no technical background?",
        answer: "I would use analogies and simple language to explain {topic}, focusing on \
                 practical benefits and real-world applications.",
        difficulty: Difficulty::Intermediate,
    },
    FallbackTemplate {
        question: "What are the most common challenges when working with {topic}?",
        answer: "Common challenges include complexity management, performance optimization, \
                 and maintaining code quality while scaling applications.",
        difficulty: Difficulty::Advanced,
    },
    FallbackTemplate {
        question: "Can you describe a real-world project where you applied {topic}?",
        answer: "In a real-world project, I would apply {topic} by identifying specific use \
                 cases, implementing best practices, and measuring success through key metrics.",
        difficulty: Difficulty::Advanced,
    },
    FallbackTemplate {
        question: "What resources would you recommend for someone learning {topic}?",
        answer: "I recommend official documentation, hands-on projects, online courses, and \
                 community forums for comprehensive learning of {topic}.",
        difficulty: Difficulty::Intermediate,
    },
];

/// Outcome of one generation attempt against the remote model.
///
/// Only [`GenerationOutcome::Generated`] reaches the caller as-is; every
/// other variant is funnelled through the fallback selection step.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The model returned exactly five well-formed questions.
    Generated(QuestionSet),
    /// The remote call itself failed (timeout, network, non-2xx, no key).
    TransportFailure(String),
    /// The reply text was not a JSON array of well-formed questions.
    ParseFailure(String),
    /// The reply parsed cleanly but held the wrong number of items.
    CountMismatch(usize),
}

/// Validate a model reply against the question-set contract.
///
/// The reply must be a JSON array whose elements each carry a non-empty
/// `question`, a non-empty `answer` and a recognised `difficulty`, and the
/// array must hold exactly [`QUESTION_COUNT`] elements. Element validation
/// runs first so a malformed four-item reply reports as a parse failure,
/// not a count mismatch.
pub fn parse_model_reply(text: &str) -> GenerationOutcome {
    let questions: Vec<InterviewQuestion> = match serde_json::from_str(text) {
        Ok(questions) => questions,
        Err(err) => return GenerationOutcome::ParseFailure(err.to_string()),
    };
    if let Some(position) = questions
        .iter()
        .position(|q| q.question.trim().is_empty() || q.answer.trim().is_empty())
    {
        return GenerationOutcome::ParseFailure(format!(
            "question {position} has an empty question or answer field"
        ));
    }
    match QuestionSet::from_questions(questions) {
        Ok(set) => GenerationOutcome::Generated(set),
        Err(err) => GenerationOutcome::CountMismatch(err.found),
    }
}

/// Build the instruction payload sent to the remote model.
pub fn build_completion_request(topic: &Topic) -> CompletionRequest {
    let system = format!(
        "You are an expert technical interviewer. Generate exactly 5 advanced interview \
         questions about {topic}.\n\n\
         For each question, provide:\n\
         1. A clear, specific question that tests deep understanding\n\
         2. A concise but comprehensive answer (2-3 sentences)\n\
         3. The difficulty level (Intermediate/Advanced)\n\n\
         Format your response as a JSON array where each object has:\n\
         - \"question\": the interview question\n\
         - \"answer\": the answer\n\
         - \"difficulty\": the difficulty level\n\n\
         Make sure the questions are practical and relevant to real-world scenarios in {topic}."
    );
    let user = format!("Generate 5 advanced interview questions about {topic} with clear, concise answers.");
    CompletionRequest { system, user }
}

/// Generates interview question sets for a topic, never failing the caller.
pub struct InterviewService {
    model: Arc<dyn QuestionModel>,
}

impl InterviewService {
    /// Wire the service to a remote model port.
    pub fn new(model: Arc<dyn QuestionModel>) -> Self {
        Self { model }
    }

    /// Produce a question set for the topic.
    ///
    /// Total operation: any failed generation attempt resolves to the
    /// deterministic fallback set, never an error.
    pub async fn generate(&self, topic: &Topic) -> QuestionSet {
        match self.attempt(topic).await {
            GenerationOutcome::Generated(set) => {
                debug!(%topic, "returning model-generated question set");
                set
            }
            GenerationOutcome::TransportFailure(detail) => {
                warn!(%topic, detail, "model call failed; using fallback questions");
                QuestionSet::fallback(topic)
            }
            GenerationOutcome::ParseFailure(detail) => {
                warn!(%topic, detail, "model reply failed validation; using fallback questions");
                QuestionSet::fallback(topic)
            }
            GenerationOutcome::CountMismatch(found) => {
                warn!(%topic, found, "model returned wrong question count; using fallback questions");
                QuestionSet::fallback(topic)
            }
        }
    }

    /// One generation attempt, with each failure mode kept distinct.
    pub async fn attempt(&self, topic: &Topic) -> GenerationOutcome {
        let request = build_completion_request(topic);
        match self.model.complete(&request).await {
            Ok(reply) => parse_model_reply(&reply),
            Err(err) => GenerationOutcome::TransportFailure(err.to_string()),
        }
    }

    /// Generate and then filter by difficulty.
    ///
    /// Filtering happens after generation or fallback, so the result may
    /// hold anywhere from zero to five questions; it is never re-generated
    /// to guarantee a non-empty list.
    pub async fn questions_by_difficulty(
        &self,
        topic: &Topic,
        filter: DifficultyFilter,
    ) -> Vec<InterviewQuestion> {
        let set = self.generate(topic).await;
        match filter {
            DifficultyFilter::All => set.into_questions(),
            DifficultyFilter::Only(level) => set
                .into_questions()
                .into_iter()
                .filter(|q| q.difficulty == level)
                .collect(),
        }
    }
}
