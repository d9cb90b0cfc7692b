#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{KeyEntity, Question, Quiz};

    /// Creates a minimal valid quiz for serialization and store tests.
    pub fn sample_quiz() -> Quiz {
        Quiz {
            title: "Test Subject".to_string(),
            summary: "A concise summary of the test subject.".to_string(),
            key_entities: vec![KeyEntity {
                name: "Entity".to_string(),
                description: "A thing".to_string(),
                relevance: "Central to the topic".to_string(),
            }],
            related_topics: vec![
                "Topic A".to_string(),
                "Topic B".to_string(),
                "Topic C".to_string(),
            ],
            questions: vec![Question {
                question: "What is tested?".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct_answer: "A".to_string(),
                explanation: "Because A.".to_string(),
            }],
        }
    }

    pub fn sample_quiz_json() -> String {
        serde_json::to_string(&sample_quiz()).expect("sample quiz should serialize")
    }

    /// Builds a Wikipedia-shaped page with the given title and body paragraphs.
    pub fn wiki_article_html(title: &str, paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<p>{p}</p>"))
            .collect();
        format!(
            "<html><body><h1 id=\"firstHeading\">{title}</h1>\
             <div id=\"mw-content-text\">{body}</div></body></html>"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::Quiz;

    #[test]
    fn test_sample_quiz_json_round_trips() {
        let decoded: Quiz = serde_json::from_str(&sample_quiz_json()).unwrap();
        assert_eq!(decoded, sample_quiz());
    }

    #[test]
    fn test_wiki_article_html_shape() {
        let html = wiki_article_html("Topic", &["First paragraph.", "Second paragraph."]);
        assert!(html.contains("firstHeading"));
        assert!(html.contains("mw-content-text"));
        assert!(html.contains("<p>First paragraph.</p>"));
    }
}
