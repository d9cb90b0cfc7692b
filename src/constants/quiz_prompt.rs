/// Articles are truncated to this many characters before being embedded in the
/// prompt, to stay inside the backend's token limits.
pub const PROMPT_CONTENT_LIMIT: usize = 5_000;

/// Builds the quiz-generation instruction for one article. Pure: identical
/// inputs always produce an identical prompt.
pub fn build_quiz_prompt(title: &str, content: &str) -> String {
    let content: String = content.chars().take(PROMPT_CONTENT_LIMIT).collect();

    format!(
        r#"Create an educational quiz based on this Wikipedia article. Return ONLY valid JSON.

ARTICLE TITLE: {title}

ARTICLE CONTENT: {content}

Generate a quiz with this exact JSON structure:
{{
    "title": "string (the article title)",
    "summary": "string (2-3 paragraph concise summary of the article)",
    "key_entities": [
        {{
            "name": "string (important person, concept, or thing)",
            "description": "string (brief description)",
            "relevance": "string (why this is important to the topic)"
        }}
    ],
    "related_topics": ["string", "string", "string"],
    "questions": [
        {{
            "question": "string (multiple choice question)",
            "options": ["option A", "option B", "option C", "option D"],
            "correct_answer": "string (the correct option)",
            "explanation": "string (educational explanation)"
        }}
    ]
}}

Requirements:
- Create 5-8 multiple choice questions
- Include 3-5 key entities
- Include 3-5 related topics
- Questions should test understanding, not just recall
- Make explanations educational and clear
- Return ONLY the JSON object, no other text or markdown"#
    )
}
