//! Validated input for new or edited content
//!
//! Each draft reports every failing field at once.

/// Title and description of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub title: String,
    pub description: String,
}

impl QuestionDraft {
    pub fn new(title: &str, description: &str) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let title = required(title, "Please provide a value for Title", &mut errors);
        let description = required(
            description,
            "Please provide a value for description",
            &mut errors,
        );

        if errors.is_empty() {
            Ok(Self { title, description })
        } else {
            Err(errors)
        }
    }
}

/// A meme answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDraft {
    pub title: String,
    pub meme_url: String,
}

impl AnswerDraft {
    pub fn new(title: &str, meme_url: &str) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let title = required(title, "Please provide a value for Title", &mut errors);
        let meme_url = required(meme_url, "Please provide a value for Meme URL", &mut errors);

        if errors.is_empty() {
            Ok(Self { title, meme_url })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub body: String,
}

impl CommentDraft {
    pub fn new(body: &str) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let body = required(body, "Please provide a value for Comment", &mut errors);

        if errors.is_empty() {
            Ok(Self { body })
        } else {
            Err(errors)
        }
    }
}

fn required(value: &str, message: &str, errors: &mut Vec<String>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(message.to_string());
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_draft_reports_both_fields() {
        assert_eq!(
            QuestionDraft::new(" ", "").unwrap_err(),
            [
                "Please provide a value for Title",
                "Please provide a value for description"
            ]
        );
    }

    #[test]
    fn test_drafts_are_trimmed() {
        let draft = QuestionDraft::new("  Why? ", " because ").unwrap();
        assert_eq!(draft.title, "Why?");
        assert_eq!(draft.description, "because");
    }

    #[test]
    fn test_answer_and_comment_rules() {
        assert_eq!(
            AnswerDraft::new("funny", "").unwrap_err(),
            ["Please provide a value for Meme URL"]
        );
        assert!(CommentDraft::new("lol").is_ok());
        assert_eq!(
            CommentDraft::new("").unwrap_err(),
            ["Please provide a value for Comment"]
        );
    }
}
