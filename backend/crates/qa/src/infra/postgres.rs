//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, CommentId, QuestionId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{Answer, Comment, Question, QuestionSummary, Stance, VoteTally};
use crate::domain::repository::{
    AnswerRepository, CommentRepository, QuestionRepository, VoteRepository,
};
use crate::domain::value_objects::{AnswerDraft, CommentDraft, QuestionDraft};
use crate::error::{QaError, QaResult};

/// PostgreSQL-backed Q&A repository
#[derive(Clone)]
pub struct PgQaRepository {
    pool: PgPool,
}

impl PgQaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Parent-row foreign keys, named in the migration
const ANSWER_QUESTION_FK: &str = "answers_question_id_fkey";
const COMMENT_ANSWER_FK: &str = "comments_answer_id_fkey";
const VOTE_ANSWER_FK: &str = "answer_votes_answer_id_fkey";

/// Map a violation of `constraint` (parent row deleted concurrently) to
/// `missing`. Any other failure, including a vanished `user_id`, stays a
/// database error.
fn parent_missing(
    constraint: &'static str,
    missing: QaError,
) -> impl FnOnce(sqlx::Error) -> QaError {
    move |e| match e {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() && db.constraint() == Some(constraint) =>
        {
            missing
        }
        other => QaError::Database(other),
    }
}

// ============================================================================
// Question Repository Implementation
// ============================================================================

impl QuestionRepository for PgQaRepository {
    async fn list_recent(&self) -> QaResult<Vec<QuestionSummary>> {
        let rows = sqlx::query_as::<_, QuestionSummaryRow>(
            r#"
            SELECT
                q.id,
                q.user_id,
                q.title,
                q.description,
                q.created_at,
                q.updated_at,
                COUNT(a.id) AS answer_count
            FROM questions q
            LEFT JOIN answers a ON a.question_id = q.id
            GROUP BY q.id
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuestionSummaryRow::into_summary).collect())
    }

    async fn find_question(&self, id: QuestionId) -> QaResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn create_question(&self, user_id: UserId, draft: &QuestionDraft) -> QaResult<Question> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(user_id.value())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_question())
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> QaResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            UPDATE questions
            SET title = $2, description = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(id.value())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn delete_question(&self, id: QuestionId) -> QaResult<bool> {
        let deleted = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Answer Repository Implementation
// ============================================================================

impl AnswerRepository for PgQaRepository {
    async fn list_answers(&self, question_id: QuestionId) -> QaResult<Vec<Answer>> {
        let rows = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT id, question_id, user_id, title, meme_url, created_at, updated_at
            FROM answers
            WHERE question_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(question_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AnswerRow::into_answer).collect())
    }

    async fn find_answer(&self, id: AnswerId) -> QaResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT id, question_id, user_id, title, meme_url, created_at, updated_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AnswerRow::into_answer))
    }

    async fn create_answer(
        &self,
        question_id: QuestionId,
        user_id: UserId,
        draft: &AnswerDraft,
    ) -> QaResult<Answer> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            INSERT INTO answers (question_id, user_id, title, meme_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, question_id, user_id, title, meme_url, created_at, updated_at
            "#,
        )
        .bind(question_id.value())
        .bind(user_id.value())
        .bind(&draft.title)
        .bind(&draft.meme_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(parent_missing(ANSWER_QUESTION_FK, QaError::QuestionNotFound))?;

        Ok(row.into_answer())
    }

    async fn delete_answer(&self, id: AnswerId) -> QaResult<bool> {
        let deleted = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgQaRepository {
    async fn list_comments_for_question(&self, question_id: QuestionId) -> QaResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.answer_id, c.user_id, c.body, c.created_at, c.updated_at
            FROM comments c
            JOIN answers a ON a.id = c.answer_id
            WHERE a.question_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(question_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn find_comment(&self, id: CommentId) -> QaResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, answer_id, user_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn create_comment(
        &self,
        answer_id: AnswerId,
        user_id: UserId,
        draft: &CommentDraft,
    ) -> QaResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (answer_id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, answer_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(answer_id.value())
        .bind(user_id.value())
        .bind(&draft.body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(parent_missing(COMMENT_ANSWER_FK, QaError::AnswerNotFound))?;

        Ok(row.into_comment())
    }

    async fn delete_comment(&self, id: CommentId) -> QaResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Vote Repository Implementation
// ============================================================================

impl VoteRepository for PgQaRepository {
    async fn tally(&self, answer_id: AnswerId) -> QaResult<VoteTally> {
        let (upvotes, downvotes): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE stance = 1),
                COUNT(*) FILTER (WHERE stance = -1)
            FROM answer_votes
            WHERE answer_id = $1
            "#,
        )
        .bind(answer_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(VoteTally {
            upvotes: upvotes.max(0) as u64,
            downvotes: downvotes.max(0) as u64,
        })
    }

    async fn stance_of(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<Option<Stance>> {
        let stance: Option<i16> = sqlx::query_scalar(
            "SELECT stance FROM answer_votes WHERE user_id = $1 AND answer_id = $2",
        )
        .bind(user_id.value())
        .bind(answer_id.value())
        .fetch_optional(&self.pool)
        .await?;

        stance
            .map(|v| {
                Stance::from_i16(v)
                    .ok_or_else(|| QaError::Internal(format!("Invalid stored stance: {v}")))
            })
            .transpose()
    }

    async fn cast_vote(
        &self,
        user_id: UserId,
        answer_id: AnswerId,
        stance: Stance,
    ) -> QaResult<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO answer_votes (user_id, answer_id, stance, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, answer_id) DO UPDATE SET
                stance = EXCLUDED.stance,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id.value())
        .bind(answer_id.value())
        .bind(stance.as_i16())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(parent_missing(VOTE_ANSWER_FK, QaError::AnswerNotFound))?;

        Ok(())
    }

    async fn retract_vote(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<bool> {
        let deleted = sqlx::query("DELETE FROM answer_votes WHERE user_id = $1 AND answer_id = $2")
            .bind(user_id.value())
            .bind(answer_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    user_id: i64,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            id: QuestionId::from_raw(self.id),
            user_id: UserId::from_raw(self.user_id),
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionSummaryRow {
    #[sqlx(flatten)]
    question: QuestionRow,
    answer_count: i64,
}

impl QuestionSummaryRow {
    fn into_summary(self) -> QuestionSummary {
        QuestionSummary {
            question: self.question.into_question(),
            answer_count: self.answer_count.max(0) as u64,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    question_id: i64,
    user_id: i64,
    title: String,
    meme_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AnswerRow {
    fn into_answer(self) -> Answer {
        Answer {
            id: AnswerId::from_raw(self.id),
            question_id: QuestionId::from_raw(self.question_id),
            user_id: UserId::from_raw(self.user_id),
            title: self.title,
            meme_url: self.meme_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    answer_id: i64,
    user_id: i64,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::from_raw(self.id),
            answer_id: AnswerId::from_raw(self.answer_id),
            user_id: UserId::from_raw(self.user_id),
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
