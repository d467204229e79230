use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    model::{
        CrudRepository, ResourceType, ResourceTyped,
        entity::{Module, Question, QuestionCreate, Quiz, QuizSummaryRow},
    },
    web::{
        AppState, AuthenticatedUser, OrNotFound, RequestContext, WebError, WebResult,
        forms::{Bound, FormData, QuestionDraft, QuizForm, Validate, grade},
        routes::parse_id,
        views,
    },
};

async fn render_create_page(
    state: &AppState,
    user: &AuthenticatedUser,
    bound: Bound<QuizForm>,
    drafts: &[QuestionDraft],
) -> WebResult<Html<String>> {
    let modules = Module::list(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?;

    Ok(Html(views::quizzes::create_quiz(
        &bound,
        drafts,
        &modules,
        user.roles(),
    )))
}

pub async fn quiz_create_page_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    render_create_page(&state, user, Bound::default(), &[]).await
}

/// Creates the quiz, then one question per slot whether or not the slot was filled in.
#[tracing::instrument(skip_all)]
pub async fn quiz_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    data: FormData,
) -> WebResult<Response> {
    let user = ctx.user()?;
    let form = QuizForm::from_data(&data);
    let drafts = QuestionDraft::collect(&data);

    let quiz_data = match form
        .validate(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Quiz, e))?
    {
        Ok(quiz_data) => quiz_data,
        Err(errors) => {
            let page = render_create_page(&state, user, Bound::new(form, errors), &drafts).await?;
            return Ok(page.into_response());
        }
    };

    let quiz = Quiz::create(state.pool(), user, quiz_data)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Quiz, e))?;

    for draft in drafts {
        let question = QuestionCreate {
            quiz_id: quiz.id(),
            text: draft.text,
            answer: draft.answer,
            position: draft.position,
        };
        Question::create(state.pool(), user, question)
            .await
            .map_err(|e| WebError::resource_fetch_error(ResourceType::Question, e))?;
    }

    tracing::info!(quiz = %quiz.id(), "quiz created");
    Ok(Redirect::to("/quizzes").into_response())
}

pub async fn quiz_list_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let quizzes = QuizSummaryRow::fetch_all(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Quiz, e))?;

    Ok(Html(views::quizzes::quiz_list(&quizzes, user.roles())))
}

async fn find_quiz_with_questions(
    state: &AppState,
    user: &AuthenticatedUser,
    id: &str,
) -> WebResult<(Quiz, Vec<Question>)> {
    let id = parse_id(id, Quiz::get_resource_type())?;
    let quiz = Quiz::find_by_id(state.pool(), user, id)
        .await
        .or_not_found(Quiz::get_resource_type())?;

    let questions = Question::all_by_quiz(state.pool(), user, quiz.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Question, e))?;

    Ok((quiz, questions))
}

pub async fn quiz_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let (quiz, questions) = find_quiz_with_questions(&state, user, &id).await?;

    Ok(Html(views::quizzes::quiz_detail(&quiz, &questions, user.roles())))
}

/// Scores a submission. Nothing is stored.
#[tracing::instrument(skip(state, ctx, data))]
pub async fn quiz_submit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
    data: FormData,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let (quiz, questions) = find_quiz_with_questions(&state, user, &id).await?;

    let result = grade(&questions, &data);
    tracing::debug!(score = result.score, total = result.total, "quiz graded");

    Ok(Html(views::quizzes::quiz_result(&quiz, result, user.roles())))
}
