use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::error::Error;
use crate::model::{Card, CardStatus};
use crate::response::{envelope, Envelope};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cards", post(issue_card).get(get_all_cards))
        .route("/cards/user/:user_id", get(get_cards_by_user))
        .route(
            "/cards/:card_number",
            get(get_card).put(update_card).delete(delete_card),
        )
        .route("/cards/:card_number/activate", put(activate_card))
        .route("/cards/:card_number/deactivate", put(deactivate_card))
        .route("/cards/:card_number/hold", put(hold_card))
}

#[instrument(skip(state, card))]
async fn issue_card(
    State(state): State<AppState>,
    Json(card): Json<Card>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state.cards.issue(card).await?;
    Ok(envelope("Card issued successfully", StatusCode::CREATED, card))
}

#[instrument(skip(state))]
async fn get_all_cards(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Envelope<Vec<Card>>>), Error> {
    let cards = state.cards.get_all().await?;
    Ok(envelope("Retrieved all cards", StatusCode::OK, cards))
}

#[instrument(skip(state))]
async fn get_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state.cards.get(&card_number).await?;
    Ok(envelope("Card retrieved successfully", StatusCode::OK, card))
}

#[instrument(skip(state))]
async fn get_cards_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<Envelope<Vec<Card>>>), Error> {
    let cards = state.cards.cards_for_user(user_id).await?;
    Ok(envelope("Retrieved cards for user", StatusCode::OK, cards))
}

#[instrument(skip(state, details))]
async fn update_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
    Json(details): Json<Card>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state.cards.update(&card_number, details).await?;
    Ok(envelope("Card updated successfully", StatusCode::OK, card))
}

#[instrument(skip(state))]
async fn delete_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state.cards.delete(&card_number).await?;
    Ok(envelope("Card deleted successfully", StatusCode::OK, card))
}

#[instrument(skip(state))]
async fn activate_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state
        .cards
        .set_status(&card_number, CardStatus::Active)
        .await?;
    Ok(envelope("Card activated successfully", StatusCode::OK, card))
}

#[instrument(skip(state))]
async fn deactivate_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state
        .cards
        .set_status(&card_number, CardStatus::Inactive)
        .await?;
    Ok(envelope("Card deactivated successfully", StatusCode::OK, card))
}

#[instrument(skip(state))]
async fn hold_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Card>>), Error> {
    let card = state
        .cards
        .set_status(&card_number, CardStatus::OnHold)
        .await?;
    Ok(envelope("Card placed on hold", StatusCode::OK, card))
}
