//! HTTP Handlers
//!
//! One endpoint for the game (`GET` fresh game / redisplay, `POST` submit a
//! guess), plus the liveness probe and a JSON view of the highscore list.
//! Each handler loads the request's session at entry and works on that
//! context object only.

use axum::extract::{Form, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::game::guess::{evaluate, validate_guess, GuessOutcome};
use crate::highscore::{HighscoreRecord, HighscoreRow};
use crate::network::pages::{render_page, Message, PageView};
use crate::network::server::AppState;
use crate::network::session::{PlayerSession, SessionId};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sid";

/// The game's one form field.
#[derive(Debug, Deserialize)]
pub struct GuessForm {
    /// Raw guess input, validated server-side against the current bounds.
    pub number: String,
}

/// Pull the session id out of the request's cookie header, if any.
fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// Render the game page for a session, setting the cookie on new sessions.
fn page_response(session: &PlayerSession, message: Option<Message>, set_cookie: bool) -> Response {
    let view = PageView {
        lower: session.round.lower,
        upper: session.round.upper,
        guesses: session.round.guesses,
        message,
        highscores: session.highscores.render(),
    };

    let mut response = Html(render_page(&view)).into_response();
    if set_cookie {
        let cookie = format!(
            "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax",
            id = session.id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// `GET /` — a fresh round: new secret, full bounds, zero guesses, and the
/// highscore table reloaded from disk into the session.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let requested = session_id_from_headers(&headers);
    let (session, created) = state.sessions.get_or_create(requested).await;
    let mut session = session.write().await;

    session.touch();
    session.fresh_round();
    session.highscores = state.store.load().await;

    debug!(session = %session.id, "fresh round started");
    page_response(&session, None, created)
}

/// `POST /` — validate and evaluate one guess.
///
/// Validation failures leave the round untouched. A win runs the store's
/// read-modify-write cycle, refreshes the session's table, and resets the
/// round for the next secret.
pub async fn submit_guess(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<GuessForm>,
) -> Response {
    let requested = session_id_from_headers(&headers);
    let (session, created) = state.sessions.get_or_create(requested).await;
    let mut session = session.write().await;

    session.touch();
    if session.repair_if_inconsistent() {
        warn!(session = %session.id, "inconsistent round state, started fresh round");
    }

    let message = match validate_guess(&form.number, &session.round) {
        Err(err) => Message::error(err.to_string()),
        Ok(guess) => {
            let outcome = evaluate(&mut session.round, guess);
            debug!(session = %session.id, guess, ?outcome, "guess evaluated");

            match outcome {
                GuessOutcome::Won(report) => {
                    info!(
                        session = %session.id,
                        attempts = report.attempts,
                        secret = report.secret,
                        "round won"
                    );
                    let text = outcome.message();
                    let record = HighscoreRecord::from_win(&report);
                    session.highscores = state.store.record_win(record).await;
                    session.fresh_round();
                    Message::win(text)
                }
                hint => Message::hint(hint.message()),
            }
        }
    };

    page_response(&session, Some(message), created)
}

/// `GET /healthz` — liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": state.version,
        "sessions": state.sessions.session_count().await,
    }))
}

/// `GET /highscores` — the persisted list as JSON rows.
pub async fn highscores(State(state): State<AppState>) -> Json<Vec<HighscoreRow>> {
    Json(state.store.load().await.render())
}
