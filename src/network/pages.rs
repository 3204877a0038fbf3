//! Page Assembly
//!
//! Renders the single game page from a view struct. The game core never
//! touches HTML; handlers build a [`PageView`] and hand it here.

use crate::highscore::HighscoreRow;

/// What kind of message the page is showing, for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Validation failure.
    Error,
    /// Too-low / too-high hint.
    Hint,
    /// Round won.
    Win,
}

/// One message shown above the form.
#[derive(Clone, Debug)]
pub struct Message {
    /// Styling class.
    pub kind: MessageKind,
    /// Player-facing text.
    pub text: String,
}

impl Message {
    /// Validation error message.
    pub fn error(text: String) -> Self {
        Self { kind: MessageKind::Error, text }
    }

    /// Bound-narrowing hint message.
    pub fn hint(text: String) -> Self {
        Self { kind: MessageKind::Hint, text }
    }

    /// Win message.
    pub fn win(text: String) -> Self {
        Self { kind: MessageKind::Win, text }
    }
}

/// Everything the page needs, already formatted by the core.
#[derive(Clone, Debug)]
pub struct PageView {
    /// Current inclusive lower bound.
    pub lower: u32,
    /// Current inclusive upper bound.
    pub upper: u32,
    /// Guesses made this round.
    pub guesses: u32,
    /// Outcome or error message, if any.
    pub message: Option<Message>,
    /// Display-ready highscore rows.
    pub highscores: Vec<HighscoreRow>,
}

/// Render the full game page.
pub fn render_page(view: &PageView) -> String {
    let message_html = match &view.message {
        Some(message) => {
            let class = match message.kind {
                MessageKind::Error => "error",
                MessageKind::Hint => "hint",
                MessageKind::Win => "win",
            };
            format!(r#"<p class="message {class}">{text}</p>"#, text = message.text)
        }
        None => String::new(),
    };

    let highscore_html = render_highscore_table(&view.highscores);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Guess the Number</title>
<style>
  body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
  .message.error {{ color: #b00020; }}
  .message.hint {{ color: #1a237e; }}
  .message.win {{ color: #1b5e20; font-weight: bold; }}
  table {{ border-collapse: collapse; }}
  th, td {{ border: 1px solid #999; padding: 0.25rem 0.75rem; text-align: right; }}
</style>
</head>
<body>
<h1>Guess the Number</h1>
<p>I am thinking of a number between <strong>{lower}</strong> and <strong>{upper}</strong>. Guesses this round: {guesses}.</p>
{message_html}
<form method="post" action="/">
  <label for="number">Your guess:</label>
  <input id="number" name="number" type="number" min="{lower}" max="{upper}" required autofocus>
  <button type="submit">Guess</button>
</form>
{highscore_html}
</body>
</html>
"#,
        lower = view.lower,
        upper = view.upper,
        guesses = view.guesses,
    )
}

/// Render the highscore table, or a placeholder when empty.
fn render_highscore_table(rows: &[HighscoreRow]) -> String {
    if rows.is_empty() {
        return "<h2>Highscores</h2>\n<p>No completed rounds yet.</p>".to_string();
    }

    let mut body = String::new();
    for row in rows {
        body.push_str(&format!(
            "<tr><td>{rank}</td><td>{attempts}</td><td>{number}</td><td>{date}</td><td>{time}</td></tr>\n",
            rank = row.rank,
            attempts = row.attempts,
            number = row.number,
            date = row.date,
            time = row.time,
        ));
    }

    format!(
        "<h2>Highscores</h2>\n<table>\n<tr><th>#</th><th>Attempts</th><th>Number</th><th>Date</th><th>Time</th></tr>\n{body}</table>"
    )
}
