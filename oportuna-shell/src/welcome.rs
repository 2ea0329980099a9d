use crate::dataset::CourseRow;
use crate::render::{self, Layout};

/// Lifecycle of the one-time welcome panel: unseen until the user starts
/// exploring, then seen for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeState {
    Unseen,
    Seen,
}

/// Per-session presentation state, threaded explicitly through rendering.
///
/// While the welcome panel is pending, [`ShellSession::render`] yields the
/// panel instead of results; [`ShellSession::acknowledge`] flips the state
/// permanently for this session.
#[derive(Debug, Clone)]
pub struct ShellSession {
    welcome: WelcomeState,
}

impl ShellSession {
    /// A fresh session starts on the welcome panel.
    pub fn new() -> Self {
        Self {
            welcome: WelcomeState::Unseen,
        }
    }

    /// A session that goes straight to the results (non-interactive use).
    pub fn skip_welcome() -> Self {
        Self {
            welcome: WelcomeState::Seen,
        }
    }

    pub fn welcome_pending(&self) -> bool {
        self.welcome == WelcomeState::Unseen
    }

    /// The user chose to start exploring.
    pub fn acknowledge(&mut self) {
        self.welcome = WelcomeState::Seen;
    }

    /// Render this session's current view of the filtered rows.
    pub fn render(&self, rows: &[CourseRow], layout: Layout) -> String {
        if self.welcome_pending() {
            return welcome_panel();
        }

        let listing = match layout {
            Layout::Table => render::render_table(rows),
            Layout::Cards => render::render_cards(rows),
        };
        format!("{}\n{}", render::render_summary(rows.len()), listing)
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

fn welcome_panel() -> String {
    concat!(
        "<section class=\"welcome\">\n",
        "<h1>O Futuro da sua Carreira Começa Agora.</h1>\n",
        "<h4>Uma plataforma inteligente que mapeia os melhores cursos gratuitos para você.</h4>\n",
        "<button>🚀 Começar a Explorar</button>\n",
        "</section>"
    )
    .to_string()
}
