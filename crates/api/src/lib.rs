//! Truth-AI prompt server.
//!
//! REST layer over the [`orchestrator`] crate: bearer-token authentication,
//! JSON request/response mapping and error-to-status translation.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Liveness and registered models (no auth) |
//! | GET | `/prompt/side-bar/list` | Sidebar entries |
//! | GET | `/prompt/side-bar/details?promptId=` | Sidebar detail |
//! | POST | `/prompt/create-best-prompt` | Optimize and store a question |
//! | POST | `/prompt/get-best/organized?promptId=` | Ask models, store a round |
//! | GET | `/prompt/optimized-prompt-list` | Optimized prompts |
//! | GET | `/prompt/crosscheck-list` | Prompts answered by 2+ models |
//! | GET | `/prompt/{promptId}` | Full detail |

pub mod auth;
pub mod backends;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
