//! Terminal viewer for a finished verification, built on
//! [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for the cache list, statistics,
//!   check results and status bar
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] from a [`Verification`] and call [`App::run`].
//!
//! [`Verification`]: crate::verify::Verification
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
