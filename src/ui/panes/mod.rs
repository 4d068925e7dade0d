//! TUI pane rendering modules
//!
//! - [`caches`]: cache list with a PASS/FAIL verdict per cache
//! - [`stats`]: statistics of the selected cache
//! - [`results`]: invariant outcomes and violations involving the selected cache
//! - [`status`]: status bar with keybindings and the overall verdict
//!
//! Each module exports one stateless `render_*` function; scroll offsets live
//! in [`App`](crate::ui::App) and are passed in by reference.

pub mod caches;
pub mod results;
pub mod stats;
pub mod status;

pub use caches::{render_caches_pane, CachesRenderData};
pub use results::render_results_pane;
pub use stats::render_stats_pane;
pub use status::render_status_bar;
