//! tui-rockfall (workspace facade crate).
//!
//! This package keeps a stable `tui_rockfall::{core,input,score,term,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use tui_rockfall_core as core;
pub use tui_rockfall_input as input;
pub use tui_rockfall_score as score;
pub use tui_rockfall_term as term;
pub use tui_rockfall_types as types;
