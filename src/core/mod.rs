//! # Core Application Logic
//!
//! The reader's navigation logic. It knows nothing about terminals,
//! HTTP or stdin.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Document (content)   │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │   Source   │
//!          │  Adapter   │                │ (Wikipedia)│
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`]: `Document`, `Paragraph`, `Link` and paging rules
//! - [`state`]: The `App` struct and `Position`
//! - [`history`]: The back-stack
//! - [`query`]: Query building and the prompt buffer
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`config`]: `~/.wikiterm/config.toml`

pub mod action;
pub mod config;
pub mod document;
pub mod history;
pub mod query;
pub mod state;
