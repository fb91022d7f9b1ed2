//! # TUI Components
//!
//! Every piece of the screen, top to bottom:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                                          │  PageHeader
//! │  GO (GAME)  [2/14]                       │
//! │                                          │
//! │  Go is an abstract strategy board ...    │  ArticleView
//! │                                          │  (or DisambiguationView,
//! │  (1) abstract strategy                   │   or Splash when idle)
//! │  (2) board game                          │
//! │                                          │
//! │  Go to: alan turing                      │  PromptLine
//! │  N Next Page   P Previous Page   ...     │  CommandBar
//! │  O Open in Browser   U Copy URL  ...     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! All components are stateless: they receive what they draw as props and
//! keep nothing between frames. Each file holds its tests.

mod article_view;
mod command_bar;
mod disambiguation_view;
mod page_header;
mod prompt_line;
mod splash;

pub use article_view::ArticleView;
pub use command_bar::CommandBar;
pub use disambiguation_view::DisambiguationView;
pub use page_header::PageHeader;
pub use prompt_line::PromptLine;
pub use splash::Splash;
