//! Native terminal shell for a login screen driven by an external presenter.
//!
//! The [`view::LoginView`] owns the presenter through a
//! [`presenter::PresenterHandle`], receives its state notifications through
//! the [`bridge`] on the UI thread, and tears it down explicitly.

pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod shutdown;
pub mod ui;
pub mod view;
