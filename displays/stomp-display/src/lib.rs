//! Setup screen rendering for the foot controller
//!
//! This crate provides:
//! - `DisplayBackend` trait for pixel displays (fills, triangles, text)
//! - Layout geometry of the 240x135 landscape TFT
//! - `Chrome` for the persistent header and corner triangles
//! - `Renderer` that turns navigator updates into draw calls
//! - `GraphicsBackend` adapting any embedded-graphics `DrawTarget`
//!
//! # Architecture
//!
//! The menu in `stomp-core` never draws. Every change comes back as an
//! [`Update`](stomp_core::Update) and the renderer subscribes to those:
//!
//! ```text
//! SetupSession::poll ──Update──► Renderer::render ──► DisplayBackend
//!                                     │                     ▲
//!                                     └──► Chrome ──────────┘
//! ```
//!
//! A full body redraw happens only on [`Redraw::Enter`]; value changes
//! touch the value box and the changed bar columns.
//!
//! [`Redraw::Enter`]: stomp_core::menu::Redraw::Enter

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod chrome;
pub mod graphics;
pub mod layout;
pub mod renderer;

// Re-export key types
pub use backend::{Color, DisplayBackend, DisplayError};
pub use chrome::Chrome;
pub use graphics::GraphicsBackend;
pub use layout::{band_between_triangles, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use renderer::Renderer;
