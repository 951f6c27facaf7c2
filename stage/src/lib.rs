//! Placement and rendering engine for the stage formation editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the stage canvas: translating raw pointer/keyboard events
//! into placement-session transitions, snapping pixel coordinates to the
//! sub-grid, persisting confirmed placements through a character repository,
//! and redrawing the layered scene (grid, guides, placed characters, the
//! in-progress placement, tooltip, magnifier). Everything except [`render`],
//! the outer [`engine::Engine`], and [`store::BrowserRepository`] is
//! browser-independent and unit-tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`grid`] | Pixel/grid-unit conversion and derived scene geometry |
//! | [`character`] | Character model, color palette, and the roster |
//! | [`session`] | Placement state machine |
//! | [`hit`] | Hit-testing against placed characters |
//! | [`input`] | Edit modes, field validation, and the magnifier hold timer |
//! | [`store`] | Character repository contract and implementations |
//! | [`manager`] | Repository-backed roster mutations with reload semantics |
//! | [`render`] | Full-scene redraw to a 2D context |
//! | [`export`] | Scene export document |
//! | [`consts`] | Shared numeric constants |

pub mod character;
pub mod consts;
pub mod engine;
pub mod export;
pub mod grid;
pub mod hit;
pub mod input;
pub mod manager;
pub mod render;
pub mod session;
pub mod store;
