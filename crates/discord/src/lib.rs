//! Discord integration - gateway bot interface
//!
//! This crate provides the Discord-facing surface for rollcall:
//! - **Gateway** (`gateway`) - event-loop runner with reconnect policy
//! - **Events** (`events`) - slash commands, button clicks, form submits
//! - **Cards** (`cards`) - embed/button payload builders for status cards
//! - **Chat API** (`api`) - capability trait for the platform collaborator
//! - **Service** (`service`) - availability handlers over the session store
//!
//! # Architecture
//!
//! ```text
//! Gateway Events → EventDispatcher → AvailabilityService → Session Store
//!                       ↓
//!                  Card payloads → ChatApi (post/edit/broadcast/private)
//! ```
//!
//! The platform client itself (networking, wire protocol, UI rendering) is
//! out of scope; `ChatApi` and `GatewayTransport` are the seams a real
//! client plugs into, and the `Noop` implementations keep the process
//! runnable offline.

pub mod api;
pub mod cards;
pub mod events;
pub mod gateway;
pub mod service;
