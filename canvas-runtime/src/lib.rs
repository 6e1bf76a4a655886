//! Live widget runtime for the canvas engine.
//!
//! Holds mounted widgets and their meta-state, and implements the update
//! protocol: every meta-state write goes through
//! [`WidgetRuntime::request_update`], which writes synchronously and then
//! dispatches any bound action to an [`ActionExecutor`] without waiting.
//!
//! # Example
//!
//! ```
//! use canvas_runtime::{RuntimeConfig, WidgetRuntime};
//! use canvas_types::WidgetType;
//! use canvas_widgets::create_instance;
//! use serde_json::json;
//!
//! let mut runtime = WidgetRuntime::new(RuntimeConfig::default());
//! let id = runtime.mount(create_instance(WidgetType::Input, "Input1"));
//! runtime.on_text_changed(id, "hello").unwrap();
//! assert_eq!(runtime.read_meta(id, "text").unwrap(), json!("hello"));
//! assert_eq!(runtime.derived(id).unwrap()["value"], json!("hello"));
//! ```

mod action;
mod config;
mod error;
mod handlers;
mod logging;
mod meta;
mod runtime;

pub use action::{ActionExecutor, ActionRequest, NoopExecutor};
pub use config::RuntimeConfig;
pub use error::{RuntimeError, RuntimeResult};
pub use logging::init_tracing;
pub use meta::MetaStore;
pub use runtime::{UpdateOutcome, WidgetRuntime};
