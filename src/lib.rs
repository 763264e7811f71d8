//! # ctrlkit
//!
//! A widget composition and lifecycle engine for retained surface trees.
//!
//! Widgets are declared on surface nodes through a small `key:value;...`
//! attribute grammar, instantiated by type name from a registry, linked into
//! an id-keyed ownership tree under root scopes, and driven through a state
//! machine (hover, press, disabled, readonly) mirrored as modifier classes on
//! their nodes.
//!
//! ## Core Systems
//!
//! - **[`surface`]** — Slotmap-backed node arena: attributes, classes, listeners
//! - **[`attr`]** — Logos tokenizer and parser for the declarative attribute grammar
//! - **[`widget`]** — Base record, widget trait, form capability, lifecycle tracking
//! - **[`widgets`]** — Built-in widgets: Panel, TextInput
//! - **[`engine`]** — Creation, composition, lookup, state, forms, dispose, dispatch
//! - **[`registry`]** — Type-name to constructor map
//! - **[`scope`]** — Root scopes (default and action)
//! - **[`event`]** — Surface notifications, widget messages, deferred tasks
//! - **[`testing`]** — Headless pilot and snapshot dumps

// Foundation
pub mod class_list;
pub mod config;
pub mod error;
pub mod id;
pub mod options;

// Core systems
pub mod attr;
pub mod surface;

// Widget system
pub mod registry;
pub mod scope;
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Engine
pub mod engine;

// Testing
pub mod testing;

pub use config::EngineConfig;
pub use engine::{AppendTarget, Engine};
pub use error::{EngineError, SurfaceError, WidgetError};
pub use options::Options;
pub use registry::WidgetRegistry;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use surface::{NodeData, NodeId, Surface};
pub use widget::{Control, FormControl, Owner, Widget, WidgetCx, WidgetKey, WidgetState};
