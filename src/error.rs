//! Error types for the surface, the widget collaborators, and the engine.

use crate::surface::NodeId;
use crate::widget::WidgetKey;

/// Errors raised by the rendering surface arena.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("cannot append {child:?} under {parent:?}: it is an ancestor of the target")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Errors raised by a concrete widget's render hook.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("widget `{id}` cannot render into a <{tag}> node")]
    UnsupportedNode { id: String, tag: String },
    #[error("widget `{id}` is missing required option `{option}`")]
    MissingOption { id: String, option: String },
    #[error("{0}")]
    Other(String),
}

/// Errors raised by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("widget {0:?} does not exist")]
    UnknownWidget(WidgetKey),
    #[error("root scope does not exist")]
    UnknownScope,
    #[error("the default root scope cannot be removed")]
    DefaultScope,
    #[error("attaching `{child}` under `{parent}` would create a cycle")]
    Cycle { parent: String, child: String },
    #[error("render of widget `{id}` failed")]
    Render {
        id: String,
        #[source]
        source: WidgetError,
    },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
