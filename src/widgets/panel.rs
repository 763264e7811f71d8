//! Panel widget: a plain composite with only the base render.

use std::any::Any;

use crate::widget::traits::Widget;

/// A composite widget that groups its children and adds no behaviour of its
/// own. Renders with the base render alone.
#[derive(Debug, Default)]
pub struct Panel;

impl Panel {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Panel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
