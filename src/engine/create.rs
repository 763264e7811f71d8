//! Widget creation, declarative instantiation and rendering.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{Engine, WidgetSlot};
use crate::attr;
use crate::error::EngineError;
use crate::id::make_guid_with;
use crate::options::{self, Options};
use crate::scope::ScopeId;
use crate::surface::{NodeData, NodeId};
use crate::widget::{Control, Owner, Widget, WidgetCx, WidgetKey};

impl Engine {
    /// Instantiate a widget of a registered type.
    ///
    /// When `node` is given the widget presents through it, otherwise a
    /// detached `div` is created. The widget is registered in `scope` (the
    /// default scope when `None`) and then re-homed under the nearest widget
    /// owning the node's surface parent, if any. Returns `Ok(None)` when no
    /// constructor is registered for `widget_type`.
    pub fn create(
        &mut self,
        widget_type: &str,
        options: &Options,
        node: Option<NodeId>,
        scope: Option<ScopeId>,
    ) -> Result<Option<WidgetKey>, EngineError> {
        let mut options = options.clone();
        if options::get_str(&options, "id").map_or(true, |id| id.is_empty()) {
            options.insert(
                "id".to_owned(),
                Value::String(make_guid_with(&self.config.id_prefix)),
            );
        }

        let Some(constructor) = self.registry.get(widget_type) else {
            debug!(widget_type, "no constructor registered");
            return Ok(None);
        };
        let widget = constructor(&options);
        let control = Control::new(widget_type, &options, &self.config.id_prefix);
        Ok(Some(self.insert_widget(control, widget, node, scope)?))
    }

    /// Register an already-constructed widget, then bind and render it the
    /// same way [`Engine::create`] does.
    pub fn construct(
        &mut self,
        widget: Box<dyn Widget>,
        widget_type: &str,
        options: &Options,
        node: Option<NodeId>,
        scope: Option<ScopeId>,
    ) -> Result<WidgetKey, EngineError> {
        let control = Control::new(widget_type, options, &self.config.id_prefix);
        self.insert_widget(control, widget, node, scope)
    }

    /// Scan the subtree of `container` (the surface root when `None`) in
    /// document order and create a widget for every node carrying the ui
    /// attribute. Returns the root scope's control map afterwards.
    pub fn init(
        &mut self,
        container: Option<NodeId>,
        params: Option<&Options>,
        scope: Option<ScopeId>,
    ) -> Result<IndexMap<String, WidgetKey>, EngineError> {
        let scope = self.resolve_scope(scope);
        let empty = Options::new();
        let params = params.unwrap_or(&empty);
        let nodes = self.find_all_nodes(container);
        debug!(nodes = nodes.len(), "scanning for declarative widgets");

        for node in nodes {
            let Some(source) = self
                .surface
                .get(node)
                .and_then(|data| data.attr(&self.config.ui_attribute))
                .filter(|source| !source.is_empty())
                .map(str::to_owned)
            else {
                continue;
            };
            let options = attr::parse(&source, params, self.context.as_ref());
            let widget_type = options::get_str(&options, "type").unwrap_or_default();
            if self
                .create(&widget_type, &options, Some(node), Some(scope))?
                .is_none()
            {
                warn!(%widget_type, %source, "declared widget type is not registered");
            }
        }

        Ok(self.scopes[scope].control_map().clone())
    }

    /// Run a widget's render hook, falling back to the base render when the
    /// hook leaves the widget unrendered. Disposed widgets are skipped.
    pub fn render(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        let slot = self
            .widgets
            .get_mut(key)
            .ok_or(EngineError::UnknownWidget(key))?;
        if slot.control.is_disposed() || slot.control.main().is_none() {
            return Ok(());
        }

        slot.control.begin_render();
        let result = {
            let mut cx = WidgetCx::new(
                key,
                &mut slot.control,
                &mut self.surface,
                &mut self.messages,
                &mut self.deferred,
            );
            let result = slot.widget.render(&mut cx);
            if result.is_ok() && !cx.control.is_rendered() {
                cx.base_render();
            }
            result
        };
        slot.control.end_render();

        let id = slot.control.id().to_owned();
        if let Err(source) = result {
            return Err(EngineError::Render { id, source });
        }
        trace!(
            id = %id,
            elapsed_us = slot.control.render_duration().map_or(0, |d| d.as_micros() as u64),
            "widget rendered"
        );
        self.lifecycle.on_render(key);
        Ok(())
    }

    fn insert_widget(
        &mut self,
        mut control: Control,
        widget: Box<dyn Widget>,
        node: Option<NodeId>,
        scope: Option<ScopeId>,
    ) -> Result<WidgetKey, EngineError> {
        let main = match node.filter(|n| self.surface.contains(*n)) {
            Some(node) => node,
            None => self.surface.create_element(NodeData::new("div")),
        };
        control.set_main(Some(main));
        let id = control.id().to_owned();
        let widget_type = control.widget_type().to_owned();
        let scope = self.resolve_scope(scope);

        let key = self.widgets.insert(WidgetSlot {
            control,
            widget,
            disposed_children: Vec::new(),
        });
        self.lifecycle.on_create(key);
        self.append_control(Owner::Scope(scope), key)?;

        if let Some(previous) = self.bindings.insert(main, key) {
            if self.control(previous).is_some_and(|c| !c.is_disposed()) {
                warn!(id = %id, "surface node was already bound to another widget");
            }
        }
        if let Some(data) = self.surface.get_mut(main) {
            if data.id.is_none() {
                data.id = Some(id.clone());
            }
        }

        if let Some(parent_node) = self.surface.parent(main) {
            if let Some(owner) = self.owning_widget(parent_node) {
                self.append_control(owner, key)?;
            }
        }

        self.render(key)?;
        debug!(id = %id, %widget_type, "widget created");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use crate::registry::WidgetRegistry;
    use serde_json::json;
    use std::any::Any;

    fn opts(value: serde_json::Value) -> Options {
        value.as_object().cloned().unwrap_or_default()
    }

    struct Broken;

    impl Widget for Broken {
        fn render(&mut self, cx: &mut WidgetCx<'_>) -> Result<(), WidgetError> {
            Err(WidgetError::MissingOption {
                id: cx.control.id().to_owned(),
                option: "source".into(),
            })
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn create_generates_id_and_binds_node() {
        let mut engine = Engine::new();
        let key = engine
            .create("Panel", &Options::new(), None, None)
            .unwrap()
            .unwrap();
        let control = engine.control(key).unwrap();
        assert!(control.id().starts_with("_innerui_"));
        assert_eq!(
            control.option("id").and_then(|v| v.as_str()),
            Some(control.id())
        );
        let main = control.main().unwrap();
        assert_eq!(engine.widget_for_node(main), Some(key));
        let node = engine.surface().get(main).unwrap();
        assert_eq!(node.tag, "div");
        assert_eq!(node.id.as_deref(), Some(control.id()));
        assert!(node.has_class("ui-panel"));
        assert!(control.is_rendered());
        assert!(control.render_duration().is_some());
    }

    #[test]
    fn unknown_type_creates_nothing() {
        let mut engine = Engine::new();
        let created = engine
            .create("Nope", &opts(json!({ "id": "x" })), None, None)
            .unwrap();
        assert!(created.is_none());
        assert!(engine.is_empty());
    }

    #[test]
    fn init_links_nested_widgets() {
        let mut engine = Engine::new();
        let root = engine.surface().root();
        let outer = engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Panel;id:A"))
            .unwrap();
        let plain = engine
            .surface_mut()
            .insert_child(outer, NodeData::new("p"))
            .unwrap();
        engine
            .surface_mut()
            .insert_child(plain, NodeData::new("div").with_attr("ui", "type:Panel;id:B"))
            .unwrap();

        let map = engine.init(None, None, None).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["A"]);
        let a = map["A"];
        let b = engine.get("B").unwrap();
        assert_eq!(engine.control(b).unwrap().parent(), Some(Owner::Widget(a)));
        assert_eq!(engine.control(a).unwrap().control_map().get("B"), Some(&b));
    }

    #[test]
    fn init_uses_params_and_custom_attribute() {
        let config = crate::config::EngineConfig::default().with_ui_attribute("data-ui");
        let mut engine = Engine::with_config(config);
        let root = engine.surface().root();
        engine
            .surface_mut()
            .insert_child(
                root,
                NodeData::new("div").with_attr("data-ui", "type:Panel;id:@panelId;rows:3"),
            )
            .unwrap();
        engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Panel;id:ignored"))
            .unwrap();

        let params = opts(json!({ "panelId": "main" }));
        let map = engine.init(None, Some(&params), None).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["main"]);
        let control = engine.control(map["main"]).unwrap();
        assert_eq!(control.option("rows"), Some(&json!("3")));
    }

    #[test]
    fn init_into_action_scope() {
        let mut engine = Engine::new();
        let action = engine.create_scope("orders");
        let root = engine.surface().root();
        engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Panel;id:p"))
            .unwrap();
        let map = engine.init(None, None, Some(action)).unwrap();
        assert!(map.contains_key("p"));
        assert!(engine.get("p").is_none());
        assert!(engine.get_in("p", action).is_some());
    }

    #[test]
    fn render_failure_is_reported() {
        let registry = WidgetRegistry::with_builtins().with("Broken", |_| Box::new(Broken));
        let mut engine = Engine::new().with_registry(registry);
        let err = engine
            .create("Broken", &opts(json!({ "id": "b" })), None, None)
            .unwrap_err();
        match err {
            EngineError::Render { id, source } => {
                assert_eq!(id, "b");
                assert!(matches!(source, WidgetError::MissingOption { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn init_skips_unregistered_types() {
        let mut engine = Engine::new();
        let root = engine.surface().root();
        let nope = engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Nope;id:n"))
            .unwrap();
        engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Panel;id:ok"))
            .unwrap();

        let map = engine.init(None, None, None).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["ok"]);
        assert!(engine.get("n").is_none());
        assert_eq!(engine.widget_for_node(nope), None);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn init_stops_at_render_failure() {
        let registry = WidgetRegistry::with_builtins().with("Broken", |_| Box::new(Broken));
        let mut engine = Engine::new().with_registry(registry);
        let root = engine.surface().root();
        for source in ["type:Panel;id:before", "type:Broken;id:bad", "type:Panel;id:after"] {
            engine
                .surface_mut()
                .insert_child(root, NodeData::new("div").with_attr("ui", source))
                .unwrap();
        }

        let err = engine.init(None, None, None).unwrap_err();
        assert!(matches!(err, EngineError::Render { ref id, .. } if id == "bad"));
        assert!(engine.get("before").is_some());
        assert!(engine.get("after").is_none());
    }

    #[test]
    fn construct_binds_and_nests_prebuilt_widget() {
        let mut engine = Engine::new();
        let root = engine.surface().root();
        let host = engine
            .surface_mut()
            .insert_child(root, NodeData::new("div").with_attr("ui", "type:Panel;id:host"))
            .unwrap();
        engine.init(None, None, None).unwrap();
        let host_key = engine.get("host").unwrap();
        let wrapper = engine
            .surface_mut()
            .insert_child(host, NodeData::new("section"))
            .unwrap();
        let node = engine
            .surface_mut()
            .insert_child(wrapper, NodeData::new("div"))
            .unwrap();

        let key = engine
            .construct(
                Box::new(crate::widgets::Panel::new()),
                "Panel",
                &Options::new(),
                Some(node),
                None,
            )
            .unwrap();

        let control = engine.control(key).unwrap();
        assert!(control.id().starts_with("_innerui_"));
        assert_eq!(control.main(), Some(node));
        assert_eq!(engine.widget_for_node(node), Some(key));
        assert_eq!(control.parent(), Some(Owner::Widget(host_key)));
        assert!(control.is_rendered());
        assert!(engine.surface().get(node).unwrap().has_class("ui-panel"));
        assert_eq!(
            engine.control(host_key).unwrap().control_map().get(control.id()),
            Some(&key)
        );
    }
}
