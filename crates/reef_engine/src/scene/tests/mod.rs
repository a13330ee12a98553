//! Multi-frame scene scenarios
//!
//! Shared fixtures: a configurable [`Probe`] entity that journals its
//! updates, and helpers for building scenes over a headless provider.

mod hierarchy;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SceneConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::render::{
    DrawCommand, HeadlessProvider, MeshHandle, RenderContext, RenderError, RenderState, ShaderHandle,
    VisualResources,
};
use crate::scene::{Entity, Node, Scene, UpdateContext};

/// Labels of probes in the order their updates ran
pub(super) type Journal = Rc<RefCell<Vec<&'static str>>>;

pub(super) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub(super) fn scene() -> Scene {
    Scene::new(SceneConfig::default(), Box::new(HeadlessProvider::new()))
}

/// How a probe behaves when rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum DrawMode {
    /// Draw under the current state
    Plain,
    /// Draw under a scoped state that is restored
    Scoped(RenderState),
    /// Switch state and never switch it back
    Leak(RenderState),
    /// Return an error without drawing
    Fail,
}

/// Test entity with scripted motion, expiry and rendering
pub(super) struct Probe {
    pub node: Node,
    pub label: &'static str,
    pub velocity: Vec3,
    pub spin: f32,
    pub expire_on_update: Option<u32>,
    pub updates: u32,
    pub journal: Option<Journal>,
    pub draw: DrawMode,
    pub resources: VisualResources,
}

impl Probe {
    pub fn new(label: &'static str, position: Vec3) -> Self {
        Self {
            node: Node::new(Transform::from_position(position)),
            label,
            velocity: Vec3::zeros(),
            spin: 0.0,
            expire_on_update: None,
            updates: 0,
            journal: None,
            draw: DrawMode::Plain,
            resources: VisualResources {
                mesh: MeshHandle(0),
                texture: None,
                shader: ShaderHandle(0),
            },
        }
    }

    pub fn mesh(mut self, mesh: u32) -> Self {
        self.resources.mesh = MeshHandle(mesh);
        self
    }

    pub fn moving(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn spinning(mut self, rate: f32) -> Self {
        self.spin = rate;
        self
    }

    pub fn expiring_on(mut self, update: u32) -> Self {
        self.expire_on_update = Some(update);
        self
    }

    pub fn journaled(mut self, journal: &Journal) -> Self {
        self.journal = Some(Rc::clone(journal));
        self
    }

    pub fn translucent(mut self) -> Self {
        self.node.translucent = true;
        self
    }

    pub fn drawing(mut self, draw: DrawMode) -> Self {
        self.draw = draw;
        self
    }

    pub fn child_of(mut self, parent: crate::foundation::collections::EntityId) -> Self {
        self.node.parent = Some(parent);
        self
    }

    pub fn boxed(self) -> Box<dyn Entity> {
        Box::new(self)
    }
}

impl Entity for Probe {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, dt: f32) -> bool {
        self.updates += 1;
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push(self.label);
        }
        if self.expire_on_update == Some(self.updates) {
            return false;
        }
        self.node.transform.position += self.velocity * dt;
        self.node.transform.rotation.y += self.spin * dt;
        true
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let command = DrawCommand::new(&self.resources, *self.node.world_matrix());
        match self.draw {
            DrawMode::Plain => ctx.draw(&command),
            DrawMode::Scoped(state) => ctx.with_state(state, |ctx| ctx.draw(&command)),
            DrawMode::Leak(state) => {
                ctx.set_state(state);
                ctx.draw(&command)
            }
            DrawMode::Fail => Err(RenderError::DrawFailed(self.label.to_string())),
        }
    }

    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
