use corelib::{Lens, Mat4, NodeId, SceneGraph};

use crate::input::{InputSource, RenderSink};
use crate::{GameResult, GameType};

/// Common surface of every playable scene.
pub trait Scene {
    fn kind(&self) -> GameType;

    fn graph(&self) -> &SceneGraph;

    /// Advance one frame. Returns the scene the game should switch to, if any.
    fn update(&mut self, dt: f32, input: &dyn InputSource) -> GameResult<Option<GameType>>;

    fn on_mouse_move(&mut self, _x: f64, _y: f64) {}

    fn on_mouse_scroll(&mut self, _dx: f64, _dy: f64) {}

    fn render(&self, sink: &mut dyn RenderSink);
}

/// Static camera: a plain node whose inverse world matrix is the view.
#[derive(Clone, Copy, Debug)]
pub struct FixedCamera {
    pub node: NodeId,
    pub lens: Lens,
}

impl FixedCamera {
    pub fn view(&self, graph: &SceneGraph) -> Mat4 {
        graph.world_matrix(self.node).inverse()
    }
}

/// Emit every node of `graph` except `skip`, in spawn order.
pub(crate) fn draw_all(graph: &SceneGraph, skip: NodeId, sink: &mut dyn RenderSink) {
    for (id, _) in graph.iter() {
        if id != skip {
            sink.draw(id, graph.world_matrix(id));
        }
    }
}
