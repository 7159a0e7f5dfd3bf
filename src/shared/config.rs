// This is free and unencumbered software released into the public domain.

use derive_more::Display;

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum CameraFacing {
    #[display("front")]
    Front,
    #[default]
    #[display("back")]
    Back,
}

/// Build-time constants of the overlay: bundled asset names, graph wiring
/// and capture settings.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    pub obj_texture: String,
    pub obj_model: String,
    pub box_texture: String,
    pub box_model: String,
    pub graph: String,
    pub input_stream: String,
    pub output_stream: String,
    pub flip_frames_vertically: bool,
    pub camera_facing: CameraFacing,
    pub buffer_frames: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            obj_texture: "sneaker/texture.jpg".into(),
            obj_model: "sneaker/model.obj.uuu".into(),
            box_texture: "classic_colors.png".into(),
            box_model: "box.obj.uuu".into(),
            graph: "mobile_gpu_binary_graph.binarypb".into(),
            input_stream: "input_video".into(),
            output_stream: "output_video".into(),
            flip_frames_vertically: true,
            camera_facing: CameraFacing::Back,
            buffer_frames: 2,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obj_asset(mut self, texture: impl Into<String>, model: impl Into<String>) -> Self {
        self.obj_texture = texture.into();
        self.obj_model = model.into();
        self
    }

    pub fn with_box_asset(mut self, texture: impl Into<String>, model: impl Into<String>) -> Self {
        self.box_texture = texture.into();
        self.box_model = model.into();
        self
    }

    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = graph.into();
        self
    }

    pub fn with_flip_frames_vertically(mut self, enabled: bool) -> Self {
        self.flip_frames_vertically = enabled;
        self
    }

    pub fn with_camera_facing(mut self, facing: CameraFacing) -> Self {
        self.camera_facing = facing;
        self
    }

    pub fn with_buffer_frames(mut self, n: usize) -> Self {
        self.buffer_frames = n.max(1);
        self
    }
}
