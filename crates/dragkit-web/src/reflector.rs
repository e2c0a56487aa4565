use crate::render::markers::MarkerBindings;
use dragkit_core::Reflector;

/// Texture a reflector's mirrored view renders into.
pub struct ReflectorTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    pub(crate) bindings: MarkerBindings,
    width: u32,
    height: u32,
}

impl ReflectorTarget {
    pub(crate) fn new(
        texture: wgpu::Texture,
        view: wgpu::TextureView,
        bindings: MarkerBindings,
        (width, height): (u32, u32),
    ) -> Self {
        Self {
            texture,
            view,
            bindings,
            width,
            height,
        }
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A reflector plus the texture it renders into.
pub struct MirrorPass {
    pub reflector: Reflector,
    pub target: ReflectorTarget,
}
