//=========================================================================
// Bundled Scenes
//=========================================================================
//
// The two scenes the stage ships with and the key enum that names them.
//
//   Menu ──"Show image"──► Image
//     ▲                      │
//     └────── Escape ────────┘
//   Menu ──"Quit"──► exit
//
//=========================================================================

//=== Module Declarations =================================================

mod image;
mod menu;

//=== Public API ==========================================================

pub use image::{ImageScene, PAN_STEP};
pub use menu::MenuScene;

//=== Internal Dependencies ===============================================

use crate::core::config::AppConfig;
use crate::core::resources::ResourceCache;
use crate::core::scene::{ControlSignal, SceneKey, SceneManager};

//=== AppScene ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppScene {
    Menu,
    Image,
}

impl SceneKey for AppScene {}

/// Builds the main menu: "Show image" and "Quit".
pub fn main_menu(resources: &ResourceCache, config: &AppConfig) -> MenuScene<AppScene> {
    MenuScene::new(
        vec![
            ("Show image", ControlSignal::TransitionTo(AppScene::Image)),
            ("Quit", ControlSignal::Quit),
        ],
        resources,
        &config.scenes.menu_font,
        config.assets.default_font_size,
        (config.screen.width, config.screen.height),
    )
}

/// Builds the image viewer for the configured image.
pub fn image_viewer(resources: &ResourceCache, config: &AppConfig) -> ImageScene<AppScene> {
    ImageScene::new(
        resources,
        &config.scenes.image,
        (config.screen.width, config.screen.height),
        AppScene::Menu,
    )
}

/// Registers both scenes with the menu as the starting scene.
pub fn register_all(scenes: &mut SceneManager<AppScene>, resources: &ResourceCache, config: &AppConfig) {
    scenes.register_default(AppScene::Menu, main_menu(resources, config));
    scenes.register_scene(AppScene::Image, image_viewer(resources, config));
}
