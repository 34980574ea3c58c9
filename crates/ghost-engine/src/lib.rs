pub mod api;
pub mod assets;
pub mod behavior;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod storage;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::game::{Game, SceneContext, SceneController};
pub use api::types::{EntityId, GameEvent};
pub use assets::join::{AssetJoin, AssetStatus, JoinState};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use behavior::{
    sense, step, Arrival, BehaviorParams, EntityState, Intent, SeekParams, Sensors,
    TransitionTable, Trigger,
};
pub use components::animation::{facing_bucket, Bob, WalkCycle};
pub use components::entity::Entity;
pub use components::layer::SurfaceLayer;
pub use components::sprite::{AtlasId, Backdrop, Facing, SpriteComponent};
pub use core::bounds::Rect;
pub use core::clock::{Advance, Clock};
pub use core::director::{Director, SceneChange};
pub use core::rng::Rng;
pub use core::roster::Roster;
pub use core::score::Score;
pub use error::EngineError;
pub use input::state::{keys, InputEvent, InputSnapshot, InputState};
pub use renderer::{Frame, LayerStack, RasterSurface, SpriteDraw, Surface};
pub use storage::progress::{DeferredWrite, LoadedProgress, Progress};
pub use storage::store::{KeyValueStore, MemoryStore};
pub use systems::render::{draw_entities, entity_draw};
