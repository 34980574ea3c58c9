use wasm_bindgen::prelude::*;

pub mod game;
pub mod levels;
pub mod roles;
pub mod scenes;
pub mod slots;

use game::WireRooms;

ghost_web::export_game!(WireRooms, "wire-rooms");
