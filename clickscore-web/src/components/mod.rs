pub mod arena_view;
pub mod button;
#[cfg(target_arch = "wasm32")]
pub mod click_arena;

pub use arena_view::ArenaView;
pub use button::Button;
#[cfg(target_arch = "wasm32")]
pub use click_arena::ClickArena;
