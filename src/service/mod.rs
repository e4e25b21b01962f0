//! 服務層模組
//!
//! 提供 gRPC 服務所需的 session 管理、回合驅動、計時器與 view 構建

pub mod driver;
pub mod selectable;
pub mod server;
pub mod session;
pub mod timers;
pub mod view;

pub use driver::SessionCell;
pub use selectable::selectable_mask_from_round;
pub use server::FoodRushService;
pub use session::{PlayerStats, Screen, SessionState};
pub use timers::RoundTimers;
pub use view::{round_view_from_state, session_view_from_state};
