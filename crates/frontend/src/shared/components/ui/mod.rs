pub mod badge;
pub mod button;
pub mod switch;

pub use badge::Badge;
pub use button::Button;
pub use switch::Switch;
