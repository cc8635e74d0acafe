pub mod chrome;
pub mod constants;
pub mod frames;
pub mod output;
pub mod parallax;
pub mod shapes;
pub mod theme;

pub use chrome::*;
pub use constants::*;
pub use frames::*;
pub use output::*;
pub use parallax::*;
pub use shapes::*;
pub use theme::*;
