pub mod bridge;
pub mod capability;
pub mod constants;
pub mod cursor;
pub mod environment;
pub mod error;
pub mod gesture;
pub mod noise;
pub mod particles;
pub mod poem;
pub mod scheduler;
pub mod session;

pub use bridge::*;
pub use capability::*;
pub use constants::*;
pub use cursor::*;
pub use environment::*;
pub use error::*;
pub use gesture::*;
pub use noise::*;
pub use particles::*;
pub use scheduler::*;
pub use session::*;
