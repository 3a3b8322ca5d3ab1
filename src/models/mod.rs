pub mod paper;
pub mod request;
pub mod settings;
pub mod summary;

pub use paper::*;
pub use request::*;
pub use settings::*;
pub use summary::*;
