mod address;
mod device;
mod geo;
mod info;
mod invoice;
mod order;
mod organization;
mod payment;
mod state;

pub use address::*;
pub use device::*;
pub use geo::*;
pub use info::*;
pub use invoice::*;
pub use order::*;
pub use organization::*;
pub use payment::*;
pub use state::*;
