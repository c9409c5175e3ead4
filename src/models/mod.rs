pub mod caregiver;
pub mod community;
pub mod event;
pub mod post;
pub mod study_group;
pub mod user;

pub use caregiver::*;
pub use community::*;
pub use event::*;
pub use post::*;
pub use study_group::*;
pub use user::*;
