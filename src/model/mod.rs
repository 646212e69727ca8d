//! Registry data model seen by the modifier.
//!
//! Objects are owned by the host repository. The modifier only ever holds
//! a lightweight [`ObjectRef`] from the creation event, or a freshly
//! retrieved [`ManagedObject`] copy that it is allowed to mutate.

pub mod event;
pub mod object;
pub mod status;

pub use event::{ObjectKind, ObjectRef};
pub use object::{ManagedObject, ObjectSchema, PropertyError, PropertySet};
pub use status::{Failure, ReturnCode, Status};
