pub mod input;
pub mod keys;
pub mod state;

pub use input::{Edit, TextField};
pub use keys::{map_key, KeyAction};
pub use state::{AttemptId, ClassifierState, Command, Event, Focus};
