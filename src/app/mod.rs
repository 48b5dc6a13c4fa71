//! Interactive selection: session state, transitions and background work

mod action;
mod event;
mod input;
mod message;
mod state;
mod view;
mod worker;


pub use action::{Action, filter_action, select_action};
pub use event::{Event, Handler};
pub use input::{Edit, FilterInput};
pub use message::{Input, Message, Task};
pub use state::{Exit, Mode, Session, SessionOptions};
pub use view::{Row, View};
pub use worker::{Worker, execute};
