mod inspect;
mod session;

pub use inspect::run_inspect;
pub use session::run_session;
