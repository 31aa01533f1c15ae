pub mod relay;
pub mod render;
pub mod view;

pub use relay::{ClientError, RelayApi, RelayClient};
pub use view::{ChatTurn, ChatView, Role, SubmitOutcome};
