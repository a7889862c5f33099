//! UI shell: explicit state, event dispatch table and the shell that ties
//! them to the generators.

pub mod events;
pub mod shell;
pub mod state;

pub use events::{Binding, DashEvent, DispatchTable, INTERVAL_SOURCE, InputKind};
pub use shell::{ChartUpdate, Dashboard, Generators, SharedDashboard, lock};
pub use state::{ChartRevision, StateSnapshot, UiState};
