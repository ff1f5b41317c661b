//! Table - a headless, virtualized data table.
//!
//! The Table ties the layout resolvers, the virtualization window, the focus
//! navigator and the selection coordinator together over one set of columns
//! and rows. It is driven by discrete inputs (key presses, pointer presses,
//! scroll positions, data arrival) and reports what happened through
//! [`TableEvent`](crate::TableEvent)s.
//!
//! # Example
//!
//! ```
//! use tablekit::{Column, Key, Modifiers, SelectionMode, Table, TableConfig, TableEvent, TableRow, Tristate};
//!
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! impl TableRow for User {
//!     fn key(&self) -> String {
//!         self.id.clone()
//!     }
//! }
//!
//! let columns = vec![Column::new("name", "Name").sortable(), Column::new("email", "Email")];
//! let config = TableConfig::default().with_selection_mode(SelectionMode::Multiple);
//! let users = vec![
//!     User { id: "u1".into(), name: "Ada".into() },
//!     User { id: "u2".into(), name: "Lin".into() },
//! ];
//! let mut table = Table::with_rows(columns, config, users).unwrap();
//! table.set_viewport(800.0, 400.0);
//!
//! table.focus_row(0);
//! table.handle_key(Key::Char(' '), Modifiers::new());
//! assert_eq!(table.tristate(), Tristate::Indeterminate);
//!
//! let events = table.drain_events();
//! assert!(events.contains(&TableEvent::SelectionChange(vec!["u1".to_string()])));
//! ```

mod config;
mod events;
mod item;
mod state;

pub use config::TableConfig;
pub use item::TableRow;
pub use state::Table;
