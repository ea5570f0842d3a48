//! Name- and box-addressed front end over a [`crate::layout::LayoutTree`].

mod core;
mod helper;

pub use core::{LayoutCoordinator, NodeRef, TREE_TARGET};
pub use helper::{GridHelper, GridLine, LineItem};
